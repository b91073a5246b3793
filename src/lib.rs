//! Desk Compare
//!
//! 棚卸しスプレッドシートの読み込み・照合の実行・レポート出力。

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod inspect;
pub mod reader;
