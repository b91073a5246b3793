//! Desk Compare Common Library
//!
//! 2つの在庫スナップショットを照合するエンジン本体。
//! ファイル入出力を持たず、CLIからデータセットを受け取って不一致行を返す。

pub mod aggregate;
pub mod columns;
pub mod desk;
pub mod diff;
pub mod engine;
pub mod error;
pub mod export;
pub mod maps;
pub mod progress;
pub mod record;
pub mod reshape;
pub mod resolve;
pub mod serial;
pub mod table;

pub use aggregate::{MismatchRow, DOM_ROOM, OUTPUT_COLUMNS};
pub use columns::{select_column_names, select_columns, ColumnAliases, ColumnLayout};
pub use desk::{normalize_desk_id, split_desk_id, BLANKS, UNASSIGNED};
pub use engine::{compare_datasets, ComparisonReport, ComparisonStats, DeskDisagreement, EngineOptions};
pub use error::{Error, ErrorKind, Result, Side};
pub use progress::Progress;
pub use serial::{normalize_serial, SerialReplacement};
pub use table::{Cell, Dataset};
