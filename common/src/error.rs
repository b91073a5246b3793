//! エラー型定義

use std::fmt;
use thiserror::Error;

/// 照合対象のファイル（1 または 2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    File1,
    File2,
}

impl Side {
    /// 人間向けの番号（1/2）
    pub fn number(&self) -> u8 {
        match self {
            Side::File1 => 1,
            Side::File2 => 2,
        }
    }

    /// 反対側のファイル
    pub fn other(&self) -> Side {
        match self {
            Side::File1 => Side::File2,
            Side::File2 => Side::File1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {}", self.number())
    }
}

/// エラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力パス・出力先の事前検証エラー
    Validation,
    /// データ内容のエラー（空・対象行なし・シリアル列なし）
    Data,
    /// 正規化・集計中の想定外エラー
    Processing,
    /// 結果ファイル書き込みエラー
    Io,
}

/// 照合エンジンのエラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} contains no data")]
    EmptyDataset(Side),

    #[error("{0} has no rows of type {1}")]
    NoMonitorRows(Side, String),

    #[error("No serial columns found in either file (serial columns must start with '{0}', e.g. {0}1, {0}2)")]
    NoSerialColumns(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDataset(_) | Error::NoMonitorRows(..) | Error::NoSerialColumns(_) => {
                ErrorKind::Data
            }
            Error::Processing(_) => ErrorKind::Processing,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
