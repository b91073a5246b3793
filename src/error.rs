use desk_compare_common::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskCompareError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ファイルを読み込めません: {0}")]
    FileUnreadable(String),

    #[error("出力先に書き込めません: {0}")]
    OutputNotWritable(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("レポートファイルが他のプログラムで開かれています: {0}")]
    ReportLocked(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] desk_compare_common::Error),
}

impl DeskCompareError {
    /// エラー分類
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeskCompareError::Config(_) => ErrorKind::Validation,
            DeskCompareError::FileNotFound(_)
            | DeskCompareError::FileUnreadable(_)
            | DeskCompareError::OutputNotWritable(_) => ErrorKind::Validation,
            DeskCompareError::SpreadsheetRead(_) | DeskCompareError::JsonParse(_) => ErrorKind::Data,
            DeskCompareError::ExcelGeneration(_) => ErrorKind::Processing,
            DeskCompareError::ReportLocked(_) | DeskCompareError::Io(_) => ErrorKind::Io,
            DeskCompareError::Common(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskCompareError>;
