//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use desk_compare::compare::{validate_input, validate_output_dir};
use desk_compare::error::DeskCompareError;
use desk_compare_common::{ErrorKind, Side};
use std::path::Path;
use tempfile::tempdir;

/// 存在しない入力ファイル
#[test]
fn test_validate_nonexistent_input() {
    let result = validate_input(Path::new("/nonexistent/path/inventory.xlsx"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, DeskCompareError::FileNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

/// 出力先が無ければ作成される
#[test]
fn test_validate_output_dir_creates_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("reports").join("2024");

    validate_output_dir(&output).unwrap();
    assert!(output.is_dir());
    // 書き込み確認用ファイルは残らない
    assert!(!output.join(".test_write").exists());
}

/// 出力先がファイルの場合
#[test]
fn test_validate_output_dir_on_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("occupied");
    std::fs::write(&file, "x").unwrap();

    let err = validate_output_dir(&file).unwrap_err();
    assert!(matches!(err, DeskCompareError::OutputNotWritable(_)));
}

/// DeskCompareErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        DeskCompareError::Config("テスト設定エラー".to_string()),
        DeskCompareError::FileNotFound("a.xlsx".to_string()),
        DeskCompareError::FileUnreadable("a.xlsx".to_string()),
        DeskCompareError::OutputNotWritable("/out".to_string()),
        DeskCompareError::SpreadsheetRead("壊れたブック".to_string()),
        DeskCompareError::ExcelGeneration("Excel生成エラー".to_string()),
        DeskCompareError::ReportLocked("desk_mismatches.xlsx".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラー分類
#[test]
fn test_error_kinds() {
    assert_eq!(DeskCompareError::SpreadsheetRead("x".into()).kind(), ErrorKind::Data);
    assert_eq!(DeskCompareError::ExcelGeneration("x".into()).kind(), ErrorKind::Processing);
    assert_eq!(DeskCompareError::ReportLocked("x".into()).kind(), ErrorKind::Io);
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: DeskCompareError = io_err.into();

    assert!(matches!(err, DeskCompareError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: DeskCompareError = json_err.into();

    assert!(matches!(err, DeskCompareError::JsonParse(_)));
}

/// 照合エンジンのエラーは透過的に表示される
#[test]
fn test_common_error_is_transparent() {
    let common_err = desk_compare_common::Error::NoMonitorRows(Side::File2, "MNTR".to_string());
    let err: DeskCompareError = common_err.into();

    assert!(matches!(err, DeskCompareError::Common(_)));
    assert_eq!(err.kind(), ErrorKind::Data);
    assert_eq!(format!("{}", err), "file 2 has no rows of type MNTR");
}
