pub mod excel;
pub mod preview;

use crate::cli::ReportFormat;
use crate::error::{DeskCompareError, Result};
use chrono::NaiveDateTime;
use desk_compare_common::MismatchRow;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

/// レポートファイル名の接頭辞
pub const REPORT_PREFIX: &str = "desk_mismatches";

/// `desk_mismatches_YYYYMMDD_HHMMSS.<ext>`
pub fn report_file_name(timestamp: &NaiveDateTime, extension: &str) -> String {
    format!("{}_{}.{}", REPORT_PREFIX, timestamp.format("%Y%m%d_%H%M%S"), extension)
}

/// ファイルを書き込む（失敗時は途中までのファイルを削除）
pub(crate) fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Err(e) = std::fs::write(path, content) {
        let _ = std::fs::remove_file(path);
        return Err(write_error(path, e));
    }
    Ok(())
}

/// 書き込み拒否はファイルが開かれている場合として扱う
fn write_error(path: &Path, e: std::io::Error) -> DeskCompareError {
    match e.kind() {
        IoErrorKind::PermissionDenied => DeskCompareError::ReportLocked(path.display().to_string()),
        _ => DeskCompareError::Io(e),
    }
}

fn write_json(rows: &[MismatchRow], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    write_file(path, json.as_bytes())
}

/// 不一致行をレポートとして書き出し、書き込んだパスを返す
///
/// どれか1つでも失敗した場合、今回書き込んだファイルはすべて削除する。
pub fn write_report(
    rows: &[MismatchRow],
    format: ReportFormat,
    output_dir: &Path,
    timestamp: &NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::new();

    let result = (|| -> Result<()> {
        if format.writes_excel() {
            let path = output_dir.join(report_file_name(timestamp, "xlsx"));
            excel::write_excel(rows, &path)?;
            written.push(path);
        }
        if format.writes_json() {
            let path = output_dir.join(report_file_name(timestamp, "json"));
            write_json(rows, &path)?;
            written.push(path);
        }
        Ok(())
    })();

    match result {
        Ok(()) => Ok(written),
        Err(e) => {
            for path in &written {
                let _ = std::fs::remove_file(path);
            }
            Err(e)
        }
    }
}
