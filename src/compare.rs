//! 照合の実行（検証 → 読み込み → 照合 → 書き出し）

use crate::cli::ReportFormat;
use crate::error::{DeskCompareError, Result};
use crate::export;
use crate::reader;
use chrono::NaiveDateTime;
use desk_compare_common::{compare_datasets, select_column_names, ComparisonReport, EngineOptions, Progress};
use std::fs::File;
use std::path::{Path, PathBuf};

/// 書き込み確認用の一時ファイル名
const PROBE_FILE: &str = ".test_write";

/// 照合リクエスト
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub output_dir: PathBuf,
    pub format: ReportFormat,
    pub options: EngineOptions,
    /// レポートファイル名に使う時刻
    pub timestamp: NaiveDateTime,
}

/// 照合結果
#[derive(Debug)]
pub struct CompareOutcome {
    pub report: ComparisonReport,
    /// 書き出したレポート
    pub paths: Vec<PathBuf>,
}

/// 入力ファイルが存在し読み込めることを確認
pub fn validate_input(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeskCompareError::FileNotFound(path.display().to_string()));
    }
    File::open(path)
        .map(|_| ())
        .map_err(|e| DeskCompareError::FileUnreadable(format!("{}: {}", path.display(), e)))
}

/// 出力先を作成し、書き込めることを確認
pub fn validate_output_dir(dir: &Path) -> Result<()> {
    let not_writable = |e: std::io::Error| DeskCompareError::OutputNotWritable(format!("{}: {}", dir.display(), e));

    std::fs::create_dir_all(dir).map_err(not_writable)?;
    let probe = dir.join(PROBE_FILE);
    std::fs::write(&probe, b"test").map_err(not_writable)?;
    std::fs::remove_file(&probe).map_err(not_writable)?;
    Ok(())
}

/// 読み込む列の表示（全列の場合は ALL）
fn describe_columns(headers: &[String], selected: &[String]) -> String {
    if selected.len() == headers.len() {
        "ALL".to_string()
    } else {
        format!("{:?}", selected)
    }
}

/// 照合を実行してレポートを書き出す
///
/// `on_progress` には `(0..=100, メッセージ)` が単調増加で通知される。
pub fn run_comparison(request: &CompareRequest, on_progress: &mut dyn FnMut(u8, &str)) -> Result<CompareOutcome> {
    let mut progress = Progress::new(on_progress);

    progress.report(0, "Validating input files...");
    validate_input(&request.file1)?;
    validate_input(&request.file2)?;
    validate_output_dir(&request.output_dir)?;

    progress.report(5, "Reading Excel files (headers only)...");
    let aliases = &request.options.columns;
    let headers1 = reader::read_headers(&request.file1)?;
    let headers2 = reader::read_headers(&request.file2)?;
    let selected1 = select_column_names(&headers1, aliases);
    let selected2 = select_column_names(&headers2, aliases);
    progress.report(
        6,
        format!(
            "Columns to read - file1: {} | file2: {}",
            describe_columns(&headers1, &selected1),
            describe_columns(&headers2, &selected2)
        ),
    );

    progress.report(7, "Reading file 1...");
    let dataset1 = reader::read_dataset(&request.file1, aliases)?;
    progress.report(8, "Reading file 2...");
    let dataset2 = reader::read_dataset(&request.file2, aliases)?;

    let report = compare_datasets(&dataset1, &dataset2, &request.options, &mut progress)?;
    tracing::info!(rows = report.rows.len(), warnings = report.warnings.len(), "comparison finished");

    progress.report(95, "Saving results...");
    let paths = export::write_report(&report.rows, request.format, &request.output_dir, &request.timestamp)?;

    let saved = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    progress.report(100, format!("Done. Saved to: {}", saved));

    Ok(CompareOutcome { report, paths })
}
