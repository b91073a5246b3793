//! 照合エンジン
//!
//! 2つのデータセットを受け取り、デスクごとのシリアル不一致を返す。
//! ファイル入出力は行わず、呼び出しごとに独立した状態で処理する。
//!
//! ## 処理フロー（ファイルごと）
//! 1. 列の選択・役割判定
//! 2. 資産種別による行の絞り込み
//! 3. デスクIDの補完・正規化
//! 4. シリアルの修復
//! 5. 縦持ち変換・対応表作成
//!
//! 両ファイルの対応表から差分を取り、推定と集計を行う。

use crate::aggregate::{aggregate, MismatchRow, MAX_CELL_CHARS};
use crate::columns::{select_columns, ColumnAliases, ColumnLayout, DeskSource};
use crate::desk::normalize_optional_desk_id;
use crate::diff::difference;
use crate::error::{Error, Result, Side};
use crate::maps::DeskSerialMaps;
use crate::progress::Progress;
use crate::record::{filter_asset_type, records_from_dataset, resolve_desk_id, Record};
use crate::reshape::{reshape, DeskSerial};
use crate::serial::{repair_serials, SerialReplacement};
use crate::table::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// エンジン設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// 認識する列名
    pub columns: ColumnAliases,
    /// 照合対象の資産種別コード
    pub monitor_code: String,
    /// 進捗通知の単位（デスク数）
    pub batch_size: usize,
    /// 診断用サンプルの最大件数
    pub sample_limit: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            columns: ColumnAliases::default(),
            monitor_code: "MNTR".into(),
            batch_size: 50,
            sample_limit: 5,
        }
    }
}

/// ファイル間でデスクが食い違うシリアル（診断用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeskDisagreement {
    pub serial: String,
    pub desk_file1: String,
    pub desk_file2: String,
}

/// 照合の統計情報
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonStats {
    /// 絞り込み後の行数
    pub rows: [usize; 2],
    /// (デスク, シリアル) の組数
    pub pairs: [usize; 2],
    /// シリアル修復数
    pub replacements: [usize; 2],
    /// 修復例
    pub replacement_samples: Vec<SerialReplacement>,
    /// 比較したデスク数
    pub desks_compared: usize,
    /// ファイル間でデスクが食い違うシリアル数
    pub disagreements: usize,
    pub disagreement_samples: Vec<DeskDisagreement>,
}

/// 照合結果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonReport {
    pub rows: Vec<MismatchRow>,
    pub warnings: Vec<String>,
    pub stats: ComparisonStats,
}

/// ファイルごとの前処理結果
struct Prepared {
    layout: ColumnLayout,
    records: Vec<Record>,
}

fn prepare(side: Side, dataset: &Dataset, options: &EngineOptions, progress: &mut Progress<'_>) -> Result<Prepared> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset(side));
    }

    let dataset = select_columns(dataset, &options.columns);
    let layout = ColumnLayout::resolve(&dataset.columns, &options.columns);

    if let DeskSource::Alias { name, .. } = &layout.desk {
        tracing::debug!(%side, column = %name, "using desk alias column");
    }

    progress.report(
        20 + 4 * (side.number() - 1),
        format!("Filtering {} rows in {}...", options.monitor_code, side),
    );
    let records = filter_asset_type(
        records_from_dataset(&dataset, &layout),
        layout.asset_type.is_some(),
        &options.monitor_code,
    );
    if records.is_empty() {
        return Err(Error::NoMonitorRows(side, options.monitor_code.clone()));
    }

    progress.report(22 + 4 * (side.number() - 1), format!("Fixing Desk_IDs in {}...", side));
    let records = records
        .iter()
        .map(|r| resolve_desk_id(r, &layout.desk))
        .map(|r| Record {
            desk: Some(normalize_optional_desk_id(r.desk.as_deref())),
            ..r
        })
        .collect::<Vec<_>>();

    tracing::debug!(%side, rows = records.len(), serial_columns = layout.serials.len(), "prepared");
    Ok(Prepared { layout, records })
}

fn desk_samples(records: &[Record]) -> String {
    records
        .iter()
        .take(3)
        .filter_map(|r| r.desk.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// ファイル間で同じシリアルが別のデスクに記録されている組を抽出
fn find_disagreements(pairs1: &[DeskSerial], pairs2: &[DeskSerial], limit: usize) -> (usize, Vec<DeskDisagreement>) {
    let mut desks2: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for pair in pairs2 {
        desks2.entry(pair.serial.as_str()).or_default().insert(pair.desk.as_str());
    }

    let mut seen: BTreeSet<(&str, &str, &str)> = BTreeSet::new();
    let mut serials: BTreeSet<&str> = BTreeSet::new();
    for pair in pairs1 {
        if let Some(others) = desks2.get(pair.serial.as_str()) {
            for other in others.iter().copied().filter(|d| *d != pair.desk) {
                seen.insert((pair.serial.as_str(), pair.desk.as_str(), other));
                serials.insert(pair.serial.as_str());
            }
        }
    }

    let samples = seen
        .into_iter()
        .take(limit)
        .map(|(serial, d1, d2)| DeskDisagreement {
            serial: serial.to_string(),
            desk_file1: d1.to_string(),
            desk_file2: d2.to_string(),
        })
        .collect();
    (serials.len(), samples)
}

/// 2つのデータセットを照合
pub fn compare_datasets(
    file1: &Dataset,
    file2: &Dataset,
    options: &EngineOptions,
    progress: &mut Progress<'_>,
) -> Result<ComparisonReport> {
    let mut report = ComparisonReport::default();

    progress.report(10, "Selecting columns...");
    let prepared1 = prepare(Side::File1, file1, options, progress)?;
    let prepared2 = prepare(Side::File2, file2, options, progress)?;
    progress.report(28, format!("{} filtering complete", options.monitor_code));

    progress.report(
        30,
        format!(
            "Desk IDs normalized - File 1: {} rows, File 2: {} rows",
            prepared1.records.len(),
            prepared2.records.len()
        ),
    );
    progress.report(
        36,
        format!(
            "Samples - File1: {} | File2: {}",
            desk_samples(&prepared1.records),
            desk_samples(&prepared2.records)
        ),
    );
    report.stats.rows = [prepared1.records.len(), prepared2.records.len()];

    progress.report(40, "Identifying serial columns...");
    let prefix = &options.columns.serial_prefix;
    match (prepared1.layout.has_serials(), prepared2.layout.has_serials()) {
        (false, false) => return Err(Error::NoSerialColumns(prefix.clone())),
        (has1, has2) => {
            for (side, has) in [(Side::File1, has1), (Side::File2, has2)] {
                if !has {
                    let warning = format!(
                        "No serial columns found in {}; all serials will appear as 'Only in File {}'",
                        side,
                        side.other().number()
                    );
                    tracing::warn!("{}", warning);
                    progress.report(41, format!("Warning: {}", warning));
                    report.warnings.push(warning);
                }
            }
        }
    }

    progress.report(42, "Fixing serials starting with 0 using scan fields...");
    let repaired1 = repair_serials(&prepared1.records, prepared1.layout.has_scans(), options.sample_limit);
    let repaired2 = repair_serials(&prepared2.records, prepared2.layout.has_scans(), options.sample_limit);
    report.stats.replacements = [repaired1.replaced, repaired2.replaced];
    report.stats.replacement_samples = repaired1
        .samples
        .iter()
        .chain(repaired2.samples.iter())
        .cloned()
        .collect();
    if repaired1.replaced > 0 || repaired2.replaced > 0 {
        let sample_text = report
            .stats
            .replacement_samples
            .iter()
            .map(|s| format!("{}:{}->{}", s.column, s.original, s.replacement))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::info!(file1 = repaired1.replaced, file2 = repaired2.replaced, "serials replaced from scan fields");
        progress.report(
            44,
            format!(
                "Replaced {} in file1, {} in file2. Samples: {}",
                repaired1.replaced, repaired2.replaced, sample_text
            ),
        );
    }

    progress.report(45, "Reshaping data...");
    let pairs1 = reshape(&repaired1.records);
    let pairs2 = reshape(&repaired2.records);
    report.stats.pairs = [pairs1.len(), pairs2.len()];
    progress.report(
        65,
        format!("Normalized serials - File1: {} pairs, File2: {} pairs", pairs1.len(), pairs2.len()),
    );

    let (disagreements, samples) = find_disagreements(&pairs1, &pairs2, options.sample_limit);
    if disagreements > 0 {
        let sample_text = samples
            .iter()
            .map(|d| format!("{}:{}!={}", d.serial, d.desk_file1, d.desk_file2))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::info!(count = disagreements, "serials assigned to different desks across files");
        progress.report(
            67,
            format!("Serial assigned to different desks across files (sample): {}", sample_text),
        );
    }
    report.stats.disagreements = disagreements;
    report.stats.disagreement_samples = samples;

    progress.report(69, "Building serial maps and sets...");
    let maps1 = DeskSerialMaps::build(&pairs1);
    let maps2 = DeskSerialMaps::build(&pairs2);

    let diff = difference(&maps1, &maps2, options.batch_size, progress, (76, 85));
    report.stats.desks_compared = diff.desks_compared;
    tracing::debug!(
        desks = diff.desks_compared,
        only_in_1 = diff.only_in_1.len(),
        only_in_2 = diff.only_in_2.len(),
        "desk comparison finished"
    );

    progress.report(85, "Preparing output...");
    report.rows = aggregate(&diff, [&maps1, &maps2], progress, (85, 94));

    verify_rows(&report.rows)?;

    for row in &report.rows {
        for column in row.oversized_columns() {
            let warning = format!(
                "{} for room '{}' desk '{}' exceeds {} characters; the Excel cell is truncated (JSON output is complete)",
                column, row.room, row.desk_number, MAX_CELL_CHARS
            );
            tracing::warn!("{}", warning);
            report.warnings.push(warning);
        }
    }
    Ok(report)
}

/// 出力行の整合性を確認（両側の重複なし・空行なし）
fn verify_rows(rows: &[MismatchRow]) -> Result<()> {
    for row in rows {
        if row.only_in_file1.is_empty() && row.only_in_file2.is_empty() {
            return Err(Error::Processing(format!(
                "empty mismatch row for {} {}",
                row.room, row.desk_number
            )));
        }
        if let Some(serial) = row.only_in_file1.iter().find(|s| row.only_in_file2.contains(s)) {
            return Err(Error::Processing(format!(
                "serial {} reported on both sides for {} {}",
                serial, row.room, row.desk_number
            )));
        }
    }
    Ok(())
}
