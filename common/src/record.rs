//! 入力行（レコード）
//!
//! 列の役割判定結果をもとに1行を [`Record`] に変換する。
//! 以降の処理は値を書き換えず、常に新しいレコードを生成する。

use crate::columns::{ColumnLayout, DeskSource};
use crate::table::Dataset;

/// シリアル列の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialField {
    pub column: String,
    pub value: Option<String>,
}

/// 入力1行分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// デスクID（未加工）
    pub desk: Option<String>,
    /// 資産種別コード
    pub asset_type: Option<String>,
    pub serials: Vec<SerialField>,
    /// スキャン補助列（検索順）
    pub scans: Vec<Option<String>>,
    /// 部屋・場所
    pub place: Option<String>,
}

fn text_at(dataset: &Dataset, row: usize, column: Option<usize>) -> Option<String> {
    column.and_then(|c| dataset.cell(row, c).as_text())
}

/// データセットをレコード列に変換
pub fn records_from_dataset(dataset: &Dataset, layout: &ColumnLayout) -> Vec<Record> {
    (0..dataset.len())
        .map(|row| Record {
            desk: text_at(dataset, row, layout.desk.index()),
            asset_type: text_at(dataset, row, layout.asset_type),
            serials: layout
                .serials
                .iter()
                .map(|(i, name)| SerialField {
                    column: name.clone(),
                    value: dataset.cell(row, *i).as_text(),
                })
                .collect(),
            scans: layout
                .scans
                .iter()
                .map(|i| dataset.cell(row, *i).as_text())
                .collect(),
            place: text_at(dataset, row, layout.place),
        })
        .collect()
}

/// 資産種別で行を絞り込む
///
/// 種別列がない場合は全行を残す。何度適用しても結果は変わらない。
pub fn filter_asset_type(records: Vec<Record>, has_type_column: bool, code: &str) -> Vec<Record> {
    if !has_type_column {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.asset_type.as_deref() == Some(code))
        .collect()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// 空のデスクIDを同じ行の部屋・場所で補完する
///
/// 空白のみのデスクIDは欠損として扱う。前後の行からの補完は行わない。
/// デスク列そのものがないデータセット（`DeskSource::Synthesized`）では補完せず、
/// デスクIDは空のまま残す。
pub fn resolve_desk_id(record: &Record, source: &DeskSource) -> Record {
    if *source == DeskSource::Synthesized {
        return Record {
            desk: None,
            ..record.clone()
        };
    }
    let desk = match non_blank(&record.desk) {
        Some(desk) => Some(desk.to_string()),
        None => non_blank(&record.place).map(|p| p.to_string()),
    };
    Record {
        desk,
        ..record.clone()
    }
}
