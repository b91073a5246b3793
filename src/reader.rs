//! スプレッドシート読み込み
//!
//! 先頭シートの1行目をヘッダとして `Dataset` に変換する。

use crate::error::{DeskCompareError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use desk_compare_common::{select_columns, Cell, ColumnAliases, Dataset};
use std::path::Path;

/// calamineのセル値を変換
fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Empty | Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

/// ヘッダ名（表記はそのまま、空欄は位置から補完）
fn header_name(value: &Data, index: usize) -> String {
    let name = value.to_string();
    if name.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        name
    }
}

fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DeskCompareError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DeskCompareError::SpreadsheetRead(format!("{}: シートがありません", path.display())))?
        .map_err(|e| DeskCompareError::SpreadsheetRead(format!("{}: {}", path.display(), e)))
}

fn to_dataset(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().enumerate().map(|(i, v)| header_name(v, i)).collect(),
        None => return Dataset::default(),
    };

    let rows = rows
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().map(to_cell).collect();
            cells.resize(columns.len(), Cell::Empty);
            cells
        })
        .filter(|cells| cells.iter().any(|c| !c.is_blank()))
        .collect();

    Dataset::new(columns, rows)
}

/// ヘッダ行のみ読み込み
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let range = first_sheet(path)?;
    Ok(range
        .rows()
        .next()
        .map(|header| header.iter().enumerate().map(|(i, v)| header_name(v, i)).collect())
        .unwrap_or_default())
}

/// 全体を読み込み、照合に使う列だけを残す
pub fn read_dataset(path: &Path, aliases: &ColumnAliases) -> Result<Dataset> {
    let range = first_sheet(path)?;
    let dataset = to_dataset(&range);
    tracing::debug!(
        path = %path.display(),
        columns = dataset.columns.len(),
        rows = dataset.len(),
        "spreadsheet loaded"
    );
    Ok(select_columns(&dataset, aliases))
}
