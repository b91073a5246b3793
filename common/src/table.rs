//! 表形式データの型定義
//!
//! スプレッドシートの読み込み結果をファイル形式に依存しない形で保持する。

use serde::{Deserialize, Serialize};
use std::fmt;

/// セル値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// 文字列表現を取得（空セルは None）
    ///
    /// 小数部のない数値は整数として表記する（`101.0` → `"101"`）。
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Bool(b) => Some(if *b { "True".into() } else { "False".into() }),
        }
    }

    /// 空セルまたは空白のみのテキスト
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text().unwrap_or_default())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// 1シート分のデータ（ヘッダー + 行）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から列番号を取得
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 指定行・列のセル（短い行の欠損位置は空セル扱い）
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// 指定列のみを残した新しいデータセット
    pub fn select(&self, indices: &[usize]) -> Dataset {
        let columns = indices
            .iter()
            .filter_map(|&i| self.columns.get(i).cloned())
            .collect();
        let rows = (0..self.rows.len())
            .map(|r| {
                indices
                    .iter()
                    .filter(|&&i| i < self.columns.len())
                    .map(|&i| self.cell(r, i).clone())
                    .collect()
            })
            .collect();
        Dataset { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_text_number() {
        assert_eq!(Cell::Number(101.0).as_text(), Some("101".to_string()));
        assert_eq!(Cell::Number(1.5).as_text(), Some("1.5".to_string()));
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn test_cell_is_blank() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".into()).is_blank());
        assert!(!Cell::Text(" a ".into()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_select_handles_short_rows() {
        let ds = Dataset::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![Cell::from("a1")], vec![Cell::from("a2"), Cell::from("b2"), Cell::from("c2")]],
        );
        let selected = ds.select(&[2, 0]);
        assert_eq!(selected.columns, vec!["C", "A"]);
        assert_eq!(selected.rows[0], vec![Cell::Empty, Cell::from("a1")]);
        assert_eq!(selected.rows[1], vec![Cell::from("c2"), Cell::from("a2")]);
    }
}
