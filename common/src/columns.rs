//! 列の選択と役割判定
//!
//! 認識する列名はすべて [`ColumnAliases`] に列挙し、設定ファイルから変更できる。
//!
//! ## 判定ルール
//! - シリアル列: 名前が `serial_prefix` で始まる（大文字小文字を区別）
//! - 保持列: 名前に `keep_keywords` のいずれかを含む（大文字小文字を無視）
//! - デスク列: `desk_column` と完全一致、なければ `desk_keyword` を含む最初の列
//! - 場所・種別・スキャン列: 前後空白を除いて大文字小文字を無視した完全一致

use crate::table::Dataset;
use serde::{Deserialize, Serialize};

/// 認識する列名の定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    /// シリアル列の接頭辞
    pub serial_prefix: String,
    /// 読み込み対象とする列名キーワード（部分一致）
    pub keep_keywords: Vec<String>,
    /// 正式なデスク列名
    pub desk_column: String,
    /// デスク列の別名キーワード（部分一致）
    pub desk_keyword: String,
    /// 部屋・場所列名
    pub place_columns: Vec<String>,
    /// 資産種別列名
    pub type_columns: Vec<String>,
    /// スキャン補助列名（検索順）
    pub scan_columns: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            serial_prefix: "S.N".into(),
            keep_keywords: ["desk", "place", "room", "type", "skan"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            desk_column: "Desk_ID".into(),
            desk_keyword: "desk".into(),
            place_columns: vec!["place".into(), "room".into()],
            type_columns: vec!["Type".into()],
            scan_columns: vec!["skan".into(), "skan2".into()],
        }
    }
}

impl ColumnAliases {
    pub fn is_serial(&self, name: &str) -> bool {
        !self.serial_prefix.is_empty() && name.starts_with(&self.serial_prefix)
    }

    fn is_kept(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        self.keep_keywords
            .iter()
            .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
    }

    fn is_desk_alias(&self, name: &str) -> bool {
        !self.desk_keyword.is_empty()
            && name.to_lowercase().contains(&self.desk_keyword.to_lowercase())
    }
}

fn matches_exact(name: &str, candidates: &[String]) -> bool {
    let name = name.trim();
    candidates.iter().any(|c| c.trim().eq_ignore_ascii_case(name))
}

/// 読み込み対象の列番号を選択
///
/// 1列も該当しない場合は全列を返す。
pub fn select_column_indices(columns: &[String], aliases: &ColumnAliases) -> Vec<usize> {
    let selected: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| aliases.is_serial(c) || aliases.is_kept(c))
        .map(|(i, _)| i)
        .collect();

    if selected.is_empty() {
        (0..columns.len()).collect()
    } else {
        selected
    }
}

/// 読み込み対象の列名を選択（ヘッダーのみで判定）
pub fn select_column_names(columns: &[String], aliases: &ColumnAliases) -> Vec<String> {
    select_column_indices(columns, aliases)
        .into_iter()
        .map(|i| columns[i].clone())
        .collect()
}

/// データセットを対象列に絞り込む
pub fn select_columns(dataset: &Dataset, aliases: &ColumnAliases) -> Dataset {
    let indices = select_column_indices(&dataset.columns, aliases);
    dataset.select(&indices)
}

/// デスク列の由来
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskSource {
    /// 正式名の列
    Canonical(usize),
    /// 別名の列を正式な役割として扱う
    Alias { index: usize, name: String },
    /// 該当列なし（全行空として扱う）
    Synthesized,
}

impl DeskSource {
    pub fn index(&self) -> Option<usize> {
        match self {
            DeskSource::Canonical(i) => Some(*i),
            DeskSource::Alias { index, .. } => Some(*index),
            DeskSource::Synthesized => None,
        }
    }
}

/// 列の役割判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub desk: DeskSource,
    pub place: Option<usize>,
    pub asset_type: Option<usize>,
    /// シリアル列（列番号, 列名）
    pub serials: Vec<(usize, String)>,
    /// スキャン補助列（`scan_columns` の順）
    pub scans: Vec<usize>,
}

impl ColumnLayout {
    /// ヘッダーから各列の役割を判定
    pub fn resolve(columns: &[String], aliases: &ColumnAliases) -> Self {
        let desk = match columns.iter().position(|c| *c == aliases.desk_column) {
            Some(i) => DeskSource::Canonical(i),
            None => match columns.iter().position(|c| aliases.is_desk_alias(c)) {
                Some(index) => DeskSource::Alias {
                    index,
                    name: columns[index].clone(),
                },
                None => DeskSource::Synthesized,
            },
        };

        let place = columns
            .iter()
            .position(|c| matches_exact(c, &aliases.place_columns));
        let asset_type = columns
            .iter()
            .position(|c| matches_exact(c, &aliases.type_columns));

        let serials = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| aliases.is_serial(c))
            .map(|(i, c)| (i, c.clone()))
            .collect();

        let scans = aliases
            .scan_columns
            .iter()
            .filter_map(|name| {
                columns
                    .iter()
                    .position(|c| c.trim().eq_ignore_ascii_case(name.trim()))
            })
            .collect();

        Self {
            desk,
            place,
            asset_type,
            serials,
            scans,
        }
    }

    pub fn has_serials(&self) -> bool {
        !self.serials.is_empty()
    }

    pub fn has_scans(&self) -> bool {
        !self.scans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_keeps_serial_and_keyword_columns() {
        let columns = names(&["Lp", "Desk", "S.N1", "S.N2", "Owner", "Room", "Type", "skan2", "s.n3"]);
        let selected = select_column_names(&columns, &ColumnAliases::default());
        assert_eq!(selected, names(&["Desk", "S.N1", "S.N2", "Room", "Type", "skan2"]));
    }

    #[test]
    fn test_select_falls_back_to_all_columns() {
        let columns = names(&["A", "B"]);
        let selected = select_column_names(&columns, &ColumnAliases::default());
        assert_eq!(selected, columns);
    }

    #[test]
    fn test_resolve_canonical_desk() {
        let columns = names(&["desk_old", "Desk_ID", "S.N1"]);
        let layout = ColumnLayout::resolve(&columns, &ColumnAliases::default());
        assert_eq!(layout.desk, DeskSource::Canonical(1));
    }

    #[test]
    fn test_resolve_alias_desk() {
        let columns = names(&["Nr", "Desk number", "S.N1"]);
        let layout = ColumnLayout::resolve(&columns, &ColumnAliases::default());
        assert_eq!(
            layout.desk,
            DeskSource::Alias {
                index: 1,
                name: "Desk number".into()
            }
        );
    }

    #[test]
    fn test_resolve_missing_desk_is_synthesized() {
        let columns = names(&["Room", "S.N1"]);
        let layout = ColumnLayout::resolve(&columns, &ColumnAliases::default());
        assert_eq!(layout.desk, DeskSource::Synthesized);
        assert_eq!(layout.desk.index(), None);
    }

    #[test]
    fn test_resolve_place_requires_exact_name() {
        let layout = ColumnLayout::resolve(&names(&["Room name", "S.N1"]), &ColumnAliases::default());
        assert_eq!(layout.place, None);

        let layout = ColumnLayout::resolve(&names(&[" PLACE ", "S.N1"]), &ColumnAliases::default());
        assert_eq!(layout.place, Some(0));
    }

    #[test]
    fn test_resolve_serials_and_scans_in_order() {
        let columns = names(&["skan2", "S.N1", "Type", "skan", "S.N2"]);
        let layout = ColumnLayout::resolve(&columns, &ColumnAliases::default());
        assert_eq!(layout.serials, vec![(1, "S.N1".into()), (4, "S.N2".into())]);
        assert_eq!(layout.scans, vec![3, 0]);
        assert_eq!(layout.asset_type, Some(2));
    }

    #[test]
    fn test_custom_aliases() {
        let aliases = ColumnAliases {
            serial_prefix: "SN_".into(),
            type_columns: vec!["Kind".into()],
            ..Default::default()
        };
        let layout = ColumnLayout::resolve(&names(&["SN_1", "S.N1", "kind"]), &aliases);
        assert_eq!(layout.serials, vec![(0, "SN_1".into())]);
        assert_eq!(layout.asset_type, Some(2));
    }

    #[test]
    fn test_serial_prefix_is_exact() {
        let aliases = ColumnAliases::default();
        assert!(aliases.is_serial("S.N1"));
        assert!(!aliases.is_serial(" S.N1"));
        assert!(!aliases.is_serial("s.n1"));
    }
}
