//! 差分結果の集計
//!
//! (部屋, デスク番号) ごとにシリアルをまとめ、推定によって両側に現れた
//! シリアルを取り除き、`Dom` の行を末尾に回す。

use crate::desk::{is_blank_desk, split_desk_id};
use crate::diff::SetDifference;
use crate::error::Side;
use crate::maps::DeskSerialMaps;
use crate::progress::Progress;
use crate::resolve::resolve_blank_desk;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 出力列名
pub const OUTPUT_COLUMNS: [&str; 4] = ["Room", "Desk_Number", "Only_in_File1", "Only_in_File2"];

/// 予備・保管資産の部屋名（常に末尾に並べる）
pub const DOM_ROOM: &str = "Dom";

const SERIAL_SEPARATOR: &str = ", ";

/// Excelの1セルに入る最大文字数
pub const MAX_CELL_CHARS: usize = 32_767;

/// 不一致行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchRow {
    #[serde(rename = "Room")]
    pub room: String,
    #[serde(rename = "Desk_Number")]
    pub desk_number: String,
    #[serde(rename = "Only_in_File1")]
    pub only_in_file1: Vec<String>,
    #[serde(rename = "Only_in_File2")]
    pub only_in_file2: Vec<String>,
}

impl MismatchRow {
    /// ファイル1のみのシリアル（カンマ区切り）
    pub fn file1_joined(&self) -> String {
        self.only_in_file1.join(SERIAL_SEPARATOR)
    }

    /// ファイル2のみのシリアル（カンマ区切り）
    pub fn file2_joined(&self) -> String {
        self.only_in_file2.join(SERIAL_SEPARATOR)
    }

    pub fn is_dom(&self) -> bool {
        self.room.trim().eq_ignore_ascii_case(DOM_ROOM)
    }

    /// セル上限を超える列名（`Only_in_File1` / `Only_in_File2`）
    pub fn oversized_columns(&self) -> Vec<&'static str> {
        [
            (OUTPUT_COLUMNS[2], self.file1_joined()),
            (OUTPUT_COLUMNS[3], self.file2_joined()),
        ]
        .into_iter()
        .filter(|(_, joined)| joined.chars().count() > MAX_CELL_CHARS)
        .map(|(column, _)| column)
        .collect()
    }

    /// 出力列順の値
    pub fn cells(&self) -> [String; 4] {
        [
            self.room.clone(),
            self.desk_number.clone(),
            self.file1_joined(),
            self.file2_joined(),
        ]
    }
}

#[derive(Default)]
struct Group {
    file1: BTreeSet<String>,
    file2: BTreeSet<String>,
}

/// 差分結果を不一致行に集計
///
/// `maps` はファイル1・ファイル2の順。
pub fn aggregate(
    diff: &SetDifference,
    maps: [&DeskSerialMaps; 2],
    progress: &mut Progress<'_>,
    (start, end): (u8, u8),
) -> Vec<MismatchRow> {
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();
    let total = diff.only_in_1.len() + diff.only_in_2.len();

    let entries = diff
        .only_in_1
        .iter()
        .map(|p| (Side::File1, p))
        .chain(diff.only_in_2.iter().map(|p| (Side::File2, p)));

    for (processed, (side, pair)) in entries.enumerate() {
        let (own, other) = match side {
            Side::File1 => (maps[0], maps[1]),
            Side::File2 => (maps[1], maps[0]),
        };

        let key = if is_blank_desk(&pair.desk) {
            let resolution = resolve_blank_desk(&pair.serial, own, other);
            tracing::debug!(serial = %pair.serial, ?side, ?resolution, "blank desk resolved");
            split_desk_id(resolution.as_desk_id())
        } else {
            split_desk_id(&pair.desk)
        };

        let serial = pair.serial.trim();
        let group = groups.entry(key).or_default();
        if !serial.is_empty() {
            match side {
                Side::File1 => group.file1.insert(serial.to_string()),
                Side::File2 => group.file2.insert(serial.to_string()),
            };
        }

        let processed = processed + 1;
        if processed % 100 == 0 {
            progress.report_fraction(
                start,
                end,
                processed,
                total,
                format!("Preparing output... ({}/{})", processed, total),
            );
        }
    }

    let mut rows = Vec::with_capacity(groups.len());
    for ((room, desk_number), group) in groups {
        let common: BTreeSet<String> = group.file1.intersection(&group.file2).cloned().collect();
        let only_in_file1: Vec<String> = group.file1.difference(&common).cloned().collect();
        let only_in_file2: Vec<String> = group.file2.difference(&common).cloned().collect();

        if only_in_file1.is_empty() && only_in_file2.is_empty() {
            continue;
        }
        rows.push(MismatchRow {
            room,
            desk_number,
            only_in_file1,
            only_in_file2,
        });
    }

    progress.report(end, format!("Prepared {} mismatch rows", rows.len()));
    order_dom_last(rows)
}

/// `Dom` の行を末尾へ（それ以外の順序は維持）
pub fn order_dom_last(rows: Vec<MismatchRow>) -> Vec<MismatchRow> {
    let (dom, mut rest): (Vec<_>, Vec<_>) = rows.into_iter().partition(|r| r.is_dom());
    rest.extend(dom);
    rest
}
