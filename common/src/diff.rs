//! デスクごとの差分計算

use crate::maps::DeskSerialMaps;
use crate::progress::Progress;
use crate::reshape::DeskSerial;
use std::collections::BTreeSet;

/// 差分結果（シリアル単位）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDifference {
    /// ファイル1のみに存在
    pub only_in_1: Vec<DeskSerial>,
    /// ファイル2のみに存在
    pub only_in_2: Vec<DeskSerial>,
    /// 比較したデスク数
    pub desks_compared: usize,
}

/// 両ファイルのデスク→シリアル対応表から差分を計算
///
/// デスクは文字列順に処理し、`batch_size` デスクごとに `start..=end` の範囲で進捗を通知する。
pub fn difference(
    file1: &DeskSerialMaps,
    file2: &DeskSerialMaps,
    batch_size: usize,
    progress: &mut Progress<'_>,
    (start, end): (u8, u8),
) -> SetDifference {
    let desks: Vec<&String> = file1
        .desk_serials
        .keys()
        .chain(file2.desk_serials.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let empty = BTreeSet::new();
    let mut result = SetDifference {
        desks_compared: desks.len(),
        ..Default::default()
    };

    let batch_size = batch_size.max(1);
    let total_batches = desks.len().div_ceil(batch_size);

    for (batch_idx, batch) in desks.chunks(batch_size).enumerate() {
        for desk in batch {
            let s1 = file1.serials_at(desk).unwrap_or(&empty);
            let s2 = file2.serials_at(desk).unwrap_or(&empty);

            result
                .only_in_1
                .extend(s1.difference(s2).map(|serial| DeskSerial::new(desk.as_str(), serial.as_str())));
            result
                .only_in_2
                .extend(s2.difference(s1).map(|serial| DeskSerial::new(desk.as_str(), serial.as_str())));
        }

        progress.report_fraction(
            start,
            end,
            batch_idx + 1,
            total_batches,
            format!("Comparing desks... (batch {}/{})", batch_idx + 1, total_batches),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps(pairs: &[(&str, &str)]) -> DeskSerialMaps {
        let pairs: Vec<DeskSerial> = pairs.iter().map(|(d, s)| DeskSerial::new(*d, *s)).collect();
        DeskSerialMaps::build(&pairs)
    }

    #[test]
    fn test_difference_per_desk() {
        let m1 = maps(&[("1010", "X1"), ("1010", "X2")]);
        let m2 = maps(&[("1010", "X2"), ("1010", "X3")]);
        let diff = difference(&m1, &m2, 50, &mut Progress::silent(), (76, 85));
        assert_eq!(diff.only_in_1, vec![DeskSerial::new("1010", "X1")]);
        assert_eq!(diff.only_in_2, vec![DeskSerial::new("1010", "X3")]);
        assert_eq!(diff.desks_compared, 1);
    }

    #[test]
    fn test_difference_desk_only_on_one_side() {
        let m1 = maps(&[("A1", "S1"), ("B2", "S2")]);
        let m2 = maps(&[("B2", "S2"), ("C3", "S3")]);
        let diff = difference(&m1, &m2, 1, &mut Progress::silent(), (76, 85));
        assert_eq!(diff.only_in_1, vec![DeskSerial::new("A1", "S1")]);
        assert_eq!(diff.only_in_2, vec![DeskSerial::new("C3", "S3")]);
        assert_eq!(diff.desks_compared, 3);
    }

    #[test]
    fn test_difference_is_in_desk_order() {
        let m1 = maps(&[("B", "S2"), ("A", "S1"), ("C", "S3")]);
        let m2 = maps(&[]);
        let diff = difference(&m1, &m2, 2, &mut Progress::silent(), (76, 85));
        let desks: Vec<&str> = diff.only_in_1.iter().map(|p| p.desk.as_str()).collect();
        assert_eq!(desks, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_difference_reports_batches() {
        let m1 = maps(&[("A", "1"), ("B", "2"), ("C", "3")]);
        let m2 = maps(&[]);
        let mut seen = Vec::new();
        {
            let mut callback = |p: u8, _: &str| seen.push(p);
            let mut progress = Progress::new(&mut callback);
            difference(&m1, &m2, 2, &mut progress, (76, 85));
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen.last(), Some(&85));
    }
}
