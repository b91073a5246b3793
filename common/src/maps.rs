//! デスク⇔シリアル対応表
//!
//! - `desk_serials`: デスク → シリアル集合（`Blanks` も含む）
//! - `serial_desks`: シリアル → デスク集合（空・`nan`・`Blanks` を除外）
//! - `unique_desk`: `serial_desks` のうちデスクが1つに定まるもの

use crate::desk::is_blank_desk;
use crate::reshape::DeskSerial;
use std::collections::{BTreeMap, BTreeSet};

/// 1ファイル分の対応表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskSerialMaps {
    pub desk_serials: BTreeMap<String, BTreeSet<String>>,
    pub serial_desks: BTreeMap<String, BTreeSet<String>>,
    pub unique_desk: BTreeMap<String, String>,
}

impl DeskSerialMaps {
    pub fn build(pairs: &[DeskSerial]) -> Self {
        let mut desk_serials: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut serial_desks: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for pair in pairs {
            let desk = pair.desk.trim();
            let serial = pair.serial.trim();

            desk_serials
                .entry(desk.to_string())
                .or_default()
                .insert(serial.to_string());

            if !is_blank_desk(desk) {
                serial_desks
                    .entry(serial.to_string())
                    .or_default()
                    .insert(desk.to_string());
            }
        }

        let unique_desk = serial_desks
            .iter()
            .filter(|(_, desks)| desks.len() == 1)
            .filter_map(|(serial, desks)| desks.iter().next().map(|d| (serial.clone(), d.clone())))
            .collect();

        Self {
            desk_serials,
            serial_desks,
            unique_desk,
        }
    }

    /// シリアルが記録されたデスク（割り当て可能なもののみ）
    pub fn desks_of(&self, serial: &str) -> Option<&BTreeSet<String>> {
        self.serial_desks.get(serial)
    }

    /// シリアルが一意に記録されたデスク
    pub fn unique_desk_of(&self, serial: &str) -> Option<&str> {
        self.unique_desk.get(serial).map(|d| d.as_str())
    }

    /// デスクのシリアル集合
    pub fn serials_at(&self, desk: &str) -> Option<&BTreeSet<String>> {
        self.desk_serials.get(desk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<DeskSerial> {
        vec![
            DeskSerial::new("A12", "X1"),
            DeskSerial::new("A12", "X2"),
            DeskSerial::new("B3", "X2"),
            DeskSerial::new("Blanks", "X3"),
            DeskSerial::new("C4", "X3"),
            DeskSerial::new("Blanks", "X4"),
        ]
    }

    #[test]
    fn test_desk_serials_includes_blanks() {
        let maps = DeskSerialMaps::build(&pairs());
        assert_eq!(maps.serials_at("A12").map(|s| s.len()), Some(2));
        assert!(maps.serials_at("Blanks").is_some_and(|s| s.contains("X4")));
    }

    #[test]
    fn test_serial_desks_excludes_blanks() {
        let maps = DeskSerialMaps::build(&pairs());
        assert_eq!(maps.desks_of("X3").map(|d| d.len()), Some(1));
        assert!(maps.desks_of("X4").is_none());
    }

    #[test]
    fn test_unique_desk_skips_ambiguous_serials() {
        let maps = DeskSerialMaps::build(&pairs());
        assert_eq!(maps.unique_desk_of("X1"), Some("A12"));
        assert_eq!(maps.unique_desk_of("X2"), None);
        assert_eq!(maps.unique_desk_of("X3"), Some("C4"));
        assert_eq!(maps.unique_desk_of("X4"), None);
    }

    #[test]
    fn test_duplicate_pair_counts_once() {
        let maps = DeskSerialMaps::build(&[DeskSerial::new("A1", "S"), DeskSerial::new("A1", "S")]);
        assert_eq!(maps.unique_desk_of("S"), Some("A1"));
    }
}
