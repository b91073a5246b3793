//! 横持ち→縦持ち変換
//!
//! 「1デスク1行・シリアル列N個」を「(デスク, シリアル) 1組1行」に展開する。

use crate::desk::BLANKS;
use crate::record::Record;
use crate::serial::normalize_serial;
use serde::Serialize;

/// (デスク, シリアル) の組
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeskSerial {
    pub desk: String,
    pub serial: String,
}

impl DeskSerial {
    pub fn new(desk: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            desk: desk.into(),
            serial: serial.into(),
        }
    }
}

/// レコードを (デスク, シリアル) の組に展開
///
/// シリアルは正規化し、空になったものは除外する。
/// デスクIDは正規化済みであること（欠損は `Blanks` として扱う）。
pub fn reshape(records: &[Record]) -> Vec<DeskSerial> {
    records
        .iter()
        .flat_map(|record| {
            let desk = record.desk.as_deref().unwrap_or(BLANKS);
            record
                .serials
                .iter()
                .filter_map(|field| field.value.as_deref().and_then(normalize_serial))
                .map(move |serial| DeskSerial::new(desk, serial))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SerialField;

    fn field(value: Option<&str>) -> SerialField {
        SerialField {
            column: "S.N".into(),
            value: value.map(|v| v.to_string()),
        }
    }

    #[test]
    fn test_reshape_expands_multi_monitor_desk() {
        let records = vec![Record {
            desk: Some("A12".into()),
            serials: vec![field(Some("x-1")), field(None), field(Some(" x2 "))],
            ..Default::default()
        }];
        assert_eq!(
            reshape(&records),
            vec![DeskSerial::new("A12", "X1"), DeskSerial::new("A12", "X2")]
        );
    }

    #[test]
    fn test_reshape_drops_empty_serials() {
        let records = vec![Record {
            desk: Some("A12".into()),
            serials: vec![field(Some("  ")), field(Some("-"))],
            ..Default::default()
        }];
        assert!(reshape(&records).is_empty());
    }

    #[test]
    fn test_reshape_missing_desk_is_blanks() {
        let records = vec![Record {
            desk: None,
            serials: vec![field(Some("S1"))],
            ..Default::default()
        }];
        assert_eq!(reshape(&records), vec![DeskSerial::new("Blanks", "S1")]);
    }
}
