//! シリアル番号の修復と正規化
//!
//! `0` で始まるシリアルは読み取り不良とみなし、スキャン補助列から復元する。
//!
//! ## 復元ルール（スキャン列を順に検索）
//! 1. `V`/`v` を含む → その文字から末尾まで
//! 2. `6` で始まる数字列を含む → `V` + その数字列
//!
//! どちらにも該当しなければ元の値のまま。

use crate::record::{Record, SerialField};
use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    static ref V_TAIL_RE: Regex = Regex::new(r"[Vv].*").unwrap();
    static ref SIX_RUN_RE: Regex = Regex::new(r"6\d+").unwrap();
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^A-Za-z0-9]+").unwrap();
}

/// 置換の記録（診断用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialReplacement {
    pub column: String,
    pub original: String,
    pub replacement: String,
}

/// 置換結果
#[derive(Debug, Clone, Default)]
pub struct RepairOutcome {
    pub records: Vec<Record>,
    pub replaced: usize,
    pub samples: Vec<SerialReplacement>,
}

/// スキャン補助列から代替シリアルを導出
pub fn derive_serial_from_scans<'a>(scans: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    for scan in scans.into_iter().flatten() {
        let scan = scan.trim();
        if scan.is_empty() {
            continue;
        }
        if let Some(m) = V_TAIL_RE.find(scan) {
            return Some(m.as_str().to_string());
        }
        if let Some(m) = SIX_RUN_RE.find(scan) {
            return Some(format!("V{}", m.as_str()));
        }
    }
    None
}

/// `0` で始まるシリアルをスキャン補助列から置き換えたレコードを生成
///
/// スキャン列がないデータセットでは何もしない。
/// `sample_limit` 件までの置換例を記録する。
pub fn repair_serials(records: &[Record], has_scans: bool, sample_limit: usize) -> RepairOutcome {
    if !has_scans {
        return RepairOutcome {
            records: records.to_vec(),
            ..Default::default()
        };
    }

    let mut outcome = RepairOutcome::default();

    for record in records {
        let mut serials = Vec::with_capacity(record.serials.len());
        for field in &record.serials {
            let derived = match field.value.as_deref() {
                Some(value) if value.starts_with('0') => {
                    derive_serial_from_scans(record.scans.iter().map(|s| s.as_deref()))
                        .filter(|s| !s.is_empty())
                        .map(|replacement| (value, replacement))
                }
                _ => None,
            };

            match derived {
                Some((original, replacement)) => {
                    outcome.replaced += 1;
                    if outcome.samples.len() < sample_limit {
                        outcome.samples.push(SerialReplacement {
                            column: field.column.clone(),
                            original: original.to_string(),
                            replacement: replacement.clone(),
                        });
                    }
                    serials.push(SerialField {
                        column: field.column.clone(),
                        value: Some(replacement),
                    });
                }
                None => serials.push(field.clone()),
            }
        }
        outcome.records.push(Record {
            serials,
            ..record.clone()
        });
    }

    outcome
}

/// シリアル番号を正規化（空白除去・英数字のみ・大文字）
///
/// 空になった場合は None（照合対象外）。
pub fn normalize_serial(raw: &str) -> Option<String> {
    let serial = NON_ALNUM_RE.replace_all(raw.trim(), "").to_uppercase();
    if serial.is_empty() {
        None
    } else {
        Some(serial)
    }
}
