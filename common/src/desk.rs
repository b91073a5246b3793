//! デスクIDの正規化と分割
//!
//! 表記ゆれ（略記、末尾ゼロの欠落、句読点）を吸収して安定したIDにする。
//!
//! ## 正規化
//! 1. 英数字以外を除去
//! 2. 先頭のみ大文字、残りを小文字
//! 3. 「英字* + 数字3桁」に完全一致する場合は末尾に `0` を付加（`101` → `1010`）
//! 4. 空なら `Blanks`

use regex::Regex;

/// デスクIDが特定できない場合の値
pub const BLANKS: &str = "Blanks";

/// 推定できなかったシリアルの割り当て先
pub const UNASSIGNED: &str = "Unassigned";

lazy_static::lazy_static! {
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^A-Za-z0-9]+").unwrap();
    static ref SHORT_DESK_RE: Regex = Regex::new(r"^[A-Za-z]*\d{3}$").unwrap();
    static ref DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
}

/// 先頭のみ大文字、残りを小文字にする
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// 英字の連なりごとに先頭を大文字にする
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            result.push(c);
            previous_alpha = false;
        }
    }
    result
}

/// デスクIDを正規化
pub fn normalize_desk_id(raw: &str) -> String {
    let stripped = NON_ALNUM_RE.replace_all(raw, "");
    let mut desk = capitalize(&stripped);

    if SHORT_DESK_RE.is_match(&desk) {
        desk.push('0');
    }

    if desk.is_empty() {
        BLANKS.to_string()
    } else {
        desk
    }
}

/// 欠損を含むデスクIDを正規化（欠損は `Blanks`）
pub fn normalize_optional_desk_id(raw: Option<&str>) -> String {
    normalize_desk_id(raw.unwrap_or_default())
}

/// 割り当て先として使えないデスクIDか（空・`nan`・`Blanks`）
pub fn is_blank_desk(desk: &str) -> bool {
    let desk = desk.trim();
    desk.is_empty() || desk == "nan" || desk.eq_ignore_ascii_case(BLANKS)
}

/// デスクIDを（部屋, デスク番号）に分割
///
/// 最初の数字の連なりがデスク番号、数字を除いた残りが部屋名になる。
pub fn split_desk_id(value: &str) -> (String, String) {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(BLANKS) {
        return (BLANKS.to_string(), String::new());
    }

    let desk_number = DIGITS_RE
        .find(value)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let room = title_case(DIGITS_RE.replace_all(value, "").trim());

    (room, desk_number)
}
