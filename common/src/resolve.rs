//! 空デスクに紐づくシリアルの割り当て先推定
//!
//! 1. 反対側ファイルで一意に記録されたデスク
//! 2. 両ファイルで記録された全デスクの部屋が1つに揃う場合はその部屋（デスク番号なし）
//! 3. それ以外は `Unassigned`

use crate::desk::{is_blank_desk, split_desk_id, UNASSIGNED};
use crate::maps::DeskSerialMaps;
use std::collections::BTreeSet;

/// 推定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 反対側ファイルのデスク
    Desk(String),
    /// 部屋のみ推定
    Room(String),
    Unassigned,
}

impl Resolution {
    /// 分割前のデスクIDとしての値
    pub fn as_desk_id(&self) -> &str {
        match self {
            Resolution::Desk(desk) => desk,
            Resolution::Room(room) => room,
            Resolution::Unassigned => UNASSIGNED,
        }
    }
}

/// 両ファイルの記録から共通の部屋を推定
pub fn infer_room(serial: &str, maps: [&DeskSerialMaps; 2]) -> Option<String> {
    let desks: BTreeSet<&str> = maps
        .iter()
        .filter_map(|m| m.desks_of(serial))
        .flatten()
        .map(|d| d.as_str())
        .filter(|d| !is_blank_desk(d))
        .collect();

    let rooms: BTreeSet<String> = desks
        .into_iter()
        .map(|d| split_desk_id(d).0)
        .filter(|room| !room.is_empty())
        .collect();

    if rooms.len() == 1 {
        rooms.into_iter().next()
    } else {
        None
    }
}

/// 空デスクのシリアルの割り当て先を決定
///
/// `own` はシリアルが見つかった側、`other` は反対側の対応表。
pub fn resolve_blank_desk(serial: &str, own: &DeskSerialMaps, other: &DeskSerialMaps) -> Resolution {
    if let Some(desk) = other.unique_desk_of(serial) {
        return Resolution::Desk(desk.to_string());
    }
    match infer_room(serial, [own, other]) {
        Some(room) => Resolution::Room(room),
        None => Resolution::Unassigned,
    }
}
