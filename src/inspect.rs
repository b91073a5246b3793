//! 列構成の確認表示

use desk_compare_common::columns::DeskSource;
use desk_compare_common::{select_column_names, ColumnAliases, ColumnLayout};

fn name_at(columns: &[String], index: Option<usize>) -> String {
    index
        .and_then(|i| columns.get(i))
        .cloned()
        .unwrap_or_else(|| "-".to_string())
}

/// ヘッダから列の役割を表示用の行に変換
pub fn describe_layout(headers: &[String], aliases: &ColumnAliases) -> Vec<String> {
    let selected = select_column_names(headers, aliases);
    let layout = ColumnLayout::resolve(&selected, aliases);

    let desk = match &layout.desk {
        DeskSource::Canonical(i) => selected[*i].clone(),
        DeskSource::Alias { name, .. } => format!("{} (as {})", name, aliases.desk_column),
        DeskSource::Synthesized => format!("- ({} will be empty)", aliases.desk_column),
    };
    let serials: Vec<&str> = layout.serials.iter().map(|(_, name)| name.as_str()).collect();
    let scans: Vec<String> = layout.scans.iter().map(|i| selected[*i].clone()).collect();

    vec![
        format!("列: {}", headers.join(", ")),
        format!("読み込み対象: {}", selected.join(", ")),
        format!("デスク: {}", desk),
        format!("場所: {}", name_at(&selected, layout.place)),
        format!("種別: {}", name_at(&selected, layout.asset_type)),
        format!(
            "シリアル: {}",
            if serials.is_empty() { "-".to_string() } else { serials.join(", ") }
        ),
        format!(
            "スキャン: {}",
            if scans.is_empty() { "-".to_string() } else { scans.join(", ") }
        ),
    ]
}
