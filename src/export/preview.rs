//! 不一致行のテキストプレビュー

use desk_compare_common::MismatchRow;

/// 1行を表示用ブロックに変換
fn render_row(row: &MismatchRow) -> String {
    format!(
        "Room: {}, Desk: {}\nOnly in File 1: {}\nOnly in File 2: {}\n\n",
        row.room,
        row.desk_number,
        row.file1_joined(),
        row.file2_joined()
    )
}

pub fn render_preview(rows: &[MismatchRow]) -> String {
    if rows.is_empty() {
        return "No mismatches found.\n".to_string();
    }
    rows.iter().map(render_row).collect()
}
