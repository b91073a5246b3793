//! Excel生成（共通ライブラリ）
//!
//! 不一致行を1シートの表として書き出す。`Dom` の行は黄色で塗る。

use crate::aggregate::{MismatchRow, MAX_CELL_CHARS, OUTPUT_COLUMNS};
use rust_xlsxwriter::*;
use std::borrow::Cow;

/// シート名
pub const SHEET_NAME: &str = "Desk Mismatches";

/// `Dom` 行の背景色
const DOM_FILL: u32 = 0xFFFF00;

/// 列幅の余白（文字数）
const WIDTH_PADDING: usize = 2;

/// Excelの最大列幅
const MAX_COLUMN_WIDTH: usize = 255;

/// 切り詰めたセルの末尾
const TRUNCATED_MARKER: &str = ", ... (truncated)";

/// セル上限に収まるよう切り詰める（シリアルの途中では切らない）
fn fit_cell(value: &str) -> Cow<'_, str> {
    if value.chars().count() <= MAX_CELL_CHARS {
        return Cow::Borrowed(value);
    }
    let keep = MAX_CELL_CHARS - TRUNCATED_MARKER.chars().count();
    let end = value.char_indices().nth(keep).map(|(i, _)| i).unwrap_or(value.len());
    let head = &value[..end];
    let head = match head.rfind(", ") {
        Some(pos) => &head[..pos],
        None => head,
    };
    Cow::Owned(format!("{}{}", head, TRUNCATED_MARKER))
}

/// 不一致行からExcelをバッファに生成
///
/// 行が空でもヘッダ行だけのシートを生成する。
pub fn generate_report_buffer(rows: &[MismatchRow]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    let dom_format = cell_format
        .clone()
        .set_background_color(Color::RGB(DOM_FILL))
        .set_pattern(FormatPattern::Solid);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    let mut widths: Vec<usize> = OUTPUT_COLUMNS.iter().map(|c| c.chars().count()).collect();

    for (col, title) in OUTPUT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| format!("ヘッダ書き込みエラー: {}", e))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = idx as u32 + 1;
        let format = if row.is_dom() { &dom_format } else { &cell_format };

        for (col, value) in row.cells().iter().enumerate() {
            let value = fit_cell(value);
            widths[col] = widths[col].max(value.chars().count());
            worksheet
                .write_string_with_format(excel_row, col as u16, &*value, format)
                .map_err(|e| format!("セル書き込みエラー: {}", e))?;
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (width + WIDTH_PADDING).min(MAX_COLUMN_WIDTH) as f64)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(room: &str, desk: &str, f1: &[&str]) -> MismatchRow {
        MismatchRow {
            room: room.into(),
            desk_number: desk.into(),
            only_in_file1: f1.iter().map(|s| s.to_string()).collect(),
            only_in_file2: vec![],
        }
    }

    #[test]
    fn test_generate_report_buffer_is_xlsx() {
        let rows = vec![row("B", "12", &["X1", "X2"]), row("Dom", "", &["S9"])];
        let buffer = generate_report_buffer(&rows).unwrap();
        // xlsx は zip コンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_report_buffer_without_rows() {
        let buffer = generate_report_buffer(&[]).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_fit_cell_truncates_at_serial_boundary() {
        let serials: Vec<String> = (0..4000).map(|i| format!("SN{:08}", i)).collect();
        let joined = serials.join(", ");
        assert!(joined.chars().count() > MAX_CELL_CHARS);

        let fitted = fit_cell(&joined);
        assert!(fitted.chars().count() <= MAX_CELL_CHARS);
        assert!(fitted.ends_with(TRUNCATED_MARKER));
        let kept = fitted.trim_end_matches(TRUNCATED_MARKER);
        assert!(kept.split(", ").all(|s| s.len() == 10));
        assert!(matches!(fit_cell("X1, X2"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_generate_report_buffer_with_oversized_cell() {
        let serials: Vec<String> = (0..4000).map(|i| format!("SN{:08}", i)).collect();
        let refs: Vec<&str> = serials.iter().map(|s| s.as_str()).collect();
        let rows = vec![row("Unassigned", "", &refs)];
        let buffer = generate_report_buffer(&rows).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }
}
