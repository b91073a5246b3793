//! Excel生成（CLI版）
//!
//! 共通ライブラリの rust_xlsxwriter 実装でバッファを作り、ファイルに書き出す。

use super::write_file;
use crate::error::{DeskCompareError, Result};
use desk_compare_common::export::excel_core::generate_report_buffer;
use desk_compare_common::MismatchRow;
use std::path::Path;

pub fn write_excel(rows: &[MismatchRow], output_path: &Path) -> Result<()> {
    let buffer = generate_report_buffer(rows).map_err(DeskCompareError::ExcelGeneration)?;
    write_file(output_path, &buffer)
}
