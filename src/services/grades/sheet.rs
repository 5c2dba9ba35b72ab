//! 表格读写（XLSX / CSV）

use calamine::{Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

use crate::errors::{PortalError, Result};

/// 表格文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// 按扩展名识别（含点号，如 `.xlsx`）
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            ".xlsx" => Some(SheetFormat::Xlsx),
            ".csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }

    /// 查询参数中的格式，缺省为 xlsx
    pub fn from_query(value: Option<&str>) -> std::result::Result<Self, String> {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") => Ok(SheetFormat::Xlsx),
            Some("csv") => Ok(SheetFormat::Csv),
            Some(other) => Err(format!("Unsupported format '{other}'. Supported: xlsx, csv")),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            SheetFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// 导出单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn as_text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => value.to_string(),
        }
    }
}

/// 读取第一个工作表的全部行。
///
/// 返回的下标与表格行号一一对应（下标 0 为第 1 行），
/// 工作表顶部的空行会补齐为空行。
pub fn read_rows(format: SheetFormat, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    match format {
        SheetFormat::Xlsx => read_xlsx(bytes),
        SheetFormat::Csv => read_csv(bytes),
    }
}

fn read_xlsx(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PortalError::spreadsheet("Workbook has no worksheet"))??;

    let leading = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = vec![Vec::new(); leading];
    rows.extend(
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect()),
    );
    Ok(rows)
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// 生成单工作表文件，首行为表头
pub fn write_rows(
    format: SheetFormat,
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> Result<Vec<u8>> {
    match format {
        SheetFormat::Xlsx => write_xlsx(sheet_name, headers, rows),
        SheetFormat::Csv => write_csv(headers, rows),
    }
}

fn write_xlsx(sheet_name: &str, headers: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name(sheet_name)?;
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        sheet.set_column_width(col as u16, 18)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => sheet.write_string(row_num, col as u16, text)?,
                Cell::Number(value) => sheet.write_number(row_num, col as u16, *value)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_csv(headers: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>> {
    // UTF-8 BOM，Excel 打开阿拉伯语表头时不会乱码
    let mut writer = csv::Writer::from_writer(b"\xEF\xBB\xBF".to_vec());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.iter().map(Cell::as_text))?;
    }
    writer
        .into_inner()
        .map_err(|e| PortalError::spreadsheet(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{ColumnMap, GradeColumn};

    #[test]
    fn test_format_from_query() {
        assert_eq!(SheetFormat::from_query(None).unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::from_query(Some("CSV")).unwrap(), SheetFormat::Csv);
        assert!(SheetFormat::from_query(Some("pdf")).is_err());
        assert_eq!(SheetFormat::from_extension(".XLSX"), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_extension(".xls"), None);
    }

    #[test]
    fn test_read_csv_with_arabic_headers() {
        let headers: Vec<&str> = GradeColumn::ALL.iter().map(|c| c.arabic_header()).collect();
        let data = format!(
            "\u{feff}{}\n441001,CS101,25,28,35,2024-2025,الأول\n,,,,,,\n",
            headers.join(",")
        );

        let rows = read_rows(SheetFormat::Csv, data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);

        let map = ColumnMap::resolve(&rows[0]).unwrap();
        let raw = map.extract(2, &rows[1]);
        assert_eq!(raw.student_number, "441001");
        assert_eq!(raw.semester, "الأول");
        assert!(map.extract(3, &rows[2]).is_blank());
    }

    #[test]
    fn test_written_workbook_is_readable() {
        let headers: Vec<&str> = GradeColumn::ALL.iter().map(|c| c.arabic_header()).collect();
        let row = vec![
            Cell::Text("441001".to_string()),
            Cell::Text("CS101".to_string()),
            Cell::Number(25.0),
            Cell::Number(28.5),
            Cell::Number(35.0),
            Cell::Text("2024-2025".to_string()),
            Cell::Text("first".to_string()),
        ];

        let bytes = write_rows(SheetFormat::Xlsx, "grades", &headers, &[row]).unwrap();
        let rows = read_rows(SheetFormat::Xlsx, &bytes).unwrap();

        let map = ColumnMap::resolve(&rows[0]).unwrap();
        let raw = map.extract(2, &rows[1]);
        assert_eq!(raw.course_code, "CS101");
        assert_eq!(raw.midterm, "28.5");
        assert_eq!(raw.coursework, "25");
    }

    #[test]
    fn test_csv_output_starts_with_bom() {
        let bytes = write_rows(
            SheetFormat::Csv,
            "grades",
            &["a", "b"],
            &[vec![Cell::Number(1.5), Cell::Text("x".to_string())]],
        )
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with('\u{feff}'));
        assert!(text.ends_with("1.5,x\n"));
    }
}
