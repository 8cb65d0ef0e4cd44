// ==========================================
// 出货格口产线分配 - 文件解析器实现
// ==========================================
// 支持: JSON 记录数组 (.json) / 表格导出 CSV (.csv)
// ==========================================

use crate::common::json_utils::parse_records;
use crate::domain::record::{Record, REQ_SHIP_DATE_FIELD};
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::fs;
use std::path::Path;

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// 按扩展名推断
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// 文件解析器接口
pub trait FileParser {
    /// 从文本解析记录
    fn parse_str(&self, text: &str) -> ImportResult<Vec<Record>>;

    /// 从文件解析记录
    fn parse_to_records(&self, file_path: &Path) -> ImportResult<Vec<Record>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let text = fs::read_to_string(file_path)?;
        self.parse_str(&text)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 内容解析失败按空数组处理
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_str(&self, text: &str) -> ImportResult<Vec<Record>> {
        Ok(parse_records(text))
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    /// 需要转成数值的列（其余列保持字符串）
    numeric_columns: Vec<String>,
}

impl CsvParser {
    pub fn new(numeric_columns: Vec<String>) -> Self {
        Self { numeric_columns }
    }

    fn cell_value(&self, header: &str, raw: &str) -> Value {
        let trimmed = raw.trim();
        if self.numeric_columns.iter().any(|c| c == header) {
            if let Some(number) = parse_number(trimmed) {
                return Value::Number(number);
            }
        }
        Value::String(trimmed.to_string())
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(vec![REQ_SHIP_DATE_FIELD.to_string()])
    }
}

impl FileParser for CsvParser {
    fn parse_str(&self, text: &str) -> ImportResult<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;

            // 跳过完全空白的行
            if row.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            let mut record = Record::new();
            for (col_idx, value) in row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    record.insert(header.clone(), self.cell_value(header, value));
                }
            }
            records.push(record);
        }

        tracing::debug!(rows = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

/// 数值单元格: 整数值输出为整数，其余为浮点
fn parse_number(raw: &str) -> Option<Number> {
    let f = raw.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(Number::from(f as i64))
    } else {
        Number::from_f64(f)
    }
}

/// 按格式解析文本
pub fn parse_with_format(format: InputFormat, text: &str) -> ImportResult<Vec<Record>> {
    match format {
        InputFormat::Json => JsonParser.parse_str(text),
        InputFormat::Csv => CsvParser::default().parse_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_numeric_column_becomes_number() {
        let text = concat!(
            "CHUTE,Req Ship Date,Carton Status\n",
            "A001Y, 45658.5 ,00 - Printed\n",
            ",,\n",
            "B012,45658,x\n",
        );
        let records = CsvParser::default().parse_str(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["CHUTE"], json!("A001Y"));
        assert_eq!(records[0]["Req Ship Date"], json!(45658.5));
        assert_eq!(records[1]["Req Ship Date"], json!(45658));
    }

    #[test]
    fn test_csv_non_numeric_cell_stays_string() {
        let text = "CHUTE,Req Ship Date\nA001,tbd\n";
        let records = CsvParser::default().parse_str(text).unwrap();
        assert_eq!(records[0]["Req Ship Date"], json!("tbd"));
    }

    #[test]
    fn test_json_parser_is_lenient() {
        assert!(JsonParser.parse_str("not json").unwrap().is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("rows.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("rows.xlsx")),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }
}
