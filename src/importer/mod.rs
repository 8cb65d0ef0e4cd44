// ==========================================
// 出货格口产线分配 - 导入层
// ==========================================
// 职责: 将 JSON / CSV 输入解析为记录
// ==========================================

pub mod error;
pub mod file_parser;

pub use error::{ImportError, ImportResult};
pub use file_parser::{parse_with_format, CsvParser, FileParser, InputFormat, JsonParser};
