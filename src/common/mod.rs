// ==========================================
// 出货格口产线分配 - 公共工具
// ==========================================

pub mod json_utils;

pub use json_utils::{parse_json_array, parse_records, to_json_string};
