// ==========================================
// 出货格口产线分配 - JSON 工具模块
// ==========================================
// 职责: 宽松的 JSON 数组解析 + 兜底序列化
// 策略: 解析失败视为空数组，不向调用方抛错
// ==========================================

use crate::domain::record::Record;
use serde::Serialize;
use serde_json::Value;

/// 宽松解析 JSON 数组
///
/// # 返回
/// - 合法数组: 其元素
/// - 解析失败 / null / 非数组: 空向量（记录 warn 日志）
///
/// # 示例
/// ```
/// use chute_lines::common::json_utils::parse_json_array;
///
/// assert_eq!(parse_json_array(r#"[1, 2]"#).len(), 2);
/// assert!(parse_json_array("not json").is_empty());
/// assert!(parse_json_array("null").is_empty());
/// ```
pub fn parse_json_array(json: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) => Vec::new(),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "输入 JSON 不是数组，按空数组处理");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "输入 JSON 解析失败，按空数组处理");
            Vec::new()
        }
    }
}

/// 宽松解析记录数组（非对象元素被跳过）
pub fn parse_records(json: &str) -> Vec<Record> {
    parse_json_array(json)
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match value {
            Value::Object(map) => Some(map),
            other => {
                tracing::debug!(row = index, kind = json_kind(&other), "跳过非对象记录");
                None
            }
        })
        .collect()
}

/// 序列化为 JSON 字符串，失败时返回 `[]`
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "输出 JSON 序列化失败");
        "[]".to_string()
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
