// ==========================================
// 出货格口产线分配 - 归一化纯函数库
// ==========================================
// 职责: 文本比较归一化 / 格口归一化 / 格口解析
// 红线: 无状态、无副作用、全函数（永不失败）
// ==========================================

use crate::domain::chute::ParsedChute;
use serde_json::Value;

const NBSP: char = '\u{00A0}';

/// 最大格口长度（字符数）
pub const CHUTE_LEN: usize = 4;

/// 将任意 JSON 值转为字符串（缺失/null → 空串）
///
/// 数值: 整数值不带小数部分（45000.0 → "45000"）
/// 数组: 元素以 `,` 连接；对象: `[object Object]`
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format_f64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| value_to_string(Some(v)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

fn format_f64(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// 比较用文本归一化
///
/// NBSP → 空格，连续空白折叠为一个空格，去首尾空白，转小写
///
/// # 示例
/// ```
/// use chute_lines::engine::normalize::normalize_text;
/// let v = serde_json::json!("  00\u{00A0}-   PRINTED ");
/// assert_eq!(normalize_text(Some(&v)), "00 - printed");
/// ```
pub fn normalize_text(value: Option<&Value>) -> String {
    normalize_text_str(&value_to_string(value))
}

/// 同 [`normalize_text`]，输入为字符串
pub fn normalize_text_str(raw: &str) -> String {
    raw.replace(NBSP, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// 格口归一化（过滤阶段）
///
/// 顺序固定: 去首尾空白 → 去掉一个结尾 Y/y（连同其前面的空白）→ 截取前 4 个字符
/// 不改变大小写；返回空串表示无有效格口
///
/// # 示例
/// ```
/// use chute_lines::engine::normalize::normalize_chute;
/// let v = serde_json::json!(" A001Y ");
/// assert_eq!(normalize_chute(Some(&v)), "A001");
/// ```
pub fn normalize_chute(value: Option<&Value>) -> String {
    normalize_chute_str(&value_to_string(value))
}

/// 同 [`normalize_chute`]，输入为字符串
pub fn normalize_chute_str(raw: &str) -> String {
    let text = raw.replace(NBSP, " ");
    strip_trailing_y(text.trim())
        .chars()
        .take(CHUTE_LEN)
        .collect()
}

fn strip_trailing_y(text: &str) -> &str {
    let tail = text.trim_end();
    match tail.strip_suffix(&['Y', 'y'][..]) {
        Some(rest) => rest.trim_end(),
        None => text,
    }
}

/// 格口归一化（产线分配阶段）
///
/// NBSP → 空格，去首尾空白，截取前 4 个字符，转大写。对已归一化的格口幂等。
pub fn normalize_bucket_code(value: Option<&Value>) -> String {
    let text = value_to_string(value).replace(NBSP, " ");
    text.trim()
        .chars()
        .take(CHUTE_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// 解析格口为 (区位, 槽位号)
///
/// 形状: 1 个字母 + 可选空白 + 数字；去掉前导 0 后最多 3 位有效数字
/// 其他形状一律返回无效解析
pub fn parse_chute(code: &str) -> ParsedChute {
    let mut chars = code.chars();
    let zone = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => return ParsedChute::invalid(),
    };

    let digits = chars.as_str().trim_start();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return ParsedChute::invalid();
    }

    // 超过 3 位时，多出的前缀只能是 0
    let excess = digits.len().saturating_sub(3);
    if !digits[..excess].chars().all(|c| c == '0') {
        return ParsedChute::invalid();
    }

    match digits[excess..].parse::<u32>() {
        Ok(number) => ParsedChute::new(zone, number),
        Err(_) => ParsedChute::invalid(),
    }
}
