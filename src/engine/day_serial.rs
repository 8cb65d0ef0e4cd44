// ==========================================
// 出货格口产线分配 - 日序号与日期来源
// ==========================================
// 日序号: 以 1899-12-30 为 0 的整日计数（表格宿主的日期体系）
// 职责: 目标日解析 / 日序号换算 / 可注入的"今天"
// ==========================================

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use serde_json::Value;

/// 1899-12-30 距公元元年的天数（num_days_from_ce）
const SERIAL_EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// 日序号
pub type DaySerial = i64;

/// 日期 → 日序号
///
/// # 示例
/// ```
/// use chrono::NaiveDate;
/// use chute_lines::engine::day_serial::day_serial;
/// let d = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
/// assert_eq!(day_serial(d), 25569);
/// ```
pub fn day_serial(date: NaiveDate) -> DaySerial {
    i64::from(date.num_days_from_ce()) - SERIAL_EPOCH_DAYS_FROM_CE
}

/// 解析目标日 `yyyy-MM-dd`
///
/// 月/日越界时按日历顺延（2025-02-30 → 2025-03-02，2025-13-01 → 2026-01-01）
/// 任一分量不是整数时返回 None
pub fn parse_target_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<i64>().ok()?;
    let day = parts.next()?.trim().parse::<i64>().ok()?;

    let first_of_year = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let month_offset = month - 1;
    let first_of_month = if month_offset >= 0 {
        first_of_year.checked_add_months(Months::new(u32::try_from(month_offset).ok()?))?
    } else {
        first_of_year.checked_sub_months(Months::new(u32::try_from(-month_offset).ok()?))?
    };
    first_of_month.checked_add_signed(Duration::try_days(day - 1)?)
}

/// 字段值 → 日序号（向下取整到整日）
///
/// - 数值 / 数值文本（含 `0x` `0o` `0b` 前缀）按数值取
/// - 单元素数组按其元素取
/// - 缺失 / null / 空串 / 布尔 / 非数值 一律返回 None（永不匹配）
pub fn coerce_day_serial(value: Option<&Value>) -> Option<DaySerial> {
    let raw = coerce_number(value?)?;
    if !raw.is_finite() {
        return None;
    }
    Some(raw.floor() as DaySerial)
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        Value::Array(items) if items.len() == 1 => coerce_number(&items[0]),
        _ => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let radix_body = |prefixes: [&str; 2]| {
        prefixes
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(*prefix))
    };
    let (radix, body) = if let Some(body) = radix_body(["0x", "0X"]) {
        (16, body)
    } else if let Some(body) = radix_body(["0o", "0O"]) {
        (8, body)
    } else if let Some(body) = radix_body(["0b", "0B"]) {
        (2, body)
    } else {
        return trimmed.parse::<f64>().ok();
    };

    // 前缀后只能是该进制的数字（不接受符号）
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(body, radix).ok().map(|n| n as f64)
}

// ==========================================
// DateSource - "今天"的来源
// ==========================================
// 系统时钟依赖本地时区；测试使用固定日期
pub trait DateSource: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 本地时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateSource;

impl DateSource for SystemDateSource {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日期
#[derive(Debug, Clone, Copy)]
pub struct FixedDateSource(pub NaiveDate);

impl DateSource for FixedDateSource {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// 计算目标日序号
///
/// - 未提供或空白: 使用 `dates.today()`
/// - 提供但格式错误: 返回 None，所有记录都不会命中发货日条件
pub fn resolve_target_serial(
    target_date: Option<&str>,
    dates: &dyn DateSource,
) -> Option<DaySerial> {
    match target_date.map(str::trim).filter(|s| !s.is_empty()) {
        None => Some(day_serial(dates.today())),
        Some(text) => match parse_target_date(text) {
            Some(date) => Some(day_serial(date)),
            None => {
                tracing::warn!(target_date = text, "目标发货日格式错误，期望 yyyy-MM-dd");
                None
            }
        },
    }
}
