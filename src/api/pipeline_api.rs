// ==========================================
// 出货格口产线分配 - 流水线接口
// ==========================================
// 职责: JSON 入 / JSON 出 的两个阶段接口
// 阶段一: 记录表 → `[{ CHUTE }]`
// 阶段二: `[{ CHUTE }]` → `[{ "Line 1": .., ... }]`
// 两阶段之间只通过 JSON 文本衔接
// ==========================================

use crate::common::json_utils::{parse_json_array, parse_records, to_json_string};
use crate::domain::record::Record;
use crate::engine::day_serial::{resolve_target_serial, DateSource};
use crate::engine::line_bucketer::{BucketReport, LineBucketer, LineMatrix};
use crate::engine::line_table::LineRuleTable;
use crate::engine::row_filter::{FilterResult, RowFilter, RowFilterConfig};
use crate::perf::StageTimer;

/// 阶段一（类型化）: 过滤记录
///
/// # 参数
/// - `records`: 输入记录
/// - `target_date`: 目标发货日 `yyyy-MM-dd`（None/空白 → `dates.today()`）
/// - `config`: 过滤配置
/// - `dates`: "今天"的来源
pub fn filter_records(
    records: &[Record],
    target_date: Option<&str>,
    config: &RowFilterConfig,
    dates: &dyn DateSource,
) -> FilterResult {
    let mut timer = StageTimer::new("filter_table_data", records.len());
    let target = resolve_target_serial(target_date, dates);
    let result = RowFilter::new(config.clone()).filter(records, target);
    timer.set_output(result.chutes.len());
    result
}

/// 阶段一: 过滤记录表，输出 `[{ "CHUTE": code }]` JSON
///
/// 输入 JSON 无法解析时按空表处理，返回 `[]`
///
/// # 示例
/// ```
/// use chute_lines::api::pipeline_api::filter_table_data;
/// use chute_lines::engine::{FixedDateSource, RowFilterConfig};
/// use chrono::NaiveDate;
///
/// let dates = FixedDateSource(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// let out = filter_table_data("not json", None, &RowFilterConfig::default(), &dates);
/// assert_eq!(out, "[]");
/// ```
pub fn filter_table_data(
    data_json: &str,
    target_date: Option<&str>,
    config: &RowFilterConfig,
    dates: &dyn DateSource,
) -> String {
    let records = parse_records(data_json);
    let result = filter_records(&records, target_date, config, dates);
    to_json_string(&result.chutes)
}

/// 阶段二（类型化）: 格口 → 产线矩阵
pub fn assign_lines(chutes_json: &str, table: &LineRuleTable) -> (LineMatrix, BucketReport) {
    let rows = parse_json_array(chutes_json);
    let mut timer = StageTimer::new("get_lines_from_chutes", rows.len());
    let (matrix, report) = LineBucketer::new(table.clone()).assign(&rows);
    timer.set_output(matrix.row_count());
    (matrix, report)
}

/// 阶段二: 输入 `[{ "CHUTE": code }]` JSON，输出透视矩阵 JSON
pub fn get_lines_from_chutes(chutes_json: &str, table: &LineRuleTable) -> String {
    let (matrix, _) = assign_lines(chutes_json, table);
    to_json_string(&matrix.to_records())
}

/// 两阶段串联（阶段一输出的 JSON 原样作为阶段二输入）
pub fn run_pipeline(
    data_json: &str,
    target_date: Option<&str>,
    config: &RowFilterConfig,
    table: &LineRuleTable,
    dates: &dyn DateSource,
) -> String {
    let chutes_json = filter_table_data(data_json, target_date, config, dates);
    get_lines_from_chutes(&chutes_json, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::day_serial::FixedDateSource;
    use chrono::NaiveDate;

    fn dates() -> FixedDateSource {
        FixedDateSource(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn test_malformed_json_yields_empty_array() {
        let config = RowFilterConfig::default();
        assert_eq!(filter_table_data("not json", None, &config, &dates()), "[]");
        assert_eq!(get_lines_from_chutes("not json", &LineRuleTable::default()), "[]");
    }

    #[test]
    fn test_run_pipeline_chains_stages() {
        let data = r#"[
            {"IS Rush?": "rush", "Carton Status": "00 - printed",
             "Req Ship Date": 45658, "CHUTE": "A001Y"},
            {"IS Rush?": "rush", "Carton Status": "00 - printed",
             "Req Ship Date": 45658, "CHUTE": "B500"}
        ]"#;
        let out = run_pipeline(
            data,
            None,
            &RowFilterConfig::default(),
            &LineRuleTable::default(),
            &dates(),
        );
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Line 1"], "A001");
        assert_eq!(rows[0]["Line 5"], "B500");
        assert_eq!(rows[0]["Line 2"], "");
    }
}
