// ==========================================
// 出货格口产线分配 - 行过滤引擎
// ==========================================
// 职责: 按 优先级 / 箱状态 / 要求发货日 / 格口 筛选记录，
//       输出去重 + 自然排序后的格口列表
// 红线: 数据问题一律降级为"剔除"，不向调用方抛错；每条剔除必须有原因
// ==========================================

use crate::domain::record::{ChuteRow, Record, RecordFields, DEFAULT_PRIORITY_FIELD};
use crate::domain::types::{ContainsPolarity, MatchMode, RejectReason};
use crate::engine::day_serial::{coerce_day_serial, DaySerial};
use crate::engine::natural_sort::unique_sorted;
use crate::engine::normalize::{normalize_chute, normalize_text, normalize_text_str};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 优先级通配值（归一化后比较）
pub const PRIORITY_ANY: &str = "any";

/// 默认优先级取值
pub const DEFAULT_PRIORITY_VALUE: &str = "rush";

/// 默认要求的箱状态
pub const DEFAULT_CARTON_STATUS: &str = "00 - printed";

/// 行过滤配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowFilterConfig {
    /// 优先级取值（"rush" / "standard" / 自由文本），或通配值 "any"
    pub priority_value: String,

    /// 优先级字段名
    pub priority_field: String,

    /// 匹配模式
    pub match_mode: MatchMode,

    /// contains 模式下的子串（空串视为总是包含）
    pub substring: String,

    /// contains 模式下的极性
    pub contains_polarity: ContainsPolarity,

    /// 箱状态要求值
    pub required_carton_status: String,

    /// 其余字段名
    pub fields: RecordFields,
}

impl Default for RowFilterConfig {
    fn default() -> Self {
        Self {
            priority_value: DEFAULT_PRIORITY_VALUE.to_string(),
            priority_field: DEFAULT_PRIORITY_FIELD.to_string(),
            match_mode: MatchMode::Equals,
            substring: String::new(),
            contains_polarity: ContainsPolarity::Include,
            required_carton_status: DEFAULT_CARTON_STATUS.to_string(),
            fields: RecordFields::default(),
        }
    }
}

/// 单条记录判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Accepted { chute: String },
    Rejected(RejectReason),
}

impl FilterOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterOutcome::Accepted { .. })
    }
}

/// 过滤统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub total: usize,
    pub accepted: usize,
    pub rejected_priority: usize,
    pub rejected_carton_status: usize,
    pub rejected_ship_date: usize,
    pub rejected_missing_chute: usize,
    pub unique_chutes: usize,
    pub target_serial: Option<DaySerial>,
}

impl FilterReport {
    fn record(&mut self, outcome: &FilterOutcome) {
        self.total += 1;
        match outcome {
            FilterOutcome::Accepted { .. } => self.accepted += 1,
            FilterOutcome::Rejected(RejectReason::Priority) => self.rejected_priority += 1,
            FilterOutcome::Rejected(RejectReason::CartonStatus) => {
                self.rejected_carton_status += 1
            }
            FilterOutcome::Rejected(RejectReason::ShipDate) => self.rejected_ship_date += 1,
            FilterOutcome::Rejected(RejectReason::MissingChute) => {
                self.rejected_missing_chute += 1
            }
        }
    }
}

/// 过滤结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    pub chutes: Vec<ChuteRow>,
    pub report: FilterReport,
}

// ==========================================
// RowFilter - 行过滤引擎
// ==========================================
// 构造时预先归一化配置值，判定时只归一化记录字段
#[derive(Debug, Clone)]
pub struct RowFilter {
    config: RowFilterConfig,
    want_any: bool,
    priority_norm: String,
    needle_norm: String,
    carton_status_norm: String,
}

impl RowFilter {
    pub fn new(config: RowFilterConfig) -> Self {
        let priority_norm = normalize_text_str(&config.priority_value);
        let needle_norm = normalize_text_str(&config.substring);
        let carton_status_norm = normalize_text_str(&config.required_carton_status);

        Self {
            want_any: priority_norm == PRIORITY_ANY,
            priority_norm,
            needle_norm,
            carton_status_norm,
            config,
        }
    }

    pub fn config(&self) -> &RowFilterConfig {
        &self.config
    }

    // ==========================================
    // 单项判定
    // ==========================================

    /// 优先级判定
    ///
    /// # 规则
    /// 1. 优先级取值归一化为 "any" → 恒为真（字段缺失也通过）
    /// 2. contains: 字段是否包含子串（exclude 极性取反）
    /// 3. equals: 归一化后全等
    pub fn priority_ok(&self, record: &Record) -> bool {
        if self.want_any {
            return true;
        }

        let value = normalize_text(record.get(&self.config.priority_field));
        match self.config.match_mode {
            MatchMode::Contains => {
                let has = value.contains(self.needle_norm.as_str());
                match self.config.contains_polarity {
                    ContainsPolarity::Include => has,
                    ContainsPolarity::Exclude => !has,
                }
            }
            MatchMode::Equals => value == self.priority_norm,
        }
    }

    /// 箱状态判定
    pub fn carton_status_ok(&self, record: &Record) -> bool {
        normalize_text(record.get(&self.config.fields.carton_status)) == self.carton_status_norm
    }

    /// 要求发货日判定（向下取整后与目标日序号全等）
    pub fn ship_date_ok(&self, record: &Record, target: Option<DaySerial>) -> bool {
        match (coerce_day_serial(record.get(&self.config.fields.req_ship_date)), target) {
            (Some(serial), Some(target)) => serial == target,
            _ => false,
        }
    }

    /// 归一化格口（空串表示无有效格口）
    pub fn chute_of(&self, record: &Record) -> String {
        normalize_chute(record.get(&self.config.fields.chute))
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定单条记录
    ///
    /// 四个条件全部满足才通过；不通过时返回第一个失败条件
    pub fn evaluate(&self, record: &Record, target: Option<DaySerial>) -> FilterOutcome {
        if !self.priority_ok(record) {
            return FilterOutcome::Rejected(RejectReason::Priority);
        }
        if !self.carton_status_ok(record) {
            return FilterOutcome::Rejected(RejectReason::CartonStatus);
        }
        if !self.ship_date_ok(record, target) {
            return FilterOutcome::Rejected(RejectReason::ShipDate);
        }

        let chute = self.chute_of(record);
        if chute.is_empty() {
            return FilterOutcome::Rejected(RejectReason::MissingChute);
        }
        FilterOutcome::Accepted { chute }
    }

    /// 过滤记录并输出格口列表
    ///
    /// # 参数
    /// - `records`: 输入记录
    /// - `target`: 目标日序号（None 表示目标日无效，全部剔除）
    ///
    /// # 返回
    /// 去重、自然排序后的 `{ CHUTE }` 行 + 统计
    #[instrument(skip(self, records), fields(total = records.len(), target = ?target))]
    pub fn filter(&self, records: &[Record], target: Option<DaySerial>) -> FilterResult {
        let mut report = FilterReport {
            target_serial: target,
            ..FilterReport::default()
        };
        let mut accepted = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let outcome = self.evaluate(record, target);
            report.record(&outcome);
            match outcome {
                FilterOutcome::Accepted { chute } => accepted.push(chute),
                FilterOutcome::Rejected(reason) => {
                    tracing::debug!(row = index, %reason, "记录被剔除");
                }
            }
        }

        let chutes: Vec<ChuteRow> = unique_sorted(accepted)
            .into_iter()
            .map(ChuteRow::new)
            .collect();
        report.unique_chutes = chutes.len();

        tracing::info!(
            total = report.total,
            accepted = report.accepted,
            unique_chutes = report.unique_chutes,
            "行过滤完成"
        );

        FilterResult { chutes, report }
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(RowFilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn rush_row(chute: &str, serial: f64) -> Record {
        record(json!({
            "IS Rush?": "Rush",
            "Carton Status": "00 - Printed",
            "Req Ship Date": serial,
            "CHUTE": chute,
        }))
    }

    #[test]
    fn test_evaluate_accepts_matching_row() {
        let filter = RowFilter::default();
        let outcome = filter.evaluate(&rush_row("A001Y", 45658.4), Some(45658));
        assert_eq!(
            outcome,
            FilterOutcome::Accepted {
                chute: "A001".to_string()
            }
        );
    }

    #[test]
    fn test_evaluate_reports_first_failing_check() {
        let filter = RowFilter::default();
        let mut row = rush_row("A001", 45658.0);
        row.insert("IS Rush?".into(), json!("standard"));
        row.insert("Carton Status".into(), json!("01 - packed"));
        assert_eq!(
            filter.evaluate(&row, Some(45658)),
            FilterOutcome::Rejected(RejectReason::Priority)
        );
    }

    #[test]
    fn test_any_priority_accepts_missing_field() {
        let filter = RowFilter::new(RowFilterConfig {
            priority_value: " ANY ".to_string(),
            ..RowFilterConfig::default()
        });
        let mut row = rush_row("B500", 45658.0);
        row.remove("IS Rush?");
        assert!(filter.priority_ok(&row));
        assert!(filter.evaluate(&row, Some(45658)).is_accepted());
    }

    #[test]
    fn test_contains_exclude_with_empty_needle_rejects_all() {
        let filter = RowFilter::new(RowFilterConfig {
            match_mode: MatchMode::Contains,
            contains_polarity: ContainsPolarity::Exclude,
            substring: String::new(),
            ..RowFilterConfig::default()
        });
        assert!(!filter.priority_ok(&rush_row("A001", 45658.0)));
        assert!(!filter.priority_ok(&Record::new()));
    }

    #[test]
    fn test_missing_chute_is_rejected() {
        let filter = RowFilter::default();
        assert_eq!(
            filter.evaluate(&rush_row("  y ", 45658.0), Some(45658)),
            FilterOutcome::Rejected(RejectReason::MissingChute)
        );
    }

    #[test]
    fn test_invalid_target_rejects_on_ship_date() {
        let filter = RowFilter::default();
        assert_eq!(
            filter.evaluate(&rush_row("A001", 45658.0), None),
            FilterOutcome::Rejected(RejectReason::ShipDate)
        );
    }

    #[test]
    fn test_filter_dedups_and_counts() {
        let filter = RowFilter::default();
        let rows = vec![
            rush_row("A010", 45658.0),
            rush_row("A010Y", 45658.7),
            rush_row("A2", 45658.0),
            rush_row("A3", 45659.0),
        ];
        let result = filter.filter(&rows, Some(45658));
        assert_eq!(
            result.chutes,
            vec![ChuteRow::new("A2"), ChuteRow::new("A010")]
        );
        assert_eq!(result.report.accepted, 3);
        assert_eq!(result.report.rejected_ship_date, 1);
        assert_eq!(result.report.unique_chutes, 2);
    }
}
