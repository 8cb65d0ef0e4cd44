use crate::config::error::ConfigResult;
use crate::domain::line_rule::LineRule;
use crate::engine::line_table::{default_line_order, default_rules, LineRuleTable};
use crate::engine::row_filter::RowFilterConfig;
use serde::{Deserialize, Serialize};

/// 应用配置（配置文件根对象）
///
/// 所有键均可省略，缺省值即内置默认配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 行过滤配置
    pub filter: RowFilterConfig,

    /// 产线规则表
    pub lines: LineTableProfile,
}

/// 产线规则表（未校验的配置形态）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineTableProfile {
    /// 规则（顺序即匹配优先级）
    pub rules: Vec<LineRule>,

    /// 输出列顺序
    pub line_order: Vec<String>,
}

impl Default for LineTableProfile {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            line_order: default_line_order(),
        }
    }
}

impl AppConfig {
    /// 构造并校验产线规则表
    pub fn line_rule_table(&self) -> ConfigResult<LineRuleTable> {
        LineRuleTable::new(self.lines.rules.clone(), self.lines.line_order.clone())
    }
}
