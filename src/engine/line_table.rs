// ==========================================
// 出货格口产线分配 - 产线规则表
// ==========================================
// 规则: 按表顺序扫描，第一条命中即生效
// 校验: 同区位区间不得重叠（构造时校验）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::line_rule::LineRule;
use std::collections::HashSet;

/// 默认产线列顺序
pub const DEFAULT_LINE_ORDER: [&str; 8] = [
    "Line 1", "Line 2", "Line 3", "Line 4", "Line 5", "Line 6", "Line 7", "Line 8",
];

/// 默认产线规则（A / B 两个区位）
pub fn default_rules() -> Vec<LineRule> {
    vec![
        // A 区
        LineRule::new("A", 1, 152, "Line 1"),
        LineRule::new("A", 153, 300, "Line 2"),
        LineRule::new("A", 301, 448, "Line 3"),
        LineRule::new("A", 449, 600, "Line 4"),
        // B 区
        LineRule::new("B", 1, 148, "Line 7"),
        LineRule::new("B", 149, 306, "Line 8"),
        LineRule::new("B", 307, 450, "Line 6"),
        LineRule::new("B", 451, 600, "Line 5"),
    ]
}

/// 默认产线列顺序（所有权版本）
pub fn default_line_order() -> Vec<String> {
    DEFAULT_LINE_ORDER.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// LineRuleTable - 已校验的产线规则表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRuleTable {
    rules: Vec<LineRule>,
    line_order: Vec<String>,
}

impl LineRuleTable {
    /// 创建并校验规则表
    ///
    /// # 校验项
    /// 1. 列顺序非空且不重复
    /// 2. 区位为单个 ASCII 字母，start <= end
    /// 3. 规则引用的产线必须出现在列顺序中
    /// 4. 同区位区间不重叠
    pub fn new(rules: Vec<LineRule>, line_order: Vec<String>) -> ConfigResult<Self> {
        validate(&rules, &line_order)?;
        Ok(Self { rules, line_order })
    }

    pub fn rules(&self) -> &[LineRule] {
        &self.rules
    }

    pub fn line_order(&self) -> &[String] {
        &self.line_order
    }

    /// 查找格口所属产线（第一条命中）
    pub fn line_of(&self, zone: char, number: u32) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.matches(zone, number))
            .map(|r| r.line.as_str())
    }
}

impl Default for LineRuleTable {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            line_order: default_line_order(),
        }
    }
}

fn validate(rules: &[LineRule], line_order: &[String]) -> ConfigResult<()> {
    if line_order.is_empty() {
        return Err(ConfigError::EmptyLineOrder);
    }

    let mut seen = HashSet::new();
    for line in line_order {
        if !seen.insert(line.as_str()) {
            return Err(ConfigError::DuplicateLine(line.clone()));
        }
    }

    for (index, rule) in rules.iter().enumerate() {
        let mut zone = rule.zone.chars();
        let single_letter = matches!(
            (zone.next(), zone.next()),
            (Some(c), None) if c.is_ascii_alphabetic()
        );
        if !single_letter {
            return Err(ConfigError::InvalidRule {
                index,
                message: format!("区位必须是单个字母，实际 '{}'", rule.zone),
            });
        }
        if rule.start > rule.end {
            return Err(ConfigError::InvalidRule {
                index,
                message: format!("区间起点 {} 大于终点 {}", rule.start, rule.end),
            });
        }
        if !seen.contains(rule.line.as_str()) {
            return Err(ConfigError::UnknownLine {
                index,
                line: rule.line.clone(),
            });
        }
    }

    for (first, a) in rules.iter().enumerate() {
        for (offset, b) in rules[first + 1..].iter().enumerate() {
            if a.overlaps(b) {
                return Err(ConfigError::OverlappingRules {
                    zone: a.zone.to_ascii_uppercase(),
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    Ok(())
}
