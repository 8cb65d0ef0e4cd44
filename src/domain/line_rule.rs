// ==========================================
// 出货格口产线分配 - 产线规则
// ==========================================
// 规则: 区位 + 闭区间 [start, end] → 产线
// ==========================================

use serde::{Deserialize, Serialize};

/// 单条产线规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRule {
    /// 区位字母（大写）
    pub zone: String,

    /// 槽位号下界（含）
    pub start: u32,

    /// 槽位号上界（含）
    pub end: u32,

    /// 产线名称
    pub line: String,
}

impl LineRule {
    pub fn new(zone: &str, start: u32, end: u32, line: &str) -> Self {
        Self {
            zone: zone.to_string(),
            start,
            end,
            line: line.to_string(),
        }
    }

    /// 区位与槽位号是否落在本规则内
    pub fn matches(&self, zone: char, number: u32) -> bool {
        self.zone_char() == Some(zone) && number >= self.start && number <= self.end
    }

    /// 同区位且区间有交集
    pub fn overlaps(&self, other: &LineRule) -> bool {
        self.zone_char() == other.zone_char() && self.start <= other.end && other.start <= self.end
    }

    fn zone_char(&self) -> Option<char> {
        let mut chars = self.zone.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c.to_ascii_uppercase()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_inclusive_both_ends() {
        let rule = LineRule::new("A", 1, 152, "Line 1");
        assert!(rule.matches('A', 1));
        assert!(rule.matches('A', 152));
        assert!(!rule.matches('A', 153));
        assert!(!rule.matches('B', 1));
    }

    #[test]
    fn test_overlaps_only_within_same_zone() {
        let a = LineRule::new("A", 1, 152, "Line 1");
        let a2 = LineRule::new("A", 152, 300, "Line 2");
        let b = LineRule::new("B", 1, 148, "Line 7");
        assert!(a.overlaps(&a2));
        assert!(!a.overlaps(&b));
    }
}
