// ==========================================
// 出货格口产线分配 - 格口解析结果
// ==========================================

use std::fmt;

/// 解析后的格口：区位字母 + 槽位号
///
/// 无法解析的格口 zone/number 均为 None，不会匹配任何产线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParsedChute {
    pub zone: Option<char>,
    pub number: Option<u32>,
}

impl ParsedChute {
    pub fn new(zone: char, number: u32) -> Self {
        Self {
            zone: Some(zone),
            number: Some(number),
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.zone.is_some() && self.number.is_some()
    }
}

impl fmt::Display for ParsedChute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.zone, self.number) {
            (Some(z), Some(n)) => write!(f, "{}{}", z, n),
            _ => write!(f, "<invalid>"),
        }
    }
}
