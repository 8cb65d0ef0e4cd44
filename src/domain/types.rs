// ==========================================
// 出货格口产线分配 - 领域类型定义
// ==========================================
// 职责: 过滤匹配模式 / 包含极性 / 剔除原因
// 序列化格式: lowercase (与配置文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 优先级匹配模式 (Match Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Equals, // 归一化后全等
    Contains, // 归一化后包含子串
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Equals => write!(f, "equals"),
            MatchMode::Contains => write!(f, "contains"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equals" => Ok(MatchMode::Equals),
            "contains" => Ok(MatchMode::Contains),
            other => Err(format!("未知的匹配模式: {}（可选 equals / contains）", other)),
        }
    }
}

// ==========================================
// 包含极性 (Contains Polarity)
// ==========================================
// 仅在 MatchMode::Contains 下生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainsPolarity {
    #[default]
    Include, // 含子串 → 命中
    Exclude, // 含子串 → 不命中
}

impl fmt::Display for ContainsPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainsPolarity::Include => write!(f, "include"),
            ContainsPolarity::Exclude => write!(f, "exclude"),
        }
    }
}

impl FromStr for ContainsPolarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "include" => Ok(ContainsPolarity::Include),
            "exclude" => Ok(ContainsPolarity::Exclude),
            other => Err(format!("未知的包含极性: {}（可选 include / exclude）", other)),
        }
    }
}

// ==========================================
// 剔除原因 (Reject Reason)
// ==========================================
// 按判定顺序排列，记录第一个不满足的条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    Priority,     // 优先级不匹配
    CartonStatus, // 箱状态不符
    ShipDate,     // 要求发货日不是目标日
    MissingChute, // 无有效格口
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Priority => write!(f, "PRIORITY"),
            RejectReason::CartonStatus => write!(f, "CARTON_STATUS"),
            RejectReason::ShipDate => write!(f, "SHIP_DATE"),
            RejectReason::MissingChute => write!(f, "MISSING_CHUTE"),
        }
    }
}
