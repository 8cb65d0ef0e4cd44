// ==========================================
// 出货格口产线分配 - 输入记录 / 输出行
// ==========================================
// 输入记录为开放的 字段名 → 值 映射，不强制 schema
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 一行输入记录（字段名 → 值）
pub type Record = Map<String, Value>;

/// 默认优先级字段（历史表头）
pub const DEFAULT_PRIORITY_FIELD: &str = "IS Rush?";

/// 箱状态字段
pub const CARTON_STATUS_FIELD: &str = "Carton Status";

/// 要求发货日字段（日序号）
pub const REQ_SHIP_DATE_FIELD: &str = "Req Ship Date";

/// 格口字段
pub const CHUTE_FIELD: &str = "CHUTE";

/// 记录中需要读取的字段名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFields {
    pub carton_status: String,
    pub req_ship_date: String,
    pub chute: String,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            carton_status: CARTON_STATUS_FIELD.to_string(),
            req_ship_date: REQ_SHIP_DATE_FIELD.to_string(),
            chute: CHUTE_FIELD.to_string(),
        }
    }
}

/// 过滤阶段输出行: `{ "CHUTE": code }`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChuteRow {
    #[serde(rename = "CHUTE", default)]
    pub chute: String,
}

impl ChuteRow {
    pub fn new(chute: impl Into<String>) -> Self {
        Self {
            chute: chute.into(),
        }
    }
}
