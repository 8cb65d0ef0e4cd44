// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use chute_lines::engine::{day_serial, FixedDateSource};
use chute_lines::Record;
use serde_json::{json, Value};

/// 测试基准日: 2025-01-15
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn base_serial() -> i64 {
    day_serial(base_date())
}

pub fn fixed_dates() -> FixedDateSource {
    FixedDateSource(base_date())
}

// ==========================================
// 出货记录构建器
// ==========================================

pub struct ShipmentBuilder {
    fields: Record,
}

impl ShipmentBuilder {
    /// 默认: 加急、已打印、基准日发货
    pub fn new(chute: &str) -> Self {
        let mut fields = Record::new();
        fields.insert("IS Rush?".into(), json!("Rush"));
        fields.insert("Carton Status".into(), json!("00 - Printed"));
        fields.insert("Req Ship Date".into(), json!(base_serial()));
        fields.insert("CHUTE".into(), json!(chute));
        Self { fields }
    }

    pub fn rush(mut self, value: &str) -> Self {
        self.fields.insert("IS Rush?".into(), json!(value));
        self
    }

    pub fn status(mut self, value: &str) -> Self {
        self.fields.insert("Carton Status".into(), json!(value));
        self
    }

    pub fn ship_date(mut self, value: Value) -> Self {
        self.fields.insert("Req Ship Date".into(), value);
        self
    }

    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Record {
        self.fields
    }
}

/// 记录列表 → JSON 文本
pub fn to_json(records: &[Record]) -> String {
    serde_json::to_string(records).unwrap()
}

/// 解析阶段一输出的格口列表
pub fn chutes_of(output: &str) -> Vec<String> {
    let rows: Vec<Value> = serde_json::from_str(output).unwrap();
    rows.iter()
        .map(|r| r["CHUTE"].as_str().unwrap().to_string())
        .collect()
}

/// `[{ CHUTE }]` JSON
pub fn chute_rows(codes: &[&str]) -> String {
    let rows: Vec<Value> = codes.iter().map(|c| json!({ "CHUTE": c })).collect();
    serde_json::to_string(&rows).unwrap()
}
