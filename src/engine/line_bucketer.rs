// ==========================================
// 出货格口产线分配 - 产线分桶引擎
// ==========================================
// 职责: 格口再归一化 → 去重排序 → 解析 → 按规则分桶 → 透视成矩阵
// 红线: 无法解析/超出区间的格口静默剔除，不抛错
// ==========================================

use crate::domain::record::CHUTE_FIELD;
use crate::engine::line_table::LineRuleTable;
use crate::engine::natural_sort::unique_sorted;
use crate::engine::normalize::{normalize_bucket_code, parse_chute};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

/// 分桶结果（列顺序与规则表一致）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuckets {
    pub columns: Vec<(String, Vec<String>)>,
    pub unassigned: Vec<String>,
}

impl LineBuckets {
    /// 指定产线的格口
    pub fn codes(&self, line: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(name, _)| name == line)
            .map(|(_, codes)| codes.as_slice())
    }
}

/// 分桶统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReport {
    pub distinct_codes: usize,
    pub assigned: usize,
    pub unassigned: Vec<String>,
    pub row_count: usize,
}

// ==========================================
// LineMatrix - 透视矩阵
// ==========================================
// 每列一条产线，短列以空串补齐
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LineMatrix {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 取一列（含补齐的空串）
    pub fn column(&self, line: &str) -> Vec<&str> {
        match self.columns.iter().position(|c| c == line) {
            Some(idx) => self.rows.iter().map(|row| row[idx].as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// 转为行对象: `{ "Line 1": "A001", ... }`，键顺序即列顺序
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| (col.clone(), Value::String(cell.clone())))
                    .collect()
            })
            .collect()
    }
}

// ==========================================
// LineBucketer - 产线分桶引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LineBucketer {
    table: LineRuleTable,
}

impl LineBucketer {
    pub fn new(table: LineRuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &LineRuleTable {
        &self.table
    }

    /// 从 `{ CHUTE }` 行中取格口：再归一化、去空、去重、自然排序
    pub fn distinct_codes(&self, rows: &[Value]) -> Vec<String> {
        unique_sorted(
            rows.iter()
                .map(|row| normalize_bucket_code(row.as_object().and_then(|o| o.get(CHUTE_FIELD)))),
        )
    }

    /// 格口 → 产线
    pub fn line_of(&self, code: &str) -> Option<&str> {
        let parsed = parse_chute(code);
        match (parsed.zone, parsed.number) {
            (Some(zone), Some(number)) => self.table.line_of(zone, number),
            _ => None,
        }
    }

    /// 按产线分桶（保持输入顺序）
    pub fn bucket(&self, codes: &[String]) -> LineBuckets {
        let mut columns: Vec<(String, Vec<String>)> = self
            .table
            .line_order()
            .iter()
            .map(|line| (line.clone(), Vec::new()))
            .collect();
        let mut unassigned = Vec::new();

        for code in codes {
            let slot = self
                .line_of(code)
                .and_then(|line| columns.iter_mut().find(|(name, _)| name == line));
            match slot {
                Some((_, bucket)) => bucket.push(code.clone()),
                None => {
                    tracing::debug!(code = %code, "格口未匹配任何产线");
                    unassigned.push(code.clone());
                }
            }
        }

        LineBuckets {
            columns,
            unassigned,
        }
    }

    /// 透视: 每列一条产线，行数 = 最长列
    pub fn pivot(&self, buckets: &LineBuckets) -> LineMatrix {
        let row_count = buckets
            .columns
            .iter()
            .map(|(_, codes)| codes.len())
            .max()
            .unwrap_or(0);

        let rows = (0..row_count)
            .map(|i| {
                buckets
                    .columns
                    .iter()
                    .map(|(_, codes)| codes.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        LineMatrix {
            columns: buckets.columns.iter().map(|(name, _)| name.clone()).collect(),
            rows,
        }
    }

    /// 完整分配流程
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn assign(&self, rows: &[Value]) -> (LineMatrix, BucketReport) {
        let codes = self.distinct_codes(rows);
        let buckets = self.bucket(&codes);
        let matrix = self.pivot(&buckets);

        let report = BucketReport {
            distinct_codes: codes.len(),
            assigned: codes.len() - buckets.unassigned.len(),
            unassigned: buckets.unassigned,
            row_count: matrix.row_count(),
        };

        tracing::info!(
            distinct_codes = report.distinct_codes,
            assigned = report.assigned,
            rows = report.row_count,
            "产线分配完成"
        );

        (matrix, report)
    }
}
