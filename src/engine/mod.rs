// ==========================================
// 出货格口产线分配 - 引擎层
// ==========================================
// 职责: 行过滤 / 格口归一化 / 产线分桶
// 红线: 纯计算、无 I/O，数据问题降级为剔除
// ==========================================

pub mod day_serial;
pub mod line_bucketer;
pub mod line_table;
pub mod natural_sort;
pub mod normalize;
pub mod row_filter;

// 重导出核心引擎
pub use day_serial::{
    day_serial, parse_target_date, resolve_target_serial, DateSource, DaySerial,
    FixedDateSource, SystemDateSource,
};
pub use line_bucketer::{BucketReport, LineBucketer, LineBuckets, LineMatrix};
pub use line_table::{LineRuleTable, DEFAULT_LINE_ORDER};
pub use natural_sort::{natural_cmp, unique_sorted};
pub use normalize::{normalize_bucket_code, normalize_chute, normalize_text, parse_chute};
pub use row_filter::{FilterOutcome, FilterReport, FilterResult, RowFilter, RowFilterConfig};
