// ==========================================
// 出货格口产线分配 - 领域层
// ==========================================
// 职责: 记录、格口、产线规则等纯数据类型
// 红线: 不含 I/O、不含业务判定
// ==========================================

pub mod chute;
pub mod line_rule;
pub mod record;
pub mod types;

pub use chute::ParsedChute;
pub use line_rule::LineRule;
pub use record::{ChuteRow, Record, RecordFields};
pub use types::{ContainsPolarity, MatchMode, RejectReason};
