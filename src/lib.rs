// ==========================================
// 出货格口产线分配 - 核心库
// ==========================================
// 流程: 记录表 → 行过滤 → 格口去重排序 → 产线分桶 → 透视矩阵
// 系统定位: 无状态纯计算，JSON 入 / JSON 出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 引擎层 - 过滤 / 归一化 / 分桶
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 配置文件与规则表
pub mod config;

// 公共工具
pub mod common;

// 日志系统
pub mod logging;

// 阶段耗时
pub mod perf;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ChuteRow, ContainsPolarity, LineRule, MatchMode, ParsedChute, Record, RecordFields,
    RejectReason,
};

// 引擎
pub use engine::{
    DateSource, FixedDateSource, LineBucketer, LineMatrix, LineRuleTable, RowFilter,
    RowFilterConfig, SystemDateSource,
};

// 配置
pub use config::{AppConfig, ConfigError, ConfigManager};

// API
pub use api::{filter_table_data, get_lines_from_chutes, run_pipeline, ApiError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "出货格口产线分配";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
