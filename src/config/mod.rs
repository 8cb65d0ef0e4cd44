// ==========================================
// 出货格口产线分配 - 配置层
// ==========================================
// 职责: 配置文件加载、覆写、产线规则表校验
// 存储: JSON 配置文件（无持久化）
// ==========================================

pub mod app_config;
pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use app_config::{AppConfig, LineTableProfile};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
