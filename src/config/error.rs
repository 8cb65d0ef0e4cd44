// ==========================================
// 出货格口产线分配 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    // ===== 配置值错误 =====
    #[error("未知的配置键: {0}")]
    UnknownKey(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 产线规则表错误 =====
    #[error("产线列顺序为空")]
    EmptyLineOrder,

    #[error("产线列重复: {0}")]
    DuplicateLine(String),

    #[error("产线规则无效 (第 {index} 条): {message}")]
    InvalidRule { index: usize, message: String },

    #[error("产线规则引用了未定义的产线 (第 {index} 条): {line}")]
    UnknownLine { index: usize, line: String },

    #[error("产线规则区间重叠 (区位 {zone}): 第 {first} 条与第 {second} 条")]
    OverlappingRules {
        zone: String,
        first: usize,
        second: usize,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
