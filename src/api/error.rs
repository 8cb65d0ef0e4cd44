// ==========================================
// 出货格口产线分配 - API层错误类型
// ==========================================
// 职责: 汇总配置 / 导入 / 导出层错误
// 说明: 数据内容问题不会走到这里（已在引擎内降级为剔除）
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入错误: {0}")]
    Import(#[from] ImportError),

    #[error("导出失败: {0}")]
    ExportError(String),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
