// ==========================================
// 出货格口产线分配 - API层
// ==========================================
// 职责: 对外接口（JSON 入/出）与 CSV 导出
// ==========================================

pub mod error;
pub mod export;
pub mod job_api;
pub mod pipeline_api;

pub use error::{ApiError, ApiResult};
pub use export::{chutes_to_csv, matrix_to_csv};
pub use job_api::{run_job, JobInput, JobRequest, JobStage, OutputFormat};
pub use pipeline_api::{
    assign_lines, filter_records, filter_table_data, get_lines_from_chutes, run_pipeline,
};
