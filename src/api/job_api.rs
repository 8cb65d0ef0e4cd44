// ==========================================
// 出货格口产线分配 - 作业接口
// ==========================================
// 职责: 加载配置 → 导入输入 → 执行阶段 → 渲染输出，一次调用完成
// 错误: 配置/导入/导出问题经 ApiError 返回；数据内容问题仍降级为剔除
// ==========================================

use crate::api::error::ApiResult;
use crate::api::export::{chutes_to_csv, matrix_to_csv};
use crate::api::pipeline_api::{assign_lines, filter_records};
use crate::common::json_utils::to_json_string;
use crate::config::{AppConfig, ConfigManager};
use crate::domain::record::{ChuteRow, Record};
use crate::engine::day_serial::DateSource;
use crate::engine::line_bucketer::LineMatrix;
use crate::importer::{parse_with_format, CsvParser, FileParser, InputFormat, JsonParser};
use std::path::Path;

/// 作业阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    /// 记录表 → `[{ CHUTE }]`
    Filter,
    /// `[{ CHUTE }]` → 产线矩阵
    Lines,
    /// 两阶段串联
    Run,
}

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// 作业输入
#[derive(Debug, Clone, Copy)]
pub enum JobInput<'a> {
    /// 已读入的文本（如标准输入）
    Text { text: &'a str, format: InputFormat },
    /// 文件（未指定格式时按扩展名推断）
    File {
        path: &'a Path,
        format: Option<InputFormat>,
    },
}

/// 作业请求
#[derive(Debug, Clone)]
pub struct JobRequest<'a> {
    pub stage: JobStage,
    /// 配置文件（None 时使用内置默认）
    pub config_path: Option<&'a Path>,
    /// 配置覆写（键见 `config_keys`），优先于配置文件
    pub overrides: Vec<(&'a str, &'a str)>,
    pub input: JobInput<'a>,
    /// 目标发货日 `yyyy-MM-dd`（None → 今天）
    pub target_date: Option<&'a str>,
    pub output_format: OutputFormat,
}

impl<'a> JobRequest<'a> {
    /// 默认配置、无覆写、JSON 输出
    pub fn new(stage: JobStage, input: JobInput<'a>) -> Self {
        Self {
            stage,
            config_path: None,
            overrides: Vec::new(),
            input,
            target_date: None,
            output_format: OutputFormat::Json,
        }
    }
}

/// 执行一次作业
///
/// # 参数
/// - `request`: 作业请求
/// - `dates`: "今天"的来源
///
/// # 返回
/// - Ok(String): 按 `output_format` 渲染的输出
/// - Err(ApiError::Config): 配置文件读取/解析失败、覆写值无效、产线规则表无效
/// - Err(ApiError::Import): 输入文件不存在、格式不支持、CSV 解析失败
/// - Err(ApiError::ExportError): CSV 导出失败
pub fn run_job(request: &JobRequest<'_>, dates: &dyn DateSource) -> ApiResult<String> {
    let mut config = ConfigManager::load(request.config_path)?;
    ConfigManager::apply_overrides(&mut config, request.overrides.iter().copied())?;

    let records = import_records(request.input)?;
    tracing::debug!(stage = ?request.stage, rows = records.len(), "作业输入已导入");

    match request.stage {
        JobStage::Filter => {
            let chutes = filter_stage(&records, request.target_date, &config, dates);
            render_chutes(&chutes, request.output_format)
        }
        JobStage::Lines => {
            let matrix = lines_stage(&to_json_string(&records), &config)?;
            render_matrix(&matrix, request.output_format)
        }
        JobStage::Run => {
            let chutes = filter_stage(&records, request.target_date, &config, dates);
            let matrix = lines_stage(&to_json_string(&chutes), &config)?;
            render_matrix(&matrix, request.output_format)
        }
    }
}

/// 导入输入记录
pub fn import_records(input: JobInput<'_>) -> ApiResult<Vec<Record>> {
    let records = match input {
        JobInput::Text { text, format } => parse_with_format(format, text)?,
        JobInput::File { path, format } => {
            let format = match format {
                Some(f) => f,
                None => InputFormat::from_path(path)?,
            };
            match format {
                InputFormat::Json => JsonParser.parse_to_records(path)?,
                InputFormat::Csv => CsvParser::default().parse_to_records(path)?,
            }
        }
    };
    Ok(records)
}

fn filter_stage(
    records: &[Record],
    target_date: Option<&str>,
    config: &AppConfig,
    dates: &dyn DateSource,
) -> Vec<ChuteRow> {
    let result = filter_records(records, target_date, &config.filter, dates);
    tracing::info!(report = %to_json_string(&result.report), "过滤统计");
    result.chutes
}

fn lines_stage(chutes_json: &str, config: &AppConfig) -> ApiResult<LineMatrix> {
    let table = config.line_rule_table()?;
    let (matrix, report) = assign_lines(chutes_json, &table);
    if !report.unassigned.is_empty() {
        tracing::warn!(unassigned = ?report.unassigned, "部分格口未匹配任何产线");
    }
    Ok(matrix)
}

fn render_chutes(chutes: &[ChuteRow], format: OutputFormat) -> ApiResult<String> {
    match format {
        OutputFormat::Json => Ok(to_json_string(chutes)),
        OutputFormat::Csv => chutes_to_csv(chutes),
    }
}

fn render_matrix(matrix: &LineMatrix, format: OutputFormat) -> ApiResult<String> {
    match format {
        OutputFormat::Json => Ok(to_json_string(&matrix.to_records())),
        OutputFormat::Csv => matrix_to_csv(matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::config::{config_keys, ConfigError};
    use crate::engine::day_serial::FixedDateSource;
    use crate::importer::ImportError;
    use chrono::NaiveDate;

    fn dates() -> FixedDateSource {
        FixedDateSource(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    const ROWS: &str = r#"[
        {"IS Rush?": "rush", "Carton Status": "00 - printed",
         "Req Ship Date": 45658, "CHUTE": "B450Y"},
        {"IS Rush?": "rush", "Carton Status": "00 - printed",
         "Req Ship Date": 45658, "CHUTE": "A001"}
    ]"#;

    fn json_input() -> JobInput<'static> {
        JobInput::Text {
            text: ROWS,
            format: InputFormat::Json,
        }
    }

    #[test]
    fn test_filter_stage_csv_output() {
        let mut request = JobRequest::new(JobStage::Filter, json_input());
        request.output_format = OutputFormat::Csv;
        assert_eq!(run_job(&request, &dates()).unwrap(), "CHUTE\nA001\nB450\n");
    }

    #[test]
    fn test_lines_stage_takes_chute_rows() {
        let input = JobInput::Text {
            text: r#"[{"CHUTE": "a002"}, {"CHUTE": "B001"}]"#,
            format: InputFormat::Json,
        };
        let out = run_job(&JobRequest::new(JobStage::Lines, input), &dates()).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Line 1"], "A002");
        assert_eq!(rows[0]["Line 7"], "B001");
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut request = JobRequest::new(JobStage::Run, json_input());
        request.overrides = vec![(config_keys::MATCH_MODE, "regex")];
        assert!(matches!(
            run_job(&request, &dates()),
            Err(ApiError::Config(ConfigError::ConfigValueError { .. }))
        ));
    }

    #[test]
    fn test_unsupported_input_file_is_import_error() {
        let input = JobInput::File {
            path: Path::new("rows.xlsx"),
            format: None,
        };
        assert!(matches!(
            run_job(&JobRequest::new(JobStage::Filter, input), &dates()),
            Err(ApiError::Import(ImportError::UnsupportedFormat(_)))
        ));
    }
}
