// ==========================================
// 出货格口产线分配 - CSV 导出
// ==========================================
// 首行为表头（列顺序与输出一致）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::record::{ChuteRow, CHUTE_FIELD};
use crate::engine::line_bucketer::LineMatrix;
use csv::Writer;

/// 格口列表 → CSV（单列 CHUTE）
pub fn chutes_to_csv(chutes: &[ChuteRow]) -> ApiResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record([CHUTE_FIELD])?;
    for row in chutes {
        writer.write_record([row.chute.as_str()])?;
    }
    finish(writer)
}

/// 产线矩阵 → CSV（每条产线一列）
pub fn matrix_to_csv(matrix: &LineMatrix) -> ApiResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(&matrix.columns)?;
    for row in &matrix.rows {
        writer.write_record(row)?;
    }
    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> ApiResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::ExportError(e.to_string()))
}
