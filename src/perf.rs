// ==========================================
// 出货格口产线分配 - 阶段耗时统计
// ==========================================

use std::time::Instant;

/// 阶段耗时 Guard：drop 时记录 elapsed_ms + 输入/输出条数
///
/// 使用方式：
/// ```
/// let mut timer = chute_lines::perf::StageTimer::new("filter_table_data", 10);
/// // do work...
/// timer.set_output(3);
/// ```
pub struct StageTimer {
    op: &'static str,
    start: Instant,
    input: usize,
    output: usize,
}

impl StageTimer {
    pub fn new(op: &'static str, input: usize) -> Self {
        Self {
            op,
            start: Instant::now(),
            input,
            output: 0,
        }
    }

    pub fn set_output(&mut self, output: usize) {
        self.output = output;
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            input = self.input,
            output = self.output,
            "done"
        );
    }
}
