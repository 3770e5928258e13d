use std::path::PathBuf;
use std::time::Duration;
use chrono::{DateTime, Local};
use crate::models::conversion::{BatchReport, ConversionOutcome};

/// 逐筆接收轉換結果並累計成報告
///
/// 同一來源路徑出現多次時各自計算，不做去重。
pub struct ResultAggregator {
    success_files: Vec<PathBuf>,
    failure_files: Vec<PathBuf>,
    total_elapsed: Duration,
    output_bytes: u64,
    started_at: DateTime<Local>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        ResultAggregator {
            success_files: Vec::new(),
            failure_files: Vec::new(),
            total_elapsed: Duration::ZERO,
            output_bytes: 0,
            started_at: Local::now(),
        }
    }

    pub fn push(&mut self, outcome: ConversionOutcome) {
        self.total_elapsed += outcome.elapsed;
        if outcome.succeeded {
            self.output_bytes += outcome.output_size.unwrap_or(0);
            self.success_files.push(outcome.source_path);
        } else {
            self.failure_files.push(outcome.source_path);
        }
    }

    pub fn item_count(&self) -> usize {
        self.success_files.len() + self.failure_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failure_files.len()
    }

    pub fn finish(self, wall_clock: Duration) -> BatchReport {
        let count = self.item_count().max(1) as u32;
        BatchReport {
            success_count: self.success_files.len(),
            failure_count: self.failure_files.len(),
            success_files: self.success_files,
            failure_files: self.failure_files,
            total_elapsed: self.total_elapsed,
            average_per_file: self.total_elapsed / count,
            wall_clock,
            output_bytes: self.output_bytes,
            started_at: self.started_at,
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<ConversionOutcome> for ResultAggregator {
    fn extend<I: IntoIterator<Item = ConversionOutcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.push(outcome);
        }
    }
}

/// 將一串結果彙總成報告，`wall_clock` 取各筆耗時總和
pub fn aggregate<I: IntoIterator<Item = ConversionOutcome>>(outcomes: I) -> BatchReport {
    let mut aggregator = ResultAggregator::new();
    aggregator.extend(outcomes);
    let total = aggregator.total_elapsed;
    aggregator.finish(total)
}
