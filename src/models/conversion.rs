use std::path::PathBuf;
use std::time::Duration;
use chrono::{DateTime, Local};
use crate::error::ConvertError;

/// 單一檔案的轉換結果，建立後不再修改
#[derive(Debug)]
pub struct ConversionOutcome {
    pub source_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub succeeded: bool,
    pub elapsed: Duration,
    pub output_size: Option<u64>,
    pub error: Option<ConvertError>,
}

impl ConversionOutcome {
    pub fn success(source_path: PathBuf, output_path: PathBuf, elapsed: Duration, output_size: Option<u64>) -> Self {
        ConversionOutcome {
            source_path,
            output_path: Some(output_path),
            succeeded: true,
            elapsed,
            output_size,
            error: None,
        }
    }

    pub fn failure(source_path: PathBuf, output_path: Option<PathBuf>, elapsed: Duration, error: ConvertError) -> Self {
        ConversionOutcome {
            source_path,
            output_path,
            succeeded: false,
            elapsed,
            output_size: None,
            error: Some(error),
        }
    }
}

/// 一次批次轉換的彙總報告
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub success_files: Vec<PathBuf>,
    pub failure_files: Vec<PathBuf>,
    /// 各檔案轉換耗時的總和
    pub total_elapsed: Duration,
    pub average_per_file: Duration,
    pub wall_clock: Duration,
    pub output_bytes: u64,
    pub started_at: DateTime<Local>,
}

impl BatchReport {
    pub fn item_count(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }
}
