use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::models::conversion::BatchReport;

// Facade 接口，負責將一批來源檔案交給轉換器並彙總結果
pub trait ConversionFacadeTrait: Send + Sync {
    /// 依輸入順序逐一轉換
    fn run_sequential(&self, source_paths: &[PathBuf], source_root: &Path) -> Result<BatchReport>;

    /// 同時最多 `max_concurrency` 個轉換，小於 1 時視為 1
    fn run_parallel(&self, source_paths: &[PathBuf], source_root: &Path, max_concurrency: usize) -> Result<BatchReport>;
}
