use std::path::PathBuf;
use crate::error::Result;
use crate::models::conversion::BatchReport;

// 應用配置結構體，封裝一次執行的所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub max_concurrency: usize,
    pub extension: String,
    pub suffix: String,
    pub command: Option<String>,
    pub command_args: Vec<String>,
    pub sequential: bool,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> Result<BatchReport>;
}
