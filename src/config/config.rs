use clap::Parser;
use std::path::Path;
use crate::error::{ConvertError, Result};

/// 未指定或無法解析時使用的平行數
pub const DEFAULT_PARALLELISM: usize = 2;
/// 未指定輸出目錄時，在來源目錄下建立的子目錄名稱
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "batch_convert",
    about = "批次轉換目錄下的文件，輸出到保留相同子目錄結構的輸出目錄",
    long_about = "遞迴掃描來源目錄下指定副檔名的檔案，逐一交給轉換程式處理，輸出檔名加上標記（預設 `_new`）並寫入保留相同子目錄結構的輸出目錄。\n未指定 --command 時直接複製檔案。\n使用 `--help` 查看詳細用法。"
)]
pub struct Cli {
    /// 來源根目錄
    pub input: String,
    /// 同時進行的轉換數，無法解析時使用 2
    pub parallelism: Option<String>,
    /// 輸出根目錄，預設為 <input>/output
    pub output: Option<String>,
    #[arg(long, default_value = "pdf")]
    pub extension: String,
    #[arg(long, default_value = "_new")]
    pub suffix: String,
    /// 外部轉換程式，呼叫形式為 `<command> [--arg ...] <source> <destination>`
    #[arg(long)]
    pub command: Option<String>,
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub command_args: Vec<String>,
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

/// 解析平行數；缺少時用預設值，無法解析或為 0 時警告並用預設值
pub fn parse_parallelism(value: Option<&str>) -> usize {
    match value {
        None => DEFAULT_PARALLELISM,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n,
            _ => {
                log::warn!("無效的平行數：{}，使用預設值 {}", raw, DEFAULT_PARALLELISM);
                DEFAULT_PARALLELISM
            }
        },
    }
}

pub fn validate_input_path(input: &str) -> Result<&Path> {
    let path = Path::new(input);
    if !path.is_dir() {
        log::error!("來源目錄不存在：{}", input);
        return Err(ConvertError::RootNotFound { path: path.to_path_buf() });
    }
    Ok(path)
}

pub fn validate_suffix(suffix: &str) -> Result<()> {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|', '*'];
    if suffix.is_empty() || suffix.contains(&invalid_chars[..]) {
        return Err(ConvertError::Config(format!("無效的檔名標記：{:?}", suffix)));
    }
    Ok(())
}
