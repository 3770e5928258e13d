use clap::{CommandFactory, Parser};
use crate::config::config::{parse_parallelism, validate_input_path, validate_suffix, Cli, DEFAULT_OUTPUT_DIR};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::models::conversion::BatchReport;
use crate::service::config_service::ConfigService;
use crate::utils::convert::ConversionAdapter;
use crate::utils::path::normalize_lexically;
use crate::utils::utils::{print_summary, setup_logging};

/// 沒有參數時印出用法並回傳 `None`
pub fn process_args(args: Vec<String>) -> Result<Option<BatchReport>> {
    if args.len() <= 1 {
        Cli::command().print_help()?;
        println!();
        return Ok(None);
    }
    let cli = Cli::parse_from(args);
    process_cli_mode(cli).map(Some)
}

pub fn process_cli_mode(cli: Cli) -> Result<BatchReport> {
    setup_logging(&cli.log_level);

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli)));
    let config = config_service.get_config()?;
    log::info!(
        "開始批次轉換，來源目錄：{}，輸出目錄：{}，平行數：{}",
        config.source_root.display(),
        config.output_root.display(),
        config.max_concurrency
    );

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter::new());
    let report = conversion_port.execute(config)?;
    print_summary(&report);
    Ok(report)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        let input = validate_input_path(&self.cli.input)?;
        validate_suffix(&self.cli.suffix)?;

        let source_root = normalize_lexically(&std::path::absolute(input)?);
        let output_root = match &self.cli.output {
            Some(output) => normalize_lexically(&std::path::absolute(output)?),
            None => source_root.join(DEFAULT_OUTPUT_DIR),
        };
        if output_root == source_root {
            return Err(ConvertError::Config("輸出目錄不能與來源目錄相同".to_string()));
        }

        Ok(AppConfig {
            source_root,
            output_root,
            max_concurrency: parse_parallelism(self.cli.parallelism.as_deref()),
            extension: self.cli.extension.clone(),
            suffix: self.cli.suffix.clone(),
            command: self.cli.command.clone(),
            command_args: self.cli.command_args.clone(),
            sequential: self.cli.sequential,
            no_progress: self.cli.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["batch_convert"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn no_arguments_prints_usage() {
        let result = process_args(vec!["batch_convert".to_string()]).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn default_output_is_under_source_root() {
        let src = TempDir::new().unwrap();
        let config = CliConfigAdapter::new(cli(&[src.path().to_str().unwrap()])).get_config().unwrap();
        assert_eq!(config.source_root, src.path());
        assert_eq!(config.output_root, src.path().join(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.max_concurrency, 2);
    }

    #[test]
    fn unparseable_parallelism_is_not_fatal() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = CliConfigAdapter::new(cli(&[
            src.path().to_str().unwrap(),
            "lots",
            out.path().to_str().unwrap(),
        ]))
        .get_config()
        .unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.output_root, out.path());
    }

    #[test]
    fn roots_are_normalized() {
        let src = TempDir::new().unwrap();
        fs::create_dir(src.path().join("x")).unwrap();
        let input = src.path().join("x").join("..");
        let output = src.path().join("x").join("..").join("converted");
        let config = CliConfigAdapter::new(cli(&[input.to_str().unwrap(), "2", output.to_str().unwrap()]))
            .get_config()
            .unwrap();
        assert_eq!(config.source_root, src.path());
        assert_eq!(config.output_root, src.path().join("converted"));
    }

    #[test]
    fn missing_source_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let err = CliConfigAdapter::new(cli(&[missing.to_str().unwrap()])).get_config().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn output_equal_to_source_is_rejected() {
        let src = TempDir::new().unwrap();
        let path = src.path().to_str().unwrap();
        let err = CliConfigAdapter::new(cli(&[path, "2", path])).get_config().unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn cli_mode_runs_a_full_batch() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.pdf"), b"doc").unwrap();
        let report = process_cli_mode(cli(&[src.path().to_str().unwrap(), "1", "--no-progress"])).unwrap();
        assert_eq!(report.success_count, 1);
        assert!(src.path().join(DEFAULT_OUTPUT_DIR).join("a_new.pdf").is_file());
    }
}
