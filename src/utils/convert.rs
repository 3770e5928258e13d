use log::info;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::Result;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::BatchReport;
use crate::models::file::FileCollectInput;
use crate::service::converter::{CommandConverter, CopyConverter};
use crate::service::file::FileService;
use crate::service::traits::i_service::{DocumentConverter, FileServiceTrait};
use crate::utils::path::normalize_lexically;

/// 一次完整的批次執行：掃描、轉換、彙總
pub struct ConversionAdapter {
    file_service: Box<dyn FileServiceTrait>,
}

impl ConversionAdapter {
    pub fn new() -> Self {
        ConversionAdapter {
            file_service: Box::new(FileService::new()),
        }
    }

    fn build_converter(config: &AppConfig) -> Box<dyn DocumentConverter> {
        match &config.command {
            Some(program) => {
                info!("使用外部轉換程式：{} {:?}", program, config.command_args);
                Box::new(CommandConverter::new(program.clone(), config.command_args.clone()))
            }
            None => {
                info!("未指定轉換程式，直接複製檔案");
                Box::new(CopyConverter)
            }
        }
    }
}

impl Default for ConversionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> Result<BatchReport> {
        let mut collect_input = FileCollectInput::new(&config.source_root, &config.extension);
        let source_root = normalize_lexically(&config.source_root);
        let output_root = normalize_lexically(&config.output_root);
        if output_root.starts_with(&source_root) && output_root != source_root {
            collect_input.exclude_dirs.push(output_root);
        }
        let collected = self.file_service.collect_files(collect_input)?;

        let facade = ConversionFacade::new(&config.output_root, Self::build_converter(&config))?
            .with_suffix(config.suffix.clone())
            .with_progress(!config.no_progress);

        if config.sequential {
            facade.run_sequential(&collected.files, &config.source_root)
        } else {
            facade.run_parallel(&collected.files, &config.source_root, config.max_concurrency)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use crate::error::ConvertError;

    fn config(source_root: &Path, output_root: &Path) -> AppConfig {
        AppConfig {
            source_root: source_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            max_concurrency: 2,
            extension: "pdf".to_string(),
            suffix: "_new".to_string(),
            command: None,
            command_args: Vec::new(),
            sequential: false,
            no_progress: true,
        }
    }

    #[test]
    fn copies_into_nested_default_output_without_rescanning_it() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.pdf"), b"one").unwrap();
        let output_root = src.path().join("output");

        let adapter = ConversionAdapter::new();
        let report = adapter.execute(config(src.path(), &output_root)).unwrap();
        assert_eq!(report.success_count, 1);
        assert_eq!(fs::read(output_root.join("a_new.pdf")).unwrap(), b"one");

        // 第二次執行不會把上次的輸出當成來源
        let report = adapter.execute(config(src.path(), &output_root)).unwrap();
        assert_eq!(report.item_count(), 1);
        assert!(!output_root.join("output").exists());
    }

    #[test]
    fn output_root_with_parent_components_is_still_excluded() {
        let src = TempDir::new().unwrap();
        fs::create_dir(src.path().join("x")).unwrap();
        fs::write(src.path().join("a.pdf"), b"one").unwrap();
        let output_root = src.path().join("x").join("..").join("output");

        let adapter = ConversionAdapter::new();
        adapter.execute(config(src.path(), &output_root)).unwrap();
        let report = adapter.execute(config(src.path(), &output_root)).unwrap();

        assert_eq!(report.item_count(), 1);
        assert!(src.path().join("output").join("a_new.pdf").is_file());
        assert!(!src.path().join("output").join("output").exists());
    }

    #[test]
    fn missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = ConversionAdapter::new()
            .execute(config(&tmp.path().join("missing"), &tmp.path().join("out")))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, ConvertError::RootNotFound { .. }));
    }

    #[test]
    fn sequential_mode_is_honoured() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir(src.path().join("sub")).unwrap();
        fs::write(src.path().join("sub").join("b.PDF"), b"two").unwrap();

        let mut cfg = config(src.path(), out.path());
        cfg.sequential = true;
        let report = ConversionAdapter::new().execute(cfg).unwrap();
        assert_eq!(report.success_count, 1);
        assert!(out.path().join("sub").join("b_new.PDF").is_file());
    }
}
