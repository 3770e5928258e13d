use std::any::Any;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use crossbeam::channel::bounded;
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use crate::error::{ConvertError, Result};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{BatchReport, ConversionOutcome};
use crate::service::traits::i_service::DocumentConverter;
use crate::utils::aggregate::ResultAggregator;
use crate::utils::path::{ensure_dir, output_path_for, DEFAULT_SUFFIX};
use crate::utils::utils::{format_duration, ProgressManager};

/// 批次轉換的調度者
///
/// 只持有轉換器與輸出設定，每次呼叫的結果不會保留，可重複使用。
/// 轉換器卡住時會一直佔用一個執行緒，沒有逾時或取消機制。
pub struct ConversionFacade {
    converter: Box<dyn DocumentConverter>,
    output_root: PathBuf,
    suffix: String,
    no_progress: bool,
}

impl ConversionFacade {
    /// 建立調度者，輸出根目錄不存在時會建立
    pub fn new(output_root: impl Into<PathBuf>, converter: Box<dyn DocumentConverter>) -> Result<Self> {
        let output_root = output_root.into();
        ensure_dir(&output_root)?;
        Ok(ConversionFacade {
            converter,
            output_root,
            suffix: DEFAULT_SUFFIX.to_string(),
            no_progress: true,
        })
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.no_progress = !show_progress;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// 轉換單一檔案，任何錯誤都轉為失敗結果而不往外傳
    fn convert_one(&self, source: &Path, source_root: &Path) -> ConversionOutcome {
        let started = Instant::now();
        let source_path = source.to_path_buf();

        if !source.exists() {
            let err = ConvertError::SourceMissing { path: source_path.clone() };
            return ConversionOutcome::failure(source_path, None, started.elapsed(), err);
        }

        let destination = match output_path_for(source, source_root, &self.output_root, &self.suffix) {
            Ok(destination) => destination,
            Err(err @ ConvertError::PathResolution { .. }) => {
                return ConversionOutcome::failure(source_path, None, started.elapsed(), err);
            }
            Err(err) => {
                let err = ConvertError::conversion(source, err);
                return ConversionOutcome::failure(source_path, None, started.elapsed(), err);
            }
        };

        // 輸出檔是否存在只反映本次轉換
        if let Err(e) = remove_stale_output(&destination) {
            let err = ConvertError::conversion(source, format!("無法移除舊的輸出檔：{}", e));
            return ConversionOutcome::failure(source_path, Some(destination), started.elapsed(), err);
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(source, &destination)));
        let elapsed = started.elapsed();

        let reason = match result {
            Ok(Ok(true)) => match fs::metadata(&destination) {
                Ok(meta) => {
                    return ConversionOutcome::success(source_path, destination, elapsed, Some(meta.len()));
                }
                Err(_) => "轉換器回報成功，但沒有產生輸出檔".to_string(),
            },
            Ok(Ok(false)) => "轉換器回報失敗".to_string(),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("轉換器異常中止：{}", panic_message(payload.as_ref())),
        };

        let err = ConvertError::conversion(source, reason);
        ConversionOutcome::failure(source_path, Some(destination), elapsed, err)
    }

    /// 輸出進度並將結果併入彙總
    fn track(&self, pm: &ProgressManager, aggregator: &mut ResultAggregator, total: usize, outcome: ConversionOutcome) {
        let done = aggregator.item_count() + 1;
        pm.suspend(|| match (&outcome.output_path, &outcome.error) {
            (Some(destination), None) => info!(
                "[{}/{}] {} -> {}（{}）",
                done,
                total,
                outcome.source_path.display(),
                destination.display(),
                format_duration(outcome.elapsed)
            ),
            (_, Some(err)) => warn!("[{}/{}] {}", done, total, err),
            (None, None) => warn!("[{}/{}] {} 失敗", done, total, outcome.source_path.display()),
        });
        aggregator.push(outcome);
        pm.update(aggregator.item_count() as u64, aggregator.failure_count() as u64);
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn run_sequential(&self, source_paths: &[PathBuf], source_root: &Path) -> Result<BatchReport> {
        let started = Instant::now();
        let total = source_paths.len();
        info!("依序轉換 {} 個檔案，輸出目錄：{}", total, self.output_root.display());

        let pm = ProgressManager::new(total as u64, self.no_progress);
        let mut aggregator = ResultAggregator::new();
        for source in source_paths {
            let outcome = self.convert_one(source, source_root);
            self.track(&pm, &mut aggregator, total, outcome);
        }

        let report = aggregator.finish(started.elapsed());
        pm.finish(&report);
        Ok(report)
    }

    fn run_parallel(&self, source_paths: &[PathBuf], source_root: &Path, max_concurrency: usize) -> Result<BatchReport> {
        let workers = max_concurrency.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("convert-worker-{}", i))
            .build()
            .map_err(|e| ConvertError::Config(format!("無法建立執行緒池：{}", e)))?;

        let started = Instant::now();
        let total = source_paths.len();
        info!(
            "平行轉換 {} 個檔案，最多同時 {} 個，輸出目錄：{}",
            total,
            workers,
            self.output_root.display()
        );

        let pm = ProgressManager::new(total as u64, self.no_progress);
        let (tx, rx) = bounded::<ConversionOutcome>(workers * 2);

        // 執行緒池只有 workers 條執行緒，同時進行的轉換不會超過此數；
        // 結果經由 channel 交給單一收集執行緒累計
        let aggregator = thread::scope(|s| {
            let pm = &pm;
            let collector = s.spawn(move || {
                let mut aggregator = ResultAggregator::new();
                for outcome in rx {
                    self.track(pm, &mut aggregator, total, outcome);
                }
                aggregator
            });

            pool.install(|| {
                source_paths.par_iter().for_each_with(tx, |tx, source| {
                    let outcome = self.convert_one(source, source_root);
                    if tx.send(outcome).is_err() {
                        warn!("收集執行緒已結束，結果遺失：{}", source.display());
                    }
                });
            });

            collector.join().unwrap_or_else(|payload| panic::resume_unwind(payload))
        });

        let report = aggregator.finish(started.elapsed());
        pm.finish(&report);
        Ok(report)
    }
}

fn remove_stale_output(destination: &Path) -> io::Result<()> {
    match fs::remove_file(destination) {
        Ok(()) => {
            debug!("移除舊的輸出檔：{}", destination.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "未知錯誤".to_string()
    }
}
