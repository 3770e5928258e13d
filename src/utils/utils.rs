use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use crate::models::conversion::BatchReport;

pub fn setup_logging(log_level: &str) {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    // 測試或重複呼叫時 logger 可能已初始化
    let _ = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init();
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let no_progress = no_progress || total == 0;
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, done: u64, failed: u64) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { done as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("轉換中：失敗 {}，速度：{:.1} 檔案/秒", failed, speed));
        self.pb.set_position(done);
    }

    pub fn finish(&self, report: &BatchReport) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，成功 {} 個，失敗 {} 個",
            report.success_count, report.failure_count
        ));
    }

    /// 暫停進度條輸出日誌，避免訊息被進度條覆蓋
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.pb.suspend(f)
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} 秒", secs)
    }
}

/// 印出批次摘要，失敗的檔案逐行列出以便重新執行
pub fn print_summary(report: &BatchReport) {
    println!("=== 轉換摘要（開始於 {}）===", report.started_at.format("%Y-%m-%d %H:%M:%S"));
    println!("總數：{}", report.item_count());
    println!("成功：{}", report.success_count);
    println!("失敗：{}", report.failure_count);
    println!("總耗時：{}", format_duration(report.total_elapsed));
    println!("平均每檔：{}", format_duration(report.average_per_file));
    println!("實際經過：{}", format_duration(report.wall_clock));
    println!("輸出大小：{}", format_file_size(report.output_bytes));
    if !report.failure_files.is_empty() {
        println!("失敗的檔案：");
        for path in &report.failure_files {
            println!("  {}", path.display());
        }
    }
}
