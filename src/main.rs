use std::process::ExitCode;

use batch_convert::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(Some(report)) => {
            log::info!("程式執行完成，成功 {} 個，失敗 {} 個", report.success_count, report.failure_count);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("轉換中止：{}", e);
            ExitCode::FAILURE
        }
    }
}
