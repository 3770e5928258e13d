use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// 批次轉換過程中可能發生的錯誤
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 來源根目錄不存在或不是目錄，整個批次無法執行
    #[error("來源根目錄 '{}' 不存在或不是目錄", path.display())]
    RootNotFound { path: PathBuf },

    /// 掃描時無法讀取某個子目錄，該子樹會被跳過
    #[error("無法讀取目錄 '{}'：{reason}", path.display())]
    DirectoryAccess { path: PathBuf, reason: String },

    /// 檔案路徑不在宣稱的根目錄之下
    #[error("路徑 '{}' 不在根目錄 '{}' 之下", path.display(), base.display())]
    PathResolution { path: PathBuf, base: PathBuf },

    /// 轉換前來源檔案已不存在
    #[error("來源檔案 '{}' 不存在", path.display())]
    SourceMissing { path: PathBuf },

    /// 轉換器回報失敗、拋出錯誤，或宣稱成功卻沒有產生輸出
    #[error("轉換 '{}' 失敗：{reason}", path.display())]
    Conversion { path: PathBuf, reason: String },

    #[error("設定錯誤：{0}")]
    Config(String),

    #[error("I/O 錯誤：{0}")]
    Io(#[from] io::Error),
}

impl ConvertError {
    /// 只有結構性錯誤會中止整個程式
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConvertError::RootNotFound { .. } | ConvertError::Config(_) | ConvertError::Io(_)
        )
    }

    pub fn conversion(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::Conversion {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
