use std::io;
use std::path::Path;
use crate::error::Result;
use crate::models::file::{FileCollectInput, FileCollectOutput};

// File 服務接口，負責掃描來源目錄
pub trait FileServiceTrait: Send + Sync {
    /// 收集根目錄下符合副檔名的檔案
    /// # 參數
    /// - input: 根目錄、副檔名與排除的子樹
    /// # 回傳
    /// - 成功時返回檔案列表與跳過的目錄數；根目錄不存在時返回 `RootNotFound`
    fn collect_files(&self, input: FileCollectInput) -> Result<FileCollectOutput>;
}

// 單檔轉換器接口，實作須可由多個執行緒同時呼叫（各自使用不同的輸出路徑）
pub trait DocumentConverter: Send + Sync {
    /// 將 `source` 轉換後寫入 `destination`
    /// # 回傳
    /// - `Ok(true)` 表示轉換器回報成功，`Ok(false)` 或 `Err` 皆視為失敗
    fn convert(&self, source: &Path, destination: &Path) -> io::Result<bool>;
}

impl<F> DocumentConverter for F
where
    F: Fn(&Path, &Path) -> io::Result<bool> + Send + Sync,
{
    fn convert(&self, source: &Path, destination: &Path) -> io::Result<bool> {
        self(source, destination)
    }
}
