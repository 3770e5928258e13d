use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FileCollectInput {
    pub root: PathBuf,
    /// 副檔名過濾，可含或不含開頭的 `.`，比對不分大小寫
    pub extension: String,
    /// 不掃描的子樹，例如位於來源目錄內的輸出目錄
    pub exclude_dirs: Vec<PathBuf>,
}

impl FileCollectInput {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        FileCollectInput {
            root: root.into(),
            extension: extension.into(),
            exclude_dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
    pub skipped_dirs: u64,
}
