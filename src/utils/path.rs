use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use pathdiff::diff_paths;
use crate::error::{ConvertError, Result};

/// 預設加在輸出檔名主檔名後的標記
pub const DEFAULT_SUFFIX: &str = "_new";

/// 計算 `full_path` 相對於 `base_path` 的路徑
///
/// 兩者先轉為絕對路徑；`full_path` 必須在 `base_path` 之下（可以等於 `base_path`，
/// 此時回傳空路徑），否則回傳 `PathResolution`。
pub fn relative_path(full_path: &Path, base_path: &Path) -> Result<PathBuf> {
    let resolution_error = || ConvertError::PathResolution {
        path: full_path.to_path_buf(),
        base: base_path.to_path_buf(),
    };

    let full = normalize_lexically(&std::path::absolute(full_path).map_err(|_| resolution_error())?);
    let base = normalize_lexically(&std::path::absolute(base_path).map_err(|_| resolution_error())?);

    let relative = diff_paths(&full, &base).ok_or_else(resolution_error)?;
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(resolution_error());
    }

    Ok(relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// 在主檔名後加上 `suffix`，若主檔名已以 `suffix` 結尾則不變
///
/// 只檢查主檔名且為字面比對，`report_NEW` 不視為已加標記。
/// 以 `OsStr` 處理，非 UTF-8 的檔名也會原樣保留。
pub fn apply_suffix(file_name: &Path, suffix: &str) -> PathBuf {
    let stem = file_name.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    if !stem.as_encoded_bytes().ends_with(suffix.as_bytes()) {
        name.push(suffix);
    }
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    PathBuf::from(name)
}

/// 不存取檔案系統，去掉 `.` 並以上一層抵銷 `..`
///
/// 根目錄之上的 `..` 直接捨棄，相對路徑開頭無法抵銷的 `..` 保留。
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let can_pop = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir) | Some(Component::Prefix(_)));
                if can_pop {
                    normalized.pop();
                } else if !at_root {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// 由來源檔案推導輸出路徑，保留來源根目錄下的子目錄結構，並確保上層目錄存在
pub fn output_path_for(source_path: &Path, source_root: &Path, output_root: &Path, suffix: &str) -> Result<PathBuf> {
    let relative = relative_path(source_path, source_root)?;
    let file_name = relative.file_name().ok_or_else(|| ConvertError::PathResolution {
        path: source_path.to_path_buf(),
        base: source_root.to_path_buf(),
    })?;

    let mut destination = output_root.join(&relative);
    destination.set_file_name(apply_suffix(Path::new(file_name), suffix));

    if let Some(parent) = destination.parent() {
        ensure_dir(parent)?;
    }
    Ok(destination)
}

/// 建立目錄（含上層），多個執行緒同時建立同一目錄時視為成功
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}
