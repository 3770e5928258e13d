use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use log::{debug, warn};
use crate::service::traits::i_service::DocumentConverter;

/// 逐位元組複製來源檔案，未指定外部轉換程式時使用
pub struct CopyConverter;

impl DocumentConverter for CopyConverter {
    fn convert(&self, source: &Path, destination: &Path) -> io::Result<bool> {
        let copied = fs::copy(source, destination)?;
        debug!("複製 {} 位元組：{} -> {}", copied, source.display(), destination.display());
        Ok(true)
    }
}

/// 以外部程式轉換，呼叫形式為 `program [args..] <source> <destination>`
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandConverter {
            program: program.into(),
            args,
        }
    }
}

impl DocumentConverter for CommandConverter {
    fn convert(&self, source: &Path, destination: &Path) -> io::Result<bool> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(destination)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            warn!(
                "{} 結束狀態 {}：{}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output.status.success())
    }
}
