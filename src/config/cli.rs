use crate::core::Storage;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Reads and writes files relative to a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn open_read(&self, path: &Path) -> std::io::Result<Box<dyn Read>> {
        let file = File::open(self.locate(path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    /// Writes to a temporary sibling first and renames it over the target,
    /// so a failed write never leaves a half-written file behind.
    fn write_file(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        let full_path = self.locate(path);
        let file_name = full_path.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("'{}' is not a file path", full_path.display()),
            )
        })?;

        let parent = full_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let tmp_path = parent.join(format!(
            ".{}.tmp.{}",
            file_name.to_string_lossy(),
            std::process::id()
        ));

        let written = File::create(&tmp_path).and_then(|mut tmp| {
            tmp.write_all(data)?;
            tmp.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, &full_path)) {
            // 清理暫存檔，保留原本的錯誤
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }

    fn locate(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}
