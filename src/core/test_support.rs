use crate::domain::ports::{ConfigProvider, Storage};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    failing: RefCell<HashSet<PathBuf>>,
}

/// Serves its content, then fails every read after it as a lost device would.
pub struct FailingReader {
    content: Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: Cursor::new(content.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.content.read(buf)? {
            0 => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "disk gone",
            )),
            n => Ok(n),
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), content.as_bytes().to_vec());
        self
    }

    /// Like [`MemoryStorage::with_file`], but reading past `content` fails.
    pub fn with_failing_file(self, path: &str, content: &str) -> Self {
        self.failing.borrow_mut().insert(PathBuf::from(path));
        self.with_file(path, content)
    }

    pub fn get_file(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

impl Storage for MemoryStorage {
    fn open_read(&self, path: &Path) -> std::io::Result<Box<dyn Read>> {
        let files = self.files.borrow();
        let data = files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        if self.failing.borrow().contains(path) {
            return Ok(Box::new(FailingReader {
                content: Cursor::new(data),
            }));
        }
        Ok(Box::new(Cursor::new(data)))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn locate(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

pub struct TestConfig {
    pub catalog_file: String,
    pub roster_file: String,
    pub sales_dir: String,
    pub sales_suffix: String,
    pub report_file: String,
    pub report_header: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            catalog_file: "productos.txt".to_string(),
            roster_file: "vendedores.txt".to_string(),
            sales_dir: "ventas".to_string(),
            sales_suffix: "_ventas.txt".to_string(),
            report_file: "reporte_ventas.txt".to_string(),
            report_header: "name;total".to_string(),
        }
    }
}

impl ConfigProvider for TestConfig {
    fn catalog_file(&self) -> &str {
        &self.catalog_file
    }

    fn roster_file(&self) -> &str {
        &self.roster_file
    }

    fn sales_dir(&self) -> &str {
        &self.sales_dir
    }

    fn sales_suffix(&self) -> &str {
        &self.sales_suffix
    }

    fn report_file(&self) -> &str {
        &self.report_file
    }

    fn report_header(&self) -> &str {
        &self.report_header
    }
}
