//! Shared fixtures for subcommand tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Base64 encoding of `"hello world\n"`.
pub const HELLO_WORLD_BASE64: &str = "aGVsbG8gd29ybGQK";

/// Temporary workspace with UTF-8 paths.
pub struct Workspace {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to allocate temporary directory");
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("temporary directory path is not UTF-8");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Lists the entries directly under the workspace root.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .expect("read workspace")
            .map(|entry| {
                entry
                    .expect("workspace entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
