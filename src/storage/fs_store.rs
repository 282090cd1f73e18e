use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::storage::fs_utils::{create_dir_all_with_mode, create_empty_file, overwrite_file, read_to_string};
use crate::storage::Filesystem;

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct OsFilesystem {
    home: Option<PathBuf>,
}

impl OsFilesystem {
    /// Resolves the home directory of the current user on every call.
    pub fn new() -> Self {
        Self { home: None }
    }

    /// Uses `home` instead of the user's home directory.
    pub fn with_home<P>(home: P) -> Self where P: Into<PathBuf> {
        Self { home: Some(home.into()) }
    }
}

impl Filesystem for OsFilesystem {
    fn home_dir(&self) -> Option<PathBuf> {
        match &self.home {
            Some(home) => Some(home.clone()),
            None => dirs::home_dir(),
        }
    }

    fn ensure_dir(&self, path: &Path, mode: u32) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        debug!("creating directory {} (mode {:o})", path.display(), mode);
        create_dir_all_with_mode(path, mode)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<()> {
        debug!("creating empty file {} (mode {:o})", path.display(), mode);
        create_empty_file(path, mode)
    }

    fn write_file(&self, path: &Path, contents: &str, mode: u32) -> io::Result<()> {
        overwrite_file(path, contents.as_bytes(), mode)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        read_to_string(path)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempdir::TempDir;

    use crate::storage::Filesystem;

    use super::OsFilesystem;

    #[test]
    fn it_should_prefer_pinned_home() {
        let dir = TempDir::new("xcfg-").unwrap();
        let fs = OsFilesystem::with_home(dir.path());

        assert_eq!(fs.home_dir().unwrap(), dir.path());
    }

    #[test]
    fn it_should_write_then_read() {
        // given
        let dir = TempDir::new("xcfg-").unwrap();
        let fs = OsFilesystem::with_home(dir.path());
        let path = dir.path().join("x").join("config.json");

        // when
        fs.ensure_dir(path.parent().unwrap(), 0o700).unwrap();
        assert!(!fs.exists(&path));
        fs.create_file(&path, 0o600).unwrap();
        fs.write_file(&path, "{\"k\":\"v\"}", 0o600).unwrap();

        // then
        assert!(fs.exists(&path));
        assert_eq!(fs.read_file(&path).unwrap(), "{\"k\":\"v\"}");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"k\":\"v\"}");
    }
}
