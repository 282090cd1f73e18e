use std::io;
use std::path::{Path, PathBuf};

pub use config::Config;
pub use fs_store::OsFilesystem;
pub use utils::sanitize_id;

mod config;
mod fs_store;
mod fs_utils;
pub(crate) mod utils;

pub const DIR_MODE: u32 = 0o700;
pub const FILE_MODE: u32 = 0o600;

pub const DEFAULT_CONF_DIR: &str = ".config";
pub const DEFAULT_FILE_NAME: &str = "config.json";

/// Filesystem access needed by [`crate::ConfigStore`]. `write_file` runs on a
/// save worker thread.
pub trait Filesystem: Send + Sync + 'static {
    fn home_dir(&self) -> Option<PathBuf>;

    /// Recursive mkdir. Only newly created directories get `mode`.
    fn ensure_dir(&self, path: &Path, mode: u32) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn create_file(&self, path: &Path, mode: u32) -> io::Result<()>;

    fn write_file(&self, path: &Path, contents: &str, mode: u32) -> io::Result<()>;

    fn read_file(&self, path: &Path) -> io::Result<String>;
}
