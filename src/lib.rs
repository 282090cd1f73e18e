//! Per-application JSON configuration file.
//!
//! A [`ConfigStore`] owns `<home>/<confdir>/<id>/<filename>` and an in-memory
//! mapping of keys to JSON values. Reads and writes only touch memory; the file
//! is rewritten as a whole when [`ConfigStore::save`] is called.

mod storage;
mod store;
mod error;

pub use storage::{sanitize_id, Config, Filesystem, OsFilesystem, DIR_MODE, FILE_MODE};
pub use store::{ConfigStore, SaveHandle};
pub use error::ConfigError;
