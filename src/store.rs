use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::storage::utils::build_storage_dir;
use crate::storage::{sanitize_id, Config, Filesystem, OsFilesystem};

/// Per-application JSON config file with an in-memory working copy.
///
/// The mapping always starts empty on `open`, see [`ConfigStore::load`] for the
/// reading variant. Saves still in flight are joined when the store is dropped.
#[derive(Debug)]
pub struct ConfigStore<F: Filesystem = OsFilesystem> {
    id: String,
    dir: PathBuf,
    path: PathBuf,
    file_mode: u32,
    minify: bool,
    data: Map<String, Value>,
    fs: Arc<F>,
    pending: Vec<JoinHandle<()>>,
}

impl ConfigStore<OsFilesystem> {
    pub fn open(id: &str, conf: Config) -> Result<Self, ConfigError> {
        Self::open_with(id, conf, Arc::new(OsFilesystem::new()))
    }

    pub fn load(id: &str, conf: Config) -> Result<Self, ConfigError> {
        Self::load_with(id, conf, Arc::new(OsFilesystem::new()))
    }
}

impl<F: Filesystem> ConfigStore<F> {
    /// An existing file is left untouched and is not read.
    pub fn open_with(id: &str, conf: Config, fs: Arc<F>) -> Result<Self, ConfigError> {
        let id = sanitize_id(id);
        let home = fs.home_dir().ok_or(ConfigError::NoHomeDir)?;
        let dir = build_storage_dir(home, conf.confdir(), &id);
        if id.is_empty() || id == "." {
            let source = io::Error::new(io::ErrorKind::InvalidInput, format!("unusable identifier `{}`", id));
            return Err(ConfigError::Initialization { path: dir, source });
        }

        fs.ensure_dir(&dir, conf.dir_mode())
            .map_err(|source| ConfigError::Initialization { path: dir.clone(), source })?;

        let path = dir.join(conf.filename());
        if !fs.exists(&path) {
            fs.create_file(&path, conf.file_mode())
                .map_err(|source| ConfigError::Initialization { path: path.clone(), source })?;
        }

        debug!("config store `{}` ready at {}", id, path.display());

        Ok(ConfigStore {
            id,
            dir,
            path,
            file_mode: conf.file_mode(),
            minify: conf.minify,
            data: Map::new(),
            fs,
            pending: Vec::new(),
        })
    }

    /// A blank file counts as an empty object.
    pub fn load_with(id: &str, conf: Config, fs: Arc<F>) -> Result<Self, ConfigError> {
        let mut store = Self::open_with(id, conf, fs)?;

        let text = store.fs.read_file(&store.path)
            .map_err(|source| ConfigError::Read { path: store.path.clone(), source })?;
        if !text.trim().is_empty() {
            store.data = serde_json::from_str(&text)
                .map_err(|source| ConfigError::Parse { path: store.path.clone(), source })?;
        }

        debug!("loaded {} keys from {}", store.data.len(), store.path.display());
        Ok(store)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_minified(&self) -> bool {
        self.minify
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// `None` means the key was never set; a stored null is `Some(Value::Null)`.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ConfigError> {
        check_key("get", key)?;
        Ok(self.data.get(key))
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        check_key("get_as", key)?;
        match self.data.get(key) {
            None => Ok(None),
            Some(val) => serde_json::from_value(val.clone())
                .map(Some)
                .map_err(|source| ConfigError::Type { key: key.to_string(), source }),
        }
    }

    pub fn set<V>(&mut self, key: &str, val: V, should_save: bool) -> Result<Option<SaveHandle>, ConfigError>
        where V: Into<Value> {
        check_key("set", key)?;
        self.data.insert(key.to_string(), val.into());
        Ok(self.save_if(should_save))
    }

    pub fn del(&mut self, key: &str, should_save: bool) -> Result<Option<SaveHandle>, ConfigError> {
        check_key("del", key)?;
        self.data.shift_remove(key);
        Ok(self.save_if(should_save))
    }

    pub fn delete_all(&mut self, should_save: bool) -> Option<SaveHandle> {
        self.data = Map::new();
        self.save_if(should_save)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        let text = if self.minify {
            serde_json::to_string(&self.data)?
        } else {
            serde_json::to_string_pretty(&self.data)?
        };
        Ok(text)
    }

    /// Overwrites the config file on a worker thread. Overlapping saves are not
    /// ordered: whichever write finishes last decides the file content.
    pub fn save(&mut self) -> SaveHandle {
        let (tx, rx) = channel::bounded(1);
        self.pending.retain(|worker| !worker.is_finished());

        let text = match self.to_json() {
            Ok(text) => text,
            Err(e) => {
                let _ = tx.send(Err(e));
                return SaveHandle { rx };
            }
        };

        let fs = Arc::clone(&self.fs);
        let path = self.path.clone();
        let mode = self.file_mode;
        let worker = thread::spawn(move || {
            let result = fs.write_file(&path, &text, mode)
                .map_err(|source| ConfigError::Persistence { path: path.clone(), source });
            match &result {
                Ok(()) => debug!("saved {} bytes to {}", text.len(), path.display()),
                Err(e) => warn!("{}", e),
            }
            // receiver may be gone; the write still happened
            let _ = tx.send(result);
        });
        self.pending.push(worker);

        SaveHandle { rx }
    }

    fn save_if(&mut self, should_save: bool) -> Option<SaveHandle> {
        if should_save { Some(self.save()) } else { None }
    }
}

impl<F: Filesystem> Drop for ConfigStore<F> {
    fn drop(&mut self) {
        for worker in self.pending.drain(..) {
            if worker.join().is_err() {
                warn!("save worker for {} panicked", self.path.display());
            }
        }
    }
}

/// Completion signal of a [`ConfigStore::save`]. Dropping it does not cancel
/// the write; the owning store still waits for it.
#[derive(Debug)]
#[must_use = "a save reports its failure only through its handle"]
pub struct SaveHandle {
    rx: Receiver<Result<(), ConfigError>>,
}

impl SaveHandle {
    pub fn wait(self) -> Result<(), ConfigError> {
        self.rx.recv().unwrap_or(Err(ConfigError::WorkerGone))
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<(), ConfigError>> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(ConfigError::WorkerGone)),
        }
    }

    /// `None` while the write is in flight.
    pub fn try_wait(&self) -> Option<Result<(), ConfigError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConfigError::WorkerGone)),
        }
    }
}

fn check_key(method: &'static str, key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidKey { method });
    }
    Ok(())
}
