use std::fs;
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};

pub(crate) fn create_dir_all_with_mode<P>(path: P, mode: u32) -> std::io::Result<()> where P: AsRef<Path> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}

pub(crate) fn create_empty_file<P>(path: P, mode: u32) -> std::io::Result<()> where P: AsRef<Path> {
    let _file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .with_mode(mode)
        .open(path)?;

    Ok(())
}

pub(crate) fn overwrite_file<P>(path: P, contents: &[u8], mode: u32) -> std::io::Result<()> where P: AsRef<Path> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .with_mode(mode)
        .open(path)?;

    file.write_all(contents)?;
    file.flush()?;
    set_mode(&file, mode)
}

pub(crate) fn read_to_string<P>(path: P) -> std::io::Result<String> where P: AsRef<Path> {
    fs::read_to_string(path)
}

trait WithMode {
    fn with_mode(&mut self, mode: u32) -> &mut Self;
}

impl WithMode for OpenOptions {
    #[cfg(unix)]
    fn with_mode(&mut self, mode: u32) -> &mut Self {
        self.mode(mode)
    }

    #[cfg(not(unix))]
    fn with_mode(&mut self, _mode: u32) -> &mut Self {
        self
    }
}

#[cfg(unix)]
fn set_mode(file: &fs::File, mode: u32) -> std::io::Result<()> {
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &fs::File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
