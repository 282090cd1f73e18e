use crate::storage::{DEFAULT_CONF_DIR, DEFAULT_FILE_NAME, DIR_MODE, FILE_MODE};

/// Options recognized when opening a [`crate::ConfigStore`].
///
/// Empty names and zero modes count as "not given" and resolve to the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub confdir: String,
    pub dir_mode: u32,
    pub file_mode: u32,
    pub filename: String,
    pub minify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confdir: DEFAULT_CONF_DIR.to_string(),
            dir_mode: DIR_MODE,
            file_mode: FILE_MODE,
            filename: DEFAULT_FILE_NAME.to_string(),
            minify: false,
        }
    }
}

impl Config {
    pub fn with_confdir(mut self, confdir: impl Into<String>) -> Self {
        self.confdir = confdir.into();
        self
    }

    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub(crate) fn confdir(&self) -> &str {
        or_default(&self.confdir, DEFAULT_CONF_DIR)
    }

    pub(crate) fn filename(&self) -> &str {
        or_default(&self.filename, DEFAULT_FILE_NAME)
    }

    pub(crate) fn dir_mode(&self) -> u32 {
        if self.dir_mode == 0 { DIR_MODE } else { self.dir_mode }
    }

    pub(crate) fn file_mode(&self) -> u32 {
        if self.file_mode == 0 { FILE_MODE } else { self.file_mode }
    }
}

fn or_default<'a>(val: &'a str, default: &'a str) -> &'a str {
    if val.is_empty() { default } else { val }
}

#[cfg(test)]
mod test {
    use super::Config;

    #[test]
    fn it_should_have_original_defaults() {
        let conf = Config::default();

        assert_eq!(conf.confdir(), ".config");
        assert_eq!(conf.filename(), "config.json");
        assert_eq!(conf.dir_mode(), 0o700);
        assert_eq!(conf.file_mode(), 0o600);
        assert!(!conf.minify);
    }

    #[test]
    fn it_should_treat_blank_options_as_unset() {
        let conf = Config::default()
            .with_confdir("")
            .with_filename("")
            .with_dir_mode(0)
            .with_file_mode(0);

        assert_eq!(conf.confdir(), ".config");
        assert_eq!(conf.filename(), "config.json");
        assert_eq!(conf.dir_mode(), 0o700);
        assert_eq!(conf.file_mode(), 0o600);
    }

    #[test]
    fn it_should_keep_overrides() {
        let conf = Config::default()
            .with_confdir(".settings")
            .with_filename("prefs.json")
            .with_dir_mode(0o750)
            .with_file_mode(0o640)
            .with_minify(true);

        assert_eq!(conf.confdir(), ".settings");
        assert_eq!(conf.filename(), "prefs.json");
        assert_eq!(conf.dir_mode(), 0o750);
        assert_eq!(conf.file_mode(), 0o640);
        assert!(conf.minify);
    }
}
