//! INI file configuration adapter.

use crate::domain::error::FluxbackError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl Default for FileConfigAdapter {
    /// An empty configuration: every setting takes its default.
    fn default() -> Self {
        Self { config: Ini::new() }
    }
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FluxbackError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| FluxbackError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_u64(&self, section: &str, key: &str, default: u64) -> Result<u64, FluxbackError> {
        match self.config.getuint(section, key) {
            Ok(value) => Ok(value.unwrap_or(default)),
            Err(reason) => Err(FluxbackError::ConfigInvalid {
                section: section.into(),
                key: key.into(),
                reason,
            }),
        }
    }
}
