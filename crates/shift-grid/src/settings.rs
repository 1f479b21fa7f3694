//! Configuration for grid resolution and caching.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the datum shift grid provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Directory against which relative grid file parameters are
    /// resolved. `None` resolves against the working directory.
    pub data_dir: Option<PathBuf>,

    /// Maximum number of grids kept in the cache.
    pub cache_capacity: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            cache_capacity: 32,
        }
    }
}

impl GridSettings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(value) = std::env::var("GRID_DATA_DIR") {
            if !value.is_empty() {
                settings.data_dir = Some(PathBuf::from(value));
            }
        }

        if let Ok(value) = std::env::var("GRID_CACHE_CAPACITY") {
            if let Ok(capacity) = value.parse() {
                settings.cache_capacity = capacity;
            }
        }

        settings
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(GridError::Config(
                "cache_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a grid file parameter: relative paths are joined to the
    /// configured data directory, absolute paths pass through.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_relative() {
            if let Some(dir) = &self.data_dir {
                return dir.join(file);
            }
        }
        file.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GridSettings::default();
        assert_eq!(settings.cache_capacity, 32);
        assert!(settings.data_dir.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let settings = GridSettings {
            data_dir: None,
            cache_capacity: 0,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_resolve() {
        let settings = GridSettings {
            data_dir: Some(PathBuf::from("/data/grids")),
            cache_capacity: 8,
        };
        assert_eq!(
            settings.resolve(Path::new("gr3df97a.txt")),
            PathBuf::from("/data/grids/gr3df97a.txt")
        );
        assert_eq!(
            settings.resolve(Path::new("/tmp/other.txt")),
            PathBuf::from("/tmp/other.txt")
        );

        let bare = GridSettings::default();
        assert_eq!(
            bare.resolve(Path::new("gr3df97a.txt")),
            PathBuf::from("gr3df97a.txt")
        );
    }
}
