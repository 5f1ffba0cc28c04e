//! Vault persistence - `config.json` in the per-user configuration directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::CONFIG_FILE_MODE;
use crate::domain::Credentials;
use crate::errors::{AppError, AppResult};

/// Storage for the credentials record.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ConfigStore: Send + Sync {
    /// Read the stored record. A missing file is an unconfigured vault.
    fn load(&self) -> AppResult<Credentials>;

    /// Replace the stored record.
    fn save(&self, credentials: &Credentials) -> AppResult<()>;
}

/// Load the vault, treating any failure as "unconfigured".
///
/// The error is handed back so the caller can show it.
pub fn load_or_default(store: &dyn ConfigStore) -> (Credentials, Option<AppError>) {
    match store.load() {
        Ok(credentials) => (credentials, None),
        Err(e) => {
            tracing::warn!(code = e.code(), "Vault could not be loaded: {}", e);
            (Credentials::default(), Some(e))
        }
    }
}

/// JSON file implementation of [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> AppResult<Credentials> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No vault file, starting unconfigured");
            return Ok(Credentials::default());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| AppError::config_io(format!("Error loading configuration: {}", e)))?;
        let credentials = serde_json::from_str(&json)
            .map_err(|e| AppError::config_io(format!("Error loading configuration: {}", e)))?;

        tracing::debug!(path = %self.path.display(), "Vault loaded");
        Ok(credentials)
    }

    fn save(&self, credentials: &Credentials) -> AppResult<()> {
        let saving_error = |e: std::io::Error| {
            AppError::config_io(format!("Error saving configuration: {}", e))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(saving_error)?;
            }
        }

        let json = serde_json::to_string(credentials).map_err(|e| {
            AppError::config_io(format!("Error saving configuration: {}", e))
        })?;

        // Write aside, restrict, then swap in
        let tmp_path = self.temp_path();
        {
            let mut file = create_private(&tmp_path).map_err(saving_error)?;
            file.write_all(json.as_bytes()).map_err(saving_error)?;
            file.sync_all().map_err(saving_error)?;
        }
        set_restrictive_permissions(&tmp_path).map_err(saving_error)?;
        fs::rename(&tmp_path, &self.path).map_err(saving_error)?;

        tracing::info!(path = %self.path.display(), "Vault saved");
        Ok(())
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(CONFIG_FILE_MODE)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(CONFIG_FILE_MODE))
}

#[cfg(not(unix))]
fn set_restrictive_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
