use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use warden_application::SessionStore;
use warden_core::{AppError, AppResult};

#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Session store persisting keys as one JSON object on disk.
///
/// The file is rewritten in full on every change. A missing file is an empty
/// store; an unreadable one is logged and treated as empty so that a logout
/// can always clear it.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by the given file. Parent directories are
    /// created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    async fn load(&self) -> AppResult<BTreeMap<String, String>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read session file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_slice(&contents) {
            Ok(values) => Ok(values),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    error = %error,
                    "session file is unreadable; ignoring it"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create session directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_vec_pretty(values)
            .map_err(|error| AppError::Internal(format!("failed to encode session: {error}")))?;
        write_owner_only(&self.path, &contents)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write session file '{}': {error}",
                    self.path.display()
                ))
            })
    }
}

/// Writes the file readable by its owner only, tightening an existing file.
async fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(SESSION_FILE_MODE);

    let mut file = options.open(path).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(SESSION_FILE_MODE))
            .await?;
    }
    file.write_all(contents).await?;
    file.flush().await
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_owned(), value.to_owned());
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_none() {
            return Ok(());
        }

        self.save(&values).await
    }
}
