//! Named SQLite databases, opened on first use and kept for the process lifetime.

use super::{init_db, open_existing, Repository};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("invalid database name: {0:?}")]
    InvalidName(String),
    #[error("unknown database: {0:?}")]
    Unknown(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Registry of `<dir>/<name>.db` databases.
pub struct Databases {
    dir: PathBuf,
    default_name: String,
    repos: RwLock<HashMap<String, Arc<Repository>>>,
}

impl Databases {
    pub fn new(dir: impl Into<PathBuf>, default_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_name: default_name.into(),
            repos: RwLock::new(HashMap::new()),
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Repository for `name`, or for the default database when `name` is `None`.
    ///
    /// The default database is created and migrated on first use. Any other
    /// name must already exist as `<dir>/<name>.db`, otherwise
    /// [`DatabaseError::Unknown`] is returned and nothing is created.
    pub async fn repository(&self, name: Option<&str>) -> Result<Arc<Repository>, DatabaseError> {
        let name = name.unwrap_or(&self.default_name);
        validate_database_name(name)?;

        if let Some(repo) = self.repos.read().await.get(name) {
            return Ok(repo.clone());
        }

        let mut repos = self.repos.write().await;
        if let Some(repo) = repos.get(name) {
            return Ok(repo.clone());
        }

        let path = self.dir.join(format!("{}.db", name));
        let pool = if name == self.default_name {
            info!("Opening default database {} at {}", name, path.display());
            init_db(&path.to_string_lossy()).await?
        } else {
            // Overrides only select databases the reward pipeline already wrote.
            if !path.is_file() {
                return Err(DatabaseError::Unknown(name.to_string()));
            }
            info!("Opening database {} at {}", name, path.display());
            open_existing(&path.to_string_lossy()).await?
        };
        let repo = Arc::new(Repository::new(pool));
        repos.insert(name.to_string(), repo.clone());
        Ok(repo)
    }
}

/// Names become file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_database_name(name: &str) -> Result<(), DatabaseError> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DatabaseError::InvalidName(name.to_string()))
    }
}
