use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::encryption::KdfParams;
use super::manager::StorageManager;
use super::repository::{LedgerRepository, RecordRead};

const EXTENSION: &str = "zflo";

/// One encrypted `.zflo` file per user inside a directory (native only).
///
/// Writes go to a temporary sibling first and are renamed into place, so
/// a crash mid-write leaves the previous ledger intact.
pub struct EncryptedFileRepository {
    dir: PathBuf,
    password: String,
    kdf_params: KdfParams,
}

impl std::fmt::Debug for EncryptedFileRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileRepository")
            .field("dir", &self.dir)
            .field("kdf_params", &self.kdf_params)
            .finish_non_exhaustive()
    }
}

impl EncryptedFileRepository {
    /// Open (creating if needed) a repository directory.
    pub fn open(dir: impl AsRef<Path>, password: impl Into<String>) -> Result<Self, CoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            password: password.into(),
            kdf_params: KdfParams::default(),
        })
    }

    /// Override the Argon2id costs used for new writes.
    pub fn with_kdf_params(mut self, kdf_params: KdfParams) -> Self {
        self.kdf_params = kdf_params;
        self
    }

    fn path_for(&self, user_id: &str) -> Result<PathBuf, CoreError> {
        let safe = !user_id.is_empty()
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
            && !user_id.starts_with('.');
        if !safe {
            return Err(CoreError::ValidationError(format!(
                "User id '{user_id}' cannot be used as a file name"
            )));
        }
        Ok(self.dir.join(format!("{user_id}.{EXTENSION}")))
    }
}

impl LedgerRepository for EncryptedFileRepository {
    fn get(&self, user_id: &str) -> Result<RecordRead<Ledger>, CoreError> {
        let path = self.path_for(user_id)?;
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RecordRead::Missing),
            Err(e) => return Err(e.into()),
        };

        match StorageManager::load_from_bytes(&bytes, &self.password) {
            Ok(ledger) if ledger.user_id == user_id => Ok(RecordRead::Valid(ledger)),
            Ok(ledger) => Ok(RecordRead::Corrupt {
                reason: format!("file for '{user_id}' holds ledger of '{}'", ledger.user_id),
            }),
            // wrong password is the caller's problem, not the record's
            Err(CoreError::Decryption) => Err(CoreError::Decryption),
            Err(e @ (CoreError::FileIO(_) | CoreError::Encryption(_))) => Err(e),
            Err(e) => {
                warn!(user_id, error = %e, path = %path.display(), "ledger file is corrupt");
                Ok(RecordRead::Corrupt { reason: e.to_string() })
            }
        }
    }

    fn put(&mut self, ledger: &Ledger) -> Result<(), CoreError> {
        ledger.validate()?;
        let path = self.path_for(&ledger.user_id)?;
        let bytes = StorageManager::save_with_params(ledger, &self.password, self.kdf_params)?;

        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        std::fs::write(&tmp, bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
            }
            return Err(e.into());
        }

        info!(user_id = %ledger.user_id, path = %path.display(), "ledger saved");
        Ok(())
    }

    fn delete(&mut self, user_id: &str) -> Result<bool, CoreError> {
        let path = self.path_for(user_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn user_ids(&self) -> Result<Vec<String>, CoreError> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
