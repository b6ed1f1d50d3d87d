//! cashflow-storage-json
//!
//! Filesystem-backed [`AccountStorage`]: one pretty-printed JSON file per
//! owner, replaced atomically, with a rolling set of backups of the previous
//! version.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use cashflow_domain::{AccountBook, OwnerId};
use cashflow_engine::{storage::AccountStorage, CoreError};
use chrono::Utc;
use tracing::{debug, warn};

const ACCOUNT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Directory layout used by [`JsonAccountStorage`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub account_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    /// `accounts/` and `backups/` below a single data directory.
    pub fn under(data_root: &Path) -> Self {
        Self {
            account_root: data_root.join("accounts"),
            backup_root: data_root.join("backups"),
        }
    }
}

/// Describes one backup file of an owner's book.
#[derive(Debug, Clone)]
pub struct AccountBackupInfo {
    /// Canonical file stem of the owner the backup belongs to.
    pub account: String,
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JsonAccountStorage {
    paths: StoragePaths,
    retention: usize,
}

impl JsonAccountStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.account_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            paths,
            retention: retention.max(1),
        })
    }

    pub fn account_path(&self, owner: &OwnerId) -> PathBuf {
        self.paths
            .account_root
            .join(format!("{}.{}", canonical_name(owner.as_str()), ACCOUNT_EXTENSION))
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Backups for `owner`, newest first.
    pub fn list_backups(&self, owner: &OwnerId) -> Result<Vec<AccountBackupInfo>, CoreError> {
        let account = canonical_name(owner.as_str());
        let dir = self.backup_dir(&account);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ACCOUNT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(AccountBackupInfo {
                    account: account.clone(),
                    id: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        // Fixed-width timestamps sort chronologically as text.
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    /// Copies `backup` over the live file and returns the restored book.
    pub fn restore_backup(&self, backup: &AccountBackupInfo) -> Result<AccountBook, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self
            .paths
            .account_root
            .join(format!("{}.{}", backup.account, ACCOUNT_EXTENSION));
        let book = load_account_from_path(&backup.path)?;
        self.backup_existing_file(&backup.account, &target)?;
        save_account_to_path(&book, &target)?;
        Ok(book)
    }

    fn backup_dir(&self, account: &str) -> PathBuf {
        self.paths.backup_root.join(account)
    }

    fn backup_existing_file(&self, account: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(account);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = dir.join(format!("{account}_{timestamp}.{ACCOUNT_EXTENSION}"));
        fs::copy(path, &backup_path)?;
        debug!(backup = %backup_path.display(), "backed up previous account file");
        self.prune_backups(&dir)
    }

    fn prune_backups(&self, dir: &Path) -> Result<(), CoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(ACCOUNT_EXTENSION) {
                names.push(path);
            }
        }
        names.sort_by_key(|path| Reverse(path.file_name().map(|name| name.to_os_string())));
        for stale in names.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale) {
                warn!(path = %stale.display(), error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl AccountStorage for JsonAccountStorage {
    fn load_account(&self, owner: &OwnerId) -> Result<AccountBook, CoreError> {
        let path = self.account_path(owner);
        if !path.exists() {
            return Err(CoreError::AccountNotFound(owner.to_string()));
        }
        let book = load_account_from_path(&path)?;
        if &book.owner != owner {
            return Err(CoreError::OwnerMismatch {
                expected: owner.to_string(),
                found: book.owner.to_string(),
            });
        }
        Ok(book)
    }

    fn save_account(&self, book: &AccountBook) -> Result<(), CoreError> {
        let path = self.account_path(&book.owner);
        self.backup_existing_file(&canonical_name(book.owner.as_str()), &path)?;
        save_account_to_path(book, &path)
    }

    fn list_owners(&self) -> Result<Vec<OwnerId>, CoreError> {
        if !self.paths.account_root.exists() {
            return Ok(Vec::new());
        }
        let mut owners = Vec::new();
        for entry in fs::read_dir(&self.paths.account_root)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(ACCOUNT_EXTENSION)
            {
                continue;
            }
            match load_account_from_path(&path) {
                Ok(book) => owners.push(book.owner),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable account file"
                ),
            }
        }
        owners.sort();
        Ok(owners)
    }

    fn delete_account(&self, owner: &OwnerId) -> Result<(), CoreError> {
        let path = self.account_path(owner);
        if !path.exists() {
            return Err(CoreError::AccountNotFound(owner.to_string()));
        }
        self.backup_existing_file(&canonical_name(owner.as_str()), &path)?;
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Writes a book to an arbitrary path via a temporary sibling file and rename.
pub fn save_account_to_path(book: &AccountBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_file(&tmp, &serialize_account(book)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_account_from_path(path: &Path) -> Result<AccountBook, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "account".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn serialize_account(book: &AccountBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_filesystem_safe() {
        assert_eq!(canonical_name("Alice Smith"), "alice_smith");
        assert_eq!(canonical_name("bob-2"), "bob-2");
        assert_eq!(canonical_name("../"), "account");
    }

    #[test]
    fn tmp_path_keeps_original_extension() {
        let tmp = tmp_path(Path::new("/data/accounts/alice.json"));
        assert_eq!(tmp, PathBuf::from("/data/accounts/alice.json.tmp"));
    }
}
