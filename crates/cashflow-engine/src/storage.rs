use std::{collections::BTreeMap, sync::Mutex};

use cashflow_domain::{AccountBook, OwnerId};

use crate::CoreError;

/// Abstraction over persistence backends holding one [`AccountBook`] per owner.
pub trait AccountStorage: Send + Sync {
    /// Loads the owner's book, or `CoreError::AccountNotFound` when none exists.
    fn load_account(&self, owner: &OwnerId) -> Result<AccountBook, CoreError>;
    /// Replaces the stored book as one commit.
    fn save_account(&self, book: &AccountBook) -> Result<(), CoreError>;
    fn list_owners(&self) -> Result<Vec<OwnerId>, CoreError>;
    fn delete_account(&self, owner: &OwnerId) -> Result<(), CoreError>;
}

/// Loads `owner`'s book, starting an empty one when nothing is stored yet.
pub fn load_or_new(
    storage: &dyn AccountStorage,
    owner: &OwnerId,
) -> Result<AccountBook, CoreError> {
    match storage.load_account(owner) {
        Ok(book) => Ok(book),
        Err(CoreError::AccountNotFound(_)) => Ok(AccountBook::new(owner.clone())),
        Err(err) => Err(err),
    }
}

/// Process-local storage, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryAccountStorage {
    books: Mutex<BTreeMap<OwnerId, AccountBook>>,
}

impl InMemoryAccountStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<OwnerId, AccountBook>>, CoreError> {
        self.books
            .lock()
            .map_err(|_| CoreError::Storage("in-memory storage lock poisoned".into()))
    }
}

impl AccountStorage for InMemoryAccountStorage {
    fn load_account(&self, owner: &OwnerId) -> Result<AccountBook, CoreError> {
        self.lock()?
            .get(owner)
            .cloned()
            .ok_or_else(|| CoreError::AccountNotFound(owner.to_string()))
    }

    fn save_account(&self, book: &AccountBook) -> Result<(), CoreError> {
        self.lock()?.insert(book.owner.clone(), book.clone());
        Ok(())
    }

    fn list_owners(&self) -> Result<Vec<OwnerId>, CoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn delete_account(&self, owner: &OwnerId) -> Result<(), CoreError> {
        self.lock()?
            .remove(owner)
            .map(|_| ())
            .ok_or_else(|| CoreError::AccountNotFound(owner.to_string()))
    }
}
