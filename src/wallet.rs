//! Chip balance persistence.
//!
//! A [`Wallet`] keeps the balance in memory and writes it through a
//! [`WalletStore`] after every change, so the stored value never lags behind
//! the game. Stores only deal in a single scalar; a missing or unreadable
//! value is reported as `None` and the wallet falls back to its default.

extern crate alloc;

use alloc::string::{String, ToString};
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::sync::Shared;

/// Key under which the balance is kept when no other key is given.
pub const DEFAULT_WALLET_KEY: &str = "blackjack_chips";

/// Durable storage for the chip balance.
pub trait WalletStore {
    /// Reads the persisted balance, or `None` if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn load(&self) -> Result<Option<usize>, StoreError>;

    /// Persists the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&mut self, balance: usize) -> Result<(), StoreError>;
}

impl<S: WalletStore + ?Sized> WalletStore for alloc::boxed::Box<S> {
    fn load(&self) -> Result<Option<usize>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, balance: usize) -> Result<(), StoreError> {
        (**self).save(balance)
    }
}

fn parse_balance(text: &str) -> Option<usize> {
    let parsed = text.trim().parse().ok();
    if parsed.is_none() {
        log::warn!("ignoring unreadable wallet value {text:?}");
    }
    parsed
}

/// An in-memory key-value store.
///
/// Clones share the same entries, so a handle kept outside the game sees
/// every write the game makes. Values are kept as text, the way a browser's
/// local storage would hold them.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    key: String,
    entries: Shared<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store using [`DEFAULT_WALLET_KEY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_key(DEFAULT_WALLET_KEY)
    }

    /// Creates an empty store that keeps the balance under `key`.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Shared::new(HashMap::new()),
        }
    }

    /// Returns a handle to the same entries that uses a different key.
    #[must_use]
    pub fn for_key(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: self.entries.clone(),
        }
    }

    /// Returns the key this handle reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the raw stored text.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.entries.with(|entries| entries.get(&self.key).cloned())
    }

    /// Overwrites the raw stored text.
    pub fn set_raw(&self, value: impl Into<String>) {
        let value = value.into();
        self.entries.with(|entries| {
            entries.insert(self.key.clone(), value);
        });
    }

    /// Removes the stored value.
    pub fn clear(&self) {
        self.entries.with(|entries| {
            entries.remove(&self.key);
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletStore for MemoryStore {
    fn load(&self) -> Result<Option<usize>, StoreError> {
        Ok(self.raw().and_then(|text| parse_balance(&text)))
    }

    fn save(&mut self, balance: usize) -> Result<(), StoreError> {
        self.set_raw(balance.to_string());
        Ok(())
    }
}

/// Keeps the balance as decimal text in a file.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so an interrupted write leaves the previous balance intact.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(feature = "std")]
impl FileStore {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "std")]
impl WalletStore for FileStore {
    fn load(&self) -> Result<Option<usize>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_balance(&text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, balance: usize) -> Result<(), StoreError> {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        std::fs::write(&staging, balance.to_string())?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// The chip balance together with the store that persists it.
#[derive(Debug)]
pub struct Wallet<S> {
    balance: usize,
    store: S,
}

impl<S: WalletStore> Wallet<S> {
    /// Loads the balance from `store`, or uses `default_balance` when the
    /// store holds nothing usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: S, default_balance: usize) -> Result<Self, StoreError> {
        let balance = if let Some(balance) = store.load()? {
            log::debug!("loaded wallet balance {balance}");
            balance
        } else {
            log::debug!("no saved wallet, starting with {default_balance}");
            default_balance
        };

        Ok(Self { balance, store })
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the wallet and returns the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes the in-memory balance to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(self.balance)
    }

    /// Removes `amount` chips. The store is written first; on failure the
    /// balance is unchanged.
    pub(crate) fn debit(&mut self, amount: usize) -> Result<(), StoreError> {
        self.replace(self.balance.saturating_sub(amount))
    }

    /// Adds `amount` chips, saturating at `usize::MAX`. The in-memory balance
    /// changes even if the store write fails.
    pub(crate) fn credit(&mut self, amount: usize) -> Result<(), StoreError> {
        self.balance = self.balance.saturating_add(amount);
        self.persist()
    }

    /// Sets the balance. The store is written first; on failure the balance
    /// is unchanged.
    pub(crate) fn replace(&mut self, balance: usize) -> Result<(), StoreError> {
        self.store.save(balance)?;
        self.balance = balance;
        Ok(())
    }
}
