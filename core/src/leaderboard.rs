use alloc::borrow::ToOwned;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub time_seconds: Seconds,
}

/// Best round times, fastest first, one entry per name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub const MAX_ENTRIES: usize = 10;
    pub const ANONYMOUS: &'static str = "Anonymous";

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a finished round. A name that is already listed gets its time replaced, whether
    /// or not the new time is better. Names are kept as entered, blank ones become anonymous.
    pub fn submit(&mut self, name: Option<&str>, time_seconds: Seconds) {
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(Self::ANONYMOUS);

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.time_seconds = time_seconds,
            None => self.entries.push(LeaderboardEntry {
                name: name.to_owned(),
                time_seconds,
            }),
        }

        self.normalize();
    }

    /// Restores the ordering invariants on entries that did not come from `submit`: first
    /// entry wins for a repeated name, fastest first, at most `MAX_ENTRIES`.
    fn normalize(&mut self) {
        let mut seen = BTreeSet::new();
        self.entries.retain(|entry| seen.insert(entry.name.clone()));
        // stable, earlier entries win ties
        self.entries.sort_by_key(|entry| entry.time_seconds);
        self.entries.truncate(Self::MAX_ENTRIES);
    }
}

/// Durable key-value storage for whole serialized values.
pub trait BlobStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>;

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()>;

    fn delete(&mut self, key: &str);
}

/// In-process [`BlobStore`] holding JSON text, for tests and hosts without browser storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    pub fn insert_raw(&mut self, key: &str, blob: impl Into<String>) {
        self.blobs.insert(key.to_owned(), blob.into());
    }
}

impl BlobStore for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        self.blobs
            .get(key)
            .map(|blob| serde_json::from_str(blob))
            .transpose()
            .map_err(|err| StorageError::Malformed(err.to_string()))
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let blob =
            serde_json::to_string(value).map_err(|err| StorageError::Backend(err.to_string()))?;
        self.blobs.insert(key.to_owned(), blob);
        Ok(())
    }

    fn delete(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

/// The persisted top 10, kept as a single blob under [`LeaderboardStore::KEY`]. Every operation
/// goes back to the store, nothing is cached.
#[derive(Clone, Debug, Default)]
pub struct LeaderboardStore<S> {
    store: S,
}

impl<S: BlobStore> LeaderboardStore<S> {
    pub const KEY: &'static str = "memorito:high-scores";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unreadable data counts as an empty board, readable data is put back in order.
    pub fn list(&self) -> Leaderboard {
        match self.store.load::<Leaderboard>(Self::KEY) {
            Ok(board) => {
                let mut board: Leaderboard = board.unwrap_or_default();
                board.normalize();
                board
            }
            Err(err) => {
                log::warn!("Ignoring stored high scores: {}", err);
                Leaderboard::default()
            }
        }
    }

    pub fn submit(&mut self, name: Option<&str>, time_seconds: Seconds) -> Leaderboard {
        let mut board = self.list();
        board.submit(name, time_seconds);
        if let Err(err) = self.store.save(Self::KEY, &board) {
            log::error!("Could not save high scores: {:?}", err);
        }
        board
    }

    pub fn clear(&mut self) {
        log::debug!("clearing high scores");
        self.store.delete(Self::KEY);
    }
}
