//! Watchlist Store
//!
//! User watchlist persisted as one JSON document. Every mutation rewrites
//! the file in full; a failed write rolls the in-memory copy back so the
//! cache never runs ahead of the file. Symbols are normalized (trimmed,
//! uppercased) and the store is idempotent per symbol.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::WatchlistEntry;

/// Shared handle to the watchlist store
pub type SharedWatchlistStore = Arc<WatchlistStore>;

pub struct WatchlistStore {
    path: PathBuf,
    entries: RwLock<Vec<WatchlistEntry>>,
}

impl WatchlistStore {
    /// Open the store, loading the persisted document when present
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// All entries in insertion order
    pub async fn entries(&self) -> Vec<WatchlistEntry> {
        self.entries.read().await.clone()
    }

    /// Watched symbols in insertion order
    pub async fn symbols(&self) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .map(|entry| entry.symbol.clone())
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Add a symbol; returns the existing entry when it is already watched
    pub async fn add(&self, symbol: &str) -> Result<WatchlistEntry> {
        let normalized = symbol.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(AppError::InvalidInput("Symbol must not be empty".to_string()));
        }

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.iter().find(|entry| entry.symbol == normalized) {
            return Ok(existing.clone());
        }

        let entry = WatchlistEntry::new(normalized);
        entries.push(entry.clone());
        if let Err(e) = self.persist(&entries) {
            // Failed writes must not leave the cache ahead of the file
            entries.pop();
            return Err(e);
        }
        Ok(entry)
    }

    /// Remove by entry id; reports whether anything was removed
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let previous = entries.clone();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != previous.len();
        if removed {
            if let Err(e) = self.persist(&entries) {
                *entries = previous;
                return Err(e);
            }
        }
        Ok(removed)
    }

    /// Remove by symbol; reports whether anything was removed
    pub async fn remove_symbol(&self, symbol: &str) -> Result<bool> {
        let normalized = symbol.trim().to_uppercase();
        let mut entries = self.entries.write().await;
        let previous = entries.clone();
        entries.retain(|entry| entry.symbol != normalized);
        let removed = entries.len() != previous.len();
        if removed {
            if let Err(e) = self.persist(&entries) {
                *entries = previous;
                return Err(e);
            }
        }
        Ok(removed)
    }

    fn persist(&self, entries: &[WatchlistEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
