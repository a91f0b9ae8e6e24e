use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

const CART_FILE: &str = "cart.json";
const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to persist cart: {0}")]
    Io(#[from] io::Error),
}

/// Broadcast after every cart mutation.
#[derive(Debug, Clone)]
pub struct CartEvent {
    /// Number of distinct goods in the cart after the mutation.
    pub count: usize,
}

/// Persistent, deduplicated set of good identifiers.
///
/// State lives in memory behind a mutex and is written back to
/// `<state_dir>/cart.json` on every mutation, so a read-modify-write is one
/// uninterrupted step from any caller's perspective. Each mutating call
/// persists and then emits exactly one [`CartEvent`]; observers register
/// through [`CartStore::subscribe`] and the store never learns who they are.
#[derive(Debug)]
pub struct CartStore {
    path: PathBuf,
    ids: Mutex<Vec<i64>>,
    events: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Opens the cart persisted under `state_dir`.
    ///
    /// A missing, unreadable, or malformed cart file reads as an empty cart;
    /// corruption never propagates as an error.
    #[must_use]
    pub fn open(state_dir: &Path) -> Self {
        let path = state_dir.join(CART_FILE);
        let ids = read_ids(&path);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path,
            ids: Mutex::new(ids),
            events,
        }
    }

    /// Registers an observer for cart-changed notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// All identifiers, in insertion order. The order carries no meaning.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.locked().clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.locked().len()
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.locked().contains(&id)
    }

    /// Adds an identifier; a no-op when it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the new state cannot be persisted; the
    /// in-memory state is rolled back so memory and disk stay in agreement.
    pub fn add(&self, id: i64) -> Result<(), CartError> {
        let mut ids = self.locked();
        let added = if ids.contains(&id) {
            false
        } else {
            ids.push(id);
            true
        };
        if let Err(e) = self.persist(&ids) {
            if added {
                ids.pop();
            }
            return Err(e);
        }
        self.notify(ids.len());
        Ok(())
    }

    /// Removes an identifier; a no-op when it is not present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the new state cannot be persisted.
    pub fn remove(&self, id: i64) -> Result<(), CartError> {
        let mut ids = self.locked();
        let previous = ids.clone();
        ids.retain(|existing| *existing != id);
        if let Err(e) = self.persist(&ids) {
            *ids = previous;
            return Err(e);
        }
        self.notify(ids.len());
        Ok(())
    }

    /// Empties the cart and removes the persisted file.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Io`] if the persisted file cannot be removed.
    pub fn clear(&self) -> Result<(), CartError> {
        let mut ids = self.locked();
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        ids.clear();
        self.notify(0);
        Ok(())
    }

    fn locked(&self) -> MutexGuard<'_, Vec<i64>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, ids: &[i64]) -> Result<(), CartError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let encoded = serde_json::to_string(ids).map_err(io::Error::other)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    fn notify(&self, count: usize) {
        // No receivers is fine; nobody is watching the badge right now.
        let _ = self.events.send(CartEvent { count });
    }
}

/// Reads the persisted identifier list, degrading to empty on any damage.
///
/// Entries are coerced the way the rest of the client coerces numbers:
/// integers pass through, integral floats and numeric strings are accepted,
/// everything else is dropped. Duplicates are removed, first occurrence wins.
fn read_ids(path: &Path) -> Vec<i64> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(parsed) = serde_json::from_str::<Value>(&raw) else {
        tracing::warn!(path = %path.display(), "cart file is not valid JSON; starting empty");
        return Vec::new();
    };
    let Some(entries) = parsed.as_array() else {
        tracing::warn!(path = %path.display(), "cart file is not a JSON array; starting empty");
        return Vec::new();
    };

    let mut ids: Vec<i64> = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = match entry {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if let Some(id) = id {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}
