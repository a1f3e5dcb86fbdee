use tokio::sync::broadcast;

use crate::api::TransferRequest;

const CHANGE_CHANNEL_CAPACITY: usize = 32;

/// A mutation of the working list, published to renderers
#[derive(Debug, Clone, PartialEq)]
pub enum ListChange {
    /// The whole list was superseded by a fetch
    Replaced { version: u64, len: usize },
    /// One entry left the list after a settled decision
    Removed { version: u64, id: i64, index: usize },
}

/// Versioned working copy of the pending transfer requests.
///
/// Only ever mutated through `replace` (a fetch) and `remove_by_id` (a
/// settled decision); entries are never created locally.
#[derive(Debug)]
pub struct RequestList {
    items: Vec<TransferRequest>,
    version: u64,
    changes: broadcast::Sender<ListChange>,
}

impl RequestList {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            items: Vec::new(),
            version: 0,
            changes,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListChange> {
        self.changes.subscribe()
    }

    pub fn items(&self) -> &[TransferRequest] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&TransferRequest> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Supersede the whole list with a fresh server response
    pub fn replace(&mut self, items: Vec<TransferRequest>) -> u64 {
        self.items = items;
        self.version += 1;
        // No subscribers is fine: nobody is rendering.
        let _ = self.changes.send(ListChange::Replaced {
            version: self.version,
            len: self.items.len(),
        });
        self.version
    }

    /// Remove the entry with `id`, wherever it currently sits
    pub fn remove_by_id(&mut self, id: i64) -> Option<TransferRequest> {
        let index = self.items.iter().position(|r| r.id == id)?;
        let removed = self.items.remove(index);
        self.version += 1;
        let _ = self.changes.send(ListChange::Removed {
            version: self.version,
            id,
            index,
        });
        Some(removed)
    }
}

impl Default for RequestList {
    fn default() -> Self {
        Self::new()
    }
}
