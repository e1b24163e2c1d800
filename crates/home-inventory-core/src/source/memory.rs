//! In-memory [`InventorySource`] implementation for testing and offline use.
//!
//! Collections are plain `Vec`s behind `std::sync::RwLock`, returned in
//! insertion order. A collection can be marked unavailable to simulate a
//! failing backend.

use std::collections::HashSet;
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{Item, Room, StorageLocation};

use super::{Collection, InventorySource};

/// In-memory inventory source.
pub struct InMemorySource {
    items: RwLock<Vec<Item>>,
    rooms: RwLock<Vec<Room>>,
    locations: RwLock<Vec<StorageLocation>>,
    unavailable: RwLock<HashSet<Collection>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            rooms: RwLock::new(Vec::new()),
            locations: RwLock::new(Vec::new()),
            unavailable: RwLock::new(HashSet::new()),
        }
    }

    /// Build a source pre-populated with the given collections.
    pub fn with_data(items: Vec<Item>, rooms: Vec<Room>, locations: Vec<StorageLocation>) -> Self {
        Self {
            items: RwLock::new(items),
            rooms: RwLock::new(rooms),
            locations: RwLock::new(locations),
            unavailable: RwLock::new(HashSet::new()),
        }
    }

    pub fn push_item(&self, item: Item) {
        self.items.write().unwrap().push(item);
    }

    pub fn push_room(&self, room: Room) {
        self.rooms.write().unwrap().push(room);
    }

    pub fn push_storage_location(&self, location: StorageLocation) {
        self.locations.write().unwrap().push(location);
    }

    /// Make every fetch of `collection` fail until [`restore`](Self::restore) is called.
    pub fn set_unavailable(&self, collection: Collection) {
        self.unavailable.write().unwrap().insert(collection);
    }

    pub fn restore(&self, collection: Collection) {
        self.unavailable.write().unwrap().remove(&collection);
    }

    fn check(&self, collection: Collection) -> Result<()> {
        if self.unavailable.read().unwrap().contains(&collection) {
            bail!("collection unavailable: {}", collection.as_str());
        }
        Ok(())
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventorySource for InMemorySource {
    async fn list_items(&self) -> Result<Vec<Item>> {
        self.check(Collection::Items)?;
        Ok(self.items.read().unwrap().clone())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.check(Collection::Rooms)?;
        Ok(self.rooms.read().unwrap().clone())
    }

    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>> {
        self.check(Collection::StorageLocations)?;
        Ok(self.locations.read().unwrap().clone())
    }
}
