//! Data-access abstraction consumed by the search aggregator.
//!
//! The [`InventorySource`] trait exposes the three full-collection fetches
//! the global search needs. The REST client in the `home-inventory` crate
//! implements it against the inventory server; [`memory::InMemorySource`]
//! implements it for tests and offline use.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Item, Room, StorageLocation};

/// One of the three source collections fetched per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Items,
    Rooms,
    StorageLocations,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Items,
        Collection::Rooms,
        Collection::StorageLocations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Items => "items",
            Collection::Rooms => "rooms",
            Collection::StorageLocations => "storage-locations",
        }
    }
}

/// Abstract read access to the inventory's source collections.
///
/// Each method returns the whole collection with parent chains populated
/// where the backend provides them. Errors cover transport failures,
/// non-success responses, and decoding failures alike.
///
/// # Operations
///
/// | Method | Returns |
/// |--------|---------|
/// | [`list_items`](InventorySource::list_items) | all items with `storage_location.room.address` |
/// | [`list_rooms`](InventorySource::list_rooms) | all rooms with `address` |
/// | [`list_storage_locations`](InventorySource::list_storage_locations) | all storage locations with `room.address` |
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>>;

    async fn list_rooms(&self) -> Result<Vec<Room>>;

    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>>;
}
