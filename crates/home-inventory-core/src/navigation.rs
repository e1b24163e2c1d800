//! Where a picked search result leads.
//!
//! Items open their detail view, rooms open their storage-location list,
//! and storage locations open their item list.

use std::fmt;

use serde::Serialize;

use crate::models::EntityId;
use crate::search::{SearchResult, SourceEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum NavTarget {
    ItemDetail { item_id: EntityId },
    RoomStorageLocations { room_id: EntityId },
    StorageLocationItems { location_id: EntityId },
}

impl NavTarget {
    pub fn for_result(result: &SearchResult) -> Self {
        match &result.source {
            SourceEntity::Item(item) => NavTarget::ItemDetail { item_id: item.id },
            SourceEntity::Room(room) => NavTarget::RoomStorageLocations { room_id: room.id },
            SourceEntity::StorageLocation(location) => NavTarget::StorageLocationItems {
                location_id: location.id,
            },
        }
    }

    /// Route path for the target view.
    pub fn path(&self) -> String {
        match self {
            NavTarget::ItemDetail { item_id } => format!("/items/{}", item_id),
            NavTarget::RoomStorageLocations { room_id } => {
                format!("/rooms/{}/storage-locations", room_id)
            }
            NavTarget::StorageLocationItems { location_id } => {
                format!("/storage-locations/{}/items", location_id)
            }
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
