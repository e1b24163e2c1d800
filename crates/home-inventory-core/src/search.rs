//! Global search across items, rooms, and storage locations.
//!
//! The aggregator operates entirely through the [`InventorySource`] trait.
//! It is a plain substring filter over three full-collection snapshots,
//! not an index: every call re-fetches everything.
//!
//! # Algorithm
//!
//! 1. Fetch items, rooms, and storage locations concurrently; all three
//!    must succeed, otherwise the call fails with [`SearchError::FetchFailed`].
//! 2. Items match on `name` or `description`.
//! 3. Rooms match on `name`.
//! 4. Storage locations match on `name` or `type`.
//! 5. Concatenate items ++ rooms ++ storage locations, each in source order.
//!
//! Matching is case-insensitive substring containment (Unicode lowercase on
//! both sides). There is no ranking and no secondary sort.

use futures_util::future::try_join3;
use serde::Serialize;
use thiserror::Error;

use crate::models::{EntityId, Item, Room, StorageLocation};
use crate::source::InventorySource;

/// Separator between ancestors in a [`SearchResult::location_path`].
pub const PATH_SEPARATOR: &str = " > ";

/// Discriminator for the entity a result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Item,
    Room,
    StorageLocation,
}

impl SearchKind {
    /// Prefix used in composite result ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SearchKind::Item => "item",
            SearchKind::Room => "room",
            SearchKind::StorageLocation => "location",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Item => "Item",
            SearchKind::Room => "Room",
            SearchKind::StorageLocation => "Storage location",
        }
    }
}

/// The entity a search result was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceEntity {
    Item(Item),
    Room(Room),
    StorageLocation(StorageLocation),
}

impl SourceEntity {
    pub fn id(&self) -> EntityId {
        match self {
            SourceEntity::Item(i) => i.id,
            SourceEntity::Room(r) => r.id,
            SourceEntity::StorageLocation(l) => l.id,
        }
    }
}

/// One entry of a global search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Composite id `"{kind}-{entity id}"`, unique within one response only.
    pub id: String,
    pub kind: SearchKind,
    pub name: String,
    /// Item description, or storage location type.
    pub description: Option<String>,
    /// Ancestor chain, e.g. `"Home > Kitchen > Drawer 1"`.
    pub location_path: String,
    pub source: SourceEntity,
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// One of the source collections could not be fetched. Which one is not
    /// reported.
    #[error("failed to fetch inventory collections")]
    FetchFailed(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Run a global search against an [`InventorySource`].
///
/// An empty or whitespace-only query returns no results without touching
/// the source. Any other query is matched as given.
pub async fn search<S>(source: &S, query: &str) -> Result<Vec<SearchResult>, SearchError>
where
    S: InventorySource + ?Sized,
{
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let (items, rooms, locations) = try_join3(
        source.list_items(),
        source.list_rooms(),
        source.list_storage_locations(),
    )
    .await
    .map_err(|e| SearchError::FetchFailed(e.into()))?;

    Ok(aggregate(query, &items, &rooms, &locations))
}

/// Filter and merge already-fetched collections.
pub fn aggregate(
    query: &str,
    items: &[Item],
    rooms: &[Room],
    locations: &[StorageLocation],
) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for item in items.iter().filter(|i| item_matches(i, &needle)) {
        results.push(SearchResult {
            id: composite_id(SearchKind::Item, item.id),
            kind: SearchKind::Item,
            name: item.name.clone(),
            description: item.description.clone(),
            location_path: item_location_path(item),
            source: SourceEntity::Item(item.clone()),
        });
    }

    for room in rooms.iter().filter(|r| contains_ci(&r.name, &needle)) {
        results.push(SearchResult {
            id: composite_id(SearchKind::Room, room.id),
            kind: SearchKind::Room,
            name: room.name.clone(),
            description: None,
            location_path: room_location_path(room),
            source: SourceEntity::Room(room.clone()),
        });
    }

    for location in locations.iter().filter(|l| location_matches(l, &needle)) {
        results.push(SearchResult {
            id: composite_id(SearchKind::StorageLocation, location.id),
            kind: SearchKind::StorageLocation,
            name: location.name.clone(),
            description: location.kind.clone(),
            location_path: storage_location_path(location),
            source: SourceEntity::StorageLocation(location.clone()),
        });
    }

    results
}

fn composite_id(kind: SearchKind, id: EntityId) -> String {
    format!("{}-{}", kind.id_prefix(), id)
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn item_matches(item: &Item, needle: &str) -> bool {
    contains_ci(&item.name, needle)
        || item
            .description
            .as_deref()
            .is_some_and(|d| contains_ci(d, needle))
}

fn location_matches(location: &StorageLocation, needle: &str) -> bool {
    contains_ci(&location.name, needle)
        || location
            .kind
            .as_deref()
            .is_some_and(|t| contains_ci(t, needle))
}

// ============ Location paths ============
//
// A missing ancestor renders as an empty segment.

fn room_segments(room: Option<&Room>) -> [&str; 2] {
    let address = room
        .and_then(|r| r.address.as_ref())
        .map(|a| a.name.as_str())
        .unwrap_or("");
    let room = room.map(|r| r.name.as_str()).unwrap_or("");
    [address, room]
}

/// `"{address} > {room} > {storage location}"`
pub fn item_location_path(item: &Item) -> String {
    let location = item.storage_location.as_ref();
    let [address, room] = room_segments(location.and_then(|l| l.room.as_ref()));
    let location = location.map(|l| l.name.as_str()).unwrap_or("");
    [address, room, location].join(PATH_SEPARATOR)
}

/// `"{address}"`
pub fn room_location_path(room: &Room) -> String {
    room.address
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_default()
}

/// `"{address} > {room}"`
pub fn storage_location_path(location: &StorageLocation) -> String {
    room_segments(location.room.as_ref()).join(PATH_SEPARATOR)
}
