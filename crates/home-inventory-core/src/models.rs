//! Core data models for the home inventory hierarchy.
//!
//! `Address ⊃ Room ⊃ StorageLocation ⊃ Item`, with photos attached to items.
//! The server returns entities with their parent chain nested inline
//! (an item carries `storageLocation.room.address`), but how much of that
//! chain is populated depends on the endpoint, so every parent reference is
//! an `Option`.
//!
//! Field names on the wire are camelCase, matching the inventory REST API.
//! Write payloads use the `*Draft` types, which reference parents by id only.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned entity identifier.
pub type EntityId = i64;

/// A physical address (a home, an office, a storage unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: EntityId,
    pub name: String,
    /// Street address line. Sent as `address` by the server.
    #[serde(default, rename = "address", alias = "street")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// A room inside an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub floor_plan_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// A place inside a room where items are kept (a drawer, a shelf, a box).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageLocation {
    pub id: EntityId,
    pub name: String,
    /// Free-text category label, e.g. `"Cabinet"` or `"Box"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub position_x: Option<f64>,
    #[serde(default)]
    pub position_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Optional item category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An inventoried item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub storage_location: Option<StorageLocation>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_quantity() -> u32 {
    1
}

/// A photo attached to an item. `photo_path` is the stored file name,
/// relative to the server's uploads directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPhoto {
    pub id: EntityId,
    pub photo_path: String,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl ItemPhoto {
    /// Public URL of the photo under the server's uploads root.
    pub fn url(&self, uploads_root: &str) -> String {
        format!("{}/{}", uploads_root.trim_end_matches('/'), self.photo_path)
    }
}

// ============ Write payloads ============

/// Reference to a parent entity by id, serialized as `{"id": N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: EntityId,
}

impl From<EntityId> for EntityRef {
    fn from(id: EntityId) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressDraft {
    pub name: String,
    #[serde(rename = "address", skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub name: String,
    pub address: EntityRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_plan_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageLocationDraft {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub room: EntityRef,
    /// Floor-plan coordinates. Always sent: the server overwrites both on
    /// update, so a missing value clears the stored one.
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    pub storage_location: EntityRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityRef>,
}

fn require_name(entity: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{} name must not be empty", entity);
    }
    Ok(())
}

impl AddressDraft {
    pub fn validate(&self) -> Result<()> {
        require_name("address", &self.name)
    }
}

impl RoomDraft {
    pub fn validate(&self) -> Result<()> {
        require_name("room", &self.name)
    }
}

impl StorageLocationDraft {
    pub fn validate(&self) -> Result<()> {
        require_name("storage location", &self.name)
    }
}

impl ItemDraft {
    pub fn validate(&self) -> Result<()> {
        require_name("item", &self.name)?;
        if self.quantity == 0 {
            bail!("item quantity must be >= 1");
        }
        Ok(())
    }
}
