//! `hinv location` commands.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use home_inventory_core::batch::parse_storage_location_batch;
use home_inventory_core::models::{EntityId, EntityRef, StorageLocation, StorageLocationDraft};
use home_inventory_core::search::storage_location_path;
use home_inventory_core::source::InventorySource;

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::{confirm, format_ts, or_dash, path_or_dash, print_json};
use crate::room_cmd::read_batch_input;

pub async fn run_list(config: &Config, room: Option<EntityId>, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let locations = match room {
        Some(room_id) => client.list_storage_locations_by_room(room_id).await?,
        None => client.list_storage_locations().await?,
    };

    if json {
        return print_json(&locations);
    }
    if locations.is_empty() {
        println!("No storage locations.");
        return Ok(());
    }
    println!("{:<6} {:<24} {:<12} IN", "ID", "NAME", "TYPE");
    for l in &locations {
        let path = storage_location_path(l);
        println!(
            "{:<6} {:<24} {:<12} {}",
            l.id,
            l.name,
            or_dash(l.kind.as_deref()),
            path_or_dash(&path)
        );
    }
    Ok(())
}

pub async fn run_get(config: &Config, id: EntityId, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(location) = client.get_storage_location(id).await? else {
        bail!("storage location not found: {}", id);
    };

    if json {
        return print_json(&location);
    }
    let items = client.list_items_by_location(id).await?;

    println!("--- Storage location ---");
    println!("id:           {}", location.id);
    println!("name:         {}", location.name);
    println!("type:         {}", or_dash(location.kind.as_deref()));
    println!("in:           {}", path_or_dash(&storage_location_path(&location)));
    if let (Some(x), Some(y)) = (location.position_x, location.position_y) {
        println!("position:     {:.1}, {:.1}", x, y);
    }
    println!("created:      {}", format_ts(location.created_at));
    println!("updated:      {}", format_ts(location.updated_at));
    println!();
    println!("--- Items ({}) ---", items.len());
    for i in &items {
        println!("  {:<6} {:<24} x{}", i.id, i.name, i.quantity);
    }
    Ok(())
}

/// Fields accepted by `location add` and `location update`.
#[derive(Debug, Default)]
pub struct LocationFields {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub room: Option<EntityId>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

pub async fn run_add(config: &Config, fields: LocationFields, json: bool) -> Result<()> {
    let Some(name) = fields.name else {
        bail!("storage location name is required");
    };
    let Some(room) = fields.room else {
        bail!("storage location room is required; pass --room");
    };

    let client = ApiClient::new(&config.api)?;
    let draft = StorageLocationDraft {
        name,
        kind: fields.kind,
        room: EntityRef::from(room),
        position_x: fields.position_x,
        position_y: fields.position_y,
    };
    let created = client.create_storage_location(&draft).await?;
    info!(id = created.id, room, "storage location created");

    if json {
        return print_json(&created);
    }
    println!("Created storage location {} ({}).", created.id, created.name);
    Ok(())
}

/// Create storage locations from `name|type` lines.
pub async fn run_add_batch(
    config: &Config,
    room: EntityId,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = read_batch_input(file)?;
    let drafts = parse_storage_location_batch(&input, room)?;

    let client = ApiClient::new(&config.api)?;
    let created = client.create_storage_locations_batch(&drafts).await?;
    info!(count = created.len(), room, "storage locations created");

    if json {
        return print_json(&created);
    }
    println!("Created {} storage locations.", created.len());
    for l in &created {
        println!("  {:<6} {:<24} {}", l.id, l.name, or_dash(l.kind.as_deref()));
    }
    Ok(())
}

pub async fn run_update(
    config: &Config,
    id: EntityId,
    fields: LocationFields,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(existing) = client.get_storage_location(id).await? else {
        bail!("storage location not found: {}", id);
    };

    let draft = draft_from(&existing, fields)?;
    let Some(updated) = client.update_storage_location(id, &draft).await? else {
        bail!("storage location not found: {}", id);
    };

    if json {
        return print_json(&updated);
    }
    println!("Updated storage location {} ({}).", updated.id, updated.name);
    Ok(())
}

pub async fn run_remove(config: &Config, id: EntityId, yes: bool) -> Result<()> {
    if !confirm(
        &format!("Delete storage location {} and its items?", id),
        yes,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?;
    if !client.delete_storage_location(id).await? {
        bail!("storage location not found: {}", id);
    }
    println!("Deleted storage location {}.", id);
    Ok(())
}

/// Start from the stored location, including its floor-plan position, and
/// apply the given overrides.
fn draft_from(existing: &StorageLocation, fields: LocationFields) -> Result<StorageLocationDraft> {
    let room = fields
        .room
        .or_else(|| existing.room.as_ref().map(|r| r.id));
    let Some(room) = room else {
        bail!("storage location {} has no room; pass --room", existing.id);
    };
    Ok(StorageLocationDraft {
        name: fields.name.unwrap_or_else(|| existing.name.clone()),
        kind: fields.kind.or_else(|| existing.kind.clone()),
        room: EntityRef::from(room),
        position_x: fields.position_x.or(existing.position_x),
        position_y: fields.position_y.or(existing.position_y),
    })
}
