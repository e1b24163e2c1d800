//! `hinv room` commands.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use home_inventory_core::batch::parse_room_batch;
use home_inventory_core::models::{EntityId, EntityRef, Room, RoomDraft};
use home_inventory_core::search::room_location_path;
use home_inventory_core::source::InventorySource;

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::{confirm, format_ts, or_dash, path_or_dash, print_json};

pub async fn run_list(config: &Config, address: Option<EntityId>, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let rooms = match address {
        Some(address_id) => client.list_rooms_by_address(address_id).await?,
        None => client.list_rooms().await?,
    };

    if json {
        return print_json(&rooms);
    }
    if rooms.is_empty() {
        println!("No rooms.");
        return Ok(());
    }
    println!("{:<6} {:<24} ADDRESS", "ID", "NAME");
    for r in &rooms {
        let address = room_location_path(r);
        println!("{:<6} {:<24} {}", r.id, r.name, path_or_dash(&address));
    }
    Ok(())
}

pub async fn run_get(config: &Config, id: EntityId, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(room) = client.get_room(id).await? else {
        bail!("room not found: {}", id);
    };

    if json {
        return print_json(&room);
    }
    let locations = client.list_storage_locations_by_room(id).await?;

    println!("--- Room ---");
    println!("id:           {}", room.id);
    println!("name:         {}", room.name);
    println!("address:      {}", path_or_dash(&room_location_path(&room)));
    println!(
        "floor plan:   {}",
        if room.floor_plan_data.is_some() { "yes" } else { "no" }
    );
    println!("created:      {}", format_ts(room.created_at));
    println!("updated:      {}", format_ts(room.updated_at));
    println!();
    println!("--- Storage locations ({}) ---", locations.len());
    for l in &locations {
        println!("  {:<6} {:<24} {}", l.id, l.name, or_dash(l.kind.as_deref()));
    }
    Ok(())
}

pub async fn run_add(
    config: &Config,
    address: EntityId,
    name: String,
    floor_plan: Option<String>,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let draft = RoomDraft {
        name,
        address: EntityRef::from(address),
        floor_plan_data: floor_plan,
    };
    let created = client.create_room(&draft).await?;
    info!(id = created.id, address, "room created");

    if json {
        return print_json(&created);
    }
    println!("Created room {} ({}).", created.id, created.name);
    Ok(())
}

/// Create one room per non-blank line of `file` (or stdin when absent).
pub async fn run_add_batch(
    config: &Config,
    address: EntityId,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = read_batch_input(file)?;
    let drafts = parse_room_batch(&input, address)?;

    let client = ApiClient::new(&config.api)?;
    let created = client.create_rooms_batch(&drafts).await?;
    info!(count = created.len(), address, "rooms created");

    if json {
        return print_json(&created);
    }
    println!("Created {} rooms.", created.len());
    for r in &created {
        println!("  {:<6} {}", r.id, r.name);
    }
    Ok(())
}

pub async fn run_update(
    config: &Config,
    id: EntityId,
    name: Option<String>,
    address: Option<EntityId>,
    floor_plan: Option<String>,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(existing) = client.get_room(id).await? else {
        bail!("room not found: {}", id);
    };

    let draft = draft_from(&existing, name, address, floor_plan)?;
    let Some(updated) = client.update_room(id, &draft).await? else {
        bail!("room not found: {}", id);
    };

    if json {
        return print_json(&updated);
    }
    println!("Updated room {} ({}).", updated.id, updated.name);
    Ok(())
}

pub async fn run_remove(config: &Config, id: EntityId, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete room {} and everything in it?", id), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?;
    if !client.delete_room(id).await? {
        bail!("room not found: {}", id);
    }
    println!("Deleted room {}.", id);
    Ok(())
}

pub(crate) fn read_batch_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

fn draft_from(
    existing: &Room,
    name: Option<String>,
    address: Option<EntityId>,
    floor_plan: Option<String>,
) -> Result<RoomDraft> {
    let address = match address.or_else(|| existing.address.as_ref().map(|a| a.id)) {
        Some(id) => id,
        None => bail!("room {} has no address; pass --address", existing.id),
    };
    Ok(RoomDraft {
        name: name.unwrap_or_else(|| existing.name.clone()),
        address: EntityRef::from(address),
        floor_plan_data: floor_plan.or_else(|| existing.floor_plan_data.clone()),
    })
}
