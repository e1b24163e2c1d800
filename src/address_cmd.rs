//! `hinv address` commands.

use anyhow::{bail, Result};
use tracing::info;

use home_inventory_core::models::{Address, AddressDraft, EntityId};

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::{confirm, format_ts, or_dash, print_json};

pub async fn run_list(config: &Config, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let addresses = client.list_addresses().await?;

    if json {
        return print_json(&addresses);
    }
    if addresses.is_empty() {
        println!("No addresses.");
        return Ok(());
    }
    println!("{:<6} {:<24} STREET", "ID", "NAME");
    for a in &addresses {
        println!("{:<6} {:<24} {}", a.id, a.name, or_dash(a.street.as_deref()));
    }
    Ok(())
}

pub async fn run_get(config: &Config, id: EntityId, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(address) = client.get_address(id).await? else {
        bail!("address not found: {}", id);
    };

    if json {
        return print_json(&address);
    }
    let rooms = client.list_rooms_by_address(id).await?;

    println!("--- Address ---");
    println!("id:           {}", address.id);
    println!("name:         {}", address.name);
    println!("street:       {}", or_dash(address.street.as_deref()));
    println!("created:      {}", format_ts(address.created_at));
    println!("updated:      {}", format_ts(address.updated_at));
    println!();
    println!("--- Rooms ({}) ---", rooms.len());
    for r in &rooms {
        println!("  {:<6} {}", r.id, r.name);
    }
    Ok(())
}

pub async fn run_add(
    config: &Config,
    name: String,
    street: Option<String>,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let created = client.create_address(&AddressDraft { name, street }).await?;
    info!(id = created.id, "address created");

    if json {
        return print_json(&created);
    }
    println!("Created address {} ({}).", created.id, created.name);
    Ok(())
}

pub async fn run_update(
    config: &Config,
    id: EntityId,
    name: Option<String>,
    street: Option<String>,
    json: bool,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(existing) = client.get_address(id).await? else {
        bail!("address not found: {}", id);
    };

    let draft = draft_from(&existing, name, street);
    let Some(updated) = client.update_address(id, &draft).await? else {
        bail!("address not found: {}", id);
    };

    if json {
        return print_json(&updated);
    }
    println!("Updated address {} ({}).", updated.id, updated.name);
    Ok(())
}

pub async fn run_remove(config: &Config, id: EntityId, yes: bool) -> Result<()> {
    if !confirm(
        &format!("Delete address {} and everything in it?", id),
        yes,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?;
    if !client.delete_address(id).await? {
        bail!("address not found: {}", id);
    }
    println!("Deleted address {}.", id);
    Ok(())
}

/// Start from the stored address and apply the given overrides.
fn draft_from(existing: &Address, name: Option<String>, street: Option<String>) -> AddressDraft {
    AddressDraft {
        name: name.unwrap_or_else(|| existing.name.clone()),
        street: street.or_else(|| existing.street.clone()),
    }
}
