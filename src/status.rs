//! `hinv status`: check that the inventory API answers for every collection.

use anyhow::{bail, Result};
use std::io::Write;
use tracing::warn;

use home_inventory_core::source::{Collection, InventorySource};

use crate::client::ApiClient;
use crate::config::Config;

/// Outcome of fetching one collection.
#[derive(Debug)]
pub struct CollectionStatus {
    pub name: &'static str,
    pub count: Option<usize>,
}

pub async fn run_status(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    println!("API: {}", client.base_url());

    let statuses = check(&client).await;
    write_table(&mut std::io::stdout().lock(), &statuses)?;

    let failed = statuses.iter().filter(|s| s.count.is_none()).count();
    if failed > 0 {
        bail!("{} of {} collections unreachable", failed, statuses.len());
    }
    Ok(())
}

/// Fetch the three searchable collections and the address list concurrently.
pub async fn check(client: &ApiClient) -> Vec<CollectionStatus> {
    let (items, rooms, locations, addresses) = tokio::join!(
        client.list_items(),
        client.list_rooms(),
        client.list_storage_locations(),
        client.list_addresses(),
    );

    vec![
        status(Collection::Items.as_str(), items.map(|v| v.len())),
        status(Collection::Rooms.as_str(), rooms.map(|v| v.len())),
        status(Collection::StorageLocations.as_str(), locations.map(|v| v.len())),
        status("addresses", addresses.map(|v| v.len())),
    ]
}

fn status(name: &'static str, fetched: Result<usize>) -> CollectionStatus {
    match fetched {
        Ok(count) => CollectionStatus {
            name,
            count: Some(count),
        },
        Err(e) => {
            warn!(collection = name, error = %e, "collection check failed");
            CollectionStatus { name, count: None }
        }
    }
}

pub fn write_table<W: Write>(out: &mut W, statuses: &[CollectionStatus]) -> std::io::Result<()> {
    writeln!(out, "{:<20} {:<12} COUNT", "COLLECTION", "STATUS")?;
    for s in statuses {
        match s.count {
            Some(count) => writeln!(out, "{:<20} {:<12} {}", s.name, "OK", count)?,
            None => writeln!(out, "{:<20} {:<12} -", s.name, "UNREACHABLE")?,
        }
    }
    Ok(())
}
