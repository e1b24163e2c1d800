//! `hinv photo` commands.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use home_inventory_core::models::EntityId;

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::{confirm, format_ts, print_json};

pub async fn run_list(config: &Config, item: EntityId, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let photos = client.list_photos(item).await?;

    if json {
        return print_json(&photos);
    }
    if photos.is_empty() {
        println!("No photos for item {}.", item);
        return Ok(());
    }
    let uploads_root = config.api.uploads_root();
    println!("{:<6} {:<16} URL", "ID", "ADDED");
    for p in &photos {
        println!("{:<6} {:<16} {}", p.id, format_ts(p.created_at), p.url(&uploads_root));
    }
    Ok(())
}

pub async fn run_upload(config: &Config, item: EntityId, file: &Path, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let photo = client.upload_photo(item, file).await?;
    info!(id = photo.id, item, file = %file.display(), "photo uploaded");

    if json {
        return print_json(&photo);
    }
    println!("Uploaded photo {}: {}", photo.id, photo.url(&config.api.uploads_root()));
    Ok(())
}

pub async fn run_remove(config: &Config, id: EntityId, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete photo {}?", id), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?;
    if !client.delete_photo(id).await? {
        bail!("photo not found: {}", id);
    }
    println!("Deleted photo {}.", id);
    Ok(())
}
