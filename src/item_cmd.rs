//! `hinv item` commands.
//!
//! `find` uses the server's keyword search over items only; for a search
//! across items, rooms, and storage locations use `hinv search`.

use anyhow::{bail, Result};
use tracing::info;

use home_inventory_core::models::{EntityId, EntityRef, Item, ItemDraft};
use home_inventory_core::search::item_location_path;
use home_inventory_core::source::InventorySource;

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::{confirm, format_ts, or_dash, path_or_dash, print_json};

/// Fields accepted by `item add` and `item update`.
#[derive(Debug, Default)]
pub struct ItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<EntityId>,
    pub category: Option<EntityId>,
}

pub async fn run_list(config: &Config, location: Option<EntityId>, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let items = match location {
        Some(location_id) => client.list_items_by_location(location_id).await?,
        None => client.list_items().await?,
    };
    print_items(&items, json)
}

pub async fn run_find(config: &Config, keyword: &str, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let items = client.search_items(keyword).await?;
    info!(keyword, count = items.len(), "item keyword search finished");
    print_items(&items, json)
}

fn print_items(items: &[Item], json: bool) -> Result<()> {
    if json {
        return print_json(items);
    }
    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }
    println!("{:<6} {:<24} {:>4}  IN", "ID", "NAME", "QTY");
    for i in items {
        let path = item_location_path(i);
        println!(
            "{:<6} {:<24} {:>4}  {}",
            i.id,
            i.name,
            i.quantity,
            path_or_dash(&path)
        );
    }
    Ok(())
}

pub async fn run_get(config: &Config, id: EntityId, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(item) = client.get_item(id).await? else {
        bail!("item not found: {}", id);
    };

    if json {
        return print_json(&item);
    }
    let photos = client.list_photos(id).await?;
    let uploads_root = config.api.uploads_root();

    println!("--- Item ---");
    println!("id:           {}", item.id);
    println!("name:         {}", item.name);
    println!("description:  {}", or_dash(item.description.as_deref()));
    println!("quantity:     {}", item.quantity);
    println!("category:     {}", or_dash(item.category.as_ref().map(|c| c.name.as_str())));
    println!("in:           {}", path_or_dash(&item_location_path(&item)));
    println!("created:      {}", format_ts(item.created_at));
    println!("updated:      {}", format_ts(item.updated_at));
    println!();
    println!("--- Photos ({}) ---", photos.len());
    for p in &photos {
        println!("  {:<6} {}", p.id, p.url(&uploads_root));
    }
    Ok(())
}

pub async fn run_add(config: &Config, fields: ItemFields, json: bool) -> Result<()> {
    let Some(name) = fields.name else {
        bail!("item name is required");
    };
    let Some(location) = fields.location else {
        bail!("item storage location is required; pass --location");
    };

    let client = ApiClient::new(&config.api)?;
    let draft = ItemDraft {
        name,
        description: fields.description,
        quantity: fields.quantity.unwrap_or(1),
        storage_location: EntityRef::from(location),
        category: fields.category.map(EntityRef::from),
    };
    let created = client.create_item(&draft).await?;
    info!(id = created.id, location, "item created");

    if json {
        return print_json(&created);
    }
    println!("Created item {} ({}).", created.id, created.name);
    Ok(())
}

pub async fn run_update(config: &Config, id: EntityId, fields: ItemFields, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let Some(existing) = client.get_item(id).await? else {
        bail!("item not found: {}", id);
    };

    let draft = draft_from(&existing, fields)?;
    let Some(updated) = client.update_item(id, &draft).await? else {
        bail!("item not found: {}", id);
    };

    if json {
        return print_json(&updated);
    }
    println!("Updated item {} ({}).", updated.id, updated.name);
    Ok(())
}

pub async fn run_remove(config: &Config, id: EntityId, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete item {}?", id), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ApiClient::new(&config.api)?;
    if !client.delete_item(id).await? {
        bail!("item not found: {}", id);
    }
    println!("Deleted item {}.", id);
    Ok(())
}

fn draft_from(existing: &Item, fields: ItemFields) -> Result<ItemDraft> {
    let location = fields
        .location
        .or_else(|| existing.storage_location.as_ref().map(|l| l.id));
    let Some(location) = location else {
        bail!("item {} has no storage location; pass --location", existing.id);
    };
    Ok(ItemDraft {
        name: fields.name.unwrap_or_else(|| existing.name.clone()),
        description: fields.description.or_else(|| existing.description.clone()),
        quantity: fields.quantity.unwrap_or(existing.quantity),
        storage_location: EntityRef::from(location),
        category: fields
            .category
            .or_else(|| existing.category.as_ref().map(|c| c.id))
            .map(EntityRef::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hammer() -> Item {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Hammer",
            "description": "claw",
            "quantity": 2,
            "storageLocation": { "id": 3, "name": "Toolbox" },
            "category": { "id": 9, "name": "Tools" }
        }))
        .unwrap()
    }

    #[test]
    fn test_draft_from_keeps_existing_values() {
        let draft = draft_from(&hammer(), ItemFields::default()).unwrap();
        assert_eq!(draft.name, "Hammer");
        assert_eq!(draft.description.as_deref(), Some("claw"));
        assert_eq!(draft.quantity, 2);
        assert_eq!(draft.storage_location.id, 3);
        assert_eq!(draft.category, Some(EntityRef::from(9)));
    }

    #[test]
    fn test_draft_from_applies_overrides() {
        let fields = ItemFields {
            quantity: Some(5),
            location: Some(11),
            ..ItemFields::default()
        };
        let draft = draft_from(&hammer(), fields).unwrap();
        assert_eq!(draft.quantity, 5);
        assert_eq!(draft.storage_location.id, 11);
        assert_eq!(draft.name, "Hammer");
    }

    #[test]
    fn test_draft_from_without_location_fails() {
        let mut item = hammer();
        item.storage_location = None;
        let err = draft_from(&item, ItemFields::default()).unwrap_err();
        assert!(err.to_string().contains("--location"));
    }
}
