//! Parsing of multi-line batch input for bulk room and storage-location
//! creation.
//!
//! Rooms take one name per line. Storage locations take `name|type` per
//! line, where the type is optional. Blank lines and lines with an empty
//! name are skipped.

use anyhow::{bail, Result};

use crate::models::{EntityId, EntityRef, RoomDraft, StorageLocationDraft};

/// Parse one room name per line into drafts under `address_id`.
pub fn parse_room_batch(input: &str, address_id: EntityId) -> Result<Vec<RoomDraft>> {
    let drafts: Vec<RoomDraft> = input
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| RoomDraft {
            name: name.to_string(),
            address: EntityRef::from(address_id),
            floor_plan_data: None,
        })
        .collect();

    if drafts.is_empty() {
        bail!("batch input contains no room names");
    }
    Ok(drafts)
}

/// Parse `name|type` lines into drafts under `room_id`.
pub fn parse_storage_location_batch(
    input: &str,
    room_id: EntityId,
) -> Result<Vec<StorageLocationDraft>> {
    let drafts: Vec<StorageLocationDraft> = input
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('|');
            let name = parts.next().unwrap_or("").trim();
            let kind = parts.next().map(str::trim).unwrap_or("");
            if name.is_empty() {
                return None;
            }
            Some(StorageLocationDraft {
                name: name.to_string(),
                kind: (!kind.is_empty()).then(|| kind.to_string()),
                room: EntityRef::from(room_id),
                position_x: None,
                position_y: None,
            })
        })
        .collect();

    if drafts.is_empty() {
        bail!("batch input contains no storage location names");
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_batch_skips_blank_lines() {
        let drafts = parse_room_batch("Kitchen\n\n  Garage  \n   \nAttic", 7).unwrap();
        let names: Vec<&str> = drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Kitchen", "Garage", "Attic"]);
        assert!(drafts.iter().all(|d| d.address.id == 7));
    }

    #[test]
    fn test_room_batch_empty_is_error() {
        assert!(parse_room_batch("\n  \n", 1).is_err());
    }

    #[test]
    fn test_location_batch_with_and_without_type() {
        let drafts =
            parse_storage_location_batch("Drawer 1 | Drawer\nShelf\n | Box\nBin A|  ", 3).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].name, "Drawer 1");
        assert_eq!(drafts[0].kind.as_deref(), Some("Drawer"));
        assert_eq!(drafts[1].name, "Shelf");
        assert!(drafts[1].kind.is_none());
        assert_eq!(drafts[2].name, "Bin A");
        assert!(drafts[2].kind.is_none());
        assert!(drafts.iter().all(|d| d.room.id == 3));
    }

    #[test]
    fn test_location_batch_ignores_extra_fields() {
        let drafts = parse_storage_location_batch("Rack|Wire|Metal", 1).unwrap();
        assert_eq!(drafts[0].kind.as_deref(), Some("Wire"));
    }
}
