//! In-process mock of the inventory REST server.
//!
//! The server runs on its own thread and runtime so it serves both
//! `#[tokio::test]` clients and the `hinv` binary started with
//! `std::process::Command`.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use home_inventory_core::models::{Address, EntityId, Item, ItemPhoto, Room, StorageLocation};

type Shared = Arc<Mutex<Inventory>>;
type Reply<T> = Result<Json<T>, StatusCode>;

#[derive(Debug, Default)]
pub struct Inventory {
    pub addresses: Vec<Address>,
    pub rooms: Vec<Room>,
    pub locations: Vec<StorageLocation>,
    pub items: Vec<Item>,
    pub photos: Vec<(EntityId, ItemPhoto)>,
    /// Collection list endpoints (`"items"`, `"rooms"`, ...) answering 500.
    pub failing: HashSet<String>,
    next_id: EntityId,
}

impl Inventory {
    /// One address, two rooms, two storage locations, three items.
    pub fn fixture() -> Self {
        let home: Address =
            serde_json::from_value(json!({"id": 1, "name": "Home", "address": "1 Main St"}))
                .unwrap();
        let kitchen = room(1, "Kitchen", Some(&home));
        let garage = room(2, "Garage", Some(&home));
        let drawer = location(1, "Drawer 1", Some("Drawer"), Some(&kitchen));
        let shelf = location(2, "Tool Shelf", Some("Shelf"), Some(&garage));

        Self {
            items: vec![
                item(1, "Kitchen Knife", Some("Chef knife"), 1, Some(&drawer)),
                item(
                    2,
                    "Drill",
                    Some("Cordless drill, kept near the garage door"),
                    1,
                    Some(&shelf),
                ),
                item(3, "Screwdriver Set", None, 12, Some(&shelf)),
            ],
            addresses: vec![home],
            rooms: vec![kitchen, garage],
            locations: vec![drawer, shelf],
            photos: Vec::new(),
            failing: HashSet::new(),
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, collection: &str) -> Result<(), StatusCode> {
        if self.failing.contains(collection) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }

    fn build_address(&self, id: EntityId, body: &Value) -> Result<Address, StatusCode> {
        let name = body["name"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
        Ok(Address {
            id,
            name: name.to_string(),
            street: body["address"].as_str().map(String::from),
            created_at: None,
            updated_at: None,
        })
    }

    fn build_room(&self, id: EntityId, body: &Value) -> Result<Room, StatusCode> {
        let name = body["name"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
        let address_id = body["address"]["id"]
            .as_i64()
            .ok_or(StatusCode::BAD_REQUEST)?;
        let address = self.addresses.iter().find(|a| a.id == address_id);
        let mut room = room(id, name, address);
        room.floor_plan_data = body["floorPlanData"].as_str().map(String::from);
        Ok(room)
    }

    /// Every field is taken from `body`; absent positions become `None`.
    fn build_location(&self, id: EntityId, body: &Value) -> Result<StorageLocation, StatusCode> {
        let name = body["name"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
        let room_id = body["room"]["id"].as_i64().ok_or(StatusCode::BAD_REQUEST)?;
        let room = self.rooms.iter().find(|r| r.id == room_id);
        let mut location = location(id, name, body["type"].as_str(), room);
        location.position_x = body["positionX"].as_f64();
        location.position_y = body["positionY"].as_f64();
        Ok(location)
    }

    fn insert_room(&mut self, body: &Value) -> Result<Room, StatusCode> {
        let id = self.next_id();
        let room = self.build_room(id, body)?;
        self.rooms.push(room.clone());
        Ok(room)
    }

    fn insert_location(&mut self, body: &Value) -> Result<StorageLocation, StatusCode> {
        let id = self.next_id();
        let location = self.build_location(id, body)?;
        self.locations.push(location.clone());
        Ok(location)
    }

    fn build_item(&self, id: EntityId, body: &Value) -> Result<Item, StatusCode> {
        let name = body["name"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
        let location_id = body["storageLocation"]["id"]
            .as_i64()
            .ok_or(StatusCode::BAD_REQUEST)?;
        let location = self.locations.iter().find(|l| l.id == location_id);
        let quantity = body["quantity"].as_u64().unwrap_or(1) as u32;
        Ok(item(
            id,
            name,
            body["description"].as_str(),
            quantity,
            location,
        ))
    }
}

pub fn room(id: EntityId, name: &str, address: Option<&Address>) -> Room {
    Room {
        id,
        name: name.to_string(),
        address: address.cloned(),
        floor_plan_data: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn location(
    id: EntityId,
    name: &str,
    kind: Option<&str>,
    room: Option<&Room>,
) -> StorageLocation {
    StorageLocation {
        id,
        name: name.to_string(),
        kind: kind.map(String::from),
        room: room.cloned(),
        position_x: None,
        position_y: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn item(
    id: EntityId,
    name: &str,
    description: Option<&str>,
    quantity: u32,
    location: Option<&StorageLocation>,
) -> Item {
    Item {
        id,
        name: name.to_string(),
        description: description.map(String::from),
        quantity,
        storage_location: location.cloned(),
        category: None,
        created_at: None,
        updated_at: None,
    }
}

/// A running mock server. Dropping it leaves the server thread running
/// until the test process exits.
pub struct MockServer {
    pub base_url: String,
    state: Shared,
}

impl MockServer {
    pub fn start(inventory: Inventory) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let state: Shared = Arc::new(Mutex::new(inventory));
        let app = router(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn fail(&self, collection: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(collection.to_string());
    }

    pub fn with<T>(&self, f: impl FnOnce(&Inventory) -> T) -> T {
        f(&self.state.lock().unwrap())
    }

    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Inventory) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/addresses", get(list_addresses).post(create_address))
        .route(
            "/api/addresses/{id}",
            get(get_address).put(update_address).delete(delete_address),
        )
        .route("/api/rooms", get(list_rooms).post(create_room))
        .route("/api/rooms/batch", post(create_rooms_batch))
        .route("/api/rooms/address/{id}", get(rooms_by_address))
        .route(
            "/api/rooms/{id}",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route(
            "/api/storage-locations",
            get(list_locations).post(create_location),
        )
        .route("/api/storage-locations/batch", post(create_locations_batch))
        .route("/api/storage-locations/room/{id}", get(locations_by_room))
        .route(
            "/api/storage-locations/{id}",
            get(get_location)
                .put(update_location)
                .delete(delete_location),
        )
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/search", get(search_items))
        .route("/api/items/location/{id}", get(items_by_location))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/item-photos/item/{id}", get(photos_by_item))
        .route("/api/item-photos/upload/{id}", post(upload_photo))
        .route(
            "/api/item-photos/{id}",
            axum::routing::delete(delete_photo),
        )
        .with_state(state)
}

// ============ Addresses ============

async fn list_addresses(State(s): State<Shared>) -> Reply<Vec<Address>> {
    let inv = s.lock().unwrap();
    inv.check("addresses")?;
    Ok(Json(inv.addresses.clone()))
}

async fn get_address(State(s): State<Shared>, Path(id): Path<EntityId>) -> Reply<Address> {
    let inv = s.lock().unwrap();
    let found = inv.addresses.iter().find(|a| a.id == id).cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_address(State(s): State<Shared>, Json(body): Json<Value>) -> Reply<Address> {
    let mut inv = s.lock().unwrap();
    let id = inv.next_id();
    let address = inv.build_address(id, &body)?;
    inv.addresses.push(address.clone());
    Ok(Json(address))
}

async fn update_address(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Reply<Address> {
    let mut inv = s.lock().unwrap();
    let pos = inv
        .addresses
        .iter()
        .position(|a| a.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let address = inv.build_address(id, &body)?;
    inv.addresses[pos] = address.clone();
    Ok(Json(address))
}

async fn delete_address(State(s): State<Shared>, Path(id): Path<EntityId>) -> StatusCode {
    let mut inv = s.lock().unwrap();
    let before = inv.addresses.len();
    inv.addresses.retain(|a| a.id != id);
    deleted(before, inv.addresses.len())
}

// ============ Rooms ============

async fn list_rooms(State(s): State<Shared>) -> Reply<Vec<Room>> {
    let inv = s.lock().unwrap();
    inv.check("rooms")?;
    Ok(Json(inv.rooms.clone()))
}

async fn get_room(State(s): State<Shared>, Path(id): Path<EntityId>) -> Reply<Room> {
    let inv = s.lock().unwrap();
    let found = inv.rooms.iter().find(|r| r.id == id).cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn rooms_by_address(State(s): State<Shared>, Path(id): Path<EntityId>) -> Reply<Vec<Room>> {
    let inv = s.lock().unwrap();
    let rooms = inv
        .rooms
        .iter()
        .filter(|r| r.address.as_ref().is_some_and(|a| a.id == id))
        .cloned()
        .collect();
    Ok(Json(rooms))
}

async fn create_room(State(s): State<Shared>, Json(body): Json<Value>) -> Reply<Room> {
    s.lock().unwrap().insert_room(&body).map(Json)
}

async fn update_room(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Reply<Room> {
    let mut inv = s.lock().unwrap();
    let pos = inv
        .rooms
        .iter()
        .position(|r| r.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let room = inv.build_room(id, &body)?;
    inv.rooms[pos] = room.clone();
    Ok(Json(room))
}

async fn delete_room(State(s): State<Shared>, Path(id): Path<EntityId>) -> StatusCode {
    let mut inv = s.lock().unwrap();
    let before = inv.rooms.len();
    inv.rooms.retain(|r| r.id != id);
    deleted(before, inv.rooms.len())
}

async fn create_rooms_batch(
    State(s): State<Shared>,
    Json(body): Json<Vec<Value>>,
) -> Reply<Vec<Room>> {
    let mut inv = s.lock().unwrap();
    let rooms = body
        .iter()
        .map(|b| inv.insert_room(b))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(rooms))
}

// ============ Storage locations ============

async fn list_locations(State(s): State<Shared>) -> Reply<Vec<StorageLocation>> {
    let inv = s.lock().unwrap();
    inv.check("storage-locations")?;
    Ok(Json(inv.locations.clone()))
}

async fn get_location(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
) -> Reply<StorageLocation> {
    let inv = s.lock().unwrap();
    let found = inv.locations.iter().find(|l| l.id == id).cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn locations_by_room(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
) -> Reply<Vec<StorageLocation>> {
    let inv = s.lock().unwrap();
    let locations = inv
        .locations
        .iter()
        .filter(|l| l.room.as_ref().is_some_and(|r| r.id == id))
        .cloned()
        .collect();
    Ok(Json(locations))
}

async fn create_location(
    State(s): State<Shared>,
    Json(body): Json<Value>,
) -> Reply<StorageLocation> {
    s.lock().unwrap().insert_location(&body).map(Json)
}

async fn update_location(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Reply<StorageLocation> {
    let mut inv = s.lock().unwrap();
    let pos = inv
        .locations
        .iter()
        .position(|l| l.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let location = inv.build_location(id, &body)?;
    inv.locations[pos] = location.clone();
    Ok(Json(location))
}

async fn delete_location(State(s): State<Shared>, Path(id): Path<EntityId>) -> StatusCode {
    let mut inv = s.lock().unwrap();
    let before = inv.locations.len();
    inv.locations.retain(|l| l.id != id);
    deleted(before, inv.locations.len())
}

async fn create_locations_batch(
    State(s): State<Shared>,
    Json(body): Json<Vec<Value>>,
) -> Reply<Vec<StorageLocation>> {
    let mut inv = s.lock().unwrap();
    let locations = body
        .iter()
        .map(|b| inv.insert_location(b))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(locations))
}

// ============ Items ============

async fn list_items(State(s): State<Shared>) -> Reply<Vec<Item>> {
    let inv = s.lock().unwrap();
    inv.check("items")?;
    Ok(Json(inv.items.clone()))
}

async fn get_item(State(s): State<Shared>, Path(id): Path<EntityId>) -> Reply<Item> {
    let inv = s.lock().unwrap();
    let found = inv.items.iter().find(|i| i.id == id).cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn items_by_location(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
) -> Reply<Vec<Item>> {
    let inv = s.lock().unwrap();
    let items = inv
        .items
        .iter()
        .filter(|i| i.storage_location.as_ref().is_some_and(|l| l.id == id))
        .cloned()
        .collect();
    Ok(Json(items))
}

async fn search_items(
    State(s): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<Vec<Item>> {
    let keyword = params
        .get("keyword")
        .ok_or(StatusCode::BAD_REQUEST)?
        .to_lowercase();
    let inv = s.lock().unwrap();
    let items = inv
        .items
        .iter()
        .filter(|i| {
            i.name.to_lowercase().contains(&keyword)
                || i
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&keyword))
        })
        .cloned()
        .collect();
    Ok(Json(items))
}

async fn create_item(State(s): State<Shared>, Json(body): Json<Value>) -> Reply<Item> {
    let mut inv = s.lock().unwrap();
    let id = inv.next_id();
    let item = inv.build_item(id, &body)?;
    inv.items.push(item.clone());
    Ok(Json(item))
}

async fn update_item(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Reply<Item> {
    let mut inv = s.lock().unwrap();
    let pos = inv
        .items
        .iter()
        .position(|i| i.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let item = inv.build_item(id, &body)?;
    inv.items[pos] = item.clone();
    Ok(Json(item))
}

async fn delete_item(State(s): State<Shared>, Path(id): Path<EntityId>) -> StatusCode {
    let mut inv = s.lock().unwrap();
    let before = inv.items.len();
    inv.items.retain(|i| i.id != id);
    deleted(before, inv.items.len())
}

// ============ Photos ============

async fn photos_by_item(
    State(s): State<Shared>,
    Path(id): Path<EntityId>,
) -> Reply<Vec<ItemPhoto>> {
    let inv = s.lock().unwrap();
    let photos = inv
        .photos
        .iter()
        .filter(|(item_id, _)| *item_id == id)
        .map(|(_, p)| p.clone())
        .collect();
    Ok(Json(photos))
}

async fn upload_photo(
    State(s): State<Shared>,
    Path(item_id): Path<EntityId>,
    mut multipart: Multipart,
) -> Reply<ItemPhoto> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        upload = Some((file_name, bytes.len()));
    }
    let Some((file_name, size)) = upload else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if size == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut inv = s.lock().unwrap();
    if !inv.items.iter().any(|i| i.id == item_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let id = inv.next_id();
    let photo = ItemPhoto {
        id,
        photo_path: format!("{}-{}", id, file_name),
        item: None,
        created_at: None,
    };
    inv.photos.push((item_id, photo.clone()));
    Ok(Json(photo))
}

async fn delete_photo(State(s): State<Shared>, Path(id): Path<EntityId>) -> StatusCode {
    let mut inv = s.lock().unwrap();
    let before = inv.photos.len();
    inv.photos.retain(|(_, p)| p.id != id);
    deleted(before, inv.photos.len())
}

fn deleted(before: usize, after: usize) -> StatusCode {
    if after == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
