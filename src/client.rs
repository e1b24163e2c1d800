//! REST client for the inventory server.
//!
//! Wraps a `reqwest::Client` configured from `[api]` and exposes one typed
//! method per endpoint. Implements [`InventorySource`] so the global search
//! aggregator can run directly against the server.
//!
//! # Endpoints
//!
//! | Resource | Paths |
//! |----------|-------|
//! | addresses | `/addresses`, `/addresses/{id}` |
//! | rooms | `/rooms`, `/rooms/{id}`, `/rooms/address/{addressId}`, `/rooms/batch` |
//! | storage locations | `/storage-locations`, `/storage-locations/{id}`, `/storage-locations/room/{roomId}`, `/storage-locations/batch` |
//! | items | `/items`, `/items/{id}`, `/items/location/{locationId}`, `/items/search?keyword=` |
//! | photos | `/item-photos/item/{itemId}`, `/item-photos/upload/{itemId}`, `/item-photos/{id}` |
//!
//! # Errors
//!
//! Transport failures, non-success statuses, and undecodable bodies are all
//! returned as `anyhow` errors naming the method and path. Single-entity
//! lookups map `404` to `Ok(None)`, deletes map it to `Ok(false)`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use home_inventory_core::models::{
    Address, AddressDraft, EntityId, Item, ItemDraft, ItemPhoto, Room, RoomDraft,
    StorageLocation, StorageLocationDraft,
};
use home_inventory_core::source::InventorySource;

use crate::config::ApiConfig;

/// HTTP client for the inventory REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============ Request plumbing ============

    async fn send(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response> {
        debug!(%method, path, "API request");
        let resp = req.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "API request failed");
            anyhow::Error::new(e).context(format!("{} {} failed", method, path))
        })?;
        debug!(status = resp.status().as_u16(), path, "API response");
        Ok(resp)
    }

    async fn expect_success(method: &Method, path: &str, resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %method, path, "API error response");
        bail!(
            "inventory API error {} on {} {}: {}",
            status,
            method,
            path,
            body.trim()
        );
    }

    async fn decode<T: DeserializeOwned>(method: &Method, path: &str, resp: Response) -> Result<T> {
        resp.json::<T>()
            .await
            .with_context(|| format!("Failed to decode response of {} {}", method, path))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let method = Method::GET;
        let resp = self
            .send(method.clone(), path, self.http.get(self.url(path)))
            .await?;
        let resp = Self::expect_success(&method, path, resp).await?;
        Self::decode(&method, path, resp).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let method = Method::GET;
        let resp = self
            .send(method.clone(), path, self.http.get(self.url(path)))
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::expect_success(&method, path, resp).await?;
        Self::decode(&method, path, resp).await.map(Some)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.request(method.clone(), self.url(path)).json(body);
        let resp = self.send(method.clone(), path, req).await?;
        let resp = Self::expect_success(&method, path, resp).await?;
        Self::decode(&method, path, resp).await
    }

    /// `PUT` that maps `404` to `Ok(None)`.
    async fn put_optional<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method = Method::PUT;
        let req = self.http.put(self.url(path)).json(body);
        let resp = self.send(method.clone(), path, req).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::expect_success(&method, path, resp).await?;
        Self::decode(&method, path, resp).await.map(Some)
    }

    async fn delete_path(&self, path: &str) -> Result<bool> {
        let method = Method::DELETE;
        let resp = self
            .send(method.clone(), path, self.http.delete(self.url(path)))
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::expect_success(&method, path, resp).await?;
        Ok(true)
    }

    // ============ Addresses ============

    pub async fn list_addresses(&self) -> Result<Vec<Address>> {
        self.get_json("/addresses").await
    }

    pub async fn get_address(&self, id: EntityId) -> Result<Option<Address>> {
        self.get_optional(&format!("/addresses/{}", id)).await
    }

    pub async fn create_address(&self, draft: &AddressDraft) -> Result<Address> {
        draft.validate()?;
        self.send_json(Method::POST, "/addresses", draft).await
    }

    pub async fn update_address(&self, id: EntityId, draft: &AddressDraft) -> Result<Option<Address>> {
        draft.validate()?;
        self.put_optional(&format!("/addresses/{}", id), draft).await
    }

    pub async fn delete_address(&self, id: EntityId) -> Result<bool> {
        self.delete_path(&format!("/addresses/{}", id)).await
    }

    // ============ Rooms ============

    pub async fn list_rooms_by_address(&self, address_id: EntityId) -> Result<Vec<Room>> {
        self.get_json(&format!("/rooms/address/{}", address_id)).await
    }

    pub async fn get_room(&self, id: EntityId) -> Result<Option<Room>> {
        self.get_optional(&format!("/rooms/{}", id)).await
    }

    pub async fn create_room(&self, draft: &RoomDraft) -> Result<Room> {
        draft.validate()?;
        self.send_json(Method::POST, "/rooms", draft).await
    }

    pub async fn create_rooms_batch(&self, drafts: &[RoomDraft]) -> Result<Vec<Room>> {
        for d in drafts {
            d.validate()?;
        }
        self.send_json(Method::POST, "/rooms/batch", drafts).await
    }

    pub async fn update_room(&self, id: EntityId, draft: &RoomDraft) -> Result<Option<Room>> {
        draft.validate()?;
        self.put_optional(&format!("/rooms/{}", id), draft).await
    }

    pub async fn delete_room(&self, id: EntityId) -> Result<bool> {
        self.delete_path(&format!("/rooms/{}", id)).await
    }

    // ============ Storage locations ============

    pub async fn list_storage_locations_by_room(
        &self,
        room_id: EntityId,
    ) -> Result<Vec<StorageLocation>> {
        self.get_json(&format!("/storage-locations/room/{}", room_id))
            .await
    }

    pub async fn get_storage_location(&self, id: EntityId) -> Result<Option<StorageLocation>> {
        self.get_optional(&format!("/storage-locations/{}", id)).await
    }

    pub async fn create_storage_location(
        &self,
        draft: &StorageLocationDraft,
    ) -> Result<StorageLocation> {
        draft.validate()?;
        self.send_json(Method::POST, "/storage-locations", draft)
            .await
    }

    pub async fn create_storage_locations_batch(
        &self,
        drafts: &[StorageLocationDraft],
    ) -> Result<Vec<StorageLocation>> {
        for d in drafts {
            d.validate()?;
        }
        self.send_json(Method::POST, "/storage-locations/batch", drafts)
            .await
    }

    pub async fn update_storage_location(
        &self,
        id: EntityId,
        draft: &StorageLocationDraft,
    ) -> Result<Option<StorageLocation>> {
        draft.validate()?;
        self.put_optional(&format!("/storage-locations/{}", id), draft)
            .await
    }

    pub async fn delete_storage_location(&self, id: EntityId) -> Result<bool> {
        self.delete_path(&format!("/storage-locations/{}", id))
            .await
    }

    // ============ Items ============

    pub async fn list_items_by_location(&self, location_id: EntityId) -> Result<Vec<Item>> {
        self.get_json(&format!("/items/location/{}", location_id))
            .await
    }

    pub async fn get_item(&self, id: EntityId) -> Result<Option<Item>> {
        self.get_optional(&format!("/items/{}", id)).await
    }

    /// Server-side keyword search over item name and description.
    pub async fn search_items(&self, keyword: &str) -> Result<Vec<Item>> {
        let method = Method::GET;
        let path = "/items/search";
        let req = self
            .http
            .get(self.url(path))
            .query(&[("keyword", keyword)]);
        let resp = self.send(method.clone(), path, req).await?;
        let resp = Self::expect_success(&method, path, resp).await?;
        Self::decode(&method, path, resp).await
    }

    pub async fn create_item(&self, draft: &ItemDraft) -> Result<Item> {
        draft.validate()?;
        self.send_json(Method::POST, "/items", draft).await
    }

    pub async fn update_item(&self, id: EntityId, draft: &ItemDraft) -> Result<Option<Item>> {
        draft.validate()?;
        self.put_optional(&format!("/items/{}", id), draft).await
    }

    pub async fn delete_item(&self, id: EntityId) -> Result<bool> {
        self.delete_path(&format!("/items/{}", id)).await
    }

    // ============ Photos ============

    pub async fn list_photos(&self, item_id: EntityId) -> Result<Vec<ItemPhoto>> {
        self.get_json(&format!("/item-photos/item/{}", item_id))
            .await
    }

    /// Upload a photo file for an item as multipart field `file`.
    pub async fn upload_photo(&self, item_id: EntityId, file: &Path) -> Result<ItemPhoto> {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read photo file: {}", file.display()))?;
        if bytes.is_empty() {
            bail!("photo file is empty: {}", file.display());
        }
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let method = Method::POST;
        let path = format!("/item-photos/upload/{}", item_id);
        let req = self.http.post(self.url(&path)).multipart(form);
        let resp = self.send(method.clone(), &path, req).await?;
        let resp = Self::expect_success(&method, &path, resp).await?;
        Self::decode(&method, &path, resp).await
    }

    pub async fn delete_photo(&self, photo_id: EntityId) -> Result<bool> {
        self.delete_path(&format!("/item-photos/{}", photo_id))
            .await
    }
}

#[async_trait]
impl InventorySource for ApiClient {
    async fn list_items(&self) -> Result<Vec<Item>> {
        self.get_json("/items").await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.get_json("/rooms").await
    }

    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>> {
        self.get_json("/storage-locations").await
    }
}
