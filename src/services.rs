//! Resource service layer.
//!
//! One generic façade maps CRUD operations for a resource type onto HTTP
//! calls through the shared [`ApiClient`]. Books and Authors are structurally
//! identical; the [`ApiResource`] trait carries the only differences —
//! collection path, id slot, and a log label.
//!
//! Every operation returns the raw [`ApiResponse`]: services never judge
//! status codes, the calling test does.

use crate::error::ApiError;
use crate::http::{ApiClient, ApiResponse};
use crate::models::{Author, Book};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::info;

/// The seam that makes the service layer generic over resource types.
pub trait ApiResource: Serialize + DeserializeOwned + Clone {
    /// Collection path under the API base path, e.g. `/Books`.
    const COLLECTION: &'static str;

    /// Overwrite the server-assigned identifier slot.
    fn set_id(&mut self, id: i32);

    /// Short human-readable tag for log lines.
    fn label(&self) -> String;
}

impl ApiResource for Book {
    const COLLECTION: &'static str = "/Books";

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn label(&self) -> String {
        self.title.clone().unwrap_or_else(|| "<untitled>".to_string())
    }
}

impl ApiResource for Author {
    const COLLECTION: &'static str = "/Authors";

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn label(&self) -> String {
        self.full_name()
    }
}

/// Typed CRUD façade for one resource type.
///
/// Stateless between calls: no caching, no session. Borrows the shared
/// client, so a `reset` of the client cannot happen while services built on
/// it are live.
pub struct ResourceService<'a, R: ApiResource> {
    client: &'a ApiClient,
    _marker: PhantomData<R>,
}

pub type BookService<'a> = ResourceService<'a, Book>;
pub type AuthorService<'a> = ResourceService<'a, Author>;

impl<'a, R: ApiResource> ResourceService<'a, R> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    fn item_path(id: i32) -> String {
        format!("{}/{}", R::COLLECTION, id)
    }

    /// GET the whole collection.
    pub fn list_all(&self) -> Result<ApiResponse, ApiError> {
        info!(resource = R::COLLECTION, "Fetching collection");
        self.client.call(Method::GET, R::COLLECTION)
    }

    /// GET a single item. The id is sent as-is — the server is authoritative
    /// on how negative, zero, or unknown ids are answered.
    pub fn get_by_id(&self, id: i32) -> Result<ApiResponse, ApiError> {
        info!(resource = R::COLLECTION, id, "Fetching by id");
        self.client.call(Method::GET, &Self::item_path(id))
    }

    /// POST a new entity. The server assigns the identifier; repeated calls
    /// may create duplicates, and that is the server's business.
    pub fn create(&self, entity: &R) -> Result<ApiResponse, ApiError> {
        info!(resource = R::COLLECTION, entity = %entity.label(), "Creating");
        self.client
            .execute(self.client.request(Method::POST, R::COLLECTION).json(entity))
    }

    /// PUT an entity at `id`, forcing the body id to match the path id so a
    /// mismatch can never originate from this layer.
    pub fn update(&self, id: i32, entity: &R) -> Result<ApiResponse, ApiError> {
        let mut body = entity.clone();
        body.set_id(id);
        info!(resource = R::COLLECTION, id, entity = %body.label(), "Updating");
        self.send_put(id, &body)
    }

    /// PUT without id normalization, for tests that deliberately send a
    /// body/path id mismatch.
    pub fn update_raw(&self, id: i32, entity: &R) -> Result<ApiResponse, ApiError> {
        info!(resource = R::COLLECTION, id, "Updating (raw body)");
        self.send_put(id, entity)
    }

    /// DELETE by id. Success against a non-persistent sandbox is meaningless;
    /// the test decides whether to verify with a post-delete poll.
    pub fn delete(&self, id: i32) -> Result<ApiResponse, ApiError> {
        info!(resource = R::COLLECTION, id, "Deleting");
        self.client.call(Method::DELETE, &Self::item_path(id))
    }

    /// Decode a single entity from a response body.
    pub fn extract_one(&self, response: &ApiResponse) -> Result<R, ApiError> {
        response.json()
    }

    /// Decode a collection from a response body.
    pub fn extract_list(&self, response: &ApiResponse) -> Result<Vec<R>, ApiError> {
        response.json()
    }

    fn send_put(&self, id: i32, body: &R) -> Result<ApiResponse, ApiError> {
        self.client.execute(
            self.client
                .request(Method::PUT, &Self::item_path(id))
                .json(body),
        )
    }
}
