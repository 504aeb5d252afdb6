//! Request variants: List, Create, Replace, Delete
//!
//! Each variant is built by the caller from declarative fields only,
//! materialized once against a target endpoint plus bearer token, and
//! executed once. The materialized request is consumed on execution;
//! executing twice (or before initializing) is a request error.

use async_trait::async_trait;
use reqwest::Method;
use url::Url;

use crate::errors::{ClientError, Result};
use crate::http::{ApiResponse, HttpClient, HttpRequest};
use crate::query::{Filters, Sort};

/// Connection target a request is materialized against.
#[derive(Debug, Clone)]
pub struct Target {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    /// Tenant/application scoping segment of the resource path.
    pub property: String,
}

impl Target {
    /// Base resource URL: `proto://host:port/property/collection`.
    fn collection_url(&self, collection: &str) -> Result<Url> {
        let raw = format!(
            "{}://{}:{}/{}/{}",
            self.protocol, self.host, self.port, self.property, collection
        );
        Url::parse(&raw).map_err(|err| ClientError::Request(format!("invalid URL {raw:?}: {err}")))
    }
}

/// A verb-specific API request.
#[async_trait]
pub trait ApiRequest: Send {
    /// Materialize the transport request for the given target and bearer
    /// token. Called exactly once per execution.
    fn initialize(&mut self, target: &Target, bearer: &str) -> Result<()>;

    /// Execute the materialized request, consuming it.
    async fn execute(&mut self, http: &HttpClient) -> Result<ApiResponse>;

    /// The materialized URL, available between initialize and execute.
    /// Usable as a cache key.
    fn url(&self) -> Option<&Url>;
}

fn attach_common_headers(request: &mut HttpRequest, bearer: &str) -> Result<()> {
    request.set_header("Content-Type", "application/json")?;
    request.set_header("Authorization", &format!("Bearer {bearer}"))?;
    Ok(())
}

fn take_prepared(prepared: &mut Option<HttpRequest>) -> Result<HttpRequest> {
    prepared
        .take()
        .ok_or_else(|| ClientError::Request("request not initialized or already executed".into()))
}

/// Serialize a field-selection list to a JSON object of field → 1.
fn fields_to_json(fields: &[String]) -> String {
    let mut map = serde_json::Map::new();
    for field in fields {
        map.insert(field.clone(), serde_json::Value::from(1));
    }
    serde_json::Value::Object(map).to_string()
}

/// Read request against a collection, with filtering, sorting, pagination,
/// field selection and relational compose controls.
///
/// The `compose`, `compose_level` and `compose_all` controls all write the
/// same `compose` query parameter, applied in that order with last-write-wins;
/// callers should set at most one. `metadata` redirects the request to the
/// `/count` sub-path, turning the list into a cardinality query (page/filter
/// parameters are still attached, matching server behavior).
#[derive(Debug, Default)]
pub struct List {
    pub collection: String,
    pub page: u64,
    pub limit: u64,
    pub sort: Option<Sort>,
    pub filter: Option<Filters>,
    pub fields: Option<Vec<String>>,
    pub etag: Option<String>,
    pub metadata: bool,
    pub compose: bool,
    pub compose_level: u64,
    pub compose_all: bool,
    pub skip_cache: bool,
    prepared: Option<HttpRequest>,
}

impl List {
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into(), ..Self::default() }
    }
}

#[async_trait]
impl ApiRequest for List {
    fn initialize(&mut self, target: &Target, bearer: &str) -> Result<()> {
        let mut url = target.collection_url(&self.collection)?;

        if self.metadata {
            let path = format!("{}/count", url.path());
            url.set_path(&path);
        }

        let mut request = HttpRequest::new(Method::GET, url);

        if let Some(etag) = &self.etag {
            request.set_header("If-None-Match", etag)?;
        }
        attach_common_headers(&mut request, bearer)?;

        request.set_param("page", self.page.to_string());
        request.set_param("count", self.limit.to_string());

        if self.skip_cache {
            request.set_param("cache", "false");
        }

        if let Some(sort) = &self.sort {
            request.set_param("sort", sort.to_query_string());
        }

        // Compose flags share one parameter, last write wins.
        if self.compose {
            request.set_param("compose", "true");
        }
        if self.compose_level > 0 {
            request.set_param("compose", self.compose_level.to_string());
        }
        if self.compose_all {
            request.set_param("compose", "all");
        }

        // An empty set serializes to "", so the parameter is omitted outright.
        if let Some(filter) = &self.filter {
            if !filter.is_empty() {
                request.set_param("filter", filter.to_query_string());
            }
        }

        if let Some(fields) = &self.fields {
            request.set_param("fields", fields_to_json(fields));
        }

        self.prepared = Some(request);
        Ok(())
    }

    async fn execute(&mut self, http: &HttpClient) -> Result<ApiResponse> {
        http.execute(take_prepared(&mut self.prepared)?).await
    }

    fn url(&self) -> Option<&Url> {
        self.prepared.as_ref().map(HttpRequest::url)
    }
}

/// Create a document in a collection. An explicit id may be supplied to
/// create at a known identifier.
#[derive(Debug, Default)]
pub struct Create {
    pub collection: String,
    pub id: Option<String>,
    pub body: Vec<u8>,
    prepared: Option<HttpRequest>,
}

impl Create {
    #[must_use]
    pub fn new(collection: impl Into<String>, body: Vec<u8>) -> Self {
        Self { collection: collection.into(), body, ..Self::default() }
    }
}

#[async_trait]
impl ApiRequest for Create {
    fn initialize(&mut self, target: &Target, bearer: &str) -> Result<()> {
        let mut url = target.collection_url(&self.collection)?;
        if let Some(id) = &self.id {
            let path = format!("{}/{id}", url.path());
            url.set_path(&path);
        }

        let mut request = HttpRequest::new(Method::POST, url);
        attach_common_headers(&mut request, bearer)?;
        request.set_body(self.body.clone());

        self.prepared = Some(request);
        Ok(())
    }

    async fn execute(&mut self, http: &HttpClient) -> Result<ApiResponse> {
        http.execute(take_prepared(&mut self.prepared)?).await
    }

    fn url(&self) -> Option<&Url> {
        self.prepared.as_ref().map(HttpRequest::url)
    }
}

/// Replace the document with the given id.
#[derive(Debug, Default)]
pub struct Replace {
    pub collection: String,
    pub id: String,
    pub body: Vec<u8>,
    prepared: Option<HttpRequest>,
}

impl Replace {
    #[must_use]
    pub fn new(collection: impl Into<String>, id: impl Into<String>, body: Vec<u8>) -> Self {
        Self { collection: collection.into(), id: id.into(), body, prepared: None }
    }
}

#[async_trait]
impl ApiRequest for Replace {
    fn initialize(&mut self, target: &Target, bearer: &str) -> Result<()> {
        let mut url = target.collection_url(&self.collection)?;
        let path = format!("{}/{}", url.path(), self.id);
        url.set_path(&path);

        let mut request = HttpRequest::new(Method::PUT, url);
        attach_common_headers(&mut request, bearer)?;
        request.set_body(self.body.clone());

        self.prepared = Some(request);
        Ok(())
    }

    async fn execute(&mut self, http: &HttpClient) -> Result<ApiResponse> {
        http.execute(take_prepared(&mut self.prepared)?).await
    }

    fn url(&self) -> Option<&Url> {
        self.prepared.as_ref().map(HttpRequest::url)
    }
}

/// Delete the document with the given id.
#[derive(Debug, Default)]
pub struct Delete {
    pub collection: String,
    pub id: String,
    prepared: Option<HttpRequest>,
}

impl Delete {
    #[must_use]
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self { collection: collection.into(), id: id.into(), prepared: None }
    }
}

#[async_trait]
impl ApiRequest for Delete {
    fn initialize(&mut self, target: &Target, bearer: &str) -> Result<()> {
        let mut url = target.collection_url(&self.collection)?;
        let path = format!("{}/{}", url.path(), self.id);
        url.set_path(&path);

        let mut request = HttpRequest::new(Method::DELETE, url);
        attach_common_headers(&mut request, bearer)?;

        self.prepared = Some(request);
        Ok(())
    }

    async fn execute(&mut self, http: &HttpClient) -> Result<ApiResponse> {
        http.execute(take_prepared(&mut self.prepared)?).await
    }

    fn url(&self) -> Option<&Url> {
        self.prepared.as_ref().map(HttpRequest::url)
    }
}
