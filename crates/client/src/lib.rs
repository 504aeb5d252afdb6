//! # docgate-client
//!
//! Client library for document-style HTTP data APIs: authenticated CRUD
//! against remote resource collections plus lifecycle management of the
//! bearer credential authorizing those requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  execute   ┌───────────────┐  token  ┌─────────┐
//! │  caller  │ ─────────► │  Client       │ ──────► │ Wallet  │
//! └──────────┘            │  (facade)     │         └─────────┘
//!       │                 └───────┬───────┘
//!       │ builds                  │ initialize + execute
//!       ▼                         ▼
//!  List / Create          materialized HttpRequest
//!  Replace / Delete       over the shared transport
//! ```
//!
//! Requests are declarative value objects; `Client::execute` injects a fresh
//! bearer token, materializes the transport request and runs it once.
//!
//! ## Usage
//!
//! ```no_run
//! use docgate_client::{Client, ClientConfig, FieldFilter, Filters, List, Operator, Sort};
//!
//! # async fn example() -> docgate_client::Result<()> {
//! let client = Client::new(ClientConfig::new(
//!     "https", "api.example.com", 8080, "tenant", "client-id", "secret",
//! ))?;
//!
//! let mut list = List::new("articles");
//! list.limit = 25;
//! list.filter = Some(Filters::new([FieldFilter::string("author", Operator::Equals, "bob")]));
//! list.sort = Some(Sort::new().desc("publishedAt"));
//!
//! let (articles, _response) = client.execute_as::<serde_json::Value, _>(&mut list).await?;
//! # let _ = articles;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod client;
pub mod errors;
pub mod http;
pub mod query;
pub mod request;

// Re-export commonly used types for convenience
pub use auth::{Bearer, Credentials, Wallet, RENEWAL_MARGIN_SECONDS};
pub use client::{Client, ClientConfig};
pub use errors::{ClientError, Result};
pub use http::{ApiResponse, HttpClient, HttpClientBuilder, HttpRequest, REQUEST_TIMEOUT_SECS};
pub use query::{FieldFilter, Filters, Operator, Sort};
pub use request::{ApiRequest, Create, Delete, List, Replace, Target};
