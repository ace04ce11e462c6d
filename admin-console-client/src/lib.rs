//! # admin-console-client
//!
//! A generic CRUD client for REST resources exposed as
//! `{base}/api/{resource}`.
//!
//! Every resource speaks the same four operations:
//!
//! | Operation | HTTP | Path |
//! |-----------|------|------|
//! | `get_all` | `GET` | `/api/{resource}` |
//! | `create` | `POST` | `/api/{resource}` |
//! | `update` | `PUT` / `PATCH` | `/api/{resource}/{key}` |
//! | `delete` | `DELETE` | `/api/{resource}/{key}` |
//!
//! Bodies are JSON objects. Records are kept untyped ([`Record`]) so the same
//! client serves every resource shape.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use admin_console_client::{ClientConfig, HttpResourceClient, Record, ResourceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://admin.example.com");
//!     let roles = HttpResourceClient::new(&config, "roles")?;
//!
//!     let mut draft = Record::new();
//!     draft.set("name", "Auditor");
//!     let created = roles.create(&draft).await?;
//!
//!     for role in roles.get_all().await? {
//!         println!("{:?}", role.text("name"));
//!     }
//!
//!     if let Some(key) = created.key_string("id") {
//!         roles.delete(&key).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). There are no
//! retries and no caching: every call is one round trip.
//!
//! - [`ClientError::Transport`]: network failure, or non-2xx without a message
//! - [`ClientError::Server`]: non-2xx with a structured message
//! - [`ClientError::Rejected`]: the server refused a create/update/delete (4xx)
//! - [`ClientError::NotFound`]: keyed update/delete on a missing key

mod config;
mod error;
mod http_client;
mod resource_client;
mod traits;
mod types;
mod utils;

pub use config::{ClientConfig, ConfigError, API_BASE_ENV};
pub use error::{classify_failure, ClientError, Operation, Result};
pub use http_client::HttpUtils;
pub use resource_client::HttpResourceClient;
pub use traits::ResourceClient;
pub use types::{Record, UpdateMethod};

pub use utils::log_sanitizer::truncate_for_log;
