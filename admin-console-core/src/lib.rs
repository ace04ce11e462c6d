//! Admin Console Core Library
//!
//! Generic list-management controller for admin CRUD pages:
//! - Derived view: search filter, stable single-key sort, fixed-size pages
//! - Add/edit/delete workflow with a re-entrancy guard
//! - Local validation driven by a per-resource schema
//! - Success notices and error banners
//!
//! One [`ListController`] drives any resource described by a
//! [`ResourceSchema`]; the backend is reached through the
//! [`ResourceClient`](admin_console_client::ResourceClient) trait, so tests
//! and hosts can substitute their own implementation.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use admin_console_client::{ClientConfig, HttpResourceClient};
//! use admin_console_core::{resources, ListController};
//!
//! let config = ClientConfig::from_env()?;
//! let schema = resources::role_schema();
//! let client = Arc::new(HttpResourceClient::new(&config, &schema.resource)?);
//! let mut roles = ListController::new(client, schema);
//!
//! roles.load().await?;
//! roles.toggle_sort("name")?;
//! for record in roles.view().items {
//!     println!("{:?}", record.text("name"));
//! }
//! ```

pub mod error;
pub mod form;
pub mod resources;
pub mod services;
pub mod types;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use form::{FormState, ValidationErrors};
pub use services::{ControllerSettings, ListController, Mutation};
pub use types::{
    FieldKind, FieldSpec, FormMode, Notice, PageView, ResourceSchema, SortConfig, SortDirection,
    Submission, ViewState, Workflow, DEFAULT_PAGE_SIZE,
};
