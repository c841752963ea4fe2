#![forbid(unsafe_code)]
//! Document store facade for the mantis service.
//!
//! One collection per entity, typed CRUD plus the simple field-match queries
//! the API surface needs. Two backends: [`MemoryStore`] (hash maps behind
//! tokio mutexes, also the test double) and [`SqliteStore`] (one JSON
//! document per row). Both apply identical ordering and filter semantics, so
//! the server is backend-agnostic behind `Arc<dyn DocumentStore>`.

mod error;
mod memory;
mod order;
mod sqlite;
mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DocumentStore, NotificationFilter};

pub const CRATE_NAME: &str = "mantis-store";
