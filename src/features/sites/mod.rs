//! Recorded tower sites.
//!
//! Holds the `sites` model, the in-memory [`SiteDirectory`] shared by the
//! dashboard and the map, and the service backing `/api/sites`.

pub mod directory;
pub mod dtos;
pub mod models;
pub mod services;

pub use directory::{DirectoryError, SiteDirectory};
pub use services::SiteService;
