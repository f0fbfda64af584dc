//! Map page: marker synchronisation, SVG rendering and per-view sessions.

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod markers;
pub mod routes;
pub mod services;
pub mod session;
pub mod svg;

pub use error::MapError;
pub use routes::routes;
pub use services::MapService;
