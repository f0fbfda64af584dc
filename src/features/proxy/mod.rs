//! Allow-listed pass-through REST surface over the data service.

pub mod dtos;
pub mod handlers;
pub mod resource;
pub mod routes;
pub mod services;

pub use resource::Resource;
pub use routes::routes;
pub use services::ProxyService;
