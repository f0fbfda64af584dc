pub mod dtos;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod template;

pub use routes::routes;
pub use services::ChecklistService;
