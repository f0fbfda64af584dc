mod map_service;

pub use map_service::MapService;
