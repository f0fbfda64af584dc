mod proxy_dto;

pub use proxy_dto::*;
