mod proxy_handler;

pub use proxy_handler::*;
