// longbox-api: Async Rust client for the longbox comic library server (REST + push channel)

pub mod error;
pub mod push;
pub mod rest;
pub mod transport;

pub use error::Error;
pub use push::{PushClient, PushFrame, ReconnectConfig};
pub use rest::LibraryClient;
