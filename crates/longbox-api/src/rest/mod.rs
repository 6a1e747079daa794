// REST API client modules
//
// Hand-written client for the longbox library server's JSON endpoints.
// Covers auth, comic page loads, blocked-hash management, and user
// administration. Write-style endpoints answer with a `{ success, error }`
// status body; list endpoints answer with plain payloads.

pub mod auth;
pub mod client;
pub mod comics;
pub mod hashes;
pub mod models;
pub mod users;

pub use client::LibraryClient;
