//! Notes Keeper: a small note-taking service and its terminal client.
//!
//! - [`db`]: JSON document store backed by SQLite.
//! - [`store`]: the note gateway over the `notes` collection.
//! - [`api`]: REST surface exposing the gateway.
//! - [`client`]: HTTP client, board controller and text rendering.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod store;
