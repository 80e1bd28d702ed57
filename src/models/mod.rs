//! Domain models for Notes Keeper.
//!
//! # Core Concepts
//!
//! - [`Note`]: the only persisted entity. Its id is assigned by the document
//!   store and never changes.
//! - [`NoteInput`]: the three user-editable fields, replaced together.
//! - [`PinInput`]: the pin flag, changed on its own.
//!
//! [`MessageResponse`] and [`ErrorResponse`] are the JSON payloads the API
//! answers with on success and failure.

mod note;
mod response;

pub use note::*;
pub use response::*;
