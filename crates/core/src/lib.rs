//! Domain types, constants and validation shared by every storydesk crate.
//!
//! Nothing in here performs I/O; the database, HTTP and AI layers build on
//! these definitions.

pub mod article;
pub mod bookmark;
pub mod contact;
pub mod email;
pub mod error;
pub mod meeting;
pub mod patch;
pub mod settings;
pub mod story;
pub mod types;
pub mod validation;
