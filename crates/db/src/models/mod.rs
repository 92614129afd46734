//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches (`Option<Option<T>>` on
//!   nullable columns, see [`storydesk_core::patch`])
//!
//! Everything crossing the HTTP boundary is camelCase.

pub mod article;
pub mod bookmark;
pub mod contact;
pub mod meeting;
pub mod research;
pub mod settings;
pub mod story;
pub mod transcript;
pub mod user;
