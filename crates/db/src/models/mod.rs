//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod art_piece;
pub mod franchise_inquiry;
pub mod menu_item;
