//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod art_piece_repo;
pub mod franchise_inquiry_repo;
pub mod menu_item_repo;

pub use art_piece_repo::ArtPieceRepo;
pub use franchise_inquiry_repo::FranchiseInquiryRepo;
pub use menu_item_repo::MenuItemRepo;
