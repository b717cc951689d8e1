pub mod art_pieces;
pub mod franchise;
pub mod menu_items;
