//! Ratatui widgets for the stats views.

pub mod keyboard;
pub mod ranked_list;

pub use keyboard::KeyboardHeatmap;
pub use ranked_list::RankedList;
