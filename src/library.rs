//! The item list's data: metadata lookup, ordering, reordering and totals.

mod display;
mod model;
mod order;
mod reorder;
mod scan;
mod totals;

pub use display::{format_date, format_duration, format_size};
pub use model::{Icon, MediaItem};
pub use order::{SortKey, SortOrder, compare, sort_items};
pub use reorder::{move_block, move_item};
pub use scan::{expand_paths, item_from_path, items_from_paths, scan_dir};
pub use totals::{Totals, totals, totals_of};
