//! Query component shared by all listing endpoints.
//!
//! Stores hand back full, ordered collections; these functions select what a
//! single response shows. None of them reorder their input unless the doc
//! says so.

mod group;
mod page;
mod pick;
mod search;

pub use group::group_contiguous;
pub use page::{PAGE_SIZE, Page, PageNumber, page_bounds, paginate};
pub use pick::{Pick, pick_unseen};
pub use search::{contains_ci, filter_eq, search};
