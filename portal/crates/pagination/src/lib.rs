//! In-memory pagination primitives shared by portal list views.
//!
//! [`Paginator`] owns a complete result set and exposes the slice visible on
//! the current page. Navigation never fails: targets outside
//! `[1, total_pages]` clamp silently to the nearest valid page, and changing
//! the page size always returns to page 1.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageSize, Paginator};
//!
//! let items: Vec<u32> = (1..=12).collect();
//! let mut paginator = Paginator::new(items, PageSize::FIVE);
//! assert_eq!(paginator.total_pages(), 3);
//!
//! paginator.go_to(3);
//! assert_eq!(paginator.visible_page(), &[11, 12]);
//!
//! paginator.next();
//! assert_eq!(paginator.current_page(), 3);
//! ```

mod page_size;
mod paginator;

pub use page_size::{PageSize, PageSizeError};
pub use paginator::{PageWindow, Paginator};
