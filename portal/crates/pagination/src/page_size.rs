//! Page sizes offered by the "Show entries" selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a page size is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// The value parsed, but is not one of [`PageSize::ALLOWED`].
    #[error("page size {requested} is not supported; choose one of {allowed:?}")]
    Unsupported {
        /// Value supplied by the caller.
        requested: usize,
        /// Supported values.
        allowed: &'static [usize],
    },
    /// The raw input was not a whole number.
    #[error("page size must be a whole number, got {raw:?}")]
    Malformed {
        /// Raw input as supplied.
        raw: String,
    },
}

/// Number of entries shown per page.
///
/// ## Invariants
/// - The wrapped value is always one of [`PageSize::ALLOWED`], so it is never
///   zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Page sizes the product table offers, in ascending order.
    pub const ALLOWED: &'static [usize] = &[5, 10, 15, 20, 25];

    /// Five entries per page; the initial selection.
    pub const FIVE: Self = Self(5);

    /// Validate a raw page size against [`PageSize::ALLOWED`].
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Unsupported`] for any other value.
    pub fn new(requested: usize) -> Result<Self, PageSizeError> {
        if Self::ALLOWED.contains(&requested) {
            Ok(Self(requested))
        } else {
            Err(PageSizeError::Unsupported {
                requested,
                allowed: Self::ALLOWED,
            })
        }
    }

    /// Entries per page as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Every selectable page size, smallest first.
    pub fn options() -> impl Iterator<Item = Self> {
        Self::ALLOWED.iter().copied().map(Self)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::FIVE
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parsed = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| PageSizeError::Malformed {
                raw: raw.to_owned(),
            })?;
        Self::new(parsed)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5)]
    #[case(10)]
    #[case(15)]
    #[case(20)]
    #[case(25)]
    fn accepts_selector_values(#[case] raw: usize) {
        let size = PageSize::new(raw).expect("allowed size");
        assert_eq!(size.get(), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(30)]
    fn rejects_values_outside_selector(#[case] raw: usize) {
        let err = PageSize::new(raw).expect_err("unsupported size");
        assert!(matches!(err, PageSizeError::Unsupported { requested, .. } if requested == raw));
    }

    #[rstest]
    #[case(" 10 ", Ok(10))]
    #[case("ten", Err(()))]
    #[case("-5", Err(()))]
    fn parses_from_text(#[case] raw: &str, #[case] expected: Result<usize, ()>) {
        let parsed = raw.parse::<PageSize>().map(PageSize::get).map_err(|_| ());
        assert_eq!(parsed, expected);
    }

    #[test]
    fn options_follow_allowed_order() {
        let sizes: Vec<usize> = PageSize::options().map(PageSize::get).collect();
        assert_eq!(sizes, PageSize::ALLOWED);
    }

    #[test]
    fn serde_rejects_unsupported_sizes() {
        let ok: PageSize = serde_json::from_str("20").expect("20 is allowed");
        assert_eq!(ok.get(), 20);
        assert!(serde_json::from_str::<PageSize>("12").is_err());
    }
}
