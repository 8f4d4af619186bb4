use core::num::NonZeroU32;
use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Fixed number of records per page.
pub const PAGE_SIZE: usize = 10;

/// 1-based page index. Zero is not a page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| DomainError::validation("page must be 1 or greater"))
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl core::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Index range of `page` within a collection of `len` records.
///
/// Pages past the end produce an empty range anchored at `len`.
pub fn page_bounds(len: usize, page: PageNumber) -> Range<usize> {
    let start = (page.get() as usize - 1).saturating_mul(PAGE_SIZE);
    let end = start.saturating_add(PAGE_SIZE);
    start.min(len)..end.min(len)
}

/// One page of an ordered collection together with the collection size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: PageNumber,
    /// Size of the whole collection, not of this page.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total: self.total,
        }
    }
}

/// Slice `records[(p-1)*10 .. p*10]` out of an ordered collection.
///
/// Out-of-range pages yield an empty page; deciding whether that means
/// "not found" is up to the caller.
pub fn paginate<T>(records: Vec<T>, page: PageNumber) -> Page<T> {
    let total = records.len();
    let range = page_bounds(total, page);
    let items = records
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();

    Page {
        items,
        number: page,
        total,
    }
}
