//! Stable page views.

/// One page of results plus the total count of the underlying set.
///
/// The total always reflects the full resolvable set, so callers can derive
/// page counts even from an empty page past the end.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    /// Slice an already-ordered collection into a page.
    ///
    /// `start = page * size`, `end = min(start + size, total)`. A start past
    /// the end yields an empty page with the true total, not an error.
    pub fn slice(items: Vec<T>, page: u32, size: u32) -> Self {
        let total = items.len() as u64;
        let start = page as usize * size as usize;
        let items = if start >= items.len() {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(start)
                .take(size as usize)
                .collect()
        };
        Self {
            items,
            total,
            page,
            size,
        }
    }
}
