//! Folio interval and its slice semantics.

/// Inclusive 1-based folio interval `[from, to]`.
///
/// `from == 0` means "start of document", exactly like `from == 1`. `to` may
/// run past the end of the document; slicing clamps instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolioRange {
    pub from: usize,
    pub to: usize,
}

impl FolioRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// 0-based start index.
    pub fn start_index(&self) -> usize {
        self.from.saturating_sub(1)
    }

    /// Clamped sub-slice of `items` covered by this interval. Empty when `to <= start`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.to.min(items.len());
        let start = self.start_index().min(end);
        &items[start..end]
    }
}
