/// Fixed-size pages over the full ranking with a wrapping cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
    total_pages: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            total_pages: 1,
        }
    }

    /// `ceil(len / page_size)`, never less than 1.
    pub fn pages_for(len: usize, page_size: usize) -> usize {
        len.div_ceil(page_size.max(1)).max(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Resize to a new item count, clamping the cursor (modulo) when the
    /// page count shrinks.
    pub fn set_len(&mut self, len: usize) {
        self.total_pages = Self::pages_for(len, self.page_size);
        self.page %= self.total_pages;
    }

    pub fn next(&mut self) -> usize {
        self.page = (self.page + 1) % self.total_pages;
        self.page
    }

    pub fn prev(&mut self) -> usize {
        self.page = (self.page + self.total_pages - 1) % self.total_pages;
        self.page
    }

    /// The active page's slice of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Paginator::pages_for(30, 14), 3);
        assert_eq!(Paginator::pages_for(28, 14), 2);
        assert_eq!(Paginator::pages_for(0, 14), 1);
        assert_eq!(Paginator::pages_for(1, 14), 1);
    }

    #[test]
    fn test_next_wraps() {
        let mut p = Paginator::new(14);
        p.set_len(30);
        assert_eq!(p.next(), 1);
        assert_eq!(p.next(), 2);
        assert_eq!(p.next(), 0);
    }

    #[test]
    fn test_prev_wraps() {
        let mut p = Paginator::new(14);
        p.set_len(30);
        assert_eq!(p.prev(), 2);
        assert_eq!(p.prev(), 1);
    }

    #[test]
    fn test_slice_bounds() {
        let items: Vec<u32> = (0..30).collect();
        let mut p = Paginator::new(14);
        p.set_len(items.len());
        assert_eq!(p.slice(&items).len(), 14);
        p.next();
        assert_eq!(p.slice(&items)[0], 14);
        p.next();
        assert_eq!(p.slice(&items), &[28, 29]);
    }

    #[test]
    fn test_shrink_clamps_page() {
        let mut p = Paginator::new(14);
        p.set_len(30);
        p.next();
        p.next();
        assert_eq!(p.page(), 2);
        p.set_len(20);
        assert_eq!(p.total_pages(), 2);
        assert_eq!(p.page(), 0);
        p.set_len(0);
        assert_eq!(p.page(), 0);
        assert!(p.slice::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let p = Paginator::new(0);
        assert_eq!(p.page_size(), 1);
    }
}
