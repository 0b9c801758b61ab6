/// Page arithmetic for a listing of `total` entries.
///
/// A `page_size` of 0 puts everything on a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub first: usize,
    pub count: usize,
}

impl Pagination {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self { total, page_size }
    }

    pub fn page_count(&self) -> usize {
        if self.total == 0 {
            return 1;
        }
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Clamps `page` to the last page and returns a window that always fits.
    pub fn window(&self, page: usize) -> PageWindow {
        if self.page_size == 0 {
            return PageWindow {
                page: 0,
                first: 0,
                count: self.total,
            };
        }
        let page = page.min(self.page_count() - 1);
        let first = page * self.page_size;
        let count = self.page_size.min(self.total - first);
        PageWindow { page, first, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Pagination::new(10, 3).page_count(), 4);
        assert_eq!(Pagination::new(9, 3).page_count(), 3);
        assert_eq!(Pagination::new(0, 3).page_count(), 1);
        assert_eq!(Pagination::new(7, 0).page_count(), 1);
    }

    #[test]
    fn last_page_is_partial() {
        let window = Pagination::new(10, 3).window(3);
        assert_eq!(
            window,
            PageWindow {
                page: 3,
                first: 9,
                count: 1
            }
        );
    }

    #[test]
    fn pages_past_the_end_clamp_to_last() {
        let window = Pagination::new(10, 4).window(42);
        assert_eq!(window.page, 2);
        assert_eq!(window.first, 8);
        assert_eq!(window.count, 2);
    }

    #[test]
    fn empty_listing_yields_empty_first_page() {
        let window = Pagination::new(0, 25).window(5);
        assert_eq!(
            window,
            PageWindow {
                page: 0,
                first: 0,
                count: 0
            }
        );
    }

    #[test]
    fn zero_page_size_shows_everything() {
        let window = Pagination::new(12, 0).window(3);
        assert_eq!(window.first, 0);
        assert_eq!(window.count, 12);
    }
}
