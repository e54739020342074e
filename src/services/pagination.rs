use crate::models::Page;

/// Slice `items` into pages of `page_size` and return the requested one.
///
/// `requested_page` is clamped into range. When it is `None` the last page is
/// returned, so a fresh load or a granularity change lands on the most recent
/// window.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, requested_page: Option<i64>) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);

    if total_pages == 0 {
        return Page::empty();
    }

    let last = total_pages - 1;
    let current = match requested_page {
        Some(page) if page <= 0 => 0,
        Some(page) => (page as u64).min(last as u64) as usize,
        None => last,
    };

    let start = current * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        total_pages,
        current_page: Some(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_pages() {
        let page = paginate::<i32>(&[], 100, Some(3));
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, None);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_defaults_to_last_page() {
        let items: Vec<i32> = (0..250).collect();
        let page = paginate(&items, 100, None);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, Some(2));
        assert_eq!(page.items, (200..250).collect::<Vec<_>>());
    }

    #[test]
    fn test_clamps_out_of_range_requests() {
        let items: Vec<i32> = (0..250).collect();

        let high = paginate(&items, 100, Some(99));
        assert_eq!(high.current_page, Some(2));

        let low = paginate(&items, 100, Some(-4));
        assert_eq!(low.current_page, Some(0));
        assert_eq!(low.items.len(), 100);
        assert_eq!(low.items[0], 0);
    }

    #[test]
    fn test_exact_multiple() {
        let items: Vec<i32> = (0..200).collect();
        let page = paginate(&items, 100, None);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 100);
    }

    #[test]
    fn test_pages_cover_series_without_gaps() {
        let items: Vec<i32> = (0..347).collect();
        let total = paginate(&items, 50, None).total_pages;

        let rebuilt: Vec<i32> = (0..total as i64)
            .flat_map(|p| paginate(&items, 50, Some(p)).items)
            .collect();

        assert_eq!(rebuilt, items);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let items = vec!['a', 'b', 'c'];
        let page = paginate(&items, 0, Some(1));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec!['b']);
    }
}
