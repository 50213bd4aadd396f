use serde::Serialize;

pub const PAGE_SIZE: u64 = 10;
pub const WINDOW_SIZE: u64 = 5;

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub struct PaginationWindow {
    pub current_page: u64,
    pub total_pages: u64,
    pub visible_pages: Vec<u64>,
    /// Show a "1" shortcut before the window
    pub show_first: bool,
    /// Show an ellipsis between the "1" shortcut and the window
    pub leading_gap: bool,
    /// Show a `total_pages` shortcut after the window
    pub show_last: bool,
    pub trailing_gap: bool,
}

pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Pagination controls only make sense when there is more than one page
pub fn is_shown(total_count: u64, page_size: u64) -> bool {
    total_count > page_size
}

/// Whether a request to go to `page` may be honored
pub fn accepts(page: u64, total_count: u64, page_size: u64) -> bool {
    page >= 1 && page <= total_pages(total_count, page_size)
}

/// `current_page` is trusted to be valid; callers reject bad pages via
/// [`accepts`]. The window is centered on `current_page` and slides inward
/// when it would run past either end, so it always holds
/// `min(window_size, total_pages)` pages.
pub fn compute(
    total_count: u64,
    page_size: u64,
    current_page: u64,
    window_size: u64,
) -> PaginationWindow {
    let total_pages = total_pages(total_count, page_size);
    let start = current_page.saturating_sub(window_size / 2).max(1);
    let end = total_pages.min(start + window_size.saturating_sub(1));
    let start = start.min((end + 1).saturating_sub(window_size)).max(1);

    let visible_pages: Vec<u64> = (start..=end).collect();

    PaginationWindow {
        current_page,
        total_pages,
        show_first: start > 1,
        leading_gap: start > 2,
        show_last: end < total_pages,
        trailing_gap: end + 1 < total_pages,
        visible_pages,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
        assert_eq!(total_pages(27, PAGE_SIZE), 3);
        assert_eq!(total_pages(100, PAGE_SIZE), 10);
        for total in 0..500u64 {
            let expected = (total as f64 / PAGE_SIZE as f64).ceil() as u64;
            assert_eq!(total_pages(total, PAGE_SIZE), expected);
        }
    }

    #[test]
    fn test_empty_results() {
        let window = compute(0, PAGE_SIZE, 1, WINDOW_SIZE);
        assert_eq!(window.total_pages, 0);
        assert!(window.visible_pages.is_empty());
        assert!(!window.show_first && !window.show_last);
    }

    #[test]
    fn test_visibility() {
        assert!(!is_shown(0, PAGE_SIZE));
        assert!(!is_shown(10, PAGE_SIZE));
        assert!(is_shown(11, PAGE_SIZE));
    }

    #[test]
    fn test_accepts() {
        assert!(!accepts(0, 27, PAGE_SIZE));
        assert!(accepts(1, 27, PAGE_SIZE));
        assert!(accepts(3, 27, PAGE_SIZE));
        assert!(!accepts(4, 27, PAGE_SIZE));
        assert!(!accepts(1, 0, PAGE_SIZE));
    }

    #[test]
    fn test_small_result_window() {
        let window = compute(27, PAGE_SIZE, 1, WINDOW_SIZE);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.visible_pages, vec![1, 2, 3]);
        assert!(!window.show_first);
        assert!(!window.show_last);
    }

    #[test]
    fn test_window_centered() {
        let window = compute(200, PAGE_SIZE, 10, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![8, 9, 10, 11, 12]);
        assert!(window.show_first && window.leading_gap);
        assert!(window.show_last && window.trailing_gap);
    }

    #[test]
    fn test_window_clipped() {
        let window = compute(200, PAGE_SIZE, 2, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.show_first);

        let window = compute(200, PAGE_SIZE, 20, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![16, 17, 18, 19, 20]);
        assert!(window.show_first);
        assert!(!window.show_last);

        let window = compute(200, PAGE_SIZE, 19, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_gap_of_one_page_has_no_ellipsis() {
        let window = compute(200, PAGE_SIZE, 4, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![2, 3, 4, 5, 6]);
        assert!(window.show_first);
        assert!(!window.leading_gap);

        let window = compute(70, PAGE_SIZE, 3, WINDOW_SIZE);
        assert_eq!(window.visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(window.show_last);
        assert!(window.trailing_gap);

        let window = compute(60, PAGE_SIZE, 3, WINDOW_SIZE);
        assert!(window.show_last);
        assert!(!window.trailing_gap);
    }

    #[test]
    fn test_window_length() {
        for total_count in [11u64, 35, 50, 51, 99, 1000] {
            let pages = total_pages(total_count, PAGE_SIZE);
            for current in 1..=pages {
                let window = compute(total_count, PAGE_SIZE, current, WINDOW_SIZE);
                assert!(window.visible_pages.contains(&current));
                assert_eq!(
                    window.visible_pages.len() as u64,
                    WINDOW_SIZE.min(pages)
                );
                if current > WINDOW_SIZE / 2 && current + WINDOW_SIZE / 2 <= pages {
                    assert_eq!(window.visible_pages[2], current);
                }
            }
        }
    }
}
