/// Teaser policy for anonymous visitors. Truncation happens after full
/// retrieval; only the response is capped.

pub const PREVIEW_LIMIT: usize = 3;

/// List endpoints: anonymous callers always see a capped list and the
/// `is_limited` flag, even when fewer than the cap exist.
pub fn preview_list<T>(items: Vec<T>, authenticated: bool) -> (Vec<T>, bool) {
    if authenticated {
        (items, false)
    } else {
        (items.into_iter().take(PREVIEW_LIMIT).collect(), true)
    }
}

/// Detail endpoints: reviews are only flagged as limited when truncation
/// actually removed something.
pub fn preview_reviews<T>(reviews: Vec<T>, authenticated: bool) -> (Vec<T>, usize, bool) {
    let total = reviews.len();
    if !authenticated && total > PREVIEW_LIMIT {
        (reviews.into_iter().take(PREVIEW_LIMIT).collect(), total, true)
    } else {
        (reviews, total, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_list_is_capped_and_flagged() {
        let (items, limited) = preview_list(vec![1, 2, 3, 4, 5], false);
        assert_eq!(items, vec![1, 2, 3]);
        assert!(limited);
    }

    #[test]
    fn anonymous_short_list_keeps_flag() {
        let (items, limited) = preview_list(vec![1, 2], false);
        assert_eq!(items, vec![1, 2]);
        assert!(limited);
    }

    #[test]
    fn authenticated_list_is_untouched() {
        let (items, limited) = preview_list(vec![1, 2, 3, 4, 5], true);
        assert_eq!(items.len(), 5);
        assert!(!limited);
    }

    #[test]
    fn anonymous_reviews_truncate_only_past_limit() {
        let (reviews, total, limited) = preview_reviews(vec![1, 2, 3], false);
        assert_eq!((reviews.len(), total, limited), (3, 3, false));

        let (reviews, total, limited) = preview_reviews(vec![1, 2, 3, 4], false);
        assert_eq!((reviews.len(), total, limited), (3, 4, true));
    }

    #[test]
    fn authenticated_reviews_never_truncate() {
        let (reviews, total, limited) = preview_reviews(vec![1, 2, 3, 4, 5], true);
        assert_eq!((reviews.len(), total, limited), (5, 5, false));
    }
}
