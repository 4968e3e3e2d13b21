//! Pagination window and page fetching from outside the crate.

use recipes_lib::error::AppError;
use recipes_lib::pagination::{
    DEFAULT_QTY_PAGES, PagedCollection, Paginator, make_pagination, make_pagination_range,
};

fn pages(n: i64) -> Vec<i64> {
    (1..=n).collect()
}

#[test]
fn test_window_walks_through_twenty_pages() {
    let range = pages(20);
    let expected: [(i64, [i64; 4]); 6] = [
        (1, [1, 2, 3, 4]),
        (3, [2, 3, 4, 5]),
        (4, [3, 4, 5, 6]),
        (10, [9, 10, 11, 12]),
        (18, [17, 18, 19, 20]),
        (20, [17, 18, 19, 20]),
    ];

    for (current, window) in expected {
        let result = make_pagination_range(&range, DEFAULT_QTY_PAGES, current);
        assert_eq!(result.pagination, window, "current page {}", current);
    }
}

#[test]
fn test_window_flags_follow_bounds() {
    let range = pages(20);

    for current in 1..=20 {
        let result = make_pagination_range(&range, 4, current);
        let first = result.pagination[0];
        let last = *result.pagination.last().unwrap();

        assert_eq!(result.first_page_out_of_range, first > 1);
        assert_eq!(result.last_page_out_of_range, last < 20);
        assert_eq!(result.total_pages, 20);
        assert_eq!(result.current_page, current);
    }
}

#[test]
fn test_short_range_shows_everything() {
    let result = make_pagination_range(&pages(3), 4, 2);

    assert_eq!(result.pagination, vec![1, 2, 3]);
    assert!(!result.first_page_out_of_range);
    assert!(!result.last_page_out_of_range);
}

#[actix_rt::test]
async fn test_make_pagination_over_in_memory_list() {
    let recipes: Vec<String> = (1..=50).map(|n| format!("Recipe {}", n)).collect();
    let paginator = Paginator::new(recipes, 6);

    assert_eq!(paginator.num_pages().await.unwrap(), 9);

    let (page, pagination) = make_pagination(&paginator, 5, 4).await.unwrap();

    assert_eq!(page.number, 5);
    assert_eq!(page.object_list.first().map(String::as_str), Some("Recipe 25"));
    assert_eq!(page.object_list.len(), 6);
    assert_eq!(pagination.pagination, vec![4, 5, 6, 7]);
    assert!(pagination.first_page_out_of_range);
    assert!(pagination.last_page_out_of_range);
}

#[actix_rt::test]
async fn test_make_pagination_rejects_missing_pages() {
    let paginator = Paginator::new(vec![1, 2, 3], 2);

    for page in [0, -1, 3, 999] {
        let result = make_pagination(&paginator, page, 4).await;
        assert!(matches!(result, Err(AppError::NotFound(_))), "page {}", page);
    }
}
