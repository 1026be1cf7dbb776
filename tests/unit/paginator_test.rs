//! Unit tests for the dashboard Paginator.

use std::sync::{Arc, Mutex};

use linksaver::managers::page_manager::Paginator;
use linksaver::types::page::PageItem::{self, Ellipsis, Page};
use rstest::rstest;

fn paginator(total: usize) -> Paginator {
    let mut p = Paginator::new(12);
    p.set_total_items(total);
    p
}

fn labels(items: &[PageItem]) -> Vec<String> {
    items.iter().map(|p| p.label()).collect()
}

#[test]
fn test_starts_on_first_page() {
    let p = paginator(25);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 3);
    assert!(p.layout().shows_controls());
}

#[test]
fn test_page_slices() {
    let items: Vec<usize> = (0..25).collect();
    let mut p = paginator(items.len());

    assert_eq!(p.page(&items), &items[0..12]);
    p.go_to_page(2);
    assert_eq!(p.page(&items), &items[12..24]);
    p.go_to_page(3);
    assert_eq!(p.page(&items), &[24]);
}

#[rstest]
#[case(0, 1)]
#[case(-3, 1)]
#[case(2, 2)]
#[case(99, 3)]
fn test_go_to_page_clamps(#[case] requested: i64, #[case] expected: usize) {
    let mut p = paginator(25);
    assert_eq!(p.go_to_page(requested), expected);
    assert_eq!(p.current_page(), expected);
}

#[test]
fn test_next_and_previous_stop_at_the_ends() {
    let mut p = paginator(25);
    assert_eq!(p.previous(), 1);
    assert_eq!(p.next(), 2);
    assert_eq!(p.next(), 3);
    assert_eq!(p.next(), 3);
    assert!(!p.layout().has_next());
    assert!(p.layout().has_previous());
}

#[test]
fn test_listeners_fire_on_every_navigation() {
    let mut p = paginator(25);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    p.on_page_change(Box::new(move |page| sink.lock().unwrap().push(page)));

    p.go_to_page(2);
    p.go_to_page(2);
    p.go_to_page(50);

    assert_eq!(*seen.lock().unwrap(), vec![2, 2, 3]);
}

#[test]
fn test_shrinking_collection_pulls_page_back_silently() {
    let mut p = paginator(25);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    p.on_page_change(Box::new(move |page| sink.lock().unwrap().push(page)));

    p.go_to_page(3);
    p.set_total_items(24);
    assert_eq!(p.current_page(), 2);
    p.set_total_items(0);
    assert_eq!(p.current_page(), 1);

    assert_eq!(*seen.lock().unwrap(), vec![3]);
}

#[test]
fn test_growing_collection_keeps_page() {
    let mut p = paginator(25);
    p.go_to_page(2);
    p.set_total_items(100);
    assert_eq!(p.current_page(), 2);
}

#[test]
fn test_single_page_hides_controls() {
    let p = paginator(12);
    assert_eq!(p.total_pages(), 1);
    assert!(!p.layout().shows_controls());
    assert!(p.page_numbers().is_empty());
}

#[test]
fn test_page_strip_with_ellipses() {
    let mut p = paginator(12 * 10);
    p.go_to_page(5);
    assert_eq!(
        p.page_numbers(),
        vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
    );
    assert_eq!(labels(&p.page_numbers()), vec!["1", "…", "4", "5", "6", "…", "10"]);
}

#[rstest]
#[case(1, vec![Page(1), Page(2), Ellipsis, Page(10)])]
#[case(3, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)])]
#[case(10, vec![Page(1), Ellipsis, Page(9), Page(10)])]
fn test_page_strip_at_edges(#[case] current: i64, #[case] expected: Vec<PageItem>) {
    let mut p = paginator(12 * 10);
    p.go_to_page(current);
    assert_eq!(p.page_numbers(), expected);
}

#[test]
fn test_page_size_change_reclamps() {
    let mut p = paginator(25);
    p.go_to_page(3);
    p.set_page_size(25);
    assert_eq!(p.page_size(), 25);
    assert_eq!(p.current_page(), 1);

    p.set_page_size(0);
    assert_eq!(p.page_size(), 1);
}
