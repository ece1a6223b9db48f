//! Behavioural coverage for page windowing and navigation.

use pagination::{PageSize, PageWindow, Paginator};
use rstest::{fixture, rstest};

fn size(raw: usize) -> PageSize {
    PageSize::new(raw).expect("test page size is allowed")
}

#[fixture]
fn twelve_products() -> Paginator<u32> {
    Paginator::new((1..=12).collect(), PageSize::FIVE)
}

#[rstest]
#[case(0, 5, 0)]
#[case(1, 5, 1)]
#[case(5, 5, 1)]
#[case(6, 5, 2)]
#[case(12, 5, 3)]
#[case(20, 10, 2)]
#[case(21, 10, 3)]
#[case(100, 25, 4)]
fn total_pages_is_ceiling_of_len_over_size(
    #[case] len: u32,
    #[case] page_size: usize,
    #[case] expected: usize,
) {
    let paginator = Paginator::new((0..len).collect::<Vec<_>>(), size(page_size));
    assert_eq!(paginator.total_pages(), expected);
}

#[rstest]
#[case(0, 5)]
#[case(7, 5)]
#[case(12, 5)]
#[case(30, 15)]
#[case(49, 25)]
fn visible_pages_cover_every_item_exactly_once(#[case] len: u32, #[case] page_size: usize) {
    let mut paginator = Paginator::new((0..len).collect::<Vec<_>>(), size(page_size));
    let mut seen = Vec::new();
    for page in paginator.page_numbers() {
        paginator.go_to(page);
        seen.extend_from_slice(paginator.visible_page());
    }
    assert_eq!(seen, (0..len).collect::<Vec<_>>());
}

#[rstest]
fn twelve_items_split_into_three_pages(mut twelve_products: Paginator<u32>) {
    assert_eq!(twelve_products.total_pages(), 3);
    assert_eq!(twelve_products.visible_page(), &[1, 2, 3, 4, 5]);

    twelve_products.go_to(3);
    assert_eq!(twelve_products.visible_page(), &[11, 12]);
    assert_eq!(
        twelve_products.window(),
        PageWindow {
            first: 11,
            last: 12,
            total: 12
        }
    );
}

#[rstest]
fn go_to_is_idempotent(mut twelve_products: Paginator<u32>) {
    twelve_products.go_to(2);
    let once = twelve_products.visible_page().to_vec();
    twelve_products.go_to(2);
    assert_eq!(twelve_products.visible_page(), once.as_slice());
    assert_eq!(twelve_products.current_page(), 2);
}

#[rstest]
#[case(0, 1)]
#[case(4, 3)]
#[case(usize::MAX, 3)]
fn go_to_clamps_out_of_range_targets(
    mut twelve_products: Paginator<u32>,
    #[case] target: usize,
    #[case] expected: usize,
) {
    twelve_products.go_to(target);
    assert_eq!(twelve_products.current_page(), expected);
}

#[rstest]
fn previous_on_first_page_is_a_no_op(mut twelve_products: Paginator<u32>) {
    assert!(!twelve_products.has_previous());
    twelve_products.previous();
    assert_eq!(twelve_products.current_page(), 1);
}

#[rstest]
fn next_on_last_page_is_a_no_op(mut twelve_products: Paginator<u32>) {
    twelve_products.last();
    assert!(!twelve_products.has_next());
    twelve_products.next();
    assert_eq!(twelve_products.current_page(), 3);
    assert_eq!(twelve_products.visible_page(), &[11, 12]);
}

#[rstest]
fn next_and_previous_step_one_page(mut twelve_products: Paginator<u32>) {
    twelve_products.next();
    assert_eq!(twelve_products.visible_page(), &[6, 7, 8, 9, 10]);
    twelve_products.previous();
    assert_eq!(twelve_products.current_page(), 1);
}

#[rstest]
fn changing_page_size_resets_to_first_page(mut twelve_products: Paginator<u32>) {
    twelve_products.go_to(3);
    twelve_products.set_page_size(size(10));
    assert_eq!(twelve_products.current_page(), 1);
    assert_eq!(twelve_products.total_pages(), 2);

    twelve_products.go_to(2);
    twelve_products.set_page_size(size(5));
    assert_eq!(
        twelve_products.current_page(),
        1,
        "reset applies even when page 2 would still exist"
    );
}

#[rstest]
fn empty_result_set_has_no_pages() {
    let mut paginator: Paginator<u32> = Paginator::default();
    assert_eq!(paginator.total_pages(), 0);
    assert_eq!(paginator.current_page(), 1);
    assert!(paginator.visible_page().is_empty());
    assert_eq!(paginator.page_numbers().count(), 0);
    assert_eq!(paginator.window(), PageWindow::default());

    paginator.next();
    paginator.last();
    paginator.go_to(5);
    assert_eq!(paginator.current_page(), 1);
    assert!(!paginator.has_next());
    assert!(!paginator.has_previous());
}

#[rstest]
fn replacing_items_returns_to_first_page(mut twelve_products: Paginator<u32>) {
    twelve_products.go_to(3);
    twelve_products.set_items(vec![42]);
    assert_eq!(twelve_products.current_page(), 1);
    assert_eq!(twelve_products.visible_page(), &[42]);
}
