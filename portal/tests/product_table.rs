//! Product table behaviour through the public API.

use pagination::PageSize;
use portal::domain::ports::FixtureProductCatalogue;
use portal::domain::{Product, ProductTable};
use portal::inbound::console::render_product_page;
use rstest::{fixture, rstest};

fn product(id: u32) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price: f64::from(id) + 0.99,
        image_url: format!("https://img.example/{id}.png"),
        category: "electronics".to_owned(),
        rating: None,
    }
}

#[fixture]
fn catalogue() -> FixtureProductCatalogue {
    FixtureProductCatalogue::new((1..=20).map(product).collect())
}

#[rstest]
#[tokio::test]
async fn loads_and_walks_every_page(catalogue: FixtureProductCatalogue) {
    let mut table = ProductTable::load(&catalogue, PageSize::FIVE)
        .await
        .expect("fixture catalogue loads");

    let mut seen = Vec::new();
    loop {
        seen.extend(table.rows().into_iter().map(|row| row.id));
        if !table.paginator().has_next() {
            break;
        }
        table.paginator_mut().next();
    }

    assert_eq!(seen, (1..=20).collect::<Vec<_>>());
    assert_eq!(table.summary(), "Showing 16 to 20 of 20 entries");
}

#[rstest]
#[tokio::test]
async fn page_size_change_returns_to_first_page(catalogue: FixtureProductCatalogue) {
    let mut table = ProductTable::load(&catalogue, PageSize::FIVE)
        .await
        .expect("fixture catalogue loads");
    table.paginator_mut().go_to(3);
    assert_eq!(table.summary(), "Showing 11 to 15 of 20 entries");

    table
        .paginator_mut()
        .set_page_size(PageSize::new(15).expect("supported size"));

    assert_eq!(table.paginator().current_page(), 1);
    assert_eq!(table.paginator().total_pages(), 2);
    assert_eq!(table.summary(), "Showing 1 to 15 of 20 entries");
}

#[rstest]
#[case(0, 1)]
#[case(2, 2)]
#[case(99, 4)]
#[tokio::test]
async fn out_of_range_pages_are_clamped(
    catalogue: FixtureProductCatalogue,
    #[case] requested: usize,
    #[case] landed: usize,
) {
    let mut table = ProductTable::load(&catalogue, PageSize::FIVE)
        .await
        .expect("fixture catalogue loads");
    table.paginator_mut().go_to(requested);
    assert_eq!(table.paginator().current_page(), landed);
}

#[rstest]
#[tokio::test]
async fn console_page_shows_formatted_prices(catalogue: FixtureProductCatalogue) {
    let table = ProductTable::load(&catalogue, PageSize::FIVE)
        .await
        .expect("fixture catalogue loads");
    let rendered = render_product_page(&table);
    assert!(rendered.contains("$1.99"));
    assert!(rendered.contains("Showing 1 to 5 of 20 entries"));
}
