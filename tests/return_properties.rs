use bookstore_app::books::models::Book;
use bookstore_app::returns::error::ReturnError;
use bookstore_app::returns::models::CreateReturnItem;
use bookstore_app::returns::service::ReturnService;
use bookstore_app::store::{
    BookstoreDb, BookstoreTables, ReturnStore, SeedData, SeedOrder, SeedOrderItem,
};
use bookstore_db::Database;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn database(price_cents: i64, stock: u32, ordered: u32) -> BookstoreDb {
    let seed = SeedData {
        books: vec![Book {
            id: "B1".to_string(),
            title: "The Raven".to_string(),
            author: "Edgar Allen Poe".to_string(),
            price: Decimal::new(price_cents, 2),
            stock,
        }],
        orders: vec![SeedOrder {
            id: "O1".to_string(),
            order_no: "1".to_string(),
            items: vec![SeedOrderItem {
                book_id: "B1".to_string(),
                amount: ordered,
            }],
        }],
    };
    Database::new(BookstoreTables::from_seed(seed).unwrap())
}

fn payload(book_id: &str, order_id: &str, amount: u32) -> CreateReturnItem {
    CreateReturnItem {
        book_id: book_id.to_string(),
        order_id: order_id.to_string(),
        amount,
    }
}

fn stock(db: &BookstoreDb) -> u32 {
    db.read(|tables| tables.find_book_by_id("B1").unwrap().unwrap().stock)
}

proptest! {
    #[test]
    fn accepted_return_adds_exactly_its_amount(
        stock_before in 0u32..10_000,
        ordered in 1u32..100,
        pick in 0u32..100,
    ) {
        let amount = pick % ordered + 1;
        let db = database(999, stock_before, ordered);
        let service = ReturnService::new(db.clone(), false);

        service.create(vec![payload("B1", "O1", amount)]).unwrap();

        prop_assert_eq!(stock(&db), stock_before + amount);
    }

    #[test]
    fn over_return_is_rejected_and_stock_untouched(
        stock_before in 0u32..10_000,
        ordered in 1u32..100,
        excess in 1u32..100,
    ) {
        let db = database(999, stock_before, ordered);
        let service = ReturnService::new(db.clone(), false);

        let err = service
            .create(vec![payload("B1", "O1", ordered + excess)])
            .unwrap_err();

        prop_assert_eq!(
            err,
            ReturnError::AmountExceedsOrdered { requested: ordered + excess, ordered }
        );
        prop_assert_eq!(stock(&db), stock_before);
    }

    #[test]
    fn net_amount_is_current_price_times_amount(
        price_cents in 0i64..1_000_000,
        amount in 1u32..50,
    ) {
        let db = database(price_cents, 0, 50);
        let service = ReturnService::new(db, false);

        let created = service.create(vec![payload("B1", "O1", amount)]).unwrap();
        let listed = service.list().unwrap();

        let expected = Decimal::new(price_cents, 2) * Decimal::from(amount);
        prop_assert_eq!(created[0].net_amount, Some(expected));
        prop_assert_eq!(listed[0].net_amount, Some(expected));
    }

    #[test]
    fn unknown_references_are_not_found(
        book_id in "[A-Z][0-9]{2,4}",
        order_id in "[A-Z][0-9]{2,4}",
        amount in 1u32..10,
    ) {
        let db = database(100, 1, 10);
        let service = ReturnService::new(db.clone(), false);

        let missing_book = service.create(vec![payload(&book_id, "O1", amount)]).unwrap_err();
        prop_assert!(
            matches!(missing_book, ReturnError::BookNotFound { .. }),
            "unexpected {:?}",
            missing_book
        );

        let missing_order = service.create(vec![payload("B1", &order_id, amount)]).unwrap_err();
        prop_assert!(
            matches!(missing_order, ReturnError::OrderNotFound { .. }),
            "unexpected {:?}",
            missing_order
        );
        prop_assert_eq!(stock(&db), 1);
    }
}

#[test]
fn bookstore_scenario() {
    let db = database(1000, 5, 3);
    let service = ReturnService::new(db.clone(), false);

    let created = service.create(vec![payload("B1", "O1", 2)]).unwrap();
    assert_eq!(stock(&db), 7);
    assert_eq!(created[0].net_amount, Some(Decimal::new(2000, 2)));

    let err = service.create(vec![payload("B1", "O1", 5)]).unwrap_err();
    assert!(matches!(err, ReturnError::AmountExceedsOrdered { .. }));

    let err = service.create(vec![payload("B1", "O404", 1)]).unwrap_err();
    assert!(matches!(err, ReturnError::OrderNotFound { .. }));
}
