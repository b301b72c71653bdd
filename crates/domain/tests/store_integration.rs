//! Integration tests for the order store.
//!
//! These exercise the store purely through its public command interface and
//! derived reads, the way a rendering layer would.

use domain::{
    CatalogSnapshot, Category, LoadStatus, MenuItem, MenuItemId, Money, OrderStore, Restaurant,
    StoreCommand,
};

fn item(id: &str, cents: i64) -> MenuItem {
    MenuItem::new(id, id, Money::from_cents(cents), "mains")
}

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(
        Restaurant::new("r1", "Trattoria")
            .with_logo("logo.png")
            .with_address("1 Main St"),
        vec![
            Category::new("c1", "Starters", vec![item("bruschetta", 650)]),
            Category::new("c2", "Mains", vec![item("lasagne", 1450)]),
        ],
    )
}

mod cart_commands {
    use super::*;

    #[test]
    fn removing_twice_equals_removing_once() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));
        store.dispatch(StoreCommand::AddToCart(item("pasta", 800)));

        store.dispatch(StoreCommand::remove_from_cart("pizza"));
        let once = store.state().clone();

        store.dispatch(StoreCommand::remove_from_cart("pizza"));
        assert_eq!(store.state(), &once);
    }

    #[test]
    fn repeated_adds_collapse_into_one_line() {
        let mut store = OrderStore::new();
        let adds = ["pizza", "pasta", "pizza", "salad", "pizza", "pasta"];
        for id in adds {
            store.dispatch(StoreCommand::AddToCart(item(id, 100)));
        }

        let cart = store.state().cart();
        assert_eq!(cart.len(), 3);
        for id in ["pizza", "pasta", "salad"] {
            let expected = adds.iter().filter(|a| **a == id).count() as u32;
            assert_eq!(cart.line(&MenuItemId::new(id)).unwrap().quantity, expected);
        }

        let order: Vec<&str> = cart.lines().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(order, vec!["pizza", "pasta", "salad"]);
    }

    #[test]
    fn zero_quantity_update_equals_removal() {
        let mut by_update = OrderStore::new();
        let mut by_remove = OrderStore::new();
        for store in [&mut by_update, &mut by_remove] {
            store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));
            store.dispatch(StoreCommand::AddToCart(item("pasta", 800)));
        }

        by_update.dispatch(StoreCommand::update_quantity("pizza", 0));
        by_remove.dispatch(StoreCommand::remove_from_cart("pizza"));

        assert_eq!(by_update.state(), by_remove.state());
        assert!(by_update.state().cart().line(&MenuItemId::new("pizza")).is_none());
    }

    #[test]
    fn totals_are_price_times_quantity() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::AddToCart(item("a", 120)));
        store.dispatch(StoreCommand::update_quantity("a", 2));
        store.dispatch(StoreCommand::AddToCart(item("b", 80)));

        assert_eq!(store.cart_total(), Money::from_cents(320));
        assert_eq!(store.cart_item_count(), 3);
    }

    #[test]
    fn negative_prices_are_stored_as_given() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::AddToCart(item("discount", -200)));
        store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));

        assert_eq!(store.cart_total().cents(), 700);
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::AddToCart(item("yacht", 10_000_000_000)));
        store.dispatch(StoreCommand::update_quantity("yacht", 1_000_000_000));
        store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));

        assert_eq!(store.cart_total(), Money::from_cents(i64::MAX));
        assert_eq!(store.cart_item_count(), 1_000_000_001);
        assert_eq!(store.state().cart().summary().total.cents(), i64::MAX);
    }
}

mod loading {
    use super::*;

    #[test]
    fn restaurant_data_settles_the_load() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::set_error(Some("x")));
        assert!(!store.state().is_loading());

        let snapshot = catalog();
        store.dispatch(StoreCommand::SetRestaurantData(snapshot.clone()));

        let state = store.state();
        assert_eq!(state.restaurant(), Some(&snapshot.restaurant));
        assert_eq!(state.categories(), snapshot.categories.as_slice());
        assert_eq!(state.selected_category().map(|c| c.as_str()), Some("c1"));
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.load_status(), LoadStatus::Settled);
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::select_category("c9"));
        store.dispatch(StoreCommand::SetRestaurantData(CatalogSnapshot::new(
            Restaurant::new("r2", "Empty Kitchen"),
            vec![],
        )));

        assert!(store.state().selected_category().is_none());
    }

    #[test]
    fn reload_keeps_the_cart() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::SetRestaurantData(catalog()));
        store.dispatch(StoreCommand::AddToCart(item("lasagne", 1450)));

        let token = store.begin_load();
        store.complete_load(token, Ok(catalog()));

        assert_eq!(store.cart_item_count(), 1);
    }

    #[test]
    fn overlapping_loads_apply_only_the_latest() {
        let mut store = OrderStore::new();
        let first = store.begin_load();
        let second = store.begin_load();

        assert!(store.complete_load(second, Err("menu unavailable".to_string())));
        assert!(!store.complete_load(first, Ok(catalog())));

        assert!(store.state().restaurant().is_none());
        assert_eq!(store.state().load_status(), LoadStatus::Failed);
    }
}

mod isolation {
    use super::*;

    #[test]
    fn selecting_a_category_touches_nothing_else() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::SetRestaurantData(catalog()));
        store.dispatch(StoreCommand::AddToCart(item("lasagne", 1450)));
        let before = store.state().clone();

        store.dispatch(StoreCommand::select_category("c2"));
        let after = store.state();

        assert_eq!(after.cart(), before.cart());
        assert_eq!(after.restaurant(), before.restaurant());
        assert_eq!(after.categories(), before.categories());
        assert_eq!(after.selected_category().map(|c| c.as_str()), Some("c2"));
    }

    #[test]
    fn unknown_json_command_changes_nothing() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));
        let before = store.state().clone();

        let cmd: StoreCommand = serde_json::from_str(r#"{"type":"SPLIT_BILL","ways":3}"#).unwrap();
        store.dispatch(cmd);

        assert_eq!(store.state(), &before);
    }
}

mod observers {
    use super::*;

    #[tokio::test]
    async fn subscriber_task_receives_published_state() {
        let mut store = OrderStore::new();
        let mut rx = store.subscribe();

        let watcher = tokio::spawn(async move {
            rx.changed().await.unwrap();
            rx.borrow().cart_item_count()
        });

        store.dispatch(StoreCommand::AddToCart(item("pizza", 900)));

        assert_eq!(watcher.await.unwrap(), 1);
    }

    #[test]
    fn late_subscriber_sees_current_state() {
        let mut store = OrderStore::new();
        store.dispatch(StoreCommand::SetRestaurantData(catalog()));

        let rx = store.subscribe();
        assert_eq!(rx.borrow().restaurant().unwrap().name, "Trattoria");
    }
}
