//! Integration tests for the laundry store.

use chrono::NaiveDate;
use laundry_store::{
    Clock, Collection, DateRange, LaundryShop, ManualClock, MemoryBackend, NewUser,
    OrderStatus, PaymentMethod, PaymentOutcome, PaymentStatus, ShopConfig, StoreConfig,
    StoreEvent, SubscriptionConfig, SubscriptionFilter, Timestamp,
};
use std::sync::Arc;
use tempfile::TempDir;

fn test_shop(clock: Arc<ManualClock>) -> LaundryShop {
    LaundryShop::with_backend(
        Arc::new(MemoryBackend::new()),
        clock,
        ShopConfig::default(),
        true,
    )
    .unwrap()
}

fn clock_at(iso: &str) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Timestamp::parse(iso).unwrap()))
}

fn form(username: &str, name: &str) -> NewUser {
    NewUser {
        name: name.into(),
        email: format!("{username}@mail.com"),
        phone: "081200000000".into(),
        username: username.into(),
        password: "rahasia".into(),
    }
}

// --- Realistic Workflow Tests ---

#[test]
fn test_customer_order_to_pickup() {
    let clock = clock_at("2024-03-01T09:00:00.000Z");
    let shop = test_shop(clock.clone());

    let sari = shop.session().register(form("sari", "Sari")).unwrap();

    // Place an order: 3 kg of Cuci Setrika at 10000/kg
    let (order, trx) = shop
        .workflow()
        .place_order(&sari, "2", 3.0)
        .unwrap()
        .unwrap();
    assert_eq!(order.total_cost, 30000.0);
    assert_eq!(trx.amount, 30000.0);
    assert_eq!(shop.workflow().pending_payments(&sari.id).unwrap().len(), 1);

    // Not paid yet: no revenue
    assert_eq!(shop.admin_dashboard().unwrap().total_revenue, 0.0);

    clock.advance_millis(5 * 60 * 1000);
    let outcome = shop
        .workflow()
        .complete_payment(&order.id, PaymentMethod::BankTransfer)
        .unwrap();
    assert!(matches!(outcome, PaymentOutcome::Completed(_)));
    assert!(shop.workflow().pending_payments(&sari.id).unwrap().is_empty());

    // Admin marks it done, then ready
    shop.session().logout().unwrap();
    shop.session().login("umar", "umar123").unwrap().unwrap();
    shop.workflow()
        .set_order_status(&order.id, OrderStatus::Done)
        .unwrap();
    shop.workflow()
        .set_order_status(&order.id, OrderStatus::ReadyForPickup)
        .unwrap();

    let dash = shop.admin_dashboard().unwrap();
    assert_eq!(dash.total_customers, 1);
    assert_eq!(dash.total_orders, 1);
    assert_eq!(dash.total_revenue, 30000.0);
    assert_eq!(dash.active_orders, 0);
    assert_eq!(dash.recent_transactions[0].payment_method, "Transfer Bank");

    let mine = shop.customer_dashboard(&sari.id).unwrap();
    assert_eq!(mine.completed_orders, 1);
    assert_eq!(mine.total_spent, 30000.0);
}

#[test]
fn test_snapshot_names_survive_renames() {
    let clock = clock_at("2024-03-01T09:00:00.000Z");
    let shop = test_shop(clock);
    let sari = shop.session().register(form("sari", "Sari")).unwrap();
    let (order, _) = shop.workflow().place_order(&sari, "1", 1.0).unwrap().unwrap();

    shop.repository()
        .packages()
        .update(
            "1",
            laundry_store::PackagePatch {
                name: Some("Cuci Kering Express".into()),
                price: Some(9000.0),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = shop.repository().orders().get_by_id(&order.id).unwrap().unwrap();
    assert_eq!(stored.package_name, "Cuci Kering");
    assert_eq!(stored.total_cost, 7000.0);
}

#[test]
fn test_admin_adds_packages() {
    let clock = clock_at("2024-03-01T09:00:00.000Z");
    let shop = test_shop(clock.clone());
    let millis = clock.now().millis();

    let express = shop.add_package("Cuci Express", 15000.0, "Selesai dalam 6 jam").unwrap();
    let duvet = shop.add_package("Cuci Bed Cover", 20000.0, "").unwrap();
    assert_eq!(express.id, millis.to_string());
    assert_eq!(duvet.id, (millis + 1).to_string());
    assert_eq!(shop.repository().packages().count().unwrap(), 6);
    assert_eq!(shop.repository().packages().get_by_id(&express.id).unwrap(), Some(express.clone()));

    let sari = shop.session().register(form("sari", "Sari")).unwrap();
    assert_ne!(sari.id, express.id);
    assert_ne!(sari.id, duvet.id);

    let (order, _) = shop.workflow().place_order(&sari, &express.id, 2.0).unwrap().unwrap();
    assert_eq!(order.package_name, "Cuci Express");
    assert_eq!(order.total_cost, 30000.0);

    assert!(matches!(
        shop.add_package("Gratis", f64::NAN, ""),
        Err(laundry_store::StoreError::InvalidOperation(_))
    ));
    assert_eq!(shop.repository().packages().count().unwrap(), 6);
}

#[test]
fn test_deleting_user_leaves_orders() {
    let clock = clock_at("2024-03-01T09:00:00.000Z");
    let shop = test_shop(clock);
    let sari = shop.session().register(form("sari", "Sari")).unwrap();
    shop.workflow().place_order(&sari, "1", 1.0).unwrap().unwrap();

    shop.repository().users().delete(&sari.id).unwrap();

    assert_eq!(shop.customer_order_count(&sari.id).unwrap(), 1);
    assert_eq!(shop.repository().transactions().count().unwrap(), 1);
}

#[test]
fn test_report_and_export_over_range() {
    let clock = clock_at("2024-01-10T08:00:00.000Z");
    let shop = test_shop(clock.clone());
    let sari = shop.session().register(form("sari", "Sari, S.E.")).unwrap();
    let budi = shop.session().register(form("budi", "Budi")).unwrap();

    shop.workflow().place_order(&sari, "1", 2.0).unwrap(); // 14000 on Jan 10
    clock.set(Timestamp::parse("2024-01-15T23:30:00.000Z").unwrap());
    shop.workflow().place_order(&budi, "2", 1.0).unwrap(); // 10000 on Jan 15
    clock.set(Timestamp::parse("2024-02-01T08:00:00.000Z").unwrap());
    shop.workflow().place_order(&budi, "2", 5.0).unwrap(); // 50000 on Feb 1

    // The end date is taken at midnight, so the late Jan 15 order is left out
    let january = DateRange::days(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 15),
    );
    let summary = shop.report_summary(&january).unwrap();
    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.total_revenue, 14000.0);
    assert_eq!(summary.active_customers, 1);
    assert_eq!(summary.top_packages[0].name, "Cuci Kering");

    let through_16th = DateRange::days(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 16),
    );
    let summary = shop.report_summary(&through_16th).unwrap();
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.total_revenue, 24000.0);
    assert_eq!(summary.active_customers, 2);

    let whole_january_15 = DateRange::whole_days(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 15),
    );
    assert_eq!(shop.report_summary(&whole_january_15).unwrap().total_orders, 2);

    let everything = shop.report_summary(&DateRange::unbounded()).unwrap();
    assert_eq!(everything.total_orders, 3);
    assert_eq!(everything.top_packages[0].package_id, "2");
    assert_eq!(everything.top_packages[0].orders, 2);

    let export = shop
        .export_orders_csv(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 15),
        )
        .unwrap();
    assert_eq!(export.file_name, "laporan_2024-01-01_2024-01-15.csv");
    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"Sari, S.E.\""));

    let export = shop
        .export_orders_csv(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 16),
        )
        .unwrap();
    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with(",Budi,Cuci Setrika,1,10000,Antrian"));
}

#[test]
fn test_transaction_history_newest_first() {
    let clock = clock_at("2024-01-01T08:00:00.000Z");
    let shop = test_shop(clock.clone());
    let sari = shop.session().register(form("sari", "Sari")).unwrap();

    for day in 0..3 {
        clock.advance_millis(24 * 60 * 60 * 1000);
        shop.workflow().place_order(&sari, "3", 1.0 + day as f64).unwrap();
    }

    let history = shop
        .transaction_history(&sari.id, &DateRange::unbounded())
        .unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].date > history[1].date);
    assert!(history[1].date > history[2].date);

    let from_third = DateRange {
        start: Some(Timestamp::parse("2024-01-03T00:00:00.000Z").unwrap()),
        end: None,
    };
    assert_eq!(shop.transaction_history(&sari.id, &from_third).unwrap().len(), 2);
    assert_eq!(shop.order_history(&sari.id).unwrap()[0].weight, 3.0);
}

#[test]
fn test_admin_search() {
    let clock = clock_at("2024-01-01T08:00:00.000Z");
    let shop = test_shop(clock);
    let sari = shop.session().register(form("sari", "Sari")).unwrap();
    let budi = shop.session().register(form("budi", "Budi")).unwrap();
    shop.workflow().place_order(&sari, "1", 1.0).unwrap();
    let (budi_order, _) = shop.workflow().place_order(&budi, "4", 1.0).unwrap().unwrap();
    shop.workflow()
        .set_order_status(&budi_order.id, OrderStatus::Done)
        .unwrap();

    assert_eq!(shop.search_orders("lipat", None).unwrap().len(), 1);
    assert_eq!(
        shop.search_orders("", Some(OrderStatus::Done)).unwrap()[0].id,
        budi_order.id
    );
    // The admin account is never listed as a customer
    assert!(shop.search_customers("admin").unwrap().is_empty());
    assert_eq!(shop.search_customers("budi@").unwrap().len(), 1);
}

// --- Persistence ---

#[test]
fn test_file_backed_shop_restores_session() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("shop"),
        ..Default::default()
    };

    let order_id = {
        let shop = LaundryShop::open(config.clone(), ShopConfig::default()).unwrap();
        let sari = shop.session().register(form("sari", "Sari")).unwrap();
        let (order, _) = shop.workflow().place_order(&sari, "2", 1.5).unwrap().unwrap();
        order.id
    };

    let shop = LaundryShop::open(config, ShopConfig::default()).unwrap();
    let current = shop.session().current_user().unwrap();
    assert_eq!(current.username, "sari");
    assert_eq!(shop.repository().packages().count().unwrap(), 4);
    assert_eq!(
        shop.repository().orders().get_by_id(&order_id).unwrap().unwrap().total_cost,
        15000.0
    );
}

#[test]
fn test_unseeded_shop_starts_empty() {
    let shop = LaundryShop::with_backend(
        Arc::new(MemoryBackend::new()),
        clock_at("2024-01-01T00:00:00.000Z"),
        ShopConfig::default(),
        false,
    )
    .unwrap();

    assert_eq!(shop.repository().users().count().unwrap(), 0);
    assert!(shop.session().login("umar", "umar123").unwrap().is_none());
}

// --- Subscriptions ---

#[test]
fn test_events_follow_writes() {
    let clock = clock_at("2024-01-01T08:00:00.000Z");
    let shop = test_shop(clock.clone());
    let handle = shop.subscribe(SubscriptionConfig::default());

    let sari = shop.session().register(form("sari", "Sari")).unwrap();
    let (order, _) = shop.workflow().place_order(&sari, "1", 1.0).unwrap().unwrap();
    shop.workflow()
        .complete_payment(&order.id, PaymentMethod::Cash)
        .unwrap();

    let events = handle.drain();
    assert_eq!(
        events,
        vec![
            StoreEvent::CollectionWritten { collection: Collection::Users, len: 2 },
            StoreEvent::SessionChanged { user_id: Some(sari.id.clone()) },
            StoreEvent::CollectionWritten { collection: Collection::Orders, len: 1 },
            StoreEvent::CollectionWritten { collection: Collection::Transactions, len: 1 },
            StoreEvent::CollectionWritten { collection: Collection::Transactions, len: 1 },
            StoreEvent::CollectionWritten { collection: Collection::Orders, len: 1 },
        ]
    );

    let paid = shop
        .repository()
        .transactions()
        .get_by_order_id(&order.id)
        .unwrap()
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(clock.now(), paid.date);
}

#[test]
fn test_session_only_subscription() {
    let shop = test_shop(clock_at("2024-01-01T08:00:00.000Z"));
    let handle = shop.subscribe(SubscriptionConfig {
        filter: SubscriptionFilter::session(),
        ..Default::default()
    });

    shop.session().login("umar", "umar123").unwrap();
    shop.session().logout().unwrap();

    assert_eq!(
        handle.drain(),
        vec![
            StoreEvent::SessionChanged { user_id: Some("1".into()) },
            StoreEvent::SessionChanged { user_id: None },
        ]
    );
    shop.unsubscribe(handle.id);
}
