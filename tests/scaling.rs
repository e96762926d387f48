//! Volume and concurrency tests.

use laundry_store::{
    DateRange, LaundryShop, ManualClock, MemoryBackend, NewUser, OrderStatus, PaymentMethod,
    RecordStore, Repository, ShopConfig, Timestamp, User,
};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn customer(i: usize) -> NewUser {
    NewUser {
        name: format!("Customer {i}"),
        email: format!("c{i}@mail.com"),
        phone: format!("08{i:09}"),
        username: format!("c{i}"),
        password: "pw".into(),
    }
}

#[test]
fn test_many_orders_many_customers() {
    init_tracing();
    let clock = Arc::new(ManualClock::new(Timestamp::parse("2024-01-01T00:00:00Z").unwrap()));
    let shop = LaundryShop::with_backend(
        Arc::new(MemoryBackend::new()),
        clock.clone(),
        ShopConfig::default(),
        true,
    )
    .unwrap();

    let customers: Vec<User> = (0..20)
        .map(|i| shop.session().register(customer(i)).unwrap())
        .collect();

    let mut order_ids = Vec::new();
    for round in 0..10 {
        for (i, c) in customers.iter().enumerate() {
            clock.advance_millis(1_000);
            let package = ((i + round) % 4 + 1).to_string();
            let (order, _) = shop.workflow().place_order(c, &package, 1.0).unwrap().unwrap();
            order_ids.push(order.id);
        }
    }

    // Pay every other order
    for id in order_ids.iter().step_by(2) {
        shop.workflow()
            .complete_payment(id, PaymentMethod::EWallet)
            .unwrap();
    }

    let repo = shop.repository();
    assert_eq!(repo.total_orders().unwrap(), 200);
    assert_eq!(repo.transactions().count().unwrap(), 200);
    assert_eq!(repo.orders_by_status(OrderStatus::Processing).unwrap().len(), 100);
    assert_eq!(repo.orders_by_status(OrderStatus::Queued).unwrap().len(), 100);

    // Every package is used by exactly 50 orders at 1 kg each
    let summary = shop.report_summary(&DateRange::unbounded()).unwrap();
    assert_eq!(summary.total_orders, 200);
    assert_eq!(summary.active_customers, 20);
    assert_eq!(summary.top_packages.len(), 4);
    assert_eq!(summary.top_packages[0].name, "Cuci Setrika");
    assert_eq!(summary.top_packages[0].revenue, 500_000.0);
    assert_eq!(summary.top_packages[3].name, "Setrika Saja");

    let dash = shop.admin_dashboard().unwrap();
    assert_eq!(dash.total_customers, 20);
    assert_eq!(dash.active_orders, 200);
    assert_eq!(dash.recent_transactions.len(), 5);
}

#[test]
fn test_shared_store_serializes_writers() {
    let records = Arc::new(RecordStore::new(Arc::new(MemoryBackend::new())));
    records.initialize(Timestamp::now()).unwrap();
    let repo = Repository::new(records);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let repo = repo.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    repo.packages()
                        .add(laundry_store::Package {
                            id: format!("{t}-{i}"),
                            name: "Bulk".into(),
                            price: 1000.0,
                            description: String::new(),
                        })
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(repo.packages().count().unwrap(), 4 + 8 * 25);
}

#[test]
fn test_separate_stores_last_writer_wins() {
    let backend = Arc::new(MemoryBackend::new());
    let first = Repository::new(Arc::new(RecordStore::new(backend.clone())));
    let second = Repository::new(Arc::new(RecordStore::new(backend)));
    first.records().initialize(Timestamp::now()).unwrap();

    // Two independent handles each read the whole collection, then write it back.
    let mut stale = second.packages().get_all().unwrap();
    first.packages().delete("1").unwrap();
    stale.retain(|p| p.id != "2");
    second
        .records()
        .write_collection(laundry_store::Collection::Packages, &stale)
        .unwrap();

    let ids: Vec<String> = first
        .packages()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    // The first handle's delete was overwritten.
    assert_eq!(ids, vec!["1", "3", "4"]);
}
