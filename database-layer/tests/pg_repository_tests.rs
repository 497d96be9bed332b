// Store behaviour tests against PostgreSQL
//
// Each test runs in a throwaway schema on the server named by DATABASE_URL and
// is skipped when that variable is unset.
use std::str::FromStr;

use chrono::{Duration, TimeZone, Utc};
use database_layer::{
    DatabasePool, NewOrder, NewPrescription, Order, OrderChanges, OrderProduct, OrderStatus,
    OrderStore, OrderTimestamp, PgOrderRepository, PgPrescriptionRepository,
    PrescriptionChanges, PrescriptionStatus, PrescriptionStore, RecordId, SalesDay,
};
use rust_decimal::Decimal;
use serde_json::{json, Map};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

struct PgFixture {
    admin: PgPool,
    schema: String,
    db: DatabasePool,
}

impl PgFixture {
    async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping PostgreSQL store test");
            return None;
        };

        let admin = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
        let schema = format!("pharmacy_test_{}", RecordId::generate().as_str());
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .unwrap();

        let options = PgConnectOptions::from_str(&url)
            .unwrap()
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .unwrap();

        let db = DatabasePool::from_pool(pool);
        db.ensure_schema().await.unwrap();

        Some(Self { admin, schema, db })
    }

    fn orders(&self) -> PgOrderRepository {
        PgOrderRepository::new(self.db.clone())
    }

    fn prescriptions(&self) -> PgPrescriptionRepository {
        PgPrescriptionRepository::new(self.db.clone())
    }

    async fn teardown(self) {
        self.db.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .unwrap();
    }
}

fn product(pharmacy_id: &str) -> OrderProduct {
    let mut details = Map::new();
    details.insert("productId".to_string(), json!("p-1"));
    details.insert("quantity".to_string(), json!(2));
    OrderProduct {
        pharmacy_id: pharmacy_id.to_string(),
        details,
    }
}

fn new_order(user_id: &str, pharmacies: &[&str], price: i64) -> Order {
    NewOrder {
        user_id: user_id.to_string(),
        products: pharmacies.iter().map(|p| product(p)).collect(),
        no_of_items: i32::try_from(pharmacies.len()).unwrap(),
        total_price: Decimal::new(price, 0),
        contact_number: "0771234567".to_string(),
        patient_address: "45 Flower Road, Colombo 07".to_string(),
        payment_method: "Cash on Delivery".to_string(),
    }
    .into_order()
}

fn dispatched_at(pharmacy_id: &str, price: i64, at: chrono::DateTime<Utc>) -> Order {
    let mut order = new_order("seed-user", &[pharmacy_id], price);
    order.order_date = OrderTimestamp(at);
    order.order_status = OrderStatus::Dispatched;
    order
}

fn new_prescription(pharmacy_id: &str) -> NewPrescription {
    NewPrescription {
        pharmacy_id: pharmacy_id.to_string(),
        user_id: "user-1".to_string(),
        patient_name: "Nimal Perera".to_string(),
        contact_number: "0711111111".to_string(),
        prescription_image: "https://cdn.example.org/rx/1.jpg".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn test_schema_bootstrap_is_idempotent() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };

    fixture.db.ensure_schema().await.unwrap();
    assert!(fixture.db.is_healthy().await);
    assert!(fixture.orders().is_healthy().await);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_pharmacy_filter_uses_product_containment() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.orders();

    let inserted = store.insert(new_order("u1", &["ph-a"], 10)).await.unwrap();
    assert_eq!(inserted.products[0].details["quantity"], json!(2));
    store.insert(new_order("u1", &["ph-b", "ph-a"], 20)).await.unwrap();
    store.insert(new_order("u2", &["ph-b"], 30)).await.unwrap();
    store.insert(new_order("u3", &["ph-ab"], 40)).await.unwrap();

    let for_a = store.find_by_pharmacy("ph-a").await.unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|o| o.involves_pharmacy("ph-a")));
    assert_eq!(store.count_by_pharmacy("ph-a").await.unwrap(), 2);
    assert_eq!(store.count_by_pharmacy("ph-missing").await.unwrap(), 0);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_orders_by_user_are_newest_first() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.orders();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

    for days in [3, 1, 2] {
        let mut order = new_order("u1", &["ph-a"], days);
        order.order_date = OrderTimestamp(base + Duration::days(days));
        store.insert(order).await.unwrap();
    }
    store.insert(new_order("u10", &["ph-a"], 99)).await.unwrap();

    let prices: Vec<Decimal> = store
        .find_by_user("u1")
        .await
        .unwrap()
        .iter()
        .map(|o| o.total_price)
        .collect();
    assert_eq!(prices, vec![Decimal::new(3, 0), Decimal::new(2, 0), Decimal::new(1, 0)]);

    fixture.teardown().await;
}

#[tokio::test]
async fn test_partial_update_and_delete() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.orders();
    let order = store.insert(new_order("u1", &["ph-a"], 100)).await.unwrap();

    let changes = OrderChanges {
        order_status: Some(OrderStatus::Accepted),
        ..OrderChanges::default()
    };
    let updated = store.update(&order.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.order_status, OrderStatus::Accepted);
    assert_eq!(updated.total_price, Decimal::new(100, 0));
    assert_eq!(updated.patient_address, order.patient_address);
    assert_eq!(updated.order_date, order.order_date);

    let missing = RecordId::parse("000000000000000000000000").unwrap();
    assert!(store.update(&missing, OrderChanges::default()).await.unwrap().is_none());
    assert!(store.delete(&missing).await.unwrap().is_none());

    assert!(store.delete(&order.id).await.unwrap().is_some());
    assert!(store.delete(&order.id).await.unwrap().is_none());

    fixture.teardown().await;
}

#[tokio::test]
async fn test_total_dispatched_sales() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.orders();

    let order = store.insert(new_order("u1", &["ph-a"], 100)).await.unwrap();
    store.insert(new_order("u2", &["ph-a"], 40)).await.unwrap();
    assert_eq!(store.total_dispatched_sales().await.unwrap(), None);

    let changes = OrderChanges {
        order_status: Some(OrderStatus::Dispatched),
        ..OrderChanges::default()
    };
    store.update(&order.id, changes).await.unwrap();
    assert_eq!(store.total_dispatched_sales().await.unwrap(), Some(Decimal::new(100, 0)));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_daily_report_groups_by_colombo_day() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.orders();
    let day = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

    // 20:00 UTC is already the next day in Colombo
    for (hour, price) in [(10, 40), (12, 60), (20, 25)] {
        store
            .insert(dispatched_at("ph-a", price, day + Duration::hours(hour)))
            .await
            .unwrap();
    }
    // 23:45 at +05:30 even in years when the zone database disagrees
    store
        .insert(dispatched_at("ph-a", 5, Utc.with_ymd_and_hms(2000, 6, 1, 18, 15, 0).unwrap()))
        .await
        .unwrap();
    store
        .insert(dispatched_at("ph-b", 999, day + Duration::hours(10)))
        .await
        .unwrap();

    let report = store.dispatched_sales_by_day("ph-a").await.unwrap();
    let days: Vec<SalesDay> = report.iter().map(|d| d.id).collect();
    assert_eq!(
        days,
        vec![
            SalesDay { year: 2000, month: 6, day: 1 },
            SalesDay { year: 2024, month: 5, day: 1 },
            SalesDay { year: 2024, month: 5, day: 2 },
        ]
    );
    assert_eq!(report[1].total_sales, Decimal::new(100, 0));
    assert_eq!(report[1].total_orders, 2);
    assert_eq!(report.iter().map(|d| d.total_orders).sum::<i64>(), 4);
    assert!(store.dispatched_sales_by_day("ph-c").await.unwrap().is_empty());

    fixture.teardown().await;
}

#[tokio::test]
async fn test_prescription_lifecycle() {
    let Some(fixture) = PgFixture::connect().await else {
        return;
    };
    let store = fixture.prescriptions();

    let created = store
        .insert(new_prescription("ph-a").into_prescription())
        .await
        .unwrap();
    assert_eq!(created.status, PrescriptionStatus::Pending);
    store
        .insert(new_prescription("ph-b").into_prescription())
        .await
        .unwrap();

    let found = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found.patient_name, "Nimal Perera");

    let changes = PrescriptionChanges {
        notes: Some("Deliver after 5pm".to_string()),
        ..PrescriptionChanges::default()
    };
    let updated = store.update(&created.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.notes.as_deref(), Some("Deliver after 5pm"));
    assert_eq!(updated.contact_number, "0711111111");

    let accepted = store
        .set_status(&created.id, PrescriptionStatus::Accepted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(accepted.status, PrescriptionStatus::Accepted);

    assert_eq!(store.list_all().await.unwrap().len(), 2);
    assert_eq!(store.find_by_pharmacy("ph-a").await.unwrap().len(), 1);
    assert_eq!(store.count_by_pharmacy("ph-a").await.unwrap(), 1);

    assert!(store.delete(&created.id).await.unwrap().is_some());
    assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    let missing = RecordId::parse("000000000000000000000000").unwrap();
    assert!(store
        .set_status(&missing, PrescriptionStatus::Rejected)
        .await
        .unwrap()
        .is_none());

    fixture.teardown().await;
}
