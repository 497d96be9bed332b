use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{DailySales, Order, OrderChanges, OrderProduct, OrderStatus, SalesDay};
use crate::record_id::RecordId;
use crate::timestamps::OrderTimestamp;

/// Persistence operations behind the order endpoints
///
/// Every method is a single store round trip; atomicity of one-record updates
/// and deletes is the store's responsibility.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a fully built order and return what was stored
    async fn insert(&self, order: Order) -> DatabaseResult<Order>;

    /// Orders with at least one product of the pharmacy, newest first
    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Order>>;

    /// Orders placed by the user, newest first
    async fn find_by_user(&self, user_id: &str) -> DatabaseResult<Vec<Order>>;

    /// Apply the changes; `None` when no order has that id
    async fn update(&self, id: &RecordId, changes: OrderChanges) -> DatabaseResult<Option<Order>>;

    /// Remove the order; `None` when no order has that id
    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Order>>;

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64>;

    /// Sum of `total_price` over dispatched orders; `None` when there are none
    async fn total_dispatched_sales(&self) -> DatabaseResult<Option<Decimal>>;

    /// Dispatched sales of one pharmacy grouped by Colombo calendar day, oldest day first
    async fn dispatched_sales_by_day(&self, pharmacy_id: &str) -> DatabaseResult<Vec<DailySales>>;

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    products: Json<Vec<OrderProduct>>,
    no_of_items: i32,
    total_price: Decimal,
    contact_number: String,
    patient_address: String,
    order_date: DateTime<Utc>,
    payment_method: String,
    order_status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = DatabaseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_status = row
            .order_status
            .parse::<OrderStatus>()
            .map_err(|message| DatabaseError::CorruptRow { table: "orders", message })?;

        Ok(Order {
            id: RecordId::parse(&row.id)?,
            user_id: row.user_id,
            products: row.products.0,
            no_of_items: row.no_of_items,
            total_price: row.total_price,
            contact_number: row.contact_number,
            patient_address: row.patient_address,
            order_date: OrderTimestamp(row.order_date),
            payment_method: row.payment_method,
            order_status,
        })
    }
}

fn into_orders(rows: Vec<OrderRow>) -> DatabaseResult<Vec<Order>> {
    rows.into_iter().map(Order::try_from).collect()
}

#[derive(Debug, FromRow)]
struct DailySalesRow {
    local_date: NaiveDate,
    total_sales: Decimal,
    total_orders: i64,
}

impl From<DailySalesRow> for DailySales {
    fn from(row: DailySalesRow) -> Self {
        DailySales {
            id: SalesDay {
                year: row.local_date.year(),
                month: row.local_date.month(),
                day: row.local_date.day(),
            },
            total_sales: row.total_sales,
            total_orders: row.total_orders,
        }
    }
}

/// PostgreSQL-backed order store
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    db: DatabasePool,
}

impl PgOrderRepository {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

#[async_trait]
impl OrderStore for PgOrderRepository {
    async fn insert(&self, order: Order) -> DatabaseResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                id, user_id, products, no_of_items, total_price,
                contact_number, patient_address, order_date, payment_method, order_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(order.id.as_str())
        .bind(&order.user_id)
        .bind(Json(&order.products))
        .bind(order.no_of_items)
        .bind(order.total_price)
        .bind(&order.contact_number)
        .bind(&order.patient_address)
        .bind(order.order_date.to_datetime())
        .bind(&order.payment_method)
        .bind(order.order_status.as_str())
        .fetch_one(self.pool())
        .await?;

        debug!(order_id = %order.id, "Order inserted");
        Order::try_from(row)
    }

    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT * FROM orders
            WHERE products @> jsonb_build_array(jsonb_build_object('pharmacyId', $1::text))
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .bind(pharmacy_id)
        .fetch_all(self.pool())
        .await?;

        into_orders(rows)
    }

    async fn find_by_user(&self, user_id: &str) -> DatabaseResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY order_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        into_orders(rows)
    }

    async fn update(&self, id: &RecordId, changes: OrderChanges) -> DatabaseResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET
                products = COALESCE($1, products),
                no_of_items = COALESCE($2, no_of_items),
                total_price = COALESCE($3, total_price),
                contact_number = COALESCE($4, contact_number),
                patient_address = COALESCE($5, patient_address),
                payment_method = COALESCE($6, payment_method),
                order_status = COALESCE($7, order_status)
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(changes.products.map(Json))
        .bind(changes.no_of_items)
        .bind(changes.total_price)
        .bind(changes.contact_number)
        .bind(changes.patient_address)
        .bind(changes.payment_method)
        .bind(changes.order_status.map(OrderStatus::as_str))
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>("DELETE FROM orders WHERE id = $1 RETURNING *")
            .bind(id.as_str())
            .fetch_optional(self.pool())
            .await?;

        row.map(Order::try_from).transpose()
    }

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM orders
            WHERE products @> jsonb_build_array(jsonb_build_object('pharmacyId', $1::text))
            "#,
        )
        .bind(pharmacy_id)
        .fetch_one(self.pool())
        .await?;

        Ok(count)
    }

    async fn total_dispatched_sales(&self) -> DatabaseResult<Option<Decimal>> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(total_price) FROM orders WHERE order_status = $1",
        )
        .bind(OrderStatus::Dispatched.as_str())
        .fetch_one(self.pool())
        .await?;

        Ok(total)
    }

    async fn dispatched_sales_by_day(&self, pharmacy_id: &str) -> DatabaseResult<Vec<DailySales>> {
        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT
                (order_date AT TIME ZONE INTERVAL '+05:30')::date AS local_date,
                SUM(total_price) AS total_sales,
                COUNT(*) AS total_orders
            FROM orders
            WHERE order_status = $1
              AND products @> jsonb_build_array(jsonb_build_object('pharmacyId', $2::text))
            GROUP BY local_date
            ORDER BY local_date ASC
            "#,
        )
        .bind(OrderStatus::Dispatched.as_str())
        .bind(pharmacy_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(DailySales::from).collect())
    }

    async fn is_healthy(&self) -> bool {
        self.db.is_healthy().await
    }
}
