//! In-process stores for development and tests
//!
//! Each collection sits behind one async `RwLock`, held for the duration of a
//! single operation, so updates and deletes are atomic per record just like
//! the single-statement SQL in the PostgreSQL repositories.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{
    DailySales, Order, OrderChanges, OrderStatus, Prescription, PrescriptionChanges,
    PrescriptionStatus, SalesDay,
};
use crate::order_repository::OrderStore;
use crate::prescription_repository::PrescriptionStore;
use crate::record_id::RecordId;

fn newest_orders_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|o| Reverse((o.order_date, o.id.clone())));
    orders
}

fn add_sales(total: Decimal, price: Decimal) -> DatabaseResult<Decimal> {
    total
        .checked_add(price)
        .ok_or_else(|| DatabaseError::AggregateOverflow(format!("{total} + {price}")))
}

fn newest_prescriptions_first(mut prescriptions: Vec<Prescription>) -> Vec<Prescription> {
    prescriptions.sort_by_key(|p| Reverse((p.created_at, p.id.clone())));
    prescriptions
}

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<RecordId, Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: Order) -> DatabaseResult<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let matching = orders
            .values()
            .filter(|o| o.involves_pharmacy(pharmacy_id))
            .cloned()
            .collect();
        Ok(newest_orders_first(matching))
    }

    async fn find_by_user(&self, user_id: &str) -> DatabaseResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let matching = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_orders_first(matching))
    }

    async fn update(&self, id: &RecordId, changes: OrderChanges) -> DatabaseResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(id).map(|order| {
            changes.apply_to(order);
            order.clone()
        }))
    }

    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Order>> {
        Ok(self.orders.write().await.remove(id))
    }

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64> {
        let orders = self.orders.read().await;
        let count = orders.values().filter(|o| o.involves_pharmacy(pharmacy_id)).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn total_dispatched_sales(&self) -> DatabaseResult<Option<Decimal>> {
        let orders = self.orders.read().await;
        orders
            .values()
            .filter(|o| o.order_status == OrderStatus::Dispatched)
            .try_fold(None, |total, o| match total {
                Some(sum) => add_sales(sum, o.total_price).map(Some),
                None => Ok(Some(o.total_price)),
            })
    }

    async fn dispatched_sales_by_day(&self, pharmacy_id: &str) -> DatabaseResult<Vec<DailySales>> {
        let orders = self.orders.read().await;
        let mut days: BTreeMap<SalesDay, (Decimal, i64)> = BTreeMap::new();

        for order in orders
            .values()
            .filter(|o| o.order_status == OrderStatus::Dispatched && o.involves_pharmacy(pharmacy_id))
        {
            let (year, month, day) = order.order_date.local_ymd();
            let entry = days.entry(SalesDay { year, month, day }).or_default();
            entry.0 = add_sales(entry.0, order.total_price)?;
            entry.1 = entry.1.saturating_add(1);
        }

        Ok(days
            .into_iter()
            .map(|(id, (total_sales, total_orders))| DailySales {
                id,
                total_sales,
                total_orders,
            })
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPrescriptionStore {
    prescriptions: RwLock<HashMap<RecordId, Prescription>>,
}

impl MemoryPrescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrescriptionStore for MemoryPrescriptionStore {
    async fn insert(&self, prescription: Prescription) -> DatabaseResult<Prescription> {
        let mut prescriptions = self.prescriptions.write().await;
        prescriptions.insert(prescription.id.clone(), prescription.clone());
        Ok(prescription)
    }

    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>> {
        Ok(self.prescriptions.write().await.remove(id))
    }

    async fn update(
        &self,
        id: &RecordId,
        changes: PrescriptionChanges,
    ) -> DatabaseResult<Option<Prescription>> {
        let mut prescriptions = self.prescriptions.write().await;
        Ok(prescriptions.get_mut(id).map(|prescription| {
            changes.apply_to(prescription);
            prescription.clone()
        }))
    }

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64> {
        let prescriptions = self.prescriptions.read().await;
        let count = prescriptions
            .values()
            .filter(|p| p.pharmacy_id == pharmacy_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Prescription>> {
        let prescriptions = self.prescriptions.read().await;
        Ok(newest_prescriptions_first(prescriptions.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>> {
        Ok(self.prescriptions.read().await.get(id).cloned())
    }

    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Prescription>> {
        let prescriptions = self.prescriptions.read().await;
        let matching = prescriptions
            .values()
            .filter(|p| p.pharmacy_id == pharmacy_id)
            .cloned()
            .collect();
        Ok(newest_prescriptions_first(matching))
    }

    async fn set_status(
        &self,
        id: &RecordId,
        status: PrescriptionStatus,
    ) -> DatabaseResult<Option<Prescription>> {
        let mut prescriptions = self.prescriptions.write().await;
        Ok(prescriptions.get_mut(id).map(|prescription| {
            prescription.status = status;
            prescription.clone()
        }))
    }
}
