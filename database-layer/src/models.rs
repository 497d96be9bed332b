// Database models
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::record_id::RecordId;
use crate::timestamps::OrderTimestamp;

// ============================================================================
// ORDERS
// ============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Accepted" => Ok(OrderStatus::Accepted),
            "Dispatched" => Ok(OrderStatus::Dispatched),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// One line item of an order
///
/// Only `pharmacyId` is interpreted by the service; every other key the client
/// sends (product id, name, price, quantity, ...) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(rename = "pharmacyId")]
    pub pharmacy_id: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "65a1b2c3d4e5f60718293a4b")]
    pub id: RecordId,
    pub user_id: String,
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<OrderProduct>,
    pub no_of_items: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1250.5)]
    pub total_price: Decimal,
    pub contact_number: String,
    pub patient_address: String,
    #[schema(value_type = String, example = "10/17/2026, 3:04:05 PM")]
    pub order_date: OrderTimestamp,
    pub payment_method: String,
    pub order_status: OrderStatus,
}

impl Order {
    /// Whether any line item is fulfilled by the given pharmacy
    pub fn involves_pharmacy(&self, pharmacy_id: &str) -> bool {
        self.products.iter().any(|p| p.pharmacy_id == pharmacy_id)
    }
}

/// Create Order Request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<OrderProduct>,
    pub no_of_items: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub contact_number: String,
    pub patient_address: String,
    pub payment_method: String,
}

impl NewOrder {
    /// Build the record to persist: fresh id, current order date, default status
    pub fn into_order(self) -> Order {
        Order {
            id: RecordId::generate(),
            user_id: self.user_id,
            products: self.products,
            no_of_items: self.no_of_items,
            total_price: self.total_price,
            contact_number: self.contact_number,
            patient_address: self.patient_address,
            order_date: OrderTimestamp::now(),
            payment_method: self.payment_method,
            order_status: OrderStatus::default(),
        }
    }
}

/// Update Order Request
///
/// The fields an order update may touch. Identifier, user and order date are
/// immutable; unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderChanges {
    #[schema(value_type = Option<Vec<Object>>)]
    pub products: Option<Vec<OrderProduct>>,
    pub no_of_items: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Decimal>,
    pub contact_number: Option<String>,
    pub patient_address: Option<String>,
    pub payment_method: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl OrderChanges {
    pub fn apply_to(self, order: &mut Order) {
        if let Some(products) = self.products {
            order.products = products;
        }
        if let Some(no_of_items) = self.no_of_items {
            order.no_of_items = no_of_items;
        }
        if let Some(total_price) = self.total_price {
            order.total_price = total_price;
        }
        if let Some(contact_number) = self.contact_number {
            order.contact_number = contact_number;
        }
        if let Some(patient_address) = self.patient_address {
            order.patient_address = patient_address;
        }
        if let Some(payment_method) = self.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(order_status) = self.order_status {
            order.order_status = order_status;
        }
    }
}

/// Calendar day key of the daily sales report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
pub struct SalesDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Dispatched sales of one pharmacy on one day
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[serde(rename = "_id")]
    pub id: SalesDay,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_sales: Decimal,
    pub total_orders: i64,
}

// ============================================================================
// PRESCRIPTIONS
// ============================================================================

/// Prescription review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum PrescriptionStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl PrescriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PrescriptionStatus::Pending => "Pending",
            PrescriptionStatus::Accepted => "Accepted",
            PrescriptionStatus::Rejected => "Rejected",
            PrescriptionStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PrescriptionStatus::Pending),
            "Accepted" => Ok(PrescriptionStatus::Accepted),
            "Rejected" => Ok(PrescriptionStatus::Rejected),
            "Completed" => Ok(PrescriptionStatus::Completed),
            other => Err(format!("unknown prescription status '{other}'")),
        }
    }
}

/// A persisted prescription upload
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "65a1b2c3d4e5f60718293a4b")]
    pub id: RecordId,
    pub pharmacy_id: String,
    pub user_id: String,
    pub patient_name: String,
    pub contact_number: String,
    pub prescription_image: String,
    pub notes: Option<String>,
    pub status: PrescriptionStatus,
    pub created_at: DateTime<Utc>,
}

/// Create Prescription Request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    pub pharmacy_id: String,
    pub user_id: String,
    pub patient_name: String,
    pub contact_number: String,
    pub prescription_image: String,
    pub notes: Option<String>,
}

impl NewPrescription {
    pub fn into_prescription(self) -> Prescription {
        Prescription {
            id: RecordId::generate(),
            pharmacy_id: self.pharmacy_id,
            user_id: self.user_id,
            patient_name: self.patient_name,
            contact_number: self.contact_number,
            prescription_image: self.prescription_image,
            notes: self.notes,
            status: PrescriptionStatus::default(),
            created_at: Utc::now(),
        }
    }
}

/// Update Prescription Request
///
/// Status is changed through its own route, never through a general update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrescriptionChanges {
    pub patient_name: Option<String>,
    pub contact_number: Option<String>,
    pub prescription_image: Option<String>,
    pub notes: Option<String>,
}

impl PrescriptionChanges {
    pub fn apply_to(self, prescription: &mut Prescription) {
        if let Some(patient_name) = self.patient_name {
            prescription.patient_name = patient_name;
        }
        if let Some(contact_number) = self.contact_number {
            prescription.contact_number = contact_number;
        }
        if let Some(prescription_image) = self.prescription_image {
            prescription.prescription_image = prescription_image;
        }
        if let Some(notes) = self.notes {
            prescription.notes = Some(notes);
        }
    }
}
