//! # Domain Types
//!
//! Records supplied by the backend and read (never mutated) by the dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Records                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderRecord    │   │  ProductRecord  │   │     Seller      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id            │   │  _id            │   │  _id            │       │
//! │  │  cart[].qty     │   │  name           │   │  name           │       │
//! │  │  totalPrice     │   │  inStock        │   │ availableBalance│       │
//! │  │  status         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ DashboardSnapshot = orders? + products? + seller?                │  │
//! │  │ (whatever the data-fetch collaborator has resolved so far)       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerant Shapes
//! Every field is optional on the wire and decoded on its own. A missing or
//! wrongly-typed field degrades to zero/default without affecting the rest
//! of the record:
//!
//! | Field              | Accepts                          | Otherwise |
//! |--------------------|----------------------------------|-----------|
//! | `_id`, `status`    | strings, numbers (stringified)   | missing   |
//! | `qty`              | any number (floats truncated)    | 0         |
//! | `totalPrice`, `availableBalance` | any number         | 0         |
//! | `inStock`          | any value, by truthiness         | false     |
//! | `cart`             | arrays (bad lines become empty)  | no cart   |
//!
//! Only an element that is not an object at all becomes the default record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::money::Money;
use crate::UNKNOWN_STATUS;

// =============================================================================
// Order
// =============================================================================

/// One entry in an order's cart. Only the quantity matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartEntry {
    /// Units of this product in the order.
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub qty: Option<i64>,
}

/// An order placed with the seller's shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderRecord {
    /// Backend identifier.
    #[serde(rename = "_id", deserialize_with = "lenient::id")]
    pub id: String,

    /// Cart lines; absent on some legacy orders.
    #[serde(deserialize_with = "lenient::records")]
    pub cart: Option<Vec<CartEntry>>,

    /// Order total in major currency units.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub total_price: Option<f64>,

    /// Free-form status label ("Processing", "Delivered", ...).
    #[serde(deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
}

impl OrderRecord {
    /// Sum of cart quantities; a missing cart or quantity counts as zero.
    /// Saturates instead of overflowing.
    pub fn items_qty(&self) -> i64 {
        self.cart
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.qty.unwrap_or(0))
            .fold(0i64, i64::saturating_add)
    }

    /// Status label used for grouping; missing status groups as "Unknown".
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN_STATUS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed by the seller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    /// Missing or falsy means out of stock.
    #[serde(deserialize_with = "lenient::truthy")]
    pub in_stock: bool,
}

// =============================================================================
// Seller
// =============================================================================

/// The signed-in seller (shop) account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seller {
    #[serde(rename = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    /// Withdrawable balance in major currency units.
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub available_balance: Option<f64>,
}

impl Seller {
    /// The balance as Money, rounded to cents; zero when missing.
    pub fn available_balance(&self) -> Money {
        Money::from_major(self.available_balance.unwrap_or(0.0))
    }
}

// =============================================================================
// Dashboard Snapshot
// =============================================================================

/// Everything the dashboard derives its views from.
///
/// `None` means "not fetched yet" and is treated exactly like an empty
/// collection by the aggregation functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    pub orders: Option<Vec<OrderRecord>>,
    pub products: Option<Vec<ProductRecord>>,
    pub seller: Option<Seller>,
}

impl DashboardSnapshot {
    /// Builds a snapshot from a loosely-shaped JSON document of the form
    /// `{ "orders": [...], "products": [...], "seller": {...} }`.
    ///
    /// Never fails: unknown shapes degrade to `None` or default records.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use storefront_core::DashboardSnapshot;
    ///
    /// let snapshot = DashboardSnapshot::from_json(&json!({
    ///     "orders": [{ "_id": "a1", "cart": [{ "qty": 2 }] }, 42],
    ///     "seller": "not an object"
    /// }));
    /// assert_eq!(snapshot.orders.map(|o| o.len()), Some(2));
    /// assert!(snapshot.products.is_none());
    /// assert!(snapshot.seller.is_none());
    /// ```
    pub fn from_json(value: &Value) -> Self {
        DashboardSnapshot {
            orders: value.get("orders").and_then(records_from_json),
            products: value.get("products").and_then(records_from_json),
            seller: value
                .get("seller")
                .filter(|seller| seller.is_object())
                .map(record_from_json),
        }
    }

    /// Seller identifier, if a seller with an id is present.
    pub fn seller_id(&self) -> Option<&str> {
        self.seller.as_ref().and_then(|seller| seller.id.as_deref())
    }
}

/// Decodes a JSON array element by element.
///
/// Returns `None` for null/missing/non-array values. Elements that fail to
/// decode become `T::default()` so they are undercounted, not fatal.
pub fn records_from_json<T>(value: &Value) -> Option<Vec<T>>
where
    T: DeserializeOwned + Default,
{
    value
        .as_array()
        .map(|items| items.iter().map(record_from_json).collect())
}

fn record_from_json<T>(value: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    T::deserialize(value).unwrap_or_default()
}

/// Field decoders that never fail: whatever JSON arrives is read as a
/// generic value first and converted by hand.
mod lenient {
    use super::*;

    pub(super) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub(super) fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Value::deserialize(d)?.as_f64())
    }

    pub(super) fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }))
    }

    pub(super) fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    pub(super) fn records<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(records_from_json(&Value::deserialize(d)?))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
