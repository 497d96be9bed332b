//! Timestamp utilities for order dates
//!
//! Order dates are stored as real UTC timestamps. On the wire they are rendered
//! the way the storefront has always shown them: the en-US locale string in
//! Sri Lanka civil time (Asia/Colombo, a fixed UTC+05:30 with no DST).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Serialize, Serializer};

/// UTC offset of Asia/Colombo in seconds
const COLOMBO_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// en-US `toLocaleString` layout, e.g. `10/17/2026, 3:04:05 PM`
pub const ORDER_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub fn colombo_offset() -> FixedOffset {
    FixedOffset::east_opt(COLOMBO_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Wrapper type for order-date serialization
///
/// Keeps `DateTime<Utc>` internally so sorting and day grouping stay
/// chronological, and serializes to the localized Colombo string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderTimestamp(pub DateTime<Utc>);

impl OrderTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Colombo civil time for this instant
    pub fn local(self) -> DateTime<FixedOffset> {
        self.0.with_timezone(&colombo_offset())
    }

    /// Calendar day of this instant in Colombo
    pub fn local_day(self) -> NaiveDate {
        self.local().date_naive()
    }

    /// (year, month, day) triple used by the daily sales report
    pub fn local_ymd(self) -> (i32, u32, u32) {
        let day = self.local_day();
        (day.year(), day.month(), day.day())
    }

    /// Localized wire rendering
    pub fn to_locale_string(self) -> String {
        self.local().format(ORDER_DATE_FORMAT).to_string()
    }
}

impl Serialize for OrderTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_locale_string())
    }
}

impl From<DateTime<Utc>> for OrderTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        OrderTimestamp(dt)
    }
}

impl From<OrderTimestamp> for DateTime<Utc> {
    fn from(ts: OrderTimestamp) -> Self {
        ts.0
    }
}

impl Default for OrderTimestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_locale_string_uses_colombo_time() {
        let ts = OrderTimestamp(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 5).unwrap());
        assert_eq!(ts.to_locale_string(), "1/15/2024, 4:00:05 PM");
    }

    #[test]
    fn test_local_day_rolls_over_before_utc_midnight() {
        // 20:00 UTC is 01:30 the next morning in Colombo
        let ts = OrderTimestamp(Utc.with_ymd_and_hms(2024, 3, 31, 20, 0, 0).unwrap());
        assert_eq!(ts.local_ymd(), (2024, 4, 1));
    }

    #[test]
    fn test_serialization_is_localized_string() {
        let ts = OrderTimestamp(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"12/1/2024, 5:30:00 AM\"");
    }
}
