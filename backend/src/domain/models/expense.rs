//! Domain model for an expense record.
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage format of `created_date`
pub const CREATED_DATE_FORMAT: &str = "%d/%m/%Y";
/// Storage format of `created_time` (12-hour clock)
pub const CREATED_TIME_FORMAT: &str = "%I:%M %p";

/// One expense entry.
///
/// Field names are persisted in camelCase. The aliases accept documents
/// written by the browser version of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: i64,
    pub name: String,
    #[serde(alias = "originalAmount", deserialize_with = "null_as_nan")]
    pub unit_amount: f64,
    #[serde(default = "default_quantity", deserialize_with = "null_as_nan")]
    pub quantity: f64,
    #[serde(alias = "amount", default, deserialize_with = "null_as_nan")]
    pub total_amount: f64,
    #[serde(alias = "date", default)]
    pub created_date: String,
    #[serde(alias = "timestamp", default)]
    pub created_time: String,
}

fn default_quantity() -> f64 {
    1.0
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl ExpenseRecord {
    /// Build a record stamped with the creation instant.
    ///
    /// Callers are responsible for validating `name`, `unit_amount` and
    /// `quantity` first.
    pub fn new(
        id: i64,
        name: String,
        unit_amount: f64,
        quantity: f64,
        created_at: DateTime<Local>,
    ) -> Self {
        let mut record = Self {
            id,
            name,
            unit_amount,
            quantity,
            total_amount: 0.0,
            created_date: created_at.format(CREATED_DATE_FORMAT).to_string(),
            created_time: created_at.format(CREATED_TIME_FORMAT).to_string(),
        };
        record.recompute_total();
        record
    }

    /// Re-derive `total_amount` from its inputs.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.unit_amount * self.quantity;
    }

    /// Parse `created_date` back into a calendar date, if it is well formed.
    pub fn created_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.created_date, CREATED_DATE_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 7, 31, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_new_record_derives_total_and_stamps() {
        let record = ExpenseRecord::new(1, "Coffee".to_string(), 120.0, 2.0, created_at());

        assert_eq!(record.total_amount, 240.0);
        assert_eq!(record.created_date, "31/07/2024");
        assert_eq!(record.created_time, "02:05 PM");
        assert_eq!(record.created_on(), NaiveDate::from_ymd_opt(2024, 7, 31));
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let record = ExpenseRecord::new(7, "Tea".to_string(), 10.5, 3.0, created_at());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["unitAmount"], 10.5);
        assert_eq!(json["totalAmount"], 31.5);
        assert_eq!(json["createdDate"], "31/07/2024");
        assert_eq!(json["createdTime"], "02:05 PM");
    }

    #[test]
    fn test_deserializes_browser_document() {
        let json = r#"{
            "id": 1722405900000,
            "name": "Jeepney fare",
            "originalAmount": 13,
            "amount": 26,
            "quantity": 2,
            "formattedDate": "Jul 31, 2024",
            "date": "31/07/2024",
            "timestamp": "02:05 PM"
        }"#;

        let record: ExpenseRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 1722405900000);
        assert_eq!(record.unit_amount, 13.0);
        assert_eq!(record.total_amount, 26.0);
        assert_eq!(record.created_date, "31/07/2024");
        assert_eq!(record.created_time, "02:05 PM");
    }

    #[test]
    fn test_null_numbers_read_as_nan() {
        let json = r#"{"id": 1, "name": "Yacht", "unitAmount": 1e308, "quantity": null, "totalAmount": null}"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.unit_amount, 1e308);
        assert!(record.quantity.is_nan());
        assert!(record.total_amount.is_nan());
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let json = r#"{"id": 1, "name": "Bread", "unitAmount": 45}"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.quantity, 1.0);
    }
}
