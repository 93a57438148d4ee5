use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// An income entry as returned by `get-incomes`.
///
/// Only `_id`, `title`, `amount` and `date` must be well-formed; the other
/// fields fall back to empty values. `raw` holds the backend object exactly as
/// received so the spreadsheet export reflects it field for field.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IncomeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub amount: f64,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(rename = "category", default, deserialize_with = "category_reference")]
    pub category_id: String,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl IncomeRecord {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut record = IncomeRecord::deserialize(&value)?;
        if let Value::Object(map) = value {
            record.raw = map;
        }
        Ok(record)
    }

    /// The object to export: the backend's own fields when known.
    pub fn export_fields(&self) -> Map<String, Value> {
        if !self.raw.is_empty() {
            return self.raw.clone();
        }
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Decodes each record on its own, dropping the ones that do not fit.
pub fn decode_incomes(values: Vec<Value>) -> Vec<IncomeRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match IncomeRecord::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed income record");
                None
            }
        })
        .collect()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// The backend may send the bare id, a populated category object, or null.
fn category_reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Object(category) => category
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|stamp| DateTime::parse_from_rfc3339(stamp).ok())
        .map(|stamp| stamp.with_timezone(&Utc)))
}

/// Body of the add/update requests, mirroring the modal fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IncomeForm {
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "amount_as_number")]
    pub amount: String,
    pub date: String,
    /// Category name, not id.
    pub category: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl IncomeForm {
    pub fn empty() -> Self {
        Self {
            kind: "Income",
            ..Self::default()
        }
    }

    pub fn from_record(record: &IncomeRecord, category_name: Option<&str>) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            amount: format_amount_input(record.amount),
            date: record.date.format("%Y-%m-%d").to_string(),
            category: category_name.unwrap_or_default().to_string(),
            kind: "Income",
        }
    }
}

/// A form being edited for an existing record.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomeDraft {
    pub id: String,
    pub form: IncomeForm,
}

// The backend rejects what it cannot cast, so unparsable input goes through as text.
fn amount_as_number<S: Serializer>(amount: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => serializer.serialize_f64(value),
        _ => serializer.serialize_str(amount),
    }
}

fn format_amount_input(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|stamp| stamp.naive_utc().date())
    }
}

/// The date as the list shows it and as search matches it.
pub fn display_date(date: &NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn display_timestamp(stamp: &DateTime<Utc>) -> String {
    stamp
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

pub fn timestamp_label(record: &IncomeRecord) -> String {
    match (&record.created_at, &record.updated_at) {
        (Some(created), Some(updated)) if created != updated => {
            format!("updated at: {}", display_timestamp(updated))
        }
        (Some(created), _) => format!("added at: {}", display_timestamp(created)),
        (None, Some(updated)) => format!("updated at: {}", display_timestamp(updated)),
        (None, None) => String::new(),
    }
}

fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        format_with_commas(cents / 100),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn salary_json() -> Value {
        json!({
            "_id": "i1",
            "title": "Salary",
            "description": "May",
            "amount": 1000,
            "date": "2024-05-01T00:00:00.000Z",
            "category": "c1",
            "user": "u1",
            "createdAt": "2024-05-02T10:00:00.000Z",
            "updatedAt": "2024-05-02T10:00:00.000Z",
            "__v": 0
        })
    }

    #[test]
    fn test_decodes_backend_record() {
        let record = IncomeRecord::from_value(salary_json()).unwrap();
        assert_eq!(record.id, "i1");
        assert_eq!(record.category_id, "c1");
        assert_eq!(record.amount, 1000.0);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(record.created_at.is_some());
        let keys: Vec<&str> = record.raw.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["_id", "title", "description", "amount", "date", "category", "user", "createdAt", "updatedAt", "__v"]
        );
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let record = IncomeRecord::from_value(json!({
            "_id": "i4",
            "title": "Gift",
            "description": null,
            "amount": 50,
            "date": "2024-07-01",
            "category": null,
            "createdAt": "last tuesday",
            "updatedAt": null
        }))
        .unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.category_id, "");
        assert_eq!(record.created_at, None);
        assert_eq!(record.updated_at, None);
    }

    #[test]
    fn test_populated_category_yields_its_id() {
        let mut value = salary_json();
        value["category"] = json!({ "_id": "c9", "name": "Freelance" });
        let record = IncomeRecord::from_value(value).unwrap();
        assert_eq!(record.category_id, "c9");
    }

    #[test]
    fn test_decode_incomes_skips_only_broken_records() {
        let broken = json!({ "_id": "i5", "title": "No amount", "date": "2024-07-01" });
        let mut lenient = salary_json();
        lenient["_id"] = json!("i6");
        lenient["description"] = Value::Null;

        let records = decode_incomes(vec![salary_json(), broken, lenient, json!("junk")]);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i6"]);
    }

    #[test]
    fn test_plain_date_and_missing_description() {
        let record: IncomeRecord = serde_json::from_value(json!({
            "_id": "i2",
            "title": "Bonus",
            "amount": 200.5,
            "date": "2024-06-01",
            "category": "c2"
        }))
        .unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(timestamp_label(&record), "");
    }

    #[test]
    fn test_rejects_garbage_date() {
        let result = serde_json::from_value::<IncomeRecord>(json!({
            "_id": "i3",
            "title": "Bad",
            "amount": 1,
            "date": "yesterday",
            "category": "c1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_form_amount_serialization() {
        let mut form = IncomeForm::empty();
        form.amount = "1250.75".into();
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["amount"], json!(1250.75));
        assert_eq!(body["type"], json!("Income"));

        form.amount = "lots".into();
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["amount"], json!("lots"));
    }

    #[test]
    fn test_form_from_record_uses_category_name() {
        let record: IncomeRecord = serde_json::from_value(salary_json()).unwrap();
        let form = IncomeForm::from_record(&record, Some("Salary"));
        assert_eq!(form.category, "Salary");
        assert_eq!(form.amount, "1000");
        assert_eq!(form.date, "2024-05-01");

        let form = IncomeForm::from_record(&record, None);
        assert_eq!(form.category, "");
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(display_date(&date), "5/1/2024");
    }

    #[test]
    fn test_timestamp_label_prefers_update() {
        let mut record: IncomeRecord = serde_json::from_value(salary_json()).unwrap();
        assert!(timestamp_label(&record).starts_with("added at: "));
        record.updated_at = Some("2024-05-03T10:00:00Z".parse().unwrap());
        assert!(timestamp_label(&record).starts_with("updated at: "));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1000.0, "₹"), "₹1,000.00");
        assert_eq!(format_currency(1234567.891, "₹"), "₹1,234,567.89");
        assert_eq!(format_currency(-5.5, "$"), "-$5.50");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
    }
}
