use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell. Stored in table records as a bare JSON integer, string
/// or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
    Null,
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Checks a `YYYY-MM-DD` literal and returns it as a text value in
/// canonical form.
pub fn parse_date(token: &str) -> Result<Value, String> {
    let d = NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| format!("Expected date YYYY-MM-DD but got '{token}'"))?;
    Ok(Value::Text(d.format("%Y-%m-%d").to_string()))
}

pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Int(n) => n.to_string(),
        Value::Text(s) => s.clone(),
        Value::Null => "null".to_string(),
    }
}
