use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Char,
    Int,
    Date,
}

pub fn parse_datatype(s: &str) -> Result<DataType, String> {
    match s.to_lowercase().as_str() {
        "char" => Ok(DataType::Char),
        "int" => Ok(DataType::Int),
        "date" => Ok(DataType::Date),
        other => Err(format!("Unknown type '{other}'. Use char(n)|int|date")),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Char => "char",
            DataType::Int => "int",
            DataType::Date => "date",
        };
        f.write_str(name)
    }
}
