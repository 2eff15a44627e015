use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid boolean value for '{key}': '{value}'. Expected true/false, yes/no, on/off or 1/0.")]
    InvalidBool { key: String, value: String },

    #[error("Invalid integer value for '{key}': '{value}'.")]
    InvalidInt { key: String, value: String },

    #[error("Invalid integer list for '{key}': '{value}'. Expected comma-separated integers (e.g., '2,3,4').")]
    InvalidIntList { key: String, value: String },
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

pub fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidInt {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Comma-separated integers; an empty value is an empty list.
pub fn parse_int_list(key: &str, value: &str) -> Result<Vec<i64>, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|item| item.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ParseError::InvalidIntList {
            key: key.to_string(),
            value: value.to_string(),
        })
}
