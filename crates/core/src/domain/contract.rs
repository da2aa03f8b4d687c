use crate::domain::recommendation::RecommendationRequest;
use crate::time::weekday::parse_ymd;
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// Checked in this order; the first missing one is reported.
pub const REQUIRED_FIELDS: [&str; 3] = ["latitude", "longitude", "date"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidJsonBody,
    MissingField(&'static str),
    CoordinatesNotNumeric,
    DateNotString,
    InvalidDateFormat,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJsonBody => f.write_str("Invalid JSON body"),
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::CoordinatesNotNumeric => f.write_str("Latitude and longitude must be numbers"),
            Self::DateNotString => f.write_str("Date must be a string"),
            Self::InvalidDateFormat => f.write_str("Date must be in YYYY-MM-DD format"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parses a raw request body and validates it.
pub fn parse_request_body(body: &[u8]) -> Result<RecommendationRequest, ValidationError> {
    let value = serde_json::from_slice::<Value>(body).map_err(|_| ValidationError::InvalidJsonBody)?;
    validate_request(&value)
}

pub fn validate_request(value: &Value) -> Result<RecommendationRequest, ValidationError> {
    let obj = match value.as_object() {
        Some(obj) if !obj.is_empty() => obj,
        _ => return Err(ValidationError::InvalidJsonBody),
    };

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let (Value::Number(latitude), Value::Number(longitude)) = (&obj["latitude"], &obj["longitude"])
    else {
        return Err(ValidationError::CoordinatesNotNumeric);
    };

    let date = obj["date"].as_str().ok_or(ValidationError::DateNotString)?;
    parse_date(date)?;

    Ok(RecommendationRequest {
        latitude: latitude.clone(),
        longitude: longitude.clone(),
        date: date.to_string(),
    })
}

/// Four-digit year, one- or two-digit month and day, and a real calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    parse_ymd(s).ok_or(ValidationError::InvalidDateFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_valid_request() {
        let req = validate_request(&json!({
            "latitude": 35.6812,
            "longitude": 139,
            "date": "2024-06-15",
        }))
        .unwrap();
        assert_eq!(req.latitude.to_string(), "35.6812");
        assert_eq!(req.longitude.to_string(), "139");
        assert_eq!(req.date, "2024-06-15");
    }

    #[test]
    fn keeps_caller_spelling_of_coordinates_and_date() {
        let req = parse_request_body(br#"{"latitude": 35.0, "longitude": 139, "date": "2024-6-5"}"#)
            .unwrap();
        assert_eq!(req.latitude.to_string(), "35.0");
        assert_eq!(req.longitude.to_string(), "139");
        assert_eq!(req.date, "2024-6-5");
    }

    #[test]
    fn rejects_empty_or_non_object_bodies() {
        for body in [json!({}), json!(null), json!([]), json!("x"), json!(1)] {
            assert_eq!(
                validate_request(&body).unwrap_err(),
                ValidationError::InvalidJsonBody,
                "body: {body}"
            );
        }
        assert_eq!(
            parse_request_body(b"{not json").unwrap_err(),
            ValidationError::InvalidJsonBody
        );
        assert_eq!(parse_request_body(b"").unwrap_err(), ValidationError::InvalidJsonBody);
    }

    #[test]
    fn reports_first_missing_field_in_fixed_order() {
        let err = validate_request(&json!({"date": "2024-06-15"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("latitude"));

        let err = validate_request(&json!({"latitude": 1.0, "date": "2024-06-15"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: longitude");

        let err = validate_request(&json!({"latitude": 1.0, "longitude": 2.0})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: date");
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        for (lat, lng) in [
            (json!("35.0"), json!(139.0)),
            (json!(35.0), json!(null)),
            (json!(true), json!(139.0)),
        ] {
            let err = validate_request(&json!({
                "latitude": lat,
                "longitude": lng,
                "date": "2024-06-15",
            }))
            .unwrap_err();
            assert_eq!(err.to_string(), "Latitude and longitude must be numbers");
        }
    }

    #[test]
    fn rejects_non_string_date() {
        let err = validate_request(&json!({
            "latitude": 35.0,
            "longitude": 139.0,
            "date": 20240615,
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::DateNotString);
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in ["2024-13-40", "20240101", "", "2023-02-29", " 2024-06-15", "2024-06-15T00:00"] {
            assert_eq!(
                parse_date(date).unwrap_err(),
                ValidationError::InvalidDateFormat,
                "date: {date:?}"
            );
        }
        assert!(parse_date("2024-02-29").is_ok());
        assert_eq!(parse_date("2024-6-5"), Ok(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()));
    }
}
