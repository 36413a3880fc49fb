//! Cloudflare Access user (seat) types.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal layout Cloudflare has been seen to use for login times.
pub const RAW_LOGIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const NAIVE_SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// `last_successful_login` as it arrived on the wire.
///
/// RFC 3339 and offset-less ISO 8601 values (`T` or space separated) are
/// parsed while deserializing.
/// Anything else is kept verbatim and only interpreted by [`LoginTime::to_utc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginTime {
    Aware(DateTime<FixedOffset>),
    /// No offset given; treated as UTC.
    Naive(NaiveDateTime),
    Raw(String),
}

impl LoginTime {
    /// Normalize to an aware UTC timestamp.
    ///
    /// Returns `None` for a raw value that does not match [`RAW_LOGIN_FORMAT`].
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            LoginTime::Aware(dt) => Some(dt.with_timezone(&Utc)),
            LoginTime::Naive(naive) => Some(naive.and_utc()),
            LoginTime::Raw(raw) => DateTime::parse_from_str(raw, RAW_LOGIN_FORMAT)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl From<&str> for LoginTime {
    fn from(value: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            LoginTime::Aware(dt)
        } else if let Ok(naive) = NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(value, NAIVE_SPACED_FORMAT))
        {
            LoginTime::Naive(naive)
        } else {
            LoginTime::Raw(value.to_string())
        }
    }
}

impl From<DateTime<Utc>> for LoginTime {
    fn from(value: DateTime<Utc>) -> Self {
        LoginTime::Aware(value.fixed_offset())
    }
}

impl<'de> Deserialize<'de> for LoginTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LoginTime::from(raw.as_str()))
    }
}

impl Serialize for LoginTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LoginTime::Aware(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            LoginTime::Naive(naive) => {
                serializer.serialize_str(&naive.format(NAIVE_FORMAT).to_string())
            }
            LoginTime::Raw(raw) => serializer.serialize_str(raw),
        }
    }
}

/// A Cloudflare Access user and its seat flags.
///
/// `seat_uid` is the handle the seats endpoint expects; it differs from both
/// `id` and `uid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessUser {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub last_successful_login: Option<LoginTime>,
    pub access_seat: bool,
    pub gateway_seat: bool,
    pub seat_uid: String,
}

impl AccessUser {
    /// Whether any seat is still held, i.e. whether a revoke would change anything.
    pub fn holds_seat(&self) -> bool {
        self.access_seat || self.gateway_seat
    }
}

/// Envelope of `GET /accounts/{id}/access/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessUsersResponse {
    #[serde(default)]
    pub result: Vec<AccessUser>,
}

/// Failure of an Access API call, reported as a value instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFailure {
    pub message: String,
    pub error_details: String,
}

impl AccessFailure {
    pub fn new(message: impl Into<String>, error_details: impl ToString) -> Self {
        Self {
            message: message.into(),
            error_details: error_details.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn seat_json(login: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "u-1",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "uid": "uid-1",
            "name": "Jane",
            "email": "jane@example.com",
            "last_successful_login": login,
            "access_seat": true,
            "gateway_seat": false,
            "seat_uid": "seat-1"
        })
    }

    #[test]
    fn test_login_rfc3339_is_aware() {
        let seat: AccessUser =
            serde_json::from_value(seat_json("2024-05-01T12:30:00Z".into())).unwrap();
        let login = seat.last_successful_login.unwrap();
        assert!(matches!(login, LoginTime::Aware(_)));
        assert_eq!(
            login.to_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_login_naive_is_treated_as_utc() {
        let login = LoginTime::from("2024-05-01T12:30:00");
        assert!(matches!(login, LoginTime::Naive(_)));
        assert_eq!(
            login.to_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_login_space_separated_naive_is_treated_as_utc() {
        let login = LoginTime::from("2024-05-01 12:30:00");
        assert!(matches!(login, LoginTime::Naive(_)));
        assert_eq!(
            login.to_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_login_literal_offset_format_from_json() {
        let seat: AccessUser =
            serde_json::from_value(seat_json("2024-05-01 14:30:00+0200".into())).unwrap();
        let login = seat.last_successful_login.unwrap();
        assert_eq!(
            login.to_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_login_raw_format_matches_structured() {
        let raw = LoginTime::Raw("2024-05-01 14:30:00+0200".to_string());
        let structured = LoginTime::from("2024-05-01T12:30:00Z");
        assert_eq!(raw.to_utc(), structured.to_utc());
    }

    #[test]
    fn test_login_unknown_format_does_not_normalize() {
        let login = LoginTime::from("May 1st, 2024");
        assert_eq!(login, LoginTime::Raw("May 1st, 2024".to_string()));
        assert!(login.to_utc().is_none());
    }

    #[test]
    fn test_login_null_and_missing() {
        let seat: AccessUser = serde_json::from_value(seat_json(serde_json::Value::Null)).unwrap();
        assert!(seat.last_successful_login.is_none());

        let mut json = seat_json(serde_json::Value::Null);
        json.as_object_mut().unwrap().remove("last_successful_login");
        let seat: AccessUser = serde_json::from_value(json).unwrap();
        assert!(seat.last_successful_login.is_none());
    }

    #[test]
    fn test_holds_seat() {
        let mut seat: AccessUser = serde_json::from_value(seat_json(serde_json::Value::Null)).unwrap();
        assert!(seat.holds_seat());
        seat.access_seat = false;
        assert!(!seat.holds_seat());
        seat.gateway_seat = true;
        assert!(seat.holds_seat());
    }

    #[test]
    fn test_users_response_missing_result() {
        let resp: AccessUsersResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.result.is_empty());
    }
}
