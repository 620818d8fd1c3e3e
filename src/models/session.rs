use serde::{Deserialize, Serialize};

/// Meters per mile used when the caller gives a radius in miles.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Lifecycle of a session. Owned by the service; the client only mirrors it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Paused,
    Ended,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub room_code: String,
    pub host_name: String,
    pub status: SessionStatus,
    pub cuisine: Option<String>,
    pub price: Option<String>,
    pub radius_meters: Option<i64>,
    pub location_text: Option<String>,
    pub participants: Vec<String>,
}

/// What a host fills in to open a room. `radius_miles` never leaves the client.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionInput {
    pub host_name: String,
    pub location_text: String,
    pub cuisine: Option<String>,
    pub price: Option<String>,
    pub radius_miles: Option<f64>,
    pub radius_meters: Option<i64>,
}

impl CreateSessionInput {
    pub fn normalize(&self) -> CreateSessionRequest {
        let radius_meters = match (self.radius_meters, self.radius_miles) {
            (Some(meters), _) => Some(meters),
            (None, Some(miles)) => Some(miles_to_meters(miles)),
            (None, None) => None,
        };

        CreateSessionRequest {
            host_name: self.host_name.trim().to_owned(),
            location_text: self.location_text.trim().to_owned(),
            cuisine: non_empty(self.cuisine.as_deref()),
            price: non_empty(self.price.as_deref()),
            radius_meters,
        }
    }
}

pub fn miles_to_meters(miles: f64) -> i64 {
    (miles * METERS_PER_MILE).round() as i64
}

/// Room codes are case-insensitive on input and uppercase on the wire.
pub fn canonical_room_code(room_code: &str) -> String {
    room_code.trim().to_uppercase()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateSessionRequest {
    pub host_name: String,
    pub location_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<i64>,
}

#[derive(Serialize, Debug)]
pub struct JoinSessionRequest<'a> {
    pub user_name: &'a str,
}

#[derive(Serialize, Debug)]
pub struct StartSessionRequest<'a> {
    pub host_name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miles_are_converted_and_rounded() {
        let input = CreateSessionInput {
            host_name: "Ann".into(),
            location_text: "Austin, TX".into(),
            radius_miles: Some(2.0),
            ..Default::default()
        };
        assert_eq!(input.normalize().radius_meters, Some(3219));
        assert_eq!(miles_to_meters(0.5), 805);
        assert_eq!(miles_to_meters(10.0), 16093);
    }

    #[test]
    fn explicit_meters_win_over_miles() {
        let input = CreateSessionInput {
            host_name: "Ann".into(),
            radius_miles: Some(5.0),
            radius_meters: Some(1200),
            ..Default::default()
        };
        assert_eq!(input.normalize().radius_meters, Some(1200));
    }

    #[test]
    fn text_fields_are_trimmed_and_blank_optionals_dropped() {
        let input = CreateSessionInput {
            host_name: "  Ann ".into(),
            location_text: " Austin, TX  ".into(),
            cuisine: Some("   ".into()),
            price: Some(" $$ ".into()),
            ..Default::default()
        };
        let request = input.normalize();
        assert_eq!(request.host_name, "Ann");
        assert_eq!(request.location_text, "Austin, TX");
        assert_eq!(request.cuisine, None);
        assert_eq!(request.price.as_deref(), Some("$$"));
        assert_eq!(request.radius_meters, None);
    }

    #[test]
    fn absent_optionals_are_not_serialized() {
        let request = CreateSessionInput {
            host_name: "Ann".into(),
            location_text: "Austin".into(),
            radius_miles: Some(1.0),
            ..Default::default()
        }
        .normalize();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "host_name": "Ann",
                "location_text": "Austin",
                "radius_meters": 1609
            })
        );
    }

    #[test]
    fn room_code_is_trimmed_and_uppercased() {
        assert_eq!(canonical_room_code(" abc123 "), "ABC123");
    }

    #[test]
    fn session_status_uses_lowercase_names() {
        let status: SessionStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, SessionStatus::Paused);
        assert_eq!(serde_json::to_string(&SessionStatus::Active).unwrap(), "\"active\"");
    }
}
