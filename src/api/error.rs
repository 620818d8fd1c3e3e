use serde::Deserialize;

/// The one failure the session client reports: the call did not produce a
/// usable response. `Display` renders the message shown to participants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", render(.detail, .status))]
pub struct RequestFailure {
    pub detail: Option<String>,
    pub status: Option<u16>,
}

impl RequestFailure {
    pub fn new(detail: Option<String>, status: Option<u16>) -> Self {
        Self { detail, status }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            detail: None,
            status: Some(status),
        }
    }

    /// Builds a failure from a non-success response body. Only a string
    /// `detail` is surfaced; structured validation payloads are dropped.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<serde_json::Value>,
        }

        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            });

        Self {
            detail,
            status: Some(status),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn render(detail: &Option<String>, status: &Option<u16>) -> String {
    match (detail, status) {
        (Some(detail), _) => detail.clone(),
        (None, Some(status)) => format!("Request failed ({}).", status),
        (None, None) => "Request failed. Please try again.".to_owned(),
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(e: reqwest::Error) -> Self {
        // Decode errors on a 2xx body are not the server's fault to report.
        let status = if e.is_decode() {
            None
        } else {
            e.status().map(|s| s.as_u16())
        };
        Self {
            detail: None,
            status,
        }
    }
}
