use serde::{Deserialize, Serialize};

pub type CandidateId = i64;

/// One swipeable restaurant card. The service may omit anything but the id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct NextCandidateResponse {
    pub restaurant: Option<Candidate>,
}
