use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, CandidateId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Yes,
    No,
}

#[derive(Serialize, Debug)]
pub struct VoteRequest<'a> {
    pub user_name: &'a str,
    pub restaurant_id: CandidateId,
    pub decision: Decision,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub duplicate: bool,
    pub matched: bool,
    pub matched_restaurant_id: Option<CandidateId>,
    pub total_participants: u32,
    pub votes_submitted_for_restaurant: u32,
    pub yes_votes_for_restaurant: u32,
    pub next_restaurant: Option<Candidate>,
}
