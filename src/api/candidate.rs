use crate::api::{send_json, sessions_url, RequestFailure};
use crate::models::candidate::{Candidate, CandidateId, NextCandidateResponse};
use crate::models::vote::{Decision, VoteOutcome, VoteRequest};
use log::{debug, info};
use reqwest::Client;

pub async fn get_next_candidate(
    client: &Client,
    base_url: &str,
    room_code: &str,
    user_name: &str,
) -> Result<Option<Candidate>, RequestFailure> {
    let url = sessions_url(base_url, Some(room_code), &["restaurants", "next"])?;
    let request = client.get(url).query(&[("user_name", user_name)]);
    let response: NextCandidateResponse = send_json(request, "Get next restaurant").await?;
    match &response.restaurant {
        Some(candidate) => debug!("Next restaurant for {}: {}", user_name, candidate.id),
        None => info!("No restaurants left for {} in {}", user_name, room_code),
    }
    Ok(response.restaurant)
}

pub async fn submit_vote(
    client: &Client,
    base_url: &str,
    room_code: &str,
    user_name: &str,
    candidate_id: CandidateId,
    decision: Decision,
) -> Result<VoteOutcome, RequestFailure> {
    let url = sessions_url(base_url, Some(room_code), &["votes"])?;
    let request = VoteRequest {
        user_name,
        restaurant_id: candidate_id,
        decision,
    };
    debug!("Submitting vote: {:?}", request);
    let outcome: VoteOutcome = send_json(client.post(url).json(&request), "Submit vote").await?;
    if outcome.matched {
        info!(
            "Match in {} on restaurant {:?}",
            room_code, outcome.matched_restaurant_id
        );
    }
    Ok(outcome)
}
