use crate::api::{send_json, sessions_url, RequestFailure};
use crate::models::session::{
    CreateSessionRequest, JoinSessionRequest, Session, StartSessionRequest,
};
use log::{debug, info};
use reqwest::Client;

pub async fn create_session(
    client: &Client,
    base_url: &str,
    request: &CreateSessionRequest,
) -> Result<Session, RequestFailure> {
    let url = sessions_url(base_url, None, &[])?;
    debug!("Creating session: {:?}", request);
    let session: Session = send_json(client.post(url).json(request), "Create session").await?;
    info!("Session {} created by {}", session.room_code, session.host_name);
    Ok(session)
}

pub async fn join_session(
    client: &Client,
    base_url: &str,
    room_code: &str,
    user_name: &str,
) -> Result<Session, RequestFailure> {
    let url = sessions_url(base_url, Some(room_code), &["join"])?;
    debug!("{} joining session {}", user_name, room_code);
    let request = JoinSessionRequest { user_name };
    let session: Session = send_json(client.post(url).json(&request), "Join session").await?;
    info!(
        "Joined session {} ({} participants)",
        session.room_code,
        session.participants.len()
    );
    Ok(session)
}

pub async fn get_session(
    client: &Client,
    base_url: &str,
    room_code: &str,
) -> Result<Session, RequestFailure> {
    let url = sessions_url(base_url, Some(room_code), &[])?;
    let session = send_json(client.get(url), "Get session").await?;
    debug!("Session {} fetched", room_code);
    Ok(session)
}

pub async fn start_session(
    client: &Client,
    base_url: &str,
    room_code: &str,
    host_name: &str,
) -> Result<Session, RequestFailure> {
    let url = sessions_url(base_url, Some(room_code), &["start"])?;
    let request = StartSessionRequest { host_name };
    let session: Session = send_json(client.post(url).json(&request), "Start session").await?;
    info!("Session {} is now {:?}", session.room_code, session.status);
    Ok(session)
}
