use crate::models::candidate::Candidate;
use crate::models::session::Session;
use crate::models::vote::VoteOutcome;

/// Everything the presentation layer reads about the current flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub session: Option<Session>,
    pub current_user: Option<String>,
    pub current_candidate: Option<Candidate>,
    pub latest_vote: Option<VoteOutcome>,
    /// Session lane busy (create, join, refresh, start).
    pub loading: bool,
    /// Vote lane busy (vote, next candidate).
    pub vote_loading: bool,
    pub error: Option<String>,
}

impl SessionView {
    /// Advisory only: the service decides who may start a round.
    pub fn is_host(&self) -> bool {
        match (&self.session, self.current_user.as_deref()) {
            (Some(session), Some(user)) if !user.is_empty() => session.host_name == user,
            _ => false,
        }
    }

    pub fn room_code(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.room_code.as_str())
    }

    pub(crate) fn reset_round(&mut self) {
        self.current_candidate = None;
        self.latest_vote = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionStatus;

    fn session(host: &str) -> Session {
        Session {
            id: "s-1".into(),
            room_code: "ABC123".into(),
            host_name: host.into(),
            status: SessionStatus::Waiting,
            cuisine: None,
            price: None,
            radius_meters: None,
            location_text: None,
            participants: vec![host.into()],
        }
    }

    #[test]
    fn is_host_requires_session_user_and_match() {
        let mut view = SessionView::default();
        assert!(!view.is_host());

        view.current_user = Some("Ann".into());
        assert!(!view.is_host());

        view.session = Some(session("Ann"));
        assert!(view.is_host());

        view.current_user = Some("Bo".into());
        assert!(!view.is_host());

        view.current_user = None;
        assert!(!view.is_host());

        view.session = Some(session(""));
        view.current_user = Some(String::new());
        assert!(!view.is_host());
    }
}
