//! Session State Machine.
//!
//! [`SessionStore`] owns the retained [`SessionView`] for one participant's
//! flow and drives the [`SessionApi`]. Calls run in two lanes:
//!
//! - session lane: create, join, refresh, start
//! - vote lane: vote, next candidate
//!
//! Each issued call takes the next sequence number of its lane and its result
//! lands only if no newer call was issued on that lane since. A join or start
//! that lands begins a new round and makes in-flight vote-lane calls stale.
//! [`SessionStore::leave`] cancels every call issued before it.

mod lane;
mod state;

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::api::{RequestFailure, SessionApi};
use crate::models::session::{canonical_room_code, CreateSessionInput, Session};
use crate::models::vote::Decision;
pub use lane::Lane;
use lane::{LaneSeq, Pending};
pub use state::SessionView;

/// What an operation did to the retained view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The response landed.
    Applied,
    /// Preconditions were not met; no call was issued.
    Skipped,
    /// A newer call on the same lane (or a round reset) superseded this one.
    Stale,
    /// The flow was left while the call was in flight.
    Cancelled,
}

#[derive(Debug, Default)]
struct Inner {
    view: SessionView,
    session_lane: LaneSeq,
    vote_lane: LaneSeq,
    cancel: CancellationToken,
}

impl Inner {
    fn begin(&mut self, lane: Lane) -> Pending {
        let seq = match lane {
            Lane::Session => self.session_lane.issue(),
            Lane::Vote => self.vote_lane.issue(),
        };
        self.set_busy(lane, true);
        self.view.error = None;
        debug!("{:?} lane issued request #{}", lane, seq);
        Pending {
            lane,
            seq,
            cancel: self.cancel.clone(),
        }
    }

    fn is_current(&self, pending: &Pending) -> bool {
        match pending.lane {
            Lane::Session => self.session_lane.is_current(pending.seq),
            Lane::Vote => self.vote_lane.is_current(pending.seq),
        }
    }

    fn set_busy(&mut self, lane: Lane, busy: bool) {
        match lane {
            Lane::Session => self.view.loading = busy,
            Lane::Vote => self.view.vote_loading = busy,
        }
    }

    /// New participant or new round: prior swipe progress no longer counts.
    fn reset_round(&mut self) {
        self.view.reset_round();
        self.vote_lane.invalidate();
        self.view.vote_loading = false;
    }
}

pub struct SessionStore<A> {
    api: A,
    inner: Mutex<Inner>,
}

impl<A: SessionApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the last fully applied state.
    pub fn view(&self) -> SessionView {
        self.lock().view.clone()
    }

    pub fn is_host(&self) -> bool {
        self.lock().view.is_host()
    }

    pub async fn create(&self, input: &CreateSessionInput) -> Result<Transition, RequestFailure> {
        let request = input.normalize();
        let pending = self.lock().begin(Lane::Session);

        let result = pending.run(self.api.create_session(&request)).await;
        self.settle(&pending, result, |inner, session| {
            info!("Hosting session {}", session.room_code);
            inner.view.session = Some(session);
            inner.view.current_user = Some(request.host_name);
        })
    }

    pub async fn join(
        &self,
        room_code: &str,
        participant_name: &str,
    ) -> Result<Transition, RequestFailure> {
        let room_code = canonical_room_code(room_code);
        let name = participant_name.trim().to_owned();
        let pending = self.lock().begin(Lane::Session);

        let result = pending.run(self.api.join_session(&room_code, &name)).await;
        self.settle(&pending, result, |inner, session| {
            info!("{} joined session {}", name, session.room_code);
            inner.view.session = Some(session);
            inner.view.current_user = Some(name);
            inner.reset_round();
        })
    }

    pub async fn refresh(&self) -> Result<Transition, RequestFailure> {
        let (pending, room_code) = {
            let mut inner = self.lock();
            let Some(room_code) = inner.view.room_code().map(str::to_owned) else {
                return Ok(Transition::Skipped);
            };
            (inner.begin(Lane::Session), room_code)
        };

        let result = pending.run(self.api.get_session(&room_code)).await;
        self.settle(&pending, result, |inner, session| {
            inner.view.session = Some(session);
        })
    }

    pub async fn start(&self) -> Result<Transition, RequestFailure> {
        let (pending, room_code, host_name) = {
            let mut inner = self.lock();
            let Some(room_code) = inner.view.room_code().map(str::to_owned) else {
                return Ok(Transition::Skipped);
            };
            let host_name = inner.view.current_user.clone().unwrap_or_default();
            (inner.begin(Lane::Session), room_code, host_name)
        };

        let result = pending
            .run(self.api.start_session(&room_code, &host_name))
            .await;
        self.settle(&pending, result, |inner, session| {
            info!("Round started in {}", session.room_code);
            inner.view.session = Some(session);
            inner.reset_round();
        })
    }

    /// Installs a session obtained elsewhere. Supersedes in-flight session
    /// lane calls.
    pub fn set_session(&self, session: Session) {
        let mut inner = self.lock();
        inner.session_lane.invalidate();
        inner.view.loading = false;
        inner.view.session = Some(session);
    }

    /// Replaces the current candidate with the next one in this participant's
    /// queue. A failure keeps the card already shown.
    pub async fn load_next_candidate(&self) -> Result<Transition, RequestFailure> {
        let (pending, room_code, user) = {
            let mut inner = self.lock();
            let (Some(room_code), Some(user)) = (
                inner.view.room_code().map(str::to_owned),
                inner.view.current_user.clone(),
            ) else {
                return Ok(Transition::Skipped);
            };
            (inner.begin(Lane::Vote), room_code, user)
        };

        let result = pending
            .run(self.api.get_next_candidate(&room_code, &user))
            .await;
        self.settle(&pending, result, |inner, candidate| {
            if candidate.is_none() {
                info!("{} has no candidates left", user);
            }
            inner.view.current_candidate = candidate;
        })
    }

    pub async fn vote(&self, decision: Decision) -> Result<Transition, RequestFailure> {
        let (pending, room_code, user, candidate_id) = {
            let mut inner = self.lock();
            let view = &inner.view;
            let (Some(room_code), Some(user), Some(candidate)) = (
                view.room_code(),
                view.current_user.as_deref(),
                view.current_candidate.as_ref(),
            ) else {
                return Ok(Transition::Skipped);
            };
            let (room_code, user, candidate_id) =
                (room_code.to_owned(), user.to_owned(), candidate.id);
            (inner.begin(Lane::Vote), room_code, user, candidate_id)
        };

        let result = pending
            .run(
                self.api
                    .submit_vote(&room_code, &user, candidate_id, decision),
            )
            .await;
        self.settle(&pending, result, |inner, outcome| {
            if outcome.duplicate {
                debug!("{} already voted on {}", user, candidate_id);
            }
            inner.view.current_candidate = outcome.next_restaurant.clone();
            inner.view.latest_vote = Some(outcome);
        })
    }

    /// Ends the flow: cancels in-flight calls and empties the view. The store
    /// can be reused for a new flow afterwards.
    pub fn leave(&self) {
        let mut inner = self.lock();
        inner.cancel.cancel();
        inner.cancel = CancellationToken::new();
        inner.view = SessionView::default();
        info!("Left session flow");
    }

    /// Lands a resolved call. Only the newest call of a live flow touches the
    /// view; its failure is recorded as the last error and handed back.
    fn settle<T>(
        &self,
        pending: &Pending,
        result: Option<Result<T, RequestFailure>>,
        apply: impl FnOnce(&mut Inner, T),
    ) -> Result<Transition, RequestFailure> {
        let mut inner = self.lock();

        let Some(result) = result.filter(|_| !pending.cancel.is_cancelled()) else {
            debug!("{:?} lane request #{} cancelled", pending.lane, pending.seq);
            return Ok(Transition::Cancelled);
        };

        if !inner.is_current(pending) {
            debug!(
                "{:?} lane request #{} superseded, discarding its response",
                pending.lane, pending.seq
            );
            return result.map(|_| Transition::Stale);
        }

        inner.set_busy(pending.lane, false);
        match result {
            Ok(value) => {
                apply(&mut *inner, value);
                Ok(Transition::Applied)
            }
            Err(failure) => {
                warn!("{:?} lane request failed: {}", pending.lane, failure);
                inner.view.error = Some(failure.message());
                Err(failure)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
