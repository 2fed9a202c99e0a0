//! Conversation session runtime
//!
//! One session owns one applicant profile, one application record, and one
//! conversation log. User input goes in through [`SessionHandle::submit`];
//! everything the session does in response comes back out on a broadcast
//! channel as [`SessionEvent`]s, so a frontend can follow along without
//! polling shared state.

mod runtime;
mod store;


pub(crate) use store::SessionStore;

use crate::config::EngineConfig;
use crate::engine::{script, Milestone};
use crate::error::SubmitError;
use crate::model::{ApplicantProfile, LoanApplication, Message, Stage};
use runtime::SessionRuntime;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

/// At most one turn is ever queued; the busy flag turns the rest away
/// before they reach the channel.
const SUBMIT_CHANNEL_CAPACITY: usize = 1;
const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Events published to session subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the conversation log.
    Message { message: Message },
    /// The application record moved to a new stage.
    StageChanged { stage: Stage },
    /// A pipeline milestone fired. Each fires at most once per session.
    Milestone { milestone: Milestone },
    /// An out-of-band notice. Never part of the conversation log.
    Notice { notice: Notice },
    /// The in-flight turn finished; the session accepts input again.
    TurnFinished,
}

/// Out-of-band notices shown as toasts rather than log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A submit was rejected because a turn is still in flight.
    Busy,
    /// The turn failed partway through; the session stays usable.
    TransientFailure,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::Busy => script::BUSY_NOTICE,
            Notice::TransientFailure => script::FAILURE_NOTICE,
        }
    }
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub(crate) store: Arc<SessionStore>,
    submit_tx: mpsc::Sender<String>,
    events_tx: broadcast::Sender<SessionEvent>,
    session_id: Uuid,
}

impl SessionHandle {
    /// Hand one piece of user input to the session.
    ///
    /// Returns as soon as the turn is queued; the turn itself runs on the
    /// session task and is reported through the event stream. A rejected
    /// submit leaves no trace in the conversation log.
    pub fn submit(&self, text: &str) -> Result<(), SubmitError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if !self.store.try_claim() {
            let _ = self.events_tx.send(SessionEvent::Notice {
                notice: Notice::Busy,
            });
            return Err(SubmitError::Busy);
        }
        if self.submit_tx.try_send(trimmed.to_string()).is_err() {
            // The claim succeeded, so the channel can only fail closed.
            self.store.release();
            return Err(SubmitError::Closed);
        }
        Ok(())
    }

    /// Subscribe to session events. Only events published after this call
    /// are delivered; nothing is replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Whether a turn is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.store.is_busy()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Snapshot of the conversation log.
    pub async fn transcript(&self) -> Vec<Message> {
        self.store.transcript().await
    }

    /// Snapshot of the applicant profile.
    pub async fn profile(&self) -> ApplicantProfile {
        self.store.profile().await
    }

    /// Snapshot of the application record.
    pub async fn application(&self) -> LoanApplication {
        self.store.application().await
    }
}

/// Start a session and return a handle to it.
///
/// The greeting is in the conversation log before this returns, so the
/// first transcript snapshot a caller takes already contains it.
pub async fn start(config: EngineConfig) -> SessionHandle {
    let session_id = Uuid::new_v4();
    let store = Arc::new(SessionStore::new());
    let (submit_tx, submit_rx) = mpsc::channel(SUBMIT_CHANNEL_CAPACITY);
    let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    store
        .append_message(Message::assistant(script::GREETING))
        .await;

    let runtime = SessionRuntime::new(
        session_id,
        config,
        Arc::clone(&store),
        submit_rx,
        events_tx.clone(),
    );
    tokio::spawn(runtime.run());

    SessionHandle {
        store,
        submit_tx,
        events_tx,
        session_id,
    }
}
