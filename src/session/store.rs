//! Shared session records
//!
//! The session task is the only writer. Handles read through snapshots, so
//! nothing outside this module ever holds a lock across an await.

use crate::engine::{self, Mutation};
use crate::error::EngineError;
use crate::model::{ApplicantProfile, LoanApplication, Message, Stage, Transcript};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub struct SessionStore {
    transcript: RwLock<Transcript>,
    profile: RwLock<ApplicantProfile>,
    application: RwLock<LoanApplication>,
    /// Set while a turn is in flight. Claimed by the handle at submit time,
    /// released by the session task when the turn ends.
    busy: AtomicBool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            transcript: RwLock::new(Transcript::new()),
            profile: RwLock::new(ApplicantProfile::placeholder()),
            application: RwLock::new(LoanApplication::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub async fn append_message(&self, message: Message) {
        self.transcript.write().await.append(message);
    }

    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.read().await.snapshot()
    }

    pub async fn profile(&self) -> ApplicantProfile {
        self.profile.read().await.clone()
    }

    pub async fn application(&self) -> LoanApplication {
        self.application.read().await.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claim the busy flag. Fails if a turn is already in flight.
    pub fn try_claim(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn release(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    /// Apply one planned record change. Lock order is profile before
    /// application, everywhere.
    pub async fn apply(&self, mutation: &Mutation) -> Result<(), EngineError> {
        let mut profile = self.profile.write().await;
        let mut application = self.application.write().await;
        engine::apply_mutation(&mut profile, &mut application, mutation)
    }

    pub async fn advance(&self, next: Stage) -> Result<(), EngineError> {
        let mut application = self.application.write().await;
        engine::apply_advance(&mut application, next)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
