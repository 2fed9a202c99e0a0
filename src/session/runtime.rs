//! Session task: executes planned turns against the shared records

use super::{Notice, SessionEvent, SessionStore};
use crate::config::EngineConfig;
use crate::engine;
use crate::error::EngineError;
use crate::model::Message;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

pub struct SessionRuntime {
    session_id: Uuid,
    config: EngineConfig,
    store: Arc<SessionStore>,
    submit_rx: mpsc::Receiver<String>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl SessionRuntime {
    pub fn new(
        session_id: Uuid,
        config: EngineConfig,
        store: Arc<SessionStore>,
        submit_rx: mpsc::Receiver<String>,
        events_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            session_id,
            config,
            store,
            submit_rx,
            events_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Starting session runtime");

        while let Some(text) = self.submit_rx.recv().await {
            if let Err(e) = self.run_turn(text).await {
                tracing::error!(session_id = %self.session_id, error = %e, "Turn failed");
                self.broadcast(SessionEvent::Notice {
                    notice: Notice::TransientFailure,
                });
            }
            // Release before TurnFinished so a subscriber reacting to the
            // event can submit immediately.
            self.store.release();
            self.broadcast(SessionEvent::TurnFinished);
        }

        tracing::info!(session_id = %self.session_id, "Session runtime stopped");
    }

    /// Log the input, plan the turn off an application snapshot, then play
    /// the plan back step by step: pause, record changes, stage advance,
    /// milestone, and finally the assistant line.
    async fn run_turn(&self, text: String) -> Result<(), EngineError> {
        let message = Message::user(text);
        let utterance = message.text.clone();
        self.store.append_message(message.clone()).await;
        self.broadcast(SessionEvent::Message { message });

        let application = self.store.application().await;
        let plan = engine::plan_turn(&application, &self.config, &utterance);
        tracing::debug!(
            session_id = %self.session_id,
            stage = %application.stage,
            steps = plan.steps.len(),
            "Planned turn"
        );

        for step in plan.steps {
            if !step.pause.is_zero() {
                tokio::time::sleep(step.pause).await;
            }
            for mutation in &step.mutations {
                self.store.apply(mutation).await?;
            }
            if let Some(next) = step.advance {
                self.store.advance(next).await?;
                tracing::info!(session_id = %self.session_id, stage = %next, "Stage advanced");
                self.broadcast(SessionEvent::StageChanged { stage: next });
            }
            if let Some(milestone) = step.milestone {
                self.broadcast(SessionEvent::Milestone { milestone });
            }
            if let Some(line) = step.say {
                let message = Message::assistant(line);
                self.store.append_message(message.clone()).await;
                self.broadcast(SessionEvent::Message { message });
            }
        }

        Ok(())
    }

    /// Lagging or absent subscribers must never stall a turn.
    fn broadcast(&self, event: SessionEvent) {
        let _ = self.events_tx.send(event);
    }
}
