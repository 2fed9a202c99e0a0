//! Loandesk - simulated loan-application assistant
//!
//! A terminal front end over a scripted conversation session: the user
//! says what they want to borrow, the session walks the application
//! through KYC, a credit pull, and underwriting, and the decision comes
//! back as chat messages, status changes, and toasts.

mod config;
mod engine;
mod error;
mod model;
mod session;

use config::{EngineConfig, Pacing};
use error::SubmitError;
use model::{Message, Speaker};
use session::{SessionEvent, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loandesk=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let mut config = EngineConfig::from_env();
    if std::env::var("LOANDESK_FAST").is_ok() {
        config.pacing = Pacing::none();
    }

    let handle = session::start(config).await;
    let mut events = handle.subscribe();
    tracing::info!(session_id = %handle.session_id(), "Session started");

    // The greeting is already in the log; show it before taking input.
    for message in handle.transcript().await {
        print_message(&message);
    }
    prompt();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                    break;
                }
                match handle.submit(input) {
                    // A busy rejection surfaces as a toast on the event stream.
                    Ok(()) | Err(SubmitError::Busy) => {}
                    Err(SubmitError::EmptyInput) => prompt(),
                    Err(err @ SubmitError::Closed) => {
                        tracing::error!(error = %err, "Session is gone");
                        break;
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => render_event(&handle, &event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Dropped events while rendering");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(())
}

async fn render_event(handle: &SessionHandle, event: &SessionEvent) {
    match event {
        SessionEvent::Message { message } => {
            // The user's own line is already on screen.
            if message.speaker == Speaker::Assistant {
                print_message(message);
            }
        }
        SessionEvent::StageChanged { stage } => {
            println!("  [status] {}", stage.status_label());
        }
        SessionEvent::Milestone { milestone } => {
            println!("  [toast] {}", milestone.caption());
        }
        SessionEvent::Notice { notice } => {
            println!("  [toast] {}", notice.text());
        }
        SessionEvent::TurnFinished => {
            let application = handle.application().await;
            if application.stage.is_terminal() {
                println!("  [status] {}", application.stage.status_label());
                if let Some(doc) = application.sanction_document_ref.as_deref() {
                    println!("  [download] sanction letter: {doc}");
                }
            }
            prompt();
        }
    }
}

fn print_message(message: &Message) {
    let speaker = match message.speaker {
        Speaker::User => "you",
        Speaker::Assistant => "assistant",
    };
    println!("[{}] {speaker}: {}", message.sent_at.format("%H:%M"), message.text);
}

fn prompt() {
    print!("> ");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}
