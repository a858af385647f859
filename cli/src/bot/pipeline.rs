//! # Helpbot Response Pipeline
//!
//! File: cli/src/bot/pipeline.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The pipeline handles turn-taking for one conversation. `submit` runs these steps:
//! 1. Trim the input. Blank input is a silent no-op: no turn, no indicator.
//! 2. Append the user turn right away.
//! 3. Show the composing indicator through a `ComposingGuard`.
//! 4. After the thinking delay, ask the `Responder` for a reply.
//! 5. Drop the guard (hiding the indicator), then append the bot turn.
//!
//! Steps 4-5 run on a tokio task, so `submit` returns immediately with a
//! `PendingReply` the caller may await or ignore. A scheduled reply is never
//! cancelled.
//!
//! ## Turn Order
//!
//! - `completion` (default): every submission gets its own task. Overlapping
//!   submissions may complete, and append their bot turns, in any order.
//! - `submission`: a single worker drains a FIFO queue, so bot turns append
//!   strictly in submission order and each waits for the previous reply's delay.
//!
//! ## Examples
//!
//! ```rust
//! let pipeline = ResponsePipeline::new(
//!     Arc::new(Responder::from_config(&config)?),
//!     Arc::new(TerminalPort::new(config.links.base_url.clone())),
//!     config.responder.thinking_delay(),
//!     config.responder.turn_order,
//! );
//! if let Some(pending) = pipeline.submit("How do I upload a paper?") {
//!     let bot_turn = pending.wait().await?;
//! }
//! ```
//!
use super::conversation::{Conversation, Turn};
use super::render::RenderPort;
use super::responder::{Responder, ReplySource};
use crate::core::error::{HelpbotError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Order in which bot turns are appended when submissions overlap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TurnOrder {
    /// Whichever delayed reply finishes first appends first.
    #[default]
    Completion,
    /// Replies are produced one at a time, in the order they were submitted.
    Submission,
}

/// Shows the composing indicator on creation and hides it on drop, so every
/// exit path (including a panic in the reply task) clears it exactly once.
struct ComposingGuard {
    port: Arc<dyn RenderPort>,
}

impl ComposingGuard {
    fn show(port: Arc<dyn RenderPort>) -> Self {
        port.show_composing();
        Self { port }
    }
}

impl Drop for ComposingGuard {
    fn drop(&mut self) {
        self.port.hide_composing();
    }
}

/// A submission waiting for its bot reply.
struct ReplyJob {
    text: String,
    composing: ComposingGuard,
    done: oneshot::Sender<Turn>,
}

/// Handle to a scheduled bot reply.
#[derive(Debug)]
pub struct PendingReply {
    rx: oneshot::Receiver<Turn>,
}

impl PendingReply {
    /// Resolves to the bot turn once it has been appended.
    ///
    /// Dropping the handle instead does not cancel the reply.
    pub async fn wait(self) -> Result<Turn> {
        self.rx
            .await
            .map_err(|_| anyhow::Error::from(HelpbotError::ReplyDropped))
    }
}

/// State shared by `submit` and the delayed reply tasks.
#[derive(Clone)]
struct Shared {
    responder: Arc<Responder>,
    conversation: Conversation,
    port: Arc<dyn RenderPort>,
    delay: Duration,
}

impl Shared {
    /// Records and renders a turn under the conversation lock, so the port sees
    /// turns in the same order as the conversation.
    fn publish(&self, turn: Turn) -> Turn {
        self.conversation.append_then(turn, |appended| {
            self.port.append_turn(appended);
            appended.clone()
        })
    }

    async fn complete(&self, job: ReplyJob) {
        tokio::time::sleep(self.delay).await;

        let reply = self.responder.respond(&job.text);
        match reply.source {
            ReplySource::Rule { index } => debug!("Reply from rule #{} for {:?}", index + 1, job.text),
            ReplySource::Fallback => debug!("No rule matched {:?}; using fallback", job.text),
        }

        let ReplyJob {
            composing, done, ..
        } = job;
        drop(composing);
        let turn = self.publish(Turn::bot(reply.text, reply.links));
        // The submitter may have dropped its PendingReply; the turn is appended either way.
        let _ = done.send(turn);
    }
}

enum Dispatch {
    Spawn,
    Queue(mpsc::UnboundedSender<ReplyJob>),
}

/// Accepts user input and schedules delayed bot replies for one conversation.
pub struct ResponsePipeline {
    shared: Shared,
    dispatch: Dispatch,
}

impl ResponsePipeline {
    /// Creates a pipeline with a fresh conversation.
    ///
    /// Must be called inside a tokio runtime: `TurnOrder::Submission` spawns its
    /// queue worker here, and `submit` spawns reply tasks.
    pub fn new(
        responder: Arc<Responder>,
        port: Arc<dyn RenderPort>,
        delay: Duration,
        order: TurnOrder,
    ) -> Self {
        let shared = Shared {
            responder,
            conversation: Conversation::new(),
            port,
            delay,
        };

        let dispatch = match order {
            TurnOrder::Completion => Dispatch::Spawn,
            TurnOrder::Submission => {
                let (tx, mut rx) = mpsc::unbounded_channel::<ReplyJob>();
                let worker = shared.clone();
                tokio::spawn(async move {
                    while let Some(job) = rx.recv().await {
                        worker.complete(job).await;
                    }
                    debug!("Reply queue closed; worker exiting.");
                });
                Dispatch::Queue(tx)
            }
        };

        debug!(
            "Response pipeline ready (delay {:?}, order {:?})",
            delay, order
        );
        Self { shared, dispatch }
    }

    /// Submits raw user text. Returns `None` (and does nothing) for blank input.
    pub fn submit(&self, raw: &str) -> Option<PendingReply> {
        let text = raw.trim();
        if text.is_empty() {
            debug!("Ignoring blank submission.");
            return None;
        }

        self.shared.publish(Turn::user(text));
        let composing = ComposingGuard::show(Arc::clone(&self.shared.port));

        let (done, rx) = oneshot::channel();
        let job = ReplyJob {
            text: text.to_string(),
            composing,
            done,
        };

        match &self.dispatch {
            Dispatch::Spawn => self.spawn(job),
            Dispatch::Queue(tx) => {
                if let Err(mpsc::error::SendError(job)) = tx.send(job) {
                    warn!("Reply queue worker is gone; replying out of order.");
                    self.spawn(job);
                }
            }
        }

        Some(PendingReply { rx })
    }

    /// Submits the example query numbered `number` (1-based), as if it had been typed.
    pub fn quick_reply(&self, number: usize) -> Result<Option<PendingReply>> {
        let queries = self.suggestions();
        if queries.is_empty() {
            return Err(HelpbotError::NoQuickReplies { number }.into());
        }
        let query = number
            .checked_sub(1)
            .and_then(|i| queries.get(i))
            .ok_or(HelpbotError::UnknownQuickReply {
                number,
                available: queries.len(),
            })?
            .clone();
        Ok(self.submit(&query))
    }

    /// Example queries offered as quick replies.
    pub fn suggestions(&self) -> &[String] {
        self.shared.responder.fallback().example_queries()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.shared.conversation
    }

    fn spawn(&self, job: ReplyJob) {
        let shared = self.shared.clone();
        tokio::spawn(async move {
            shared.complete(job).await;
        });
    }
}
