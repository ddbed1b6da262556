//! Session Runtime
//!
//! One actor task per recipient page view. The actor owns the
//! [`Experience`] and is the only place it is mutated: commands and timer
//! expirations arrive over a single channel and are handled one at a time.
//!
//! ## Timers
//! - Every running timer is a [`ScheduledTask`] keyed by [`Timer`] and
//!   tagged with a generation. Starting a timer replaces the previous one
//!   of the same kind; an expiry whose generation no longer matches is
//!   dropped.
//! - Timer tasks only hold a weak sender. Once every [`Session`] handle is
//!   gone the channel closes, the actor returns and its timers are aborted
//!   with it.
//!
//! ## Event streams
//! The actor counts attached event streams. When the last one detaches it
//! waits `reconnect_grace` before disposing itself; a stream attaching in
//! that window keeps the session alive.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use kernel::id::ExperienceId;
use platform::clock::Clock;
use platform::schedule::{self, ScheduledTask};
use tokio::sync::{mpsc, oneshot, watch};

use crate::application::config::SurpriseConfig;
use crate::domain::decoration::{self, ConfettiPiece, Heart};
use crate::domain::experience::{
    Command, CommandRejected, Effect, Experience, ExperienceSnapshot, Reaction, Timer,
};
use crate::domain::gate::UnlockOutcome;
use crate::domain::screen::Screen;
use crate::error::{SurpriseError, SurpriseResult};

/// What a view of the session shows at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub experience: ExperienceSnapshot,
    pub hearts: Vec<Heart>,
    /// Filled while the surprise screen is showing.
    pub confetti: Vec<ConfettiPiece>,
}

/// Result of an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandReport {
    /// Screen after the command was applied.
    pub screen: Screen,
    pub unlock: Option<UnlockOutcome>,
}

impl CommandReport {
    pub fn rejected(&self) -> bool {
        self.unlock == Some(UnlockOutcome::Rejected)
    }
}

enum Message {
    Command {
        command: Command,
        reply: oneshot::Sender<Result<CommandReport, CommandRejected>>,
    },
    Expired {
        timer: Timer,
        generation: u64,
    },
    RefreshHearts,
    StreamAttached,
    StreamDetached,
    GraceExpired {
        generation: u64,
    },
    Dispose,
}

/// Handle to a running session. Clones address the same actor.
#[derive(Debug, Clone)]
pub struct Session {
    id: ExperienceId,
    inbox: mpsc::UnboundedSender<Message>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl Session {
    /// Spawn the actor for `experience`. Must be called inside a tokio
    /// runtime.
    pub fn spawn(
        id: ExperienceId,
        experience: Experience,
        config: Arc<SurpriseConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (inbox, rx) = mpsc::unbounded_channel();
        let weak = inbox.downgrade();

        let hearts_task = {
            let weak = weak.clone();
            schedule::every(config.hearts_refresh, move || {
                match weak.upgrade().map(|tx| tx.send(Message::RefreshHearts)) {
                    Some(Ok(())) => ControlFlow::Continue(()),
                    _ => ControlFlow::Break(()),
                }
            })
        };

        let mut actor = SessionActor {
            id,
            experience,
            config,
            clock,
            inbox: rx,
            weak,
            timers: HashMap::new(),
            generation: 0,
            hearts: decoration::hearts(&mut rand::rng()),
            confetti: Vec::new(),
            _hearts_task: hearts_task,
            streams: 0,
            grace: None,
            snapshots: None,
        };
        let (tx, snapshots) = watch::channel(actor.snapshot());
        actor.snapshots = Some(tx);

        tracing::info!(experience_id = %id, "Experience started");
        tokio::spawn(actor.run());

        Self {
            id,
            inbox,
            snapshots,
        }
    }

    #[inline]
    pub fn id(&self) -> ExperienceId {
        self.id
    }

    /// Apply a command and wait for the actor's answer.
    pub async fn send(&self, command: Command) -> SurpriseResult<CommandReport> {
        let (reply, answer) = oneshot::channel();
        self.inbox
            .send(Message::Command { command, reply })
            .map_err(|_| SurpriseError::SessionClosed(self.id))?;

        let report = answer
            .await
            .map_err(|_| SurpriseError::SessionClosed(self.id))??;
        Ok(report)
    }

    /// Latest published snapshot. Still readable after the session ended.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Record an event stream reading this session.
    pub fn attach_stream(&self) {
        let _ = self.inbox.send(Message::StreamAttached);
    }

    /// Record that an event stream went away. The session is disposed once
    /// no stream has been attached for the reconnect grace period.
    pub fn detach_stream(&self) {
        let _ = self.inbox.send(Message::StreamDetached);
    }

    /// Ask the actor to stop. Pending timers are cancelled with it.
    pub fn dispose(&self) {
        let _ = self.inbox.send(Message::Dispose);
    }

    /// True once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }
}

struct TimerSlot {
    generation: u64,
    _task: ScheduledTask,
}

struct SessionActor {
    id: ExperienceId,
    experience: Experience,
    config: Arc<SurpriseConfig>,
    clock: Arc<dyn Clock>,
    inbox: mpsc::UnboundedReceiver<Message>,
    weak: mpsc::WeakUnboundedSender<Message>,
    timers: HashMap<Timer, TimerSlot>,
    generation: u64,
    hearts: Vec<Heart>,
    confetti: Vec<ConfettiPiece>,
    _hearts_task: ScheduledTask,
    streams: usize,
    grace: Option<TimerSlot>,
    snapshots: Option<watch::Sender<SessionSnapshot>>,
}

impl SessionActor {
    async fn run(mut self) {
        while let Some(message) = self.inbox.recv().await {
            match message {
                Message::Command { command, reply } => {
                    let result = self.command(command);
                    let _ = reply.send(result);
                }
                Message::Expired { timer, generation } => self.expired(timer, generation),
                Message::RefreshHearts => {
                    self.hearts = decoration::hearts(&mut rand::rng());
                    self.publish();
                }
                Message::StreamAttached => {
                    self.streams += 1;
                    if self.grace.take().is_some() {
                        tracing::info!(experience_id = %self.id, "Event stream reattached");
                    }
                }
                Message::StreamDetached => {
                    self.streams = self.streams.saturating_sub(1);
                    if self.streams == 0 {
                        self.start_grace();
                    }
                }
                Message::GraceExpired { generation } => {
                    let current = self.grace.as_ref().map(|slot| slot.generation);
                    if current == Some(generation) {
                        tracing::info!(experience_id = %self.id, "No event stream reattached");
                        break;
                    }
                }
                Message::Dispose => break,
            }
        }

        tracing::info!(
            experience_id = %self.id,
            screen = %self.experience.screen(),
            timers = self.timers.len(),
            "Experience disposed"
        );
    }

    fn command(&mut self, command: Command) -> Result<CommandReport, CommandRejected> {
        let reaction = self.experience.handle(command, self.clock.now())?;
        let unlock = reaction.unlock;

        if unlock == Some(UnlockOutcome::Rejected) {
            tracing::debug!(experience_id = %self.id, "Unlock attempt rejected");
        }

        self.react(reaction);
        Ok(CommandReport {
            screen: self.experience.screen(),
            unlock,
        })
    }

    fn expired(&mut self, timer: Timer, generation: u64) {
        match self.timers.get(&timer) {
            Some(slot) if slot.generation == generation => {}
            _ => {
                tracing::trace!(experience_id = %self.id, %timer, generation, "Stale expiry");
                return;
            }
        }
        if !timer.is_periodic() {
            self.timers.remove(&timer);
        }

        let reaction = self.experience.elapsed(timer, self.clock.now());
        self.react(reaction);
    }

    fn react(&mut self, reaction: Reaction) {
        if let Some(screen) = reaction.entered {
            tracing::info!(experience_id = %self.id, %screen, "Screen entered");
            self.confetti = if screen == Screen::Surprise {
                decoration::confetti(&mut rand::rng())
            } else {
                Vec::new()
            };
        }

        for effect in reaction.effects {
            match effect {
                Effect::Start(timer) => self.start(timer),
                Effect::Stop(timer) => {
                    if self.timers.remove(&timer).is_some() {
                        tracing::trace!(experience_id = %self.id, %timer, "Timer stopped");
                    }
                }
            }
        }

        self.publish();
    }

    fn start(&mut self, timer: Timer) {
        self.generation += 1;
        let generation = self.generation;
        let weak = self.weak.clone();
        let delay = self.config.duration_for(timer);

        let task = if timer.is_periodic() {
            schedule::every(delay, move || {
                let sent = weak
                    .upgrade()
                    .map(|tx| tx.send(Message::Expired { timer, generation }));
                match sent {
                    Some(Ok(())) => ControlFlow::Continue(()),
                    _ => ControlFlow::Break(()),
                }
            })
        } else {
            schedule::once(delay, move || {
                if let Some(tx) = weak.upgrade() {
                    let _ = tx.send(Message::Expired { timer, generation });
                }
            })
        };

        tracing::trace!(experience_id = %self.id, %timer, generation, "Timer started");
        self.timers.insert(
            timer,
            TimerSlot {
                generation,
                _task: task,
            },
        );
    }

    fn start_grace(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let weak = self.weak.clone();

        let task = schedule::once(self.config.reconnect_grace, move || {
            if let Some(tx) = weak.upgrade() {
                let _ = tx.send(Message::GraceExpired { generation });
            }
        });
        self.grace = Some(TimerSlot {
            generation,
            _task: task,
        });
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            experience: self.experience.snapshot(),
            hearts: self.hearts.clone(),
            confetti: self.confetti.clone(),
        }
    }

    fn publish(&self) {
        if let Some(tx) = &self.snapshots {
            tx.send_replace(self.snapshot());
        }
    }
}
