//! Experience
//!
//! The recipient flow as a pure state machine. It owns the current
//! [`Screen`] and the state of every step, but never touches a clock or a
//! timer. Inputs are user [`Command`]s and [`Timer`] expirations, each
//! paired with the current instant; outputs are [`Effect`]s telling the
//! owner which timers to start or stop.
//!
//! Leaving a screen always stops the timers that screen owns, so whatever
//! runs the effects never keeps a timer alive past its screen.

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::domain::countdown::{Countdown, CountdownState};
use crate::domain::entity::surprise_parameters::SurpriseParameters;
use crate::domain::gate::{PasswordGate, UnlockOutcome};
use crate::domain::reveal::{ConfettiWindow, GiftBox, Letter, Typewriter, birthday_message};
use crate::domain::screen::{Screen, Transition};
use crate::domain::value_object::target_instant::TargetInstant;

/// Timers an experience asks its owner to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Periodic countdown recomputation.
    CountdownTick,
    /// Pause between countdown completion and the gift.
    CelebrationPause,
    /// Delay between opening the gift and the message.
    GiftOpening,
    /// How long a rejected code stays flagged.
    RejectionWindow,
    /// Periodic message reveal, one character per expiry.
    TypewriterStep,
    /// How long confetti stays on the surprise screen.
    ConfettiWindow,
}

impl Timer {
    pub const ALL: [Timer; 6] = [
        Timer::CountdownTick,
        Timer::CelebrationPause,
        Timer::GiftOpening,
        Timer::RejectionWindow,
        Timer::TypewriterStep,
        Timer::ConfettiWindow,
    ];

    #[inline]
    pub const fn is_periodic(&self) -> bool {
        matches!(self, Timer::CountdownTick | Timer::TypewriterStep)
    }

    /// The screen whose lifetime bounds this timer.
    pub const fn owner(&self) -> Screen {
        match self {
            Timer::RejectionWindow => Screen::Password,
            Timer::CountdownTick | Timer::CelebrationPause => Screen::Countdown,
            Timer::GiftOpening => Screen::Gift,
            Timer::TypewriterStep => Screen::Message,
            Timer::ConfettiWindow => Screen::Surprise,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Timer::CountdownTick => "countdown_tick",
            Timer::CelebrationPause => "celebration_pause",
            Timer::GiftOpening => "gift_opening",
            Timer::RejectionWindow => "rejection_window",
            Timer::TypewriterStep => "typewriter_step",
            Timer::ConfettiWindow => "confetti_window",
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the timer, replacing any running instance.
    Start(Timer),
    /// Stop the timer if it is running.
    Stop(Timer),
}

/// Actions a recipient can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SubmitCode(String),
    OpenGift,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Unlock,
    OpenGift,
    Advance,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SubmitCode(_) => CommandKind::Unlock,
            Command::OpenGift => CommandKind::OpenGift,
            Command::Advance => CommandKind::Advance,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandKind::Unlock => "unlock",
            CommandKind::OpenGift => "open-gift",
            CommandKind::Advance => "advance",
        })
    }
}

/// A command that does not apply to the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{command} is not available on the {screen} screen")]
pub struct CommandRejected {
    pub screen: Screen,
    pub command: CommandKind,
}

/// What one input did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    pub effects: Vec<Effect>,
    /// Set when the input moved the flow to a new screen.
    pub entered: Option<Screen>,
    /// Set for code submissions.
    pub unlock: Option<UnlockOutcome>,
}

/// Everything a view needs, and nothing it must not show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceSnapshot {
    pub screen: Screen,
    pub recipient_name: String,
    pub target_instant: TargetInstant,
    pub is_rejected: bool,
    pub countdown: CountdownState,
    pub celebrating: bool,
    pub gift_opened: bool,
    pub message: String,
    pub message_complete: bool,
    pub confetti_visible: bool,
    /// Closing letter, one entry per paragraph.
    pub letter: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Experience {
    params: SurpriseParameters,
    screen: Screen,
    gate: PasswordGate,
    countdown: Countdown,
    celebrating: bool,
    gift: GiftBox,
    typewriter: Typewriter,
    confetti: ConfettiWindow,
    letter: Letter,
}

impl Experience {
    /// A fresh flow at [`Screen::Password`].
    pub fn new(params: SurpriseParameters) -> Self {
        Self::with_letter(params, None)
    }

    /// Same as [`Experience::new`] with a replacement closing letter.
    pub fn with_letter(params: SurpriseParameters, custom_letter: Option<&str>) -> Self {
        let message = birthday_message(&params.recipient_name);
        Self {
            gate: PasswordGate::new(params.secret_code.clone()),
            countdown: Countdown::new(params.target_instant),
            letter: Letter::new(&params.recipient_name, custom_letter),
            typewriter: Typewriter::new(&message),
            screen: Screen::Password,
            celebrating: false,
            gift: GiftBox::default(),
            confetti: ConfettiWindow::default(),
            params,
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[inline]
    pub fn params(&self) -> &SurpriseParameters {
        &self.params
    }

    /// Apply a recipient command.
    pub fn handle(
        &mut self,
        command: Command,
        now: DateTime<Utc>,
    ) -> Result<Reaction, CommandRejected> {
        let rejected = CommandRejected {
            screen: self.screen,
            command: command.kind(),
        };
        let mut reaction = Reaction::default();

        match (self.screen, command) {
            (Screen::Password, Command::SubmitCode(candidate)) => {
                let outcome = self.gate.attempt(&candidate);
                reaction.unlock = Some(outcome);
                match outcome {
                    UnlockOutcome::Unlocked => {
                        self.transition(Transition::Unlock, now, &mut reaction)
                    }
                    UnlockOutcome::Rejected => {
                        reaction.effects.push(Effect::Start(Timer::RejectionWindow))
                    }
                    UnlockOutcome::AlreadyUnlocked => {}
                }
            }
            (Screen::Gift, Command::OpenGift) => {
                if self.gift.open() {
                    reaction.effects.push(Effect::Start(Timer::GiftOpening));
                }
            }
            (Screen::Message, Command::Advance) if self.typewriter.is_finished() => {
                self.transition(Transition::Advance, now, &mut reaction);
            }
            (Screen::Surprise, Command::Advance) => {
                self.transition(Transition::Advance, now, &mut reaction);
            }
            _ => return Err(rejected),
        }

        Ok(reaction)
    }

    /// Apply a timer expiry. Expiries that no longer fit the current
    /// state are ignored.
    pub fn elapsed(&mut self, timer: Timer, now: DateTime<Utc>) -> Reaction {
        let mut reaction = Reaction::default();

        match timer {
            Timer::RejectionWindow => {
                self.gate.clear_rejection();
            }
            Timer::CountdownTick if self.screen == Screen::Countdown => {
                self.tick_countdown(now, &mut reaction);
            }
            Timer::CelebrationPause if self.screen == Screen::Countdown && self.celebrating => {
                self.transition(Transition::CountdownComplete, now, &mut reaction);
            }
            Timer::GiftOpening if self.screen == Screen::Gift && self.gift.is_opened() => {
                self.transition(Transition::Advance, now, &mut reaction);
            }
            Timer::TypewriterStep if self.screen == Screen::Message => {
                if self.typewriter.step() {
                    reaction.effects.push(Effect::Stop(Timer::TypewriterStep));
                }
            }
            Timer::ConfettiWindow => {
                self.confetti.close();
            }
            _ => {}
        }

        reaction
    }

    pub fn snapshot(&self) -> ExperienceSnapshot {
        ExperienceSnapshot {
            screen: self.screen,
            recipient_name: self.params.recipient_name.to_string(),
            target_instant: self.params.target_instant,
            is_rejected: self.gate.attempt_state().is_rejected,
            countdown: self.countdown.state(),
            celebrating: self.celebrating,
            gift_opened: self.gift.is_opened(),
            message: self.typewriter.revealed(),
            message_complete: self.typewriter.is_finished(),
            confetti_visible: self.confetti.is_visible(),
            letter: self.letter.paragraphs().map(str::to_string).collect(),
        }
    }

    fn transition(&mut self, transition: Transition, now: DateTime<Utc>, reaction: &mut Reaction) {
        let Some(next) = self.screen.next(transition) else {
            return;
        };

        for timer in Timer::ALL.iter().filter(|t| t.owner() == self.screen) {
            reaction.effects.push(Effect::Stop(*timer));
        }

        self.screen = next;
        reaction.entered = Some(next);
        self.mount(now, reaction);
    }

    fn mount(&mut self, now: DateTime<Utc>, reaction: &mut Reaction) {
        match self.screen {
            Screen::Countdown => {
                reaction.effects.push(Effect::Start(Timer::CountdownTick));
                self.tick_countdown(now, reaction);
            }
            Screen::Message => {
                if !self.typewriter.step() {
                    reaction.effects.push(Effect::Start(Timer::TypewriterStep));
                }
            }
            Screen::Surprise => {
                reaction.effects.push(Effect::Start(Timer::ConfettiWindow));
            }
            Screen::Password | Screen::Gift | Screen::Letter => {}
        }
    }

    fn tick_countdown(&mut self, now: DateTime<Utc>, reaction: &mut Reaction) {
        if self.countdown.tick(now) {
            self.celebrating = true;
            reaction.effects.push(Effect::Start(Timer::CelebrationPause));
        }
    }
}
