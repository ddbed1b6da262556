//! Screen State
//!
//! The recipient flow is a straight line of six screens. The table in
//! [`Screen::next`] is the only place transitions are defined; everything
//! else asks it.
//!
//! ```text
//! Password --Unlock--> Countdown --CountdownComplete--> Gift
//!   --Advance--> Message --Advance--> Surprise --Advance--> Letter
//! ```
//!
//! There is no back navigation and `Letter` is terminal.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Password,
    Countdown,
    Gift,
    Message,
    Surprise,
    Letter,
}

/// Events that move the flow forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The secret code matched.
    Unlock,
    /// The countdown reached zero and its celebration pause elapsed.
    CountdownComplete,
    /// A reveal step finished and the recipient moved on.
    Advance,
}

impl Screen {
    /// In flow order.
    pub const ALL: [Screen; 6] = [
        Screen::Password,
        Screen::Countdown,
        Screen::Gift,
        Screen::Message,
        Screen::Surprise,
        Screen::Letter,
    ];

    /// The transition table. `None` means the event does not apply here.
    pub const fn next(self, transition: Transition) -> Option<Screen> {
        match (self, transition) {
            (Screen::Password, Transition::Unlock) => Some(Screen::Countdown),
            (Screen::Countdown, Transition::CountdownComplete) => Some(Screen::Gift),
            (Screen::Gift, Transition::Advance) => Some(Screen::Message),
            (Screen::Message, Transition::Advance) => Some(Screen::Surprise),
            (Screen::Surprise, Transition::Advance) => Some(Screen::Letter),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Screen::Letter)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Screen::Password => "password",
            Screen::Countdown => "countdown",
            Screen::Gift => "gift",
            Screen::Message => "message",
            Screen::Surprise => "surprise",
            Screen::Letter => "letter",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Unlock => "unlock",
            Transition::CountdownComplete => "countdown-complete",
            Transition::Advance => "advance",
        })
    }
}
