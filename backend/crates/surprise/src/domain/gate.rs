//! Password Gate
//!
//! One-way gate in front of the countdown. Any number of attempts is
//! allowed. A mismatch raises a rejection flag that the owner clears once
//! its display window has passed; the gate itself keeps no timer and no
//! attempt counter.

use crate::domain::value_object::secret_code::SecretCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// First matching attempt. Reported once.
    Unlocked,
    /// Candidate did not match.
    Rejected,
    /// The gate was already open; nothing changed.
    AlreadyUnlocked,
}

/// Transient state of the latest attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockAttemptState {
    pub last_input: String,
    pub is_rejected: bool,
}

#[derive(Debug, Clone)]
pub struct PasswordGate {
    expected: SecretCode,
    unlocked: bool,
    attempt: UnlockAttemptState,
}

impl PasswordGate {
    pub fn new(expected: SecretCode) -> Self {
        Self {
            expected,
            unlocked: false,
            attempt: UnlockAttemptState::default(),
        }
    }

    pub fn attempt(&mut self, candidate: &str) -> UnlockOutcome {
        if self.unlocked {
            return UnlockOutcome::AlreadyUnlocked;
        }

        self.attempt.last_input = candidate.to_string();
        if self.expected.matches(candidate) {
            self.unlocked = true;
            self.attempt.is_rejected = false;
            UnlockOutcome::Unlocked
        } else {
            self.attempt.is_rejected = true;
            UnlockOutcome::Rejected
        }
    }

    /// Drop the rejection flag. Returns whether it was set.
    pub fn clear_rejection(&mut self) -> bool {
        std::mem::take(&mut self.attempt.is_rejected)
    }

    #[inline]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    #[inline]
    pub fn attempt_state(&self) -> &UnlockAttemptState {
        &self.attempt
    }
}
