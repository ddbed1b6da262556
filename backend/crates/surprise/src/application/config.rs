//! Application Configuration
//!
//! Timing for the recipient flow and session housekeeping.

use std::time::Duration;

use crate::domain::experience::Timer;

#[derive(Debug, Clone)]
pub struct SurpriseConfig {
    /// Countdown recomputation period
    pub countdown_tick: Duration,
    /// "Time's Up!" pause before the gift appears
    pub celebration_pause: Duration,
    /// Delay between opening the gift and the message
    pub gift_opening: Duration,
    /// How long a wrong code stays flagged
    pub rejection_window: Duration,
    /// Delay per revealed message character
    pub typewriter_step: Duration,
    /// How long confetti stays on screen
    pub confetti_window: Duration,
    /// Background hearts regeneration period
    pub hearts_refresh: Duration,
    /// How long a session outlives its last event stream
    pub reconnect_grace: Duration,
    /// Sessions never attached to an event stream are dropped after this
    pub session_idle_ttl: Duration,
    /// How often unattached sessions are swept
    pub sweep_interval: Duration,
    /// Replacement for the closing letter; `None` uses the template
    pub custom_letter: Option<String>,
}

impl Default for SurpriseConfig {
    fn default() -> Self {
        Self {
            countdown_tick: Duration::from_secs(1),
            celebration_pause: Duration::from_secs(2),
            gift_opening: Duration::from_secs(2),
            rejection_window: Duration::from_secs(3),
            typewriter_step: Duration::from_millis(30),
            confetti_window: Duration::from_secs(5),
            hearts_refresh: Duration::from_secs(20),
            reconnect_grace: Duration::from_secs(30),
            session_idle_ttl: Duration::from_secs(600),
            sweep_interval: Duration::from_secs(60),
            custom_letter: None,
        }
    }
}

impl SurpriseConfig {
    /// Short session TTL so abandoned tabs are visible in logs quickly
    pub fn development() -> Self {
        Self {
            session_idle_ttl: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(10),
            ..Default::default()
        }
    }

    pub fn duration_for(&self, timer: Timer) -> Duration {
        match timer {
            Timer::CountdownTick => self.countdown_tick,
            Timer::CelebrationPause => self.celebration_pause,
            Timer::GiftOpening => self.gift_opening,
            Timer::RejectionWindow => self.rejection_window,
            Timer::TypewriterStep => self.typewriter_step,
            Timer::ConfettiWindow => self.confetti_window,
        }
    }
}
