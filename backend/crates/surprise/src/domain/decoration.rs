//! Decorative Particles
//!
//! Floating hearts behind every screen and the confetti burst on the
//! surprise screen. Pure presentation data: positions and timings are
//! random and carry no meaning for the flow.

use rand::Rng;
use serde::Serialize;

pub const HEART_COUNT: usize = 6;
pub const CONFETTI_COUNT: usize = 50;

const HEART_GLYPHS: [&str; 4] = ["💖", "💕", "💗", "💝"];
const CONFETTI_COLORS: [&str; 6] = [
    "#ff6b9d", "#ffd93d", "#6bcbff", "#b983ff", "#7dffb3", "#ff9f43",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heart {
    pub glyph: &'static str,
    /// Horizontal position, percent of the viewport width.
    pub left_pct: f32,
    pub delay_secs: f32,
    pub duration_secs: f32,
    pub size_rem: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiPiece {
    pub color: &'static str,
    pub left_pct: f32,
    pub delay_secs: f32,
    pub duration_secs: f32,
    pub rotation_deg: f32,
}

pub fn hearts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Heart> {
    (0..HEART_COUNT)
        .map(|i| Heart {
            glyph: HEART_GLYPHS[i % HEART_GLYPHS.len()],
            left_pct: rng.random_range(0.0..100.0),
            delay_secs: rng.random_range(0.0..5.0),
            duration_secs: rng.random_range(8.0..14.0),
            size_rem: rng.random_range(1.0..2.5),
        })
        .collect()
}

pub fn confetti<R: Rng + ?Sized>(rng: &mut R) -> Vec<ConfettiPiece> {
    (0..CONFETTI_COUNT)
        .map(|i| ConfettiPiece {
            color: CONFETTI_COLORS[i % CONFETTI_COLORS.len()],
            left_pct: rng.random_range(0.0..100.0),
            delay_secs: rng.random_range(0.0..2.0),
            duration_secs: rng.random_range(2.0..4.0),
            rotation_deg: rng.random_range(0.0..360.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(hearts(&mut rng).len(), HEART_COUNT);
        assert_eq!(confetti(&mut rng).len(), CONFETTI_COUNT);
    }

    #[test]
    fn test_positions_stay_on_screen() {
        let mut rng = StdRng::seed_from_u64(42);
        for heart in hearts(&mut rng) {
            assert!((0.0..100.0).contains(&heart.left_pct));
            assert!(heart.duration_secs >= 8.0);
        }
        for piece in confetti(&mut rng) {
            assert!((0.0..100.0).contains(&piece.left_pct));
            assert!(CONFETTI_COLORS.contains(&piece.color));
        }
    }
}
