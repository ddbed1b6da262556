//! Content Reveal Steps
//!
//! The four screens after the countdown. Each one is a small piece of
//! state; the timing that drives them is owned by the experience.

use crate::domain::value_object::recipient_name::RecipientName;

// ============================================================================
// Gift
// ============================================================================

/// Wrapped until opened. Opening is one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GiftBox {
    opened: bool,
}

impl GiftBox {
    /// Returns `true` only for the call that actually opens it.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.opened, true)
    }

    #[inline]
    pub fn is_opened(&self) -> bool {
        self.opened
    }
}

// ============================================================================
// Message
// ============================================================================

const MESSAGE_TEMPLATE: &str = "Dear {name},

Today is all about you, so I made this little corner of the internet just for you.

You bring color into every room you walk into. Your laugh is contagious, your kindness is quiet but constant, and the people around you are luckier than they know.

I hope this surprise makes you smile, and I hope the year ahead is full of good days, good people and good news.

Enjoy every minute of your birthday. You deserve all of it!

With love and the warmest wishes... 💕";

/// The birthday message addressed to `name`.
pub fn birthday_message(name: &RecipientName) -> String {
    MESSAGE_TEMPLATE.replace("{name}", name.as_str())
}

/// Reveals a fixed text one character per step.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveal one more character. Returns `true` once everything is shown.
    pub fn step(&mut self) -> bool {
        if self.shown < self.chars.len() {
            self.shown += 1;
        }
        self.is_finished()
    }

    pub fn revealed(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.shown == self.chars.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

// ============================================================================
// Surprise
// ============================================================================

/// Confetti shown for a fixed window after the surprise screen opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfettiWindow {
    visible: bool,
}

impl Default for ConfettiWindow {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl ConfettiWindow {
    pub fn close(&mut self) {
        self.visible = false;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

// ============================================================================
// Letter
// ============================================================================

const LETTER_TEMPLATE: &str = "My Dearest {name},

This is the last page of your surprise, and I saved the most important part for it.

Thank you for every conversation, every laugh and every small kindness. You make ordinary days feel special without even trying.

I hope this year brings you adventures worth retelling, rest when you need it, and the people you love close by.

Happy Birthday. This is only the beginning of something beautiful...

With all my heart, always 💕

P.S. You are stronger than you know and more loved than you can imagine.";

/// Closing letter. The caller may replace the default text entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    text: String,
}

impl Letter {
    /// An empty override counts as none.
    pub fn new(name: &RecipientName, custom: Option<&str>) -> Self {
        let text = match custom {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => LETTER_TEMPLATE.replace("{name}", name.as_str()),
        };
        Self { text }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Blocks separated by blank lines.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split("\n\n").filter(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> RecipientName {
        RecipientName::from_param(Some("Ada"))
    }

    #[test]
    fn test_gift_opens_once() {
        let mut gift = GiftBox::default();
        assert!(!gift.is_opened());
        assert!(gift.open());
        assert!(!gift.open());
        assert!(gift.is_opened());
    }

    #[test]
    fn test_message_is_addressed() {
        assert!(birthday_message(&ada()).starts_with("Dear Ada,\n\n"));
    }

    #[test]
    fn test_typewriter_reveals_by_character() {
        let mut tw = Typewriter::new("Hé!");
        assert_eq!(tw.revealed(), "");
        assert!(!tw.step());
        assert_eq!(tw.revealed(), "H");
        assert!(!tw.step());
        assert_eq!(tw.revealed(), "Hé");
        assert!(tw.step());
        assert_eq!(tw.revealed(), "Hé!");
        assert!(tw.step());
        assert_eq!(tw.len(), 3);
    }

    #[test]
    fn test_empty_typewriter_is_finished() {
        let tw = Typewriter::new("");
        assert!(tw.is_empty());
        assert!(tw.is_finished());
    }

    #[test]
    fn test_confetti_window() {
        let mut confetti = ConfettiWindow::default();
        assert!(confetti.is_visible());
        confetti.close();
        assert!(!confetti.is_visible());
    }

    #[test]
    fn test_letter_default_and_override() {
        let letter = Letter::new(&ada(), None);
        assert!(letter.text().starts_with("My Dearest Ada,"));
        assert_eq!(letter.paragraphs().next(), Some("My Dearest Ada,"));

        let custom = Letter::new(&ada(), Some("Short one.\n\nSee you tonight!"));
        assert_eq!(
            custom.paragraphs().collect::<Vec<_>>(),
            vec!["Short one.", "See you tonight!"]
        );

        assert_eq!(Letter::new(&ada(), Some("")), letter);
    }
}
