//! View Rendering
//!
//! Turns a session snapshot into what the page shows. Exactly one screen
//! panel is filled; the rest are omitted from the JSON.

use serde::Serialize;

use crate::application::session::SessionSnapshot;
use crate::domain::decoration::{ConfettiPiece, Heart};
use crate::domain::screen::Screen;

pub const REJECTED_CODE_NOTICE: &str = "Oops! That's not the right code. Try again!";
pub const TIMES_UP_HEADLINE: &str = "Time's Up!";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceView {
    pub screen: Screen,
    pub recipient_name: String,
    pub hearts: Vec<Heart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<CountdownView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift: Option<GiftView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surprise: Option<SurpriseView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<LetterView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordView {
    pub rejected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownView {
    pub target_instant: String,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub complete: bool,
    pub celebrating: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GiftView {
    pub opened: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub text: String,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurpriseView {
    pub confetti_visible: bool,
    pub confetti: Vec<ConfettiPiece>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LetterView {
    pub paragraphs: Vec<String>,
}

pub fn render(snapshot: &SessionSnapshot) -> ExperienceView {
    let exp = &snapshot.experience;
    let mut view = ExperienceView {
        screen: exp.screen,
        recipient_name: exp.recipient_name.clone(),
        hearts: snapshot.hearts.clone(),
        password: None,
        countdown: None,
        gift: None,
        message: None,
        surprise: None,
        letter: None,
    };

    match exp.screen {
        Screen::Password => {
            view.password = Some(PasswordView {
                rejected: exp.is_rejected,
                notice: exp.is_rejected.then_some(REJECTED_CODE_NOTICE),
            });
        }
        Screen::Countdown => {
            let left = exp.countdown.time_left;
            view.countdown = Some(CountdownView {
                target_instant: exp.target_instant.to_iso_string(),
                days: left.days,
                hours: left.hours,
                minutes: left.minutes,
                seconds: left.seconds,
                complete: exp.countdown.is_complete,
                celebrating: exp.celebrating,
                headline: exp.celebrating.then_some(TIMES_UP_HEADLINE),
            });
        }
        Screen::Gift => {
            view.gift = Some(GiftView {
                opened: exp.gift_opened,
            });
        }
        Screen::Message => {
            view.message = Some(MessageView {
                text: exp.message.clone(),
                complete: exp.message_complete,
            });
        }
        Screen::Surprise => {
            view.surprise = Some(SurpriseView {
                confetti_visible: exp.confetti_visible,
                confetti: if exp.confetti_visible {
                    snapshot.confetti.clone()
                } else {
                    Vec::new()
                },
            });
        }
        Screen::Letter => {
            view.letter = Some(LetterView {
                paragraphs: exp.letter.clone(),
            });
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::surprise_parameters::SurpriseParameters;
    use crate::domain::experience::{Command, Experience, Timer};
    use chrono::Utc;

    fn experience() -> Experience {
        let params = SurpriseParameters::from_query(
            Some("Ada"),
            Some("cake"),
            Some("2000-01-01T00:00:00.000Z"),
        )
        .unwrap();
        Experience::new(params)
    }

    fn snapshot(exp: &Experience) -> SessionSnapshot {
        SessionSnapshot {
            experience: exp.snapshot(),
            hearts: Vec::new(),
            confetti: Vec::new(),
        }
    }

    fn panels(view: &ExperienceView) -> usize {
        [
            view.password.is_some(),
            view.countdown.is_some(),
            view.gift.is_some(),
            view.message.is_some(),
            view.surprise.is_some(),
            view.letter.is_some(),
        ]
        .into_iter()
        .filter(|shown| *shown)
        .count()
    }

    #[test]
    fn test_exactly_one_panel_per_screen() {
        let mut exp = experience();
        let now = Utc::now();
        let mut seen = Vec::new();

        let mut check = |exp: &Experience| {
            let view = render(&snapshot(exp));
            assert_eq!(panels(&view), 1, "{:?}", view.screen);
            seen.push(view.screen);
        };

        check(&exp);
        exp.handle(Command::SubmitCode("cake".into()), now).unwrap();
        check(&exp);
        exp.elapsed(Timer::CelebrationPause, now);
        check(&exp);
        exp.handle(Command::OpenGift, now).unwrap();
        exp.elapsed(Timer::GiftOpening, now);
        check(&exp);
        while !exp.snapshot().message_complete {
            exp.elapsed(Timer::TypewriterStep, now);
        }
        exp.handle(Command::Advance, now).unwrap();
        check(&exp);
        exp.handle(Command::Advance, now).unwrap();
        check(&exp);

        assert_eq!(seen, Screen::ALL.to_vec());
    }

    #[test]
    fn test_rejection_notice() {
        let mut exp = experience();
        exp.handle(Command::SubmitCode("pie".into()), Utc::now()).unwrap();

        let password = render(&snapshot(&exp)).password.unwrap();
        assert!(password.rejected);
        assert_eq!(password.notice, Some(REJECTED_CODE_NOTICE));
    }

    #[test]
    fn test_celebrating_headline() {
        let mut exp = experience();
        exp.handle(Command::SubmitCode("cake".into()), Utc::now()).unwrap();

        let countdown = render(&snapshot(&exp)).countdown.unwrap();
        assert!(countdown.complete);
        assert!(countdown.celebrating);
        assert_eq!(countdown.headline, Some(TIMES_UP_HEADLINE));
        assert_eq!((countdown.days, countdown.seconds), (0, 0));
    }

    #[test]
    fn test_json_omits_hidden_panels() {
        let json = serde_json::to_value(render(&snapshot(&experience()))).unwrap();
        assert_eq!(json["screen"], "password");
        assert!(json.get("letter").is_none());
        assert!(json.get("recipientName").is_some());
    }
}
