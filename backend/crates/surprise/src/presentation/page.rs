//! Server-Rendered Pages
//!
//! Small self-contained HTML documents. The experience page is a shell:
//! its script follows the session's event stream and patches whatever part
//! of the view a snapshot changed, posting commands back to the JSON API.
//! When the stream is gone for good the page reloads, which starts a fresh
//! session at the password screen.

use kernel::id::ExperienceId;
use platform::html::escape;

use crate::domain::entity::link_request::{LinkRequest, SurpriseLink};
use crate::presentation::dto::AdminForm;
use crate::presentation::view::ExperienceView;

const STYLE: &str = r##"
* { box-sizing: border-box; }
body {
  margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
  font-family: "Segoe UI", system-ui, sans-serif; color: #4a2040;
  background: linear-gradient(135deg, #ffd1dc 0%, #e0c3fc 50%, #c2e9fb 100%);
  overflow-x: hidden;
}
.card {
  position: relative; z-index: 1; max-width: 36rem; width: calc(100% - 2rem); padding: 2rem;
  border-radius: 1.5rem; background: rgba(255, 255, 255, 0.85); text-align: center;
  box-shadow: 0 1rem 3rem rgba(74, 32, 64, 0.2);
}
h1 { margin-top: 0; }
input, button { font: inherit; padding: 0.6rem 1rem; border-radius: 0.75rem; }
input { border: 2px solid #e0a3c8; width: 100%; margin-bottom: 0.75rem; }
button { border: 0; background: #ff6b9d; color: #fff; cursor: pointer; }
button:disabled { opacity: 0.6; cursor: default; }
label { display: block; text-align: left; margin-bottom: 0.25rem; font-weight: 600; }
.notice { color: #c0392b; font-weight: 600; }
.shake { animation: shake 0.4s; }
.clock { display: flex; gap: 1rem; justify-content: center; }
.clock b { display: block; font-size: 2.5rem; }
.gift { font-size: 5rem; background: none; }
.gift.opened { animation: pop 0.6s forwards; }
.message { white-space: pre-wrap; text-align: left; font-family: inherit; }
.letter p { text-align: left; line-height: 1.6; }
.hearts { position: fixed; inset: 0; pointer-events: none; }
.heart { position: absolute; bottom: -3rem; animation: rise linear infinite; }
.confetti { position: fixed; top: -1rem; width: 0.6rem; height: 1rem; animation: fall linear forwards; }
.link { font-family: monospace; }
@keyframes rise { to { transform: translateY(-110vh); opacity: 0; } }
@keyframes fall { to { transform: translateY(110vh) rotate(720deg); } }
@keyframes pop { to { transform: scale(1.4); opacity: 0; } }
@keyframes shake { 25% { transform: translateX(-6px); } 75% { transform: translateX(6px); } }
"##;

const EXPERIENCE_SCRIPT: &str = r##"
const app = document.getElementById('app');
const base = `/api/experience/${app.dataset.experience}`;
const post = (path, body) => fetch(`${base}/${path}`, {
  method: 'POST',
  headers: { 'Content-Type': 'application/json' },
  body: JSON.stringify(body ?? {}),
});
const esc = (s) => String(s).replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#x27;' }[c]));
const pad = (n) => String(n).padStart(2, '0');

const hearts = (list) => list.map((h) =>
  `<span class="heart" style="left:${h.leftPct}%;animation-delay:${h.delaySecs}s;animation-duration:${h.durationSecs}s;font-size:${h.sizeRem}rem">${h.glyph}</span>`).join('');

const screens = {
  password: (v, p) => `<section class="card"><h1>🎁 A surprise for ${esc(v.recipientName)}</h1>
    <p>Enter the secret code to open it</p>
    <form id="unlock"><input name="code" type="password" autocomplete="off" autofocus class="${p.rejected ? 'shake' : ''}">
    <button>Unlock</button></form>${p.notice ? `<p class="notice">${esc(p.notice)}</p>` : ''}</section>`,
  countdown: (v, c) => c.celebrating
    ? `<section class="card"><h1>🎉 ${esc(c.headline)} 🎉</h1></section>`
    : `<section class="card"><h1>Counting down for ${esc(v.recipientName)}</h1><div class="clock">${
        [['days', c.days], ['hours', c.hours], ['minutes', c.minutes], ['seconds', c.seconds]]
          .map(([label, n]) => `<div><b>${pad(n)}</b><small>${label}</small></div>`).join('')}</div></section>`,
  gift: (v, g) => `<section class="card"><h1>A gift for you!</h1>
    <button id="open-gift" class="gift ${g.opened ? 'opened' : ''}" ${g.opened ? 'disabled' : ''}>🎁</button>
    <p>${g.opened ? 'Opening...' : 'Tap to open'}</p></section>`,
  message: (v, m) => `<section class="card"><pre class="message">${esc(m.text)}</pre>
    ${m.complete ? '<button id="advance">Continue</button>' : ''}</section>`,
  surprise: (v, s) => `<section class="card"><h1>🎂 Happy Birthday, ${esc(v.recipientName)}! 🎂</h1>
    <button id="advance">Read your letter</button></section>${s.confetti.map((p) =>
      `<i class="confetti" style="left:${p.leftPct}%;background:${p.color};animation-delay:${p.delaySecs}s;animation-duration:${p.durationSecs}s;transform:rotate(${p.rotationDeg}deg)"></i>`).join('')}`,
  letter: (v, l) => `<section class="card letter">${l.paragraphs.map((p) => `<p>${esc(p)}</p>`).join('')}</section>`,
};

app.innerHTML = '<div class="hearts"></div><div id="screen"></div>';
const heartsLayer = app.querySelector('.hearts');
const panelHost = document.getElementById('screen');
let shownHearts = '';
let shownPanel = '';

function render(view) {
  const layer = hearts(view.hearts);
  if (layer !== shownHearts) {
    heartsLayer.innerHTML = layer;
    shownHearts = layer;
  }

  const panel = screens[view.screen](view, view[view.screen]);
  if (panel === shownPanel) return;
  shownPanel = panel;

  const input = document.querySelector('#unlock input');
  const typed = input?.value ?? '';
  const caret = input && document.activeElement === input ? [input.selectionStart, input.selectionEnd] : null;
  panelHost.innerHTML = panel;

  const form = document.getElementById('unlock');
  if (form) {
    form.code.value = typed;
    if (caret) {
      form.code.focus();
      form.code.setSelectionRange(caret[0], caret[1]);
    }
    form.addEventListener('submit', (e) => {
      e.preventDefault();
      post('unlock', { code: form.code.value });
    });
  }
  document.getElementById('open-gift')?.addEventListener('click', () => post('open-gift'));
  document.getElementById('advance')?.addEventListener('click', () => post('advance'));
}

render(JSON.parse(app.dataset.initial));
const events = new EventSource(`${base}/events`);
events.addEventListener('snapshot', (e) => render(JSON.parse(e.data)));
events.addEventListener('error', () => {
  if (events.readyState !== EventSource.CLOSED) return;
  shownPanel = '';
  panelHost.innerHTML = '<section class="card"><h1>Connection lost</h1><p class="notice">Reloading your surprise...</p></section>';
  setTimeout(() => location.reload(), 3000);
});
"##;

const ADMIN_SCRIPT: &str = r##"
document.getElementById('create')?.addEventListener('submit', (e) => {
  const form = e.target;
  const local = new Date(`${form.date.value}T${form.time.value}`);
  const [hours, minutes] = form.time.value.split(':').map(Number);
  if (Number.isNaN(local.getTime())) {
    form.utc_offset_minutes.value = '';
  } else if (local.getHours() !== hours || local.getMinutes() !== minutes) {
    form.utc_offset_minutes.value = 'skipped';
  } else {
    form.utc_offset_minutes.value = String(-local.getTimezoneOffset());
  }
});
document.getElementById('copy')?.addEventListener('click', () => {
  const link = document.getElementById('link');
  navigator.clipboard.writeText(link.value);
});
"##;

fn layout(title: &str, body: &str, script: Option<&str>) -> String {
    let mut html = String::with_capacity(STYLE.len() + body.len() + 512);
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>");
    html.push_str(&escape(title));
    html.push_str("</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body>");
    html.push_str(body);
    if let Some(script) = script {
        html.push_str("<script>");
        html.push_str(script);
        html.push_str("</script>");
    }
    html.push_str("</body></html>");
    html
}

/// Shown when a link lacks its code or date.
pub fn fallback_page() -> String {
    layout(
        "Birthday Surprise",
        "<section class=\"card\"><h1>🎈 Oops!</h1>\
         <p>This surprise link is incomplete.</p>\
         <p>Ask the person who sent it for the full link.</p>\
         <p><a href=\"/admin\">Create a surprise of your own</a></p></section>",
        None,
    )
}

/// The experience shell, seeded with the first view.
pub fn experience_page(id: ExperienceId, view: &ExperienceView) -> Result<String, serde_json::Error> {
    let initial = serde_json::to_string(view)?;
    let body = format!(
        "<main id=\"app\" data-experience=\"{id}\" data-initial=\"{}\"></main>",
        escape(&initial)
    );
    let title = format!("A surprise for {}", view.recipient_name);
    Ok(layout(&title, &body, Some(EXPERIENCE_SCRIPT)))
}

/// Link generator form, optionally with a blocking notice.
pub fn admin_form_page(form: &AdminForm, notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!("<p class=\"notice\" role=\"alert\">{}</p>", escape(n)))
        .unwrap_or_default();

    let body = format!(
        "<section class=\"card\"><h1>🎂 Create a Birthday Surprise</h1>{notice}\
         <form id=\"create\" method=\"post\" action=\"/admin\">\
         <label for=\"name\">Recipient name</label>\
         <input id=\"name\" name=\"name\" value=\"{name}\">\
         <label for=\"code\">Secret code</label>\
         <input id=\"code\" name=\"code\" value=\"{code}\">\
         <label for=\"date\">Unlock date</label>\
         <input id=\"date\" name=\"date\" type=\"date\" value=\"{date}\">\
         <label for=\"time\">Unlock time</label>\
         <input id=\"time\" name=\"time\" type=\"time\" value=\"{time}\">\
         <input name=\"utc_offset_minutes\" type=\"hidden\">\
         <button>Generate Link</button></form></section>",
        name = escape(&form.name),
        code = escape(&form.code),
        date = escape(&form.date),
        time = escape(&form.time),
    );
    layout("Create a Birthday Surprise", &body, Some(ADMIN_SCRIPT))
}

/// The generated link with sharing instructions.
pub fn admin_result_page(request: &LinkRequest, link: &SurpriseLink) -> String {
    let body = format!(
        "<section class=\"card\"><h1>🎉 Your surprise is ready!</h1>\
         <input id=\"link\" class=\"link\" readonly value=\"{url}\">\
         <button id=\"copy\" type=\"button\">Copy Link</button>\
         <h2>How to share</h2>\
         <p>Send this link to <strong>{name}</strong>.</p>\
         <p>Tell them the secret code: <strong>{code}</strong></p>\
         <p>It unlocks on <strong>{date}</strong> at <strong>{time}</strong>.</p>\
         <p><a href=\"/admin\">Create Another Surprise</a></p></section>",
        url = escape(&link.url),
        name = escape(request.name.trim()),
        code = escape(&request.code),
        date = escape(request.date.trim()),
        time = escape(request.time.trim()),
    );
    layout("Your surprise is ready", &body, Some(ADMIN_SCRIPT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dto::SKIPPED_LOCAL_TIME;
    use chrono::Utc;

    #[test]
    fn test_admin_script_marks_skipped_local_times() {
        assert!(ADMIN_SCRIPT.contains(&format!("'{SKIPPED_LOCAL_TIME}'")));
        assert!(admin_form_page(&AdminForm::default(), None).contains(ADMIN_SCRIPT));
    }

    #[test]
    fn test_experience_script_reloads_on_lost_stream() {
        assert!(EXPERIENCE_SCRIPT.contains("EventSource.CLOSED"));
        assert!(EXPERIENCE_SCRIPT.contains("location.reload()"));
    }

    #[test]
    fn test_fallback_mentions_incomplete_link() {
        let html = fallback_page();
        assert!(html.contains("incomplete"));
        assert!(html.contains("href=\"/admin\""));
    }

    #[test]
    fn test_admin_form_keeps_values_escaped() {
        let form = AdminForm {
            name: "<b>Ada</b>".into(),
            ..Default::default()
        };
        let html = admin_form_page(&form, Some("Missing required fields: code"));
        assert!(html.contains("value=\"&lt;b&gt;Ada&lt;/b&gt;\""));
        assert!(html.contains("Missing required fields: code"));
        assert!(!html.contains("<b>Ada</b>"));
    }

    #[test]
    fn test_result_page_has_instructions() {
        let request = LinkRequest {
            name: "Ada".into(),
            code: "cake & candles".into(),
            date: "2026-12-10".into(),
            time: "09:15".into(),
        };
        let link = request.to_link("https://surprise.example", &Utc).unwrap();
        let html = admin_result_page(&request, &link);

        assert!(html.contains("cake &amp; candles"));
        assert!(html.contains("Create Another Surprise"));
        assert!(html.contains("href=\"/admin\""));
        assert!(html.contains("https://surprise.example?name=Ada&amp;code=cake%20%26%20candles"));
    }
}
