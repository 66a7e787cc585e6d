//! WebAssembly bindings for Refocus
//!
//! Two surfaces: free functions for the background script (match a URL,
//! decide a navigation) and a [`Session`] handle for the content script,
//! which owns the page's countdown/reminder state machine. Settings cross
//! the boundary as the JSON the extension already keeps in storage.

use wasm_bindgen::prelude::*;

use rf_core::pause::PauseWindow;
use rf_core::policy::{decide, Action};
use rf_core::session::{PageSession, SessionEffect};
use rf_core::{matcher, Settings};

fn parse_patterns(patterns: &JsValue) -> Vec<String> {
    js_sys::Array::from(patterns)
        .iter()
        .filter_map(|value| value.as_string())
        .collect()
}

fn parse_settings(settings_json: &str) -> Result<Settings, JsValue> {
    let mut settings: Settings = serde_json::from_str(settings_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings JSON: {e}")))?;
    settings.repair();
    Ok(settings)
}

/// Does `url` match any of the configured source-site patterns?
/// Malformed URLs never match and never throw.
#[wasm_bindgen]
pub fn match_url(url: &str, patterns: JsValue) -> bool {
    matcher::matches(url, &parse_patterns(&patterns))
}

fn action_name(action: Action) -> &'static str {
    match action {
        Action::None => "none",
        Action::Redirect => "redirect",
        Action::StartCountdown => "startCountdown",
        Action::ShowReminder => "showReminder",
    }
}

/// Decide what to do about a navigation, given the stored settings JSON.
/// Returns `{action, showReminder, trackUsage, targetUrl}`.
#[wasm_bindgen]
pub fn decide_navigation(settings_json: &str, url: &str, now_ms: f64) -> Result<JsValue, JsValue> {
    let settings = parse_settings(settings_json)?;
    let pause = PauseWindow::from_settings(&settings);
    let matched = matcher::matches(url, &settings.source_sites);
    let decision = decide(&settings, &pause, matched, now_ms as u64);

    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"action".into(), &action_name(decision.action).into());
    let _ = js_sys::Reflect::set(&result, &"showReminder".into(), &decision.show_reminder.into());
    let _ = js_sys::Reflect::set(&result, &"trackUsage".into(), &decision.track_usage.into());
    let _ = js_sys::Reflect::set(
        &result,
        &"targetUrl".into(),
        &decision.target_url.map(JsValue::from).unwrap_or(JsValue::NULL),
    );
    Ok(result.into())
}

fn effect_to_js(effect: &SessionEffect) -> JsValue {
    let object = js_sys::Object::new();
    let (kind, value): (&str, JsValue) = match effect {
        SessionEffect::Redirect(url) => ("redirect", url.into()),
        SessionEffect::ShowReminder => ("showReminder", JsValue::NULL),
        SessionEffect::CountdownStarted => ("countdownStarted", JsValue::NULL),
        SessionEffect::DismissCountdown => ("dismissCountdown", JsValue::NULL),
        SessionEffect::PersistPurpose(text) => ("persistPurpose", text.into()),
    };
    let _ = js_sys::Reflect::set(&object, &"type".into(), &kind.into());
    let _ = js_sys::Reflect::set(&object, &"value".into(), &value);
    object.into()
}

fn effects_to_js(effects: Vec<SessionEffect>) -> JsValue {
    effects.iter().map(effect_to_js).collect::<js_sys::Array>().into()
}

/// One page context's confirmation session. The content script creates
/// one per navigation, feeds it the decision for its URL, ticks it once a
/// second, and applies the returned effect objects
/// (`{type: "redirect" | "showReminder" | "countdownStarted" |
/// "dismissCountdown" | "persistPurpose", value}`).
#[wasm_bindgen]
pub struct Session {
    inner: PageSession,
}

#[wasm_bindgen]
impl Session {
    /// Create the session for a freshly loaded page.
    #[wasm_bindgen(constructor)]
    pub fn new(saved_purpose: &str) -> Session {
        Session { inner: PageSession::new(saved_purpose) }
    }

    /// Decide this page's fate from the stored settings and apply it.
    pub fn navigate(&mut self, settings_json: &str, url: &str, now_ms: f64) -> Result<JsValue, JsValue> {
        let settings = parse_settings(settings_json)?;
        let pause = PauseWindow::from_settings(&settings);
        let matched = matcher::matches(url, &settings.source_sites);
        let decision = decide(&settings, &pause, matched, now_ms as u64);
        Ok(effects_to_js(self.inner.apply_decision(&decision)))
    }

    /// Advance the session's one-second timer.
    pub fn tick(&mut self) -> JsValue {
        effects_to_js(self.inner.tick())
    }

    /// Keystroke in the purpose input.
    pub fn input_purpose(&mut self, text: &str) -> JsValue {
        effects_to_js(self.inner.input_purpose(text))
    }

    /// Cancel button pressed. Empty effect list means the gate refused.
    pub fn submit_cancel(&mut self) -> JsValue {
        effects_to_js(self.inner.submit_cancel())
    }

    /// Seconds left on the running countdown, if any.
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.inner.countdown().map(|c| c.remaining())
    }

    /// Would a cancel be accepted right now?
    pub fn can_cancel(&self) -> bool {
        self.inner.countdown().map(|c| c.can_cancel()).unwrap_or(false)
    }
}
