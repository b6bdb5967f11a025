// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The widget frame as seen by the controller.
//
// `FrameView` never touches the DOM itself. It records what the controller
// asked for as `FrameCommand`s; `services::frame_host` drains them, turns
// each into a `FrameAction` and executes it against the document. It also
// keeps the frame's navigation history, which the webview does not expose.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;

use linkshell_core::BrowserView;
use linkshell_core::error::{Result, ShellError};
use linkshell_core::types::PickedFile;
use linkshell_core::widget::{js_literal, js_string_literal};

/// DOM id of the `<iframe>` hosting the widget page.
pub const FRAME_ID: &str = "linkshell-frame";

/// A pending operation on the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCommand {
    /// Point the frame at a new URL.
    Load(String),
    /// Run a script inside the frame window.
    Eval(String),
    /// Step back in the frame's history.
    Back,
}

/// A command ready to run against the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAction {
    /// Set the iframe `src`.
    Navigate(String),
    /// Host script that evaluates the config injection inside the frame.
    Inject(String),
    /// Host script that steps the frame back and reports a [`BackOutcome`].
    Back(String),
}

impl FrameCommand {
    pub fn into_action(self) -> Result<FrameAction> {
        Ok(match self {
            Self::Load(url) => FrameAction::Navigate(url),
            Self::Eval(script) => FrameAction::Inject(in_frame(&script)?),
            Self::Back => FrameAction::Back(back_script()?),
        })
    }
}

impl FrameAction {
    /// The error to show the user when this action's script fails, if any.
    ///
    /// Only a failed injection is surfaced; a failed back step is logged.
    pub fn failure(&self, detail: String) -> Option<ShellError> {
        match self {
            Self::Inject(_) => Some(ShellError::ScriptEvaluation(detail)),
            Self::Navigate(_) | Self::Back(_) => None,
        }
    }
}

/// What `history.back()` did to the frame, as reported by [`back_script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackOutcome {
    /// A new document is loading; its `load` event completes the pop.
    Document,
    /// Same-document navigation (hash or pushState); no `load` follows.
    InPlace,
    /// Nothing happened before the timeout.
    Nothing,
}

#[derive(Debug, Default)]
pub struct FrameView {
    commands: Vec<FrameCommand>,
    history: Vec<String>,
    popping: bool,
}

impl FrameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued commands in issue order.
    pub fn drain(&mut self) -> Vec<FrameCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Record a completed load of `url`.
    ///
    /// After `go_back` the next load is the previous entry, so the top is
    /// popped instead of pushing. A reload of the current URL is not a new
    /// entry.
    pub fn record_load(&mut self, url: &str) {
        if self.popping {
            self.popping = false;
            self.history.pop();
            if self.history.last().map(String::as_str) != Some(url) {
                // History moved somewhere we did not track; resync.
                self.history.push(url.to_owned());
            }
            return;
        }
        if self.history.last().map(String::as_str) != Some(url) {
            self.history.push(url.to_owned());
        }
    }

    /// Apply the frame's report after a back step.
    ///
    /// Only document loads are tracked, so a back step that stayed in the
    /// same document (or went nowhere) leaves the history as it was.
    pub fn back_settled(&mut self, outcome: BackOutcome) {
        match outcome {
            BackOutcome::Document => {}
            BackOutcome::InPlace | BackOutcome::Nothing => self.popping = false,
        }
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl BrowserView for FrameView {
    fn load(&mut self, url: &str) -> Result<()> {
        self.history.clear();
        self.popping = false;
        self.commands.push(FrameCommand::Load(url.to_owned()));
        Ok(())
    }

    fn evaluate_script(&mut self, script: String) -> Result<()> {
        self.commands.push(FrameCommand::Eval(script));
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    fn go_back(&mut self) {
        self.popping = true;
        self.commands.push(FrameCommand::Back);
    }
}

/// Wrap `script` so it runs in the frame's window rather than the host's.
pub fn in_frame(script: &str) -> Result<String> {
    Ok(format!(
        r#"var frame = document.getElementById({id});
if (!frame || !frame.contentWindow) {{ throw new Error('widget frame is not mounted'); }}
frame.contentWindow.eval({script});
return true;"#,
        id = js_string_literal(FRAME_ID)?,
        script = js_string_literal(script)?,
    ))
}

/// Install the bridge shim into the freshly loaded frame and return its URL.
pub fn frame_loaded_script(shim: &str) -> Result<String> {
    Ok(format!(
        r#"var frame = document.getElementById({id});
if (!frame || !frame.contentWindow) {{ throw new Error('widget frame is not mounted'); }}
frame.contentWindow.eval({shim});
return String(frame.contentWindow.location.href);"#,
        id = js_string_literal(FRAME_ID)?,
        shim = js_string_literal(shim)?,
    ))
}

/// Step the frame's own history back and report what kind of navigation
/// followed: `"document"`, `"in_place"` or `"nothing"`.
pub fn back_script() -> Result<String> {
    Ok(format!(
        r#"var frame = document.getElementById({id});
if (!frame || !frame.contentWindow) {{ return 'nothing'; }}
var win = frame.contentWindow;
return await new Promise(function (resolve) {{
  var done = false;
  function settle(outcome) {{ if (!done) {{ done = true; resolve(outcome); }} }}
  frame.addEventListener('load', function () {{ settle('document'); }}, {{ once: true }});
  try {{
    win.addEventListener('beforeunload', function () {{ settle('document'); }}, {{ once: true }});
    win.addEventListener('pagehide', function () {{ settle('document'); }}, {{ once: true }});
    win.addEventListener('popstate', function () {{ settle('in_place'); }}, {{ once: true }});
    win.addEventListener('hashchange', function () {{ settle('in_place'); }}, {{ once: true }});
  }} catch (e) {{}}
  setTimeout(function () {{ settle('nothing'); }}, 1500);
  win.history.back();
}});"#,
        id = js_string_literal(FRAME_ID)?,
    ))
}

/// Host-side listener: forwards envelopes posted by the frame's own window
/// to Rust and ignores everything else.
pub fn host_listener_script() -> Result<String> {
    Ok(format!(
        r#"window.addEventListener('message', function (e) {{
  var frame = document.getElementById({id});
  var d = e.data;
  if (!frame || e.source !== frame.contentWindow) return;
  if (!d || typeof d !== 'object' || d.source !== 'linkshell' || typeof d.kind !== 'string') return;
  dioxus.send({{ kind: d.kind, payload: d.payload === undefined ? null : d.payload }});
}});
await new Promise(function () {{}});"#,
        id = js_string_literal(FRAME_ID)?,
    ))
}

/// Answer file-chooser request `request_id` in the frame.
///
/// With a file, the shim puts it on the requesting input; `None` only
/// releases the request.
pub fn file_result_script(request_id: u64, file: Option<&PickedFile>) -> Result<String> {
    let file = file.map(|f| {
        serde_json::json!({
            "name": f.name,
            "type": f.mime_type,
            "data": STANDARD.encode(&f.contents),
        })
    });
    let reply = serde_json::json!({
        "source": "linkshell-host",
        "kind": "file_chosen",
        "request_id": request_id,
        "file": file,
    });
    Ok(format!(
        r#"var frame = document.getElementById({id});
if (frame && frame.contentWindow) {{
  frame.contentWindow.postMessage({reply}, '*');
}}
return true;"#,
        id = js_string_literal(FRAME_ID)?,
        reply = js_literal(&reply)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_of(script: &str) -> serde_json::Value {
        let start = script.find("postMessage(").expect("postMessage") + "postMessage(".len();
        let end = script.rfind(", '*')").expect("target origin");
        serde_json::from_str(&script[start..end]).expect("reply is JSON")
    }

    #[test]
    fn load_queues_command_and_resets_history() {
        let mut view = FrameView::new();
        view.record_load("a");
        view.record_load("b");
        view.load("entry").expect("load");

        assert_eq!(view.drain(), vec![FrameCommand::Load("entry".into())]);
        assert_eq!(view.history_len(), 0);
        assert!(view.drain().is_empty());
    }

    #[test]
    fn history_tracks_pushes_and_pops() {
        let mut view = FrameView::new();
        view.record_load("entry");
        assert!(!view.can_go_back());

        view.record_load("entry");
        assert_eq!(view.history_len(), 1, "reload is not a new entry");

        view.record_load("next");
        assert!(view.can_go_back());

        view.go_back();
        assert_eq!(view.drain(), vec![FrameCommand::Back]);
        view.back_settled(BackOutcome::Document);
        view.record_load("entry");
        assert_eq!(view.history_len(), 1);
        assert!(!view.can_go_back());
    }

    #[test]
    fn untracked_back_target_resyncs() {
        let mut view = FrameView::new();
        view.record_load("a");
        view.record_load("b");
        view.go_back();
        view.record_load("z");
        assert_eq!(view.history_len(), 2);
    }

    #[test]
    fn in_place_back_does_not_swallow_next_load() {
        for outcome in [BackOutcome::InPlace, BackOutcome::Nothing] {
            let mut view = FrameView::new();
            view.record_load("a");
            view.record_load("b");
            view.go_back();
            view.back_settled(outcome);

            view.record_load("c");
            assert_eq!(view.history_len(), 3, "{outcome:?}");
        }
    }

    #[test]
    fn back_outcome_decodes_from_script_report() {
        let decode = |s: &str| serde_json::from_value::<BackOutcome>(serde_json::json!(s)).expect("outcome");
        assert_eq!(decode("document"), BackOutcome::Document);
        assert_eq!(decode("in_place"), BackOutcome::InPlace);
        assert_eq!(decode("nothing"), BackOutcome::Nothing);

        let script = back_script().expect("script");
        for report in ["'document'", "'in_place'", "'nothing'"] {
            assert!(script.contains(report), "missing {report}");
        }
    }

    #[test]
    fn commands_become_actions_in_order() {
        let mut view = FrameView::new();
        view.load("entry").expect("load");
        view.evaluate_script("inject()".into()).expect("eval");
        view.record_load("entry");
        view.record_load("next");
        view.go_back();

        let actions: Vec<FrameAction> = view
            .drain()
            .into_iter()
            .map(|c| c.into_action().expect("action"))
            .collect();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0], FrameAction::Navigate("entry".into()));
        assert!(matches!(&actions[1], FrameAction::Inject(s) if s.contains(r#""inject()""#)));
        assert!(matches!(&actions[2], FrameAction::Back(s) if s.contains("history.back()")));
    }

    #[test]
    fn only_injection_failures_reach_the_user() {
        let inject = FrameCommand::Eval("x".into()).into_action().expect("action");
        assert!(matches!(
            inject.failure("detached".into()),
            Some(ShellError::ScriptEvaluation(d)) if d == "detached"
        ));

        let back = FrameCommand::Back.into_action().expect("action");
        assert!(back.failure("detached".into()).is_none());
        assert!(FrameAction::Navigate("x".into()).failure("x".into()).is_none());
    }

    #[test]
    fn scripts_embed_literals() {
        let wrapped = in_frame("document.title = 'x';").expect("wrap");
        assert!(wrapped.contains(r#""linkshell-frame""#));
        assert!(wrapped.contains(r#""document.title = 'x';""#));
    }

    #[test]
    fn file_result_carries_request_id_and_contents() {
        let empty = reply_of(&file_result_script(7, None).expect("script"));
        assert_eq!(empty["kind"], "file_chosen");
        assert_eq!(empty["request_id"], 7);
        assert!(empty["file"].is_null());

        let picked = PickedFile {
            name: "scan \"1\".pdf".into(),
            mime_type: "application/pdf".into(),
            contents: b"%PDF-1.7".to_vec(),
        };
        let reply = reply_of(&file_result_script(1_739_000_000_002, Some(&picked)).expect("script"));
        assert_eq!(reply["request_id"], 1_739_000_000_002_u64);
        assert_eq!(reply["file"]["name"], "scan \"1\".pdf");
        assert_eq!(reply["file"]["type"], "application/pdf");
        assert_eq!(reply["file"]["data"], "JVBERi0xLjc=");
    }
}
