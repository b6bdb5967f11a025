// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page → host message protocol.
//
// The page never calls host code by name. A shim installed into the page
// window exposes a fixed set of methods, each of which posts a
// `{ kind, payload }` envelope. The host decodes envelopes into
// `PageMessage`; anything outside the enumerated kinds is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};
use crate::types::{Notification, NotificationLevel, ToastDuration};
use crate::widget::js_string_literal;

/// Every message kind the host accepts.
pub const KNOWN_KINDS: &[&str] = &[
    "config_injected",
    "config_error",
    "message",
    "datasource_connected",
    "show_notification",
    "file_chooser_requested",
    "console",
];

/// A console line forwarded from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Messages the embedded page can send to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum PageMessage {
    /// The injection script set the config; payload is the attribute.
    ConfigInjected(String),
    /// The injection script could not find the widget element.
    ConfigError(String),
    /// Free-form message from the page.
    Message(String),
    /// The widget finished connecting a data source.
    DatasourceConnected(String),
    /// The page asked for a toast with this text.
    ShowNotification(String),
    /// A file input was activated. `request_id` is chosen by the page and
    /// echoed back with the result so it reaches the right input.
    FileChooserRequested {
        request_id: u64,
        #[serde(default)]
        accept: Option<String>,
    },
    /// Console error or uncaught exception in the page.
    Console(ConsoleMessage),
}

impl PageMessage {
    /// Decode a `{ "kind": ..., "payload": ... }` envelope.
    pub fn from_envelope(value: &serde_json::Value) -> Result<Self> {
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .ok_or_else(|| ShellError::UnknownMessage("missing kind".into()))?;
        if !KNOWN_KINDS.contains(&kind) {
            return Err(ShellError::UnknownMessage(kind.to_owned()));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Wire name of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigInjected(_) => "config_injected",
            Self::ConfigError(_) => "config_error",
            Self::Message(_) => "message",
            Self::DatasourceConnected(_) => "datasource_connected",
            Self::ShowNotification(_) => "show_notification",
            Self::FileChooserRequested { .. } => "file_chooser_requested",
            Self::Console(_) => "console",
        }
    }

    /// The toast this message produces, if any.
    ///
    /// Page-supplied text is cut to `max_chars` characters.
    pub fn notification(&self, max_chars: usize) -> Option<Notification> {
        let n = match self {
            Self::ConfigInjected(_) => Notification::new(
                "Widget configuration loaded successfully",
                ToastDuration::Short,
                NotificationLevel::Success,
            ),
            Self::ConfigError(error) => Notification::error(
                format!("Error: {}", truncate_chars(error, max_chars)),
                ToastDuration::Long,
            ),
            Self::Message(message) => {
                Notification::info(format!("WebView Message: {}", truncate_chars(message, max_chars)))
            }
            Self::DatasourceConnected(_) => Notification::new(
                "M1 Widget connected successfully!",
                ToastDuration::Long,
                NotificationLevel::Success,
            ),
            Self::ShowNotification(text) => Notification::info(truncate_chars(text, max_chars)),
            Self::FileChooserRequested { .. } | Self::Console(_) => return None,
        };
        Some(n)
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_owned(),
    }
}

/// Script installed into every page load that defines `window[bridge]`.
///
/// The object is frozen and exposes exactly the five callback methods the
/// widget page uses. It also forwards console errors and takes over
/// file inputs: a click posts `file_chooser_requested` with a fresh request
/// id, and the host's `file_chosen` reply for that id (accepted only from
/// the parent window) is turned into a `File` on `input.files` followed by
/// `input` and `change` events. An empty reply leaves the input untouched.
pub fn shim_script(bridge_object: &str) -> Result<String> {
    Ok(format!(
        r#"(function (bridge) {{
  if (window.__linkshellShim) return;
  window.__linkshellShim = true;
  function text(v) {{ return v == null ? '' : String(v); }}
  function post(kind, payload) {{
    window.parent.postMessage({{ source: 'linkshell', kind: kind, payload: payload }}, '*');
  }}
  window[bridge] = Object.freeze({{
    onConfigInjected: function (v) {{ post('config_injected', text(v)); }},
    onConfigError: function (v) {{ post('config_error', text(v)); }},
    onMessageReceived: function (v) {{ post('message', text(v)); }},
    onDatasourceConnected: function (v) {{ post('datasource_connected', text(v)); }},
    showToast: function (v) {{ post('show_notification', text(v)); }}
  }});
  var pendingInputs = {{}};
  var nextRequest = Date.now();
  document.addEventListener('click', function (e) {{
    var t = e.composedPath ? e.composedPath()[0] : e.target;
    if (t && t.tagName === 'INPUT' && t.type === 'file') {{
      e.preventDefault();
      var id = nextRequest++;
      pendingInputs[id] = t;
      post('file_chooser_requested', {{ request_id: id, accept: t.accept || null }});
    }}
  }}, true);
  function deliver(input, f) {{
    var raw = atob(f.data);
    var bytes = new Uint8Array(raw.length);
    for (var i = 0; i < raw.length; i++) bytes[i] = raw.charCodeAt(i);
    var dt = new DataTransfer();
    dt.items.add(new File([bytes], f.name, {{ type: f.type }}));
    input.files = dt.files;
    input.dispatchEvent(new Event('input', {{ bubbles: true, composed: true }}));
    input.dispatchEvent(new Event('change', {{ bubbles: true, composed: true }}));
  }}
  window.addEventListener('message', function (e) {{
    var d = e.data;
    if (e.source !== window.parent || !d || d.source !== 'linkshell-host' || d.kind !== 'file_chosen') return;
    var input = pendingInputs[d.request_id];
    delete pendingInputs[d.request_id];
    if (input && d.file) deliver(input, d.file);
  }});
  var consoleError = console.error;
  console.error = function () {{
    var msg = Array.prototype.map.call(arguments, text).join(' ');
    post('console', {{ level: 'error', message: msg, line: null, source: location.href }});
    return consoleError.apply(console, arguments);
  }};
  window.addEventListener('error', function (e) {{
    post('console', {{ level: 'error', message: text(e.message), line: e.lineno || null, source: text(e.filename) }});
  }});
}})({bridge});"#,
        bridge = js_string_literal(bridge_object)?,
    ))
}
