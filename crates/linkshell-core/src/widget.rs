// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Widget configuration object and the script that hands it to the page.
//
// The config is built as a typed value and serialised with serde_json. The
// injection script is a fixed body; the only variable parts are JSON
// literals (tag, bridge name, attribute string), so nothing the user types
// ever becomes script source.

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::Result;
use crate::types::Credentials;

/// Colours and sizing passed through `branding.styles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingStyles {
    pub primary_dark: String,
    pub primary_light: String,
    pub secondary_color: String,
    pub min_height: String,
}

impl Default for BrandingStyles {
    fn default() -> Self {
        Self {
            primary_dark: "#186793".into(),
            primary_light: "#2e9ccb".into(),
            secondary_color: "#ffffff".into(),
            min_height: "700px".into(),
        }
    }
}

/// Wrapper matching the widget's `branding: { styles: {...} }` nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub styles: BrandingStyles,
}

/// Feature flags under `options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    pub display_profile: bool,
}

/// The object set as the widget element's `config` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub access_key: String,
    pub host_name: String,
    pub datarequest_id: String,
    pub branding: Branding,
    pub options: WidgetOptions,
}

impl WidgetConfig {
    /// Combine captured credentials with the fixed branding and options.
    pub fn new(credentials: &Credentials, config: &AppConfig) -> Self {
        Self {
            access_key: credentials.access_token().to_owned(),
            host_name: config.host_name.clone(),
            datarequest_id: credentials.data_request_id().to_owned(),
            branding: Branding {
                styles: config.branding.clone(),
            },
            options: config.options.clone(),
        }
    }

    /// The JSON string stored in the element's `config` attribute.
    pub fn to_attribute(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an attribute string back into a config.
    pub fn from_attribute(attr: &str) -> Result<Self> {
        Ok(serde_json::from_str(attr)?)
    }
}

/// Encode any serialisable value as a JavaScript literal expression.
///
/// JSON syntax is valid JS; U+2028/U+2029 are escaped for engines that
/// predate ES2019.
pub fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Encode a string as a JavaScript string literal.
pub fn js_string_literal(value: &str) -> Result<String> {
    js_literal(value)
}

/// Build the one-shot script that sets the widget config.
///
/// The script runs in the page's own window. If the element is found it
/// sets `config` and calls `window[bridge].onConfigInjected(attr)`;
/// otherwise it calls `onConfigError("<tag> element not found")`.
pub fn injection_script(element_tag: &str, bridge_object: &str, config: &WidgetConfig) -> Result<String> {
    let attr = config.to_attribute()?;
    Ok(format!(
        r#"(function (tag, bridge, attr) {{
  var host = window[bridge] || {{}};
  var el = document.querySelector(tag);
  if (el) {{
    el.setAttribute('config', attr);
    console.log('Configuration injected into ' + tag);
    if (host.onConfigInjected) host.onConfigInjected(attr);
  }} else {{
    var msg = tag + ' element not found';
    console.error(msg);
    if (host.onConfigError) host.onConfigError(msg);
  }}
}})({tag}, {bridge}, {attr});"#,
        tag = js_string_literal(element_tag)?,
        bridge = js_string_literal(bridge_object)?,
        attr = js_string_literal(&attr)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PLACEHOLDER_TOKEN;

    fn creds(token: &str, id: &str) -> Credentials {
        Credentials::from_form(token, id, DEFAULT_PLACEHOLDER_TOKEN).expect("valid")
    }

    #[test]
    fn attribute_round_trips_inputs_and_constants() {
        let config = WidgetConfig::new(&creds("tok_abc", "dr_42"), &AppConfig::default());
        let parsed = WidgetConfig::from_attribute(&config.to_attribute().expect("serialise"))
            .expect("parse");

        assert_eq!(parsed.access_key, "tok_abc");
        assert_eq!(parsed.datarequest_id, "dr_42");
        assert_eq!(parsed.host_name, "api-stg.measureone.com");
        assert_eq!(parsed.branding.styles, BrandingStyles::default());
        assert!(!parsed.options.display_profile);
    }

    #[test]
    fn attribute_has_widget_field_names() {
        let config = WidgetConfig::new(&creds("t", "d"), &AppConfig::default());
        let value: serde_json::Value =
            serde_json::from_str(&config.to_attribute().expect("serialise")).expect("json");

        assert_eq!(value["access_key"], "t");
        assert_eq!(value["datarequest_id"], "d");
        assert_eq!(value["branding"]["styles"]["primary_light"], "#2e9ccb");
        assert_eq!(value["branding"]["styles"]["secondary_color"], "#ffffff");
        assert_eq!(value["options"]["display_profile"], false);
    }

    #[test]
    fn hostile_token_stays_inside_a_literal() {
        let token = "x'; alert(1);\u{2028} var y='</script>";
        let config = WidgetConfig::new(&creds(token, "dr\"1"), &AppConfig::default());
        let script = injection_script("m1-link", "Android", &config).expect("script");

        assert!(!script.contains('\u{2028}'));

        // The last argument decodes back to the exact attribute.
        let start = script.rfind("})(").expect("call site") + 3;
        let args = &script[start..script.len() - 2];
        let parsed: Vec<String> =
            serde_json::from_str(&format!("[{args}]")).expect("arguments are JSON");
        assert_eq!(parsed[0], "m1-link");
        assert_eq!(parsed[1], "Android");
        let round = WidgetConfig::from_attribute(&parsed[2]).expect("attr");
        assert_eq!(round.access_key, token);
        assert_eq!(round.datarequest_id, "dr\"1");
    }

    #[test]
    fn script_reports_through_both_callbacks() {
        let config = WidgetConfig::new(&creds("t", "d"), &AppConfig::default());
        let script = injection_script("m1-link", "Android", &config).expect("script");
        assert!(script.contains("onConfigInjected"));
        assert!(script.contains("onConfigError"));
        assert!(script.contains("setAttribute('config', attr)"));
    }
}
