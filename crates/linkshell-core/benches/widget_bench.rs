// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for widget config serialisation, injection script
// building and page message decoding in linkshell-core.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use linkshell_core::AppConfig;
use linkshell_core::message::PageMessage;
use linkshell_core::types::Credentials;
use linkshell_core::widget::{WidgetConfig, injection_script};

fn bench_injection_script(c: &mut Criterion) {
    let config = AppConfig::default();
    let creds = Credentials::from_form(
        "tok_live_4f1c2e9a8b7d6c5e4f3a2b1c",
        "dr_20260101_000042",
        &config.placeholder_token,
    )
    .expect("valid credentials");

    c.bench_function("widget_config_to_attribute", |b| {
        b.iter(|| {
            let widget = WidgetConfig::new(black_box(&creds), black_box(&config));
            widget.to_attribute().expect("serialise")
        })
    });

    let widget = WidgetConfig::new(&creds, &config);
    c.bench_function("injection_script", |b| {
        b.iter(|| injection_script(black_box("m1-link"), black_box("Android"), black_box(&widget)))
    });
}

fn bench_message_decode(c: &mut Criterion) {
    let envelopes = [
        json!({"kind": "config_injected", "payload": "{\"access_key\":\"t\"}"}),
        json!({"kind": "datasource_connected", "payload": "{\"datasource_id\":\"ds_1\"}"}),
        json!({"kind": "file_chooser_requested", "payload": {"request_id": 17, "accept": "application/pdf"}}),
        json!({"kind": "unknown_kind", "payload": "x"}),
    ];

    c.bench_function("page_message_from_envelope", |b| {
        b.iter(|| {
            for envelope in &envelopes {
                let _ = black_box(PageMessage::from_envelope(black_box(envelope)));
            }
        })
    });
}

criterion_group!(benches, bench_injection_script, bench_message_decode);
criterion_main!(benches);
