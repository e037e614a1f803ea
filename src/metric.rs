use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("wa_bridge_statds")
        .with_description("WhatsApp bridge statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_webhook_event_statds(kind: &str) {
    incr_statds("webhook_event".to_string(), kind.into())
}

pub fn incr_connection_statds(outcome: &str) {
    incr_statds("connection".to_string(), outcome.into())
}

pub fn incr_send_statds(outcome: &str) {
    incr_statds("send".to_string(), outcome.into())
}
