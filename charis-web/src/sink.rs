use charis_engine::{CompletionReport, ResultSink};

/// The reference result sink: the payload goes to the browser console and
/// nowhere else. A real integration (an HTTP POST, say) would be another
/// [`ResultSink`] implementation swapped in here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

#[cfg(target_arch = "wasm32")]
fn console_log(payload: &str) {
    use wasm_bindgen::JsValue;
    web_sys::console::log_2(
        &JsValue::from_str("completion payload:"),
        &JsValue::from_str(payload),
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn console_log(payload: &str) {
    log::debug!("completion payload: {payload}");
}

impl ResultSink for ConsoleSink {
    type Error = serde_json::Error;

    fn deliver(&self, report: &CompletionReport) -> Result<(), Self::Error> {
        let payload = serde_json::to_string_pretty(report)?;
        log::info!("assessment completed at {}", report.completed_at);
        console_log(&payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charis_engine::{AnswerStore, Response};

    #[test]
    fn console_sink_serializes_the_payload() {
        let mut answers = AnswerStore::new();
        answers.set("q1", Response::Often);
        let report = CompletionReport::new("2026-08-23T10:00:00.000Z", &answers, Vec::new());
        ConsoleSink.deliver(&report).unwrap();
    }
}
