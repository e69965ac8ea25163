use super::{PAGE_GATE_NOTICE, global_gate_notice};
use crate::app::state::AppState;
use crate::sink::ConsoleSink;
use charis_engine::{FlowError, Response, ResultSink, SessionError};
use yew::prelude::*;

/// Element id of a question's first radio control, the focus target when
/// the per-page gate flags it.
fn first_radio_id(question_id: &str) -> String {
    format!("q-{question_id}-1")
}

pub fn build_answer(state: &AppState) -> Callback<(AttrValue, Response)> {
    let flow_handle = state.flow.clone();
    Callback::from(move |(id, response): (AttrValue, Response)| {
        let mut flow = (*flow_handle).clone();
        match flow.answer(&id, response) {
            Ok(()) => flow_handle.set(flow),
            Err(err) => log::warn!("answer rejected: {err}"),
        }
    })
}

pub fn build_prev(state: &AppState) -> Callback<()> {
    let flow_handle = state.flow.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        let mut flow = (*flow_handle).clone();
        if flow.prev_page().unwrap_or(false) {
            notice.set(None);
            flow_handle.set(flow);
            crate::dom::scroll_to_top();
        }
    })
}

pub fn build_next(state: &AppState) -> Callback<()> {
    let flow_handle = state.flow.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        let mut flow = (*flow_handle).clone();
        match flow.next_page() {
            Ok(()) => {
                notice.set(None);
                flow_handle.set(flow);
                crate::dom::scroll_to_top();
            }
            Err(FlowError::Session(SessionError::PageIncomplete { first_unanswered })) => {
                notice.set(Some(AttrValue::from(PAGE_GATE_NOTICE)));
                crate::dom::focus_element(&first_radio_id(&first_unanswered));
            }
            Err(FlowError::Session(SessionError::LastPage)) => {}
            Err(err) => log::warn!("page advance rejected: {err}"),
        }
    })
}

pub fn build_submit(state: &AppState) -> Callback<()> {
    let flow_handle = state.flow.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        let mut flow = (*flow_handle).clone();
        match flow.submit(crate::dom::now_iso()) {
            Ok(()) => {
                if let Some(report) = flow.report()
                    && let Err(err) = ConsoleSink.deliver(report)
                {
                    log::error!("report delivery failed: {err}");
                }
                notice.set(None);
                flow_handle.set(flow);
                crate::dom::scroll_to_top();
            }
            Err(FlowError::Session(SessionError::PageIncomplete { first_unanswered })) => {
                notice.set(Some(AttrValue::from(PAGE_GATE_NOTICE)));
                crate::dom::focus_element(&first_radio_id(&first_unanswered));
            }
            Err(FlowError::Session(SessionError::IncompleteSubmission { remaining, .. })) => {
                // the session has already moved the page index to the gap
                notice.set(Some(AttrValue::from(global_gate_notice(remaining))));
                flow_handle.set(flow);
                crate::dom::scroll_to_top();
            }
            Err(err) => log::warn!("submit rejected: {err}"),
        }
    })
}
