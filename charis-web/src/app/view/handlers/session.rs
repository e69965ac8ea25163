use super::STILL_LOADING_NOTICE;
use crate::app::state::AppState;
use charis_engine::FlowError;
use yew::prelude::*;

pub fn build_start(state: &AppState) -> Callback<()> {
    let flow_handle = state.flow.clone();
    let notice = state.notice.clone();
    let debug = state.debug.clone();
    Callback::from(move |()| {
        let mut flow = (*flow_handle).clone();
        match flow.start(crate::dom::clock_entropy()) {
            Ok(()) => {
                if *debug {
                    let _ = flow.autofill();
                    log::info!("debug mode: auto-filled all answers");
                }
                notice.set(None);
                flow_handle.set(flow);
            }
            Err(FlowError::DataNotReady) => {
                notice.set(Some(AttrValue::from(STILL_LOADING_NOTICE)));
            }
            Err(FlowError::DataUnavailable(message)) => {
                notice.set(Some(AttrValue::from(message)));
            }
            Err(err) => log::warn!("start rejected: {err}"),
        }
    })
}

pub fn build_restart(state: &AppState) -> Callback<()> {
    let flow_handle = state.flow.clone();
    let notice = state.notice.clone();
    Callback::from(move |()| {
        let mut flow = (*flow_handle).clone();
        match flow.restart() {
            Ok(()) => {
                notice.set(None);
                flow_handle.set(flow);
            }
            Err(err) => log::warn!("restart rejected: {err}"),
        }
    })
}
