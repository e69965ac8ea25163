mod handlers;

pub use handlers::{AppHandlers, PAGE_GATE_NOTICE, STILL_LOADING_NOTICE, global_gate_notice};

use crate::app::state::AppState;
use crate::components::ui::debug_banner::DebugBanner;
use crate::pages::quiz::{QuizItem, QuizPage};
use crate::pages::results::ResultsPage;
use crate::pages::start::StartPage;
use charis_engine::{AssessmentSession, FlowState};
use yew::prelude::*;

/// Top-level render dispatch: one view per flow phase, derived entirely
/// from the flow value.
pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);
    let notice = (*state.notice).clone();

    let body = match state.flow.state() {
        FlowState::NotStarted => html! {
            <StartPage
                data_ready={state.data_ready()}
                load_error={state.flow.load_error().map(|m| AttrValue::from(m.to_string()))}
                notice={notice}
                on_start={handlers.start.clone()}
            />
        },
        FlowState::InProgress(session) => html! {
            <QuizPage
                items={quiz_items(session)}
                page_index={session.page_index()}
                page_count={session.page_count()}
                answered_count={session.answered_count()}
                total_questions={session.total_questions()}
                show_next={!session.on_last_page()}
                show_submit={session.submit_visible()}
                notice={notice}
                on_answer={handlers.answer.clone()}
                on_prev={handlers.prev.clone()}
                on_next={handlers.next.clone()}
                on_submit={handlers.submit.clone()}
            />
        },
        FlowState::Completed(report) => html! {
            <ResultsPage report={report.clone()} on_restart={handlers.restart.clone()} />
        },
    };

    html! {
        <>
            if *state.debug {
                <DebugBanner />
            }
            <header class="app-header">
                <h1>{ "Spiritual Gifts Self-Assessment" }</h1>
            </header>
            <main id="main" role="main" class="app-main">
                { body }
            </main>
            <footer class="app-footer">
                <p class="muted">{ "Your answers never leave this browser." }</p>
            </footer>
        </>
    }
}

fn quiz_items(session: &AssessmentSession) -> Vec<QuizItem> {
    let base = session.sequence_base();
    session
        .current_page()
        .iter()
        .enumerate()
        .map(|(index_on_page, question)| QuizItem {
            question: question.clone(),
            sequence: base + index_on_page + 1,
            value: session.answers().get(&question.id),
        })
        .collect()
}
