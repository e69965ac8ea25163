//! Scenario catalog: each scenario drives whole sessions through the
//! engine and checks one of its guarantees end to end.

use charis_engine::{
    AnswerStore, AssessmentData, AssessmentSession, PAGE_SIZE, Response, ResultSink, SessionError,
    SessionFlow, page_count, page_slice, score_gifts,
};
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::feed::ReportDrain;

/// Scenario keys and the one-line descriptions `--list-scenarios` prints.
pub const CATALOG: &[(&str, &str)] = &[
    (
        "smoke",
        "Full respondent walk-through: page gates, submit, report shape",
    ),
    (
        "gate-enforcement",
        "Per-page and global gates must block, flag, and redirect",
    ),
    (
        "shuffle-integrity",
        "Working order is a permutation and pages reconstruct it exactly",
    ),
    (
        "scoring-determinism",
        "Scoring is pure, ranked descending, ties keep feed order",
    ),
    (
        "restart-hygiene",
        "Restart clears answers, keeps data, and reshuffles on start",
    ),
];

/// Expand scenario tokens, replacing `all` with the whole catalog.
#[must_use]
pub fn expand_scenarios(tokens: &[String]) -> Vec<String> {
    let mut scenarios: Vec<String> = Vec::new();
    for token in tokens {
        if token == "all" {
            scenarios.extend(CATALOG.iter().map(|(key, _)| (*key).to_string()));
        } else {
            scenarios.push(token.clone());
        }
    }
    scenarios.dedup();
    scenarios
}

/// How a simulated respondent fills in answers. `pick` takes the
/// question's position in its page so the skipper stays deterministic.
#[derive(Debug, Clone, Copy)]
pub enum RespondentPolicy {
    /// Uniform random scale point per question.
    UniformRandom,
    /// The same scale point everywhere, for tie-heavy score tables.
    Fixed(Response),
    /// Random answers, but every `n`th question is left blank to
    /// exercise the gates.
    Skipper(usize),
}

impl RespondentPolicy {
    fn pick(self, position: usize, rng: &mut ChaCha20Rng) -> Option<Response> {
        let random = Response::ALL[rng.gen_range(0..Response::ALL.len())];
        match self {
            Self::UniformRandom => Some(random),
            Self::Fixed(response) => Some(response),
            Self::Skipper(n) => ((position + 1) % n != 0).then_some(random),
        }
    }
}

/// Outcome of one scenario over one seed.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    pub average_duration_us: u64,
}

type ScenarioFn = fn(&AssessmentData, u64) -> Result<(), String>;

fn scenario_fn(name: &str) -> Option<ScenarioFn> {
    match name {
        "smoke" => Some(run_smoke),
        "gate-enforcement" => Some(run_gate_enforcement),
        "shuffle-integrity" => Some(run_shuffle_integrity),
        "scoring-determinism" => Some(run_scoring_determinism),
        "restart-hygiene" => Some(run_restart_hygiene),
        _ => None,
    }
}

/// Run one scenario for `iterations` passes over offsets of `seed`.
/// Returns `None` for an unknown scenario name.
#[must_use]
pub fn run_scenario(
    name: &str,
    data: &AssessmentData,
    seed: u64,
    iterations: usize,
    verbose: bool,
) -> Option<ScenarioResult> {
    let run = scenario_fn(name)?;
    if verbose {
        println!("testing {} (seed {seed})", name.bright_white());
    }

    let mut failures = Vec::new();
    let mut successes = 0;
    let mut total = Duration::ZERO;
    for i in 0..iterations {
        let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
        let started = Instant::now();
        match run(data, iteration_seed) {
            Ok(()) => successes += 1,
            Err(err) => failures.push(format!("iteration {} (seed {iteration_seed}): {err}", i + 1)),
        }
        total += started.elapsed();
    }

    let average = total / u32::try_from(iterations.max(1)).unwrap_or(1);
    Some(ScenarioResult {
        scenario_name: name.to_string(),
        seed,
        passed: failures.is_empty(),
        iterations_run: iterations,
        successful_iterations: successes,
        failures,
        average_duration_us: u64::try_from(average.as_micros()).unwrap_or(u64::MAX),
    })
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn loaded_flow(data: &AssessmentData) -> SessionFlow {
    let mut flow = SessionFlow::new();
    flow.set_data(data.clone());
    flow
}

fn page_ids(flow: &SessionFlow) -> Result<Vec<String>, String> {
    let session = flow.session().ok_or("no session in progress")?;
    Ok(session.current_page().iter().map(|q| q.id.clone()).collect())
}

/// Happy path: answer page by page through the gates, submit from the
/// last page, and check the report against an independent recomputation.
fn run_smoke(data: &AssessmentData, seed: u64) -> Result<(), String> {
    let mut flow = loaded_flow(data);
    flow.start(seed).map_err(|err| format!("start: {err}"))?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0x5EED);
    let policy = RespondentPolicy::UniformRandom;

    loop {
        for (position, id) in page_ids(&flow)?.iter().enumerate() {
            if let Some(response) = policy.pick(position, &mut rng) {
                flow.answer(id, response)
                    .map_err(|err| format!("answer {id}: {err}"))?;
            }
        }
        let session = flow.session().ok_or("no session in progress")?;
        if session.on_last_page() {
            if !session.submit_visible() {
                return Err("submit affordance missing on the last page".to_string());
            }
            break;
        }
        flow.next_page().map_err(|err| format!("next: {err}"))?;
    }

    flow.submit(timestamp())
        .map_err(|err| format!("submit: {err}"))?;
    let report = flow.report().ok_or("completed flow lost its report")?;

    if report.answers.len() != data.question_count() {
        return Err(format!(
            "report carries {} answers for {} questions",
            report.answers.len(),
            data.question_count()
        ));
    }
    if report.gift_scores.len() != data.gifts.len() {
        return Err(format!(
            "report ranks {} gifts of {}",
            report.gift_scores.len(),
            data.gifts.len()
        ));
    }

    let expected: HashMap<&str, u32> = data
        .gifts
        .iter()
        .map(|gift| {
            let total = gift
                .items
                .iter()
                .filter_map(|id| report.answers.get(id))
                .map(|value| u32::from(*value))
                .sum();
            (gift.key.as_str(), total)
        })
        .collect();
    for score in &report.gift_scores {
        let want = expected
            .get(score.key.as_str())
            .ok_or_else(|| format!("score for unknown gift '{}'", score.key))?;
        if score.total != *want {
            return Err(format!(
                "gift '{}' scored {} but its items sum to {want}",
                score.key, score.total
            ));
        }
    }
    if !report
        .gift_scores
        .windows(2)
        .all(|pair| pair[0].total >= pair[1].total)
    {
        return Err("gift scores are not ranked descending".to_string());
    }

    let drain = ReportDrain::default();
    drain
        .deliver(report)
        .map_err(|err| format!("delivery: {err}"))?;
    if drain.delivered() != 1 {
        return Err("sink did not record the delivery".to_string());
    }
    Ok(())
}

/// Adversarial respondent: gaps on the visible page must block with the
/// first gap flagged, and a submit over a later gap must redirect there
/// with the exact remaining count.
fn run_gate_enforcement(data: &AssessmentData, seed: u64) -> Result<(), String> {
    if data.question_count() <= PAGE_SIZE {
        return Err("data set too small to exercise the paging gates".to_string());
    }
    let mut session = AssessmentSession::new(data.clone(), seed);
    let mut rng = ChaCha20Rng::seed_from_u64(seed ^ 0x6A7E);
    let skipper = RespondentPolicy::Skipper(PAGE_SIZE / 2);
    let filler = RespondentPolicy::UniformRandom;

    // untouched page: the first question is the flagged one
    let first_id = session.current_page()[0].id.clone();
    match session.next_page() {
        Err(SessionError::PageIncomplete { first_unanswered }) if first_unanswered == first_id => {}
        other => return Err(format!("blank page advance not blocked: {other:?}")),
    }
    if session.page_index() != 0 {
        return Err("failed advance moved the page index".to_string());
    }

    // gaps left by the skipper: the earliest one is the flagged one
    let ids: Vec<String> = session.current_page().iter().map(|q| q.id.clone()).collect();
    let mut skipped = Vec::new();
    for (position, id) in ids.iter().enumerate() {
        match skipper.pick(position, &mut rng) {
            Some(response) => session
                .set_answer(id, response)
                .map_err(|err| format!("answer {id}: {err}"))?,
            None => skipped.push(id.clone()),
        }
    }
    let first_gap = skipped
        .first()
        .cloned()
        .ok_or("skipper policy left no gaps")?;
    match session.next_page() {
        Err(SessionError::PageIncomplete { first_unanswered }) if first_unanswered == first_gap => {
        }
        other => return Err(format!("skipped gap not flagged: {other:?}")),
    }
    if session.submit_visible() {
        return Err("submit affordance offered with gaps off the last page".to_string());
    }

    for (position, id) in skipped.iter().enumerate() {
        let response = filler
            .pick(position, &mut rng)
            .ok_or("filler policy refused to answer")?;
        session
            .set_answer(id, response)
            .map_err(|err| format!("answer {id}: {err}"))?;
    }
    session
        .next_page()
        .map_err(|err| format!("complete page refused: {err}"))?;

    // submit over a later gap: redirect plus exact count
    if session.page_count() >= 3 {
        let ids: Vec<String> = session.current_page().iter().map(|q| q.id.clone()).collect();
        for (position, id) in ids.iter().enumerate() {
            let response = filler
                .pick(position, &mut rng)
                .ok_or("filler policy refused to answer")?;
            session
                .set_answer(id, response)
                .map_err(|err| format!("answer {id}: {err}"))?;
        }
        let expected_remaining = session.total_questions() - session.answered_count();
        match session.submit() {
            Err(SessionError::IncompleteSubmission {
                remaining,
                redirected_to,
            }) => {
                if remaining != expected_remaining {
                    return Err(format!(
                        "global gate reported {remaining} remaining, expected {expected_remaining}"
                    ));
                }
                if session.page_index() != redirected_to {
                    return Err("global gate did not move the view to the gap".to_string());
                }
                if redirected_to != 2 {
                    return Err(format!(
                        "first gap should sit on page 2, redirect went to {redirected_to}"
                    ));
                }
            }
            other => return Err(format!("submit over later gap not blocked: {other:?}")),
        }
    }

    // fill the rest and finish
    let unanswered: Vec<String> = session
        .order()
        .iter()
        .filter(|q| !session.answers().is_answered(&q.id))
        .map(|q| q.id.clone())
        .collect();
    for (position, id) in unanswered.iter().enumerate() {
        let response = filler
            .pick(position, &mut rng)
            .ok_or("filler policy refused to answer")?;
        session
            .set_answer(id, response)
            .map_err(|err| format!("answer {id}: {err}"))?;
    }
    if !session.all_answered() || !session.submit_visible() {
        return Err("complete session not recognized as complete".to_string());
    }
    let scores = session
        .submit()
        .map_err(|err| format!("final submit: {err}"))?;
    if scores.len() != data.gifts.len() {
        return Err("final submit produced a truncated ranking".to_string());
    }
    Ok(())
}

/// The working order must be a permutation of the feed, its pages must
/// reconstruct it exactly, and a seed must reproduce it.
fn run_shuffle_integrity(data: &AssessmentData, seed: u64) -> Result<(), String> {
    let session = AssessmentSession::new(data.clone(), seed);

    let mut fed: Vec<&str> = data.questions.iter().map(|q| q.id.as_str()).collect();
    let mut ordered: Vec<&str> = session.order().iter().map(|q| q.id.as_str()).collect();
    fed.sort_unstable();
    ordered.sort_unstable();
    if fed != ordered {
        return Err("working order is not a permutation of the feed".to_string());
    }

    let pages = session.page_count();
    if pages != page_count(data.question_count()) {
        return Err(format!("page count {pages} disagrees with the paging rule"));
    }
    let mut reconstructed: Vec<&str> = Vec::with_capacity(session.order().len());
    for index in 0..pages {
        reconstructed.extend(
            page_slice(session.order(), index)
                .iter()
                .map(|q| q.id.as_str()),
        );
    }
    let original: Vec<&str> = session.order().iter().map(|q| q.id.as_str()).collect();
    if reconstructed != original {
        return Err("concatenated pages do not reconstruct the order".to_string());
    }
    if !page_slice(session.order(), pages).is_empty() {
        return Err("out-of-range page is not empty".to_string());
    }

    let twin = AssessmentSession::new(data.clone(), seed);
    if twin.order() != session.order() {
        return Err("same seed produced a different order".to_string());
    }
    Ok(())
}

/// Scoring twice over the same answers must agree, and ties must keep
/// the feed order of the gifts.
fn run_scoring_determinism(data: &AssessmentData, seed: u64) -> Result<(), String> {
    let mut session = AssessmentSession::new(data.clone(), seed);
    session.autofill();
    let answers = session.answers().clone();

    let first = score_gifts(&answers, &data.gifts);
    let second = score_gifts(&answers, &data.gifts);
    if first != second {
        return Err("scoring the same answers twice disagreed".to_string());
    }

    let feed_position: HashMap<&str, usize> = data
        .gifts
        .iter()
        .enumerate()
        .map(|(position, gift)| (gift.key.as_str(), position))
        .collect();
    let stable_descending = |scores: &[charis_engine::GiftScore]| -> Result<(), String> {
        for pair in scores.windows(2) {
            if pair[0].total < pair[1].total {
                return Err("ranking is not descending".to_string());
            }
            if pair[0].total == pair[1].total
                && feed_position[pair[0].key.as_str()] > feed_position[pair[1].key.as_str()]
            {
                return Err(format!(
                    "tie between '{}' and '{}' broke feed order",
                    pair[0].key, pair[1].key
                ));
            }
        }
        Ok(())
    };
    stable_descending(&first)?;

    // an all-ties table: same response everywhere
    let policy = RespondentPolicy::Fixed(Response::Sometimes);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut flat = AnswerStore::new();
    for (position, question) in data.questions.iter().enumerate() {
        if let Some(response) = policy.pick(position, &mut rng) {
            flat.set(&question.id, response);
        }
    }
    stable_descending(&score_gifts(&flat, &data.gifts))?;
    Ok(())
}

/// Restart must wipe the run, keep the loaded feeds, and hand the next
/// start a fresh empty session; the same seed must still replay.
fn run_restart_hygiene(data: &AssessmentData, seed: u64) -> Result<(), String> {
    let mut flow = loaded_flow(data);
    flow.start(seed).map_err(|err| format!("start: {err}"))?;
    let first_order: Vec<String> = flow
        .session()
        .ok_or("no session in progress")?
        .order()
        .iter()
        .map(|q| q.id.clone())
        .collect();
    flow.autofill().map_err(|err| format!("autofill: {err}"))?;
    flow.submit(timestamp())
        .map_err(|err| format!("submit: {err}"))?;

    flow.restart().map_err(|err| format!("restart: {err}"))?;
    if flow.session().is_some() || flow.report().is_some() {
        return Err("restart left run state behind".to_string());
    }
    if !flow.data_ready() {
        return Err("restart dropped the loaded feeds".to_string());
    }

    flow.start(seed.wrapping_add(1))
        .map_err(|err| format!("second start: {err}"))?;
    let session = flow.session().ok_or("no session after second start")?;
    if !session.answers().is_empty() {
        return Err("answers leaked across restart".to_string());
    }
    if session.page_index() != 0 {
        return Err("page index not reset by restart".to_string());
    }
    if session.total_questions() != data.question_count() {
        return Err("second session lost questions".to_string());
    }

    let mut replay = loaded_flow(data);
    replay
        .start(seed)
        .map_err(|err| format!("replay start: {err}"))?;
    let replay_order: Vec<String> = replay
        .session()
        .ok_or("no replay session")?
        .order()
        .iter()
        .map(|q| q.id.clone())
        .collect();
    if replay_order != first_order {
        return Err("seed no longer reproduces the original order".to_string());
    }
    Ok(())
}
