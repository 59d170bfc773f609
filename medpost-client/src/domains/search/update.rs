//! Search domain update logic
//!
//! `update` is pure: it mutates [`SearchState`] and returns the effect the
//! runtime has to perform. Timers and HTTP live in the orchestrator.

use std::time::Duration;

use medpost_model::SearchRequest;

use super::messages::Message;
use super::types::{SearchPhase, SearchState};

/// Effect requested by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTask {
    None,
    /// Drop any pending timer; nothing new is scheduled.
    CancelPending,
    /// Replace any pending timer with one for `generation`.
    Debounce { generation: u64, delay: Duration },
    /// Drop any pending timer and send `request` now.
    Dispatch {
        generation: u64,
        request: SearchRequest,
    },
}

pub fn update(state: &mut SearchState, message: Message) -> SearchTask {
    match message {
        Message::UpdateQuery(text) => {
            if state.query.text == text {
                return SearchTask::None;
            }
            state.query.text = text;
            reschedule(state)
        }

        Message::SetCategory(category) => {
            if !state.allows(category) {
                log::warn!(
                    "[Search] Ignoring switch to {}; allowed: {:?}",
                    category,
                    state.allowed_categories
                );
                return SearchTask::None;
            }

            state.query.category = category;
            state.query.text = state.location_city.clone().unwrap_or_default();
            state.results.clear();
            reschedule(state)
        }

        Message::SetEndorsedOnly(endorsed_only) => {
            if state.query.endorsed_only == endorsed_only {
                return SearchTask::None;
            }
            state.query.endorsed_only = endorsed_only;
            reschedule(state)
        }

        Message::UseLocation(city) => {
            let city = city.trim().to_string();
            if city.is_empty() {
                log::warn!("[Search] Location resolved to an empty city; ignoring");
                return SearchTask::None;
            }

            state.location_city = Some(city.clone());
            state.query.text = city;
            state.generation += 1;

            match state.current_request() {
                Some(request) => dispatch(state, request),
                None => go_idle(state),
            }
        }

        Message::ClearSearch => {
            state.query.text.clear();
            state.query.endorsed_only = false;
            state.location_city = None;
            state.generation += 1;
            go_idle(state)
        }

        Message::SearchDebounced { generation } => {
            if generation != state.generation || state.phase != SearchPhase::Debouncing {
                log::debug!(
                    "[Search] Timer for generation {} fired after reschedule (current {})",
                    generation,
                    state.generation
                );
                return SearchTask::None;
            }

            match state.current_request() {
                Some(request) => dispatch(state, request),
                None => go_idle(state),
            }
        }

        Message::ResultsReceived {
            generation,
            results,
        } => {
            if generation != state.generation {
                log::debug!(
                    "[Search] Discarding {} results from superseded generation {} (current {})",
                    results.len(),
                    generation,
                    state.generation
                );
                return SearchTask::None;
            }

            state.results = results;
            state.error = None;
            state.phase = SearchPhase::Settled;
            SearchTask::None
        }

        Message::SearchFailed { generation, error } => {
            if generation != state.generation {
                log::debug!(
                    "[Search] Discarding error from superseded generation {}: {}",
                    generation,
                    error
                );
                return SearchTask::None;
            }

            state.results.clear();
            state.error = Some(error);
            state.phase = SearchPhase::Settled;
            SearchTask::None
        }
    }
}

/// Start a new generation for the current input. Results on screen stay
/// until the new generation commits.
fn reschedule(state: &mut SearchState) -> SearchTask {
    state.generation += 1;

    if state.current_request().is_none() {
        return go_idle(state);
    }

    let delay = if state.query.is_endorsed_listing() {
        state.endorsed_debounce
    } else {
        state.text_debounce
    };
    state.phase = SearchPhase::Debouncing;

    SearchTask::Debounce {
        generation: state.generation,
        delay,
    }
}

fn dispatch(state: &mut SearchState, request: SearchRequest) -> SearchTask {
    state.error = None;
    state.phase = SearchPhase::InFlight;
    SearchTask::Dispatch {
        generation: state.generation,
        request,
    }
}

fn go_idle(state: &mut SearchState) -> SearchTask {
    state.results.clear();
    state.error = None;
    state.phase = SearchPhase::Idle;
    SearchTask::CancelPending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::runtime_config::RuntimeConfig;
    use medpost_model::{Category, FacilityResult, RecordId, SearchResult, UserRole};

    fn facility_state() -> SearchState {
        SearchState::new(Some(UserRole::Facility), &RuntimeConfig::default())
    }

    fn worker_state() -> SearchState {
        SearchState::new(Some(UserRole::Worker), &RuntimeConfig::default())
    }

    fn facility(id: &str) -> SearchResult {
        SearchResult::Facility(FacilityResult {
            id: RecordId::new(id),
            legal_name: Some("Mercy General".to_string()),
            industry: None,
            bio: None,
            profile_image_url: None,
            city: None,
            state_province: None,
            phone_e164: None,
        })
    }

    #[test]
    fn typing_schedules_text_debounce() {
        let mut state = worker_state();
        let task = update(&mut state, Message::UpdateQuery("nurse".to_string()));

        assert_eq!(
            task,
            SearchTask::Debounce {
                generation: 1,
                delay: Duration::from_millis(600)
            }
        );
        assert_eq!(state.phase, SearchPhase::Debouncing);
        assert!(state.is_loading());
    }

    #[test]
    fn whitespace_query_goes_idle_and_clears() {
        let mut state = worker_state();
        state.results.push(facility("9"));
        state.error = Some("old".to_string());

        let task = update(&mut state, Message::UpdateQuery("   ".to_string()));

        assert_eq!(task, SearchTask::CancelPending);
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn endorsed_workers_use_short_debounce_with_empty_query() {
        let mut state = facility_state();
        update(&mut state, Message::SetCategory(Category::Workers));
        let task = update(&mut state, Message::SetEndorsedOnly(true));

        assert_eq!(
            task,
            SearchTask::Debounce {
                generation: 2,
                delay: Duration::from_millis(300)
            }
        );

        let task = update(&mut state, Message::SearchDebounced { generation: 2 });
        assert_eq!(
            task,
            SearchTask::Dispatch {
                generation: 2,
                request: SearchRequest::endorsed_workers()
            }
        );
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut state = worker_state();
        update(&mut state, Message::UpdateQuery("nu".to_string()));
        update(&mut state, Message::UpdateQuery("nurse".to_string()));

        let task = update(&mut state, Message::SearchDebounced { generation: 1 });
        assert_eq!(task, SearchTask::None);
        assert_eq!(state.phase, SearchPhase::Debouncing);
    }

    #[test]
    fn stale_results_do_not_commit() {
        let mut state = facility_state();
        update(&mut state, Message::UpdateQuery("mercy".to_string()));
        update(&mut state, Message::SearchDebounced { generation: 1 });
        update(&mut state, Message::UpdateQuery("mercy general".to_string()));

        update(
            &mut state,
            Message::ResultsReceived {
                generation: 1,
                results: vec![facility("1")],
            },
        );
        assert!(state.results.is_empty());
        assert_eq!(state.phase, SearchPhase::Debouncing);

        update(&mut state, Message::SearchDebounced { generation: 2 });
        update(
            &mut state,
            Message::ResultsReceived {
                generation: 2,
                results: vec![facility("2")],
            },
        );
        assert_eq!(state.results, vec![facility("2")]);
        assert_eq!(state.phase, SearchPhase::Settled);
    }

    #[test]
    fn failure_clears_results_and_sets_error() {
        let mut state = facility_state();
        state.results.push(facility("1"));
        update(&mut state, Message::UpdateQuery("x".to_string()));
        update(&mut state, Message::SearchDebounced { generation: 1 });
        assert_eq!(state.results.len(), 1);

        update(
            &mut state,
            Message::SearchFailed {
                generation: 1,
                error: "X".to_string(),
            },
        );
        assert!(state.results.is_empty());
        assert_eq!(state.error.as_deref(), Some("X"));
        assert!(!state.is_loading());
    }

    #[test]
    fn category_switch_restores_location_query() {
        let mut state = worker_state();
        let task = update(&mut state, Message::UseLocation("Austin".to_string()));
        assert!(matches!(task, SearchTask::Dispatch { generation: 1, .. }));
        update(
            &mut state,
            Message::ResultsReceived {
                generation: 1,
                results: vec![facility("1")],
            },
        );

        update(&mut state, Message::SetCategory(Category::Facilities));
        assert_eq!(state.query.category, Category::Facilities);
        assert_eq!(state.query.text, "Austin");
        assert!(state.results.is_empty());
        assert_eq!(state.phase, SearchPhase::Debouncing);
    }

    #[test]
    fn category_switch_without_location_goes_idle() {
        let mut state = worker_state();
        update(&mut state, Message::UpdateQuery("nurse".to_string()));

        let task = update(&mut state, Message::SetCategory(Category::Facilities));
        assert_eq!(task, SearchTask::CancelPending);
        assert_eq!(state.query.text, "");
        assert_eq!(state.phase, SearchPhase::Idle);
    }

    #[test]
    fn disallowed_category_is_ignored() {
        let mut state = worker_state();
        let task = update(&mut state, Message::SetCategory(Category::Workers));
        assert_eq!(task, SearchTask::None);
        assert_eq!(state.query.category, Category::Jobs);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = worker_state();
        update(&mut state, Message::UseLocation("Austin".to_string()));

        let task = update(&mut state, Message::ClearSearch);
        assert_eq!(task, SearchTask::CancelPending);
        assert_eq!(state.query.text, "");
        assert!(state.location_city.is_none());

        // The in-flight location search can no longer commit
        update(
            &mut state,
            Message::ResultsReceived {
                generation: 1,
                results: vec![facility("1")],
            },
        );
        assert!(state.results.is_empty());
        assert_eq!(state.phase, SearchPhase::Idle);
    }
}
