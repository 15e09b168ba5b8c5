use tracing::{error, info};

use crate::anilist::MediaItem;
use crate::error::Error;
use crate::recommend::{self, IndexSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    NoResults,
    RequestFailed,
}

impl UserError {
    pub fn message(&self) -> &'static str {
        match self {
            UserError::NoResults => "No anime found with the specified genres.",
            UserError::RequestFailed => "An error occurred while fetching the recommendation.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(MediaItem),
    Failure(UserError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Move to `Loading`, dropping any previous result or error.
    ///
    /// Returns false (and changes nothing) if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = RequestState::Loading;
        true
    }

    /// Apply the outcome of the in-flight fetch
    pub fn resolve(
        &mut self,
        outcome: Result<Vec<MediaItem>, Error>,
        source: &mut dyn IndexSource,
    ) {
        *self = match outcome {
            Ok(items) => match recommend::select(&items, source) {
                Some(item) => {
                    info!(id = item.id, candidates = items.len(), "Picked recommendation");
                    RequestState::Success(item.clone())
                }
                None => {
                    info!("No anime matched the requested genres");
                    RequestState::Failure(UserError::NoResults)
                }
            },
            Err(e) => {
                error!(error = %e, "Failed to fetch recommendation");
                RequestState::Failure(UserError::RequestFailed)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anilist::MediaTitle;
    use crate::recommend::SequenceIndex;

    fn items(n: i64) -> Vec<MediaItem> {
        (0..n)
            .map(|id| MediaItem {
                id,
                title: MediaTitle {
                    romaji: Some(format!("Show {}", id)),
                    english: None,
                },
                genres: vec!["Horror".to_string()],
                description: None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
    }

    #[test]
    fn test_success_picks_item() {
        let mut state = RequestState::default();
        let mut source = SequenceIndex::new(vec![1]);

        assert!(state.begin());
        state.resolve(Ok(items(3)), &mut source);

        match state {
            RequestState::Success(item) => assert_eq!(item.id, 1),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_is_no_results() {
        let mut state = RequestState::default();
        state.begin();
        state.resolve(Ok(Vec::new()), &mut SequenceIndex::new(vec![0]));

        assert_eq!(state, RequestState::Failure(UserError::NoResults));
        assert_eq!(
            UserError::NoResults.message(),
            "No anime found with the specified genres."
        );
    }

    #[test]
    fn test_error_is_request_failed() {
        let mut state = RequestState::default();
        state.begin();
        state.resolve(
            Err(Error::Api("boom".to_string())),
            &mut SequenceIndex::new(vec![0]),
        );

        assert_eq!(state, RequestState::Failure(UserError::RequestFailed));
        assert_eq!(
            UserError::RequestFailed.message(),
            "An error occurred while fetching the recommendation."
        );
    }

    #[test]
    fn test_begin_blocked_while_loading() {
        let mut state = RequestState::default();
        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.is_loading());
    }

    #[test]
    fn test_resubmit_clears_previous_outcome() {
        let mut state = RequestState::Failure(UserError::NoResults);
        assert!(state.begin());
        assert_eq!(state, RequestState::Loading);

        state.resolve(Ok(items(1)), &mut SequenceIndex::new(vec![0]));
        assert!(matches!(state, RequestState::Success(_)));

        assert!(state.begin());
        assert_eq!(state, RequestState::Loading);
    }
}
