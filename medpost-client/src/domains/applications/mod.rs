//! Applied-jobs domain - which job posts the signed-in worker already applied to

use std::sync::Arc;

use medpost_model::{AppliedJobSet, ApplyButton, JobResult};
use parking_lot::RwLock;

use crate::infra::services::api::ApiService;
use crate::infra::session::SessionContext;

/// Refreshes the applied-job set on every screen focus.
///
/// Search results are never touched; renderers combine a [`JobResult`] with
/// [`apply_button`](Self::apply_button) at display time.
#[derive(Debug)]
pub struct AppliedJobsTracker {
    api: Arc<dyn ApiService>,
    session: SessionContext,
    applied: RwLock<AppliedJobSet>,
}

impl AppliedJobsTracker {
    pub fn new(api: Arc<dyn ApiService>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            applied: RwLock::new(AppliedJobSet::empty()),
        }
    }

    /// Replace the set with a fresh fetch. Only a worker with a token is
    /// looked up; anyone else, and any failure, ends with an empty set.
    pub async fn on_focus(&self) -> AppliedJobSet {
        let applied = match self.session.token() {
            Some(token) if self.session.is_worker() => {
                match self.api.fetch_worker_applications(Some(token)).await {
                    Ok(applications) => {
                        let set = AppliedJobSet::from_applications(&applications);
                        log::debug!(
                            "[AppliedJobs] {} applications, {} distinct job posts",
                            applications.len(),
                            set.len()
                        );
                        set
                    }
                    Err(e) => {
                        log::warn!("[AppliedJobs] Failed to load applications: {}", e);
                        AppliedJobSet::empty()
                    }
                }
            }
            _ => AppliedJobSet::empty(),
        };

        *self.applied.write() = applied.clone();
        applied
    }

    pub fn applied(&self) -> AppliedJobSet {
        self.applied.read().clone()
    }

    pub fn apply_button(&self, job: &JobResult) -> ApplyButton {
        self.applied.read().apply_button(&job.id)
    }
}
