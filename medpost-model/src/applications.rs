use std::collections::HashSet;

use crate::ids::RecordId;

/// A worker's application to a job post, as listed by the applications API.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobApplication {
    pub id: RecordId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub job_post_id: Option<RecordId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
}

/// Job posts the current worker has already applied to.
///
/// Built in one piece from an applications listing and replaced wholesale on
/// the next refresh; there are no incremental mutators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedJobSet {
    job_ids: HashSet<RecordId>,
}

impl AppliedJobSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_applications<'a, I>(applications: I) -> Self
    where
        I: IntoIterator<Item = &'a JobApplication>,
    {
        Self {
            job_ids: applications
                .into_iter()
                .filter_map(|application| application.job_post_id.clone())
                .collect(),
        }
    }

    pub fn contains(&self, job_id: &RecordId) -> bool {
        self.job_ids.contains(job_id)
    }

    pub fn len(&self) -> usize {
        self.job_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }

    pub fn apply_button(&self, job_id: &RecordId) -> ApplyButton {
        if self.contains(job_id) {
            ApplyButton::Applied
        } else {
            ApplyButton::ApplyNow
        }
    }
}

impl FromIterator<RecordId> for AppliedJobSet {
    fn from_iter<T: IntoIterator<Item = RecordId>>(iter: T) -> Self {
        Self {
            job_ids: iter.into_iter().collect(),
        }
    }
}

/// State of the apply action on a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyButton {
    ApplyNow,
    Applied,
}

impl ApplyButton {
    pub fn label(self) -> &'static str {
        match self {
            ApplyButton::ApplyNow => "Apply Now",
            ApplyButton::Applied => "Applied",
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, ApplyButton::ApplyNow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(id: &str, job: Option<&str>) -> JobApplication {
        JobApplication {
            id: RecordId::new(id),
            job_post_id: job.map(RecordId::new),
            status: Some("pending".to_string()),
        }
    }

    #[test]
    fn applications_without_job_are_skipped() {
        let applications = [application("a", Some("1")), application("b", None)];
        let set = AppliedJobSet::from_applications(&applications);

        assert_eq!(set.len(), 1);
        assert!(set.contains(&RecordId::new("1")));
    }

    #[test]
    fn button_reflects_membership() {
        let set: AppliedJobSet = [RecordId::new("1")].into_iter().collect();

        let applied = set.apply_button(&RecordId::new("1"));
        assert_eq!(applied.label(), "Applied");
        assert!(!applied.is_enabled());

        let open = set.apply_button(&RecordId::new("2"));
        assert_eq!(open.label(), "Apply Now");
        assert!(open.is_enabled());
    }
}
