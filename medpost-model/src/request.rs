use crate::category::Category;

/// One category search, exactly as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    pub category: Category,
    pub text: String,
    pub endorsed_only: bool,
}

impl SearchRequest {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            endorsed_only: false,
        }
    }

    /// All endorsed workers, regardless of text.
    pub fn endorsed_workers() -> Self {
        Self {
            category: Category::Workers,
            text: String::new(),
            endorsed_only: true,
        }
    }

    /// Path of the category's search endpoint, relative to the versioned API
    /// root.
    pub fn path(&self) -> String {
        format!("{}/search", self.category.resource())
    }

    /// Query string pairs. `endorsed_only` is only sent to worker search.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if self.category.supports_endorsed_filter() {
            params.push(("endorsed_only", self.endorsed_only.to_string()));
        }
        params.push(("q", self.text.clone()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_search_sends_endorsed_flag_first() {
        let request = SearchRequest::endorsed_workers();
        assert_eq!(request.path(), "workers/search");
        assert_eq!(
            request.query_params(),
            vec![("endorsed_only", "true".to_string()), ("q", String::new())]
        );
    }

    #[test]
    fn job_search_only_sends_text() {
        let request = SearchRequest::new(Category::Jobs, "nurse");
        assert_eq!(request.path(), "jobs/search");
        assert_eq!(request.query_params(), vec![("q", "nurse".to_string())]);
    }
}
