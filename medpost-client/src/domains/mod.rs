//! Domain modules: search orchestration and applied-job tracking

pub mod applications;
pub mod search;
