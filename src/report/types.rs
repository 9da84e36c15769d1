use serde::{Deserialize, Serialize};

/// Recorded outcome of a single end-to-end test, one JSON file per test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestRecord {
    pub name: String,
    pub steps: Vec<String>,
    /// Sauce Labs job ids of the device sessions the test used
    pub jobs: Vec<String>,
    pub error: Option<String>,
}

impl TestRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
            jobs: Vec::new(),
            error: None,
        }
    }

    pub fn step(&mut self, step: &str) {
        self.steps.push(step.to_string());
    }

    pub fn job(&mut self, job_id: &str) {
        self.jobs.push(job_id.to_string());
    }

    pub fn fail(&mut self, error: String) {
        self.error = Some(error);
    }

    /// A test passed when no error was recorded; an empty message counts as none.
    pub fn is_passed(&self) -> bool {
        self.error.as_deref().map_or(true, str::is_empty)
    }

    pub fn is_failed(&self) -> bool {
        !self.is_passed()
    }
}
