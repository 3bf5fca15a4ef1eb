/// Result of processing one input line.
#[derive(Debug)]
pub struct LineOutcome {
    /// 1-based line number in the input file
    pub index: usize,
    pub address: String,
    pub error_message: Option<String>,
}

impl LineOutcome {
    pub fn success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// Per-line outcomes of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<LineOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
