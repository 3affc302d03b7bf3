use std::fmt::Display;

/// Entity invariant violation, displayed as the bare rule message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Display) -> Self {
        ValidationError(message.to_string())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<garde::Report> for ValidationError {
    /// Keeps only the first violation, fields are checked in declaration order
    fn from(report: garde::Report) -> Self {
        let message = report
            .iter()
            .next()
            .map(|(_, error)| error.message().to_string())
            .unwrap_or_else(|| "Entity is invalid".to_string());
        ValidationError(message)
    }
}
