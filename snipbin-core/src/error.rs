use std::fmt;

/// Per-field validation failures for a snippet payload.
///
/// Collects every failing field before surfacing, so a response can report
/// all problems at once rather than the first one encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<(String, String)>,
}

impl ValidationError {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure message against a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_owned(), message.into()));
    }

    /// Returns `true` if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the collector: `Ok(value)` if empty, `Err(self)` otherwise.
    ///
    /// # Errors
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Iterates over `(field, message)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (field, message) in &self.errors {
            write!(f, "; {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_passes_value_through() {
        let errors = ValidationError::new();
        assert!(errors.is_empty());
        assert_eq!(errors.into_result(42), Ok(42));
    }

    #[test]
    fn recorded_failures_surface_in_order() {
        let mut errors = ValidationError::new();
        errors.push("code", "this field may not be blank");
        errors.push("style", "\"plasma\" is not a valid choice");
        let err = match errors.into_result(()) {
            Ok(()) => panic!("expected Err from non-empty collector"),
            Err(e) => e,
        };
        let fields: Vec<&str> = err.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["code", "style"]);
    }

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationError::new();
        errors.push("code", "this field is required");
        let msg = errors.to_string();
        assert!(msg.contains("code"), "Display must name the field: {msg}");
        assert!(msg.contains("required"), "Display must carry the message: {msg}");
    }
}
