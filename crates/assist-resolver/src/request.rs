//! Caret position and token text handed over by the editor integration.
use assist_error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One completion request against a program tree.
///
/// `completion_offset` is the caret. `completion_end` is the end of the token
/// being typed, which may lie after the caret when completing in the middle of
/// a word. `supporting_node_end` is set only when the token follows a dot; it is
/// the end of the expression before that dot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub completion_offset: usize,
    pub completion_end: usize,
    #[serde(default)]
    pub supporting_node_end: Option<usize>,
    #[serde(default)]
    pub completion_expression: String,
    #[serde(default)]
    pub full_completion_expression: String,
}

impl CompletionRequest {
    /// A request with the caret at `offset` and nothing typed yet.
    pub fn at(offset: usize) -> Self {
        Self {
            completion_offset: offset,
            completion_end: offset,
            ..Default::default()
        }
    }

    pub fn with_end(mut self, end: usize) -> Self {
        self.completion_end = end;
        self
    }

    pub fn with_supporting_end(mut self, end: usize) -> Self {
        self.supporting_node_end = Some(end);
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.completion_expression = expression.into();
        self
    }

    pub fn with_full_expression(mut self, expression: impl Into<String>) -> Self {
        self.full_completion_expression = expression.into();
        self
    }

    /// Supporting end as a plain offset, `0` when there is no leading dot.
    pub(crate) fn supporting_end(&self) -> usize {
        self.supporting_node_end.unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.completion_end < self.completion_offset {
            return Err(Error::invalid_offset("token ends before the caret")
                .with_operation("request::validate")
                .with_context("offset", self.completion_offset.to_string())
                .with_context("end", self.completion_end.to_string()));
        }
        if let Some(supporting) = self.supporting_node_end {
            if supporting > self.completion_offset {
                return Err(Error::invalid_offset("supporting expression ends after the caret")
                    .with_operation("request::validate")
                    .with_context("offset", self.completion_offset.to_string())
                    .with_context("supporting", supporting.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_error::ErrorKind;

    #[test]
    fn builder_fills_every_field() {
        let request = CompletionRequest::at(8)
            .with_end(10)
            .with_supporting_end(3)
            .with_expression("ba")
            .with_full_expression("foo.ba");

        assert_eq!(request.completion_offset, 8);
        assert_eq!(request.completion_end, 10);
        assert_eq!(request.supporting_node_end, Some(3));
        assert_eq!(request.supporting_end(), 3);
        assert_eq!(request.completion_expression, "ba");
        assert_eq!(request.full_completion_expression, "foo.ba");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn token_end_before_caret_is_rejected() {
        let err = CompletionRequest::at(8).with_end(4).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOffset);
        assert_eq!(err.context_value("end"), Some("4"));
    }

    #[test]
    fn supporting_end_after_caret_is_rejected() {
        let err = CompletionRequest::at(2)
            .with_supporting_end(5)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOffset);
        assert_eq!(err.operation(), "request::validate");
    }

    #[test]
    fn request_decodes_with_defaults() {
        let request: CompletionRequest =
            serde_json::from_str(r#"{"completion_offset": 4, "completion_end": 4}"#).unwrap();
        assert_eq!(request, CompletionRequest::at(4));
    }
}
