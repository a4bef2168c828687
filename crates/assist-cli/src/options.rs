//! Command-line options shared by the `assist` binary and its library entry.

use clap::Args;

use assist_error::Result;
use assist_resolver::CompletionRequest;

/// Caret positions and the token typed at them.
///
/// Every `--offset` becomes one request; the remaining values apply to all of them.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caret offset into the source (repeatable)
    #[arg(
        long = "offset",
        value_name = "N",
        num_args = 1..,
        action = clap::ArgAction::Append,
        required = true
    )]
    pub offsets: Vec<usize>,

    /// End of the token being typed, for every offset; defaults to the caret
    #[arg(long, value_name = "N")]
    pub end: Option<usize>,

    /// End of the expression before a `.`, when completing after one
    #[arg(long = "supporting-end", value_name = "N")]
    pub supporting_end: Option<usize>,

    /// Token text being completed
    #[arg(long = "expr", value_name = "TEXT", default_value = "")]
    pub expression: String,

    /// Whole expression text up to the caret, including receivers
    #[arg(long = "full-expr", value_name = "TEXT", default_value = "")]
    pub full_expression: String,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offsets(mut self, offsets: Vec<usize>) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn with_supporting_end(mut self, end: Option<usize>) -> Self {
        self.supporting_end = end;
        self
    }

    /// One validated request per offset.
    pub fn to_requests(&self) -> Result<Vec<CompletionRequest>> {
        self.offsets
            .iter()
            .map(|&offset| {
                let mut request = CompletionRequest::at(offset)
                    .with_end(self.end.unwrap_or(offset))
                    .with_expression(self.expression.clone())
                    .with_full_expression(self.full_expression.clone());
                if let Some(end) = self.supporting_end {
                    request = request.with_supporting_end(end);
                }
                request
                    .validate()
                    .map_err(|err| err.with_operation("cli::to_requests"))?;
                Ok(request)
            })
            .collect()
    }
}
