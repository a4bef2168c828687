//! Rendering of resolution results.

use std::fmt::Write;

use serde::Serialize;

use assist_error::{Error, Result};
use assist_resolver::{AssistConfig, CompletionRequest, ContentAssistContext, ContextSummary};

/// One line of `--json` output.
#[derive(Debug, Serialize)]
pub struct ResolvedRequest<'a> {
    pub request: &'a CompletionRequest,
    pub context: Option<ContextSummary>,
    /// Present only when a context was found.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub favorite_static_members: Vec<String>,
}

fn resolved<'a>(
    request: &'a CompletionRequest,
    context: Option<&ContentAssistContext<'_>>,
    config: &AssistConfig,
) -> ResolvedRequest<'a> {
    ResolvedRequest {
        request,
        context: context.map(|context| context.summary()),
        favorite_static_members: context
            .map(|context| context.favorite_static_members(config).iter().cloned().collect())
            .unwrap_or_default(),
    }
}

/// Pretty JSON array, one entry per request in request order.
pub fn render_json(
    requests: &[CompletionRequest],
    contexts: &[Option<ContentAssistContext<'_>>],
    config: &AssistConfig,
) -> Result<String> {
    let entries: Vec<ResolvedRequest<'_>> = requests
        .iter()
        .zip(contexts)
        .map(|(request, context)| resolved(request, context.as_ref(), config))
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|err| {
        Error::serialization_failed("cannot encode resolution results")
            .with_operation("output::render_json")
            .set_source(err)
    })
}

/// `offset: summary` per request.
pub fn render_text(requests: &[CompletionRequest], contexts: &[Option<ContentAssistContext<'_>>]) -> String {
    let mut out = String::new();
    for (request, context) in requests.iter().zip(contexts) {
        match context {
            Some(context) => {
                let _ = writeln!(out, "{}: {}", request.completion_offset, context.summary());
            }
            None => {
                let _ = writeln!(out, "{}: no completion", request.completion_offset);
            }
        }
    }
    out
}
