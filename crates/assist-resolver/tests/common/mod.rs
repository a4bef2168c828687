#![allow(dead_code)]

use std::sync::Once;

use assist_core::ProgramTree;
use assist_resolver::{CompletionRequest, ContentAssistContext, ContextSummary, LocationKind};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route resolver logs through the test harness; `RUST_LOG=assist_resolver=trace`
/// shows every rule that fires.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn resolve<'t>(tree: &'t ProgramTree, request: &CompletionRequest) -> Option<ContentAssistContext<'t>> {
    init_tracing();
    assist_resolver::resolve(tree, request)
}

/// Resolve and insist that some context comes back.
pub fn context<'t>(tree: &'t ProgramTree, request: &CompletionRequest) -> ContentAssistContext<'t> {
    resolve(tree, request).unwrap_or_else(|| {
        panic!(
            "no context at {}\n{}",
            request.completion_offset,
            assist_core::render_tree(tree)
        )
    })
}

pub fn location_at(tree: &ProgramTree, offset: usize) -> Option<LocationKind> {
    resolve(tree, &CompletionRequest::at(offset)).map(|context| context.location())
}

pub fn summary_at(tree: &ProgramTree, request: &CompletionRequest) -> Option<ContextSummary> {
    resolve(tree, request).map(|context| context.summary())
}
