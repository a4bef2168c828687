//! Completion context resolution over a program tree.
//!
//! ```ignore
//! let request = CompletionRequest::at(12);
//! if let Some(context) = assist_resolver::resolve(&tree, &request) {
//!     println!("{}", context.summary());
//! }
//! ```
pub mod config;
pub mod context;
pub mod finder;
pub mod location;
pub mod request;

use assist_core::ProgramTree;
use assist_error::{Error, ErrorKind, Result};
use rayon::prelude::*;

pub use config::AssistConfig;
pub use context::{
    ContentAssistContext, ContextSummary, MemberAccess, MethodInfo, ScopeInference, VariableScope,
};
pub use finder::{CompletionNodeFinder, Resolution};
pub use location::LocationKind;
pub use request::CompletionRequest;

/// Classify the caret of `request`, or `None` when nothing can be completed there.
///
/// The tree is only read; any number of resolutions may share it.
#[tracing::instrument(skip_all, fields(offset = request.completion_offset))]
pub fn resolve<'t>(
    tree: &'t ProgramTree,
    request: &CompletionRequest,
) -> Option<ContentAssistContext<'t>> {
    CompletionNodeFinder::new(tree, request).find()
}

#[derive(Debug, Default, Clone)]
pub struct ResolveOption {
    pub sequential: bool,
    /// Dedicated worker count; the global rayon pool when unset.
    pub threads: Option<usize>,
}

impl ResolveOption {
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

impl From<&AssistConfig> for ResolveOption {
    fn from(config: &AssistConfig) -> Self {
        ResolveOption::default().with_threads(config.resolve_threads)
    }
}

/// Resolve every request against the same tree in parallel. Results keep the
/// order of `requests`.
pub fn resolve_batch<'t>(
    tree: &'t ProgramTree,
    requests: &[CompletionRequest],
) -> Vec<Option<ContentAssistContext<'t>>> {
    requests.par_iter().map(|request| resolve(tree, request)).collect()
}

/// [`resolve_batch`] with explicit control over parallelism.
pub fn resolve_batch_with<'t>(
    tree: &'t ProgramTree,
    requests: &[CompletionRequest],
    option: &ResolveOption,
) -> Result<Vec<Option<ContentAssistContext<'t>>>> {
    if option.sequential {
        return Ok(requests.iter().map(|request| resolve(tree, request)).collect());
    }
    let Some(threads) = option.threads else {
        return Ok(resolve_batch(tree, requests));
    };
    if threads == 0 {
        return Err(Error::invalid_argument("resolver needs at least one worker")
            .with_operation("resolver::resolve_batch_with"));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| {
            Error::new(ErrorKind::ResourceExhausted, "cannot start resolver workers")
                .with_operation("resolver::resolve_batch_with")
                .with_context("threads", threads.to_string())
                .set_source(err)
        })?;
    tracing::debug!("resolving {} requests on {} threads", requests.len(), threads);
    Ok(pool.install(|| resolve_batch(tree, requests)))
}
