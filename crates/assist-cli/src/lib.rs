//! assist command-line interface.
//!
pub mod options;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use assist_core::{ProgramTree, render_tree};
use assist_error::{Error, Result};
use assist_resolver::{AssistConfig, ResolveOption, resolve_batch_with};

pub use options::RequestOptions;

/// Options for one `assist` run.
#[derive(Debug, Clone, Default)]
pub struct AssistOptions {
    pub tree: PathBuf,
    pub config: Option<PathBuf>,
    pub request: RequestOptions,
    pub print_tree: bool,
    pub json: bool,
    pub sequential: bool,
}

/// Load a JSON tree from disk and validate it.
pub fn load_tree(path: &Path) -> Result<ProgramTree> {
    if !path.exists() {
        return Err(
            Error::file_not_found(path.display().to_string()).with_operation("cli::load_tree"),
        );
    }
    let json = fs::read_to_string(path).map_err(|err| {
        Error::from(err)
            .with_operation("cli::load_tree")
            .with_context("path", path.display().to_string())
    })?;
    ProgramTree::from_json(&json).map_err(|err| {
        err.with_operation("cli::load_tree")
            .with_context("path", path.display().to_string())
    })
}

/// Main entry point
pub fn run_main(opts: &AssistOptions) -> Result<String> {
    let requests = opts.request.to_requests()?;
    let config = match &opts.config {
        Some(path) => AssistConfig::from_path(path)?,
        None => AssistConfig::default(),
    };

    let load_start = Instant::now();
    let tree = load_tree(&opts.tree)?;
    tracing::info!(
        nodes = tree.len(),
        "tree loaded in {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    let mut out = String::new();
    if opts.print_tree {
        out.push_str(&render_tree(&tree));
    }

    let option = ResolveOption::from(&config).with_sequential(opts.sequential);
    let resolve_start = Instant::now();
    let contexts = resolve_batch_with(&tree, &requests, &option)?;
    tracing::info!(
        requests = requests.len(),
        resolved = contexts.iter().filter(|context| context.is_some()).count(),
        "resolution: {:.2}s",
        resolve_start.elapsed().as_secs_f64()
    );

    if opts.json {
        out.push_str(&output::render_json(&requests, &contexts, &config)?);
        out.push('\n');
    } else {
        out.push_str(&output::render_text(&requests, &contexts));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_simple::SnippetTree;
    use pretty_assertions::assert_eq;

    fn write_call_tree(dir: &Path) -> PathBuf {
        let mut t = SnippetTree::new("foo.bar(1,2)");
        let foo = t.variable(t.span("foo"));
        let bar = t.name(t.span("bar"));
        let one = t.number(t.span("1"));
        let two = t.number(t.span("2"));
        let args = t.arguments(t.span("(1,2)"), vec![one, two]);
        let call = t.call(Some(foo), bar, args);
        let stmt = t.stmt(call);
        let tree = t.script(vec![stmt]).unwrap();

        let path = dir.join("tree.json");
        fs::write(&path, tree.to_json().unwrap()).unwrap();
        path
    }

    fn options(tree: PathBuf, offsets: Vec<usize>) -> AssistOptions {
        AssistOptions {
            tree,
            request: RequestOptions::new().with_offsets(offsets),
            ..Default::default()
        }
    }

    #[test]
    fn text_output_in_request_order() {
        let dir = tempfile::tempdir().unwrap();
        let tree = write_call_tree(dir.path());
        let out = run_main(&options(tree, vec![12, 5])).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("12: method_context"), "{out}");
        assert!(lines[0].ends_with("call=bar@7"), "{out}");
        assert!(lines[1].starts_with("5: "), "{out}");
    }

    #[test]
    fn json_output_carries_summary() {
        let dir = tempfile::tempdir().unwrap();
        let tree = write_call_tree(dir.path());
        let mut opts = options(tree, vec![12]);
        opts.json = true;
        opts.sequential = true;
        let out = run_main(&opts).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let context = &value[0]["context"];
        assert_eq!(context["location"], "method_context");
        assert_eq!(context["method_info"]["method_name"], "bar");
        assert_eq!(context["method_info"]["method_name_end"], 7);
    }

    #[test]
    fn missing_tree_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = run_main(&options(path.clone(), vec![1])).unwrap_err();
        assert_eq!(err.kind(), assist_error::ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "cli::load_tree");
        assert_eq!(
            err.context_value("path"),
            Some(path.display().to_string().as_str())
        );
    }

    #[test]
    fn cyclic_tree_is_rejected_before_resolving() {
        use assist_core::TreeBuilder;
        use assist_core::ir::{ModuleNode, Node, Span, VariableExpr};

        let mut b = TreeBuilder::new();
        let foo = b.push(
            Span::new(0, 3),
            Node::Variable(VariableExpr {
                name: "foo".into(),
                ..Default::default()
            }),
        );
        b.set_original(foo, foo);
        let module = b.push(Span::new(0, 3), Node::Module(ModuleNode::default()));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycle.json");
        fs::write(&path, b.finish_unchecked(module).to_json().unwrap()).unwrap();

        let err = run_main(&options(path, vec![0])).unwrap_err();
        assert_eq!(err.kind(), assist_error::ErrorKind::CyclicNodeRef);
        assert_eq!(err.operation(), "cli::load_tree");
    }
}
