use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use assist_cli::{AssistOptions, RequestOptions, run_main};
use assist_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "assist",
    about = "assist: what is being typed at the caret",
    version
)]
pub struct Cli {
    /// Program tree as JSON
    #[arg(long, value_name = "FILE")]
    tree: PathBuf,

    #[command(flatten)]
    request: RequestOptions,

    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the program tree before the results
    #[arg(long, default_value_t = false)]
    print_tree: bool,

    /// Emit JSON instead of one line per offset
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Resolve offsets one after another on the calling thread
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = AssistOptions {
        tree: args.tree,
        config: args.config,
        request: args.request,
        print_tree: args.print_tree,
        json: args.json,
        sequential: args.sequential,
    };

    match run_main(&opts) {
        Ok(output) => {
            if let Some(ref path) = args.output {
                std::fs::write(path, &output)?;
                tracing::info!(path = %path.display(), "output written");
            } else {
                print!("{output}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            std::process::exit(1);
        }
    }

    tracing::info!(total_secs = total_start.elapsed().as_secs_f64(), "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
