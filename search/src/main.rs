use anyhow::Result;
use clap::Parser;
use search::{build_context, run_loop, ContextOptions, Mode};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use vecspace_core::{Language, DEFAULT_TOP_K};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Interactive vector space and boolean retrieval", long_about = None)]
struct Args {
    /// Corpus directory, indexed when no snapshot exists
    #[arg(long, default_value = "./data/english")]
    input: PathBuf,
    /// Index snapshot file
    #[arg(long, default_value = "./data/eng_index_vsm.json")]
    snapshot: PathBuf,
    /// Analyzer language (english or bengali)
    #[arg(long, default_value = "english")]
    language: Language,
    /// Retrieval model (vsm or boolean)
    #[arg(long, default_value = "vsm")]
    mode: Mode,
    /// Number of documents shown per query
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// Only index the first N files of the corpus
    #[arg(long)]
    limit: Option<usize>,
    /// Ignore any existing snapshot and rebuild it
    #[arg(long, default_value_t = false)]
    rebuild: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let ctx = build_context(&ContextOptions {
        input: args.input,
        snapshot: args.snapshot,
        language: args.language,
        limit: args.limit,
        rebuild: args.rebuild,
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&ctx, args.mode, args.top_k, stdin.lock(), stdout.lock())
}
