use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use vecspace_core::corpus::{build_index, load_documents};
use vecspace_core::persist::save_snapshot;
use vecspace_core::stats::CorpusStats;
use vecspace_core::Language;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build TF-IDF index snapshots and corpus statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every file under a directory and write a JSON snapshot
    Build {
        /// Corpus directory
        #[arg(long)]
        input: PathBuf,
        /// Snapshot file to write
        #[arg(long)]
        output: PathBuf,
        /// Analyzer language (english or bengali)
        #[arg(long, default_value = "english")]
        language: Language,
        /// Only index the first N files
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Word counts and the rank/frequency table for a corpus
    Stats {
        /// Corpus directory
        #[arg(long)]
        input: PathBuf,
        /// Also count distinct stems with this language's stemmer
        #[arg(long)]
        language: Option<Language>,
        /// Write the Zipf table here instead of stdout
        #[arg(long)]
        zipf_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, language, limit } => build(&input, &output, language, limit),
        Commands::Stats { input, language, zipf_out } => stats(&input, language, zipf_out),
    }
}

fn build(input: &Path, output: &Path, language: Language, limit: Option<usize>) -> Result<()> {
    let docs = load_documents(input, limit)?;
    let analyzer = language.analyzer();
    let index = build_index(&docs, analyzer.as_ref());
    tracing::info!(num_docs = index.num_docs(), num_terms = index.vocabulary_size(), %language, "indexed documents");

    save_snapshot(output, &index)?;
    tracing::info!(output = %output.display(), "index build complete");
    println!("Index created successfully for {} documents ({} terms)", index.num_docs(), index.vocabulary_size());
    Ok(())
}

fn stats(input: &Path, language: Option<Language>, zipf_out: Option<PathBuf>) -> Result<()> {
    let docs = load_documents(input, None)?;
    let analyzer = language.map(Language::analyzer);
    let stats = CorpusStats::collect(docs.iter().map(|d| d.text.as_str()), analyzer.as_deref());

    println!("{} files found.", docs.len());
    println!("Total words: {}", stats.total_words);
    println!("Unique words: {}", stats.unique_words());
    if let Some(stems) = stats.unique_stems {
        println!("Unique stemmed words: {stems}");
    }

    match zipf_out {
        Some(path) => {
            stats.write_zipf_table(BufWriter::new(File::create(&path)?))?;
            tracing::info!(path = %path.display(), "wrote rank/frequency table");
        }
        None => stats.write_zipf_table(io::stdout().lock())?,
    }
    Ok(())
}
