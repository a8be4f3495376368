use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use vecspace_core::classify::NaiveBayesClassifier;
use vecspace_core::eval::{evaluate_query, Qrels, RunResults};

#[derive(Parser)]
#[command(name = "evaluate")]
#[command(about = "Score retrieval runs and classify newsgroup messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average precision of one query in a TREC run
    Ap {
        /// Run file: `query iter doc rank score tag` per line
        #[arg(long)]
        results: PathBuf,
        /// Relevance judgements: `query iter doc relevance` per line
        #[arg(long)]
        qrels: PathBuf,
        /// Query identifier to evaluate
        #[arg(long)]
        query: String,
    },
    /// Train Naive Bayes on class directories and label every test file
    Classify {
        /// Directory with one subdirectory of messages per class
        #[arg(long, default_value = "./data/newsgroups")]
        train: PathBuf,
        /// Directory of messages to label
        #[arg(long)]
        test: PathBuf,
        /// Output file of `file_name, class` lines
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ap { results, qrels, query } => average_precision(&results, &qrels, &query),
        Commands::Classify { train, test, output } => classify(&train, &test, &output),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(f))
}

fn average_precision(results: &Path, qrels: &Path, query: &str) -> Result<()> {
    let run = RunResults::parse(open(results)?)?;
    let qrels = Qrels::parse(open(qrels)?)?;
    let report = evaluate_query(&run, &qrels, query)?;

    println!("Total retrieved docs for the query\t\t: {}", report.retrieved);
    println!("Total relevant docs for the query\t\t: {}", report.relevant);
    println!("Retrieved relevant docs for the query\t\t: {}", report.retrieved_relevant);
    println!();
    println!("Average Precision (AP) for query {query}\t\t: {}", report.average_precision);
    Ok(())
}

fn classify(train: &Path, test: &Path, output: &Path) -> Result<()> {
    let classifier = NaiveBayesClassifier::from_dir(train)?;
    tracing::info!(docs = classifier.total_docs(), vocabulary = classifier.vocabulary_size(), "classifier trained");

    let predictions = classifier.classify_dir(test)?;
    let mut out = BufWriter::new(File::create(output).with_context(|| format!("creating {}", output.display()))?);
    for (file_name, class) in &predictions {
        writeln!(out, "{file_name}, {class}")?;
    }
    out.flush()?;
    tracing::info!(predictions = predictions.len(), output = %output.display(), "wrote predictions");
    Ok(())
}
