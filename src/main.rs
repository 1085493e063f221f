//! src/main.rs
use anyhow::Context;
use clap::{Parser, ValueEnum};
use inverted_index::{
    configuration::{
        get_configuration, get_configuration_from, ExecutorKind, IndexVariant, Settings,
    },
    executors::{Executor, ParallelExecutor, SequentialExecutor},
    mapreduce::MapReduce,
    spec::MapReduceSpecification,
    telemetry::init_tracing,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    Unigram,
    Bigram,
}

impl From<Variant> for IndexVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Unigram => IndexVariant::Unigram,
            Variant::Bigram => IndexVariant::Bigram,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "inverted-index")]
#[command(about = "Build a term to document index over a text corpus with MapReduce")]
struct Cli {
    /// Input file, or a directory of input files
    input: PathBuf,
    /// Output directory; must not exist yet
    output: PathBuf,
    /// Kind of index to build (overrides `index.variant`)
    #[arg(long, value_enum)]
    variant: Option<Variant>,
    /// Number of reduce tasks and part files
    #[arg(long)]
    reduce_tasks: Option<u16>,
    /// Maximum number of tasks running at once
    #[arg(long)]
    workers: Option<u16>,
    /// Skip the map-side combine step
    #[arg(long)]
    no_combine: bool,
    /// Run every task on the main thread
    #[arg(long)]
    sequential: bool,
    /// Configuration file to read instead of configuration/base.yaml
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(variant) = self.variant {
            settings.index.variant = variant.into();
        }
        if let Some(reduce_tasks) = self.reduce_tasks {
            settings.cluster.reduce_tasks = reduce_tasks;
        }
        if let Some(workers) = self.workers {
            settings.cluster.workers = workers;
        }
        if self.no_combine {
            settings.cluster.combine = false;
        }
        if self.sequential {
            settings.cluster.executor = ExecutorKind::Sequential;
        }
    }
}

async fn run_job<E: Executor>(job: &MapReduce, executor: &E) -> anyhow::Result<()> {
    job.run(executor).await.context("Index job failed")?;
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = match &cli.config {
        Some(path) => get_configuration_from(path),
        None => get_configuration(),
    }
    .context("Failed to read configuration")?;
    cli.apply(&mut settings);

    let tracer_provider = init_tracing("inverted-index", &settings.telemetry)?;

    let spec = MapReduceSpecification::from_settings(&settings, &cli.input, &cli.output);
    let result = match MapReduce::new(spec).context("Failed to prepare index job") {
        Ok(job) => {
            tracing::info!(
                job_id = %job.job_id(),
                splits = job.input_splits().len(),
                variant = ?settings.index.variant,
                "Starting index job"
            );
            match settings.cluster.executor {
                ExecutorKind::Sequential => run_job(&job, &SequentialExecutor).await,
                ExecutorKind::Parallel => {
                    let executor = ParallelExecutor::new(settings.cluster.workers.into());
                    run_job(&job, &executor).await
                }
            }
        }
        Err(e) => Err(e),
    };

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            eprintln!("Failed to flush traces: {e}");
        }
    }
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with status 2 from here.
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
