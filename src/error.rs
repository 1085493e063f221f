//! src/error.rs
use std::path::PathBuf;

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Job-level failures. Anything that goes wrong with a single record is
/// absorbed where it happens and never shows up here.
#[derive(thiserror::Error)]
pub enum JobError {
    #[error("Input path does not exist: {0}")]
    NoInput(PathBuf),

    #[error("Output directory {0} already exists")]
    OutputExists(PathBuf),

    #[error("Mapper '{0}' not found")]
    UnknownMapper(String),

    #[error("Reducer '{0}' not found")]
    UnknownReducer(String),

    #[error("Job specification has no output")]
    MissingOutput,

    #[error("I/O failure on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A {phase} task failed")]
    TaskFailed {
        phase: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("Failed to schedule task")]
    Scheduling(#[from] tokio::sync::AcquireError),
}

impl std::fmt::Debug for JobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

impl JobError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JobError::Io {
            path: path.into(),
            source,
        }
    }
}
