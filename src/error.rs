use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can surface when a pipeline is built or drained
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A caller-supplied closure panicked inside a stage thread
    #[error("stage '{stage}' panicked while processing")]
    StagePanicked { stage: String },

    /// Fan-out was requested with zero workers
    #[error("parallel stage requires at least one worker")]
    NoWorkers,
}
