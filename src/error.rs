use std::fmt;

/// Pipeline stage names used to tag errors surfaced by a refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    History,
    Aggregate,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::History => "history",
            Stage::Aggregate => "aggregate",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HdbDashError {
    #[error("invalid period {0:?}: expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("price out of range: {0}")]
    PriceOutOfRange(f64),

    #[error("invalid record field {field}: {value:?}")]
    InvalidRecord { field: &'static str, value: String },

    #[error("fetch failed for {month}: {reason}")]
    FetchFailure { month: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<HdbDashError>,
    },
}

impl HdbDashError {
    /// Tag an error with the pipeline stage it occurred in. Errors already
    /// tagged keep their original stage so nested calls do not stack wrappers.
    pub(crate) fn at_stage(self, stage: Stage) -> Self {
        match self {
            HdbDashError::Stage { .. } => self,
            other => HdbDashError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage a pipeline error was tagged with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            HdbDashError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HdbDashError>;
