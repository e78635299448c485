use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid day number: {0} (plans run from day 1 to day 3)")]
    InvalidDay(u8),

    #[error("Unknown food id: {0}")]
    UnknownFood(String),

    #[error("Not enough foods selected: {selected} (at least {required} needed)")]
    NotEnoughFoods { selected: usize, required: usize },

    #[error("No active plan, run onboarding first")]
    NoPlan,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, DemError>;
