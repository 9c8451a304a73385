use crate::battle::state::BattleStatus;
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// A submitted action was rejected; the battle was not mutated
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// The creature catalog or trainer list could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Engine configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// A battle could not be rendered as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons an action is rejected. None of these mutate the battle, so the
/// caller can retry with a valid action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("battle is already over ({0})")]
    BattleOver(BattleStatus),
    #[error("active creature has fainted and must be switched out")]
    ActiveFainted,
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("invalid team index: {0}")]
    InvalidTeamIndex(usize),
    #[error("creature at index {0} is already active")]
    AlreadyActive(usize),
    #[error("creature at index {0} has fainted")]
    TargetFainted(usize),
}

/// Errors related to catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("malformed catalog data: {0}")]
    MalformedData(String),
    #[error("duplicate species name: {0}")]
    DuplicateSpecies(String),
    #[error("trainer not found: {0}")]
    TrainerNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results of action submission
pub type ActionResult<T> = Result<T, ActionError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
