use thiserror::Error;

/// Errors raised while reading a team list. The solver itself never sees
/// malformed input, so every check lives here.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty input")]
    Empty,

    #[error("invalid integer {token:?}")]
    InvalidNumber { token: String },

    #[error("expected {expected} teams but found {found}")]
    TeamCountMismatch { expected: usize, found: usize },

    #[error("team {index} is missing its second member")]
    IncompleteTeam { index: usize },

    #[error("id {id} is outside both pools")]
    IdOutOfRange { id: u32 },

    #[error("team ({0}, {1}) has both members in the same pool")]
    SamePool(u32, u32),

    #[error("{count} teams exceeds the limit of {max}")]
    TooManyTeams { count: usize, max: usize },
}

/// Structural inconsistencies found while solving. These point at a defect in
/// the solver, not at bad input, so they are reported but never abort a solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Inconsistency {
    #[error("unknown edge in flip_flow from {from} to {to}")]
    MissingEdge { from: u32, to: u32 },

    #[error("num edges in matching: {matched} does not equal num invitees: {cover}")]
    CoverSizeMismatch { matched: usize, cover: usize },
}
