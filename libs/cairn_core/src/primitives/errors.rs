use std::fmt::Display;

/// Precondition failures on chain operations. These halt the call that hit
/// them; everything a validator discovers is reported as a value instead
/// (see `blockchain::validation`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A chain was requested over no payloads at all.
    EmptyInput,
    /// An operation that needs at least one block ran on an empty chain.
    ChainEmpty,
}

impl Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::EmptyInput => {
                write!(f, "Cannot create a chain with no block data")
            }
            ChainError::ChainEmpty => {
                write!(f, "Operation requires at least one block in the chain")
            }
        }
    }
}

impl std::error::Error for ChainError {}
