//! Error types for lumen

use thiserror::Error;

use crate::interaction::{ElementIdentity, StateKind};

/// Errors raised while resolving an element tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Two elements tracked by the same owner share an identity, so their
    /// interaction state cannot be told apart
    #[error(
        "elements with interactive styles need a unique key or ref: {identity} is used more than once (first conflicting state: {state})"
    )]
    DuplicateIdentity {
        /// The identity both elements resolved to
        identity: ElementIdentity,
        /// The interaction state that required tracking
        state: StateKind,
    },
}

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value we do not understand
    #[error("invalid value {value:?} for {variable}: expected one of {expected}")]
    InvalidEnv {
        variable: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Result type for resolution
pub type Result<T> = std::result::Result<T, ResolveError>;
