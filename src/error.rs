//! Error type shared by the symbolic engine, the drivers and the command line front-end.
//!
//! The string toolkit in [`crate::codegen`] never fails: it is best-effort on malformed input,
//! so only the parts that build or persist something return [`CoeffError`].

/// An error raised while building, expanding or writing out a polynomial system.
#[derive(thiserror::Error, Debug)]
pub enum CoeffError {
    /// The expression cannot be expanded into a polynomial (symbolic exponent,
    /// division by a non-constant, negative power ...).
    #[error("expression is not a polynomial: {0}")]
    NotPolynomial(String),

    /// The text is not a well-formed expression.
    #[error("cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Division by a constant zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Operand shapes do not agree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// Solver name not recognised on the command line or in the configuration.
    #[error("unknown solver '{0}'")]
    UnknownSolver(String),

    /// Semantically invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading the configuration or writing a generated file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CoeffError>;
