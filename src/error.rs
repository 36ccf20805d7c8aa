use std::fmt;
use std::path::PathBuf;

/// Shape of an algebra operand, used in dimension mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Vector(usize),
    Matrix(usize, usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vector(len) => write!(f, "vector[{len}]"),
            Shape::Matrix(rows, columns) => write!(f, "matrix[{rows}x{columns}]"),
        }
    }
}

/// Errors raised by vector and matrix operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgebraError {
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: Shape,
        found: Shape,
    },
}

/// Which parameter list of a network a tensor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Weights,
    Biases,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::Weights => f.write_str("weight matrix"),
            ParameterKind::Biases => f.write_str("bias vector"),
        }
    }
}

/// Errors raised when building, evaluating or training a network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),

    #[error("layer {0} has zero width")]
    EmptyLayer(usize),

    #[error("training batch has {inputs} inputs but {targets} targets")]
    BatchMismatch { inputs: usize, targets: usize },

    #[error("training batch is empty")]
    EmptyBatch,

    #[error("{kind} index {index} out of range (network has {count})")]
    ParameterIndex {
        kind: ParameterKind,
        index: usize,
        count: usize,
    },

    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Errors raised by the tournament and evolution loop.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("invalid population: {0}")]
    InvalidPopulation(String),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("failed to build tournament thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
