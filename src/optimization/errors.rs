//! optimization::errors — unified error surface for the least-squares stack.
//!
//! Every fallible routine under `optimization` returns [`OptResult<T>`].
//! Backend (Argmin) failures are normalized into [`OptError`] variants so
//! that callers never see raw `argmin::core::Error` values.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- FitOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost { value: f64 },

    /// Parameter vector handed to the objective has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    /// The model behind the objective rejected the mapped parameters.
    ModelEvaluation { text: String },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    MissingThetaHat,

    /// The solver stopped without converging (e.g. a failed line search).
    SolverExit { text: String },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- FitOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::ModelEvaluation { text } => {
                write!(f, "Model evaluation failed: {text}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::SolverExit { text } => {
                write!(f, "Solver exited without converging: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Our own errors travel through argmin wrapped in `argmin::core::Error`.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for pyo3::PyErr {
    fn from(err: OptError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
