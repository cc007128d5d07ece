use thiserror::Error;

/// Fallos posibles de un análisis. Cada variante se presenta de forma distinta.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("could not read the uploaded image: {0}")]
    DecodeFailure(String),
    #[error("{0}")]
    TransportFailure(String),
    #[error("the workflow returned no predictions")]
    EmptyResult,
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
