use thiserror::Error;

pub type AxisLayoutResult<T> = Result<T, AxisLayoutError>;

#[derive(Debug, Error)]
pub enum AxisLayoutError {
    /// A scale type tag outside `discrete`, `numeric` and `timeSeries`.
    ///
    /// This aborts the layout pass: it always points at an upstream
    /// configuration mistake.
    #[error("unsupported axis domain kind: {0}")]
    InvalidDomainKind(String),

    #[error("invalid axis configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
