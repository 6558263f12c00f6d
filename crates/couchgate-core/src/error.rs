use thiserror::Error;

pub type Result<T> = std::result::Result<T, CouchGateError>;

/// Errors surfaced by transports and the authentication strategy.
///
/// The adapter layer itself never fails on revision lookup — a failed lookup
/// degrades to "no revision available" — so these variants describe hard
/// failures in the layers below it.
#[derive(Debug, Error)]
pub enum CouchGateError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}
