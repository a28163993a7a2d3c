use thiserror::Error;

/// Closed error enumeration per the error-handling design: the packet loop
/// and background jobs classify and continue rather than propagate.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("capture interface could not be opened: insufficient privileges")]
    CapturePrivilege,

    #[error("capture handle closed or aborted")]
    CaptureLost,

    #[error("DNS port bind denied: insufficient privileges")]
    BindPrivilege,

    #[error("resolver lookup failed: {0}")]
    ResolverTransient(String),

    #[error("database busy, retries exhausted: {0}")]
    PersistenceLocked(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("schema migration step failed (best-effort): {0}")]
    PersistenceSchema(String),

    #[error("packet re-injection failed: {0}")]
    ReinjectTransient(String),

    #[error("host/SNI parse gave up")]
    ParseMalformed,

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("stored credential string is malformed")]
    CredentialMalformed,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
