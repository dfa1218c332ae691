//! Classification of transport-level failures.

use thiserror::Error;

/// A failure where no HTTP response was received.
///
/// Errors that arrive after a response line has been read (status handling,
/// body decoding) never take this path.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The attempt exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established or died mid-request.
    #[error("connection error: {0}")]
    Connection(String),

    /// Anything else, such as a malformed request that can never succeed.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Other(err.into())
        } else {
            // Refused connections, resets, and broken streams all land
            // here; reqwest only flags the handshake subset via is_connect.
            TransportError::Connection(err.to_string())
        }
    }
}

impl TransportError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout => true,
            TransportError::Connection(_) => true,
            TransportError::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_connections_are_retryable() {
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Connection("reset by peer".into()).is_retryable());
        assert!(!TransportError::Other(anyhow::anyhow!("bad request builder")).is_retryable());
    }

    #[tokio::test]
    async fn refused_connection_classifies_as_connection() {
        // Port 1 is reserved and nothing listens on it.
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let classified = TransportError::from(err);
        assert!(matches!(classified, TransportError::Connection(_)));
        assert!(classified.is_retryable());
    }
}
