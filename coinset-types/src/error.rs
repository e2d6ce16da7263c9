use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the coinset workspace.
///
/// Validation failures (bad arguments, unknown symbols) are raised before any
/// provider call. Provider failures are tagged with the connector that produced
/// them. Insufficient history is deliberately absent: a short series is a valid
/// outcome that yields zero windows.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoinsetError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history").
        capability: String,
    },

    /// The provider returned a payload that could not be decoded or violates
    /// a data invariant (negative price, unrepresentable timestamp, ...).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The symbol is not present in the identifier registry.
    #[error("unknown instrument: {symbol}")]
    UnknownInstrument {
        /// Symbol as requested by the caller.
        symbol: String,
    },

    /// An individual connector failed at the transport or HTTP level.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found at the provider.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for coin 1".
        what: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "catalog", "history").
        capability: String,
    },

    /// Derived data was requested from an instrument that is not loaded.
    #[error("instrument {symbol} is not loaded (state: {state})")]
    NotLoaded {
        /// Symbol of the instrument.
        symbol: String,
        /// Lifecycle state at the time of the request.
        state: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CoinsetError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    #[must_use]
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `UnknownInstrument` error.
    #[must_use]
    pub fn unknown_instrument(symbol: impl Into<String>) -> Self {
        Self::UnknownInstrument {
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    #[must_use]
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Returns true for errors raised by local validation, before any provider call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArg(_) | Self::UnknownInstrument { .. })
    }

    /// Returns true for failures that originate at the provider boundary
    /// (transport, decoding, missing resources, timeouts).
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::Connector { .. }
                | Self::Parse(_)
                | Self::NotFound { .. }
                | Self::ProviderTimeout { .. }
        )
    }
}
