//! Error types for the OpenSwap settlement protocol.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by class:
//! - 1xx: Validation errors (malformed or expired orders; never retryable)
//! - 2xx: Authorization errors (signature, caller, allowance, delegation)
//! - 3xx: State conflict errors (digest already cancelled / performed)
//! - 4xx: Asset registry errors (missing or conflicting unique assets)
//! - 9xx: General / internal errors

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, AssetId, ClaimDigest};

/// Coarse classification that drives strict / lenient execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorClass {
    /// Malformed request. Hard-fails in every mode.
    Validation,
    /// Runtime permission or holdings problem. Soft-fails in lenient mode.
    Authorization,
    /// Digest already in a terminal state. Soft-fails in lenient mode.
    StateConflict,
    /// Bug or misconfiguration. Hard-fails in every mode.
    Internal,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::StateConflict => write!(f, "STATE_CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Which side of a swap a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SwapSide {
    /// Assets the maker gives to the taker.
    Give,
    /// Assets the taker gives to the maker.
    Take,
}

impl std::fmt::Display for SwapSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Give => write!(f, "GIVE"),
            Self::Take => write!(f, "TAKE"),
        }
    }
}

/// Central error enum for all OpenSwap operations.
#[derive(Debug, Error)]
pub enum OpenswapError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The order failed structural validation.
    #[error("OS_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order's expiration is in the past.
    #[error("OS_ERR_101: Order expired at {expiration}, now {now}")]
    OrderExpired {
        expiration: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// Fee recipient and fee amount arrays differ in length.
    #[error("OS_ERR_102: Fee leg mismatch: {recipients} recipients, {amounts} amounts")]
    FeeLegMismatch { recipients: usize, amounts: usize },

    /// A swap's declared asset count differs from the supplied assets.
    #[error("OS_ERR_103: Swap {side} count mismatch: declared {declared}, supplied {supplied}")]
    SwapCountMismatch {
        side: SwapSide,
        declared: usize,
        supplied: usize,
    },

    /// Maker and taker are the same party.
    #[error("OS_ERR_104: Maker and taker must differ: {0}")]
    SelfSettlement(Address),

    /// Too many legs for the configured limits.
    #[error("OS_ERR_105: Too many {what}: {count} exceeds limit {limit}")]
    TooManyLegs {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// The signature does not authorize the maker for this digest.
    #[error("OS_ERR_200: Invalid signature for {signer} over {digest}")]
    InvalidSignature {
        signer: Address,
        digest: ClaimDigest,
    },

    /// The caller is not the party allowed to make this call.
    #[error("OS_ERR_201: Wrong caller: expected {expected}, got {actual}")]
    WrongCaller { expected: Address, actual: Address },

    /// Allowance granted to the spender is too small.
    #[error("OS_ERR_202: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Decimal, available: Decimal },

    /// Fungible balance is too small.
    #[error("OS_ERR_203: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The spender is neither owner, approved, nor operator for the asset.
    #[error("OS_ERR_204: {spender} not approved for {asset}")]
    NotApproved { spender: Address, asset: AssetId },

    /// The minter lacks mint authorization on the registry.
    #[error("OS_ERR_205: {minter} is not authorized to mint")]
    MintNotAuthorized { minter: Address },

    /// The caller is not on the proxy's allowlist.
    #[error("OS_ERR_206: {caller} is not an authorized proxy spender")]
    SpenderNotAuthorized { caller: Address },

    /// Only the administrator may perform this operation.
    #[error("OS_ERR_207: {caller} is not the administrator")]
    NotAdministrator { caller: Address },

    /// The claimed source does not own the asset.
    #[error("OS_ERR_208: {claimed} does not own {asset}")]
    NotAssetOwner { claimed: Address, asset: AssetId },

    /// Fungible transfers have not been enabled yet.
    #[error("OS_ERR_209: Token transfers are disabled")]
    TransfersDisabled,

    /// The order issuer does not own the target registry.
    #[error("OS_ERR_210: {issuer} does not own registry {registry}")]
    NotRegistryOwner { issuer: Address, registry: Address },

    // =================================================================
    // State Conflict Errors (3xx)
    // =================================================================
    /// The digest was already performed (replay prevention).
    #[error("OS_ERR_300: Order already performed: {0}")]
    OrderAlreadyPerformed(ClaimDigest),

    /// The digest was already cancelled.
    #[error("OS_ERR_301: Order already cancelled: {0}")]
    OrderAlreadyCancelled(ClaimDigest),

    // =================================================================
    // Asset Registry Errors (4xx)
    // =================================================================
    /// No such unique asset in the registry.
    #[error("OS_ERR_400: Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// A unique asset with this id already exists.
    #[error("OS_ERR_401: Asset already exists: {0}")]
    AssetAlreadyExists(AssetId),

    /// Recipient address is not allowed (zero address, token contract, ...).
    #[error("OS_ERR_402: Invalid recipient: {0}")]
    InvalidRecipient(Address),

    /// Mint metadata is unacceptable (empty proof, URI too long, ...).
    #[error("OS_ERR_403: Invalid asset data: {reason}")]
    InvalidAssetData { reason: String },

    /// No registry is known under this address.
    #[error("OS_ERR_404: Registry not found: {0}")]
    RegistryNotFound(Address),

    /// The address is already on the allowlist.
    #[error("OS_ERR_405: {0} is already authorized")]
    AlreadyAuthorized(Address),

    /// The address is not on the allowlist.
    #[error("OS_ERR_406: {0} is not authorized")]
    NotAuthorized(Address),

    /// A non-zero allowance must be reset to zero before it is changed.
    #[error("OS_ERR_407: Allowance must be reset to zero first (current {current})")]
    AllowanceNotReset { current: Decimal },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OS_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config, wiring mismatch, ...).
    #[error("OS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// Fungible supply changed across a settlement.
    #[error("OS_ERR_903: Supply invariant violated: {reason}")]
    SupplyInvariantViolation { reason: String },
}

impl OpenswapError {
    /// The class that decides how strict and lenient modes treat this error.
    ///
    /// Registry and allowlist errors raised while moving assets describe the
    /// parties' holdings or grants at call time, so they class as
    /// authorization failures.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidOrder { .. }
            | Self::OrderExpired { .. }
            | Self::FeeLegMismatch { .. }
            | Self::SwapCountMismatch { .. }
            | Self::SelfSettlement(_)
            | Self::TooManyLegs { .. } => ErrorClass::Validation,

            Self::InvalidSignature { .. }
            | Self::WrongCaller { .. }
            | Self::InsufficientAllowance { .. }
            | Self::InsufficientBalance { .. }
            | Self::NotApproved { .. }
            | Self::MintNotAuthorized { .. }
            | Self::SpenderNotAuthorized { .. }
            | Self::NotAdministrator { .. }
            | Self::NotAssetOwner { .. }
            | Self::TransfersDisabled
            | Self::NotRegistryOwner { .. }
            | Self::AssetNotFound(_)
            | Self::AssetAlreadyExists(_)
            | Self::InvalidRecipient(_)
            | Self::InvalidAssetData { .. }
            | Self::RegistryNotFound(_)
            | Self::AlreadyAuthorized(_)
            | Self::NotAuthorized(_)
            | Self::AllowanceNotReset { .. } => ErrorClass::Authorization,

            Self::OrderAlreadyPerformed(_) | Self::OrderAlreadyCancelled(_) => {
                ErrorClass::StateConflict
            }

            Self::Internal(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::SupplyInvariantViolation { .. } => ErrorClass::Internal,
        }
    }

    /// Whether lenient mode may downgrade this error to a failure signal.
    #[must_use]
    pub fn is_soft_failable(&self) -> bool {
        matches!(
            self.class(),
            ErrorClass::Authorization | ErrorClass::StateConflict
        )
    }

    /// Whether a caller may reasonably retry the same request later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_soft_failable()
    }

    /// The `OS_ERR_nnn` code of this error.
    #[must_use]
    pub fn code(&self) -> String {
        let rendered = self.to_string();
        rendered
            .split(':')
            .next()
            .unwrap_or("OS_ERR_900")
            .to_string()
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenswapError>;

impl From<serde_json::Error> for OpenswapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = OpenswapError::OrderAlreadyPerformed(ClaimDigest([0u8; 32]));
        let msg = format!("{err}");
        assert!(msg.starts_with("OS_ERR_300"), "Got: {msg}");
    }

    #[test]
    fn insufficient_allowance_display() {
        let err = OpenswapError::InsufficientAllowance {
            needed: Decimal::new(20, 0),
            available: Decimal::new(10, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_202"));
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn swap_count_mismatch_display() {
        let err = OpenswapError::SwapCountMismatch {
            side: SwapSide::Take,
            declared: 2,
            supplied: 1,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_103"));
        assert!(msg.contains("TAKE"));
    }

    #[test]
    fn classes_follow_code_groups() {
        assert_eq!(
            OpenswapError::FeeLegMismatch {
                recipients: 1,
                amounts: 2
            }
            .class(),
            ErrorClass::Validation
        );
        assert_eq!(
            OpenswapError::TransfersDisabled.class(),
            ErrorClass::Authorization
        );
        assert_eq!(
            OpenswapError::OrderAlreadyCancelled(ClaimDigest([1u8; 32])).class(),
            ErrorClass::StateConflict
        );
        assert_eq!(
            OpenswapError::Internal("x".into()).class(),
            ErrorClass::Internal
        );
    }

    #[test]
    fn only_authorization_and_state_conflict_are_soft() {
        assert!(OpenswapError::TransfersDisabled.is_soft_failable());
        assert!(OpenswapError::OrderAlreadyPerformed(ClaimDigest([0u8; 32])).is_soft_failable());
        assert!(!OpenswapError::SelfSettlement(Address::ZERO).is_soft_failable());
        assert!(!OpenswapError::Configuration("x".into()).is_retryable());
    }

    #[test]
    fn code_extracts_prefix() {
        assert_eq!(OpenswapError::TransfersDisabled.code(), "OS_ERR_209");
    }

    #[test]
    fn all_errors_have_os_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpenswapError::TransfersDisabled),
            Box::new(OpenswapError::AssetNotFound(AssetId::from_u64(1))),
            Box::new(OpenswapError::SelfSettlement(Address::ZERO)),
            Box::new(OpenswapError::Internal("test".into())),
            Box::new(OpenswapError::TooManyLegs {
                what: "fee legs",
                count: 9,
                limit: 8,
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OS_ERR_"),
                "Error missing OS_ERR_ prefix: {msg}"
            );
        }
    }
}
