//! System-wide constants for the OpenSwap settlement protocol.

/// Domain tag prefixed to every claim digest preimage.
pub const CLAIM_DOMAIN_TAG: &[u8] = b"openswap:claim:v1:";

/// Domain tag used when deriving non-key principal addresses from labels.
pub const ADDRESS_DOMAIN_TAG: &[u8] = b"openswap:address:v1:";

/// Domain tag used when deriving asset identifiers from labels.
pub const ASSET_ID_DOMAIN_TAG: &[u8] = b"openswap:asset:v1:";

/// Maximum length of a unique asset's metadata URI (characters).
pub const MAX_URI_LEN: usize = 2083;

/// Default maximum number of fee legs per order.
pub const DEFAULT_MAX_FEE_LEGS: usize = 32;

/// Default maximum number of unique assets on one side of a swap.
pub const DEFAULT_MAX_SWAP_ASSETS: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol name.
pub const PROTOCOL_NAME: &str = "OpenSwap";
