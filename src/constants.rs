//! Protocol constants shared with the verifying proxy.
//!
//! Everything in this module is part of the wire contract: changing any of
//! these values breaks verification on the proxy side.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Identifier of the only signing scheme Signway supports.
pub const ALGORITHM: &str = "SW1-HMAC-SHA256";

/// Long timestamp format: "20240101T000000Z".
pub const LONG_DATETIME: &str = "%Y%m%dT%H%M%SZ";
/// Short timestamp format, also the credential scope: "20240101".
pub const SHORT_DATE: &str = "%Y%m%d";

// Query parameters carried by every signed URL.

/// Algorithm query parameter.
pub const X_SW_ALGORITHM: &str = "X-Sw-Algorithm";
/// Credential query parameter: "access_key_id/scope".
pub const X_SW_CREDENTIAL: &str = "X-Sw-Credential";
/// Signing timestamp query parameter, long format.
pub const X_SW_DATE: &str = "X-Sw-Date";
/// Validity duration query parameter, decimal seconds.
pub const X_SW_EXPIRES: &str = "X-Sw-Expires";
/// Proxy destination query parameter.
pub const X_SW_PROXY: &str = "X-Sw-Proxy";
/// Signed header list query parameter.
pub const X_SW_SIGNED_HEADERS: &str = "X-Sw-SignedHeaders";
/// Whether the body is covered by the signature: "true" or "false".
pub const X_SW_BODY: &str = "X-Sw-Body";
/// The signature itself, always the last query parameter.
pub const X_SW_SIGNATURE: &str = "X-Sw-Signature";

/// AsciiSet used for every percent-encoded value in this crate.
///
/// Encodes every byte except the RFC 3986 unreserved characters:
/// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_' and '~'. Space becomes "%20",
/// never "+". The verifying proxy must decode reserved characters with the
/// same convention, otherwise signatures computed here will not match.
pub static SW_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
