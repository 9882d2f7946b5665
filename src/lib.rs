//! Rust SDK for creating Signway's signed URLs.
//!
//! Signway is a reverse proxy that forwards HTTP requests to a target origin
//! only when they carry a valid, non-expired signature. This crate produces
//! those signatures: given an access key id, a secret and a description of
//! the request to forward, it builds a time-limited signed URL that the
//! proxy can verify by recomputing the same HMAC chain with the shared
//! secret.
//!
//! The scheme follows the AWS SigV4 shape: the request's method, path,
//! query, selected headers and optional body are collapsed into a canonical
//! string, a per-day signing key is derived from the secret, and the final
//! signature is appended to the URL as a query parameter.
//!
//! ## Example
//!
//! ```
//! use signway_sdk::{Credential, ProxyRequest, UrlSigner};
//! use std::time::Duration;
//!
//! # fn main() -> signway_sdk::Result<()> {
//! let credential = Credential::new("my-id", "my-secret");
//! let signer = UrlSigner::new("http://localhost:3000");
//!
//! let request = ProxyRequest::new(
//!     http::Method::GET,
//!     "https://postman-echo.com/get",
//!     Duration::from_secs(600),
//! );
//!
//! let url = signer.sign(&credential, &request)?;
//! assert!(url.contains("X-Sw-Signature="));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod constants;
pub mod hash;
pub mod time;

mod credential;
pub use credential::Credential;
mod error;
pub use error::{Error, ErrorKind, Result};
mod sign;
pub use sign::{
    authorization_query_params, canonical_request, sign_url, signing_key, string_to_sign,
    ProxyRequest, UrlSigner,
};
