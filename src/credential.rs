use std::fmt::{Debug, Formatter};

/// Credential that holds the Signway access key id and secret access key.
///
/// The secret never appears in the output URL and never appears in logs:
/// the `Debug` implementation redacts both fields.
#[derive(Clone)]
pub struct Credential {
    /// Access key id, embedded in the `X-Sw-Credential` query parameter.
    pub access_key_id: String,
    /// Secret access key, shared with the verifying proxy and used only to
    /// derive signing keys.
    pub secret_access_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact(&self.access_key_id))
            .field("secret_access_key", &Redact(&self.secret_access_key))
            .finish()
    }
}

/// Redacts a string by replacing all but the first and last three characters
/// with asterisks.
///
/// Strings shorter than 12 characters are redacted entirely, so that very
/// short secrets cannot be reconstructed from their edges.
struct Redact<'a>(&'a str);

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}
