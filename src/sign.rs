use crate::constants::{
    ALGORITHM, SW_ENCODE_SET, X_SW_ALGORITHM, X_SW_BODY, X_SW_CREDENTIAL, X_SW_DATE, X_SW_EXPIRES,
    X_SW_PROXY, X_SW_SIGNATURE, X_SW_SIGNED_HEADERS,
};
use crate::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use crate::time::{format_date, format_iso8601, now, DateTime};
use crate::{Credential, Error, Result};
use http::header::CONTENT_LENGTH;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;
use std::time::Duration;

/// Description of the request that Signway will forward to the origin.
///
/// Everything captured here is covered by the signature: the proxy rejects
/// any forwarded request whose method, headers or body differ from what was
/// signed.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    method: Method,
    proxy_url: String,
    expires_in: Duration,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ProxyRequest {
    /// Create a request for `method` against `proxy_url`, valid for
    /// `expires_in` from the moment of signing.
    pub fn new(method: Method, proxy_url: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            method,
            proxy_url: proxy_url.into(),
            expires_in,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Add a header that must accompany the forwarded request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name: HeaderName = name.parse()?;
        let value: HeaderValue = value.parse()?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Replace all headers at once.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach the request body.
    ///
    /// A non-empty body is covered by the signature and forces a
    /// `Content-Length` header equal to its byte length.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// Signs URLs for a single Signway instance.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    host: String,
    time: Option<DateTime>,
}

impl UrlSigner {
    /// Create a new signer for the Signway instance at `host`.
    pub fn new(host: impl Into<String>) -> Self {
        let mut host = host.into();
        if !host.ends_with('/') {
            host.push('/');
        }

        Self { host, time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function when reproducible output is required.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign `req` and return the signed URL.
    ///
    /// The returned URL points at this signer's host and carries the full
    /// authorization query block plus the trailing `X-Sw-Signature`
    /// parameter.
    pub fn sign(&self, cred: &Credential, req: &ProxyRequest) -> Result<String> {
        let now = self.time.unwrap_or_else(now);

        self.host
            .parse::<Uri>()
            .map_err(|e| Error::invalid_input(format!("host is not a valid url: {e}")))?;

        // A non-empty body is always signed together with its exact byte
        // length, overriding any caller-supplied Content-Length.
        let mut headers = req.headers.clone();
        if !req.body.is_empty() {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(req.body.len()));
        }

        let unsigned_url = format!(
            "{}{}",
            self.host,
            authorization_query_params(
                cred,
                now,
                req.expires_in,
                &req.proxy_url,
                &headers,
                !req.body.is_empty(),
            )?
        );

        let creq = canonical_request(&req.method, &unsigned_url, &headers, &req.body)?;
        debug!("calculated canonical request: {creq}");

        let to_sign = string_to_sign(now, &creq)?;
        let key = signing_key(now, &cred.secret_access_key);
        let signature = hex_hmac_sha256(&key, to_sign.as_bytes());

        Ok(format!("{unsigned_url}&{X_SW_SIGNATURE}={signature}"))
    }
}

/// Sign a URL with the given parameters using the Signway signature scheme.
///
/// One-shot convenience over [`UrlSigner`]. `time` defaults to the current
/// UTC time when `None`; pass an explicit time for reproducible output.
#[allow(clippy::too_many_arguments)]
pub fn sign_url(
    access_key_id: &str,
    secret_access_key: &str,
    host: &str,
    proxy_url: &str,
    expires_in: Duration,
    method: Method,
    headers: HeaderMap,
    body: &[u8],
    time: Option<DateTime>,
) -> Result<String> {
    let cred = Credential::new(access_key_id, secret_access_key);

    let mut signer = UrlSigner::new(host);
    if let Some(t) = time {
        signer = signer.with_time(t);
    }

    let req = ProxyRequest::new(method, proxy_url, expires_in)
        .with_headers(headers)
        .with_body(body.to_vec());

    signer.sign(&cred, &req)
}

/// Build the canonical representation of the request described by `url`.
///
/// The result is a pure function of method, path, query, headers and body:
/// identical inputs yield the identical string regardless of header or
/// query parameter order.
pub fn canonical_request(
    method: &Method,
    url: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<String> {
    let uri: Uri = url
        .parse()
        .map_err(|e| Error::invalid_input(format!("url is not valid: {e}")))?;
    let body = std::str::from_utf8(body)
        .map_err(|e| Error::invalid_input(format!("body is not valid utf-8: {e}")))?;

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{}", uri.path())?;
    writeln!(f, "{}", canonical_query_string(&uri))?;
    writeln!(f, "{}", canonical_header_string(headers)?)?;
    writeln!(f)?;
    writeln!(f, "{}", signed_header_string(headers))?;
    write!(f, "{body}")?;

    Ok(f)
}

/// Combine algorithm, long timestamp, scope and the canonical request digest
/// into the exact byte string that gets signed.
pub fn string_to_sign(t: DateTime, canonical_request: &str) -> Result<String> {
    let mut f = String::with_capacity(128);

    writeln!(f, "{ALGORITHM}")?;
    writeln!(f, "{}", format_iso8601(t))?;
    writeln!(f, "{}", format_date(t))?;
    write!(f, "{}", hex_sha256(canonical_request.as_bytes()))?;

    debug!("calculated string to sign: {f}");
    Ok(f)
}

/// Derive the signing key for the calendar day of `t`.
///
/// The key is `HMAC-SHA256(ALGORITHM || secret, scope)`, raw bytes. It is
/// never transmitted; only signatures computed with it are.
pub fn signing_key(t: DateTime, secret: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(ALGORITHM.len() + secret.len());
    key.extend_from_slice(ALGORITHM.as_bytes());
    key.extend_from_slice(secret.as_bytes());

    hmac_sha256(&key, format_date(t).as_bytes())
}

/// Build the authorization query parameter block, without the signature.
///
/// Parameter order is fixed and part of the wire contract. The leading `?`
/// is included so the block can be appended to the host directly.
pub fn authorization_query_params(
    cred: &Credential,
    t: DateTime,
    expires_in: Duration,
    proxy_url: &str,
    headers: &HeaderMap,
    sign_body: bool,
) -> Result<String> {
    let proxy: Uri = proxy_url
        .parse()
        .map_err(|e| Error::invalid_input(format!("proxy url is not valid: {e}")))?;

    let credential = format!("{}/{}", cred.access_key_id, format_date(t));
    let signed_headers = signed_header_string(headers);

    let mut f = String::with_capacity(256);
    write!(f, "?{X_SW_ALGORITHM}={ALGORITHM}")?;
    write!(f, "&{X_SW_CREDENTIAL}={}", percent_encode(&credential))?;
    write!(f, "&{X_SW_DATE}={}", format_iso8601(t))?;
    write!(f, "&{X_SW_EXPIRES}={}", expires_in.as_secs())?;
    write!(f, "&{X_SW_PROXY}={}", percent_encode(&proxy.to_string()))?;
    write!(f, "&{X_SW_SIGNED_HEADERS}={}", percent_encode(&signed_headers))?;
    write!(f, "&{X_SW_BODY}={sign_body}")?;

    Ok(f)
}

fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, &SW_ENCODE_SET).to_string()
}

fn canonical_query_string(uri: &Uri) -> String {
    let query = uri.query().unwrap_or_default();

    let mut tokens: Vec<String> = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| format!("{}={}", percent_encode(&k), percent_encode(&v)))
        .collect();
    // Sorting makes the result independent of the original parameter order.
    tokens.sort_unstable();

    tokens.join("&")
}

fn canonical_header_string(headers: &HeaderMap) -> Result<String> {
    // HeaderName is lowercase by construction, so lines sort the same way
    // the proxy sorts them.
    let mut lines = Vec::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        lines.push(format!("{}:{}", name, value.to_str()?.trim()));
    }
    lines.sort_unstable();

    Ok(lines.join("\n"))
}

fn signed_header_string(headers: &HeaderMap) -> String {
    let mut names: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();
    names.sort_unstable();

    names.join(";")
}
