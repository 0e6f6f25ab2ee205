//! Absolute base URLs from request scheme/host information.
//!
//! Pure string normalization through the `url` crate; nothing here touches
//! the network.

use ::url::Url;

use crate::error::{IcsError, Result};

/// Scheme and host of the request a calendar is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// `http` or `https`.
    pub scheme: String,
    /// Host with optional scheme prefix and port, e.g. `https://localhost:8081`.
    pub scheme_and_host: String,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, scheme_and_host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            scheme_and_host: scheme_and_host.into(),
        }
    }

    /// Canonical base URL of this request. See [`normalize`].
    pub fn base_url(&self) -> Result<String> {
        normalize(&self.scheme, &self.scheme_and_host)
    }
}

/// Build the canonical `scheme://host[:port]` base URL of a request.
///
/// The scheme and host are lowercased, a default port (80 for http, 443 for
/// https) is dropped, and any path, query, fragment or trailing slash is
/// removed. `scheme_and_host` may omit its `scheme://` prefix; when present,
/// the explicit `scheme` argument still wins.
///
/// # Errors
/// Returns `IcsError::InvalidUrl` for a scheme other than http/https or a
/// host that does not parse.
///
/// # Example
/// ```
/// use ics_core::request_url::normalize;
///
/// assert_eq!(normalize("https", "HTTPS://LocalHost:443/").unwrap(), "https://localhost");
/// assert_eq!(normalize("http", "localhost:8081").unwrap(), "http://localhost:8081");
/// ```
pub fn normalize(scheme: &str, scheme_and_host: &str) -> Result<String> {
    let scheme = scheme.trim().to_ascii_lowercase();
    if !matches!(scheme.as_str(), "http" | "https") {
        return Err(IcsError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            scheme
        )));
    }

    let raw = scheme_and_host.trim();
    let authority = match raw.find("://") {
        Some(idx) => &raw[idx + 3..],
        None => raw,
    };
    let authority = authority
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    if authority.is_empty() {
        return Err(IcsError::InvalidUrl(format!("no host in '{}'", raw)));
    }

    let parsed = Url::parse(&format!("{}://{}", scheme, authority))
        .map_err(|e| IcsError::InvalidUrl(format!("{}: {}", raw, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| IcsError::InvalidUrl(format!("no host in '{}'", raw)))?;

    // `port()` is None when the port is the scheme's default.
    let base = match parsed.port() {
        Some(port) => format!("{}://{}:{}", scheme, host, port),
        None => format!("{}://{}", scheme, host),
    };
    Ok(base)
}

/// Resolve `reference` against `base`. Absolute references come back in
/// their normalized form.
///
/// # Errors
/// Returns `IcsError::InvalidUrl` if either side does not parse, or if the
/// result is not an http(s) URL.
pub fn absolute(base: &str, reference: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| IcsError::InvalidUrl(format!("{}: {}", base, e)))?;
    let joined = base
        .join(reference.trim())
        .map_err(|e| IcsError::InvalidUrl(format!("{}: {}", reference, e)))?;
    if !is_web(&joined) {
        return Err(IcsError::InvalidUrl(format!(
            "'{}' does not resolve to an http(s) URL",
            reference
        )));
    }
    Ok(joined.to_string())
}

/// Make `reference` absolute. Only an `http`/`https` reference counts as
/// absolute and is returned normalized; anything else is resolved as a path
/// against `base`, including strings that merely look like a scheme such as
/// `example.com:8080/events` or `javascript:alert(1)`.
///
/// # Errors
/// Returns `IcsError::InvalidUrl` for a relative reference without a base,
/// or if either side does not parse.
pub fn resolve(base: Option<&str>, reference: &str) -> Result<String> {
    let reference = reference.trim();
    let relative = match Url::parse(reference) {
        Ok(url) if is_web(&url) => return Ok(url.to_string()),
        // `Url::join` would keep the foreign scheme; anchor it as a path.
        Ok(_) => format!("./{}", reference),
        Err(_) => reference.to_string(),
    };
    match base {
        Some(base) => absolute(base, &relative),
        None => Err(IcsError::InvalidUrl(format!(
            "relative URL '{}' needs a request to resolve against",
            reference
        ))),
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.has_host()
}
