use std::fmt;
use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

// ==============================================================================
// Endpoint
// ==============================================================================

/// Node address plus per-wallet URL routing.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Build the endpoint for `http://<addr>`.
    ///
    /// `addr` is `host[:port]` without a scheme, matching what Bitcoin Core
    /// calls `rpcconnect`/`rpcport`.
    pub fn parse(addr: &str) -> Result<Self, CoreError> {
        let addr = addr.trim();
        if addr.is_empty() {
            return Err(CoreError::InvalidConfig(
                "rpc address must not be empty".to_owned(),
            ));
        }
        if addr.contains("://") {
            return Err(CoreError::InvalidConfig(format!(
                "rpc address `{addr}` must be host[:port] without a scheme"
            )));
        }

        let base = Url::parse(&format!("http://{addr}")).map_err(|e| {
            CoreError::InvalidConfig(format!("invalid rpc address `{addr}`: {e}"))
        })?;
        Ok(Self { base })
    }

    /// URL to POST to. A non-empty `wallet` routes the call to
    /// `/wallet/<wallet>` on the same node.
    pub fn url_for(&self, wallet: &str) -> Url {
        let mut url = self.base.clone();
        if wallet.is_empty() {
            return url;
        }
        // Only cannot-be-a-base URLs refuse segments, and ours is always http.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("wallet").push(wallet);
        }
        url
    }
}

// ==============================================================================
// Credentials
// ==============================================================================

/// HTTP basic-auth credentials for the node.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    pass: String,
}

impl Credentials {
    /// Returns `None` unless both `user` and `pass` are non-empty. A half
    /// configured pair disables auth instead of failing.
    pub fn new(user: &str, pass: &str) -> Option<Self> {
        if user.is_empty() || pass.is_empty() {
            return None;
        }
        Some(Self {
            user: user.to_owned(),
            pass: pass.to_owned(),
        })
    }

    /// Read credentials from a Bitcoin Core `.cookie` file
    /// (`username:password` on the first line).
    pub fn from_cookie_file(cookie_file: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(cookie_file).map_err(|e| {
            CoreError::InvalidConfig(format!(
                "failed to read rpc cookie file {}: {e}",
                cookie_file.display()
            ))
        })?;
        let line = content
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "rpc cookie file {} is empty",
                    cookie_file.display()
                ))
            })?;

        let (user, pass) = line.split_once(':').ok_or_else(|| {
            CoreError::InvalidConfig(format!(
                "rpc cookie file {} must contain `username:password`",
                cookie_file.display()
            ))
        })?;

        Self::new(user, pass).ok_or_else(|| {
            CoreError::InvalidConfig(format!(
                "rpc cookie file {} must contain non-empty `username:password`",
                cookie_file.display()
            ))
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub(crate) fn pass(&self) -> &str {
        &self.pass
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}
