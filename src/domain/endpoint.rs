//! Published service addresses.
//!
//! docker-compose reports the address a container port is *bound* to, which
//! is frequently the wildcard address. A wildcard is fine for listening but
//! cannot be dialed, so every [`Endpoint`] is turned into a
//! [`ConnectAddress`] before a URL is built from it.

use std::fmt;

use url::Url;

use crate::error::ReadinessError;

/// IPv4 wildcard bind host.
pub const WILDCARD_V4: &str = "0.0.0.0";
/// IPv4 loopback host used in place of [`WILDCARD_V4`].
pub const LOOPBACK_V4: &str = "127.0.0.1";
/// IPv6 wildcard bind host, bracketed.
pub const WILDCARD_V6: &str = "[::]";
/// IPv6 loopback host used in place of [`WILDCARD_V6`].
pub const LOOPBACK_V6: &str = "[::1]";

/// A resolved bind address (`host:port`) as published by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Parse the raw output of a port query.
    ///
    /// Only the first non-empty line is considered; newer compose releases
    /// print one line per address family. IPv6 hosts printed without
    /// brackets (`:::8088`) are bracketed.
    ///
    /// # Errors
    ///
    /// Returns [`ReadinessError::EmptyAddress`] when the output holds no
    /// address at all and [`ReadinessError::InvalidAddress`] when the line is
    /// not a `host:port` pair with a non-zero port.
    pub fn parse(raw: &str) -> Result<Self, ReadinessError> {
        let line = raw
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(ReadinessError::EmptyAddress)?;

        let invalid = |reason: &str| ReadinessError::InvalidAddress {
            address: line.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = line.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
        let port: u16 = port.parse().map_err(|_| invalid("port is not a number"))?;
        if port == 0 {
            return Err(invalid("port is not published"));
        }
        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        Ok(Self { host, port })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// True when the host is a wildcard bind address.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.host == WILDCARD_V4 || self.host == WILDCARD_V6
    }

    /// Rewrite the bind address into one a local client can dial.
    #[must_use]
    pub fn connect_address(&self) -> ConnectAddress {
        let host = match self.host.as_str() {
            WILDCARD_V4 => LOOPBACK_V4.to_string(),
            WILDCARD_V6 => LOOPBACK_V6.to_string(),
            other => other.to_string(),
        };
        ConnectAddress {
            host,
            port: self.port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A client-usable address derived from an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectAddress {
    host: String,
    port: u16,
}

impl ConnectAddress {
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Build the `http://` URL used to probe and open the service.
    ///
    /// # Errors
    ///
    /// Returns [`ReadinessError::InvalidAddress`] if the host cannot appear
    /// in a URL.
    pub fn url(&self) -> Result<Url, ReadinessError> {
        Url::parse(&format!("http://{self}")).map_err(|e| ReadinessError::InvalidAddress {
            address: self.to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for ConnectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
