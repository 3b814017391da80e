use crate::error::{Error, Result};

/// URL schemes the viewer knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    File,
}

impl Scheme {
    fn default_port(&self) -> i32 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
            Scheme::File => -1,
        }
    }
}

/// A parsed absolute URL. Immutable once constructed.
///
/// For network schemes `path` always starts with `/`. For `file` URLs the
/// port is the `-1` sentinel, the host is empty, and the path is carried
/// byte-for-byte as written (backslashes, embedded `://` and all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Scheme,
    pub host: String,
    pub port: i32,
    pub path: String,
}

impl ParsedUrl {
    /// Parse an absolute URL by sequential splits.
    ///
    /// First `://` separates the scheme; the first `/` of the remainder
    /// separates authority from path; the first `:` of the authority
    /// separates host from an explicit port, which must be an integer in
    /// `1..=65535`. Query strings and fragments are part of the path and
    /// pass through untouched.
    pub fn parse(url: &str) -> Result<ParsedUrl> {
        let (scheme_str, rest) = url
            .split_once("://")
            .ok_or_else(|| Error::UnsupportedScheme(url.to_string()))?;

        let scheme = match scheme_str {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "file" => Scheme::File,
            other => return Err(Error::UnsupportedScheme(other.to_string())),
        };

        let (authority, tail) = match rest.split_once('/') {
            Some((authority, tail)) => (authority, Some(tail)),
            None => (rest, None),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port_str)) => {
                // An explicit port must fit the TCP range; anything else
                // would truncate on connect instead of failing here.
                let port: i32 = port_str
                    .parse()
                    .ok()
                    .filter(|p| (1..=65535).contains(p))
                    .ok_or_else(|| Error::InvalidPort(port_str.to_string()))?;
                (host, port)
            }
            None => (authority, scheme.default_port()),
        };

        // The leading slash was consumed by the authority split; restore it
        // exactly once for network schemes. File paths are opaque.
        if scheme == Scheme::File {
            return Ok(ParsedUrl {
                scheme,
                host: String::new(),
                port: -1,
                path: tail.unwrap_or("").to_string(),
            });
        }

        Ok(ParsedUrl {
            scheme,
            host: host.to_string(),
            port,
            path: format!("/{}", tail.unwrap_or("")),
        })
    }
}
