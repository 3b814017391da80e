use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::net::url::{ParsedUrl, Scheme};

const USER_AGENT: &str = concat!("monoview/", env!("CARGO_PKG_VERSION"));

/// A fully received HTTP response.
///
/// Header names are stored lower-cased with surrounding whitespace trimmed
/// from values; a repeated header name keeps only its last occurrence.
/// Constructed only after a `200` status line has been observed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Blocking HTTP/1.1 client over plain TCP or rustls.
///
/// The TLS client configuration (root trust store) is built once at
/// construction and shared by every `https` fetch. Each call to [`fetch`]
/// owns its connection for the duration of the call only; the socket and
/// TLS session are dropped on every exit path, success or error.
///
/// [`fetch`]: HttpClient::fetch
pub struct HttpClient {
    tls: Arc<rustls::ClientConfig>,
}

impl HttpClient {
    pub fn new() -> Self {
        rustls::crypto::aws_lc_rs::default_provider()
            .install_default()
            .ok();

        let roots = rustls::RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.into(),
        };
        let config = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        Self {
            tls: Arc::new(config),
        }
    }

    /// Perform a single unencoded `GET` and read the response to
    /// connection close.
    ///
    /// Caller-supplied headers are sent alongside the mandatory `Host`,
    /// `Connection: close` and `User-Agent` headers; the mandatory values
    /// win on collision. Any status other than exactly `200` fails with
    /// [`Error::HttpStatus`]. `file` URLs never reach the transport and are
    /// rejected here.
    pub fn fetch(
        &self,
        url: &str,
        extra_headers: &BTreeMap<String, String>,
    ) -> Result<HttpResponse> {
        let target = ParsedUrl::parse(url)?;
        if target.scheme == Scheme::File {
            return Err(Error::UnsupportedScheme("file".to_string()));
        }

        let headers = merge_headers(extra_headers, &target.host);
        let request = build_request(&target.path, &headers);
        log::debug!("GET {}:{}{}", target.host, target.port, target.path);

        let stream = TcpStream::connect((target.host.as_str(), target.port as u16))
            .map_err(Error::Connection)?;

        let response = match target.scheme {
            Scheme::Https => {
                let server_name =
                    rustls::pki_types::ServerName::try_from(target.host.clone())
                        .map_err(|e| Error::Tls(e.to_string()))?;
                let conn =
                    rustls::ClientConnection::new(Arc::clone(&self.tls), server_name)
                        .map_err(|e| Error::Tls(e.to_string()))?;
                let mut tls = rustls::StreamOwned::new(conn, stream);
                tls.write_all(request.as_bytes()).map_err(map_tls_io)?;
                read_response(&mut BufReader::new(tls))
            }
            _ => {
                let mut stream = stream;
                stream
                    .write_all(request.as_bytes())
                    .map_err(Error::Connection)?;
                read_response(&mut BufReader::new(stream))
            }
        }?;

        log::debug!(
            "response: {} headers, {} body bytes",
            response.headers.len(),
            response.body.len()
        );
        Ok(response)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay the mandatory request headers on top of caller-supplied ones.
fn merge_headers(
    extra: &BTreeMap<String, String>,
    host: &str,
) -> BTreeMap<String, String> {
    let mut headers = extra.clone();
    headers.insert("Host".to_string(), host.to_string());
    headers.insert("Connection".to_string(), "close".to_string());
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    headers
}

/// Serialize the request: request line, one line per header, blank line.
/// No request body is ever sent.
fn build_request(path: &str, headers: &BTreeMap<String, String>) -> String {
    let mut request = format!("GET {path} HTTP/1.1\r\n");
    for (name, value) in headers {
        request.push_str(name);
        request.push_str(": ");
        request.push_str(value);
        request.push_str("\r\n");
    }
    request.push_str("\r\n");
    request
}

/// Parse a status line, header block and body off a buffered stream.
///
/// The body is everything up to connection close; `Content-Length` and
/// transfer encodings are deliberately ignored, which is sound only because
/// every request forces `Connection: close`.
fn read_response<R: BufRead>(reader: &mut R) -> Result<HttpResponse> {
    let status_line = read_crlf_line(reader)?;
    let mut fields = status_line.splitn(3, ' ');
    let version = fields.next().unwrap_or("");
    let status = fields.next().unwrap_or("");
    let reason = fields.next().unwrap_or("");
    if version.is_empty() || status.is_empty() {
        return Err(Error::MalformedResponse(format!(
            "bad status line: {status_line:?}"
        )));
    }
    if status != "200" {
        return Err(Error::HttpStatus {
            status: status.to_string(),
            reason: reason.to_string(),
        });
    }

    let mut headers = BTreeMap::new();
    loop {
        let line = read_crlf_line(reader)?;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::MalformedResponse(format!("bad header line: {line:?}")))?;
        headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
    }

    let body = read_body(reader)?;
    Ok(HttpResponse { headers, body })
}

/// Buffered read-until-delimiter with a `\r\n` terminator.
///
/// Returns the line without its terminator. A bare `\n` is tolerated and
/// stripped the same way; servers that skip the `\r` are common enough
/// that rejecting them buys nothing. EOF before any byte is an error: the
/// status line and header block must be complete.
fn read_crlf_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).map_err(map_tls_io)?;
    if n == 0 {
        return Err(Error::MalformedResponse(
            "connection closed before end of headers".to_string(),
        ));
    }
    if buf.ends_with(b"\r\n") {
        buf.truncate(buf.len() - 2);
    } else if buf.ends_with(b"\n") {
        buf.truncate(buf.len() - 1);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Drain the remaining stream as the response body.
///
/// A server that drops the link without a TLS close_notify surfaces as
/// `UnexpectedEof`; everything read so far is still the body.
fn read_body<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::new();
    match reader.read_to_end(&mut raw) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {}
        Err(e) => return Err(map_tls_io(e)),
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// rustls reports handshake and certificate failures as `InvalidData` I/O
/// errors on the first read or write; everything else is transport trouble.
fn map_tls_io(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::InvalidData {
        Error::Tls(e.to_string())
    } else {
        Error::Connection(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(raw: &str) -> Result<HttpResponse> {
        read_response(&mut Cursor::new(raw.as_bytes().to_vec()))
    }

    #[test]
    fn request_wire_format() {
        let headers = merge_headers(&BTreeMap::new(), "example.org");
        let request = build_request("/index.html", &headers);
        assert_eq!(
            request,
            format!(
                "GET /index.html HTTP/1.1\r\n\
                 Connection: close\r\n\
                 Host: example.org\r\n\
                 User-Agent: {USER_AGENT}\r\n\
                 \r\n"
            )
        );
    }

    #[test]
    fn mandatory_headers_overwrite_caller_values() {
        let mut extra = BTreeMap::new();
        extra.insert("Connection".to_string(), "keep-alive".to_string());
        extra.insert("Accept".to_string(), "text/html".to_string());
        let headers = merge_headers(&extra, "example.org");
        assert_eq!(headers["Connection"], "close");
        assert_eq!(headers["Accept"], "text/html");
        assert_eq!(headers["Host"], "example.org");
    }

    #[test]
    fn parses_success_response() {
        let resp = parse(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             X-Custom:   padded value  \r\n\
             \r\n\
             hello body",
        )
        .unwrap();
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.headers["x-custom"], "padded value");
        assert_eq!(resp.body, "hello body");
    }

    #[test]
    fn header_names_lowercased_last_wins() {
        let resp = parse(
            "HTTP/1.1 200 OK\r\n\
             Set-Thing: first\r\n\
             SET-THING: second\r\n\
             \r\n",
        )
        .unwrap();
        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.headers["set-thing"], "second");
    }

    #[test]
    fn body_reads_to_stream_end_ignoring_content_length() {
        let resp = parse(
            "HTTP/1.1 200 OK\r\n\
             Content-Length: 2\r\n\
             \r\n\
             much longer than two bytes",
        )
        .unwrap();
        assert_eq!(resp.body, "much longer than two bytes");
    }

    #[test]
    fn non_200_status_is_an_error() {
        let err = parse("HTTP/1.1 404 Not Found\r\n\r\n").unwrap_err();
        match err {
            Error::HttpStatus { status, reason } => {
                assert_eq!(status, "404");
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn redirects_are_not_followed() {
        // Strict equality with "200": even the 2xx/3xx family is rejected.
        assert!(matches!(
            parse("HTTP/1.1 204 No Content\r\n\r\n"),
            Err(Error::HttpStatus { .. })
        ));
        assert!(matches!(
            parse("HTTP/1.1 301 Moved Permanently\r\n\r\n"),
            Err(Error::HttpStatus { .. })
        ));
    }

    #[test]
    fn reason_phrase_keeps_its_spaces() {
        let err = parse("HTTP/1.1 503 Service Unavailable Today\r\n\r\n").unwrap_err();
        match err {
            Error::HttpStatus { reason, .. } => {
                assert_eq!(reason, "Service Unavailable Today");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn bare_lf_terminators_are_tolerated() {
        let resp = parse(
            "HTTP/1.1 200 OK\n\
             Content-Type: text/plain\n\
             \n\
             body",
        )
        .unwrap();
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.body, "body");
    }

    #[test]
    fn header_without_colon_is_malformed() {
        let err = parse(
            "HTTP/1.1 200 OK\r\n\
             this line has no colon\r\n\
             \r\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn truncated_header_block_is_malformed() {
        let err = parse("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn empty_body_is_fine() {
        let resp = parse("HTTP/1.1 200 OK\r\n\r\n").unwrap();
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, "");
    }
}
