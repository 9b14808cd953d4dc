//! Plain-text HTTP/1.1 codec for the LAN word proxy.
//!
//! `POST /word` answers with a five-letter word, `POST /check` takes the
//! lowercase guess as its body and answers with a verdict over `+x-`.

use core::fmt::{self, Write};

use heapless::String;
use wordseek_core::{
    board::{WORD_LEN, Word},
    service::{VERDICT_ABSENT, VERDICT_CORRECT, VERDICT_MISPLACED, Verdict},
};

pub const MAX_REQUEST_BYTES: usize = 256;
pub const MAX_RESPONSE_BYTES: usize = 512;

pub const WORD_PATH: &str = "/word";
pub const CHECK_PATH: &str = "/check";

pub type Request = String<MAX_REQUEST_BYTES>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApiError {
    RequestTooLarge,
    /// Header block not terminated yet.
    Incomplete,
    BadStatusLine,
    Status(u16),
    BadBody,
    Transport,
    Timeout,
    Offline,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestTooLarge => write!(f, "request too large"),
            ApiError::Incomplete => write!(f, "incomplete response"),
            ApiError::BadStatusLine => write!(f, "bad status line"),
            ApiError::Status(code) => write!(f, "http status {code}"),
            ApiError::BadBody => write!(f, "bad body"),
            ApiError::Transport => write!(f, "transport error"),
            ApiError::Timeout => write!(f, "timed out"),
            ApiError::Offline => write!(f, "offline"),
        }
    }
}

/// Where the proxy lives and how to authenticate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Endpoint {
    pub host: &'static str,
    pub api_key: &'static str,
}

pub fn build_fetch_request(endpoint: &Endpoint) -> Result<Request, ApiError> {
    build_request(endpoint, WORD_PATH, "")
}

pub fn build_check_request(endpoint: &Endpoint, guess: &str) -> Result<Request, ApiError> {
    build_request(endpoint, CHECK_PATH, guess)
}

fn build_request(endpoint: &Endpoint, path: &str, body: &str) -> Result<Request, ApiError> {
    let mut request = Request::new();
    write!(
        request,
        "POST {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         X-Api-Key: {key}\r\n\
         Content-Type: text/plain\r\n\
         Content-Length: {len}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        host = endpoint.host,
        key = endpoint.api_key,
        len = body.len(),
    )
    .map_err(|_| ApiError::RequestTooLarge)?;
    Ok(request)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Response<'a> {
    pub status: u16,
    pub body: &'a str,
}

/// Splits a raw response into status and body. Non-2xx statuses are errors.
pub fn parse_response(raw: &[u8]) -> Result<Response<'_>, ApiError> {
    let header_end = find(raw, b"\r\n\r\n").ok_or(ApiError::Incomplete)?;
    let head = core::str::from_utf8(&raw[..header_end]).map_err(|_| ApiError::BadStatusLine)?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().ok_or(ApiError::BadStatusLine)?;
    let mut parts = status_line.split(' ');
    let version = parts.next().ok_or(ApiError::BadStatusLine)?;
    if !version.starts_with("HTTP/1.") {
        return Err(ApiError::BadStatusLine);
    }
    let status = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or(ApiError::BadStatusLine)?;

    let content_length = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    });

    let mut body = &raw[header_end + 4..];
    if let Some(length) = content_length {
        body = body.get(..length).ok_or(ApiError::Incomplete)?;
    }

    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }

    let body = core::str::from_utf8(body).map_err(|_| ApiError::BadBody)?;
    Ok(Response { status, body })
}

/// Five ASCII letters, surrounding whitespace ignored.
pub fn parse_word(body: &str) -> Result<Word, ApiError> {
    let word = body.trim();
    if word.len() != WORD_LEN || !word.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return Err(ApiError::BadBody);
    }
    Word::try_from(word).map_err(|_| ApiError::BadBody)
}

/// Five marks over `+`, `x` and `-`.
pub fn parse_verdict(body: &str) -> Result<Verdict, ApiError> {
    let verdict = body.trim();
    let valid = verdict.len() == WORD_LEN
        && verdict
            .chars()
            .all(|mark| matches!(mark, VERDICT_CORRECT | VERDICT_MISPLACED | VERDICT_ABSENT));
    if !valid {
        return Err(ApiError::BadBody);
    }
    Verdict::try_from(verdict).map_err(|_| ApiError::BadBody)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: Endpoint = Endpoint {
        host: "192.168.1.20:8080",
        api_key: "secret",
    };

    #[test]
    fn check_request_carries_guess_body() {
        let request = build_check_request(&ENDPOINT, "hello").unwrap();
        assert!(request.starts_with("POST /check HTTP/1.1\r\n"));
        assert!(request.contains("Host: 192.168.1.20:8080\r\n"));
        assert!(request.contains("X-Api-Key: secret\r\n"));
        assert!(request.contains("Content-Length: 5\r\n"));
        assert!(request.ends_with("\r\n\r\nhello"));
    }

    #[test]
    fn fetch_request_has_empty_body() {
        let request = build_fetch_request(&ENDPOINT).unwrap();
        assert!(request.starts_with("POST /word HTTP/1.1\r\n"));
        assert!(request.ends_with("Content-Length: 0\r\nConnection: close\r\n\r\n"));
    }

    #[test]
    fn oversized_request_is_rejected() {
        let long_key = Endpoint {
            api_key: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\
                      0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\
                      0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
            ..ENDPOINT
        };
        assert_eq!(build_fetch_request(&long_key), Err(ApiError::RequestTooLarge));
    }

    #[test]
    fn response_body_respects_content_length() {
        let raw = b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\ncranetrailing";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "crane");
        assert_eq!(parse_word(response.body).unwrap().as_str(), "crane");
    }

    #[test]
    fn response_errors() {
        assert_eq!(parse_response(b"HTTP/1.1 200 OK\r\n"), Err(ApiError::Incomplete));
        assert_eq!(
            parse_response(b"SPDY 200 OK\r\n\r\n"),
            Err(ApiError::BadStatusLine)
        );
        assert_eq!(
            parse_response(b"HTTP/1.1 503 Busy\r\n\r\n"),
            Err(ApiError::Status(503))
        );
        assert_eq!(
            parse_response(b"HTTP/1.1 200 OK\r\nContent-Length: 9\r\n\r\nabc"),
            Err(ApiError::Incomplete)
        );
    }

    #[test]
    fn word_and_verdict_bodies_are_validated() {
        assert_eq!(parse_word(" Crane\n").unwrap().as_str(), "Crane");
        assert_eq!(parse_word("cr4ne"), Err(ApiError::BadBody));
        assert_eq!(parse_word("cranes"), Err(ApiError::BadBody));

        assert_eq!(parse_verdict("+-x--\r\n").unwrap().as_str(), "+-x--");
        assert_eq!(parse_verdict("+-?--"), Err(ApiError::BadBody));
        assert_eq!(parse_verdict("+-"), Err(ApiError::BadBody));
    }
}
