use std::str::FromStr;

use compact_str::CompactString;
use strum::{EnumString, IntoStaticStr};

use crate::domain::errors::ConnectionError;

/// The methods this server gives meaning to. Anything else is answered with 501.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum Method {
    GET,
    HEAD,
    DELETE,
}

impl Method {
    /// `GET` matches anywhere inside the token (`xGETx` is a GET), the others
    /// must match exactly and case-sensitively.
    pub fn classify(token: &str) -> Option<Self> {
        if token.contains("GET") {
            return Some(Self::GET);
        }
        Self::from_str(token).ok()
    }
}

/// A request line as read off the socket, already split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub line: String,
    pub method: CompactString,
    pub target: CompactString,
}

impl Request {
    /// Splits on single spaces and keeps the first two pieces; the protocol
    /// version and anything after it are ignored. Runs of spaces yield empty
    /// pieces (`GET  /a` has an empty target), trailing spaces yield none, and
    /// tabs are not separators.
    pub fn parse(line: &str) -> Result<Self, ConnectionError> {
        let mut tokens = line.trim_end_matches(' ').split(' ');
        let (Some(method), Some(target)) = (tokens.next(), tokens.next()) else {
            return Err(ConnectionError::MalformedRequest { line: line.into() });
        };

        Ok(Self {
            line: line.to_owned(),
            method: method.into(),
            target: target.into(),
        })
    }

    pub fn method(&self) -> Option<Method> {
        Method::classify(&self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_full_line() {
        let request = Request::parse("GET /index.html HTTP/1.1").unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/index.html");
        assert_eq!(request.line, "GET /index.html HTTP/1.1");
        assert_eq!(request.method(), Some(Method::GET));
    }

    #[test]
    fn success_without_version() {
        let request = Request::parse("HEAD /a.png").unwrap();
        assert_eq!(request.target, "/a.png");
        assert_eq!(request.method(), Some(Method::HEAD));
    }

    #[test]
    fn failure_single_token() {
        for line in ["", "GET", "GET   ", "   "] {
            match Request::parse(line) {
                Err(ConnectionError::MalformedRequest { line: raw }) => assert_eq!(raw, line),
                other => panic!("expected malformed request for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn doubled_space_gives_empty_target() {
        let request = Request::parse("GET  /index.html HTTP/1.1").unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "");
    }

    #[test]
    fn leading_space_gives_empty_method() {
        let request = Request::parse(" GET /index.html").unwrap();
        assert_eq!(request.method, "");
        assert_eq!(request.target, "GET");
        assert_eq!(request.method(), None);
    }

    #[test]
    fn failure_tab_is_not_a_separator() {
        assert!(matches!(
            Request::parse("GET\t/index.html"),
            Err(ConnectionError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn get_is_matched_loosely() {
        assert_eq!(Method::classify("GET"), Some(Method::GET));
        assert_eq!(Method::classify("FORGET"), Some(Method::GET));
        assert_eq!(Method::classify("GETS"), Some(Method::GET));
        assert_eq!(Method::classify("get"), None);
    }

    #[test]
    fn head_and_delete_are_matched_exactly() {
        assert_eq!(Method::classify("HEAD"), Some(Method::HEAD));
        assert_eq!(Method::classify("DELETE"), Some(Method::DELETE));
        assert_eq!(Method::classify("HEADER"), None);
        assert_eq!(Method::classify("delete"), None);
        assert_eq!(Method::classify("POST"), None);
    }
}
