use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

/// Details written into [`ErrorResponse::details`] when a non-2xx body is not the
/// expected `{errorCode, details}` JSON.
pub const UNPARSEABLE_DETAILS: &str = "could not parse json from response";

#[non_exhaustive]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A certificate or key file could not be read.
    File,
    /// The CA bundle or the client identity could not be parsed.
    Certificate,
    /// A caller-supplied value such as the base URL is unusable.
    Validation,
    /// The request payload could not be encoded as JSON.
    Serialization,
    /// Network or TLS failure, including timeouts.
    Transport,
    /// The service answered with a status outside 200-299.
    Service,
    /// A successful response body did not match the expected shape.
    Decode,
    /// The HTTP client could not be constructed.
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    /// The structured service error, if this is a [`Kind::Service`] error.
    #[must_use]
    pub fn service(&self) -> Option<&ErrorResponse> {
        if self.kind == Kind::Service {
            self.downcast_ref::<ErrorResponse>()
        } else {
            None
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::with_source(Kind::Validation, Message(message.into()))
    }

    pub fn certificate<S: Into<String>>(message: S) -> Self {
        Self::with_source(Kind::Certificate, Message(message.into()))
    }

    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::with_source(
            Kind::File,
            FileError {
                path: path.to_path_buf(),
                source,
            },
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<ErrorResponse> for Error {
    fn from(e: ErrorResponse) -> Self {
        Error::with_source(Kind::Service, e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_builder() {
            Kind::Internal
        } else {
            Kind::Transport
        };
        Error::with_source(kind, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

#[derive(Debug)]
struct FileError {
    path: PathBuf,
    source: std::io::Error,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.path.display(), self.source)
    }
}

impl StdError for FileError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// Error reported by the service for any response outside 200-299.
///
/// Callers are expected to branch on [`ErrorResponse::error_code`], e.g.
/// `invalidParameters`, `alreadyInProgress` or `notFound`.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub error_code: String,
    pub details: String,
}

impl ErrorResponse {
    /// Builds the error from a non-2xx response body.
    ///
    /// Fields of an `{errorCode, details}` body that decode are kept. A body that is not a
    /// JSON object, or has a field of the wrong type, gets [`UNPARSEABLE_DETAILS`] as its
    /// details.
    #[must_use]
    pub fn from_body(status_code: StatusCode, method: Method, path: String, body: &[u8]) -> Self {
        let fields = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| match value {
                Value::Object(fields) => Some(fields),
                _ => None,
            });

        let (error_code, details) = match fields {
            Some(fields) => {
                let error_code = string_field(&fields, "errorCode");
                let details = string_field(&fields, "details");
                let details = match (&error_code, details) {
                    (Ok(_), Ok(details)) => details,
                    _ => UNPARSEABLE_DETAILS.to_owned(),
                };
                (error_code.unwrap_or_default(), details)
            }
            None => (String::new(), UNPARSEABLE_DETAILS.to_owned()),
        };

        Self {
            status_code,
            method,
            path,
            error_code,
            details,
        }
    }
}

/// A missing field decodes as empty; a non-string one is an error.
fn string_field(fields: &Map<String, Value>, name: &str) -> std::result::Result<String, ()> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(()),
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {} {}",
            self.method, self.path, self.status_code, self.error_code, self.details
        )
    }
}

impl StdError for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_body_should_be_decoded() {
        let e = ErrorResponse::from_body(
            StatusCode::BAD_REQUEST,
            Method::POST,
            "/auth".to_owned(),
            br#"{"errorCode":"invalidParameters","details":"Invalid endUserIp"}"#,
        );

        assert_eq!(e.error_code, "invalidParameters");
        assert_eq!(e.details, "Invalid endUserIp");
        assert_eq!(
            e.to_string(),
            "POST /auth: 400 Bad Request invalidParameters Invalid endUserIp"
        );
    }

    #[test]
    fn unparseable_body_should_use_sentinel_details() {
        let e = ErrorResponse::from_body(
            StatusCode::SERVICE_UNAVAILABLE,
            Method::POST,
            "/collect".to_owned(),
            b"<html>maintenance</html>",
        );

        assert_eq!(e.status_code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.error_code, "");
        assert_eq!(e.details, UNPARSEABLE_DETAILS);
    }

    #[test]
    fn service_accessor_should_only_match_service_kind() {
        let e: Error = ErrorResponse::from_body(
            StatusCode::CONFLICT,
            Method::POST,
            "/sign".to_owned(),
            br#"{"errorCode":"alreadyInProgress","details":"Order already in progress"}"#,
        )
        .into();

        assert_eq!(e.kind(), Kind::Service);
        assert_eq!(
            e.service().map(|s| s.error_code.as_str()),
            Some("alreadyInProgress")
        );

        let e = Error::validation("bad url");
        assert_eq!(e.kind(), Kind::Validation);
        assert!(e.service().is_none(), "validation error has no service payload");
    }

    #[test]
    fn mistyped_details_should_keep_error_code() {
        let e = ErrorResponse::from_body(
            StatusCode::BAD_REQUEST,
            Method::POST,
            "/auth".to_owned(),
            br#"{"errorCode":"invalidParameters","details":{"field":"endUserIp"}}"#,
        );

        assert_eq!(e.error_code, "invalidParameters");
        assert_eq!(e.details, UNPARSEABLE_DETAILS);
    }

    #[test]
    fn mistyped_error_code_should_use_sentinel_details() {
        let e = ErrorResponse::from_body(
            StatusCode::BAD_REQUEST,
            Method::POST,
            "/auth".to_owned(),
            br#"{"errorCode":400,"details":"Invalid endUserIp"}"#,
        );

        assert_eq!(e.error_code, "");
        assert_eq!(e.details, UNPARSEABLE_DETAILS);
    }
}
