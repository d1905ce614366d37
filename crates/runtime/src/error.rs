//! Error taxonomy for the WebDriver runtime.
//!
//! Failures arrive on the wire as error-code strings inside the error
//! envelope. [`ResultCode::from_wire`] maps that open string space onto the
//! closed result-code vocabulary (total: unknown codes land in the
//! unsupported-operation bucket and lookup never fails), and
//! [`Error::from_response`] selects exactly one typed failure per result
//! code, preserving the server's message verbatim.

use crate::response::Response;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result codes: one per wire error-code string, plus success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    ElementClickIntercepted,
    ElementNotInteractable,
    InsecureCertificate,
    InvalidArgument,
    InvalidCookieDomain,
    InvalidCoordinates,
    InvalidElementState,
    InvalidSelector,
    InvalidSessionId,
    JavascriptError,
    MoveTargetOutOfBounds,
    NoSuchAlert,
    NoSuchCookie,
    NoSuchElement,
    NoSuchFrame,
    NoSuchShadowRoot,
    NoSuchWindow,
    ScriptTimeout,
    SessionNotCreated,
    StaleElementReference,
    DetachedShadowRoot,
    Timeout,
    UnableToSetCookie,
    UnableToCaptureScreen,
    UnexpectedAlertOpen,
    UnknownCommand,
    UnknownError,
    UnknownMethod,
    UnsupportedOperation,
}

impl ResultCode {
    /// Maps a wire error-code string to its result code.
    ///
    /// Total over all strings: codes outside the fixed vocabulary fall into
    /// the [`ResultCode::UnsupportedOperation`] bucket rather than failing.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "element click intercepted" => ResultCode::ElementClickIntercepted,
            "element not interactable" => ResultCode::ElementNotInteractable,
            "insecure certificate" => ResultCode::InsecureCertificate,
            "invalid argument" => ResultCode::InvalidArgument,
            "invalid cookie domain" => ResultCode::InvalidCookieDomain,
            "invalid coordinates" => ResultCode::InvalidCoordinates,
            "invalid element state" => ResultCode::InvalidElementState,
            "invalid selector" => ResultCode::InvalidSelector,
            "invalid session id" => ResultCode::InvalidSessionId,
            "javascript error" => ResultCode::JavascriptError,
            "move target out of bounds" => ResultCode::MoveTargetOutOfBounds,
            "no such alert" => ResultCode::NoSuchAlert,
            "no such cookie" => ResultCode::NoSuchCookie,
            "no such element" => ResultCode::NoSuchElement,
            "no such frame" => ResultCode::NoSuchFrame,
            "no such shadow root" => ResultCode::NoSuchShadowRoot,
            "no such window" => ResultCode::NoSuchWindow,
            "script timeout" => ResultCode::ScriptTimeout,
            "session not created" => ResultCode::SessionNotCreated,
            "stale element reference" => ResultCode::StaleElementReference,
            "detached shadow root" => ResultCode::DetachedShadowRoot,
            "timeout" => ResultCode::Timeout,
            "unable to set cookie" => ResultCode::UnableToSetCookie,
            "unable to capture screen" => ResultCode::UnableToCaptureScreen,
            "unexpected alert open" => ResultCode::UnexpectedAlertOpen,
            "unknown command" => ResultCode::UnknownCommand,
            "unknown error" => ResultCode::UnknownError,
            "unknown method" => ResultCode::UnknownMethod,
            _ => ResultCode::UnsupportedOperation,
        }
    }
}

/// One frame of a remote stack trace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackFrame {
    pub class_name: Option<String>,
    pub method_name: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<i64>,
}

/// Optional diagnostics attached to a remote failure.
#[derive(Debug, Clone, Default)]
pub struct ErrorData {
    /// Screenshot taken at the time of failure, decoded from base64.
    pub screen: Option<Vec<u8>>,
    /// Remote exception class name, if reported.
    pub class: Option<String>,
    /// Remote stack frames, if reported.
    pub stacktrace: Vec<StackFrame>,
}

impl ErrorData {
    /// Pulls the optional diagnostics out of an error payload.
    fn from_value(value: &Value) -> Self {
        let screen = value
            .get("screen")
            .and_then(Value::as_str)
            .and_then(|s| base64::engine::general_purpose::STANDARD.decode(s).ok());
        let class = value
            .get("class")
            .and_then(Value::as_str)
            .map(str::to_string);
        let stacktrace = value
            .get("stackTrace")
            .and_then(Value::as_array)
            .map(|frames| {
                frames
                    .iter()
                    .filter_map(|frame| serde_json::from_value(frame.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            screen,
            class,
            stacktrace,
        }
    }
}

/// Errors surfaced by the WebDriver runtime.
///
/// Every failure-bearing result code has exactly one variant here; each
/// carries the server's message verbatim plus any optional diagnostics.
/// The remaining variants cover transport and decoding failures so that
/// callers see a single uniform failure channel.
#[derive(Debug, Error)]
pub enum Error {
    #[error("element click intercepted: {message}")]
    ElementClickIntercepted { message: String, data: ErrorData },

    #[error("element not interactable: {message}")]
    ElementNotInteractable { message: String, data: ErrorData },

    #[error("insecure certificate: {message}")]
    InsecureCertificate { message: String, data: ErrorData },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String, data: ErrorData },

    #[error("invalid cookie domain: {message}")]
    InvalidCookieDomain { message: String, data: ErrorData },

    #[error("invalid coordinates: {message}")]
    InvalidCoordinates { message: String, data: ErrorData },

    #[error("invalid element state: {message}")]
    InvalidElementState { message: String, data: ErrorData },

    #[error("invalid selector: {message}")]
    InvalidSelector { message: String, data: ErrorData },

    #[error("invalid session id: {message}")]
    InvalidSessionId { message: String, data: ErrorData },

    #[error("javascript error: {message}")]
    JavascriptError { message: String, data: ErrorData },

    #[error("move target out of bounds: {message}")]
    MoveTargetOutOfBounds { message: String, data: ErrorData },

    #[error("no such alert: {message}")]
    NoSuchAlert { message: String, data: ErrorData },

    #[error("no such cookie: {message}")]
    NoSuchCookie { message: String, data: ErrorData },

    #[error("no such element: {message}")]
    NoSuchElement { message: String, data: ErrorData },

    #[error("no such frame: {message}")]
    NoSuchFrame { message: String, data: ErrorData },

    #[error("no such shadow root: {message}")]
    NoSuchShadowRoot { message: String, data: ErrorData },

    #[error("no such window: {message}")]
    NoSuchWindow { message: String, data: ErrorData },

    #[error("script timeout: {message}")]
    ScriptTimeout { message: String, data: ErrorData },

    #[error("session not created: {message}")]
    SessionNotCreated { message: String, data: ErrorData },

    #[error("stale element reference: {message}")]
    StaleElementReference { message: String, data: ErrorData },

    #[error("detached shadow root: {message}")]
    DetachedShadowRoot { message: String, data: ErrorData },

    #[error("timeout: {message}")]
    Timeout { message: String, data: ErrorData },

    #[error("unable to set cookie: {message}")]
    UnableToSetCookie { message: String, data: ErrorData },

    #[error("unable to capture screen: {message}")]
    UnableToCaptureScreen { message: String, data: ErrorData },

    #[error("unexpected alert open: {message}")]
    UnexpectedAlertOpen {
        message: String,
        /// Text of the open alert, when the server reported it. Empty when
        /// neither legacy location carried it.
        alert_text: String,
        data: ErrorData,
    },

    #[error("unknown command: {message}")]
    UnknownCommand { message: String, data: ErrorData },

    #[error("unknown error: {message}")]
    UnknownError { message: String, data: ErrorData },

    #[error("unknown method: {message}")]
    UnknownMethod { message: String, data: ErrorData },

    #[error("unsupported operation: {message}")]
    UnsupportedOperation { message: String, data: ErrorData },

    /// Transport-level failure below the protocol.
    #[error("transport error: {0}")]
    Http(String),

    /// JSON serialization/deserialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote payload decoded but did not have the required shape.
    #[error("unable to parse remote response: {0}")]
    Decode(String),
}

impl Error {
    /// Local contract violation (never sent by the server).
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            data: ErrorData::default(),
        }
    }

    /// The result code this failure corresponds to, if it is a protocol
    /// failure. Transport and decoding failures have no result code.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            Error::ElementClickIntercepted { .. } => Some(ResultCode::ElementClickIntercepted),
            Error::ElementNotInteractable { .. } => Some(ResultCode::ElementNotInteractable),
            Error::InsecureCertificate { .. } => Some(ResultCode::InsecureCertificate),
            Error::InvalidArgument { .. } => Some(ResultCode::InvalidArgument),
            Error::InvalidCookieDomain { .. } => Some(ResultCode::InvalidCookieDomain),
            Error::InvalidCoordinates { .. } => Some(ResultCode::InvalidCoordinates),
            Error::InvalidElementState { .. } => Some(ResultCode::InvalidElementState),
            Error::InvalidSelector { .. } => Some(ResultCode::InvalidSelector),
            Error::InvalidSessionId { .. } => Some(ResultCode::InvalidSessionId),
            Error::JavascriptError { .. } => Some(ResultCode::JavascriptError),
            Error::MoveTargetOutOfBounds { .. } => Some(ResultCode::MoveTargetOutOfBounds),
            Error::NoSuchAlert { .. } => Some(ResultCode::NoSuchAlert),
            Error::NoSuchCookie { .. } => Some(ResultCode::NoSuchCookie),
            Error::NoSuchElement { .. } => Some(ResultCode::NoSuchElement),
            Error::NoSuchFrame { .. } => Some(ResultCode::NoSuchFrame),
            Error::NoSuchShadowRoot { .. } => Some(ResultCode::NoSuchShadowRoot),
            Error::NoSuchWindow { .. } => Some(ResultCode::NoSuchWindow),
            Error::ScriptTimeout { .. } => Some(ResultCode::ScriptTimeout),
            Error::SessionNotCreated { .. } => Some(ResultCode::SessionNotCreated),
            Error::StaleElementReference { .. } => Some(ResultCode::StaleElementReference),
            Error::DetachedShadowRoot { .. } => Some(ResultCode::DetachedShadowRoot),
            Error::Timeout { .. } => Some(ResultCode::Timeout),
            Error::UnableToSetCookie { .. } => Some(ResultCode::UnableToSetCookie),
            Error::UnableToCaptureScreen { .. } => Some(ResultCode::UnableToCaptureScreen),
            Error::UnexpectedAlertOpen { .. } => Some(ResultCode::UnexpectedAlertOpen),
            Error::UnknownCommand { .. } => Some(ResultCode::UnknownCommand),
            Error::UnknownError { .. } => Some(ResultCode::UnknownError),
            Error::UnknownMethod { .. } => Some(ResultCode::UnknownMethod),
            Error::UnsupportedOperation { .. } => Some(ResultCode::UnsupportedOperation),
            Error::Http(_) | Error::Json(_) | Error::Decode(_) => None,
        }
    }

    /// Unpacks a non-success [`Response`] into its typed failure.
    ///
    /// Precondition: `response.status() != ResultCode::Success`. The server
    /// message is preserved verbatim; screenshot, class name, and stack
    /// frames are carried when present. Exactly one failure is selected per
    /// result code. A success status reaching this point is a caller bug and
    /// degrades to [`Error::UnknownError`].
    pub fn from_response(response: Response) -> Error {
        let status = response.status();
        let value = response.into_value();
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.as_str())
            .unwrap_or_default()
            .to_string();
        let data = ErrorData::from_value(&value);

        match status {
            ResultCode::ElementClickIntercepted => {
                Error::ElementClickIntercepted { message, data }
            }
            ResultCode::ElementNotInteractable => Error::ElementNotInteractable { message, data },
            ResultCode::InsecureCertificate => Error::InsecureCertificate { message, data },
            ResultCode::InvalidArgument => Error::InvalidArgument { message, data },
            ResultCode::InvalidCookieDomain => Error::InvalidCookieDomain { message, data },
            ResultCode::InvalidCoordinates => Error::InvalidCoordinates { message, data },
            ResultCode::InvalidElementState => Error::InvalidElementState { message, data },
            ResultCode::InvalidSelector => Error::InvalidSelector { message, data },
            ResultCode::InvalidSessionId => Error::InvalidSessionId { message, data },
            ResultCode::JavascriptError => Error::JavascriptError { message, data },
            ResultCode::MoveTargetOutOfBounds => Error::MoveTargetOutOfBounds { message, data },
            ResultCode::NoSuchAlert => Error::NoSuchAlert { message, data },
            ResultCode::NoSuchCookie => Error::NoSuchCookie { message, data },
            ResultCode::NoSuchElement => Error::NoSuchElement { message, data },
            ResultCode::NoSuchFrame => Error::NoSuchFrame { message, data },
            ResultCode::NoSuchShadowRoot => Error::NoSuchShadowRoot { message, data },
            ResultCode::NoSuchWindow => Error::NoSuchWindow { message, data },
            ResultCode::ScriptTimeout => Error::ScriptTimeout { message, data },
            ResultCode::SessionNotCreated => Error::SessionNotCreated { message, data },
            ResultCode::StaleElementReference => Error::StaleElementReference { message, data },
            ResultCode::DetachedShadowRoot => Error::DetachedShadowRoot { message, data },
            ResultCode::Timeout => Error::Timeout { message, data },
            ResultCode::UnableToSetCookie => Error::UnableToSetCookie { message, data },
            ResultCode::UnableToCaptureScreen => Error::UnableToCaptureScreen { message, data },
            ResultCode::UnexpectedAlertOpen => {
                // The alert text lives under `alert.text` (W3C) or
                // `data.text` (legacy); absent in both means empty.
                let alert_text = value
                    .pointer("/alert/text")
                    .or_else(|| value.pointer("/data/text"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Error::UnexpectedAlertOpen {
                    message,
                    alert_text,
                    data,
                }
            }
            ResultCode::UnknownCommand => Error::UnknownCommand { message, data },
            ResultCode::UnknownError => Error::UnknownError { message, data },
            ResultCode::UnknownMethod => Error::UnknownMethod { message, data },
            ResultCode::UnsupportedOperation => Error::UnsupportedOperation { message, data },
            // Precondition violation: a success response has no failure.
            ResultCode::Success => Error::UnknownError { message, data },
        }
    }
}
