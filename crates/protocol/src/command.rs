//! Command vocabulary and the per-call command triple.
//!
//! A [`Command`] is the immutable unit of dispatch: the session it is bound
//! to, a member of the fixed command vocabulary, and a string-keyed map of
//! JSON-compatible parameters. The core treats [`Cmd`] purely as an opaque
//! lookup key; the transport maps it to a concrete endpoint and verb via
//! [`crate::endpoint::route`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque handle naming a remote session.
///
/// Equal by value, created once at session start, and cleared at teardown.
/// The wrapped string is the server-assigned id and carries no further
/// client-side meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a server-assigned session id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The fixed, closed command vocabulary.
///
/// Each variant names one remote end point operation. The canonical string
/// identifiers returned by [`Cmd::as_str`] are stable lookup keys shared
/// with the endpoint routing table; they never appear on the wire
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    Status,
    NewSession,
    Quit,

    // Navigation
    Get,
    GetCurrentUrl,
    GoBack,
    GoForward,
    Refresh,
    GetTitle,
    GetPageSource,

    // Timeouts
    GetTimeouts,
    SetTimeouts,

    // Windows and frames
    GetWindowHandle,
    GetWindowHandles,
    CloseWindow,
    SwitchToWindow,
    NewWindow,
    SwitchToFrame,
    SwitchToParentFrame,
    GetWindowRect,
    SetWindowRect,
    MaximizeWindow,
    MinimizeWindow,
    FullscreenWindow,

    // Element location
    GetActiveElement,
    FindElement,
    FindElements,
    FindChildElement,
    FindChildElements,
    GetShadowRoot,
    FindElementFromShadowRoot,
    FindElementsFromShadowRoot,

    // Element state
    IsElementSelected,
    IsElementEnabled,
    IsElementDisplayed,
    GetElementAttribute,
    GetElementProperty,
    GetElementCssValue,
    GetElementText,
    GetElementTagName,
    GetElementRect,
    GetElementAriaRole,
    GetElementAriaLabel,

    // Element interaction
    ElementClick,
    ElementClear,
    ElementSendKeys,

    // Script execution
    ExecuteScript,
    ExecuteAsyncScript,

    // Cookies
    GetAllCookies,
    GetNamedCookie,
    AddCookie,
    DeleteCookie,
    DeleteAllCookies,

    // User prompts
    DismissAlert,
    AcceptAlert,
    GetAlertText,
    SendAlertText,

    // Input actions
    PerformActions,
    ReleaseActions,

    // Screenshots and printing
    TakeScreenshot,
    TakeElementScreenshot,
    PrintPage,

    // Legacy log retrieval (Selenium server extension)
    GetLogTypes,
    GetLog,
}

impl Cmd {
    /// Canonical string identifier for this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cmd::Status => "status",
            Cmd::NewSession => "newSession",
            Cmd::Quit => "quit",
            Cmd::Get => "get",
            Cmd::GetCurrentUrl => "getCurrentUrl",
            Cmd::GoBack => "goBack",
            Cmd::GoForward => "goForward",
            Cmd::Refresh => "refresh",
            Cmd::GetTitle => "getTitle",
            Cmd::GetPageSource => "getPageSource",
            Cmd::GetTimeouts => "getTimeouts",
            Cmd::SetTimeouts => "setTimeouts",
            Cmd::GetWindowHandle => "getWindowHandle",
            Cmd::GetWindowHandles => "getWindowHandles",
            Cmd::CloseWindow => "closeWindow",
            Cmd::SwitchToWindow => "switchToWindow",
            Cmd::NewWindow => "newWindow",
            Cmd::SwitchToFrame => "switchToFrame",
            Cmd::SwitchToParentFrame => "switchToParentFrame",
            Cmd::GetWindowRect => "getWindowRect",
            Cmd::SetWindowRect => "setWindowRect",
            Cmd::MaximizeWindow => "maximizeWindow",
            Cmd::MinimizeWindow => "minimizeWindow",
            Cmd::FullscreenWindow => "fullscreenWindow",
            Cmd::GetActiveElement => "getActiveElement",
            Cmd::FindElement => "findElement",
            Cmd::FindElements => "findElements",
            Cmd::FindChildElement => "findChildElement",
            Cmd::FindChildElements => "findChildElements",
            Cmd::GetShadowRoot => "getShadowRoot",
            Cmd::FindElementFromShadowRoot => "findElementFromShadowRoot",
            Cmd::FindElementsFromShadowRoot => "findElementsFromShadowRoot",
            Cmd::IsElementSelected => "isElementSelected",
            Cmd::IsElementEnabled => "isElementEnabled",
            Cmd::IsElementDisplayed => "isElementDisplayed",
            Cmd::GetElementAttribute => "getElementAttribute",
            Cmd::GetElementProperty => "getElementProperty",
            Cmd::GetElementCssValue => "getElementValueOfCssProperty",
            Cmd::GetElementText => "getElementText",
            Cmd::GetElementTagName => "getElementTagName",
            Cmd::GetElementRect => "getElementRect",
            Cmd::GetElementAriaRole => "getElementAriaRole",
            Cmd::GetElementAriaLabel => "getElementAriaLabel",
            Cmd::ElementClick => "clickElement",
            Cmd::ElementClear => "clearElement",
            Cmd::ElementSendKeys => "sendKeysToElement",
            Cmd::ExecuteScript => "executeScript",
            Cmd::ExecuteAsyncScript => "executeAsyncScript",
            Cmd::GetAllCookies => "getAllCookies",
            Cmd::GetNamedCookie => "getNamedCookie",
            Cmd::AddCookie => "addCookie",
            Cmd::DeleteCookie => "deleteCookie",
            Cmd::DeleteAllCookies => "deleteAllCookies",
            Cmd::DismissAlert => "dismissAlert",
            Cmd::AcceptAlert => "acceptAlert",
            Cmd::GetAlertText => "getAlertText",
            Cmd::SendAlertText => "sendAlertText",
            Cmd::PerformActions => "performActions",
            Cmd::ReleaseActions => "releaseActions",
            Cmd::TakeScreenshot => "takeScreenshot",
            Cmd::TakeElementScreenshot => "takeElementScreenshot",
            Cmd::PrintPage => "printPage",
            Cmd::GetLogTypes => "getLogTypes",
            Cmd::GetLog => "getLog",
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote call: session binding, command identifier, parameter map.
///
/// Stateless and constructed per call; never mutated after construction.
/// Sessionless commands (`status`, `newSession`) carry `session: None`.
#[derive(Debug, Clone)]
pub struct Command {
    session: Option<SessionId>,
    cmd: Cmd,
    params: Map<String, Value>,
}

impl Command {
    /// Builds a command bound to `session` (if any).
    pub fn new(session: Option<SessionId>, cmd: Cmd, params: Map<String, Value>) -> Self {
        Self {
            session,
            cmd,
            params,
        }
    }

    /// Builds a sessionless command with no parameters.
    pub fn sessionless(cmd: Cmd) -> Self {
        Self::new(None, cmd, Map::new())
    }

    /// The session this command is bound to, if any.
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// The command identifier.
    pub fn cmd(&self) -> Cmd {
        self.cmd
    }

    /// The parameter map.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}
