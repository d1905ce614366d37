//! Endpoint routing table: command identifier to HTTP verb and path.
//!
//! The core treats [`Cmd`] as an opaque key; a transport resolves it here to
//! a concrete verb plus a path template. Templates use `{sessionId}`,
//! `{elementId}`, `{shadowId}` and `{name}` placeholders which the transport
//! substitutes from the command's session binding and parameter map.

use crate::command::Cmd;

/// HTTP verb for a routed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

/// A resolved route: verb plus path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub verb: Verb,
    pub template: &'static str,
}

const fn route_of(verb: Verb, template: &'static str) -> Route {
    Route { verb, template }
}

/// Total routing function over the command vocabulary.
pub fn route(cmd: Cmd) -> Route {
    use Verb::{Delete, Get, Post};
    match cmd {
        Cmd::Status => route_of(Get, "/status"),
        Cmd::NewSession => route_of(Post, "/session"),
        Cmd::Quit => route_of(Delete, "/session/{sessionId}"),

        Cmd::Get => route_of(Post, "/session/{sessionId}/url"),
        Cmd::GetCurrentUrl => route_of(Get, "/session/{sessionId}/url"),
        Cmd::GoBack => route_of(Post, "/session/{sessionId}/back"),
        Cmd::GoForward => route_of(Post, "/session/{sessionId}/forward"),
        Cmd::Refresh => route_of(Post, "/session/{sessionId}/refresh"),
        Cmd::GetTitle => route_of(Get, "/session/{sessionId}/title"),
        Cmd::GetPageSource => route_of(Get, "/session/{sessionId}/source"),

        Cmd::GetTimeouts => route_of(Get, "/session/{sessionId}/timeouts"),
        Cmd::SetTimeouts => route_of(Post, "/session/{sessionId}/timeouts"),

        Cmd::GetWindowHandle => route_of(Get, "/session/{sessionId}/window"),
        Cmd::GetWindowHandles => route_of(Get, "/session/{sessionId}/window/handles"),
        Cmd::CloseWindow => route_of(Delete, "/session/{sessionId}/window"),
        Cmd::SwitchToWindow => route_of(Post, "/session/{sessionId}/window"),
        Cmd::NewWindow => route_of(Post, "/session/{sessionId}/window/new"),
        Cmd::SwitchToFrame => route_of(Post, "/session/{sessionId}/frame"),
        Cmd::SwitchToParentFrame => route_of(Post, "/session/{sessionId}/frame/parent"),
        Cmd::GetWindowRect => route_of(Get, "/session/{sessionId}/window/rect"),
        Cmd::SetWindowRect => route_of(Post, "/session/{sessionId}/window/rect"),
        Cmd::MaximizeWindow => route_of(Post, "/session/{sessionId}/window/maximize"),
        Cmd::MinimizeWindow => route_of(Post, "/session/{sessionId}/window/minimize"),
        Cmd::FullscreenWindow => route_of(Post, "/session/{sessionId}/window/fullscreen"),

        Cmd::GetActiveElement => route_of(Get, "/session/{sessionId}/element/active"),
        Cmd::FindElement => route_of(Post, "/session/{sessionId}/element"),
        Cmd::FindElements => route_of(Post, "/session/{sessionId}/elements"),
        Cmd::FindChildElement => route_of(Post, "/session/{sessionId}/element/{elementId}/element"),
        Cmd::FindChildElements => {
            route_of(Post, "/session/{sessionId}/element/{elementId}/elements")
        }
        Cmd::GetShadowRoot => route_of(Get, "/session/{sessionId}/element/{elementId}/shadow"),
        Cmd::FindElementFromShadowRoot => {
            route_of(Post, "/session/{sessionId}/shadow/{shadowId}/element")
        }
        Cmd::FindElementsFromShadowRoot => {
            route_of(Post, "/session/{sessionId}/shadow/{shadowId}/elements")
        }

        Cmd::IsElementSelected => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/selected")
        }
        Cmd::IsElementEnabled => route_of(Get, "/session/{sessionId}/element/{elementId}/enabled"),
        Cmd::IsElementDisplayed => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/displayed")
        }
        Cmd::GetElementAttribute => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/attribute/{name}")
        }
        Cmd::GetElementProperty => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/property/{name}")
        }
        Cmd::GetElementCssValue => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/css/{name}")
        }
        Cmd::GetElementText => route_of(Get, "/session/{sessionId}/element/{elementId}/text"),
        Cmd::GetElementTagName => route_of(Get, "/session/{sessionId}/element/{elementId}/name"),
        Cmd::GetElementRect => route_of(Get, "/session/{sessionId}/element/{elementId}/rect"),
        Cmd::GetElementAriaRole => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/computedrole")
        }
        Cmd::GetElementAriaLabel => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/computedlabel")
        }

        Cmd::ElementClick => route_of(Post, "/session/{sessionId}/element/{elementId}/click"),
        Cmd::ElementClear => route_of(Post, "/session/{sessionId}/element/{elementId}/clear"),
        Cmd::ElementSendKeys => route_of(Post, "/session/{sessionId}/element/{elementId}/value"),

        Cmd::ExecuteScript => route_of(Post, "/session/{sessionId}/execute/sync"),
        Cmd::ExecuteAsyncScript => route_of(Post, "/session/{sessionId}/execute/async"),

        Cmd::GetAllCookies => route_of(Get, "/session/{sessionId}/cookie"),
        Cmd::GetNamedCookie => route_of(Get, "/session/{sessionId}/cookie/{name}"),
        Cmd::AddCookie => route_of(Post, "/session/{sessionId}/cookie"),
        Cmd::DeleteCookie => route_of(Delete, "/session/{sessionId}/cookie/{name}"),
        Cmd::DeleteAllCookies => route_of(Delete, "/session/{sessionId}/cookie"),

        Cmd::DismissAlert => route_of(Post, "/session/{sessionId}/alert/dismiss"),
        Cmd::AcceptAlert => route_of(Post, "/session/{sessionId}/alert/accept"),
        Cmd::GetAlertText => route_of(Get, "/session/{sessionId}/alert/text"),
        Cmd::SendAlertText => route_of(Post, "/session/{sessionId}/alert/text"),

        Cmd::PerformActions => route_of(Post, "/session/{sessionId}/actions"),
        Cmd::ReleaseActions => route_of(Delete, "/session/{sessionId}/actions"),

        Cmd::TakeScreenshot => route_of(Get, "/session/{sessionId}/screenshot"),
        Cmd::TakeElementScreenshot => {
            route_of(Get, "/session/{sessionId}/element/{elementId}/screenshot")
        }
        Cmd::PrintPage => route_of(Post, "/session/{sessionId}/print"),

        Cmd::GetLogTypes => route_of(Get, "/session/{sessionId}/se/log/types"),
        Cmd::GetLog => route_of(Post, "/session/{sessionId}/se/log"),
    }
}
