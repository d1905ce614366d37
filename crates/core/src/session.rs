//! The session orchestrator.
//!
//! A [`Session`] owns the binding between a local client and one remote
//! session: it builds each [`Command`], hands it to the transport, and turns
//! the reply into either a normalized [`Response`] or exactly one typed
//! failure. Commands for one session never overlap - dispatch is serialized
//! through the session-scoped lock, matching the protocol's strict
//! request/response ordering. Nothing is cached and nothing is retried at
//! this layer.

use crate::element::{Element, ShadowRoot};
use crate::value::{Arg, WdValue, decode, encode};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use wd_protocol::{Cmd, Command, SessionId, new_session_payload};
use wd_runtime::{CommandExecutor, Error, Response, Result};

#[derive(Default)]
struct SessionState {
    id: Option<SessionId>,
    capabilities: Map<String, Value>,
}

/// A client-side session against a remote WebDriver server.
pub struct Session {
    executor: Arc<dyn CommandExecutor>,
    state: Mutex<SessionState>,
}

impl Session {
    /// Creates a session bound to a transport. No remote call is made until
    /// [`Session::start_session`].
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Executes one command bound to the current session id.
    ///
    /// This is the single funnel all higher-level operations go through. A
    /// non-success status never returns normally: it is unpacked into its
    /// typed failure.
    pub async fn execute(&self, cmd: Cmd, params: Map<String, Value>) -> Result<Response> {
        let state = self.state.lock().await;
        self.dispatch(state.id.clone(), cmd, params).await
    }

    async fn dispatch(
        &self,
        session: Option<SessionId>,
        cmd: Cmd,
        params: Map<String, Value>,
    ) -> Result<Response> {
        let command = Command::new(session, cmd, params);
        tracing::debug!(cmd = %command.cmd(), "executing command");

        let response = match self.executor.execute(&command).await {
            Ok(response) => response,
            // Malformed envelopes are parse failures and surface as-is.
            Err(e @ (Error::Decode(_) | Error::Json(_))) => return Err(e),
            // Any other transport failure becomes an unhandled-error
            // response and funnels through the ordinary unpacking path:
            // the transport never throws past this boundary.
            Err(e) => Response::unhandled_error(&e),
        };

        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::from_response(response))
        }
    }

    /// Negotiates a new remote session from one candidate capability map.
    ///
    /// Non-spec-compliant capability names are filtered out and the rest
    /// offered as a single `firstMatch` candidate.
    pub async fn start_session(&self, capabilities: &Map<String, Value>) -> Result<()> {
        self.start_session_with_payload(new_session_payload(capabilities))
            .await
    }

    /// Negotiates a new remote session from a pre-built, fully
    /// spec-compliant payload supplied by the caller.
    pub async fn start_session_with_payload(&self, payload: Value) -> Result<()> {
        let params = match payload {
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_argument(format!(
                    "new-session payload must be a mapping, got: {other}"
                )));
            }
        };

        let mut state = self.state.lock().await;
        if state.id.is_some() {
            return Err(Error::invalid_argument("session already started"));
        }

        let response = self.dispatch(None, Cmd::NewSession, params).await?;

        // Normalization has already re-homed a session id nested inside the
        // value; all that is left is requiring one to exist at all.
        let id = response.session_id().cloned().ok_or_else(|| {
            Error::Decode("new-session response carried no session id".to_string())
        })?;
        let capabilities = match response.value() {
            Value::Object(map) => map.clone(),
            other => {
                return Err(Error::Decode(format!(
                    "new-session value is not a mapping: {other}"
                )));
            }
        };

        tracing::debug!(session = %id, "session started");
        state.id = Some(id);
        state.capabilities = capabilities;
        Ok(())
    }

    /// Ends the remote session, best-effort.
    ///
    /// A server that already discarded the session answers the quit call
    /// with a failure; those are swallowed. The local session id is cleared
    /// unconditionally, whatever the remote outcome, so a second `quit` is
    /// a no-op.
    pub async fn quit(&self) -> Result<()> {
        let mut state = self.state.lock().await;

        let outcome = match state.id.clone() {
            Some(id) => self
                .dispatch(Some(id), Cmd::Quit, Map::new())
                .await
                .map(|_| ()),
            None => Ok(()),
        };

        // Cleanup runs regardless of the quit outcome.
        state.id = None;
        state.capabilities = Map::new();

        match outcome {
            Err(e) if quit_tolerates(&e) => {
                tracing::debug!(error = %e, "ignoring tolerated failure during quit");
                Ok(())
            }
            other => other,
        }
    }

    /// Server readiness; sessionless.
    pub async fn status(&self) -> Result<Value> {
        let response = self.dispatch(None, Cmd::Status, Map::new()).await?;
        Ok(response.into_value())
    }

    /// The current session id, if a session is active.
    pub async fn session_id(&self) -> Option<SessionId> {
        self.state.lock().await.id.clone()
    }

    /// Effective capabilities negotiated at session start.
    pub async fn capabilities(&self) -> Map<String, Value> {
        self.state.lock().await.capabilities.clone()
    }

    /// Navigates to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        let mut params = Map::new();
        params.insert("url".to_string(), json!(url));
        self.execute(Cmd::Get, params).await?;
        Ok(())
    }

    /// Current document URL.
    pub async fn current_url(&self) -> Result<String> {
        let response = self.execute(Cmd::GetCurrentUrl, Map::new()).await?;
        string_value(response, "getCurrentUrl")
    }

    /// Current document title.
    pub async fn title(&self) -> Result<String> {
        let response = self.execute(Cmd::GetTitle, Map::new()).await?;
        string_value(response, "getTitle")
    }

    /// Finds the first element matching a locator strategy and selector.
    pub async fn find_element(&self, using: &str, value: &str) -> Result<Element> {
        let state = self.state.lock().await;
        let session = require_session(&state)?;
        let response = self
            .dispatch(Some(session.clone()), Cmd::FindElement, locator(using, value))
            .await?;
        match decode(response.value(), &session)? {
            WdValue::Element(element) => Ok(element),
            other => Err(Error::Decode(format!(
                "findElement returned a non-element value: {other:?}"
            ))),
        }
    }

    /// Finds all elements matching a locator strategy and selector.
    pub async fn find_elements(&self, using: &str, value: &str) -> Result<Vec<Element>> {
        let state = self.state.lock().await;
        let session = require_session(&state)?;
        let response = self
            .dispatch(Some(session.clone()), Cmd::FindElements, locator(using, value))
            .await?;
        match decode(response.value(), &session)? {
            WdValue::Elements(elements) => Ok(elements),
            WdValue::Seq(items) if items.is_empty() => Ok(Vec::new()),
            other => Err(Error::Decode(format!(
                "findElements returned a non-element collection: {other:?}"
            ))),
        }
    }

    /// Clicks an element. Thin pass-through; staleness is discovered from
    /// the server's rejection, never locally.
    pub async fn click(&self, element: &Element) -> Result<()> {
        self.element_command(element, Cmd::ElementClick, Map::new())
            .await?;
        Ok(())
    }

    /// Visible text of an element.
    pub async fn element_text(&self, element: &Element) -> Result<String> {
        let response = self
            .element_command(element, Cmd::GetElementText, Map::new())
            .await?;
        string_value(response, "getElementText")
    }

    /// Attribute value of an element, `None` when the attribute is absent.
    pub async fn element_attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>> {
        let mut params = Map::new();
        params.insert("name".to_string(), json!(name));
        let response = self
            .element_command(element, Cmd::GetElementAttribute, params)
            .await?;
        match response.into_value() {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(Error::Decode(format!(
                "getElementAttribute returned a non-string value: {other}"
            ))),
        }
    }

    async fn element_command(
        &self,
        element: &Element,
        cmd: Cmd,
        mut params: Map<String, Value>,
    ) -> Result<Response> {
        let state = self.state.lock().await;
        let session = require_session(&state)?;
        if element.session() != &session {
            return Err(Error::invalid_argument(
                "element handle belongs to a different session",
            ));
        }
        params.insert("elementId".to_string(), json!(element.id()));
        self.dispatch(Some(session), cmd, params).await
    }

    /// The shadow root attached to an element.
    pub async fn shadow_root(&self, element: &Element) -> Result<ShadowRoot> {
        let response = self
            .element_command(element, Cmd::GetShadowRoot, Map::new())
            .await?;
        match decode(response.value(), element.session())? {
            WdValue::ShadowRoot(root) => Ok(root),
            other => Err(Error::Decode(format!(
                "getShadowRoot returned a non-shadow-root value: {other:?}"
            ))),
        }
    }

    /// Finds the first element matching a locator below a shadow root.
    pub async fn find_element_from_shadow_root(
        &self,
        root: &ShadowRoot,
        using: &str,
        value: &str,
    ) -> Result<Element> {
        let state = self.state.lock().await;
        let session = require_session(&state)?;
        if root.session() != &session {
            return Err(Error::invalid_argument(
                "shadow root handle belongs to a different session",
            ));
        }
        let mut params = locator(using, value);
        params.insert("shadowId".to_string(), json!(root.id()));
        let response = self
            .dispatch(Some(session.clone()), Cmd::FindElementFromShadowRoot, params)
            .await?;
        match decode(response.value(), &session)? {
            WdValue::Element(element) => Ok(element),
            other => Err(Error::Decode(format!(
                "findElementFromShadowRoot returned a non-element value: {other:?}"
            ))),
        }
    }

    /// Runs a script synchronously, marshalling handles both ways.
    pub async fn execute_script(&self, script: &str, args: Vec<Arg>) -> Result<WdValue> {
        self.run_script(Cmd::ExecuteScript, script, args).await
    }

    /// Runs a script asynchronously (result delivered via callback).
    pub async fn execute_async_script(&self, script: &str, args: Vec<Arg>) -> Result<WdValue> {
        self.run_script(Cmd::ExecuteAsyncScript, script, args).await
    }

    async fn run_script(&self, cmd: Cmd, script: &str, args: Vec<Arg>) -> Result<WdValue> {
        let state = self.state.lock().await;
        let session = require_session(&state)?;

        let mut params = Map::new();
        params.insert("script".to_string(), json!(script));
        params.insert(
            "args".to_string(),
            Value::Array(args.iter().map(encode).collect()),
        );

        let response = self.dispatch(Some(session.clone()), cmd, params).await?;
        decode(response.value(), &session)
    }
}

fn require_session(state: &SessionState) -> Result<SessionId> {
    state
        .id
        .clone()
        .ok_or_else(|| Error::invalid_argument("no active session"))
}

fn locator(using: &str, value: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("using".to_string(), json!(using));
    params.insert("value".to_string(), json!(value));
    params
}

fn string_value(response: Response, cmd: &str) -> Result<String> {
    match response.into_value() {
        Value::String(s) => Ok(s),
        other => Err(Error::Decode(format!(
            "{cmd} returned a non-string value: {other}"
        ))),
    }
}

/// Failure kinds swallowed during teardown: the session being gone already
/// is the goal, not an error.
fn quit_tolerates(error: &Error) -> bool {
    matches!(
        error,
        Error::InvalidSessionId { .. } | Error::UnknownError { .. }
    )
}
