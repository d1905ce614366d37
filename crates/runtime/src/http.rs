//! HTTP command executor.
//!
//! Reference [`CommandExecutor`] implementation over reqwest. Commands are
//! routed through the endpoint table in `wd-protocol`, path template
//! placeholders are substituted from the command's session binding and
//! parameter map (consumed parameters do not reappear in the body), and the
//! HTTP status selects the success or error parse path.

use crate::error::{Error, Result};
use crate::response::Response;
use crate::transport::{CommandExecutor, ExecuteFuture};
use serde_json::{Map, Value};
use wd_protocol::{Command, Verb, route};

/// Executes commands as JSON/HTTP requests against a remote server.
pub struct HttpExecutor {
    client: reqwest::Client,
    base: String,
}

impl HttpExecutor {
    /// Creates an executor for a server URL such as `http://localhost:4444`.
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut base = server_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Creates an executor reusing a caller-configured client.
    pub fn with_client(client: reqwest::Client, server_url: impl Into<String>) -> Self {
        let mut executor = Self::new(server_url);
        executor.client = client;
        executor
    }

    async fn dispatch(&self, command: &Command) -> Result<Response> {
        let routed = route(command.cmd());
        let (path, body) = resolve_path(routed.template, command)?;
        let url = format!("{}{}", self.base, path);

        tracing::debug!(
            cmd = %command.cmd(),
            verb = routed.verb.as_str(),
            %url,
            "dispatching command"
        );

        let request = match routed.verb {
            Verb::Get => self.client.get(&url),
            Verb::Post => self.client.post(&url).json(&Value::Object(body)),
            Verb::Delete => self.client.delete(&url),
        };

        let reply = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = reply.status();
        let text = reply.text().await.map_err(|e| Error::Http(e.to_string()))?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|_| Error::Decode(format!("non-JSON response ({status}): {text}")))?;

        if status.is_success() {
            Response::from_success(body)
        } else {
            Response::from_error(body)
        }
    }
}

impl CommandExecutor for HttpExecutor {
    fn execute<'a>(&'a self, command: &'a Command) -> ExecuteFuture<'a> {
        Box::pin(self.dispatch(command))
    }
}

/// Substitutes path template placeholders, consuming the parameters used.
///
/// `{sessionId}` comes from the command's session binding; every other
/// placeholder is looked up by name in the parameter map and removed from
/// the body that will be posted. A placeholder with no matching string
/// parameter is a contract violation.
fn resolve_path(template: &str, command: &Command) -> Result<(String, Map<String, Value>)> {
    let mut body = command.params().clone();
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let close = rest[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| Error::invalid_argument(format!("unclosed placeholder: {template}")))?;
        path.push_str(&rest[..open]);
        let name = &rest[open + 1..close];

        if name == "sessionId" {
            let session = command.session().ok_or_else(|| {
                Error::invalid_argument(format!("{} requires a session", command.cmd()))
            })?;
            path.push_str(session.as_str());
        } else {
            let value = body.remove(name).ok_or_else(|| {
                Error::invalid_argument(format!("{} requires parameter '{name}'", command.cmd()))
            })?;
            let segment = value.as_str().ok_or_else(|| {
                Error::invalid_argument(format!("parameter '{name}' must be a string"))
            })?;
            path.push_str(segment);
        }
        rest = &rest[close + 1..];
    }
    path.push_str(rest);

    Ok((path, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wd_protocol::{Cmd, SessionId};

    fn command(cmd: Cmd, params: &[(&str, Value)]) -> Command {
        let mut map = Map::new();
        for (key, value) in params {
            map.insert(key.to_string(), value.clone());
        }
        Command::new(Some(SessionId::new("s1")), cmd, map)
    }

    #[test]
    fn substitutes_session_id() {
        let cmd = command(Cmd::GetTitle, &[]);
        let (path, body) = resolve_path(route(Cmd::GetTitle).template, &cmd).unwrap();
        assert_eq!(path, "/session/s1/title");
        assert!(body.is_empty());
    }

    #[test]
    fn consumes_path_parameters_from_the_body() {
        let cmd = command(
            Cmd::GetElementAttribute,
            &[
                ("elementId", json!("e7")),
                ("name", json!("href")),
            ],
        );
        let (path, body) = resolve_path(route(Cmd::GetElementAttribute).template, &cmd).unwrap();
        assert_eq!(path, "/session/s1/element/e7/attribute/href");
        assert!(body.is_empty());
    }

    #[test]
    fn non_path_parameters_stay_in_the_body() {
        let cmd = command(
            Cmd::FindElement,
            &[
                ("using", json!("css selector")),
                ("value", json!("#foo")),
            ],
        );
        let (path, body) = resolve_path(route(Cmd::FindElement).template, &cmd).unwrap();
        assert_eq!(path, "/session/s1/element");
        assert_eq!(body.len(), 2);
        assert_eq!(body["using"], "css selector");
    }

    #[test]
    fn missing_session_is_a_contract_violation() {
        let cmd = Command::sessionless(Cmd::GetTitle);
        assert!(matches!(
            resolve_path(route(Cmd::GetTitle).template, &cmd),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn missing_path_parameter_is_a_contract_violation() {
        let cmd = command(Cmd::GetElementText, &[]);
        assert!(matches!(
            resolve_path(route(Cmd::GetElementText).template, &cmd),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn trailing_base_slash_is_trimmed() {
        let executor = HttpExecutor::new("http://localhost:4444/");
        assert_eq!(executor.base, "http://localhost:4444");
    }
}
