//! End-to-end tests of the session orchestrator over a stub transport.

use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use wd::{Arg, Element, Session, encode};
use wd_protocol::{Cmd, Command, ELEMENT_KEY, SHADOW_ROOT_KEY, SessionId};
use wd_runtime::{CommandExecutor, Error, Response, Result};
use wd_runtime::transport::ExecuteFuture;

/// Transport double: replays canned replies and records every command.
struct StubExecutor {
    replies: Mutex<VecDeque<Result<Response>>>,
    seen: Mutex<Vec<Command>>,
}

impl StubExecutor {
    fn new(replies: Vec<Result<Response>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn commands(&self) -> Vec<Command> {
        self.seen.lock().unwrap().clone()
    }
}

impl CommandExecutor for StubExecutor {
    fn execute<'a>(&'a self, command: &'a Command) -> ExecuteFuture<'a> {
        self.seen.lock().unwrap().push(command.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected command");
        Box::pin(async move { reply })
    }
}

fn success(body: Value) -> Result<Response> {
    Response::from_success(body)
}

fn wire_error(body: Value) -> Result<Response> {
    Response::from_error(body)
}

fn new_session_reply() -> Result<Response> {
    success(json!({"value": {"sessionId": "s1", "capabilities": {"browserName": "x"}}}))
}

/// Builds a session that has already negotiated id "s1".
async fn started(extra_replies: Vec<Result<Response>>) -> (Session, Arc<StubExecutor>) {
    let mut replies = vec![new_session_reply()];
    replies.extend(extra_replies);
    let executor = StubExecutor::new(replies);
    let session = Session::new(executor.clone());

    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!("firefox"));
    session.start_session(&caps).await.unwrap();
    (session, executor)
}

#[tokio::test]
async fn new_session_extracts_nested_id_and_capabilities() {
    let (session, executor) = started(Vec::new()).await;

    assert_eq!(session.session_id().await.unwrap().as_str(), "s1");
    assert_eq!(session.capabilities().await["browserName"], "x");

    // The negotiation payload offers one filtered firstMatch candidate.
    let sent = executor.commands();
    assert_eq!(sent[0].cmd(), Cmd::NewSession);
    assert_eq!(
        sent[0].params()["capabilities"]["firstMatch"][0]["browserName"],
        "firefox"
    );
}

#[tokio::test]
async fn new_session_requires_a_mapping_value() {
    let executor = StubExecutor::new(vec![success(json!({"value": "not a mapping"}))]);
    let session = Session::new(executor);
    let result = session.start_session(&Map::new()).await;
    assert!(matches!(result, Err(Error::Decode(_))));
    assert!(session.session_id().await.is_none());
}

#[tokio::test]
async fn find_element_yields_one_opaque_handle() {
    let (session, executor) = started(vec![success(
        json!({"value": {ELEMENT_KEY: "e1"}}),
    )])
    .await;

    let element = session.find_element("css selector", "#foo").await.unwrap();
    assert_eq!(element.session().as_str(), "s1");
    // The id is opaque; its only visible form is the wire mapping.
    assert_eq!(
        encode(&Arg::Element(element)),
        json!({ELEMENT_KEY: "e1"})
    );

    let sent = executor.commands();
    assert_eq!(sent[1].cmd(), Cmd::FindElement);
    assert_eq!(sent[1].session().unwrap().as_str(), "s1");
    assert_eq!(sent[1].params()["using"], "css selector");
    assert_eq!(sent[1].params()["value"], "#foo");
}

#[tokio::test]
async fn find_elements_projects_a_homogeneous_collection() {
    let (session, _) = started(vec![success(
        json!({"value": [{ELEMENT_KEY: "e1"}, {ELEMENT_KEY: "e2"}]}),
    )])
    .await;

    let elements = session.find_elements("css selector", "li").await.unwrap();
    assert_eq!(elements.len(), 2);
}

#[tokio::test]
async fn find_elements_accepts_an_empty_result() {
    let (session, _) = started(vec![success(json!({"value": []}))]).await;
    let elements = session.find_elements("css selector", "li").await.unwrap();
    assert!(elements.is_empty());
}

#[tokio::test]
async fn wire_error_becomes_one_typed_failure() {
    let (session, _) = started(vec![wire_error(json!({
        "value": {"error": "no such element", "message": "Unable to locate element"}
    }))])
    .await;

    let err = session
        .find_element("css selector", "#missing")
        .await
        .unwrap_err();
    match &err {
        Error::NoSuchElement { message, .. } => assert_eq!(message, "Unable to locate element"),
        other => panic!("expected NoSuchElement, got: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_surfaces_as_unhandled_error() {
    let (session, _) = started(vec![Err(Error::Http("connection refused".to_string()))]).await;

    let err = session.title().await.unwrap_err();
    match &err {
        Error::UnknownError { message, .. } => assert!(message.contains("connection refused")),
        other => panic!("expected UnknownError, got: {other:?}"),
    }
}

#[tokio::test]
async fn script_arguments_marshal_element_handles_outbound() {
    let (session, executor) = started(vec![success(json!({"value": null}))]).await;

    let element = Element::new(SessionId::new("s1"), "e1").unwrap();
    session
        .execute_script(
            "arguments[2].click();",
            vec![Arg::from("a"), Arg::from(1i64), Arg::Element(element)],
        )
        .await
        .unwrap();

    let sent = executor.commands();
    assert_eq!(sent[1].cmd(), Cmd::ExecuteScript);
    assert_eq!(
        sent[1].params()["args"],
        json!(["a", 1, {ELEMENT_KEY: "e1"}])
    );
}

#[tokio::test]
async fn script_results_marshal_element_handles_inbound() {
    let (session, _) = started(vec![success(
        json!({"value": {"target": {ELEMENT_KEY: "e9"}, "count": 2}}),
    )])
    .await;

    let result = session
        .execute_script("return lookup();", Vec::new())
        .await
        .unwrap();
    match result {
        wd::WdValue::Map(map) => {
            assert!(map["target"].as_element().is_some());
        }
        other => panic!("expected Map, got: {other:?}"),
    }
}

#[tokio::test]
async fn quit_swallows_tolerated_failures_and_clears_the_id() {
    let (session, _) = started(vec![wire_error(json!({
        "value": {"error": "invalid session id", "message": "session is gone"}
    }))])
    .await;

    session.quit().await.unwrap();
    assert!(session.session_id().await.is_none());

    // Idempotent-safe: a second quit issues no remote call.
    session.quit().await.unwrap();
}

#[tokio::test]
async fn quit_propagates_other_failures_but_still_clears_the_id() {
    let (session, _) = started(vec![wire_error(json!({
        "value": {"error": "unexpected alert open", "message": "an alert is blocking quit"}
    }))])
    .await;

    let err = session.quit().await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedAlertOpen { .. }));
    assert!(session.session_id().await.is_none());
}

#[tokio::test]
async fn log_paths_degrade_to_empty_when_not_implemented() {
    let (session, _) = started(vec![
        wire_error(json!({
            "value": {"error": "unknown command", "message": "se/log/types not mapped"}
        })),
        wire_error(json!({
            "value": {"error": "unknown method", "message": "se/log not mapped"}
        })),
    ])
    .await;

    assert!(session.log_types().await.unwrap().is_empty());
    assert!(session.logs("browser").await.unwrap().is_empty());
}

#[tokio::test]
async fn log_entries_parse_when_the_server_implements_them() {
    let (session, _) = started(vec![success(json!({
        "value": [
            {"level": "SEVERE", "message": "boom", "timestamp": 1700000000000i64},
            {"level": "INFO", "message": "ok", "timestamp": 1700000000001i64}
        ]
    }))])
    .await;

    let entries = session.logs("browser").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].level, "SEVERE");
    assert_eq!(entries[0].message, "boom");
}

#[tokio::test]
async fn element_commands_bind_the_element_id() {
    let (session, executor) = started(vec![
        success(json!({"value": {ELEMENT_KEY: "e1"}})),
        success(json!({"value": null})),
        success(json!({"value": "Submit"})),
    ])
    .await;

    let element = session.find_element("css selector", "button").await.unwrap();
    session.click(&element).await.unwrap();
    assert_eq!(
        session.element_attribute(&element, "aria-label").await.unwrap(),
        Some("Submit".to_string())
    );

    let sent = executor.commands();
    assert_eq!(sent[2].cmd(), Cmd::ElementClick);
    assert_eq!(sent[2].params()["elementId"], "e1");
    assert_eq!(sent[3].cmd(), Cmd::GetElementAttribute);
    assert_eq!(sent[3].params()["name"], "aria-label");
}

#[tokio::test]
async fn shadow_roots_resolve_and_locate_elements() {
    let (session, executor) = started(vec![
        success(json!({"value": {ELEMENT_KEY: "host"}})),
        success(json!({"value": {SHADOW_ROOT_KEY: "sr1"}})),
        success(json!({"value": {ELEMENT_KEY: "inner"}})),
    ])
    .await;

    let host = session.find_element("css selector", "my-widget").await.unwrap();
    let root = session.shadow_root(&host).await.unwrap();
    let inner = session
        .find_element_from_shadow_root(&root, "css selector", "input")
        .await
        .unwrap();
    assert_eq!(
        encode(&Arg::Element(inner)),
        json!({ELEMENT_KEY: "inner"})
    );

    let sent = executor.commands();
    assert_eq!(sent[3].cmd(), Cmd::FindElementFromShadowRoot);
    assert_eq!(sent[3].params()["shadowId"], "sr1");
}

#[tokio::test]
async fn element_handles_do_not_cross_sessions() {
    let (session, _) = started(Vec::new()).await;
    let foreign = Element::new(SessionId::new("other"), "e1").unwrap();
    let err = session.click(&foreign).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn status_is_sessionless() {
    let (session, executor) = started(vec![success(json!({"value": {"ready": true}}))]).await;

    let status = session.status().await.unwrap();
    assert_eq!(status["ready"], true);

    let sent = executor.commands();
    assert_eq!(sent[1].cmd(), Cmd::Status);
    assert!(sent[1].session().is_none());
}
