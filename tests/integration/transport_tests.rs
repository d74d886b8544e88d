//! Wire-level behavior of a client over HTTP.

use jobboard::auth::{Session, StaticToken};
use jobboard::jobs::CreateJobInput;
use jobboard::{Client, ErrorKind};
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::init_tracing;

fn job_body() -> serde_json::Value {
    json!({"data": {"job": {
        "__typename": "Job",
        "id": "j1",
        "title": "Engineer",
        "company": {"__typename": "Company", "id": "c1", "name": "Acme"},
        "description": "Build things"
    }}})
}

fn http_client(server: &MockServer, session: &Session) -> Client {
    init_tracing();
    Client::builder()
        .url(format!("{}/graphql", server.uri()))
        .auth(session.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_logged_in_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer T"))
        .and(body_partial_json(json!({"variables": {"id": "j1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new();
    session.login("T");
    let client = http_client(&server, &session);

    let job = client.load_job("j1").await.unwrap().unwrap();
    assert_eq!(job.company.name, "Acme");
}

#[tokio::test]
async fn test_logged_out_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body()))
        .mount(&server)
        .await;

    let client = http_client(&server, &Session::new());
    client.load_job("j1").await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_query_text_and_variables_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"jobs": []}})))
        .mount(&server)
        .await;

    let client = http_client(&server, &Session::new());
    client.load_jobs().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["variables"], json!({}));
    assert_eq!(body["query"], client.documents().jobs.text());
}

#[test_case(json!([{"message": "Unauthorized"}]), ErrorKind::Unauthorized, "Unauthorized"; "unauthorized")]
#[test_case(json!([{"message": "a"}, {"message": "b"}]), ErrorKind::Response, "a\nb"; "joined")]
#[test_case(json!([{"extensions": {}}]), ErrorKind::Response, ""; "no message")]
#[tokio::test]
async fn test_errors_fail_the_call(errors: serde_json::Value, kind: ErrorKind, message: &str) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"job": null}, "errors": errors})),
        )
        .mount(&server)
        .await;

    let session = Session::new();
    session.login("T");
    let client = http_client(&server, &session);

    let err = client
        .create_job(&CreateJobInput::new("Engineer", "Build things"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.message(), message);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_http_status_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(job_body()))
        .mount(&server)
        .await;

    let client = http_client(&server, &Session::new());
    assert!(client.load_job("j1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = http_client(&server, &Session::new());
    let err = client.load_jobs().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_static_token_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"jobs": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(format!("{}/graphql", server.uri()))
        .auth(StaticToken::new("fixed"))
        .build()
        .unwrap();
    assert!(client.load_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cache_first_survives_server_going_away() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = http_client(&server, &Session::new());
    let first = client.load_job("j1").await.unwrap();
    let second = client.load_job("j1").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.transport_stats().requests_sent, 1);
}
