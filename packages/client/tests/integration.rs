use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use etcd2_client::{Host, Session};

fn host_of(server: &MockServer) -> Host {
    let address = server.address();
    Host::new(address.ip().to_string(), address.port())
}

fn leaf_body(key: &str, value: &str, index: u64) -> serde_json::Value {
    json!({
        "action": "get",
        "node": {
            "key": key,
            "value": value,
            "modifiedIndex": index,
            "createdIndex": index
        }
    })
}

#[tokio::test]
async fn put_then_get_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/keys/a"))
        .and(body_string("value=x"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "action": "set",
            "node": {"key": "/a", "value": "x", "modifiedIndex": 4, "createdIndex": 4}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/keys/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leaf_body("/a", "x", 4)))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let node = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.put("/a", "x").unwrap().unwrap();
        session.get("/a").unwrap().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(node.key(), "/a");
    assert_eq!(node.value(), Some("x"));
    assert!(!node.is_directory());
}

#[tokio::test]
async fn queue_round_trip_preserves_order() {
    let server = MockServer::start().await;

    for (index, value) in [(7, "apples"), (8, "oranges"), (9, "grapes")] {
        Mock::given(method("POST"))
            .and(path("/v2/keys/q"))
            .and(body_string(format!("value={}", value)))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": "create",
                "node": {
                    "key": format!("/q/{:020}", index),
                    "value": value,
                    "modifiedIndex": index,
                    "createdIndex": index
                }
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/v2/keys/q"))
        .and(query_param("recursive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action": "get",
            "node": {
                "key": "/q",
                "dir": true,
                "modifiedIndex": 7,
                "createdIndex": 7,
                "nodes": [
                    {"key": "/q/00000000000000000007", "value": "apples", "modifiedIndex": 7, "createdIndex": 7},
                    {"key": "/q/00000000000000000008", "value": "oranges", "modifiedIndex": 8, "createdIndex": 8},
                    {"key": "/q/00000000000000000009", "value": "grapes", "modifiedIndex": 9, "createdIndex": 9}
                ]
            }
        })))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let values = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.add_to_queue("/q", "apples").unwrap().unwrap();
        session.add_to_queue("/q", "oranges").unwrap().unwrap();
        session.add_to_queue("/q", "grapes").unwrap().unwrap();
        session.queue_values("/q").unwrap()
    })
    .await
    .unwrap();

    assert_eq!(values, vec!["apples", "oranges", "grapes"]);
}

#[tokio::test]
async fn missing_key_is_a_store_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/keys/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": 100,
            "message": "Key not found",
            "cause": "/missing",
            "index": 11
        })))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let error = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.get("/missing").unwrap().unwrap_err()
    })
    .await
    .unwrap();

    assert!(error.is_key_not_found());
    assert_eq!(error.cause, "/missing");
}

#[tokio::test]
async fn wait_long_polls_with_the_wait_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/keys/k"))
        .and(query_param("wait", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leaf_body("/k", "changed", 12)))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let node = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.wait("/k").unwrap().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(node.value(), Some("changed"));
    assert_eq!(node.modified_index(), 12);
}

#[tokio::test]
async fn hosts_rotate_round_robin_across_servers() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/keys/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leaf_body("/a", "from-first", 1)))
        .mount(&first)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/keys/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leaf_body("/a", "from-second", 1)))
        .mount(&second)
        .await;

    let hosts = vec![host_of(&first), host_of(&second)];

    let values = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(hosts).unwrap();
        (0..3)
            .map(|_| {
                session
                    .get("/a")
                    .unwrap()
                    .unwrap()
                    .value()
                    .unwrap()
                    .to_string()
            })
            .collect::<Vec<_>>()
    })
    .await
    .unwrap();

    assert_eq!(values, vec!["from-first", "from-second", "from-first"]);
}

#[tokio::test]
async fn put_values_are_form_encoded() {
    let server = MockServer::start().await;

    // The raw bytes "a&b=c" would split into bogus form fields; the
    // client must send them encoded.
    Mock::given(method("PUT"))
        .and(path("/v2/keys/enc"))
        .and(body_string("value=a%26b%3Dc"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "node": {"key": "/enc", "value": "a&b=c", "modifiedIndex": 2, "createdIndex": 2}
        })))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let success = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.put("/enc", "a&b=c").unwrap().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(success.node.value(), Some("a&b=c"));
}

#[tokio::test]
async fn delete_key_returns_the_previous_node() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/keys/old"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action": "delete",
            "node": {"key": "/old", "modifiedIndex": 20, "createdIndex": 3},
            "prevNode": {"key": "/old", "value": "gone", "modifiedIndex": 3, "createdIndex": 3}
        })))
        .mount(&server)
        .await;

    let host = host_of(&server);

    let success = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(vec![host]).unwrap();
        session.delete_key("/old").unwrap().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(success.prev_node.unwrap().value(), Some("gone"));
}
