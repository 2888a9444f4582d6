//! Operation tests against a wiremock server.
//!
//! These pin the wire format of every operation: payload shape, endpoint,
//! and how the server's plain-text-style responses are decoded.

use bugspad::{
    list_components, list_recent_created, list_recent_updated, BugFields, BugspadClient,
    BugspadError, Component, Create, List, NewBug, NewComponent, NewProduct, NewRelease, Product,
    Release,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BugspadClient {
    BugspadClient::new(&server.uri(), "dev@example.org", "hunter2").unwrap()
}

// A client pointed at a closed port: any request would fail with a
// transport error, so a usage/validation error proves nothing was sent.
fn offline_client() -> BugspadClient {
    BugspadClient::new("http://127.0.0.1:9", "dev@example.org", "hunter2").unwrap()
}

// =============================================================================
// Bug creation
// =============================================================================

#[tokio::test]
async fn test_create_bug_returns_scoped_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bug/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "summary": "A summary",
            "description": "A description",
            "component_id": 7,
            "priority": "high",
            "emails": ["dev@example.org"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("17\n"))
        .expect(1)
        .mount(&server)
        .await;

    let fields = BugFields {
        priority: Some("high".to_string()),
        emails: Some("dev@example.org".into()),
        ..Default::default()
    };
    let bug = client(&server)
        .create_bug(&NewBug::new("A summary", "A description", 7).with_fields(fields))
        .await
        .unwrap();

    assert_eq!(bug.bug_id(), Some(17));
}

#[tokio::test]
async fn test_create_bug_wrong_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bug/"))
        .respond_with(ResponseTemplate::new(200).set_body_json("Authentication failure."))
        .mount(&server)
        .await;

    let result = client(&server)
        .create_bug(&NewBug::new("s", "d", 1))
        .await;

    assert!(matches!(result, Err(BugspadError::AuthenticationFailed)));
}

#[tokio::test]
async fn test_create_bug_non_numeric_response_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bug/"))
        .respond_with(ResponseTemplate::new(200).set_body_json("Wrong kwargs"))
        .mount(&server)
        .await;

    let result = client(&server).create_bug(&NewBug::new("s", "d", 1)).await;

    assert!(matches!(
        result,
        Err(BugspadError::UnexpectedResponse { ref message }) if message == "Wrong kwargs"
    ));
}

// =============================================================================
// Bug-scoped operations
// =============================================================================

#[tokio::test]
async fn test_add_comment_parses_comment_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/comment/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "bug_id": 12,
            "desc": "this is a comment",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("101\n"))
        .expect(1)
        .mount(&server)
        .await;

    let comment_id = client(&server)
        .with_bug_id(12)
        .add_comment("this is a comment")
        .await
        .unwrap();

    assert_eq!(comment_id, 101);
}

#[tokio::test]
async fn test_bug_scoped_operations_require_bug_id() {
    let client = offline_client();

    let comment = client.add_comment("c").await;
    assert!(matches!(
        comment,
        Err(BugspadError::MissingBugId { operation: "add_comment" })
    ));

    let update = client.update_bug(&BugFields::default()).await;
    assert!(matches!(
        update,
        Err(BugspadError::MissingBugId { operation: "update_bug" })
    ));

    let add = client.add_cc("dev@example.org").await;
    assert!(matches!(add, Err(BugspadError::MissingBugId { .. })));

    let remove = client.remove_cc("dev@example.org").await;
    assert!(matches!(remove, Err(BugspadError::MissingBugId { .. })));
}

#[tokio::test]
async fn test_update_bug_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/updatebug/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "bug_id": 5,
            "status": "new",
            "hardware": "x86_64",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json("Success"))
        .expect(1)
        .mount(&server)
        .await;

    let fields = BugFields {
        status: Some("new".to_string()),
        hardware: Some("x86_64".to_string()),
        ..Default::default()
    };

    client(&server)
        .with_bug_id(5)
        .update_bug(&fields)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_bug_wrong_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/updatebug/"))
        .respond_with(ResponseTemplate::new(200).set_body_json("Authentication failure."))
        .mount(&server)
        .await;

    let result = client(&server)
        .with_bug_id(5)
        .update_bug(&BugFields::default())
        .await;

    assert!(matches!(result, Err(BugspadError::AuthenticationFailed)));
}

#[tokio::test]
async fn test_unknown_optional_field_fails_before_any_request() {
    // The whitelist check happens while building the field set, so the
    // failure needs no server at all.
    let err = BugFields::from_pairs([
        ("status", json!("new")),
        ("wrong_kwarg", json!("dummy")),
    ])
    .unwrap_err();

    assert!(matches!(err, BugspadError::UnknownField(ref name) if name == "wrong_kwarg"));
}

// =============================================================================
// CC management
// =============================================================================

#[tokio::test]
async fn test_cc_single_many_and_collection_produce_the_same_shape() {
    let expected = json!({
        "user": "dev@example.org",
        "password": "hunter2",
        "bug_id": 3,
        "emails": ["kushal@example.org"],
        "action": "add",
    });

    // Single address
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bug/cc"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    client(&server)
        .with_bug_id(3)
        .add_cc("kushal@example.org")
        .await
        .unwrap();

    // Fixed-size array
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bug/cc"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    client(&server)
        .with_bug_id(3)
        .add_cc(["kushal@example.org"])
        .await
        .unwrap();

    // Owned vector
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bug/cc"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    client(&server)
        .with_bug_id(3)
        .add_cc(vec!["kushal@example.org".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_cc_sends_remove_action() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bug/cc"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "bug_id": 3,
            "emails": ["a@example.org", "b@example.org"],
            "action": "remove",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .with_bug_id(3)
        .remove_cc(["a@example.org", "b@example.org"])
        .await
        .unwrap();
}

// =============================================================================
// Recent-bugs listings
// =============================================================================

#[tokio::test]
async fn test_recent_created_decodes_each_entry() {
    let server = MockServer::start().await;

    // The server returns JSON-encoded strings, one per bug
    let body: Vec<String> = (0..10)
        .map(|i| {
            json!({ "id": 20 - i, "status": "new", "summary": format!("bug {}", 20 - i) })
                .to_string()
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/latestcreated/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let bugs = list_recent_created(&client(&server)).await.unwrap();

    assert_eq!(bugs.len(), 10);
    assert_eq!(bugs[0].id, 20);
    assert_eq!(bugs[9].id, 11);
    assert_eq!(bugs[0].status, "new");
    assert_eq!(bugs[0].summary, "bug 20");
}

#[tokio::test]
async fn test_recent_updated_uses_its_own_endpoint() {
    let server = MockServer::start().await;

    let body = vec![json!({ "id": 2, "status": "open", "summary": "s" }).to_string()];

    Mock::given(method("GET"))
        .and(path("/latestupdated/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let bugs = list_recent_updated(&client(&server)).await.unwrap();
    assert_eq!(bugs.len(), 1);
    assert_eq!(bugs[0].status, "open");
}

// =============================================================================
// Components
// =============================================================================

#[tokio::test]
async fn test_list_components_maps_name_to_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/components/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": [1, "server", "The server component"],
            "client": [2, "client", "The client component"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let components = list_components(&client(&server), 1).await.unwrap();

    assert_eq!(components.len(), 2);
    let server_component = &components["server"];
    assert_eq!(server_component.id, 1);
    assert_eq!(server_component.description, "The server component");
    assert_eq!(server_component.product_id, Some(1));
}

#[tokio::test]
async fn test_component_list_trait_sorts_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/components/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client": [2, "client", "The client component"],
            "server": [1, "server", "The server component"],
        })))
        .mount(&server)
        .await;

    let components = Component::list(&client(&server), &bugspad::ComponentQuery { product_id: 1 })
        .await
        .unwrap();

    assert_eq!(components.len(), 2);
    assert_eq!(components[0].name, "server");
    assert_eq!(components[1].name, "client");
}

#[tokio::test]
async fn test_list_components_unknown_product_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/components/0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let components = list_components(&client(&server), 0).await.unwrap();
    assert!(components.is_empty());
}

#[tokio::test]
async fn test_add_component_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/component/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "name": "new_component",
            "description": "An awesome new component",
            "product_id": 1,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "new_component",
            "description": "An awesome new component",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let component = Component::create(
        &client(&server),
        &NewComponent::new("new_component", "An awesome new component", 1),
    )
    .await
    .unwrap();

    assert_eq!(component.id, 9);
    assert_eq!(component.name, "new_component");
    assert_eq!(component.product_id, Some(1));
}

#[tokio::test]
async fn test_add_component_no_such_product() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/component/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "No such product.",
            "name": "new_component",
            "description": "d",
        })))
        .mount(&server)
        .await;

    let result = Component::create(
        &client(&server),
        &NewComponent::new("new_component", "d", 0),
    )
    .await;

    assert!(matches!(
        result,
        Err(BugspadError::NoSuchProduct { product_id: 0 })
    ));
}

// =============================================================================
// Products and releases
// =============================================================================

#[tokio::test]
async fn test_add_product_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/product/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "name": "New product",
            "description": "This is going to blow your mind!",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "name": "New product",
            "description": "This is going to blow your mind!",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = Product::create(
        &client(&server),
        &NewProduct::new("New product", "This is going to blow your mind!"),
    )
    .await
    .unwrap();

    assert_eq!(product.id, 2);
    assert_eq!(product.name, "New product");
}

#[tokio::test]
async fn test_add_release_expects_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/releases/"))
        .and(body_json(json!({
            "user": "dev@example.org",
            "password": "hunter2",
            "name": "BP-2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json("Success"))
        .expect(1)
        .mount(&server)
        .await;

    let release = Release::create(&client(&server), &NewRelease::new("BP-2"))
        .await
        .unwrap();

    assert_eq!(release.name, "BP-2");
}

#[tokio::test]
async fn test_list_releases() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/releases/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["BP-1", "BP-2"])))
        .expect(1)
        .mount(&server)
        .await;

    let releases = Release::list(&client(&server), &()).await.unwrap();

    assert_eq!(releases.len(), 2);
    assert_eq!(releases[1].name, "BP-2");
}
