//! Pact contract tests for the Nexus roles API
//!
//! These tests define the contract between the Nexus Operator and
//! `/service/rest/v1/security/roles`.

mod common;

use common::{base_url, nexus_client, BASIC_AUTH};
use nexus_operator::prelude::*;
use nexus_operator::translate::{translate_role, RolePayload};
use pact_consumer::prelude::*;
use serde_json::json;

fn developers() -> RolePayload {
    let spec: RoleSpec = serde_json::from_value(json!({
        "roleId": "developers",
        "name": "Developers",
        "description": "Team developers",
        "privileges": ["maven-releases-read"],
        "roles": ["nx-anonymous"]
    }))
    .unwrap();
    translate_role(&spec)
}

fn developers_body() -> serde_json::Value {
    json!({
        "id": "developers",
        "name": "Developers",
        "description": "Team developers",
        "privileges": ["maven-releases-read"],
        "roles": ["nx-anonymous"]
    })
}

#[tokio::test]
async fn test_create_role_contract() {
    common::init_rustls();

    let mut pact_builder = PactBuilder::new("Nexus-Operator", "Nexus");

    pact_builder.interaction("create a role", "", |mut i| {
        i.given("no role with id developers exists");
        i.request
            .method("POST")
            .path("/service/rest/v1/security/roles")
            .header("authorization", BASIC_AUTH)
            .json_body(developers_body());
        i.response
            .status(201)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "developers",
                "source": "default",
                "name": "Developers",
                "description": "Team developers",
                "readOnly": false,
                "privileges": ["maven-releases-read"],
                "roles": ["nx-anonymous"]
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = nexus_client(&base_url(mock_server.url()));

    client
        .create_role(&developers())
        .await
        .expect("create should succeed on 201");
}

#[tokio::test]
async fn test_get_role_contract() {
    common::init_rustls();

    let mut pact_builder = PactBuilder::new("Nexus-Operator", "Nexus");

    pact_builder.interaction("get an existing role", "", |mut i| {
        i.given("role developers exists");
        i.request
            .method("GET")
            .path("/service/rest/v1/security/roles/developers")
            .header("authorization", BASIC_AUTH)
            .header("accept", "application/json");
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "developers",
                "source": "default",
                "name": "Developers",
                "description": "Team developers",
                "readOnly": false,
                "privileges": ["maven-releases-read"],
                "roles": ["nx-anonymous"]
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = nexus_client(&base_url(mock_server.url()));

    let role = client
        .get_role("developers")
        .await
        .expect("get should succeed")
        .expect("role should exist");
    assert_eq!(role["source"], "default");
    assert_eq!(role["privileges"], json!(["maven-releases-read"]));
}

#[tokio::test]
async fn test_update_role_contract() {
    common::init_rustls();

    let mut pact_builder = PactBuilder::new("Nexus-Operator", "Nexus");

    pact_builder.interaction("update a role", "", |mut i| {
        i.given("role developers exists");
        i.request
            .method("PUT")
            .path("/service/rest/v1/security/roles/developers")
            .header("authorization", BASIC_AUTH)
            .json_body(developers_body());
        i.response.status(204);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = nexus_client(&base_url(mock_server.url()));

    client
        .update_role(&developers())
        .await
        .expect("update should succeed on 204");
}

#[tokio::test]
async fn test_delete_role_contract() {
    common::init_rustls();

    let mut pact_builder = PactBuilder::new("Nexus-Operator", "Nexus");

    pact_builder.interaction("delete an existing role", "", |mut i| {
        i.given("role developers exists");
        i.request
            .method("DELETE")
            .path("/service/rest/v1/security/roles/developers")
            .header("authorization", BASIC_AUTH);
        i.response.status(204);
        i
    });

    pact_builder.interaction("delete a missing role", "", |mut i| {
        i.given("no role with id gone exists");
        i.request
            .method("DELETE")
            .path("/service/rest/v1/security/roles/gone")
            .header("authorization", BASIC_AUTH);
        i.response.status(404);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = nexus_client(&base_url(mock_server.url()));

    client
        .delete_role("developers")
        .await
        .expect("delete should succeed on 204");
    assert!(client.delete_role("gone").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_server_error_is_reported_with_body_contract() {
    common::init_rustls();

    let mut pact_builder = PactBuilder::new("Nexus-Operator", "Nexus");

    pact_builder.interaction("get a role while Nexus is failing", "", |mut i| {
        i.given("Nexus is unhealthy");
        i.request
            .method("GET")
            .path("/service/rest/v1/security/roles/developers")
            .header("authorization", BASIC_AUTH);
        i.response
            .status(500)
            .header("content-type", "text/plain")
            .body("database unavailable");
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let client = nexus_client(&base_url(mock_server.url()));

    let err = client.get_role("developers").await.unwrap_err();
    match err {
        NexusError::UnexpectedResponse { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected UnexpectedResponse, got {other}"),
    }
}
