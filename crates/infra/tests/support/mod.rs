//! Shared helpers for `peoplegraph-infra` integration tests.
//!
//! Builds Zoho-shaped JSON bodies and clients pointed at a wiremock server.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use peoplegraph_domain::ConnectorConfig;
use peoplegraph_infra::{StaticTokenProvider, ZohoPeopleClient};
use serde_json::{json, Map, Value};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness writer
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("peoplegraph_infra=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Configuration pointing both endpoints at `server`
pub fn config_for(server: &MockServer) -> ConnectorConfig {
    let mut config = ConnectorConfig::new("client-id", "client-secret", "auth-code", "US");
    config.api_base_url = Some(format!("{}/people/api/forms", server.uri()));
    config.token_url = Some(format!("{}/oauth/v2/token", server.uri()));
    config.request_timeout_secs = 5;
    config
}

/// Forms client authenticating with [`TEST_TOKEN`]
pub fn client_for(server: &MockServer) -> ZohoPeopleClient {
    init_tracing();
    ZohoPeopleClient::with_token_provider(
        &config_for(server),
        Arc::new(StaticTokenProvider::new(TEST_TOKEN)),
    )
    .expect("client should build")
}

pub fn employee_json(zoho_id: i64, role: &str, department_id: &str) -> Value {
    json!({
        "Zoho_ID": zoho_id,
        "EmployeeID": format!("E{zoho_id}"),
        "FirstName": format!("First{zoho_id}"),
        "LastName": "Last",
        "EmailID": format!("user{zoho_id}@example.com"),
        "Role": role,
        "Role.ID": format!("rid-{zoho_id}"),
        "Department": "Operations",
        "Department.ID": department_id,
    })
}

pub fn department_json(zoho_id: i64, name: &str, parent_id: &str, lead_id: &str) -> Value {
    json!({
        "Zoho_ID": zoho_id,
        "Department": name,
        "Mail_Alias": format!("{}@example.com", name.to_lowercase()),
        "Parent_Department.ID": parent_id,
        "Department_Lead": if lead_id.is_empty() { "" } else { "Grace Hopper" },
        "Department_Lead.ID": lead_id,
        "Department_Lead.MailID": if lead_id.is_empty() { "" } else { "grace@example.com" },
    })
}

/// `getRecords` body with one single-key chunk per slice
pub fn listing_body(chunks: Vec<Vec<Value>>) -> Value {
    let result: Vec<Value> = chunks
        .into_iter()
        .enumerate()
        .map(|(i, records)| {
            let mut chunk = Map::new();
            chunk.insert(format!("chunk{i}"), Value::Array(records));
            Value::Object(chunk)
        })
        .collect();
    json!({
        "response": {
            "result": result,
            "message": "Data fetched successfully",
            "uri": "/api/forms/employee/getRecords",
            "status": 0
        }
    })
}

/// `getDataByID` body with a flat result
pub fn lookup_body(records: Vec<Value>) -> Value {
    json!({
        "response": {
            "result": records,
            "message": "Data fetched successfully",
            "uri": "/api/forms/employee/getDataByID",
            "status": 0
        }
    })
}

/// Body sent once the offset is past the last record
pub fn no_records_body() -> Value {
    json!({
        "response": {
            "errors": { "code": 7024, "message": "No records found" },
            "message": "Error occurred",
            "uri": "/api/forms/employee/getRecords",
            "status": 1
        }
    })
}
