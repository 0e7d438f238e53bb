//! Integration tests for the Zoho People forms client
//!
//! Runs the client against a wiremock server shaped like the forms API and
//! checks paging, envelope decoding and rate-limit handling end to end.

mod support;

use std::sync::Arc;

use peoplegraph_common::pagination::PageToken;
use peoplegraph_core::ports::{AccessTokenProvider, PeopleDirectory};
use peoplegraph_core::{PeopleConnector, ResourceSyncer};
use peoplegraph_domain::{
    ConnectorConfig, PeopleGraphError, RateLimitStatus, ResourceId, Result as DomainResult,
    RoleCatalogs,
};
use peoplegraph_infra::{StaticTokenProvider, ZohoPeopleClient};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use support::{
    client_for, config_for, department_json, employee_json, listing_body, lookup_body,
    no_records_body, TEST_TOKEN,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const EMPLOYEES_PATH: &str = "/people/api/forms/employee/getRecords";
const EMPLOYEE_BY_ID_PATH: &str = "/people/api/forms/employee/getDataByID";
const DEPARTMENTS_PATH: &str = "/people/api/forms/department/getRecords";
const DEPARTMENT_BY_ID_PATH: &str = "/people/api/forms/department/getDataByID";

fn query_value(request: &Request, key: &str) -> Option<String> {
    request.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}

/// Serve `total` employees honouring `sIndex` (1-based) and `limit`
async fn mount_employee_collection(server: &MockServer, total: i64) {
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(move |request: &Request| {
            let start: i64 =
                query_value(request, "sIndex").and_then(|v| v.parse().ok()).unwrap_or(1);
            let limit: i64 =
                query_value(request, "limit").and_then(|v| v.parse().ok()).unwrap_or(100);
            if start > total {
                return ResponseTemplate::new(200).set_body_json(no_records_body());
            }
            let end = (start + limit - 1).min(total);
            let records: Vec<Value> =
                (start..=end).map(|id| employee_json(id, "Team member", "7")).collect();
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Limit", "100")
                .insert_header("X-RateLimit-Remaining", "99")
                .set_body_json(listing_body(vec![records]))
        })
        .mount(server)
        .await;
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn list_employees_sends_auth_and_paging_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .and(query_param("sIndex", "1"))
        .and(query_param("limit", "10"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing_body(vec![vec![employee_json(1, "Admin", "7")]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).list_employees(10, "").await.expect("list employees");

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].zoho_id, 1);
    assert_eq!(page.records[0].department_id, "7");
    assert_eq!(page.next_page_token, "1");
}

#[tokio::test]
async fn listing_flattens_chunks_in_encounter_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEPARTMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(vec![
            vec![department_json(1, "A", "", ""), department_json(2, "B", "1", "")],
            vec![department_json(3, "C", "1", "")],
        ])))
        .mount(&server)
        .await;

    let page = client_for(&server).list_departments(10, "1").await.expect("list departments");

    let ids: Vec<i64> = page.records.iter().map(|d| d.zoho_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    // Three flattened records on a page of ten: the listing is over.
    assert_eq!(page.next_page_token, "");
}

/// 25 records with page size 10: tokens walk "1", "11", "21", then "".
#[tokio::test]
async fn offsets_walk_a_25_record_collection() {
    let server = MockServer::start().await;
    mount_employee_collection(&server, 25).await;
    let client = client_for(&server);

    let mut token = String::new();
    let mut tokens = Vec::new();
    let mut first_ids = Vec::new();
    loop {
        let page = client.list_employees(10, &token).await.expect("page");
        first_ids.push(page.records.first().map(|e| e.zoho_id));
        tokens.push(page.next_page_token.clone());
        if page.next_page_token.is_empty() {
            assert_eq!(page.records.len(), 5);
            break;
        }
        token = page.next_page_token;
    }

    assert_eq!(tokens, vec!["1", "11", "21", ""]);
    assert_eq!(first_ids, vec![Some(1), Some(1), Some(11), Some(21)]);
}

#[tokio::test]
async fn oversized_page_request_is_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(vec![vec![]])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.list_employees(500, "").await.expect("oversized");
    let page = client.list_employees(0, "1").await.expect("zero");

    assert_eq!(page.next_page_token, "");
}

#[tokio::test]
async fn no_records_envelope_ends_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_records_body()))
        .mount(&server)
        .await;

    let page = client_for(&server).list_employees(10, "101").await.expect("page");

    assert!(page.records.is_empty());
    assert_eq!(page.next_page_token, "");
    assert!(page.annotations.rate_limit().is_some());
}

#[tokio::test]
async fn non_numeric_offset_is_pagination_error() {
    let server = MockServer::start().await;
    mount_employee_collection(&server, 30).await;

    let err = client_for(&server).list_employees(10, "eleven").await.unwrap_err();
    assert!(matches!(err, PeopleGraphError::Pagination(_)));
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn get_department_by_id_uses_record_id_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEPARTMENT_BY_ID_PATH))
        .and(query_param("recordId", "42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(lookup_body(vec![department_json(42, "Ops", "", "900")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let lookup = client_for(&server).get_department_by_id("42").await.expect("lookup");

    assert_eq!(lookup.records.len(), 1);
    assert_eq!(lookup.records[0].name, "Ops");
    assert_eq!(lookup.records[0].lead_id(), Some("900"));
}

#[tokio::test]
async fn unknown_employee_lookup_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_BY_ID_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(no_records_body()))
        .mount(&server)
        .await;

    let lookup = client_for(&server).get_employee_by_id("404").await.expect("lookup");
    assert!(lookup.records.is_empty());
}

// ============================================================================
// Errors and rate limits
// ============================================================================

#[tokio::test]
async fn rate_limit_headers_become_annotations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_BY_ID_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Limit", "60")
                .insert_header("X-RateLimit-Remaining", "12")
                .insert_header("X-RateLimit-Reset", "30")
                .set_body_json(lookup_body(vec![employee_json(5, "Admin", "7")])),
        )
        .mount(&server)
        .await;

    let lookup = client_for(&server).get_employee_by_id("5").await.expect("lookup");

    let rate_limit = lookup.annotations.rate_limit().expect("rate limit annotation");
    assert_eq!(rate_limit.status, RateLimitStatus::Ok);
    assert_eq!(rate_limit.limit, 60);
    assert_eq!(rate_limit.remaining, 12);
    assert!(rate_limit.reset_at.is_some());
}

#[tokio::test]
async fn throttled_response_is_api_error_with_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "20")
                .set_body_string("Too many requests"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).list_employees(10, "").await.unwrap_err();

    match &err {
        PeopleGraphError::Api { status, message, .. } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "Too many requests");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    let rate_limit = err.rate_limit().expect("rate limit attached");
    assert_eq!(rate_limit.status, RateLimitStatus::Overlimit);
}

#[tokio::test]
async fn malformed_rate_limit_header_fails_successful_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Remaining", "plenty")
                .set_body_json(listing_body(vec![vec![employee_json(1, "", "")]])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_employees(10, "").await.unwrap_err();
    assert!(matches!(err, PeopleGraphError::RateLimit(_)));
}

#[tokio::test]
async fn out_of_range_reset_header_is_rate_limit_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Reset", "100000000000000")
                .set_body_json(listing_body(vec![vec![employee_json(1, "", "")]])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_employees(10, "").await.unwrap_err();
    assert!(matches!(err, PeopleGraphError::RateLimit(ref msg) if msg.contains("out of range")));
}

#[tokio::test]
async fn truncated_error_body_falls_back_to_status_reason() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        // Promise more bytes than are sent, then hang up.
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\npartial")
            .await;
    });

    let mut config = ConnectorConfig::new("client-id", "client-secret", "auth-code", "US");
    config.api_base_url = Some(format!("http://{addr}/people/api/forms"));
    let client = ZohoPeopleClient::with_token_provider(
        &config,
        Arc::new(StaticTokenProvider::new(TEST_TOKEN)),
    )
    .expect("client");

    let err = client.list_employees(10, "").await.unwrap_err();

    match err {
        PeopleGraphError::Api { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DEPARTMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_departments(10, "").await.unwrap_err();
    assert!(matches!(err, PeopleGraphError::Decode(_)));
}

struct FailingTokens;

#[async_trait::async_trait]
impl AccessTokenProvider for FailingTokens {
    async fn access_token(&self) -> DomainResult<String> {
        Err(PeopleGraphError::Auth("invalid_client".into()))
    }
}

#[tokio::test]
async fn token_failure_aborts_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        ZohoPeopleClient::with_token_provider(&config_for(&server), Arc::new(FailingTokens))
            .expect("client");
    let err = client.list_employees(10, "").await.unwrap_err();

    assert!(matches!(err, PeopleGraphError::Auth(_)));
}

// ============================================================================
// Connector over HTTP
// ============================================================================

#[tokio::test]
async fn connector_derives_grants_from_live_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_BY_ID_PATH))
        .and(query_param("recordId", "42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(lookup_body(vec![employee_json(42, "Manager", "7")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DEPARTMENT_BY_ID_PATH))
        .and(query_param("recordId", "7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(lookup_body(vec![department_json(7, "Ops", "", "900")])),
        )
        .mount(&server)
        .await;
    mount_employee_collection(&server, 3).await;

    let connector = PeopleConnector::new(Arc::new(client_for(&server)), RoleCatalogs::default());

    let users = connector.syncer("user").expect("user syncer");
    let listed = users.list(None, &PageToken::first(10)).await.expect("list users");
    assert_eq!(listed.items.len(), 3);

    let alan = peoplegraph_core::mapping::user_resource(&support_employee(42), "");
    let user_grants = users.grants(&alan, &PageToken::default()).await.expect("user grants");
    assert_eq!(user_grants.items.len(), 1);
    assert_eq!(user_grants.items[0].entitlement.resource_id, ResourceId::new("department", "7"));
    assert_eq!(user_grants.items[0].external_id(), Some("department-grant:7:42:Manager"));

    let departments = connector.syncer("department").expect("department syncer");
    let ops = peoplegraph_core::mapping::department_resource(&support_department(7));
    let first = departments.grants(&ops, &PageToken::default()).await.expect("grants");
    let second = departments.grants(&ops, &PageToken::default()).await.expect("grants");
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.items[0].external_id(), Some("department-grant:7:900:Team Lead"));
    assert_eq!(first.items, second.items);
}

fn support_employee(zoho_id: i64) -> peoplegraph_domain::Employee {
    serde_json::from_value(employee_json(zoho_id, "Manager", "7")).expect("employee fixture")
}

fn support_department(zoho_id: i64) -> peoplegraph_domain::Department {
    serde_json::from_value(department_json(zoho_id, "Ops", "", "900")).expect("department")
}
