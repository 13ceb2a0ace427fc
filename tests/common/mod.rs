// tests/common/mod.rs
//! Mock feedback API shared by the end-to-end tests.

#![allow(dead_code)]

use brp_feedback::{
    ClientSettings, FeedbackHttpClient, HarvestPlan, PageSize, PausePolicy, PublicationId,
    ValidatedUrl,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PUBLICATION: &str = "8285038";
pub const DOWNLOAD_BASE: &str = "https://example.org/download/";
pub const USER_AGENT: &str = "brp-feedback-tests/1.0";

/// A page envelope as the portal returns it.
pub fn envelope(total_pages: u32, page: u32, records: Vec<Value>) -> Value {
    json!({
        "_embedded": { "feedbackV1": records },
        "_links": { "self": { "href": "http://localhost/allFeedback" } },
        "page": {
            "size": 2,
            "totalElements": 3,
            "totalPages": total_pages,
            "number": page
        }
    })
}

pub fn feedback(id: i64, attachments: Value) -> Value {
    json!({
        "id": id,
        "publicationId": 8285038,
        "referenceInitiative": "Ares(2020)123",
        "dateFeedback": "2020/12/01 10:00:00",
        "language": "EN",
        "country": "BEL",
        "organization": null,
        "firstName": "Jo",
        "surname": "Doe",
        "userType": "EU_CITIZEN",
        "companySize": null,
        "feedback": format!("Feedback number {id}"),
        "attachments": attachments,
        "_links": { "self": { "href": format!("http://localhost/feedback/{id}") } }
    })
}

/// Page 0: one record with attachment A1, one without. Page 1: one record
/// whose attachment has an empty document ID.
pub fn two_page_fixture() -> (Vec<Value>, Vec<Value>) {
    let page0 = vec![
        feedback(1, json!([{ "documentId": "A1", "ersFileName": "doc.pdf" }])),
        feedback(2, json!([])),
    ];
    let page1 = vec![feedback(3, json!([{ "documentId": "", "ersFileName": "ghost.pdf" }]))];
    (page0, page1)
}

/// Answers the page-count request (no `page` parameter).
pub async fn mount_count(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/allFeedback"))
        .and(query_param("publicationId", PUBLICATION))
        .and(query_param_is_missing("page"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Answers one page request.
pub async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/allFeedback"))
        .and(query_param("publicationId", PUBLICATION))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mounts the two-page fixture, with page 1 answered by `page1_response`
/// when given.
pub async fn mount_two_pages(server: &MockServer, page1_response: Option<ResponseTemplate>) {
    let (page0, page1) = two_page_fixture();
    mount_count(
        server,
        ResponseTemplate::new(200).set_body_json(envelope(2, 0, page0.clone())),
    )
    .await;
    mount_page(
        server,
        0,
        ResponseTemplate::new(200).set_body_json(envelope(2, 0, page0)),
    )
    .await;
    mount_page(
        server,
        1,
        page1_response
            .unwrap_or_else(|| ResponseTemplate::new(200).set_body_json(envelope(2, 1, page1))),
    )
    .await;
}

pub fn client(server: &MockServer) -> FeedbackHttpClient {
    FeedbackHttpClient::new(&ClientSettings {
        endpoint: ValidatedUrl::parse(&format!("{}/allFeedback", server.uri())).unwrap(),
        user_agent: USER_AGENT.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

pub fn plan() -> HarvestPlan {
    HarvestPlan {
        publication: PublicationId::parse(PUBLICATION).unwrap(),
        page_size: PageSize::new(2).unwrap(),
        download_base: DOWNLOAD_BASE.to_string(),
        pause: PausePolicy::new(400, 0, 0).unwrap(),
    }
}

/// `page` query values of every request the server saw, in arrival order.
pub async fn requested_pages(server: &MockServer) -> Vec<u32> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
        .collect()
}
