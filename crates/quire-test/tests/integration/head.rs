//! Tests for the HEAD method.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn authenticated_head_returns_entity_headers() {
    let service = create_test_service(test_store());

    let response = TestRequest::head(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("Content-Type", "text/plain")
        .assert_body_empty();

    assert!(response.get_header("ETag").is_some());
    let last_modified = response
        .get_header("Last-Modified")
        .expect("Last-Modified should be set");
    assert!(last_modified.ends_with(" GMT"), "got {last_modified}");
}

#[test_log::test(tokio::test)]
async fn anonymous_office_probe_gets_metadata() {
    let service = create_test_service(test_store());

    let authenticated = TestRequest::head(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .send(&service)
        .await;

    let probe = TestRequest::head(&dav_path("/alpha/readme.txt"))
        .user_agent(OFFICE_USER_AGENT)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("Content-Type", "text/plain");

    assert_eq!(probe.get_header("ETag"), authenticated.get_header("ETag"));
    assert_eq!(
        probe.get_header("Last-Modified"),
        authenticated.get_header("Last-Modified")
    );
}

#[test_log::test(tokio::test)]
async fn anonymous_head_of_hidden_resource_gets_not_found() {
    let service = create_test_service(test_store());

    TestRequest::head(&dav_path("/alpha/readme.txt"))
        .user_agent("curl/8.0")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_no_header("ETag");
}

#[test_log::test(tokio::test)]
async fn collections_report_directory_content_type() {
    let service = create_test_service(test_store());

    TestRequest::head(&dav_path("/alpha"))
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("Content-Type", "inode/directory")
        .assert_no_header("ETag");
}
