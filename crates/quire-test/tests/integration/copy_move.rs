//! Tests for COPY and MOVE methods.
//!
//! Verifies destination rules, collection multistatus reporting, and locking.

use salvo::http::StatusCode;

use super::helpers::*;

// ============================================================================
// Destination validation
// ============================================================================

#[test_log::test(tokio::test)]
async fn move_to_other_host_is_bad_gateway() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination("http://other-host/dav/alpha/moved.txt")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_GATEWAY);

    assert!(store.contains("/alpha/readme.txt").await);
    assert!(!store.contains("/alpha/moved.txt").await);
}

#[test_log::test(tokio::test)]
async fn path_only_destination_is_bad_gateway() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination("/dav/alpha/copy.txt")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_GATEWAY);

    assert!(!store.contains("/alpha/copy.txt").await);
}

#[test_log::test(tokio::test)]
async fn move_onto_itself_is_forbidden() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/readme.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(store.contains("/alpha/readme.txt").await);
}

#[test_log::test(tokio::test)]
async fn collection_onto_itself_with_trailing_slash_is_forbidden() {
    let service = create_test_service(test_store());

    TestRequest::copy(&dav_path("/alpha/specs"))
        .as_user("alice")
        .destination(&dav_url("/alpha/specs/"))
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn missing_destination_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn anonymous_move_is_not_found() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .user_agent(OFFICE_USER_AGENT)
        .destination(&dav_url("/alpha/moved.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert!(store.contains("/alpha/readme.txt").await);
}

#[test_log::test(tokio::test)]
async fn destination_userinfo_and_port_are_ignored_for_host_check() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination("http://alice@LOCALHOST:5800/dav/alpha/copy.txt")
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    assert!(store.contains("/alpha/copy.txt").await);
}

// ============================================================================
// Documents
// ============================================================================

#[test_log::test(tokio::test)]
async fn move_document_returns_created_with_location() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/specs/readme.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .assert_header("Location", &dav_url("/alpha/specs/readme.txt"))
        .assert_body_empty();

    assert!(!store.contains("/alpha/readme.txt").await);
    assert!(store.contains("/alpha/specs/readme.txt").await);
}

#[test_log::test(tokio::test)]
async fn copy_onto_existing_document_replaces_it() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::copy(&dav_path("/alpha/specs/one.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/specs/two.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT)
        .assert_no_header("Location");
}

#[test_log::test(tokio::test)]
async fn copy_without_overwrite_fails_precondition() {
    let service = create_test_service(test_store());

    TestRequest::copy(&dav_path("/alpha/specs/one.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/specs/two.txt"))
        .overwrite(false)
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);
}

#[test_log::test(tokio::test)]
async fn copy_into_missing_parent_conflicts() {
    let service = create_test_service(test_store());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/nowhere/readme.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

// ============================================================================
// Collections
// ============================================================================

#[test_log::test(tokio::test)]
async fn copy_collection_reports_created_multistatus() {
    let store = test_store();
    let service = create_test_service(store.clone());

    let response = TestRequest::copy(&dav_path("/alpha/specs"))
        .as_user("alice")
        .destination(&dav_url("/beta/specs"))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_header("Location", &dav_url("/beta/specs/"))
        .assert_body_contains(&format!("<D:href>{}</D:href>", dav_url("/beta/specs/")))
        .assert_body_contains("<D:status>HTTP/1.1 201 Created</D:status>");

    assert_eq!(response.count_multistatus_responses(), 1);
    assert!(store.contains("/beta/specs/one.txt").await);
    assert!(store.contains("/beta/specs/two.txt").await);
    assert!(store.contains("/alpha/specs/one.txt").await);
}

#[test_log::test(tokio::test)]
async fn failed_collection_copy_reports_source_href() {
    let service = create_test_service(test_store());

    TestRequest::copy(&dav_path("/alpha/specs"))
        .as_user("alice")
        .destination(&dav_url("/alpha/readme.txt"))
        .overwrite(false)
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_no_header("Location")
        .assert_body_contains(&format!("<D:href>{}</D:href>", dav_url("/alpha/specs/")))
        .assert_body_contains("<D:status>HTTP/1.1 412 Precondition Failed</D:status>");
}

#[test_log::test(tokio::test)]
async fn move_collection_with_depth_one_conflicts() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/specs"))
        .as_user("alice")
        .depth("1")
        .destination(&dav_url("/beta/specs"))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    assert!(store.contains("/alpha/specs").await);
    assert!(!store.contains("/beta/specs").await);
}

#[test_log::test(tokio::test)]
async fn move_collection_with_infinite_depth() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/specs"))
        .as_user("alice")
        .depth("infinity")
        .destination(&dav_url("/beta/specs"))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:status>HTTP/1.1 201 Created</D:status>");

    assert!(!store.contains("/alpha/specs").await);
    assert!(store.contains("/beta/specs/two.txt").await);
}

#[test_log::test(tokio::test)]
async fn move_collection_with_unparseable_depth_proceeds() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/specs"))
        .as_user("alice")
        .depth("banana")
        .destination(&dav_url("/beta/specs"))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:status>HTTP/1.1 201 Created</D:status>");

    assert!(!store.contains("/alpha/specs").await);
    assert!(store.contains("/beta/specs/one.txt").await);
}

#[test_log::test(tokio::test)]
async fn copy_on_ipv6_host_stays_on_same_server() {
    let store = test_store();
    let service = create_test_service(store.clone());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .header("Host", "[::1]:5800")
        .destination("http://[::1]:5800/dav/beta/readme.txt")
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .assert_header("Location", "http://[::1]:5800/dav/beta/readme.txt");

    assert!(store.contains("/beta/readme.txt").await);
}

// ============================================================================
// Locking
// ============================================================================

#[test_log::test(tokio::test)]
async fn move_of_document_locked_by_someone_else_is_locked() {
    let store = test_store();
    store.lock("/alpha/readme.txt", "bob").await;
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/moved.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::LOCKED);

    assert!(store.contains("/alpha/readme.txt").await);
}

#[test_log::test(tokio::test)]
async fn copy_ignores_locks() {
    let store = test_store();
    store.lock("/alpha/readme.txt", "bob").await;
    let service = create_test_service(store.clone());

    TestRequest::copy(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/copy.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
}

#[test_log::test(tokio::test)]
async fn lock_owner_may_move() {
    let store = test_store();
    store.lock("/alpha/readme.txt", "alice").await;
    let service = create_test_service(store.clone());

    TestRequest::move_resource(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .destination(&dav_url("/alpha/moved.txt"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
}
