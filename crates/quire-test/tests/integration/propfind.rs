//! Tests for the PROPFIND method.
//!
//! Verifies property negotiation, depth handling, and multistatus rendering.

use salvo::http::StatusCode;

use super::helpers::*;

const ALLPROP_WITH_DECOY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
  <D:prop><D:getetag/></D:prop>
</D:propfind>"#;

fn project_with_three_children() -> MemoryStore {
    MemoryStore::builder(PREFIX)
        .project("gamma", "Gamma")
        .document("/gamma/a.txt", "text/plain", b"a")
        .document("/gamma/b.txt", "text/plain", b"b")
        .folder("/gamma/c")
        .build()
}

#[test_log::test(tokio::test)]
async fn allprop_on_collection_lists_self_and_children() {
    let service = create_test_service(project_with_three_children());

    let response = TestRequest::propfind(&dav_path("/gamma"))
        .as_user("alice")
        .depth("1")
        .xml_body(r#"<D:propfind xmlns:D="DAV:"><D:allprop/></D:propfind>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_header("Content-Type", "application/xml; charset=utf-8")
        .assert_body_contains(&format!("<D:href>{}</D:href>", dav_url("/gamma/")))
        .assert_body_contains(&format!("<D:href>{}</D:href>", dav_url("/gamma/a.txt")))
        .assert_body_contains(&format!("<D:href>{}</D:href>", dav_url("/gamma/c/")));

    assert_eq!(response.count_multistatus_responses(), 4);
    assert_eq!(response.body_string().matches("<D:displayname>").count(), 4);
}

#[test_log::test(tokio::test)]
async fn empty_body_means_all_properties() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:getetag>")
        .assert_body_contains("<D:getcontentlength>5</D:getcontentlength>")
        .assert_body_contains("<D:status>HTTP/1.1 200 OK</D:status>");
}

#[test_log::test(tokio::test)]
async fn allprop_ignores_decoy_prop_list() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .xml_body(ALLPROP_WITH_DECOY)
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:displayname>readme.txt</D:displayname>")
        .assert_body_contains("<D:getcontenttype>text/plain</D:getcontenttype>");
}

#[test_log::test(tokio::test)]
async fn body_without_propfind_means_all_properties() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha/readme.txt"))
        .as_user("alice")
        .xml_body("<unrelated/>")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:getcontenttype>text/plain</D:getcontenttype>");
}

#[test_log::test(tokio::test)]
async fn propfind_without_prop_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .xml_body(r#"<D:propfind xmlns:D="DAV:"><D:propname/></D:propfind>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn broken_xml_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .xml_body(r#"<D:propfind xmlns:D="DAV:"><D:prop>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn truncated_named_prop_body_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .xml_body(r#"<D:propfind xmlns:D="DAV:"><D:prop><D:getetag/>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn undeclared_prefix_under_default_dav_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("0")
        .xml_body(r#"<propfind xmlns="DAV:"><prop><X:color/><getetag/></prop></propfind>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn named_properties_split_found_and_missing() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("0")
        .xml_body(
            r#"<D:propfind xmlns:D="DAV:"><D:prop><D:displayname/><X:color xmlns:X="urn:example"/></D:prop></D:propfind>"#,
        )
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:displayname>Project Alpha</D:displayname>")
        .assert_body_contains(r#"xmlns="urn:example""#)
        .assert_body_contains("<D:status>HTTP/1.1 404 Not Found</D:status>")
        .assert_body_not_contains("<D:getetag");
}

#[test_log::test(tokio::test)]
async fn unscoped_property_with_prefixed_dav_is_bad_request() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .xml_body(r#"<D:propfind xmlns:D="DAV:"><D:prop><color/></D:prop></D:propfind>"#)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn explicitly_empty_namespace_is_accepted() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("0")
        .xml_body(
            r#"<D:propfind xmlns:D="DAV:"><D:prop><color xmlns=""/><D:displayname/></D:prop></D:propfind>"#,
        )
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(r#"<color xmlns=""/>"#)
        .assert_body_contains("<D:displayname>Project Alpha</D:displayname>");
}

#[test_log::test(tokio::test)]
async fn depth_zero_reports_only_target() {
    let service = create_test_service(test_store());

    let response = TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("0")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);

    assert_eq!(response.count_multistatus_responses(), 1);
}

#[test_log::test(tokio::test)]
async fn missing_depth_walks_whole_tree() {
    let service = create_test_service(test_store());

    let response = TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&dav_url("/alpha/specs/two.txt"));

    // alpha, specs, one.txt, two.txt, readme.txt
    assert_eq!(response.count_multistatus_responses(), 5);
}

#[test_log::test(tokio::test)]
async fn unparseable_depth_walks_whole_tree() {
    let service = create_test_service(test_store());

    let response = TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("banana")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);

    assert_eq!(response.count_multistatus_responses(), 5);
}

#[test_log::test(tokio::test)]
async fn repeated_propfind_is_byte_identical() {
    let service = create_test_service(test_store());

    let first = TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("infinity")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);
    let second = TestRequest::propfind(&dav_path("/alpha"))
        .as_user("alice")
        .depth("infinity")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);

    assert_eq!(first.body, second.body);
}

#[test_log::test(tokio::test)]
async fn anonymous_index_listing_hides_projects() {
    let service = create_test_service(test_store());

    let response = TestRequest::propfind(&dav_path("/"))
        .depth("1")
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_not_contains("/dav/alpha");

    assert_eq!(response.count_multistatus_responses(), 1);
}

#[test_log::test(tokio::test)]
async fn anonymous_propfind_on_hidden_project_is_not_found() {
    let service = create_test_service(test_store());

    TestRequest::propfind(&dav_path("/alpha"))
        .user_agent(OFFICE_USER_AGENT)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn path_outside_prefix_is_method_not_allowed() {
    let service = create_test_service(test_store());

    TestRequest::propfind("/elsewhere/file.txt")
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);

    TestRequest::propfind("/davx")
        .as_user("alice")
        .send(&service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
