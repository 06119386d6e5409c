//! Tests for HEAD, DELETE and the health probe.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// HEAD reports existence without a body; DELETE removes the document once.
#[test_log::test(tokio::test)]
async fn head_then_delete() {
    let app = TestApp::build();
    let path = calendar_path("team");

    TestRequest::head(&path)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.save(&minimal_calendar("team"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::head(&path)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_empty();

    TestRequest::delete(&path)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(app.objects().await.is_empty());

    TestRequest::delete(&path)
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Reading a calendar that was never saved is a 404.
#[test_log::test(tokio::test)]
async fn get_missing_calendar() {
    let app = TestApp::build();

    app.fetch("nobody")
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_empty();
}

/// ## Summary
/// Deleting one calendar leaves the others in place.
#[test_log::test(tokio::test)]
async fn delete_is_scoped_to_one_calendar() {
    let app = TestApp::build();
    app.save(&minimal_calendar("keep")).await;
    app.save(&minimal_calendar("drop")).await;

    TestRequest::delete(&calendar_path("drop"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let objects = app.objects().await;
    assert!(objects.contains_key("keep.ics"));
    assert!(!objects.contains_key("drop.ics"));
}

/// ## Summary
/// The readiness probe answers outside `/api`.
#[test_log::test(tokio::test)]
async fn readiness_probe() {
    let app = TestApp::build();

    TestRequest::get("/health/ready")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
}
