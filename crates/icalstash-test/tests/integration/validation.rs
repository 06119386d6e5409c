//! Tests for request validation: rejected requests never touch storage.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// A body that is not JSON is a 400 and nothing is stored.
#[test_log::test(tokio::test)]
async fn malformed_json_is_rejected() {
    let app = TestApp::build();

    let response = TestRequest::post("/api/calendars")
        .raw_json("{\"calendar_id\": \"team\", \"events\": [")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(response.error_message().starts_with("Invalid request body"));
    assert!(app.objects().await.is_empty());
}

/// ## Summary
/// Each mapping failure is a 400 whose message names the offending field.
#[test_log::test(tokio::test)]
async fn mapping_errors_name_the_field() {
    let app = TestApp::build();

    // (event index or calendar level, key, value, field named in the error)
    let cases = [
        (None, "calendar_id", json!(""), "calendar_id"),
        (None, "timezone", json!("Mars/Olympus_Mons"), "timezone"),
        (Some(0), "uid", json!(""), "events[0].uid"),
        (Some(0), "dtstamp", json!("not a time"), "events[0].dtstamp"),
        (Some(0), "dtstart", json!("31/31/2025"), "events[0].dtstart"),
        (Some(0), "dtend", json!("soon"), "events[0].dtend"),
        (Some(0), "url", json!("example.com/no-scheme"), "events[0].url"),
        (
            Some(0),
            "custom_properties",
            json!({"X BAD": "value"}),
            "events[0].custom_properties.X BAD",
        ),
        (
            Some(0),
            "custom_properties",
            json!({"X-COUNT": 3}),
            "events[0].custom_properties.X-COUNT",
        ),
        (
            Some(0),
            "custom_properties",
            json!({"END": "VEVENT"}),
            "events[0].custom_properties.END",
        ),
    ];

    for (event, key, value, field) in cases {
        let mut calendar = minimal_calendar("team");
        match event {
            Some(index) => calendar["events"][index][key] = value,
            None => calendar[key] = value,
        }

        let response = app
            .save(&calendar)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        let message = response.error_message();
        assert!(message.contains(field), "{key}: {message}");
    }

    assert!(app.objects().await.is_empty());
}

/// ## Summary
/// Missing required event fields are reported like empty ones.
#[test_log::test(tokio::test)]
async fn missing_required_fields_are_rejected() {
    let app = TestApp::build();

    let response = app
        .save(&json!({
            "calendar_id": "team",
            "events": [{"uid": "1", "dtstamp": "20250129T120000Z"}]
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(
        response.error_message(),
        "Missing required field: events[0].dtstart"
    );
    assert!(app.stored("team.ics").await.is_none());
}

/// ## Summary
/// A rejected save leaves the previously stored document untouched.
#[test_log::test(tokio::test)]
async fn rejected_save_keeps_previous_document() {
    let app = TestApp::build();
    app.save(&minimal_calendar("team"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let before = app.stored("team.ics").await.expect("stored");

    let mut broken = minimal_calendar("team");
    broken["events"][0]["dtstamp"] = json!("yesterday");
    app.save(&broken).await.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.stored("team.ics").await, Some(before));
}
