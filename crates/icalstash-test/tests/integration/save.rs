//! Tests for POST /api/calendars and reading the result back.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// A saved calendar is stored as `<calendar_id>.ics` with CRLF line endings
/// and the `text/calendar` content type, and GET returns it unchanged.
#[test_log::test(tokio::test)]
async fn save_stores_document_under_calendar_key() {
    let app = TestApp::build();

    app.save(&minimal_calendar("team"))
        .await
        .assert_status(StatusCode::NO_CONTENT)
        .assert_body_empty();

    let stored = app.stored("team.ics").await.expect("object stored");
    assert!(stored.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(stored.ends_with("END:VCALENDAR\r\n"));
    assert!(!stored.replace("\r\n", "").contains('\n'));
    assert_eq!(
        app.stored_content_type("team.ics").await.as_deref(),
        Some("text/calendar")
    );

    let response = app
        .fetch("team")
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Content-Type", "text/calendar");
    assert_eq!(response.body_string(), stored);
}

/// ## Summary
/// Saving the same request twice produces byte-identical documents.
#[test_log::test(tokio::test)]
async fn saving_is_deterministic() {
    let app = TestApp::build();
    let calendar = json!({
        "calendar_id": "deterministic",
        "timezone": "Europe/Berlin",
        "events": [
            {
                "uid": "a@example.com",
                "dtstamp": "20250129T120000Z",
                "dtstart": "2025-03-01 09:00",
                "dtend": "2025-03-01 10:00",
                "categories": ["one", "two"]
            },
            {
                "uid": "b@example.com",
                "dtstamp": "20250129T120000Z",
                "dtstart": "2025-10-30T09:00:00",
                "custom_properties": {"X-B": "2", "X-A": "1"}
            }
        ]
    });

    app.save(&calendar).await.assert_status(StatusCode::NO_CONTENT);
    let first = app.stored("deterministic.ics").await.expect("first");

    app.reset().await;
    app.save(&calendar).await.assert_status(StatusCode::NO_CONTENT);
    let second = app.stored("deterministic.ics").await.expect("second");

    assert_eq!(first, second);
}

/// ## Summary
/// A later save replaces the earlier document for the same calendar.
#[test_log::test(tokio::test)]
async fn save_overwrites_previous_document() {
    let app = TestApp::build();

    app.save(&minimal_calendar("team"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let mut renamed = minimal_calendar("team");
    renamed["name"] = json!("Renamed");
    renamed["events"][0]["summary"] = json!("Retro");
    app.save(&renamed).await.assert_status(StatusCode::NO_CONTENT);

    let objects = app.objects().await;
    assert_eq!(objects.len(), 1);
    let stored = &objects["team.ics"];
    assert!(stored.contains("X-WR-CALNAME:Renamed\r\n"));
    assert!(stored.contains("SUMMARY:Retro\r\n"));
    assert!(!stored.contains("SUMMARY:Standup\r\n"));
}

/// ## Summary
/// Independent calendars saved concurrently each land under their own key.
#[test_log::test(tokio::test)]
async fn concurrent_saves_to_different_calendars() {
    let app = TestApp::build();
    let (alpha, bravo, charlie) = (
        minimal_calendar("alpha"),
        minimal_calendar("bravo"),
        minimal_calendar("charlie"),
    );

    let (a, b, c) = tokio::join!(app.save(&alpha), app.save(&bravo), app.save(&charlie));
    for response in [a, b, c] {
        response.assert_status(StatusCode::NO_CONTENT);
    }

    let objects = app.objects().await;
    assert_eq!(objects.len(), 3);
    for id in ["alpha", "bravo", "charlie"] {
        let stored = &objects[&format!("{id}.ics")];
        assert!(stored.contains(&format!("UID:{id}-1@example.com\r\n")));
    }
}

/// ## Summary
/// A calendar without events still produces a valid document.
#[test_log::test(tokio::test)]
async fn empty_calendar_is_stored() {
    let app = TestApp::build();

    app.save(&json!({"calendar_id": "empty", "prodid": "-//Acme//Planner 1.0//EN"}))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(
        app.stored("empty.ics").await.as_deref(),
        Some(concat!(
            "BEGIN:VCALENDAR\r\n",
            "VERSION:2.0\r\n",
            "PRODID:-//Acme//Planner 1.0//EN\r\n",
            "END:VCALENDAR\r\n",
        ))
    );
}

/// ## Summary
/// A UTC start with a zoneless end stores both ends as UTC, and a padded
/// calendar id is used as the key without trimming.
#[test_log::test(tokio::test)]
async fn span_forms_align_and_id_is_kept_verbatim() {
    let app = TestApp::build();

    app.save(&json!({
        "calendar_id": " team",
        "events": [{
            "uid": "span@example.com",
            "dtstamp": "20250129T120000Z",
            "dtstart": "20250601T140000Z",
            "dtend": "20250601T153000"
        }]
    }))
    .await
    .assert_status(StatusCode::NO_CONTENT);

    assert!(app.stored("team.ics").await.is_none());
    let stored = app.stored(" team.ics").await.expect("object stored");
    assert!(stored.contains("\r\nDTSTART:20250601T140000Z\r\n"));
    assert!(stored.contains("\r\nDTEND:20250601T153000Z\r\n"));
}
