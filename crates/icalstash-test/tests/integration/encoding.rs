//! End-to-end checks of the stored iCalendar text.

use salvo::http::StatusCode;

use super::helpers::*;

async fn save_and_read(app: &TestApp, calendar: &serde_json::Value) -> String {
    app.save(calendar)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let id = calendar["calendar_id"].as_str().expect("calendar id");
    app.fetch(id)
        .await
        .assert_status(StatusCode::OK)
        .body_string()
}

fn unfold(text: &str) -> String {
    text.replace("\r\n ", "")
}

/// ## Summary
/// Long text is folded at 75 octets and unfolds back to the escaped value.
#[test_log::test(tokio::test)]
async fn long_lines_are_folded() {
    let app = TestApp::build();
    let description = "Zürich offsite: ".to_string() + &"planning, budgets; ".repeat(12);
    let mut calendar = minimal_calendar("folded");
    calendar["events"][0]["description"] = json!(description);

    let text = save_and_read(&app, &calendar).await;

    for line in text.split("\r\n") {
        assert!(line.len() <= 75, "{line:?} is {} octets", line.len());
    }
    let expected = format!(
        "DESCRIPTION:{}\r\n",
        description.replace(',', "\\,").replace(';', "\\;")
    );
    assert!(unfold(&text).contains(&expected));
}

/// ## Summary
/// All-day, UTC and zoned starts each take their own DTSTART form, and a
/// zoned calendar carries exactly one VTIMEZONE.
#[test_log::test(tokio::test)]
async fn start_forms() {
    let app = TestApp::build();

    let all_day = save_and_read(
        &app,
        &json!({
            "calendar_id": "holidays",
            "events": [{
                "uid": "h1",
                "dtstamp": "20250129T120000Z",
                "dtstart": "2025-12-25",
                "dtend": "2025-12-26",
                "is_all_day": true
            }]
        }),
    )
    .await;
    assert!(all_day.contains("DTSTART;VALUE=DATE:20251225\r\n"));
    assert!(all_day.contains("DTEND;VALUE=DATE:20251226\r\n"));

    let utc = save_and_read(&app, &minimal_calendar("utc")).await;
    assert!(utc.contains("DTSTART:20250601T143000Z\r\n"));
    assert!(!utc.contains("BEGIN:VTIMEZONE"));

    let mut zoned = minimal_calendar("zoned");
    zoned["timezone"] = json!("Europe/Berlin");
    zoned["events"][0]["dtend"] = json!("20250601T153000Z");
    let zoned = save_and_read(&app, &zoned).await;
    assert!(zoned.contains("X-WR-TIMEZONE:Europe/Berlin\r\n"));
    assert!(zoned.contains("DTSTART;TZID=Europe/Berlin:20250601T163000\r\n"));
    assert!(zoned.contains("DTEND;TZID=Europe/Berlin:20250601T173000\r\n"));
    assert_eq!(zoned.matches("BEGIN:VTIMEZONE").count(), 1);
    assert!(zoned.contains("TZOFFSETTO:+0200\r\n"));
    assert!(
        zoned.find("END:VTIMEZONE").expect("vtimezone")
            < zoned.find("BEGIN:VEVENT").expect("vevent")
    );
}

/// ## Summary
/// Every request field reaches the document in the documented order.
#[test_log::test(tokio::test)]
async fn full_event_round_trip() {
    let app = TestApp::build();
    let text = save_and_read(
        &app,
        &json!({
            "calendar_id": "full",
            "calscale": "GREGORIAN",
            "method": "PUBLISH",
            "name": "Full",
            "description": "Everything at once",
            "events": [{
                "uid": "full-1@example.com",
                "dtstamp": "2025-01-29T12:00:00Z",
                "dtstart": "20250601T143000Z",
                "dtend": "20250601T153000Z",
                "summary": "Review",
                "location": "HQ, Room 4",
                "organizer": "mailto:boss@example.com",
                "attendee": ["alice@example.com", "", "Bob"],
                "status": "CONFIRMED",
                "transp": "OPAQUE",
                "sequence": 1,
                "priority": 5,
                "class": "PUBLIC",
                "url": "https://example.com/events/1",
                "rrule": "FREQ=WEEKLY;COUNT=4",
                "created": "20250101T080000Z",
                "last_modified": "20250102T090000Z",
                "related_to": "parent@example.com",
                "categories": ["Work", "Review, Q2"],
                "comment": ["First"],
                "contact": ["Jim"],
                "attach": ["https://example.com/a.pdf"],
                "exdate": ["20250615T143000Z"],
                "rdate": ["20250630T143000Z"],
                "resources": ["PROJECTOR"],
                "custom_properties": {"X-ZETA": "z", "X-ALPHA": "a"}
            }]
        }),
    )
    .await;

    let unfolded = unfold(&text);
    for expected in [
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "X-WR-CALNAME:Full",
        "X-WR-CALDESC:Everything at once",
        "LOCATION:HQ\\, Room 4",
        "ORGANIZER;CN=\"mailto:boss@example.com\":",
        "ATTENDEE;CN=alice@example.com:",
        "ATTENDEE;CN=Bob:",
        "SEQUENCE:1",
        "PRIORITY:5",
        "URL:https://example.com/events/1",
        "RRULE:FREQ=WEEKLY;COUNT=4",
        "CREATED:20250101T080000Z",
        "LAST-MODIFIED:20250102T090000Z",
        "CATEGORIES:Work,Review\\, Q2",
        "EXDATE:20250615T143000Z",
        "X-ZETA:z",
    ] {
        assert!(unfolded.contains(&format!("{expected}\r\n")), "missing {expected}");
    }

    assert_eq!(unfolded.matches("ATTENDEE").count(), 2);
    assert!(unfolded.find("X-ZETA:z").expect("zeta") < unfolded.find("X-ALPHA:a").expect("alpha"));
}
