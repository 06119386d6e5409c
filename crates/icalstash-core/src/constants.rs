/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const CALENDARS_ROUTE_COMPONENT: &str = "calendars";
pub const CALENDARS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CALENDARS_ROUTE_COMPONENT);

pub const HEALTH_ROUTE_COMPONENT: &str = "health";

/// File extension appended to a calendar id to form its storage key.
pub const ICS_EXTENSION: &str = ".ics";

/// Largest JSON body accepted when saving a calendar.
pub const MAX_REQUEST_BODY_OCTETS: usize = 4 * 1024 * 1024;

/// MIME type of every stored document.
pub const ICS_CONTENT_TYPE: &str = "text/calendar";

/// `VERSION` emitted when a calendar does not specify one.
pub const DEFAULT_ICAL_VERSION: &str = "2.0";

/// `PRODID` emitted when a calendar does not specify one.
pub const DEFAULT_PRODID: &str = "-//icalstash//icalstash//EN";

/// Bucket names outside this length range are rejected at startup.
pub const BUCKET_NAME_MIN_LEN: usize = 3;
pub const BUCKET_NAME_MAX_LEN: usize = 63;
