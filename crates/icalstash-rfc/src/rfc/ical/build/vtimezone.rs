//! VTIMEZONE generation from the compiled-in tz database.
//!
//! Observances are derived by sampling the zone's UTC offset once a day and
//! narrowing every change down to the second. The result only depends on
//! the zone and the year range, so the same document always yields the same
//! block.

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::rfc::ical::core::{Component, ComponentKind, DateTime, Property, UtcOffset};

/// One observance: the offset in force from `start` (local wall time before
/// the change) onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observance {
    kind: ComponentKind,
    start: NaiveDateTime,
    offset_from: UtcOffset,
    offset_to: UtcOffset,
    name: String,
}

impl Observance {
    fn into_component(self) -> Component {
        let mut component = Component::new(self.kind);
        component.add_property(Property::date_time("DTSTART", DateTime::floating(self.start)));
        component.add_property(Property::utc_offset("TZOFFSETFROM", self.offset_from));
        component.add_property(Property::utc_offset("TZOFFSETTO", self.offset_to));
        component.add_property(Property::text("TZNAME", self.name));
        component
    }
}

/// ## Summary
/// Builds a VTIMEZONE for `tz` covering every year in `years`.
///
/// The block always starts with an observance anchoring the offset in force
/// on 1 January of the first year, followed by one observance per offset
/// change inside the range.
#[must_use]
pub fn build_vtimezone(tz: Tz, years: RangeInclusive<i32>) -> Component {
    let mut vtimezone = Component::new(ComponentKind::Timezone);
    vtimezone.add_property(Property::text("TZID", tz.name()));
    vtimezone.add_property(Property::text("X-LIC-LOCATION", tz.name()));

    let (first, last) = (*years.start(), (*years.end()).max(*years.start()));
    let Some(range_start) = jan_first(first) else {
        return vtimezone;
    };

    vtimezone.add_child(initial_observance(tz, first, range_start).into_component());

    let range_end = last
        .checked_add(1)
        .and_then(jan_first)
        .unwrap_or(range_start);
    for observance in transitions(tz, range_start, range_end) {
        vtimezone.add_child(observance.into_component());
    }

    tracing::trace!(
        tzid = tz.name(),
        first,
        last,
        observances = vtimezone.children.len(),
        "Built VTIMEZONE"
    );

    vtimezone
}

fn jan_first(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn offset_at(tz: Tz, utc: NaiveDateTime) -> i32 {
    tz.offset_from_utc_datetime(&utc).fix().local_minus_utc()
}

fn abbreviation_at(tz: Tz, utc: NaiveDateTime) -> String {
    tz.from_utc_datetime(&utc).format("%Z").to_string()
}

fn initial_observance(tz: Tz, year: i32, range_start: NaiveDateTime) -> Observance {
    let offset = offset_at(tz, range_start);

    // Zones whose January offset exceeds their July offset observe summer
    // time around the new year.
    let july = NaiveDate::from_ymd_opt(year, 7, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let kind = match july {
        Some(july) if offset > offset_at(tz, july) => ComponentKind::Daylight,
        _ => ComponentKind::Standard,
    };

    Observance {
        kind,
        start: range_start,
        offset_from: UtcOffset::from_seconds(offset),
        offset_to: UtcOffset::from_seconds(offset),
        name: abbreviation_at(tz, range_start),
    }
}

fn transitions(tz: Tz, start: NaiveDateTime, end: NaiveDateTime) -> Vec<Observance> {
    let day = TimeDelta::days(1);
    let mut observances = Vec::new();

    let mut cursor = start;
    let mut current = offset_at(tz, cursor);
    while cursor < end {
        let next = (cursor + day).min(end);
        let next_offset = offset_at(tz, next);

        if next_offset != current {
            let instant = narrow_transition(tz, cursor, next, current);
            observances.push(Observance {
                kind: if next_offset > current {
                    ComponentKind::Daylight
                } else {
                    ComponentKind::Standard
                },
                start: instant + TimeDelta::seconds(i64::from(current)),
                offset_from: UtcOffset::from_seconds(current),
                offset_to: UtcOffset::from_seconds(next_offset),
                name: abbreviation_at(tz, instant),
            });
            current = next_offset;
        }

        cursor = next;
    }

    observances
}

/// Returns the first UTC second in `(lo, hi]` whose offset differs from
/// `before`.
fn narrow_transition(
    tz: Tz,
    mut lo: NaiveDateTime,
    mut hi: NaiveDateTime,
    before: i32,
) -> NaiveDateTime {
    while (hi - lo).num_seconds() > 1 {
        let mid = lo + TimeDelta::seconds((hi - lo).num_seconds() / 2);
        if offset_at(tz, mid) == before {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}
