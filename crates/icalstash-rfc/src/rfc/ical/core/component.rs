//! Components: the `BEGIN:`/`END:` blocks of a document (RFC 5545 §3.4-3.6).

use std::fmt;

use super::Property;

/// The blocks this crate knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Calendar,
    Event,
    Timezone,
    /// Standard-time observance inside a `VTIMEZONE`.
    Standard,
    /// Daylight-saving observance inside a `VTIMEZONE`.
    Daylight,
}

impl ComponentKind {
    /// Name written after `BEGIN:` and `END:`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Timezone => "VTIMEZONE",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One block with its own properties and any nested blocks.
///
/// Serialization keeps insertion order: properties first, then children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Skips `None`, so optional fields can be passed straight through.
    pub fn add_optional(&mut self, prop: Option<Property>) {
        self.properties.extend(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }
}
