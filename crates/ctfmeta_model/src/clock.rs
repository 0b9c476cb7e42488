//! Clock metadata: a timestamp source's frequency, offsets and precision.

use std::collections::BTreeMap;

/// Attribute keys with defined semantics. Unknown keys are kept verbatim
/// so callers can still inspect tracer-specific extensions.
const NAME: &str = "name";
const FREQUENCY: &str = "freq";
const PRECISION: &str = "precision";
const OFFSET_SECONDS: &str = "offset_s";
const OFFSET_CYCLES: &str = "offset";
const DESCRIPTION: &str = "description";
const ORIGIN: &str = "origin";
const ABSOLUTE: &str = "absolute";

/// Clock increments per second when the metadata does not say: 1 GHz,
/// i.e. one tick per nanosecond.
const DEFAULT_FREQUENCY: u64 = 1_000_000_000;

/// The literal origin value naming the POSIX epoch.
pub const UNIX_EPOCH: &str = "unix-epoch";

/// One clock attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClockValue {
    /// A 64-bit numeric attribute (frequency, offsets, precision).
    Integer(i64),
    /// A textual attribute (name, uuid, description, origin).
    Text(String),
}

/// A clock attribute bag with typed accessors.
///
/// Built from a `clock { ... }` TSDL block or a CTF2 clock-class fragment.
/// Independent of the declaration sum type, but produced from the same
/// metadata document and equally immutable once parsing finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    attributes: BTreeMap<String, ClockValue>,
}

impl Clock {
    /// Creates an empty clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any earlier value for the key.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: ClockValue) {
        self.attributes.insert(key.into(), value);
    }

    /// Raw attribute access.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&ClockValue> {
        self.attributes.get(key)
    }

    fn integer(&self, key: &str) -> Option<i64> {
        match self.attributes.get(key) {
            Some(ClockValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(ClockValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The clock identifier, used by integer `map` attributes to refer
    /// back to this clock.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text(NAME)
    }

    /// Increments per second. Defaults to 1e9 (nanosecond ticks).
    #[must_use]
    pub fn frequency(&self) -> u64 {
        self.integer(FREQUENCY)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_FREQUENCY)
    }

    /// Measurement uncertainty in (1/frequency) units. Defaults to 0.
    #[must_use]
    pub fn precision(&self) -> i64 {
        self.integer(PRECISION).unwrap_or(0)
    }

    /// Offset from the clock origin, in whole seconds. Defaults to 0.
    #[must_use]
    pub fn offset_seconds(&self) -> i64 {
        self.integer(OFFSET_SECONDS).unwrap_or(0)
    }

    /// Offset from the clock origin, in (1/frequency) cycles. Defaults to 0.
    #[must_use]
    pub fn offset_cycles(&self) -> i64 {
        self.integer(OFFSET_CYCLES).unwrap_or(0)
    }

    /// Free-form description, when present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.text(DESCRIPTION)
    }

    /// Origin reference: a named origin or the literal `unix-epoch`.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.text(ORIGIN)
    }

    /// Whether the origin is the POSIX epoch.
    #[must_use]
    pub fn has_unix_epoch_origin(&self) -> bool {
        self.origin() == Some(UNIX_EPOCH)
    }

    /// Whether this clock is a global reference across clock uuids
    /// (NTP-style). Defaults to false.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        match self.attributes.get(ABSOLUTE) {
            Some(ClockValue::Integer(v)) => *v != 0,
            Some(ClockValue::Text(v)) => v.eq_ignore_ascii_case("true"),
            None => false,
        }
    }
}
