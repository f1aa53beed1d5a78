//! Slot derivation from a doctor's available hours.
//!
//! Each `availableHours` entry has the form `"<Day> <Start>-<End>"`, for example `"Mon 09-17"`.
//! An entry yields two selectable slots, one per range boundary: `"Mon 09"` and `"Mon 17"`.
//! Only the boundaries are offered, not the instants inside the range.
//!
//! No check is made against appointments already booked; the doctor's list is the sole source
//! of bookable slots.

/// A bookable day and time, rendered as `"<Day> <Time>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    day: String,
    time: String,
}

impl Slot {
    pub fn new(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
        }
    }

    /// Parse a slot label such as `"Mon 09:00"`.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let day = parts.next()?;
        let time = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(day, time))
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    /// The time part, which is what the booking request carries.
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

/// Split one hours entry into `(day, start, end)`.
pub fn parse_hours_entry(entry: &str) -> Option<(&str, &str, &str)> {
    let mut parts = entry.split_whitespace();
    let day = parts.next()?;
    let range = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (start, end) = range.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() || end.contains('-') {
        return None;
    }
    Some((day, start, end))
}

/// Derive the selectable slots for a doctor, in input order.
///
/// Well-formed entries contribute exactly two slots each. Malformed entries are skipped.
pub fn derive_slots<S: AsRef<str>>(available_hours: &[S]) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(available_hours.len() * 2);
    for entry in available_hours {
        let entry = entry.as_ref();
        match parse_hours_entry(entry) {
            Some((day, start, end)) => {
                slots.push(Slot::new(day, start));
                slots.push(Slot::new(day, end));
            }
            None => tracing::warn!("skipping malformed available hours entry: {:?}", entry),
        }
    }
    slots
}
