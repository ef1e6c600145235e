//! Timezone-aware business-hours gate.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Restricts trigger hours to a business's local open/close window.
///
/// Deliberately permissive: if any of open time, close time, or timezone is
/// missing, malformed, or an unrecognized IANA identifier, every timestamp
/// passes. Businesses without configured hours must not be silently
/// excluded from triggering.
#[derive(Debug, Clone, Copy)]
pub struct BusinessHours {
    gate: Option<Gate>,
}

#[derive(Debug, Clone, Copy)]
struct Gate {
    open: NaiveTime,
    close: NaiveTime,
    tz: Tz,
}

impl BusinessHours {
    /// Builds the gate from the raw record fields (`"HH:MM"` local times and
    /// an IANA timezone name).
    #[must_use]
    pub fn from_record(
        open_local: Option<&str>,
        close_local: Option<&str>,
        time_zone: Option<&str>,
    ) -> Self {
        let gate = match (open_local, close_local, time_zone) {
            (Some(open), Some(close), Some(tz)) => {
                match (parse_hhmm(open), parse_hhmm(close), tz.parse::<Tz>()) {
                    (Some(open), Some(close), Ok(tz)) => Some(Gate { open, close, tz }),
                    _ => None,
                }
            }
            _ => None,
        };
        Self { gate }
    }

    /// Always-open gate, used where hours are not configured.
    #[must_use]
    pub fn always_open() -> Self {
        Self { gate: None }
    }

    /// Whether the UTC timestamp falls inside the local open/close window.
    ///
    /// Same-day window (`open ≤ close`): inside iff `open ≤ t < close`.
    /// Overnight window (`open > close`, e.g. 18:00–02:00): inside iff
    /// `t ≥ open` or `t < close`.
    #[must_use]
    pub fn contains_utc(&self, timestamp: DateTime<Utc>) -> bool {
        let Some(gate) = self.gate else {
            return true;
        };

        let local = timestamp.with_timezone(&gate.tz).time();
        if gate.open <= gate.close {
            gate.open <= local && local < gate.close
        } else {
            local >= gate.open || local < gate.close
        }
    }
}

fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
