use serde::{Deserialize, Serialize};

/// Weather trigger types evaluated by the detector.
///
/// The stored preference vocabulary also knows `sunAfterRain`, but the
/// current sustained-window detector does not evaluate it, so it has no
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    ColdWeather,
    HotWeather,
    Rain,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [
        TriggerKind::ColdWeather,
        TriggerKind::HotWeather,
        TriggerKind::Rain,
    ];

    /// Wire name used in schedule names and downstream payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::ColdWeather => "coldWeather",
            TriggerKind::HotWeather => "hotWeather",
            TriggerKind::Rain => "rain",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather trigger opt-ins stored on the business record.
///
/// Field names match the JSON stored in the directory (`triggers.weather`).
/// Absent fields deserialize to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherPrefs {
    pub cool_pleasant: bool,
    pub hot_sunny: bool,
    pub rainy: bool,
}

impl WeatherPrefs {
    /// True if any weather trigger is opted in.
    #[must_use]
    pub fn any_enabled(self) -> bool {
        self.cool_pleasant || self.hot_sunny || self.rainy
    }

    /// Maps a detected trigger to its opt-in preference:
    /// coldWeather → coolPleasant, hotWeather → hotSunny, rain → rainy.
    #[must_use]
    pub fn allows(self, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::ColdWeather => self.cool_pleasant,
            TriggerKind::HotWeather => self.hot_sunny,
            TriggerKind::Rain => self.rainy,
        }
    }
}

/// Time-based trigger opt-ins stored on the business record
/// (`triggers.timeBased`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimePrefs {
    pub weekend_specials: bool,
    pub payday_sales: bool,
}

impl TimePrefs {
    #[must_use]
    pub fn any_enabled(self) -> bool {
        self.weekend_specials || self.payday_sales
    }
}
