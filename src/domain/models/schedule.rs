use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

/// Slot width used whenever a configured or computed interval is unusable.
pub const DEFAULT_INTERVAL_MIN: i64 = 30;
/// Upper bound for any slot width, configured or derived from services.
pub const MAX_INTERVAL_MIN: i64 = 24 * 60;

/// The three appointment-handling flows. Each carries independent capacity
/// settings, its own calendar note and its own service eligibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dropoff,
    Waiter,
    Pickup,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Dropoff, Mode::Waiter, Mode::Pickup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dropoff => "dropoff",
            Mode::Waiter => "waiter",
            Mode::Pickup => "pickup",
        }
    }

    /// Parses the `{mode}` path segment; unknown modes are a 400.
    pub fn from_path(raw: &str) -> Result<Mode, AppError> {
        raw.parse::<Mode>().map_err(AppError::Validation)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dropoff" | "drop-off" | "drop_off" => Ok(Mode::Dropoff),
            "waiter" => Ok(Mode::Waiter),
            "pickup" | "pick-up" | "pick_up" => Ok(Mode::Pickup),
            other => Err(format!("Unknown appointment mode '{}'", other)),
        }
    }
}

/// Case-insensitive weekday lookup accepting full names and three-letter forms.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parses wall-clock times as garage staff enter them: "9:00 AM", "9:00am", "17:30".
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    let normalized = s.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
}

pub fn format_clock(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Serde adapter storing `chrono::Weekday` as a lowercase day name.
pub mod weekday_serde {
    use super::{parse_weekday, weekday_name};
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_weekday(&raw).ok_or_else(|| D::Error::custom(format!("invalid weekday '{}'", raw)))
    }
}

/// Accepts either a single value or a list on input, e.g. `"all"` or `["waiter", "pickup"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_formats() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_clock("10:00 AM"), Some(ten));
        assert_eq!(parse_clock("10:00am"), Some(ten));
        assert_eq!(parse_clock(" 10:00 "), Some(ten));
        assert_eq!(parse_clock("1:30 PM"), NaiveTime::from_hms_opt(13, 30, 0));
        assert_eq!(parse_clock("12:00 PM"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_clock("12:00 AM"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_clock("17:45"), NaiveTime::from_hms_opt(17, 45, 0));
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("noon"), None);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(NaiveTime::from_hms_opt(13, 30, 0).unwrap()), "1:30 PM");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "9:05 AM");
    }

    #[test]
    fn test_weekday_parsing_is_case_insensitive() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("SUNDAY"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("thu"), Some(Weekday::Thu));
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("dropoff".parse::<Mode>(), Ok(Mode::Dropoff));
        assert_eq!("Drop-Off".parse::<Mode>(), Ok(Mode::Dropoff));
        assert_eq!("WAITER".parse::<Mode>(), Ok(Mode::Waiter));
        assert_eq!("pickup".parse::<Mode>(), Ok(Mode::Pickup));
        assert!("delivery".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_from_path_maps_unknown_to_validation() {
        assert!(matches!(Mode::from_path("waiter"), Ok(Mode::Waiter)));
        match Mode::from_path("delivery") {
            Err(AppError::Validation(msg)) => assert!(msg.contains("delivery")),
            other => panic!("unexpected result: {:?}", other.map(|m| m.to_string())),
        }
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany<String> = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(one.into_vec(), vec!["all".to_string()]);
        let many: OneOrMany<String> = serde_json::from_str("[\"waiter\",\"pickup\"]").unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }
}
