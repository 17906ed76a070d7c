use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Label applied to a break when none was given.
pub const DEFAULT_BREAK_LABEL: &str = "Intervalo";

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormatError {
    value: String,
}

impl TimeFormatError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for TimeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid time '{}' (expected HH:MM, e.g. 08:30)",
            self.value
        )
    }
}

impl std::error::Error for TimeFormatError {}

/// A 24-hour wall-clock time with minute precision.
///
/// Accepts `H:MM` and `HH:MM` on input and always renders zero-padded, so the
/// rendered form sorts lexicographically in the same order as the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeFormatError> {
        if hour > 23 || minute > 59 {
            return Err(TimeFormatError::new(format!("{hour}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minute_of_day(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    pub fn is_valid(input: &str) -> bool {
        TIME_PATTERN.is_match(input)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !Self::is_valid(trimmed) {
            return Err(TimeFormatError::new(s));
        }
        let (hour, minute) = trimmed
            .split_once(':')
            .ok_or_else(|| TimeFormatError::new(s))?;
        let hour = hour.parse::<u8>().map_err(|_| TimeFormatError::new(s))?;
        let minute = minute.parse::<u8>().map_err(|_| TimeFormatError::new(s))?;
        Ok(Self { hour, minute })
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One interval of the school day: a teaching period or a named break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotDraft", into = "TimeSlotDraft")]
pub enum TimeSlot {
    Regular {
        start: ClockTime,
        end: ClockTime,
    },
    Break {
        start: ClockTime,
        end: ClockTime,
        label: String,
    },
}

impl TimeSlot {
    pub fn regular(start: &str, end: &str) -> Result<Self, TimeFormatError> {
        Ok(TimeSlot::Regular {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    pub fn break_slot(
        start: &str,
        end: &str,
        label: impl Into<String>,
    ) -> Result<Self, TimeFormatError> {
        Ok(TimeSlot::Break {
            start: start.parse()?,
            end: end.parse()?,
            label: normalize_label(Some(label.into())),
        })
    }

    pub fn start(&self) -> ClockTime {
        match self {
            TimeSlot::Regular { start, .. } | TimeSlot::Break { start, .. } => *start,
        }
    }

    pub fn end(&self) -> ClockTime {
        match self {
            TimeSlot::Regular { end, .. } | TimeSlot::Break { end, .. } => *end,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, TimeSlot::Break { .. })
    }

    pub fn break_label(&self) -> Option<&str> {
        match self {
            TimeSlot::Break { label, .. } => Some(label),
            TimeSlot::Regular { .. } => None,
        }
    }

    /// `"HH:MM - HH:MM"`, the form class sessions reference slots by.
    pub fn range_label(&self) -> String {
        format!("{} - {}", self.start(), self.end())
    }

    /// Returns the slot with `patch` merged in. Nothing is changed when a
    /// patched time fails validation.
    pub fn patched(&self, patch: &TimeSlotPatch) -> Result<TimeSlot, TimeFormatError> {
        let start = match &patch.start {
            Some(raw) => raw.parse()?,
            None => self.start(),
        };
        let end = match &patch.end {
            Some(raw) => raw.parse()?,
            None => self.end(),
        };
        let is_break = patch.is_break.unwrap_or_else(|| self.is_break());
        if !is_break {
            return Ok(TimeSlot::Regular { start, end });
        }
        let label = patch
            .break_name
            .clone()
            .or_else(|| self.break_label().map(str::to_string));
        Ok(TimeSlot::Break {
            start,
            end,
            label: normalize_label(label),
        })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSlot::Regular { start, end } => write!(f, "{start} - {end}"),
            TimeSlot::Break { start, end, label } => write!(f, "{start} - {end} ({label})"),
        }
    }
}

fn normalize_label(label: Option<String>) -> String {
    match label {
        Some(label) if !label.trim().is_empty() => label,
        _ => DEFAULT_BREAK_LABEL.to_string(),
    }
}

/// Unvalidated slot as typed by a user or stored on disk:
/// `{ start, end, isBreak?, breakName? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDraft {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_name: Option<String>,
}

impl TimeSlotDraft {
    pub fn regular(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            is_break: false,
            break_name: None,
        }
    }

    pub fn break_slot(
        start: impl Into<String>,
        end: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            is_break: true,
            break_name: Some(label.into()),
        }
    }
}

impl TryFrom<TimeSlotDraft> for TimeSlot {
    type Error = TimeFormatError;

    fn try_from(draft: TimeSlotDraft) -> Result<Self, Self::Error> {
        let start = draft.start.parse()?;
        let end = draft.end.parse()?;
        if draft.is_break {
            Ok(TimeSlot::Break {
                start,
                end,
                label: normalize_label(draft.break_name),
            })
        } else {
            Ok(TimeSlot::Regular { start, end })
        }
    }
}

impl From<TimeSlot> for TimeSlotDraft {
    fn from(slot: TimeSlot) -> Self {
        match slot {
            TimeSlot::Regular { start, end } => {
                TimeSlotDraft::regular(start.to_string(), end.to_string())
            }
            TimeSlot::Break { start, end, label } => {
                TimeSlotDraft::break_slot(start.to_string(), end.to_string(), label)
            }
        }
    }
}

/// Partial update for a slot. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_break: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_digit_hours_and_pads_on_render() {
        let time: ClockTime = "7:05".parse().unwrap();
        assert_eq!(time.to_string(), "07:05");
        assert_eq!(time.minute_of_day(), 425);
    }

    #[test]
    fn rejects_out_of_range_and_malformed_times() {
        for bad in ["24:00", "12:60", "1230", "ab:cd", "", "007:30", "12:5"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn legacy_break_without_label_gets_default() {
        let slot: TimeSlot =
            serde_json::from_str(r#"{"start":"09:10","end":"09:25","isBreak":true}"#).unwrap();
        assert_eq!(slot.break_label(), Some(DEFAULT_BREAK_LABEL));
    }

    #[test]
    fn regular_slot_serializes_without_break_fields() {
        let slot = TimeSlot::regular("07:30", "08:20").unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r#"{"start":"07:30","end":"08:20"}"#);
    }

    #[test]
    fn patch_toggles_break_and_keeps_times() {
        let slot = TimeSlot::regular("11:55", "13:25").unwrap();
        let patch = TimeSlotPatch {
            is_break: Some(true),
            ..TimeSlotPatch::default()
        };
        let patched = slot.patched(&patch).unwrap();
        assert_eq!(patched.break_label(), Some(DEFAULT_BREAK_LABEL));
        assert_eq!(patched.range_label(), "11:55 - 13:25");

        let back = patched
            .patched(&TimeSlotPatch {
                is_break: Some(false),
                ..TimeSlotPatch::default()
            })
            .unwrap();
        assert!(!back.is_break());
    }

    #[test]
    fn patch_with_bad_time_is_rejected() {
        let slot = TimeSlot::regular("07:30", "08:20").unwrap();
        let patch = TimeSlotPatch {
            end: Some("8h20".into()),
            ..TimeSlotPatch::default()
        };
        assert_eq!(slot.patched(&patch), Err(TimeFormatError::new("8h20")));
    }
}
