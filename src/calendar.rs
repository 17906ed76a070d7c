use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// School days of the week, keyed by their Portuguese tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 5] = [
        DayOfWeek::Segunda,
        DayOfWeek::Terca,
        DayOfWeek::Quarta,
        DayOfWeek::Quinta,
        DayOfWeek::Sexta,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DayOfWeek::Segunda => "segunda",
            DayOfWeek::Terca => "terca",
            DayOfWeek::Quarta => "quarta",
            DayOfWeek::Quinta => "quinta",
            DayOfWeek::Sexta => "sexta",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DayOfWeek::Segunda => "Segunda-feira",
            DayOfWeek::Terca => "Terça-feira",
            DayOfWeek::Quarta => "Quarta-feira",
            DayOfWeek::Quinta => "Quinta-feira",
            DayOfWeek::Sexta => "Sexta-feira",
        }
    }

    /// Weekends map to Monday, the first school day ahead.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Tue => DayOfWeek::Terca,
            Weekday::Wed => DayOfWeek::Quarta,
            Weekday::Thu => DayOfWeek::Quinta,
            Weekday::Fri => DayOfWeek::Sexta,
            Weekday::Mon | Weekday::Sat | Weekday::Sun => DayOfWeek::Segunda,
        }
    }

    pub fn today() -> Self {
        Self::from_weekday(Local::now().weekday())
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl fmt::Display for UnknownDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown day '{}' (expected one of segunda, terca, quarta, quinta, sexta)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDay {}

impl FromStr for DayOfWeek {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "segunda" | "seg" | "mon" => Ok(DayOfWeek::Segunda),
            "terca" | "terça" | "ter" | "tue" => Ok(DayOfWeek::Terca),
            "quarta" | "qua" | "wed" => Ok(DayOfWeek::Quarta),
            "quinta" | "qui" | "thu" => Ok(DayOfWeek::Quinta),
            "sexta" | "sex" | "fri" => Ok(DayOfWeek::Sexta),
            _ => Err(UnknownDay(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_falls_back_to_monday() {
        assert_eq!(DayOfWeek::from_weekday(Weekday::Sat), DayOfWeek::Segunda);
        assert_eq!(DayOfWeek::from_weekday(Weekday::Sun), DayOfWeek::Segunda);
        assert_eq!(DayOfWeek::from_weekday(Weekday::Thu), DayOfWeek::Quinta);
    }

    #[test]
    fn serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&DayOfWeek::Terca).unwrap();
        assert_eq!(json, "\"terca\"");
        assert_eq!("Terça".parse::<DayOfWeek>().unwrap(), DayOfWeek::Terca);
    }
}
