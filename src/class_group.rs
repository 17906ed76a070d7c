use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A student cohort. The set is fixed; every schedule carries a color for each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassGroup {
    #[serde(rename = "1A")]
    Class1A,
    #[serde(rename = "1B")]
    Class1B,
    #[serde(rename = "1C")]
    Class1C,
    #[serde(rename = "1D")]
    Class1D,
    #[serde(rename = "2A")]
    Class2A,
    #[serde(rename = "2B")]
    Class2B,
    #[serde(rename = "2C")]
    Class2C,
    #[serde(rename = "3A")]
    Class3A,
    #[serde(rename = "3B")]
    Class3B,
}

impl ClassGroup {
    pub const ALL: [ClassGroup; 9] = [
        ClassGroup::Class1A,
        ClassGroup::Class1B,
        ClassGroup::Class1C,
        ClassGroup::Class1D,
        ClassGroup::Class2A,
        ClassGroup::Class2B,
        ClassGroup::Class2C,
        ClassGroup::Class3A,
        ClassGroup::Class3B,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ClassGroup::Class1A => "1A",
            ClassGroup::Class1B => "1B",
            ClassGroup::Class1C => "1C",
            ClassGroup::Class1D => "1D",
            ClassGroup::Class2A => "2A",
            ClassGroup::Class2B => "2B",
            ClassGroup::Class2C => "2C",
            ClassGroup::Class3A => "3A",
            ClassGroup::Class3B => "3B",
        }
    }

    /// Pastel color used when no override has been chosen.
    pub fn default_color(self) -> &'static str {
        match self {
            ClassGroup::Class1A => "#F8E3E7",
            ClassGroup::Class1B => "#E3F8E3",
            ClassGroup::Class1C => "#E3E3F8",
            ClassGroup::Class1D => "#F8F8E3",
            ClassGroup::Class2A => "#F8E3F8",
            ClassGroup::Class2B => "#E3F8F8",
            ClassGroup::Class2C => "#F8E8E3",
            ClassGroup::Class3A => "#E8F8E3",
            ClassGroup::Class3B => "#E3E8F8",
        }
    }
}

impl fmt::Display for ClassGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClassGroup(pub String);

impl fmt::Display for UnknownClassGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown class group '{}'", self.0)
    }
}

impl std::error::Error for UnknownClassGroup {}

impl FromStr for ClassGroup {
    type Err = UnknownClassGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClassGroup::ALL
            .into_iter()
            .find(|group| group.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownClassGroup(s.to_string()))
    }
}

/// Color assignment for every class group.
///
/// The key set never changes after construction. Loading a partial map fills
/// the gaps with [`ClassGroup::default_color`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ClassGroup, String>", into = "BTreeMap<ClassGroup, String>")]
pub struct ClassColors {
    colors: BTreeMap<ClassGroup, String>,
}

impl Default for ClassColors {
    fn default() -> Self {
        let colors = ClassGroup::ALL
            .into_iter()
            .map(|group| (group, group.default_color().to_string()))
            .collect();
        Self { colors }
    }
}

impl ClassColors {
    pub fn get(&self, group: ClassGroup) -> &str {
        self.colors
            .get(&group)
            .map(String::as_str)
            .unwrap_or_else(|| group.default_color())
    }

    pub fn set(&mut self, group: ClassGroup, color: impl Into<String>) {
        self.colors.insert(group, color.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassGroup, &str)> {
        self.colors.iter().map(|(group, color)| (*group, color.as_str()))
    }
}

impl From<BTreeMap<ClassGroup, String>> for ClassColors {
    fn from(loaded: BTreeMap<ClassGroup, String>) -> Self {
        let mut colors = ClassColors::default();
        for (group, color) in loaded {
            colors.set(group, color);
        }
        colors
    }
}

impl From<ClassColors> for BTreeMap<ClassGroup, String> {
    fn from(value: ClassColors) -> Self {
        value.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("1d".parse::<ClassGroup>().unwrap(), ClassGroup::Class1D);
        assert_eq!(" 3B ".parse::<ClassGroup>().unwrap(), ClassGroup::Class3B);
        assert!("4A".parse::<ClassGroup>().is_err());
    }

    #[test]
    fn partial_color_map_is_completed_on_load() {
        let colors: ClassColors = serde_json::from_str(r##"{"2A":"#000000"}"##).unwrap();
        assert_eq!(colors.get(ClassGroup::Class2A), "#000000");
        assert_eq!(colors.get(ClassGroup::Class1A), "#F8E3E7");
        assert_eq!(colors.iter().count(), ClassGroup::ALL.len());
    }
}
