//! Passenger Record Module
//! Typed manifest rows and the categorical domains derived from them.

use serde::Serialize;

/// One row of the passenger manifest.
///
/// Immutable once loaded. The raw `sex` string is carried as-is; the
/// demographics aggregate owns its normalization and domain check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    pub id: i64,
    pub survived: bool,
    pub class: i32,
    pub name: String,
    pub sex: String,
    pub age: Option<f64>,
    /// Siblings/spouses aboard.
    pub sibsp: u32,
    /// Parents/children aboard.
    pub parch: u32,
    pub fare: f64,
}

impl PassengerRecord {
    /// Family size aboard: siblings/spouses + parents/children + self.
    pub fn family_size(&self) -> u32 {
        self.sibsp + self.parch + 1
    }

    /// Surname: the text before the first comma of the name, trimmed. A name
    /// without a comma contributes its whole trimmed text.
    pub fn surname(&self) -> &str {
        match self.name.split_once(',') {
            Some((last, _)) => last.trim(),
            None => self.name.trim(),
        }
    }

    /// Age band, when the age is present and usable.
    pub fn age_band(&self) -> Option<AgeBand> {
        self.age.and_then(AgeBand::from_age)
    }
}

/// Passenger sex, the demographic domain {male, female}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Domain order used for bucketing and display.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Parse a raw manifest value: trimmed and lower-cased, restricted to the
    /// domain. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Sex> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Ordered age bands: Child [0,12], Teen (12,19], Adult (19,59], Senior (59+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBand {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBand {
    /// Band order used for bucketing and display.
    pub const ALL: [AgeBand; 4] = [AgeBand::Child, AgeBand::Teen, AgeBand::Adult, AgeBand::Senior];

    /// Band for an age; `None` for negative or NaN values.
    pub fn from_age(age: f64) -> Option<AgeBand> {
        if age.is_nan() || age < 0.0 {
            None
        } else if age <= 12.0 {
            Some(AgeBand::Child)
        } else if age <= 19.0 {
            Some(AgeBand::Teen)
        } else if age <= 59.0 {
            Some(AgeBand::Adult)
        } else {
            Some(AgeBand::Senior)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Child => "Child",
            AgeBand::Teen => "Teen",
            AgeBand::Adult => "Adult",
            AgeBand::Senior => "Senior",
        }
    }
}
