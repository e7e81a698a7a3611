use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gender encoded by the parity of the running number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Even running numbers are female, odd are male.
    pub fn from_running_number(running_number: u16) -> Self {
        if running_number % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Remainder of `running_number % 2` for this gender.
    pub fn parity(self) -> u16 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}
