use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Flat,
    Grouped,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Flat => "flat",
            DisplayMode::Grouped => "grouped",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything other than `grouped` (any case) falls back to `flat`.
impl FromStr for DisplayMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("grouped") {
            Ok(DisplayMode::Grouped)
        } else {
            Ok(DisplayMode::Flat)
        }
    }
}
