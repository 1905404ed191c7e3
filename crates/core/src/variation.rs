use serde::{Deserialize, Serialize};

/// Persona the assistant answers as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variation {
    /// General product questions (default)
    #[default]
    Generic,
    /// Questions about the selected building's data
    Insight,
}

impl Variation {
    pub const VALUES: &[Variation] = &[Variation::Generic, Variation::Insight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variation::Generic => "generic",
            Variation::Insight => "insight",
        }
    }

    /// Tab label shown in the modal
    pub fn label(&self) -> &'static str {
        match self {
            Variation::Generic => "Generic",
            Variation::Insight => "Insight",
        }
    }

    /// Step through [`Variation::VALUES`], wrapping at both ends
    pub fn cycle(&self, steps: i8) -> Self {
        let len = Self::VALUES.len() as i8;
        let current = Self::VALUES.iter().position(|v| v == self).unwrap_or(0) as i8;
        Self::VALUES[(current + steps).rem_euclid(len) as usize]
    }
}

impl std::fmt::Display for Variation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Variation {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" => Ok(Variation::Generic),
            "insight" => Ok(Variation::Insight),
            _ => Err(crate::Error::Config(format!("invalid variation: {}", s))),
        }
    }
}
