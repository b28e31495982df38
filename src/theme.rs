use serde::{Deserialize, Serialize};

use crate::ir::Gender;

/// Stroke/border colours keyed by gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderColors {
    pub male: String,
    pub female: String,
    pub neutral: String,
}

impl GenderColors {
    pub fn color_for(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
            Gender::Other | Gender::Unknown => &self.neutral,
        }
    }
}

impl Default for GenderColors {
    fn default() -> Self {
        Palette::Default.colors()
    }
}

/// Built-in palettes, including colour-vision-deficiency friendly variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Default,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl Palette {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "protanopia" => Some(Self::Protanopia),
            "deuteranopia" => Some(Self::Deuteranopia),
            "tritanopia" => Some(Self::Tritanopia),
            _ => None,
        }
    }

    pub fn colors(self) -> GenderColors {
        let (male, female, neutral) = match self {
            Self::Default => ("#2196F3", "#E91E63", "#9E9E9E"),
            Self::Protanopia | Self::Deuteranopia => ("#1976D2", "#FF9800", "#9E9E9E"),
            Self::Tritanopia => ("#E91E63", "#4CAF50", "#9E9E9E"),
        };
        GenderColors {
            male: male.to_string(),
            female: female.to_string(),
            neutral: neutral.to_string(),
        }
    }
}
