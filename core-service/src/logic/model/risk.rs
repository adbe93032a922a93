//! Risk label - the only thing the model's output is reduced to

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::High => "High",
            RiskLabel::Low => "Low",
        }
    }

    /// Display text from the reference data
    pub fn friendly_text(&self) -> &'static str {
        crate::logic::reference::risk_text(*self)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
