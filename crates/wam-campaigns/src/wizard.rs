//! The campaign wizard's step machine.
//!
//! Steps are an explicit enum with the transition rules declared here,
//! in one place: forward moves pass through a completion gate, backward
//! jumps are free.

use serde::{Deserialize, Serialize};

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Configure,
    Generate,
    Review,
    Recipients,
    Schedule,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Configure,
        WizardStep::Generate,
        WizardStep::Review,
        WizardStep::Recipients,
        WizardStep::Schedule,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<WizardStep> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Configure => "Configure",
            WizardStep::Generate => "Generate",
            WizardStep::Review => "Review & Edit",
            WizardStep::Recipients => "Recipients",
            WizardStep::Schedule => "Schedule & Send",
        }
    }
}
