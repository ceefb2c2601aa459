use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Template,
    Upload,
    Review,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Template => "Select Template",
            WizardStep::Upload => "Upload Contacts",
            WizardStep::Review => "Review & Send",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Template => 0,
            WizardStep::Upload => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn all() -> [WizardStep; 3] {
        [WizardStep::Template, WizardStep::Upload, WizardStep::Review]
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Template => Some(WizardStep::Upload),
            WizardStep::Upload => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Template => None,
            WizardStep::Upload => Some(WizardStep::Template),
            WizardStep::Review => Some(WizardStep::Upload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_step() {
        assert_eq!(WizardStep::default(), WizardStep::Template);
    }

    #[test]
    fn indices_follow_order() {
        for (i, step) in WizardStep::all().iter().enumerate() {
            assert_eq!(step.index(), i, "{:?}", step);
        }
    }

    #[test]
    fn next_then_previous_round_trips() {
        for step in WizardStep::all() {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
            }
        }
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Template.previous(), None);
    }
}
