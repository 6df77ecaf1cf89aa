//! Wizard step state machine

use std::fmt;

use crate::error::WizardError;

/// Current step in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Basic,
    Questions,
    Confirm,
    Publish,
}

/// User action that moves the step pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Successful submission of the current step.
    Advance,
    Back,
    /// "Exit Test Creation" from the question editor.
    Exit,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basic,
        WizardStep::Questions,
        WizardStep::Confirm,
        WizardStep::Publish,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Details",
            Self::Questions => "Questions",
            Self::Confirm => "Confirm",
            Self::Publish => "Publish",
        }
    }

    pub fn step_number(&self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Questions => 2,
            Self::Confirm => 3,
            Self::Publish => 4,
        }
    }

    pub fn total_steps() -> u8 {
        4
    }

    /// Apply `action` to this step. Pairs that have no edge are rejected.
    pub fn transition(self, action: WizardAction) -> Result<WizardStep, WizardError> {
        use WizardAction::*;
        use WizardStep::*;

        match (self, action) {
            (Basic, Advance) => Ok(Questions),
            (Questions, Advance) => Ok(Confirm),
            (Confirm, Advance) => Ok(Publish),
            (Questions, Back) | (Questions, Exit) => Ok(Basic),
            (Confirm, Back) => Ok(Questions),
            (Publish, Back) => Ok(Confirm),
            (Basic, Back) | (Basic, Exit) | (Confirm, Exit) | (Publish, Advance)
            | (Publish, Exit) => Err(WizardError::InvalidTransition { from: self, action }),
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = WizardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Questions),
            3 => Ok(Self::Confirm),
            4 => Ok(Self::Publish),
            other => Err(WizardError::StepOutOfRange(other)),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.step_number(), self.title())
    }
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Advance => "advance",
            Self::Back => "go back",
            Self::Exit => "exit",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        let mut step = WizardStep::default();
        assert_eq!(step, WizardStep::Basic);
        for expected in [WizardStep::Questions, WizardStep::Confirm, WizardStep::Publish] {
            step = step.transition(WizardAction::Advance).unwrap();
            assert_eq!(step, expected);
        }
    }

    #[test]
    fn test_backward_edges() {
        assert_eq!(
            WizardStep::Confirm.transition(WizardAction::Back).unwrap(),
            WizardStep::Questions
        );
        assert_eq!(
            WizardStep::Questions.transition(WizardAction::Exit).unwrap(),
            WizardStep::Basic
        );
        assert_eq!(
            WizardStep::Publish.transition(WizardAction::Back).unwrap(),
            WizardStep::Confirm
        );
    }

    #[test]
    fn test_rejected_transitions() {
        let rejected = [
            (WizardStep::Basic, WizardAction::Back),
            (WizardStep::Basic, WizardAction::Exit),
            (WizardStep::Confirm, WizardAction::Exit),
            (WizardStep::Publish, WizardAction::Advance),
            (WizardStep::Publish, WizardAction::Exit),
        ];
        for (step, action) in rejected {
            assert!(matches!(
                step.transition(action),
                Err(WizardError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::try_from(step.step_number()).unwrap(), step);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            WizardStep::try_from(0),
            Err(WizardError::StepOutOfRange(0))
        ));
        assert!(matches!(
            WizardStep::try_from(5),
            Err(WizardError::StepOutOfRange(5))
        ));
    }
}
