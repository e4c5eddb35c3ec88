//! Step indicator states

use super::step::StepDescriptor;

/// Display state of one step relative to the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorItem<'a> {
    pub step: &'a StepDescriptor,
    pub state: StepState,
    /// Rendered with an "Optional" badge
    pub optional: bool,
}

/// Map each step to its state for the given 1-based current index
pub fn indicator_items(steps: &[StepDescriptor], current: usize) -> Vec<IndicatorItem<'_>> {
    steps
        .iter()
        .map(|step| {
            let id = step.id as usize;
            let state = if id < current {
                StepState::Completed
            } else if id == current {
                StepState::Active
            } else {
                StepState::Pending
            };
            IndicatorItem {
                step,
                state,
                optional: !step.required,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::step::default_steps;

    fn states(current: usize) -> Vec<StepState> {
        let steps = default_steps();
        indicator_items(&steps, current)
            .iter()
            .map(|item| item.state)
            .collect()
    }

    #[test]
    fn test_first_step_active() {
        let s = states(1);
        assert_eq!(s[0], StepState::Active);
        assert!(s[1..].iter().all(|st| *st == StepState::Pending));
    }

    #[test]
    fn test_middle_step() {
        assert_eq!(
            states(3),
            vec![
                StepState::Completed,
                StepState::Completed,
                StepState::Active,
                StepState::Pending,
                StepState::Pending,
                StepState::Pending,
            ]
        );
    }

    #[test]
    fn test_completion_marks_everything_completed() {
        assert!(states(7).iter().all(|st| *st == StepState::Completed));
    }

    #[test]
    fn test_optional_badge_follows_required_flag() {
        let steps = default_steps();
        let items = indicator_items(&steps, 1);
        assert!(!items[0].optional);
        assert!(items[1..].iter().all(|item| item.optional));
    }
}
