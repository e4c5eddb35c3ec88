//! Tests for the wizard controller

use super::*;
use crate::form::StepForm;
use crate::model::{AggregatePatch, Company, RegistrationAggregate, Team};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn controller() -> WizardController {
    WizardController::new(default_steps()).unwrap()
}

fn acme() -> Company {
    Company {
        name: "Acme".to_string(),
        email: "a@acme.com".to_string(),
        password: "x".to_string(),
        cnpj: "123".to_string(),
    }
}

fn team(name: &str) -> Team {
    Team {
        name: name.to_string(),
        objectives: None,
        location: None,
        parent_team: None,
    }
}

/// Advance with the company patch, then skip until `index` is reached
fn controller_at(index: usize) -> WizardController {
    let mut wizard = controller();
    wizard.advance(Some(AggregatePatch::company(acme())));
    while wizard.current_step_index() < index {
        wizard.skip();
    }
    wizard
}

// ─── Construction ───────────────────────────────────────────────────────────

#[test]
fn test_new_controller_starts_at_first_step() {
    let wizard = controller();
    assert_eq!(wizard.current_step_index(), 1);
    assert_eq!(wizard.aggregate(), &RegistrationAggregate::default());
    assert!(!wizard.is_complete());
    assert!(!wizard.is_finished());
    assert!(matches!(wizard.current_view(), View::Step(step) if step.kind == StepKind::Company));
}

#[test]
fn test_new_controller_rejects_bad_sequence() {
    let steps = vec![StepDescriptor::new(1, StepKind::Teams, false)];
    assert!(matches!(
        WizardController::new(steps),
        Err(SequenceError::FirstStepOptional { .. })
    ));
}

// ─── Navigation ─────────────────────────────────────────────────────────────

#[test]
fn test_advance_merges_company() {
    let mut wizard = controller();
    let transition = wizard.advance(Some(AggregatePatch::company(acme())));

    assert_eq!(transition, Transition::Moved { from: 1, to: 2 });
    assert_eq!(wizard.current_step_index(), 2);
    assert_eq!(wizard.aggregate().company.name, "Acme");
}

#[test]
fn test_skip_details_leaves_slot_empty() {
    let mut wizard = controller_at(2);
    assert_eq!(wizard.skip(), Transition::Moved { from: 2, to: 3 });
    assert!(wizard.aggregate().company_details.is_empty());
}

#[test]
fn test_retreat_at_first_step_is_noop() {
    let mut wizard = controller();
    assert_eq!(wizard.retreat(), Transition::Unchanged);
    assert_eq!(wizard.current_step_index(), 1);
    assert_eq!(wizard.aggregate(), &RegistrationAggregate::default());
}

#[test]
fn test_skip_required_step_is_noop() {
    let mut wizard = controller();
    assert!(!wizard.can_skip());
    assert_eq!(wizard.skip(), Transition::Unchanged);
    assert_eq!(wizard.current_step_index(), 1);
}

#[test]
fn test_retreat_never_touches_aggregate() {
    let mut wizard = controller_at(3);
    wizard.advance(Some(AggregatePatch::teams(vec![team("Platform")])));
    let before = wizard.aggregate().clone();

    assert_eq!(wizard.retreat(), Transition::Moved { from: 4, to: 3 });
    assert_eq!(wizard.aggregate(), &before);
}

#[test]
fn test_skip_after_filling_keeps_data() {
    let mut wizard = controller_at(3);
    wizard.advance(Some(AggregatePatch::teams(vec![team("Platform")])));
    wizard.retreat();

    wizard.skip();
    assert_eq!(wizard.current_step_index(), 4);
    assert_eq!(wizard.aggregate().teams, vec![team("Platform")]);
}

#[test]
fn test_last_step_enters_completion() {
    let mut wizard = controller_at(6);
    assert_eq!(wizard.advance(None), Transition::Moved { from: 6, to: 7 });
    assert!(wizard.is_complete());
    assert!(wizard.current_step().is_none());
    assert!(matches!(wizard.current_view(), View::Completion(agg) if agg.company.name == "Acme"));
}

#[test]
fn test_skip_last_step_enters_completion() {
    let mut wizard = controller_at(6);
    assert_eq!(wizard.skip(), Transition::Moved { from: 6, to: 7 });
    assert!(wizard.is_complete());
}

#[test]
fn test_completion_is_read_only() {
    let mut wizard = controller_at(7);
    let before = wizard.aggregate().clone();

    assert_eq!(
        wizard.advance(Some(AggregatePatch::teams(vec![team("Late")]))),
        Transition::Unchanged
    );
    assert_eq!(wizard.skip(), Transition::Unchanged);
    assert_eq!(wizard.current_step_index(), 7);
    assert_eq!(wizard.aggregate(), &before);
}

#[test]
fn test_retreat_from_completion_returns_to_last_step() {
    let mut wizard = controller_at(7);
    assert_eq!(wizard.retreat(), Transition::Moved { from: 7, to: 6 });
}

#[test]
fn test_index_stays_in_bounds_for_any_sequence() {
    // Seeded random walk over the three navigation calls
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut wizard = controller();
        for _ in 0..40 {
            match rng.random_range(0..3u8) {
                0 => {
                    wizard.advance(Some(AggregatePatch::company(acme())));
                }
                1 => {
                    wizard.retreat();
                }
                _ => {
                    let before = wizard.aggregate().clone();
                    let from = wizard.current_step_index();
                    if let Transition::Moved { to, .. } = wizard.skip() {
                        assert_eq!(to, from + 1);
                    }
                    assert_eq!(wizard.aggregate(), &before);
                }
            }
            let index = wizard.current_step_index();
            assert!((1..=7).contains(&index), "index {index} out of range");
        }
    }
}

// ─── Indicator ──────────────────────────────────────────────────────────────

#[test]
fn test_indicator_tracks_current_index() {
    let wizard = controller_at(3);
    let states: Vec<StepState> = wizard.indicator().iter().map(|i| i.state).collect();
    assert_eq!(
        &states[..4],
        &[
            StepState::Completed,
            StepState::Completed,
            StepState::Active,
            StepState::Pending
        ]
    );
}

// ─── Finish ─────────────────────────────────────────────────────────────────

#[test]
fn test_finish_before_completion_rejected() {
    let mut wizard = controller_at(4);
    let mut handler = LogFinish::new();

    let err = wizard.finish(&mut handler).unwrap_err();
    assert!(matches!(err, FinishError::NotComplete { current: 4, total: 6 }));
    assert!(handler.received().is_none());
}

#[test]
fn test_finish_runs_exactly_once() {
    let mut wizard = controller_at(7);
    let mut calls = 0;
    let mut handler = |aggregate: RegistrationAggregate| -> anyhow::Result<()> {
        assert_eq!(aggregate.company.name, "Acme");
        calls += 1;
        Ok(())
    };

    wizard.finish(&mut handler).unwrap();
    assert!(matches!(
        wizard.finish(&mut handler),
        Err(FinishError::AlreadyFinished)
    ));
    assert_eq!(calls, 1);
}

#[test]
fn test_navigation_is_noop_after_finish() {
    let mut wizard = controller_at(7);
    wizard.finish(&mut LogFinish::new()).unwrap();

    assert!(wizard.is_finished());
    assert_eq!(wizard.retreat(), Transition::Unchanged);
    assert_eq!(wizard.skip(), Transition::Unchanged);
    assert_eq!(wizard.advance(None), Transition::Unchanged);
    assert_eq!(wizard.current_step_index(), 7);
}

#[test]
fn test_failing_handler_is_not_retried() {
    let mut wizard = controller_at(7);
    let mut handler =
        |_: RegistrationAggregate| -> anyhow::Result<()> { anyhow::bail!("backend down") };

    assert!(matches!(wizard.finish(&mut handler), Err(FinishError::Handler(_))));
    assert!(matches!(
        wizard.finish(&mut handler),
        Err(FinishError::AlreadyFinished)
    ));
}

#[test]
fn test_log_finish_keeps_aggregate() {
    let mut wizard = controller_at(7);
    let mut handler = LogFinish::new();
    wizard.finish(&mut handler).unwrap();
    assert_eq!(handler.into_received().map(|a| a.company.name), Some("Acme".to_string()));
}

// ─── Forms round-trip through the controller ────────────────────────────────

#[test]
fn test_revisited_list_step_shows_committed_entries() {
    let mut wizard = controller_at(3);

    let mut form = StepForm::mount(StepKind::Teams, wizard.aggregate());
    form.set_field("name", "Platform");
    form.add_draft().unwrap();
    form.set_field("name", "Sales");
    form.add_draft().unwrap();
    let committed = form.commit().unwrap();
    wizard.advance(Some(committed));

    wizard.retreat();
    let remounted = StepForm::mount(StepKind::Teams, wizard.aggregate());
    assert_eq!(remounted.entry_labels(), form.entry_labels());
    assert_eq!(wizard.aggregate().team_names(), vec!["Platform", "Sales"]);
}
