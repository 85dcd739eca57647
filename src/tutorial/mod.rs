//! Tutorial coordinator.
//!
//! A step-index state machine over the fixed script in `script.rs`, driven
//! entirely by semantic notification events — it knows nothing about
//! widgets or layout. Skipping or finishing persists the completed flag so
//! the tutorial never auto-starts again.

pub mod script;

use bevy::prelude::*;

use crate::save;
use crate::shared::*;
use script::{StepTrigger, TUTORIAL_STEPS};

pub struct TutorialPlugin;

impl Plugin for TutorialPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (advance_on_action, advance_on_next, handle_skip).run_if(tutorial_running),
        );
    }
}

fn tutorial_running(tutorial: Res<TutorialState>) -> bool {
    tutorial.active
}

/// Trigger for the tutorial's current step, if any.
fn current_trigger(tutorial: &TutorialState) -> Option<StepTrigger> {
    TUTORIAL_STEPS.get(tutorial.step).map(|s| s.trigger)
}

/// Move one step forward; past the last step the tutorial completes.
fn advance(
    tutorial: &mut TutorialState,
    seen: &mut TutorialSeen,
    state: &GameState,
    phase: &State<GamePhase>,
    next_phase: &mut NextState<GamePhase>,
) {
    if tutorial.step + 1 >= TUTORIAL_STEPS.len() {
        finish(tutorial, seen, state, phase, next_phase);
    } else {
        tutorial.step += 1;
    }
}

/// Deactivate and persist the completed flag. If the buyer view is up but
/// nothing has grown yet, drop back to planting so the player is not
/// stranded on an empty screen.
fn finish(
    tutorial: &mut TutorialState,
    seen: &mut TutorialSeen,
    state: &GameState,
    phase: &State<GamePhase>,
    next_phase: &mut NextState<GamePhase>,
) {
    tutorial.active = false;
    tutorial.step = 0;
    seen.0 = true;
    save::persist_tutorial_seen();

    let any_grown = state
        .plots
        .iter()
        .any(|p| p.plant.as_ref().is_some_and(|plant| plant.is_grown));
    if *phase.get() == GamePhase::BuyerVisit && !any_grown {
        next_phase.set(GamePhase::Planting);
    }
    info!("[Tutorial] Completed.");
}

/// Match incoming semantic events against the current action-driven step.
#[allow(clippy::too_many_arguments)]
fn advance_on_action(
    mut tutorial: ResMut<TutorialState>,
    mut seen: ResMut<TutorialSeen>,
    state: Res<GameState>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut purchased: EventReader<SeedPurchasedEvent>,
    mut seller_closed: EventReader<SellerClosedEvent>,
    mut seed_selected: EventReader<SeedSelectedEvent>,
    mut planted: EventReader<SeedPlantedEvent>,
    mut watered: EventReader<PlotWateredEvent>,
    mut day_closed: EventReader<DayClosedEvent>,
    mut day_committed: EventReader<DayCommittedEvent>,
    mut sale_picked: EventReader<SalePickedEvent>,
    mut sold: EventReader<PlantsSoldEvent>,
    mut missions_opened: EventReader<MissionsOpenedEvent>,
) {
    // Drain every channel each run so an event from a non-matching step
    // can never linger and satisfy a later step.
    let purchases: Vec<_> = purchased.read().cloned().collect();
    let closes = seller_closed.read().count();
    let selections: Vec<_> = seed_selected.read().cloned().collect();
    let plantings: Vec<_> = planted.read().cloned().collect();
    let waterings: Vec<_> = watered.read().cloned().collect();
    let days_closed = day_closed.read().count();
    let days_committed = day_committed.read().count();
    let picks = sale_picked.read().count();
    let sales = sold.read().count();
    let mission_opens = missions_opened.read().count();

    let Some(trigger) = current_trigger(&tutorial) else {
        return;
    };

    let matched = match trigger {
        StepTrigger::Free => false,
        StepTrigger::BuySeed { seller_id } => {
            purchases.iter().any(|ev| ev.seller_id == seller_id)
        }
        StepTrigger::CloseSeller => closes > 0,
        StepTrigger::SelectSeed { kind } => selections.iter().any(|ev| ev.kind == kind),
        StepTrigger::PlantPlot { plot_id, kind } => plantings
            .iter()
            .any(|ev| ev.plot_id == plot_id && ev.kind == kind),
        StepTrigger::WaterPlot { plot_id } => waterings.iter().any(|ev| ev.plot_id == plot_id),
        StepTrigger::NextDay => days_closed > 0,
        StepTrigger::CloseSummary => days_committed > 0,
        StepTrigger::PickSale => picks > 0,
        StepTrigger::SellPlants => sales > 0,
        StepTrigger::OpenMissions => mission_opens > 0,
    };

    if matched {
        advance(&mut tutorial, &mut seen, &state, &phase, &mut next_phase);
    }
}

/// Free steps advance on an explicit "next".
fn advance_on_next(
    mut events: EventReader<TutorialNextEvent>,
    mut tutorial: ResMut<TutorialState>,
    mut seen: ResMut<TutorialSeen>,
    state: Res<GameState>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    for _ in events.read() {
        if current_trigger(&tutorial) == Some(StepTrigger::Free) {
            advance(&mut tutorial, &mut seen, &state, &phase, &mut next_phase);
        }
    }
}

fn handle_skip(
    mut events: EventReader<TutorialSkipEvent>,
    mut tutorial: ResMut<TutorialState>,
    mut seen: ResMut<TutorialSeen>,
    state: Res<GameState>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if events.read().next().is_some() {
        finish(&mut tutorial, &mut seen, &state, &phase, &mut next_phase);
    }
}
