//! Keyboard input — turns key presses into engine action events.
//!
//! Mirrors the modal structure of the game: the seller and buyer views
//! capture the digit keys while open; the planting phase owns garden
//! shortcuts. During the tutorial the next-day key is only forwarded on
//! the scripted step, like the disabled button it stands in for.

use bevy::prelude::*;

use super::{SaleSelection, SelectedSeed};
use crate::shared::*;
use crate::tutorial::script::{StepTrigger, TUTORIAL_STEPS};

pub fn seller_view_open(phase: Res<State<GamePhase>>, revisit: Res<Revisit>) -> bool {
    *phase.get() == GamePhase::SellerVisit || revisit.sellers
}

pub fn buyer_view_open(phase: Res<State<GamePhase>>, revisit: Res<Revisit>) -> bool {
    *phase.get() == GamePhase::BuyerVisit || revisit.buyer
}

const SEED_KEYS: [(KeyCode, PlantKind); 8] = [
    (KeyCode::Digit1, PlantKind::MorningGlory),
    (KeyCode::Digit2, PlantKind::Tulip),
    (KeyCode::Digit3, PlantKind::Violet),
    (KeyCode::Digit4, PlantKind::Sunflower),
    (KeyCode::Digit5, PlantKind::Rose),
    (KeyCode::Digit6, PlantKind::Cactus),
    (KeyCode::Digit7, PlantKind::PurpleMorningGlory),
    (KeyCode::Digit8, PlantKind::PurpleTulip),
];

pub fn seller_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut buy: EventWriter<BuySeedEvent>,
    mut buy_all: EventWriter<BuyAllSeedsEvent>,
    mut close: EventWriter<CloseSellerEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for (key, seller_id) in [
        (KeyCode::Digit1, 0),
        (KeyCode::Digit2, 1),
        (KeyCode::Digit3, 2),
    ] {
        if keyboard.just_pressed(key) {
            buy.send(BuySeedEvent { seller_id });
            sfx.send(PlaySfxEvent {
                sfx_id: "click".to_string(),
            });
        }
    }
    if keyboard.just_pressed(KeyCode::KeyA) {
        buy_all.send(BuyAllSeedsEvent);
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        close.send(CloseSellerEvent);
    }
}

pub fn buyer_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<GameState>,
    mut sale: ResMut<SaleSelection>,
    mut sell: EventWriter<SellPlantsEvent>,
    mut close: EventWriter<CloseBuyerEvent>,
    mut picked: EventWriter<SalePickedEvent>,
) {
    // Digits toggle the Nth grown plot in and out of the selection.
    let grown: Vec<u32> = state
        .plots
        .iter()
        .filter(|p| p.plant.as_ref().is_some_and(|plant| plant.is_grown))
        .map(|p| p.id)
        .collect();
    for (index, key) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ]
    .iter()
    .enumerate()
    {
        if keyboard.just_pressed(*key) {
            if let Some(&plot_id) = grown.get(index) {
                if let Some(pos) = sale.plot_ids.iter().position(|&id| id == plot_id) {
                    sale.plot_ids.remove(pos);
                } else {
                    sale.plot_ids.push(plot_id);
                    picked.send(SalePickedEvent { plot_id });
                }
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        sell.send(SellPlantsEvent {
            plot_ids: std::mem::take(&mut sale.plot_ids),
        });
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        sale.plot_ids.clear();
        close.send(CloseBuyerEvent);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn session_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<GameState>,
    tutorial: Res<TutorialState>,
    phase: Res<State<GamePhase>>,
    mut revisit: ResMut<Revisit>,
    mut selected: ResMut<SelectedSeed>,
    mut plant: EventWriter<PlantSeedEvent>,
    mut water: EventWriter<WaterPlotEvent>,
    mut water_all: EventWriter<WaterAllEvent>,
    mut next_day: EventWriter<NextDayEvent>,
    mut confirm: EventWriter<ConfirmDayEvent>,
    mut buy_plot: EventWriter<BuyPlotEvent>,
    mut sprinkler: EventWriter<BuySprinklerEvent>,
    mut seed_selected: EventWriter<SeedSelectedEvent>,
    mut session_events: SessionEventWriters,
) {
    // Tutorial controls work everywhere in the session.
    if tutorial.active {
        if keyboard.just_pressed(KeyCode::KeyT) {
            session_events.tutorial_next.send(TutorialNextEvent);
        }
        if keyboard.just_pressed(KeyCode::Escape) {
            session_events.tutorial_skip.send(TutorialSkipEvent);
        }
    }
    if keyboard.just_pressed(KeyCode::KeyU) {
        session_events.mute.send(ToggleMuteEvent);
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        session_events.missions.send(MissionsOpenedEvent);
    }
    if keyboard.just_pressed(KeyCode::F5) && !tutorial.active {
        session_events.save_quit.send(SaveAndQuitEvent);
    }

    match phase.get() {
        GamePhase::DailySummary => {
            if keyboard.just_pressed(KeyCode::Enter) {
                confirm.send(ConfirmDayEvent);
            }
        }
        GamePhase::Planting if !revisit.sellers && !revisit.buyer => {
            for (key, kind) in SEED_KEYS {
                if keyboard.just_pressed(key) && state.seed_count(kind) > 0 {
                    selected.kind = Some(kind);
                    seed_selected.send(SeedSelectedEvent { kind });
                }
            }
            if keyboard.just_pressed(KeyCode::KeyP) {
                if let (Some(kind), Some(plot)) = (
                    selected.kind,
                    state.plots.iter().find(|p| p.plant.is_none()),
                ) {
                    plant.send(PlantSeedEvent {
                        plot_id: plot.id,
                        kind,
                    });
                }
            }
            if keyboard.just_pressed(KeyCode::KeyW) {
                if let Some(plot) = state.plots.iter().find(|p| {
                    p.plant
                        .as_ref()
                        .is_some_and(|plant| !plant.is_grown && !plant.is_watered)
                }) {
                    water.send(WaterPlotEvent { plot_id: plot.id });
                }
            }
            if keyboard.just_pressed(KeyCode::KeyA) {
                water_all.send(WaterAllEvent);
            }
            if keyboard.just_pressed(KeyCode::KeyN) && next_day_allowed(&tutorial) {
                next_day.send(NextDayEvent);
            }
            if keyboard.just_pressed(KeyCode::KeyB) {
                buy_plot.send(BuyPlotEvent);
            }
            if keyboard.just_pressed(KeyCode::KeyK) {
                sprinkler.send(BuySprinklerEvent);
            }
            if keyboard.just_pressed(KeyCode::KeyR) && !tutorial.active {
                revisit.sellers = true;
            }
            if keyboard.just_pressed(KeyCode::KeyV) && !tutorial.active {
                revisit.buyer = true;
            }
        }
        _ => {}
    }
}

/// Grouped low-traffic writers to keep `session_input`'s signature within
/// the system parameter limit.
#[derive(bevy::ecs::system::SystemParam)]
pub struct SessionEventWriters<'w> {
    tutorial_next: EventWriter<'w, TutorialNextEvent>,
    tutorial_skip: EventWriter<'w, TutorialSkipEvent>,
    mute: EventWriter<'w, ToggleMuteEvent>,
    missions: EventWriter<'w, MissionsOpenedEvent>,
    save_quit: EventWriter<'w, SaveAndQuitEvent>,
}

/// Outside the tutorial the day always advances; inside it only on the
/// scripted step.
fn next_day_allowed(tutorial: &TutorialState) -> bool {
    !tutorial.active
        || TUTORIAL_STEPS
            .get(tutorial.step)
            .is_some_and(|step| step.trigger == StepTrigger::NextDay)
}

/// Breeding-lab shortcuts, available from the planting phase once the lab
/// is unlocked: X extracts from the first grown gene-bearing plot, C runs
/// the classic morning-glory × tulip combination.
pub fn breeding_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<GameState>,
    balance: Res<Balance>,
    tutorial: Res<TutorialState>,
    mut extract: EventWriter<ExtractGeneEvent>,
    mut combine: EventWriter<CombineGenesEvent>,
) {
    if tutorial.active || state.level < balance.breeding_unlock_level {
        return;
    }
    if keyboard.just_pressed(KeyCode::KeyX) {
        if let Some(plot) = state.plots.iter().find(|p| {
            p.plant.as_ref().is_some_and(|plant| plant.is_grown)
        }) {
            extract.send(ExtractGeneEvent { plot_id: plot.id });
        }
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        combine.send(CombineGenesEvent {
            first: PlantKind::MorningGlory,
            second: PlantKind::Tulip,
        });
    }
}

pub fn game_over_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut new_game: EventWriter<NewGameEvent>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        new_game.send(NewGameEvent);
    }
}
