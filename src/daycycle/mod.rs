//! Day cycle — the two-phase day advance.
//!
//! CloseDay builds a `DailySummary` from the current state plus fresh
//! random draws without mutating anything; the player reviews it, and
//! CommitDay folds it into the next day's state. The growth tick inside
//! CommitDay re-rolls its own weather risk rather than reusing the
//! preview's draws, so the two phases are not guaranteed to agree — that
//! asymmetry is inherited behavior and is kept on purpose.

use bevy::prelude::*;

use crate::economy::sellers::generate_sellers;
use crate::rng::GameRng;
use crate::shared::*;

pub struct DayCyclePlugin;

impl Plugin for DayCyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_next_day, handle_confirm_day, watch_co2_limit).run_if(in_session),
        );
    }
}

// ─── Flavor text ─────────────────────────────────────────────────────────────

const SURGE_EVENTS: [&str; 4] = [
    "🏭 A nearby factory ran at full tilt and CO2 spiked!",
    "🚧 Massive construction works pushed CO2 sharply up!",
    "🚗 Gridlock around the world sent CO2 soaring!",
    "🔥 A distant wildfire left the air hazy…",
];

const REDUCTION_EVENTS: [&str; 4] = [
    "🌳 A huge reforestation drive succeeded and CO2 dropped!",
    "💡 A clean-energy breakthrough was announced!",
    "🌍 A global conservation campaign is paying off!",
    "💨 A new carbon-capture process went into service.",
];

fn threshold_warning(threshold: i32) -> &'static str {
    match threshold {
        90 => "🚨 Final warning: CO2 passed 90%! The planet is crying out!",
        80 => "🚨 Emergency: CO2 reached 80%! Catastrophe is closing in!",
        60 => "⚠️ Danger: CO2 reached 60%! The future is at risk!",
        40 => "⚠️ Warning: CO2 reached 40%. We need more green!",
        _ => "🔔 Caution: CO2 reached 20%. The environment is degrading.",
    }
}

// ─── Phase A: CloseDay ───────────────────────────────────────────────────────

/// Build the daily summary from the current state. Pure apart from the
/// RNG: the state itself is untouched.
pub fn preview_day(
    state: &GameState,
    balance: &Balance,
    registry: &PlantRegistry,
    tutorial_active: bool,
    rng: &mut GameRng,
) -> DailySummary {
    let (min, max) = balance.daily_co2_increase;
    let co2_increased = rng.range_inclusive(min, max);

    // At most one random event per day; a bonus reduction shadows a surge.
    // Neither fires while the tutorial is running.
    let mut event_message = None;
    let mut co2_surge = None;
    let mut co2_bonus_reduction = None;
    if !tutorial_active {
        if rng.chance(balance.bonus_reduction_chance) {
            let (lo, hi) = balance.bonus_reduction_range;
            co2_bonus_reduction = Some(rng.range_inclusive(lo, hi) as i32);
            event_message = rng.pick(&REDUCTION_EVENTS).map(|m| m.to_string());
        } else if rng.chance(balance.surge_chance) {
            co2_surge = Some(balance.surge_amount);
            event_message = rng.pick(&SURGE_EVENTS).map(|m| m.to_string());
        }
    }

    // Weather risk preview for every plant that would mature this tick.
    let mut co2_decreased = 0;
    let mut weather_notes: Vec<String> = Vec::new();
    for plot in &state.plots {
        let Some(plant) = plot.plant.as_ref() else {
            continue;
        };
        if plant.is_grown || !plant.is_watered || plant.growth_stage != 1 {
            continue;
        }
        let Some(def) = registry.get(plant.kind) else {
            continue;
        };
        let mut will_grow = true;
        if state.weather == WeatherKind::Cloudy && rng.chance(balance.cloud_stall_chance) {
            weather_notes.push(format!("☁️ {}'s growth slowed", def.name));
            will_grow = false;
        }
        if state.weather == WeatherKind::Stormy && rng.chance(balance.storm_damage_chance) {
            weather_notes.push(format!("⛈️ {} took storm damage", def.name));
            will_grow = false;
        }
        if will_grow {
            co2_decreased += def.co2_reduction;
        }
    }

    DailySummary {
        co2_increased,
        co2_decreased,
        money_spent: state.money_spent_today,
        money_earned: state.money_earned_today,
        event_message,
        co2_surge,
        co2_bonus_reduction,
        weather_event_message: if weather_notes.is_empty() {
            None
        } else {
            Some(format!("{}.", weather_notes.join(". ")))
        },
    }
}

// ─── Phase B: CommitDay ──────────────────────────────────────────────────────

pub struct DayCommit {
    pub game_over: bool,
}

/// Fold a reviewed summary into the state, advancing to the next day.
/// The only phase that mutates persisted state.
#[allow(clippy::too_many_arguments)]
pub fn commit_day(
    state: &mut GameState,
    summary: &DailySummary,
    new_weather: WeatherKind,
    balance: &Balance,
    registry: &PlantRegistry,
    weather_table: &WeatherTable,
    rng: &mut GameRng,
    log: &mut MessageLog,
) -> DayCommit {
    let auto_watered_by_rain = new_weather.waters_plants();

    // Sprinkler upkeep: a shortfall skips the sprinkler for the day,
    // never a partial charge.
    let mut sprinkler_worked = false;
    let mut maintenance_paid = 0;
    if state.has_sprinkler {
        if state.money >= balance.sprinkler_maintenance {
            state.money -= balance.sprinkler_maintenance;
            maintenance_paid = balance.sprinkler_maintenance;
            sprinkler_worked = true;
        } else {
            log.push("⚠️ Couldn't afford the sprinkler's upkeep today.");
        }
    }
    let auto_watered = auto_watered_by_rain || sprinkler_worked;

    let mut new_co2 = state.co2_level + summary.co2_increased as i32 - summary.co2_decreased;
    if let Some(surge) = summary.co2_surge {
        new_co2 += surge;
    }
    if let Some(bonus) = summary.co2_bonus_reduction {
        new_co2 -= bonus;
    }

    // Ascending order, so the most severe crossed threshold is pushed
    // last and shows newest in the log.
    for threshold in CO2_THRESHOLDS {
        if state.co2_level < threshold && new_co2 >= threshold {
            log.push(threshold_warning(threshold));
        }
    }

    if let Some(message) = &summary.event_message {
        if let Some(surge) = summary.co2_surge {
            log.push(format!("{} (+{}%)", message, surge));
        } else if let Some(bonus) = summary.co2_bonus_reduction {
            log.push(format!("{} (-{}%)", message, bonus));
        }
    }

    // Growth tick. Risk is re-rolled against the PREVIOUS day's weather;
    // storm damage is a setback to full duration, not destruction. Every
    // plant's watered flag resets to the new day's auto-water state.
    let previous_weather = state.weather;
    let mut harvest_notes: Vec<String> = Vec::new();
    let mut storm_notes: Vec<String> = Vec::new();
    for plot in state.plots.iter_mut() {
        let Some(plant) = plot.plant.as_mut() else {
            continue;
        };
        if !plant.is_grown && plant.is_watered {
            if let Some(def) = registry.get(plant.kind) {
                let stalled = previous_weather == WeatherKind::Cloudy
                    && rng.chance(balance.cloud_stall_chance);
                if previous_weather == WeatherKind::Stormy
                    && rng.chance(balance.storm_damage_chance)
                {
                    storm_notes.push(format!("⛈️ The storm damaged your {}!", def.name));
                    plant.growth_stage = def.growth_days;
                    plant.is_watered = auto_watered;
                    continue;
                }
                if !stalled {
                    plant.growth_stage = plant.growth_stage.saturating_sub(1);
                    if plant.growth_stage == 0 {
                        plant.is_grown = true;
                        harvest_notes.push(format!(
                            "{}{} finished growing — CO2 down {}%!",
                            def.glyph, def.name, def.co2_reduction
                        ));
                    }
                }
            }
        }
        plant.is_watered = auto_watered;
    }
    for note in storm_notes.into_iter().chain(harvest_notes) {
        log.push(note);
    }

    state.co2_level = new_co2.clamp(0, balance.max_co2);
    let game_over = new_co2 >= balance.max_co2;

    state.day += 1;
    log.push(format!("☀️ Day {} begins.", state.day));
    if let Some(def) = weather_table.get(new_weather) {
        log.push(format!("Today's weather: {} {}.", def.glyph, def.name));
    }
    if sprinkler_worked {
        log.push(format!(
            "The sprinkler ran and watered every plant. (upkeep {})",
            maintenance_paid
        ));
    } else if auto_watered_by_rain {
        log.push("Rain watered all of your plants!");
    }

    state.weather = new_weather;
    state.money_spent_today = maintenance_paid;
    state.money_earned_today = 0;

    DayCommit { game_over }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

pub fn handle_next_day(
    mut events: EventReader<NextDayEvent>,
    state: Res<GameState>,
    balance: Res<Balance>,
    registry: Res<PlantRegistry>,
    tutorial: Res<TutorialState>,
    mut rng: ResMut<GameRng>,
    mut pending: ResMut<PendingSummary>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut closed: EventWriter<DayClosedEvent>,
) {
    for _ in events.read() {
        if pending.summary.is_some() {
            continue;
        }
        let summary = preview_day(&state, &balance, &registry, tutorial.active, &mut rng);
        pending.summary = Some(summary);
        next_phase.set(GamePhase::DailySummary);
        closed.send(DayClosedEvent);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_confirm_day(
    mut events: EventReader<ConfirmDayEvent>,
    mut state: ResMut<GameState>,
    balance: Res<Balance>,
    registry: Res<PlantRegistry>,
    weather_table: Res<WeatherTable>,
    tutorial: Res<TutorialState>,
    mut rng: ResMut<GameRng>,
    mut pending: ResMut<PendingSummary>,
    mut cohort: ResMut<SellerCohort>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut log: ResMut<MessageLog>,
    mut committed: EventWriter<DayCommittedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _ in events.read() {
        let Some(summary) = pending.summary.take() else {
            continue;
        };

        // The scripted second tutorial day routes to the buyer.
        let tutorial_day_two = tutorial.active && state.day == 1;

        // Tutorial days are always sunny so the scripted plant cannot stall.
        let new_weather = if tutorial.active {
            WeatherKind::Sunny
        } else {
            rng.weighted(&weather_table.entries, |w| w.weight)
                .map(|w| w.kind)
                .unwrap_or(WeatherKind::Sunny)
        };

        if summary.co2_surge.is_some() {
            sfx.send(PlaySfxEvent {
                sfx_id: "alert".to_string(),
            });
        } else if summary.co2_bonus_reduction.is_some() {
            sfx.send(PlaySfxEvent {
                sfx_id: "celebrate".to_string(),
            });
        }

        let outcome = commit_day(
            &mut state,
            &summary,
            new_weather,
            &balance,
            &registry,
            &weather_table,
            &mut rng,
            &mut log,
        );
        committed.send(DayCommittedEvent { day: state.day });

        if outcome.game_over {
            next_phase.set(GamePhase::GameOver);
            sfx.send(PlaySfxEvent {
                sfx_id: "alert".to_string(),
            });
            continue;
        }

        if tutorial_day_two {
            next_phase.set(GamePhase::BuyerVisit);
            log.push("A buyer is visiting today.");
        } else {
            cohort.sellers = generate_sellers(state.level, &registry, &mut rng);
            next_phase.set(GamePhase::SellerVisit);
        }
    }
}

/// Safety net: whenever CO2 reaches the maximum, end the session on that
/// tick regardless of which handler moved it.
pub fn watch_co2_limit(
    state: Res<GameState>,
    balance: Res<Balance>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    if *phase.get() != GamePhase::GameOver && state.co2_level >= balance.max_co2 {
        next_phase.set(GamePhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{full_plant_registry, full_weather_table};

    fn planted(kind: PlantKind, stage: u32, watered: bool) -> Option<Plant> {
        Some(Plant {
            id: 0,
            kind,
            growth_stage: stage,
            is_grown: stage == 0,
            is_watered: watered,
        })
    }

    #[test]
    fn test_preview_credits_maturing_watered_plant_on_sunny_day() {
        let registry = full_plant_registry();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.weather = WeatherKind::Sunny;
        state.plots[0].plant = planted(PlantKind::Tulip, 1, true);
        let mut rng = GameRng::seeded(1);

        let summary = preview_day(&state, &balance, &registry, true, &mut rng);
        assert_eq!(summary.co2_decreased, 3);
        assert!((2..=5).contains(&summary.co2_increased));
        assert!(summary.event_message.is_none(), "tutorial suppresses events");
        assert!(summary.weather_event_message.is_none());
    }

    #[test]
    fn test_preview_ignores_unwatered_and_far_from_mature_plants() {
        let registry = full_plant_registry();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.plots[0].plant = planted(PlantKind::Tulip, 1, false);
        state.plots[1].plant = planted(PlantKind::Violet, 3, true);
        let mut rng = GameRng::seeded(2);

        let summary = preview_day(&state, &balance, &registry, true, &mut rng);
        assert_eq!(summary.co2_decreased, 0);
    }

    #[test]
    fn test_preview_never_mutates_state() {
        let registry = full_plant_registry();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.plots[0].plant = planted(PlantKind::MorningGlory, 1, true);
        let before = state.clone();
        let mut rng = GameRng::seeded(3);
        let _ = preview_day(&state, &balance, &registry, false, &mut rng);
        assert_eq!(state, before);
    }

    #[test]
    fn test_preview_surge_and_bonus_are_exclusive() {
        let registry = full_plant_registry();
        let balance = Balance::default();
        let state = GameState::default();
        let mut rng = GameRng::seeded(7);
        for _ in 0..500 {
            let summary = preview_day(&state, &balance, &registry, false, &mut rng);
            assert!(
                !(summary.co2_surge.is_some() && summary.co2_bonus_reduction.is_some()),
                "surge and bonus reduction fired together"
            );
            if let Some(bonus) = summary.co2_bonus_reduction {
                assert!((5..=10).contains(&bonus));
                assert!(summary.event_message.is_some());
            }
            if let Some(surge) = summary.co2_surge {
                assert_eq!(surge, 10);
                assert!(summary.event_message.is_some());
            }
        }
    }

    #[test]
    fn test_commit_advances_day_and_resets_daily_accumulators() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.money_spent_today = 700;
        state.money_earned_today = 300;
        let mut rng = GameRng::seeded(4);
        let mut log = MessageLog::default();

        let summary = DailySummary {
            co2_increased: 3,
            ..Default::default()
        };
        let outcome = commit_day(
            &mut state,
            &summary,
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        assert!(!outcome.game_over);
        assert_eq!(state.day, 2);
        assert_eq!(state.co2_level, 23);
        assert_eq!(state.money_spent_today, 0);
        assert_eq!(state.money_earned_today, 0);
        assert_eq!(state.weather, WeatherKind::Sunny);
    }

    #[test]
    fn test_commit_grows_watered_plant_to_maturity() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.weather = WeatherKind::Sunny;
        state.plots[0].plant = planted(PlantKind::Tulip, 1, true);
        let mut rng = GameRng::seeded(5);
        let mut log = MessageLog::default();

        commit_day(
            &mut state,
            &DailySummary::default(),
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        let plant = state.plots[0].plant.as_ref().unwrap();
        assert!(plant.is_grown);
        assert_eq!(plant.growth_stage, 0);
        assert!(!plant.is_watered, "sunny day leaves plants unwatered");
    }

    #[test]
    fn test_commit_storm_damage_resets_growth() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let mut balance = Balance::default();
        balance.storm_damage_chance = 1.0;
        let mut state = GameState::default();
        state.weather = WeatherKind::Stormy;
        state.plots[0].plant = planted(PlantKind::Violet, 1, true);
        let mut rng = GameRng::seeded(6);
        let mut log = MessageLog::default();

        commit_day(
            &mut state,
            &DailySummary::default(),
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        let plant = state.plots[0].plant.as_ref().unwrap();
        assert!(!plant.is_grown);
        assert_eq!(plant.growth_stage, 3, "setback to full duration");
    }

    #[test]
    fn test_commit_cloud_stall_skips_decrement_but_rewaters() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let mut balance = Balance::default();
        balance.cloud_stall_chance = 1.0;
        let mut state = GameState::default();
        state.weather = WeatherKind::Cloudy;
        state.plots[0].plant = planted(PlantKind::Violet, 2, true);
        let mut rng = GameRng::seeded(8);
        let mut log = MessageLog::default();

        commit_day(
            &mut state,
            &DailySummary::default(),
            WeatherKind::Rainy,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        let plant = state.plots[0].plant.as_ref().unwrap();
        assert_eq!(plant.growth_stage, 2, "stalled plants keep their stage");
        assert!(plant.is_watered, "rain re-waters every plant");
    }

    #[test]
    fn test_commit_sprinkler_shortfall_warns_and_charges_nothing() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.has_sprinkler = true;
        state.money = balance.sprinkler_maintenance - 1;
        state.plots[0].plant = planted(PlantKind::MorningGlory, 1, false);
        let mut rng = GameRng::seeded(9);
        let mut log = MessageLog::default();

        let before = state.money;
        commit_day(
            &mut state,
            &DailySummary::default(),
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        assert_eq!(state.money, before, "no partial charge");
        assert_eq!(state.money_spent_today, 0);
        assert!(log
            .entries
            .iter()
            .any(|m| m.contains("sprinkler's upkeep")));
        let plant = state.plots[0].plant.as_ref().unwrap();
        assert!(!plant.is_watered, "sprinkler did not fire");
    }

    #[test]
    fn test_commit_sprinkler_pays_and_waters() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.has_sprinkler = true;
        state.plots[0].plant = planted(PlantKind::MorningGlory, 1, false);
        let mut rng = GameRng::seeded(10);
        let mut log = MessageLog::default();

        let before = state.money;
        commit_day(
            &mut state,
            &DailySummary::default(),
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        assert_eq!(state.money, before - balance.sprinkler_maintenance);
        assert_eq!(state.money_spent_today, balance.sprinkler_maintenance);
        assert!(state.plots[0].plant.as_ref().unwrap().is_watered);
    }

    #[test]
    fn test_commit_clamps_co2_and_flags_game_over_on_the_tick() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.co2_level = 95;
        let mut rng = GameRng::seeded(11);
        let mut log = MessageLog::default();

        let summary = DailySummary {
            co2_increased: 4,
            co2_surge: Some(10),
            ..Default::default()
        };
        let outcome = commit_day(
            &mut state,
            &summary,
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        assert!(outcome.game_over);
        assert_eq!(state.co2_level, 100, "clamped at the maximum");
    }

    #[test]
    fn test_commit_co2_never_below_zero() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.co2_level = 3;
        let mut rng = GameRng::seeded(12);
        let mut log = MessageLog::default();

        let summary = DailySummary {
            co2_increased: 2,
            co2_decreased: 4,
            co2_bonus_reduction: Some(8),
            ..Default::default()
        };
        commit_day(
            &mut state,
            &summary,
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        assert_eq!(state.co2_level, 0);
    }

    #[test]
    fn test_threshold_messages_most_severe_first() {
        let registry = full_plant_registry();
        let table = full_weather_table();
        let balance = Balance::default();
        let mut state = GameState::default();
        state.co2_level = 35;
        let mut rng = GameRng::seeded(13);
        let mut log = MessageLog::default();

        // 35 → 65 crosses both 40 and 60.
        let summary = DailySummary {
            co2_increased: 30,
            ..Default::default()
        };
        commit_day(
            &mut state,
            &summary,
            WeatherKind::Sunny,
            &balance,
            &registry,
            &table,
            &mut rng,
            &mut log,
        );
        let sixty = log
            .entries
            .iter()
            .position(|m| m.contains("60%"))
            .expect("60% warning missing");
        let forty = log
            .entries
            .iter()
            .position(|m| m.contains("40%"))
            .expect("40% warning missing");
        assert!(sixty < forty, "most severe warning should be newest");
    }
}
