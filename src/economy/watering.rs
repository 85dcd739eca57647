//! Watering — single-plot watering with a duplicate-submit guard, and the
//! all-or-nothing bulk action.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

/// Per-plot cooldown that coalesces rapid repeated watering requests for
/// the same plot. This is a reentrancy guard, not a game rule: a plot can
/// only be charged once per window.
#[derive(Resource, Debug, Default)]
pub struct WateringGuard {
    cooldowns: HashMap<u32, Timer>,
}

pub const WATERING_GUARD_SECS: f32 = 0.2;

impl WateringGuard {
    pub fn is_blocked(&self, plot_id: u32) -> bool {
        self.cooldowns.contains_key(&plot_id)
    }

    pub fn arm(&mut self, plot_id: u32) {
        self.cooldowns
            .insert(plot_id, Timer::from_seconds(WATERING_GUARD_SECS, TimerMode::Once));
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.cooldowns.retain(|_, timer| {
            timer.tick(delta);
            !timer.finished()
        });
    }
}

pub fn tick_watering_guard(time: Res<Time>, mut guard: ResMut<WateringGuard>) {
    guard.tick(time.delta());
}

pub fn handle_water_plot(
    mut events: EventReader<WaterPlotEvent>,
    mut state: ResMut<GameState>,
    mut guard: ResMut<WateringGuard>,
    registry: Res<PlantRegistry>,
    mut log: ResMut<MessageLog>,
    mut watered: EventWriter<PlotWateredEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        if guard.is_blocked(ev.plot_id) {
            continue;
        }

        // Empty, grown, or already-watered plots are silent no-ops.
        let Some(plant) = state
            .plot(ev.plot_id)
            .and_then(|p| p.plant.as_ref())
            .filter(|plant| !plant.is_grown && !plant.is_watered)
        else {
            continue;
        };
        let Some(def) = registry.get(plant.kind) else {
            continue;
        };
        let cost = def.water_cost;
        let glyph = def.glyph;
        let name = def.name;

        if state.money < cost {
            log.push(format!("Not enough money to water! ({} needed)", cost));
            continue;
        }

        state.money -= cost;
        state.money_spent_today += cost;
        if let Some(plant) = state.plot_mut(ev.plot_id).and_then(|p| p.plant.as_mut()) {
            plant.is_watered = true;
        }
        guard.arm(ev.plot_id);

        log.push(format!("Watered {}{} for {}.", glyph, name, cost));
        watered.send(PlotWateredEvent { plot_id: ev.plot_id });
        sfx.send(PlaySfxEvent {
            sfx_id: "water".to_string(),
        });
    }
}

/// Water every unwatered, ungrown plant, paying the summed cost once.
/// All-or-nothing: if the total is unaffordable, nothing is watered.
pub fn handle_water_all(
    mut events: EventReader<WaterAllEvent>,
    mut state: ResMut<GameState>,
    registry: Res<PlantRegistry>,
    mut log: ResMut<MessageLog>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _ in events.read() {
        let eligible: Vec<u32> = state
            .plots
            .iter()
            .filter(|p| {
                p.plant
                    .as_ref()
                    .is_some_and(|plant| !plant.is_grown && !plant.is_watered)
            })
            .map(|p| p.id)
            .collect();

        if eligible.is_empty() {
            log.push("No plants need watering.");
            continue;
        }

        let total: u32 = eligible
            .iter()
            .filter_map(|&id| state.plot(id).and_then(|p| p.plant.as_ref()))
            .filter_map(|plant| registry.get(plant.kind))
            .map(|def| def.water_cost)
            .sum();

        if state.money < total {
            log.push(format!("Not enough money! ({} needed in total)", total));
            continue;
        }

        state.money -= total;
        state.money_spent_today += total;
        let count = eligible.len();
        for id in eligible {
            if let Some(plant) = state.plot_mut(id).and_then(|p| p.plant.as_mut()) {
                plant.is_watered = true;
            }
        }

        log.push(format!("Watered {} plants at once. ({})", count, total));
        sfx.send(PlaySfxEvent {
            sfx_id: "water".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_guard_blocks_until_window_elapses() {
        let mut guard = WateringGuard::default();
        assert!(!guard.is_blocked(0));
        guard.arm(0);
        assert!(guard.is_blocked(0));
        assert!(!guard.is_blocked(1));

        guard.tick(Duration::from_millis(100));
        assert!(guard.is_blocked(0));

        guard.tick(Duration::from_millis(150));
        assert!(!guard.is_blocked(0));
    }

    #[test]
    fn test_guard_tracks_plots_independently() {
        let mut guard = WateringGuard::default();
        guard.arm(3);
        guard.tick(Duration::from_millis(150));
        guard.arm(7);
        assert!(guard.is_blocked(3));
        assert!(guard.is_blocked(7));
        guard.tick(Duration::from_millis(100));
        assert!(!guard.is_blocked(3));
        assert!(guard.is_blocked(7));
    }
}
