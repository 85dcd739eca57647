//! Planting, plot expansion, and the sprinkler upgrade.

use bevy::prelude::*;

use crate::shared::*;

pub fn handle_plant_seed(
    mut events: EventReader<PlantSeedEvent>,
    mut state: ResMut<GameState>,
    registry: Res<PlantRegistry>,
    mut log: ResMut<MessageLog>,
    mut planted: EventWriter<SeedPlantedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        // Occupied plots and empty seed stock are silent no-ops.
        if state
            .plot(ev.plot_id)
            .map_or(true, |p| p.plant.is_some())
        {
            continue;
        }
        if state.seed_count(ev.kind) == 0 {
            continue;
        }
        let Some(def) = registry.get(ev.kind) else {
            continue;
        };
        let growth_days = def.growth_days;
        let glyph = def.glyph;
        let name = def.name;

        // Rain, storms, and a working sprinkler water a fresh planting.
        let starts_watered = state.weather.waters_plants() || state.has_sprinkler;

        *state.seeds.entry(ev.kind).or_insert(0) -= 1;
        let id = state.take_plant_id();
        if let Some(plot) = state.plot_mut(ev.plot_id) {
            plot.plant = Some(Plant {
                id,
                kind: ev.kind,
                growth_stage: growth_days,
                is_grown: false,
                is_watered: starts_watered,
            });
        }

        log.push(format!("Planted {}{} seeds.", glyph, name));
        planted.send(SeedPlantedEvent {
            plot_id: ev.plot_id,
            kind: ev.kind,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "plant".to_string(),
        });
    }
}

pub fn handle_buy_plot(
    mut events: EventReader<BuyPlotEvent>,
    mut state: ResMut<GameState>,
    balance: Res<Balance>,
    mut log: ResMut<MessageLog>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _ in events.read() {
        if state.level < balance.plot_unlock_level {
            log.push(format!(
                "Plots unlock at level {}.",
                balance.plot_unlock_level
            ));
            continue;
        }
        let cost = state.next_plot_cost(&balance);
        if state.money < cost {
            log.push(ActionError::InsufficientFunds.to_string());
            sfx.send(PlaySfxEvent {
                sfx_id: "deny".to_string(),
            });
            continue;
        }

        state.money -= cost;
        state.money_spent_today += cost;
        let id = state.plots.len() as u32;
        state.plots.push(Plot { id, plant: None });

        log.push(format!("Bought a new plot for {}!", cost));
        sfx.send(PlaySfxEvent {
            sfx_id: "purchase".to_string(),
        });
        info!("[Economy] Plot {} purchased for {}.", id, cost);
    }
}

pub fn handle_buy_sprinkler(
    mut events: EventReader<BuySprinklerEvent>,
    mut state: ResMut<GameState>,
    balance: Res<Balance>,
    mut log: ResMut<MessageLog>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _ in events.read() {
        if state.has_sprinkler {
            // Idempotent: buying again is a no-op with feedback.
            log.push("The sprinkler is already running.");
            continue;
        }
        if state.level < balance.sprinkler_unlock_level {
            log.push(format!(
                "The sprinkler unlocks at level {}.",
                balance.sprinkler_unlock_level
            ));
            continue;
        }
        if state.money < balance.sprinkler_cost {
            log.push(ActionError::InsufficientFunds.to_string());
            sfx.send(PlaySfxEvent {
                sfx_id: "deny".to_string(),
            });
            continue;
        }

        state.money -= balance.sprinkler_cost;
        state.money_spent_today += balance.sprinkler_cost;
        state.has_sprinkler = true;

        log.push(format!(
            "Installed the sprinkler for {}!",
            balance.sprinkler_cost
        ));
        sfx.send(PlaySfxEvent {
            sfx_id: "celebrate".to_string(),
        });
    }
}
