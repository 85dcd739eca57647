//! Plant sales — the one transaction that earns money.
//!
//! A sale folds its mission rewards and XP into the same commit: money,
//! level, stats, and mission records all change together or not at all.

use bevy::prelude::*;

use super::missions::evaluate_missions;
use crate::shared::*;

pub fn handle_sell_plants(
    mut events: EventReader<SellPlantsEvent>,
    mut state: ResMut<GameState>,
    registry: Res<PlantRegistry>,
    board: Res<MissionBoard>,
    balance: Res<Balance>,
    mut revisit: ResMut<Revisit>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut log: ResMut<MessageLog>,
    mut sold_writer: EventWriter<PlantsSoldEvent>,
    mut mission_writer: EventWriter<MissionCompletedEvent>,
    mut level_writer: EventWriter<LevelUpEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        let mut earnings = 0u32;
        let mut xp_gained = 0u32;
        let mut sold_kinds: Vec<PlantKind> = Vec::new();

        for plot in state.plots.iter_mut() {
            if !ev.plot_ids.contains(&plot.id) {
                continue;
            }
            let Some(plant) = plot.plant.as_ref().filter(|p| p.is_grown) else {
                continue;
            };
            let Some(def) = registry.get(plant.kind) else {
                continue;
            };
            earnings += def.sell_price;
            xp_gained += def.xp;
            sold_kinds.push(plant.kind);
            plot.plant = None;
        }

        if earnings > 0 {
            log.push(format!(
                "Sold plants for {}! Gained {} XP.",
                earnings, xp_gained
            ));

            for kind in &sold_kinds {
                *state.plant_stats.entry(*kind).or_insert(0) += 1;
            }

            let payout = evaluate_missions(&mut state, &board);
            for (mission_id, reward) in &payout.completed {
                let title = board
                    .missions
                    .iter()
                    .find(|m| m.id == mission_id.as_str())
                    .map(|m| m.title)
                    .unwrap_or_default();
                log.push(format!(
                    "Mission complete: \"{}\"! Reward {} earned!",
                    title, reward
                ));
                mission_writer.send(MissionCompletedEvent {
                    mission_id: mission_id.clone(),
                    reward: *reward,
                });
                sfx.send(PlaySfxEvent {
                    sfx_id: "celebrate".to_string(),
                });
            }

            let old_level = state.level;
            let total_xp = state.xp + xp_gained;
            state.level += total_xp / balance.xp_per_level;
            state.xp = total_xp % balance.xp_per_level;
            if state.level > old_level {
                log.push(format!("Level up! You reached level {}!", state.level));
                level_writer.send(LevelUpEvent { level: state.level });
                sfx.send(PlaySfxEvent {
                    sfx_id: "celebrate".to_string(),
                });
            }

            let gained = earnings + payout.total_reward;
            state.money += gained;
            state.money_earned_today += gained;

            sold_writer.send(PlantsSoldEvent {
                earnings,
                xp_gained,
            });
            info!(
                "[Economy] Sold {} plants for {} (+{} mission rewards). Money: {}",
                sold_kinds.len(),
                earnings,
                payout.total_reward,
                state.money
            );
        }

        // Closing the buyer view after selling, whether anything sold or not.
        if revisit.buyer {
            revisit.buyer = false;
        } else if *phase.get() == GamePhase::BuyerVisit {
            next_phase.set(GamePhase::Planting);
            log.push("Plant seeds and tend your garden.");
        }
    }
}

pub fn handle_close_buyer(
    mut events: EventReader<CloseBuyerEvent>,
    mut revisit: ResMut<Revisit>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut log: ResMut<MessageLog>,
) {
    for _ in events.read() {
        if revisit.buyer {
            revisit.buyer = false;
            continue;
        }
        if *phase.get() == GamePhase::BuyerVisit {
            next_phase.set(GamePhase::Planting);
            log.push("Plant seeds and tend your garden.");
        }
    }
}
