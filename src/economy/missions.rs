//! Mission evaluation.
//!
//! Runs inside the sale transaction: every mission not yet completed whose
//! target count is now met completes (monotonic, never un-completes) and
//! its reward joins the same transaction. Missions are independent, so
//! evaluation order cannot change the outcome.

use crate::shared::*;

/// Outcome of one evaluation pass.
pub struct MissionPayout {
    pub completed: Vec<(String, u32)>,
    pub total_reward: u32,
}

pub fn evaluate_missions(state: &mut GameState, board: &MissionBoard) -> MissionPayout {
    let mut completed = Vec::new();
    let mut total_reward = 0;

    for mission in &board.missions {
        let already_done = state
            .mission_progress
            .get(mission.id)
            .is_some_and(|p| p.completed);
        if already_done {
            continue;
        }
        let sold = state
            .plant_stats
            .get(&mission.plant)
            .copied()
            .unwrap_or(0);
        if sold >= mission.target_count {
            state
                .mission_progress
                .insert(mission.id.to_string(), MissionProgress { completed: true });
            completed.push((mission.id.to_string(), mission.reward));
            total_reward += mission.reward;
        }
    }

    MissionPayout {
        completed,
        total_reward,
    }
}
