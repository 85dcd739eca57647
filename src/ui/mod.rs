//! Presentation layer — HUD, keyboard input, welcome screen, audio sink.
//!
//! Everything here is replaceable chrome: it reads shared state and turns
//! key presses into the action events the engine consumes. No game rules
//! live in this module.

mod audio;
mod hud;
mod input;
mod welcome;

use bevy::prelude::*;

use crate::shared::*;

/// The seed kind currently highlighted for planting. Purely a view
/// concern; the engine receives the kind explicitly with every plant
/// request.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SelectedSeed {
    pub kind: Option<PlantKind>,
}

/// Plots marked for sale in the buyer view.
#[derive(Resource, Debug, Clone, Default)]
pub struct SaleSelection {
    pub plot_ids: Vec<u32>,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedSeed>()
            .init_resource::<SaleSelection>()
            .init_resource::<audio::MuteState>()
            .init_resource::<audio::MusicState>()
            // ─── WELCOME SCREEN ───
            .add_systems(OnEnter(GamePhase::Welcome), welcome::spawn_welcome)
            .add_systems(OnExit(GamePhase::Welcome), welcome::despawn_welcome)
            .add_systems(
                Update,
                welcome::welcome_input.run_if(in_state(GamePhase::Welcome)),
            )
            // ─── HUD ───
            .add_systems(Startup, hud::spawn_hud)
            .add_systems(
                Update,
                (
                    hud::update_stats_line,
                    hud::update_garden_view,
                    hud::update_panel_view,
                    hud::update_message_view,
                    hud::update_tutorial_view,
                )
                    .run_if(in_session.or(in_state(GamePhase::GameOver))),
            )
            // ─── INPUT ───
            .add_systems(
                Update,
                (
                    input::session_input,
                    input::breeding_input.run_if(in_state(GamePhase::Planting)),
                    input::seller_input.run_if(input::seller_view_open),
                    input::buyer_input.run_if(input::buyer_view_open),
                )
                    .run_if(in_session),
            )
            .add_systems(
                Update,
                input::game_over_input.run_if(in_state(GamePhase::GameOver)),
            )
            // ─── AUDIO SINK ───
            .add_systems(
                Update,
                (
                    audio::handle_play_sfx,
                    audio::handle_play_music,
                    audio::handle_toggle_mute,
                ),
            );
    }
}
