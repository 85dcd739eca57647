//! Catalog layer — populates all registries at game startup.
//!
//! This plugin runs in OnEnter(GamePhase::Loading), fills every registry
//! (PlantRegistry, WeatherTable, RecipeBook, MissionBoard) from the
//! game-design data defined in submodules, then transitions into
//! GamePhase::Welcome.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GamePhase has advanced past Loading. Balancing
//! lives entirely here and in `Balance` — engine systems treat all of it
//! as data.

mod missions;
mod plants;
mod recipes;
mod weather;


use bevy::prelude::*;

use crate::shared::*;

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GamePhase::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to Welcome.
fn load_all_data(
    mut plant_registry: ResMut<PlantRegistry>,
    mut weather_table: ResMut<WeatherTable>,
    mut recipe_book: ResMut<RecipeBook>,
    mut mission_board: ResMut<MissionBoard>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    info!("CatalogPlugin: populating registries…");

    plants::populate_plants(&mut plant_registry);
    info!("  Plants loaded: {}", plant_registry.plants.len());

    weather::populate_weather(&mut weather_table);
    info!("  Weather kinds loaded: {}", weather_table.entries.len());

    recipes::populate_recipes(&mut recipe_book);
    info!("  Gene recipes loaded: {}", recipe_book.recipes.len());

    missions::populate_missions(&mut mission_board);
    info!("  Missions loaded: {}", mission_board.missions.len());

    info!("CatalogPlugin: all registries populated. Transitioning to Welcome.");
    next_phase.set(GamePhase::Welcome);
}
