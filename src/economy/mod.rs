//! Economy domain — every money-affecting action.
//!
//! All handlers validate first and apply only on success; a rejected action
//! leaves the game state untouched and surfaces a short message instead.

pub mod missions;
pub mod plots;
pub mod sales;
pub mod sellers;
pub mod watering;

use bevy::prelude::*;

use crate::shared::*;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<watering::WateringGuard>()
            .add_systems(
                Update,
                (
                    sellers::handle_buy_seed,
                    sellers::handle_buy_all_seeds,
                    sellers::handle_close_seller,
                    watering::tick_watering_guard,
                    watering::handle_water_plot,
                    watering::handle_water_all,
                    plots::handle_plant_seed,
                    plots::handle_buy_plot,
                    plots::handle_buy_sprinkler,
                    sales::handle_sell_plants,
                    sales::handle_close_buyer,
                )
                    .run_if(in_session),
            );
    }
}
