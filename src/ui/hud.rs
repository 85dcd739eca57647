//! Text HUD — stats bar, garden view, contextual panel, message log.
//!
//! Rendered with plain UI text nodes and the engine's default font; each
//! update system rewrites one marker-tagged text node from shared state.

use bevy::prelude::*;

use super::{SaleSelection, SelectedSeed};
use crate::shared::*;
use crate::tutorial::script::TUTORIAL_STEPS;

#[derive(Component)]
pub struct HudStats;

#[derive(Component)]
pub struct HudGarden;

#[derive(Component)]
pub struct HudPanel;

#[derive(Component)]
pub struct HudMessages;

#[derive(Component)]
pub struct HudTutorial;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(8.0),
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            root.spawn((
                HudStats,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.95, 1.0)),
            ));
            root.spawn((
                HudGarden,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 1.0, 0.8)),
            ));
            root.spawn((
                HudPanel,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.95, 0.7)),
            ));
            root.spawn((
                HudMessages,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
            root.spawn((
                HudTutorial,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.8, 1.0)),
            ));
        });
}

pub fn update_stats_line(
    state: Res<GameState>,
    weather_table: Res<WeatherTable>,
    balance: Res<Balance>,
    mut query: Query<&mut Text, With<HudStats>>,
) {
    let weather = weather_table
        .get(state.weather)
        .map(|w| format!("{} {}", w.glyph, w.name))
        .unwrap_or_default();
    for mut text in &mut query {
        text.0 = format!(
            "Day {}  |  {}  |  💰 {}  |  CO2 {}% / {}%  |  Lv {} ({} XP)",
            state.day, weather, state.money, state.co2_level, balance.max_co2, state.level, state.xp
        );
    }
}

pub fn update_garden_view(
    state: Res<GameState>,
    registry: Res<PlantRegistry>,
    mut query: Query<&mut Text, With<HudGarden>>,
) {
    let mut lines = vec!["My Garden:".to_string()];
    for plot in &state.plots {
        let cell = match &plot.plant {
            None => "[ empty ]".to_string(),
            Some(plant) => {
                let glyph = registry.get(plant.kind).map(|d| d.glyph).unwrap_or("?");
                if plant.is_grown {
                    format!("[{} ready]", glyph)
                } else {
                    format!(
                        "[{} {}d{}]",
                        glyph,
                        plant.growth_stage,
                        if plant.is_watered { " ~" } else { "" }
                    )
                }
            }
        };
        lines.push(format!("  {}: {}", plot.id, cell));
    }
    for mut text in &mut query {
        text.0 = lines.join("\n");
    }
}

pub fn update_panel_view(
    state: Res<GameState>,
    cohort: Res<SellerCohort>,
    registry: Res<PlantRegistry>,
    pending: Res<PendingSummary>,
    selected: Res<SelectedSeed>,
    sale: Res<SaleSelection>,
    revisit: Res<Revisit>,
    phase: Res<State<GamePhase>>,
    mut query: Query<&mut Text, With<HudPanel>>,
) {
    let phase = *phase.get();
    let seller_view = phase == GamePhase::SellerVisit || revisit.sellers;
    let buyer_view = phase == GamePhase::BuyerVisit || revisit.buyer;

    let content = if seller_view {
        let mut lines = vec!["Seed sellers (1-3 buy, A buy all, Enter close):".to_string()];
        for seller in &cohort.sellers {
            let name = registry.get(seller.kind).map(|d| d.name).unwrap_or("?");
            lines.push(format!(
                "  [{}] {} — {}{}",
                seller.id + 1,
                name,
                seller.price,
                if seller.sold { " (sold)" } else { "" }
            ));
        }
        lines.join("\n")
    } else if buyer_view {
        let mut lines =
            vec!["Plant buyer (1-9 pick plot, S sell picked, Enter close):".to_string()];
        for plot in state
            .plots
            .iter()
            .filter(|p| p.plant.as_ref().is_some_and(|plant| plant.is_grown))
        {
            let name = plot
                .plant
                .as_ref()
                .and_then(|p| registry.get(p.kind))
                .map(|d| d.name)
                .unwrap_or("?");
            let picked = sale.plot_ids.contains(&plot.id);
            lines.push(format!(
                "  plot {}: {}{}",
                plot.id,
                name,
                if picked { " ✓" } else { "" }
            ));
        }
        lines.join("\n")
    } else {
        match phase {
            GamePhase::DailySummary => match &pending.summary {
                Some(summary) => {
                    let mut lines = vec![
                        "Daily summary (Enter to continue):".to_string(),
                        format!(
                            "  CO2 +{}%  -{}%",
                            summary.co2_increased, summary.co2_decreased
                        ),
                        format!(
                            "  Spent {}  Earned {}",
                            summary.money_spent, summary.money_earned
                        ),
                    ];
                    if let Some(msg) = &summary.event_message {
                        lines.push(format!("  {}", msg));
                    }
                    if let Some(msg) = &summary.weather_event_message {
                        lines.push(format!("  {}", msg));
                    }
                    lines.join("\n")
                }
                None => String::new(),
            },
            GamePhase::GameOver => format!(
                "GAME OVER — CO2 hit the limit. You protected the planet for {} days.\n(Enter: try again)",
                state.day.saturating_sub(1)
            ),
            GamePhase::Planting => {
                let seed = selected
                    .kind
                    .and_then(|k| registry.get(k))
                    .map(|d| format!("{} {}", d.glyph, d.name))
                    .unwrap_or_else(|| "none".to_string());
                format!(
                    "Planting (digits select seed, P plant, W water, A water all,\n N next day, B buy plot, K sprinkler, V sell, R reopen stall, M missions)\n  Selected seed: {}",
                    seed
                )
            }
            _ => String::new(),
        }
    };

    for mut text in &mut query {
        text.0 = content.clone();
    }
}

pub fn update_message_view(log: Res<MessageLog>, mut query: Query<&mut Text, With<HudMessages>>) {
    if !log.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = log.entries.join("\n");
    }
}

pub fn update_tutorial_view(
    tutorial: Res<TutorialState>,
    mut query: Query<&mut Text, With<HudTutorial>>,
) {
    for mut text in &mut query {
        text.0 = if tutorial.active {
            TUTORIAL_STEPS
                .get(tutorial.step)
                .map(|step| format!("📖 {} — {} (Esc skips)", step.title, step.text))
                .unwrap_or_default()
        } else {
            String::new()
        };
    }
}
