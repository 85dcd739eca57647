//! Welcome screen — title, continue/new-game choice.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct WelcomeRoot;

pub fn spawn_welcome(mut commands: Commands, save_exists: Res<SaveDataExists>) {
    let continue_line = if save_exists.0 {
        "\n[C] Continue"
    } else {
        ""
    };
    commands
        .spawn((
            WelcomeRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.08, 0.15, 1.0)),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("🌍 Green World"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 1.0, 0.7)),
            ));
            root.spawn((
                Text::new(format!(
                    "Grow plants, lower the planet's CO2, and keep the garden alive.\n\n[Enter] New Game{}",
                    continue_line
                )),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
        });
}

pub fn despawn_welcome(mut commands: Commands, query: Query<Entity, With<WelcomeRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn welcome_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    save_exists: Res<SaveDataExists>,
    mut new_game: EventWriter<NewGameEvent>,
    mut load_game: EventWriter<LoadGameEvent>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        new_game.send(NewGameEvent);
    }
    if keyboard.just_pressed(KeyCode::KeyC) && save_exists.0 {
        load_game.send(LoadGameEvent);
    }
}
