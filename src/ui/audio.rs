//! Audio sink — fire-and-forget playback of engine notification events.
//!
//! The engine never waits on anything here; unknown ids and missing files
//! simply play nothing.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

#[derive(Resource, Default)]
pub struct MuteState {
    pub muted: bool,
}

/// Maps SFX ids (sent by other domains) to audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "click" => Some("audio/sfx/click.ogg"),
        "purchase" => Some("audio/sfx/coin.ogg"),
        "water" => Some("audio/sfx/water.ogg"),
        "plant" => Some("audio/sfx/plant.ogg"),
        "extract" => Some("audio/sfx/extract.ogg"),
        "celebrate" => Some("audio/sfx/fanfare.ogg"),
        "alert" => Some("audio/sfx/alert.ogg"),
        "deny" => Some("audio/sfx/error.ogg"),
        _ => None,
    }
}

fn music_path(track_id: &str) -> Option<&'static str> {
    match track_id {
        "garden" => Some("audio/music/garden_loop.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mute: Res<MuteState>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        if mute.muted {
            continue;
        }
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}

/// Listen for PlayMusicEvent, stop the current track, and start a new one.
/// An unknown track id (e.g. "silence") just stops the music.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if let Some(entity) = music_state.current_track {
            commands.entity(entity).despawn_recursive();
        }

        if let Some(path) = music_path(&event.track_id) {
            let entity = commands
                .spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::LOOP,
                ))
                .id();
            music_state.current_track = Some(entity);
            music_state.current_track_id = event.track_id.clone();
        } else {
            music_state.current_track = None;
            music_state.current_track_id.clear();
        }
    }
}

pub fn handle_toggle_mute(
    mut events: EventReader<ToggleMuteEvent>,
    mut mute: ResMut<MuteState>,
    mut commands: Commands,
    mut music_state: ResMut<MusicState>,
) {
    for _ in events.read() {
        mute.muted = !mute.muted;
        // Muting stops the background loop outright; unmuting waits for
        // the next PlayMusicEvent rather than guessing the track.
        if mute.muted {
            if let Some(entity) = music_state.current_track.take() {
                commands.entity(entity).despawn_recursive();
            }
            music_state.current_track_id.clear();
        }
    }
}
