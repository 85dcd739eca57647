//! Persistence gateway.
//!
//! Saves the whole session bundle (game state, phase, seller cohort,
//! message log) as one JSON document next to the executable. Older bundles
//! are migrated on the raw JSON value before typed deserialization:
//! a renamed plant-kind key is merged into its new name, and a
//! gene inventory written under the old category-keyed schema is reset.
//! Malformed data falls back to a fresh game — the player never sees a
//! parse failure.
//!
//! The tutorial-completed flag is a separate marker file, independent of
//! the bundle, so wiping a save does not replay the tutorial.

use bevy::prelude::*;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::economy::sellers::{generate_sellers, tutorial_cohort};
use crate::rng::GameRng;
use crate::shared::*;

/// Serialized name the plant kind had before its rename. Historical data
/// under this key is merged into `PurpleTulip` on load.
pub const LEGACY_PURPLE_TULIP_KEY: &str = "VioletTulip";

const GENE_CATEGORY_NAMES: [&str; 5] = ["Red", "Blue", "Yellow", "Purple", "Green"];

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, scan_persisted_flags).add_systems(
            Update,
            (
                // New games start from the welcome screen or the game-over
                // retry prompt.
                handle_new_game.run_if(
                    in_state(GamePhase::Welcome).or(in_state(GamePhase::GameOver)),
                ),
                handle_load_game.run_if(in_state(GamePhase::Welcome)),
                handle_save_and_quit.run_if(in_session),
            ),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM HELPERS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn bundle_path() -> PathBuf {
    saves_directory().join("green_world.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn tutorial_marker_path() -> PathBuf {
    saves_directory().join("tutorial_completed")
}

// ═══════════════════════════════════════════════════════════════════════
// BUNDLE I/O
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
pub fn write_bundle(bundle: &SaveBundle) -> Result<(), String> {
    let dir = saves_directory();
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Could not create saves dir: {}", e))?;
    }
    let json = serde_json::to_string_pretty(bundle)
        .map_err(|e| format!("Serialization failed: {}", e))?;

    // Write to a temp file first, then rename for atomicity.
    let path = bundle_path();
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn write_bundle(_bundle: &SaveBundle) -> Result<(), String> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_bundle() -> Result<SaveBundle, String> {
    let path = bundle_path();
    if !path.exists() {
        return Err("No save bundle exists".to_string());
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    let mut value: Value =
        serde_json::from_str(&json).map_err(|e| format!("Parse failed: {}", e))?;

    migrate_bundle(&mut value);

    let mut bundle: SaveBundle = serde_json::from_value(value)
        .map_err(|e| format!("Deserialization failed: {}", e))?;
    if bundle.version != SAVE_VERSION {
        warn!(
            "Save bundle has version {} but current version is {}. Loading anyway.",
            bundle.version, SAVE_VERSION
        );
    }
    bundle.game_state.normalize();
    Ok(bundle)
}

#[cfg(target_arch = "wasm32")]
pub fn read_bundle() -> Result<SaveBundle, String> {
    Err("Saves not available in browser".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn bundle_exists() -> bool {
    bundle_path().exists()
}

#[cfg(target_arch = "wasm32")]
pub fn bundle_exists() -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_bundle() {
    let _ = fs::remove_file(bundle_path());
}

#[cfg(target_arch = "wasm32")]
pub fn clear_bundle() {}

// ═══════════════════════════════════════════════════════════════════════
// TUTORIAL MARKER
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
pub fn persist_tutorial_seen() {
    let dir = saves_directory();
    if !dir.exists() && fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Err(e) = fs::write(tutorial_marker_path(), b"1") {
        warn!("Could not persist tutorial flag: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn persist_tutorial_seen() {}

#[cfg(not(target_arch = "wasm32"))]
pub fn tutorial_was_seen() -> bool {
    tutorial_marker_path().exists()
}

#[cfg(target_arch = "wasm32")]
pub fn tutorial_was_seen() -> bool {
    false
}

// ═══════════════════════════════════════════════════════════════════════
// MIGRATIONS — applied to the raw JSON value before typed deserialization
// ═══════════════════════════════════════════════════════════════════════

/// Apply all one-time migrations in place.
pub fn migrate_bundle(value: &mut Value) {
    migrate_renamed_plant_kind(value);
    migrate_gene_schema(value);
}

/// Merge the legacy `VioletTulip` key into `PurpleTulip` across every
/// per-kind map, and rewrite plot contents and seller offers. Without this
/// an old bundle would fail enum deserialization outright.
fn migrate_renamed_plant_kind(value: &mut Value) {
    let new_key = "PurpleTulip";

    if let Some(state) = value.get_mut("game_state") {
        for map_name in ["seeds", "plant_stats", "genes"] {
            if let Some(map) = state.get_mut(map_name).and_then(Value::as_object_mut) {
                if let Some(old) = map.remove(LEGACY_PURPLE_TULIP_KEY) {
                    let old_count = old.as_u64().unwrap_or(0);
                    let merged =
                        map.get(new_key).and_then(Value::as_u64).unwrap_or(0) + old_count;
                    map.insert(new_key.to_string(), Value::from(merged));
                }
            }
        }
        if let Some(plots) = state.get_mut("plots").and_then(Value::as_array_mut) {
            for plot in plots {
                if let Some(kind) = plot.pointer_mut("/plant/kind") {
                    if kind.as_str() == Some(LEGACY_PURPLE_TULIP_KEY) {
                        *kind = Value::from(new_key);
                    }
                }
            }
        }
    }

    if let Some(sellers) = value.get_mut("sellers").and_then(Value::as_array_mut) {
        for seller in sellers {
            if let Some(kind) = seller.get_mut("kind") {
                if kind.as_str() == Some(LEGACY_PURPLE_TULIP_KEY) {
                    *kind = Value::from(new_key);
                }
            }
        }
    }
}

/// The gene inventory used to be keyed by gene category; the current
/// schema keys by plant kind. Old-format maps are discarded wholesale.
fn migrate_gene_schema(value: &mut Value) {
    let Some(genes) = value
        .pointer_mut("/game_state/genes")
        .and_then(|g| g.as_object_mut())
    else {
        return;
    };
    let old_format = genes
        .keys()
        .any(|key| GENE_CATEGORY_NAMES.contains(&key.as_str()));
    if old_format {
        genes.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn scan_persisted_flags(
    mut save_exists: ResMut<SaveDataExists>,
    mut seen: ResMut<TutorialSeen>,
) {
    save_exists.0 = bundle_exists();
    seen.0 = tutorial_was_seen();
    info!(
        "[Save] Bundle present: {}. Tutorial seen: {}.",
        save_exists.0, seen.0
    );
}

/// Start a fresh game. The tutorial auto-activates only when it has never
/// been completed, and a tutorial game begins with the fixed seller cohort.
#[allow(clippy::too_many_arguments)]
fn handle_new_game(
    mut events: EventReader<NewGameEvent>,
    balance: Res<Balance>,
    registry: Res<PlantRegistry>,
    seen: Res<TutorialSeen>,
    mut state: ResMut<GameState>,
    mut cohort: ResMut<SellerCohort>,
    mut log: ResMut<MessageLog>,
    mut pending: ResMut<PendingSummary>,
    mut revisit: ResMut<Revisit>,
    mut tutorial: ResMut<TutorialState>,
    mut save_exists: ResMut<SaveDataExists>,
    mut rng: ResMut<GameRng>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut music: EventWriter<PlayMusicEvent>,
) {
    for _ in events.read() {
        clear_bundle();
        save_exists.0 = false;

        *state = GameState::new(&balance);
        log.entries.clear();
        pending.summary = None;
        *revisit = Revisit::default();

        if seen.0 {
            *tutorial = TutorialState::default();
            cohort.sellers = generate_sellers(state.level, &registry, &mut rng);
        } else {
            *tutorial = TutorialState {
                active: true,
                step: 0,
            };
            cohort.sellers = tutorial_cohort();
        }

        next_phase.set(GamePhase::SellerVisit);
        music.send(PlayMusicEvent {
            track_id: "garden".to_string(),
        });
        info!("[Save] New game started (tutorial: {}).", tutorial.active);
    }
}

/// Load the persisted bundle. Malformed data starts a fresh,
/// tutorial-free game instead of surfacing the failure.
#[allow(clippy::too_many_arguments)]
fn handle_load_game(
    mut events: EventReader<LoadGameEvent>,
    balance: Res<Balance>,
    registry: Res<PlantRegistry>,
    mut state: ResMut<GameState>,
    mut cohort: ResMut<SellerCohort>,
    mut log: ResMut<MessageLog>,
    mut pending: ResMut<PendingSummary>,
    mut revisit: ResMut<Revisit>,
    mut tutorial: ResMut<TutorialState>,
    mut rng: ResMut<GameRng>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut music: EventWriter<PlayMusicEvent>,
) {
    for _ in events.read() {
        pending.summary = None;
        *revisit = Revisit::default();
        *tutorial = TutorialState::default();

        match read_bundle() {
            Ok(bundle) => {
                *state = bundle.game_state;
                log.entries = bundle.messages;
                cohort.sellers = bundle.sellers;
                // A bundle saved mid-summary or in a boot phase re-enters
                // at the planting phase rather than a dead end.
                let phase = match bundle.phase {
                    GamePhase::Loading | GamePhase::Welcome | GamePhase::DailySummary => {
                        GamePhase::Planting
                    }
                    other => other,
                };
                next_phase.set(phase);
                info!("[Save] Loaded bundle at day {}.", state.day);
            }
            Err(e) => {
                warn!("[Save] Load failed ({}). Starting a fresh game.", e);
                *state = GameState::new(&balance);
                log.entries.clear();
                cohort.sellers = generate_sellers(state.level, &registry, &mut rng);
                next_phase.set(GamePhase::SellerVisit);
            }
        }
        music.send(PlayMusicEvent {
            track_id: "garden".to_string(),
        });
    }
}

fn handle_save_and_quit(
    mut events: EventReader<SaveAndQuitEvent>,
    state: Res<GameState>,
    phase: Res<State<GamePhase>>,
    cohort: Res<SellerCohort>,
    log: Res<MessageLog>,
    tutorial: Res<TutorialState>,
    mut save_exists: ResMut<SaveDataExists>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut music: EventWriter<PlayMusicEvent>,
) {
    for _ in events.read() {
        // Saving mid-tutorial would persist a half-scripted session.
        if tutorial.active {
            continue;
        }
        let bundle = SaveBundle {
            version: SAVE_VERSION,
            game_state: state.clone(),
            phase: *phase.get(),
            sellers: cohort.sellers.clone(),
            messages: log.entries.clone(),
        };
        match write_bundle(&bundle) {
            Ok(()) => {
                save_exists.0 = true;
                info!("[Save] Bundle written at day {}.", state.day);
            }
            Err(e) => warn!("[Save] Write FAILED: {}", e),
        }
        next_phase.set(GamePhase::Welcome);
        music.send(PlayMusicEvent {
            track_id: "silence".to_string(),
        });
    }
}
