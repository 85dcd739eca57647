//! Shared resources, events, and states for Green World.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// GAME PHASE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Session phase. `Loading` is a boot-only state (catalogs populate there)
/// and is never saved; everything else round-trips through the save bundle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default, Serialize, Deserialize,
)]
pub enum GamePhase {
    #[default]
    Loading,
    Welcome,
    SellerVisit,
    BuyerVisit,
    Planting,
    DailySummary,
    GameOver,
}

impl GamePhase {
    /// True for the phases that make up an active play session.
    pub fn in_session(self) -> bool {
        matches!(
            self,
            GamePhase::SellerVisit
                | GamePhase::BuyerVisit
                | GamePhase::Planting
                | GamePhase::DailySummary
        )
    }
}

/// Run condition: any in-session phase.
pub fn in_session(phase: Res<State<GamePhase>>) -> bool {
    phase.get().in_session()
}

// ═══════════════════════════════════════════════════════════════════════
// CATALOG — plants, weather, recipes, missions
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    MorningGlory,
    Tulip,
    Violet,
    Sunflower,
    Rose,
    Cactus,
    PurpleMorningGlory,
    PurpleTulip,
}

impl PlantKind {
    pub const ALL: [PlantKind; 8] = [
        PlantKind::MorningGlory,
        PlantKind::Tulip,
        PlantKind::Violet,
        PlantKind::Sunflower,
        PlantKind::Rose,
        PlantKind::Cactus,
        PlantKind::PurpleMorningGlory,
        PlantKind::PurpleTulip,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneKind {
    Red,
    Blue,
    Yellow,
    Purple,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherKind {
    /// Rain and storms water every plot for free.
    pub fn waters_plants(self) -> bool {
        matches!(self, WeatherKind::Rainy | WeatherKind::Stormy)
    }
}

/// How seeds of a kind can be obtained. Kinds without a market listing
/// exist only through gene combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Market { min_price: u32, max_price: u32 },
    BreedOnly,
}

#[derive(Debug, Clone)]
pub struct PlantDef {
    pub kind: PlantKind,
    pub name: &'static str,
    pub glyph: &'static str,
    pub seed_source: SeedSource,
    pub sell_price: u32,
    /// Days from planting to harvestable.
    pub growth_days: u32,
    /// CO2 percentage points credited when the plant matures.
    pub co2_reduction: i32,
    pub xp: u32,
    /// Weight used when generating the seller cohort. Zero for breed-only kinds.
    pub seller_weight: f32,
    pub unlock_level: Option<u32>,
    pub gene: Option<GeneKind>,
    pub water_cost: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlantRegistry {
    pub plants: HashMap<PlantKind, PlantDef>,
}

impl PlantRegistry {
    pub fn get(&self, kind: PlantKind) -> Option<&PlantDef> {
        self.plants.get(&kind)
    }
}

#[derive(Debug, Clone)]
pub struct WeatherDef {
    pub kind: WeatherKind,
    pub glyph: &'static str,
    pub name: &'static str,
    /// Selection weight. Weights need not sum to 1; draws normalize.
    pub weight: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct WeatherTable {
    pub entries: Vec<WeatherDef>,
}

impl WeatherTable {
    pub fn get(&self, kind: WeatherKind) -> Option<&WeatherDef> {
        self.entries.iter().find(|w| w.kind == kind)
    }
}

/// Gene combinations, keyed by the ORDERED donor pair. (a, b) and (b, a)
/// may produce different hybrids.
#[derive(Resource, Debug, Clone, Default)]
pub struct RecipeBook {
    pub recipes: HashMap<(PlantKind, PlantKind), PlantKind>,
}

impl RecipeBook {
    pub fn lookup(&self, first: PlantKind, second: PlantKind) -> Option<PlantKind> {
        self.recipes.get(&(first, second)).copied()
    }
}

#[derive(Debug, Clone)]
pub struct MissionDef {
    pub id: &'static str,
    pub title: &'static str,
    pub plant: PlantKind,
    pub target_count: u32,
    pub reward: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MissionBoard {
    pub missions: Vec<MissionDef>,
}

// ═══════════════════════════════════════════════════════════════════════
// BALANCE — every numeric tunable in one place, read as data
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct Balance {
    pub initial_money: u32,
    pub initial_co2: i32,
    pub max_co2: i32,
    pub daily_co2_increase: (u32, u32),
    pub initial_plot_count: u32,
    /// A buyer visits when `day % buyer_visit_frequency == 0`.
    pub buyer_visit_frequency: u32,
    pub plot_unlock_level: u32,
    pub plot_base_cost: u32,
    pub plot_cost_increment: u32,
    pub breeding_unlock_level: u32,
    pub sprinkler_unlock_level: u32,
    pub sprinkler_cost: u32,
    pub sprinkler_maintenance: u32,
    pub xp_per_level: u32,
    pub surge_chance: f32,
    pub surge_amount: i32,
    pub bonus_reduction_chance: f32,
    pub bonus_reduction_range: (u32, u32),
    pub cloud_stall_chance: f32,
    pub storm_damage_chance: f32,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            initial_money: 5_000,
            initial_co2: 20,
            max_co2: 100,
            daily_co2_increase: (2, 5),
            initial_plot_count: 9,
            buyer_visit_frequency: 3,
            plot_unlock_level: 3,
            plot_base_cost: 1_000,
            plot_cost_increment: 500,
            breeding_unlock_level: 5,
            sprinkler_unlock_level: 3,
            sprinkler_cost: 5_000,
            sprinkler_maintenance: 100,
            xp_per_level: 100,
            surge_chance: 0.20,
            surge_amount: 10,
            bonus_reduction_chance: 0.10,
            bonus_reduction_range: (5, 10),
            cloud_stall_chance: 0.5,
            storm_damage_chance: 0.3,
        }
    }
}

/// CO2 warning thresholds, checked ascending so the most severe message
/// lands newest (first) in the log.
pub const CO2_THRESHOLDS: [i32; 5] = [20, 40, 60, 80, 90];

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — the single mutable aggregate
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Uniqueness only; drawn from `GameState::next_plant_id`.
    pub id: u64,
    pub kind: PlantKind,
    /// Days remaining until harvestable. Zero iff `is_grown`.
    pub growth_stage: u32,
    pub is_grown: bool,
    #[serde(default)]
    pub is_watered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: u32,
    pub plant: Option<Plant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: u32,
    pub kind: PlantKind,
    pub price: u32,
    pub sold: bool,
}

/// The 3 seed offers of the current seller visit. Regenerated each visit;
/// revisit overlays reuse the cohort as-is.
#[derive(Resource, Debug, Clone, Default)]
pub struct SellerCohort {
    pub sellers: Vec<Seller>,
}

pub const SELLER_COHORT_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissionProgress {
    pub completed: bool,
}

fn default_weather() -> WeatherKind {
    WeatherKind::Sunny
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub day: u32,
    pub money: u32,
    pub co2_level: i32,
    pub level: u32,
    pub xp: u32,
    #[serde(default)]
    pub seeds: HashMap<PlantKind, u32>,
    pub plots: Vec<Plot>,
    pub money_spent_today: u32,
    pub money_earned_today: u32,
    /// Cumulative sale counts per kind. Never reset; drives missions.
    #[serde(default)]
    pub plant_stats: HashMap<PlantKind, u32>,
    #[serde(default)]
    pub mission_progress: HashMap<String, MissionProgress>,
    #[serde(default)]
    pub genes: HashMap<PlantKind, u32>,
    #[serde(default = "default_weather")]
    pub weather: WeatherKind,
    #[serde(default)]
    pub has_sprinkler: bool,
    #[serde(default)]
    pub next_plant_id: u64,
}

impl GameState {
    pub fn new(balance: &Balance) -> Self {
        let zeroed = || PlantKind::ALL.iter().map(|&k| (k, 0)).collect();
        Self {
            day: 1,
            money: balance.initial_money,
            co2_level: balance.initial_co2,
            level: 1,
            xp: 0,
            seeds: zeroed(),
            plots: (0..balance.initial_plot_count)
                .map(|id| Plot { id, plant: None })
                .collect(),
            money_spent_today: 0,
            money_earned_today: 0,
            plant_stats: zeroed(),
            mission_progress: HashMap::new(),
            genes: zeroed(),
            weather: WeatherKind::Sunny,
            has_sprinkler: false,
            next_plant_id: 0,
        }
    }

    /// Fill in per-kind map entries an older save may be missing.
    pub fn normalize(&mut self) {
        for &kind in PlantKind::ALL.iter() {
            self.seeds.entry(kind).or_insert(0);
            self.plant_stats.entry(kind).or_insert(0);
            self.genes.entry(kind).or_insert(0);
        }
    }

    pub fn seed_count(&self, kind: PlantKind) -> u32 {
        self.seeds.get(&kind).copied().unwrap_or(0)
    }

    pub fn gene_count(&self, kind: PlantKind) -> u32 {
        self.genes.get(&kind).copied().unwrap_or(0)
    }

    pub fn plot(&self, plot_id: u32) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == plot_id)
    }

    pub fn plot_mut(&mut self, plot_id: u32) -> Option<&mut Plot> {
        self.plots.iter_mut().find(|p| p.id == plot_id)
    }

    /// Cost of the next plot. Strictly increasing with the plot count, so
    /// it never decreases even across sessions.
    pub fn next_plot_cost(&self, balance: &Balance) -> u32 {
        let extra = (self.plots.len() as u32).saturating_sub(balance.initial_plot_count);
        balance.plot_base_cost + extra * balance.plot_cost_increment
    }

    pub fn take_plant_id(&mut self) -> u64 {
        let id = self.next_plant_id;
        self.next_plant_id += 1;
        id
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Balance::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DAILY SUMMARY — transient between CloseDay and CommitDay
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySummary {
    pub co2_increased: u32,
    pub co2_decreased: i32,
    pub money_spent: u32,
    pub money_earned: u32,
    pub event_message: Option<String>,
    /// Mutually exclusive with `co2_bonus_reduction`.
    pub co2_surge: Option<i32>,
    pub co2_bonus_reduction: Option<i32>,
    pub weather_event_message: Option<String>,
}

/// Holds the summary produced by CloseDay until the player confirms it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingSummary {
    pub summary: Option<DailySummary>,
}

// ═══════════════════════════════════════════════════════════════════════
// MESSAGE LOG — rolling transient feedback
// ═══════════════════════════════════════════════════════════════════════

pub const MESSAGE_LOG_CAP: usize = 5;

/// The 5 most recent messages, newest first.
#[derive(Resource, Debug, Clone, Default)]
pub struct MessageLog {
    pub entries: Vec<String>,
}

impl MessageLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.insert(0, message.into());
        self.entries.truncate(MESSAGE_LOG_CAP);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERROR TAXONOMY — recoverable, user-facing rejections
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    InsufficientFunds,
    InsufficientInventory,
    AlreadySold,
    NoRecipe,
    InsufficientGenes,
    InvalidTarget,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ActionError::InsufficientFunds => "Not enough money!",
            ActionError::InsufficientInventory => "Nothing left in stock.",
            ActionError::AlreadySold => "That one is already sold out.",
            ActionError::NoRecipe => "Nothing seems to come from that combination...",
            ActionError::InsufficientGenes => "Not enough genes!",
            ActionError::InvalidTarget => "Nothing to do there.",
        };
        write!(f, "{}", text)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TUTORIAL & SESSION FLAGS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct TutorialState {
    pub active: bool,
    pub step: usize,
}

/// Whether the guided tutorial was ever completed (or skipped). Persisted
/// independently of the save bundle; gates auto-start on new games.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TutorialSeen(pub bool);

/// View-only overlays re-opened from the Planting phase. Closing them must
/// not re-trigger phase-transition side effects.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Revisit {
    pub sellers: bool,
    pub buyer: bool,
}

/// Whether a save bundle exists on disk (drives the Continue option).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SaveDataExists(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — player actions (requests; handlers validate-then-apply)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct NewGameEvent;

#[derive(Event, Debug, Clone)]
pub struct LoadGameEvent;

#[derive(Event, Debug, Clone)]
pub struct SaveAndQuitEvent;

#[derive(Event, Debug, Clone)]
pub struct BuySeedEvent {
    pub seller_id: u32,
}

#[derive(Event, Debug, Clone)]
pub struct BuyAllSeedsEvent;

#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub plot_id: u32,
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct WaterPlotEvent {
    pub plot_id: u32,
}

#[derive(Event, Debug, Clone)]
pub struct WaterAllEvent;

#[derive(Event, Debug, Clone)]
pub struct BuyPlotEvent;

#[derive(Event, Debug, Clone)]
pub struct BuySprinklerEvent;

#[derive(Event, Debug, Clone)]
pub struct SellPlantsEvent {
    pub plot_ids: Vec<u32>,
}

#[derive(Event, Debug, Clone)]
pub struct ExtractGeneEvent {
    pub plot_id: u32,
}

#[derive(Event, Debug, Clone)]
pub struct CombineGenesEvent {
    pub first: PlantKind,
    pub second: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct CloseSellerEvent;

#[derive(Event, Debug, Clone)]
pub struct CloseBuyerEvent;

/// Request to close out the current day (CloseDay — builds the summary).
#[derive(Event, Debug, Clone)]
pub struct NextDayEvent;

/// Acknowledge the daily summary (CommitDay — applies it).
#[derive(Event, Debug, Clone)]
pub struct ConfirmDayEvent;

#[derive(Event, Debug, Clone)]
pub struct MissionsOpenedEvent;

#[derive(Event, Debug, Clone)]
pub struct TutorialNextEvent;

#[derive(Event, Debug, Clone)]
pub struct TutorialSkipEvent;

#[derive(Event, Debug, Clone)]
pub struct ToggleMuteEvent;

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — notifications (facts; tutorial, audio and UI listen)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct SeedPurchasedEvent {
    pub seller_id: u32,
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct SellerClosedEvent;

/// The player highlighted a seed kind in the inventory (UI concern, but
/// the tutorial gates a step on it).
#[derive(Event, Debug, Clone)]
pub struct SeedSelectedEvent {
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct SeedPlantedEvent {
    pub plot_id: u32,
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct PlotWateredEvent {
    pub plot_id: u32,
}

/// The player marked a grown plant for sale in the buyer view.
#[derive(Event, Debug, Clone)]
pub struct SalePickedEvent {
    pub plot_id: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PlantsSoldEvent {
    pub earnings: u32,
    pub xp_gained: u32,
}

#[derive(Event, Debug, Clone)]
pub struct MissionCompletedEvent {
    pub mission_id: String,
    pub reward: u32,
}

#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    pub level: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GeneExtractedEvent {
    pub kind: PlantKind,
}

#[derive(Event, Debug, Clone)]
pub struct GenesCombinedEvent {
    pub result: PlantKind,
}

/// CloseDay ran; the summary is pending review.
#[derive(Event, Debug, Clone)]
pub struct DayClosedEvent;

/// CommitDay ran; a new day has begun.
#[derive(Event, Debug, Clone)]
pub struct DayCommittedEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE BUNDLE
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBundle {
    #[serde(default)]
    pub version: u32,
    pub game_state: GameState,
    pub phase: GamePhase,
    pub sellers: Vec<Seller>,
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state_baseline() {
        let state = GameState::new(&Balance::default());
        assert_eq!(state.day, 1);
        assert_eq!(state.money, 5_000);
        assert_eq!(state.co2_level, 20);
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.plots.len(), 9);
        assert!(state.plots.iter().all(|p| p.plant.is_none()));
        assert_eq!(state.weather, WeatherKind::Sunny);
        assert!(!state.has_sprinkler);
        for &kind in PlantKind::ALL.iter() {
            assert_eq!(state.seed_count(kind), 0);
            assert_eq!(state.gene_count(kind), 0);
        }
    }

    #[test]
    fn test_plot_ids_are_sequential() {
        let state = GameState::default();
        for (i, plot) in state.plots.iter().enumerate() {
            assert_eq!(plot.id, i as u32);
        }
    }

    #[test]
    fn test_next_plot_cost_escalates() {
        let balance = Balance::default();
        let mut state = GameState::new(&balance);
        // 9 plots owned: the 10th costs the base price.
        assert_eq!(state.next_plot_cost(&balance), 1_000);
        state.plots.push(Plot { id: 9, plant: None });
        assert_eq!(state.next_plot_cost(&balance), 1_500);
        state.plots.push(Plot { id: 10, plant: None });
        assert_eq!(state.next_plot_cost(&balance), 2_000);
    }

    #[test]
    fn test_message_log_caps_at_five_newest_first() {
        let mut log = MessageLog::default();
        for i in 0..8 {
            log.push(format!("message {}", i));
        }
        assert_eq!(log.entries.len(), MESSAGE_LOG_CAP);
        assert_eq!(log.entries[0], "message 7");
        assert_eq!(log.entries[4], "message 3");
    }

    #[test]
    fn test_take_plant_id_is_monotonic() {
        let mut state = GameState::default();
        let a = state.take_plant_id();
        let b = state.take_plant_id();
        let c = state.take_plant_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_normalize_backfills_missing_kinds() {
        let mut state = GameState::default();
        state.seeds.clear();
        state.genes.clear();
        state.normalize();
        for &kind in PlantKind::ALL.iter() {
            assert_eq!(state.seed_count(kind), 0);
            assert_eq!(state.gene_count(kind), 0);
        }
    }

    #[test]
    fn test_weather_waters_plants() {
        assert!(WeatherKind::Rainy.waters_plants());
        assert!(WeatherKind::Stormy.waters_plants());
        assert!(!WeatherKind::Sunny.waters_plants());
        assert!(!WeatherKind::Cloudy.waters_plants());
    }
}
