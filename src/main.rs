mod catalog;
mod daycycle;
mod economy;
mod genetics;
mod rng;
mod save;
mod shared;
mod tutorial;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use rng::GameRng;
use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Green World".into(),
                    resolution: WindowResolution::new(960.0, 540.0),
                    present_mode: PresentMode::AutoVsync,
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        // Game phase
        .init_state::<GamePhase>()
        // Shared resources
        .init_resource::<GameState>()
        .init_resource::<Balance>()
        .init_resource::<GameRng>()
        .init_resource::<PlantRegistry>()
        .init_resource::<WeatherTable>()
        .init_resource::<RecipeBook>()
        .init_resource::<MissionBoard>()
        .init_resource::<SellerCohort>()
        .init_resource::<MessageLog>()
        .init_resource::<PendingSummary>()
        .init_resource::<TutorialState>()
        .init_resource::<TutorialSeen>()
        .init_resource::<Revisit>()
        .init_resource::<SaveDataExists>()
        // Action events
        .add_event::<NewGameEvent>()
        .add_event::<LoadGameEvent>()
        .add_event::<SaveAndQuitEvent>()
        .add_event::<BuySeedEvent>()
        .add_event::<BuyAllSeedsEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<WaterPlotEvent>()
        .add_event::<WaterAllEvent>()
        .add_event::<BuyPlotEvent>()
        .add_event::<BuySprinklerEvent>()
        .add_event::<SellPlantsEvent>()
        .add_event::<ExtractGeneEvent>()
        .add_event::<CombineGenesEvent>()
        .add_event::<CloseSellerEvent>()
        .add_event::<CloseBuyerEvent>()
        .add_event::<NextDayEvent>()
        .add_event::<ConfirmDayEvent>()
        .add_event::<MissionsOpenedEvent>()
        .add_event::<TutorialNextEvent>()
        .add_event::<TutorialSkipEvent>()
        .add_event::<ToggleMuteEvent>()
        // Notification events
        .add_event::<SeedPurchasedEvent>()
        .add_event::<SellerClosedEvent>()
        .add_event::<SeedSelectedEvent>()
        .add_event::<SeedPlantedEvent>()
        .add_event::<PlotWateredEvent>()
        .add_event::<SalePickedEvent>()
        .add_event::<PlantsSoldEvent>()
        .add_event::<MissionCompletedEvent>()
        .add_event::<LevelUpEvent>()
        .add_event::<GeneExtractedEvent>()
        .add_event::<GenesCombinedEvent>()
        .add_event::<DayClosedEvent>()
        .add_event::<DayCommittedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        // Domain plugins
        .add_plugins(catalog::CatalogPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(genetics::GeneticsPlugin)
        .add_plugins(daycycle::DayCyclePlugin)
        .add_plugins(tutorial::TutorialPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
