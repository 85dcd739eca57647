//! The guided tutorial script.
//!
//! A fixed linear sequence. Action-driven steps advance only when the
//! matching semantic event arrives with the right parameters; free steps
//! advance on an explicit "next".

use crate::shared::PlantKind;

/// What it takes to move past a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTrigger {
    /// Advances on TutorialNextEvent.
    Free,
    BuySeed { seller_id: u32 },
    CloseSeller,
    SelectSeed { kind: PlantKind },
    PlantPlot { plot_id: u32, kind: PlantKind },
    WaterPlot { plot_id: u32 },
    NextDay,
    CloseSummary,
    PickSale,
    SellPlants,
    OpenMissions,
}

#[derive(Debug, Clone)]
pub struct TutorialStep {
    /// Semantic UI anchor the presentation layer highlights.
    pub anchor: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub trigger: StepTrigger,
}

pub const TUTORIAL_STEPS: [TutorialStep; 13] = [
    TutorialStep {
        anchor: "seed-seller-panel",
        title: "Welcome! (1/13)",
        text: "Welcome to Green World! This tutorial covers the basics. Press Next to continue.",
        trigger: StepTrigger::Free,
    },
    TutorialStep {
        anchor: "buy-seed-0",
        title: "Buying seeds (2/13)",
        text: "First, buy some seeds. Take the morning glory offer.",
        trigger: StepTrigger::BuySeed { seller_id: 0 },
    },
    TutorialStep {
        anchor: "close-seller-panel",
        title: "Leaving the stall (3/13)",
        text: "Seeds bought! Now close the stall and head back to the garden.",
        trigger: StepTrigger::CloseSeller,
    },
    TutorialStep {
        anchor: "main-stats",
        title: "Your stats (4/13)",
        text: "The top bar shows the weather, day, money and level. Weather can affect how plants grow.",
        trigger: StepTrigger::Free,
    },
    TutorialStep {
        anchor: "co2-stat",
        title: "CO2 level (5/13)",
        text: "This is the planet's CO2 level. At 100% the game is over — grow plants to bring it down!",
        trigger: StepTrigger::Free,
    },
    TutorialStep {
        anchor: "select-seed-morning-glory",
        title: "Selecting a seed (6/13)",
        text: "The morning glory seeds are in your inventory. Select them to get ready to plant.",
        trigger: StepTrigger::SelectSeed {
            kind: PlantKind::MorningGlory,
        },
    },
    TutorialStep {
        anchor: "plot-0",
        title: "Planting (7/13)",
        text: "Great! Now plant the seeds in the highlighted empty plot.",
        trigger: StepTrigger::PlantPlot {
            plot_id: 0,
            kind: PlantKind::MorningGlory,
        },
    },
    TutorialStep {
        anchor: "water-button-0",
        title: "Watering (8/13)",
        text: "Plants need water to grow. Water the plot you just planted.",
        trigger: StepTrigger::WaterPlot { plot_id: 0 },
    },
    TutorialStep {
        anchor: "next-day-button",
        title: "The next day (9/13)",
        text: "Growth takes time. Move on to the next day.",
        trigger: StepTrigger::NextDay,
    },
    TutorialStep {
        anchor: "close-summary-button",
        title: "The daily summary (10/13)",
        text: "Each day ends with a summary of CO2 and money changes. Review it, then continue.",
        trigger: StepTrigger::CloseSummary,
    },
    TutorialStep {
        anchor: "plant-to-sell-0",
        title: "Picking plants to sell (11/13)",
        text: "Your morning glory is fully grown. Mark it for sale.",
        trigger: StepTrigger::PickSale,
    },
    TutorialStep {
        anchor: "sell-plants-button",
        title: "Selling (12/13)",
        text: "Check the total, then confirm the sale.",
        trigger: StepTrigger::SellPlants,
    },
    TutorialStep {
        anchor: "missions-button",
        title: "All done! (13/13)",
        text: "That's everything! Check your missions for goals, and save the planet at your own pace.",
        trigger: StepTrigger::OpenMissions,
    },
];
