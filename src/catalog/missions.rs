use crate::shared::*;

/// Populate the mission board. Each mission pays out once, when the
/// cumulative sale count for its plant reaches the target.
pub fn populate_missions(board: &mut MissionBoard) {
    board.missions = vec![
        MissionDef {
            id: "morning_glory_1",
            title: "Sell 10 morning glories",
            plant: PlantKind::MorningGlory,
            target_count: 10,
            reward: 1_500,
        },
        MissionDef {
            id: "tulip_1",
            title: "Sell 10 tulips",
            plant: PlantKind::Tulip,
            target_count: 10,
            reward: 2_000,
        },
        MissionDef {
            id: "violet_1",
            title: "Sell 10 violets",
            plant: PlantKind::Violet,
            target_count: 10,
            reward: 3_000,
        },
        MissionDef {
            id: "sunflower_1",
            title: "Sell 5 sunflowers",
            plant: PlantKind::Sunflower,
            target_count: 5,
            reward: 5_000,
        },
        MissionDef {
            id: "cactus_1",
            title: "Sell 5 cacti",
            plant: PlantKind::Cactus,
            target_count: 5,
            reward: 7_500,
        },
        MissionDef {
            id: "rose_1",
            title: "Sell 3 roses",
            plant: PlantKind::Rose,
            target_count: 3,
            reward: 10_000,
        },
    ];
}
