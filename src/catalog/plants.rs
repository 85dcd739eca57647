use crate::shared::*;

/// Populate the PlantRegistry with all plant definitions.
///
/// Seller weights do not need to sum to 1 — cohort generation normalizes
/// over whatever subset is unlocked at the player's level. The two purple
/// hybrids have no market listing and can only be bred.
pub fn populate_plants(registry: &mut PlantRegistry) {
    let plants: Vec<PlantDef> = vec![
        PlantDef {
            kind: PlantKind::MorningGlory,
            name: "Morning Glory",
            glyph: "🌺",
            seed_source: SeedSource::Market {
                min_price: 200,
                max_price: 500,
            },
            sell_price: 400,
            growth_days: 1,
            co2_reduction: 1,
            xp: 10,
            seller_weight: 0.50,
            unlock_level: None,
            gene: Some(GeneKind::Blue),
            water_cost: 30,
        },
        PlantDef {
            kind: PlantKind::Tulip,
            name: "Tulip",
            glyph: "🌷",
            seed_source: SeedSource::Market {
                min_price: 300,
                max_price: 700,
            },
            sell_price: 700,
            growth_days: 2,
            co2_reduction: 3,
            xp: 20,
            seller_weight: 0.35,
            unlock_level: None,
            gene: Some(GeneKind::Red),
            water_cost: 50,
        },
        PlantDef {
            kind: PlantKind::Violet,
            name: "Violet",
            glyph: "🪻",
            seed_source: SeedSource::Market {
                min_price: 500,
                max_price: 1_000,
            },
            sell_price: 1_000,
            growth_days: 3,
            co2_reduction: 4,
            xp: 30,
            seller_weight: 0.15,
            unlock_level: None,
            gene: Some(GeneKind::Purple),
            water_cost: 70,
        },
        PlantDef {
            kind: PlantKind::Sunflower,
            name: "Sunflower",
            glyph: "🌻",
            seed_source: SeedSource::Market {
                min_price: 1_000,
                max_price: 1_300,
            },
            sell_price: 1_600,
            growth_days: 2,
            co2_reduction: 5,
            xp: 50,
            seller_weight: 0.15,
            unlock_level: Some(5),
            gene: Some(GeneKind::Yellow),
            water_cost: 100,
        },
        PlantDef {
            kind: PlantKind::Rose,
            name: "Rose",
            glyph: "🌹",
            // Fixed-price luxury seed; the range is degenerate on purpose.
            seed_source: SeedSource::Market {
                min_price: 4_000,
                max_price: 4_000,
            },
            sell_price: 10_000,
            growth_days: 7,
            co2_reduction: 3,
            xp: 150,
            seller_weight: 0.05,
            unlock_level: Some(5),
            gene: Some(GeneKind::Red),
            water_cost: 140,
        },
        PlantDef {
            kind: PlantKind::Cactus,
            name: "Cactus",
            glyph: "🌵",
            seed_source: SeedSource::Market {
                min_price: 1_500,
                max_price: 2_000,
            },
            sell_price: 2_200,
            growth_days: 4,
            co2_reduction: 7,
            xp: 80,
            seller_weight: 0.08,
            unlock_level: Some(5),
            gene: Some(GeneKind::Green),
            water_cost: 15,
        },
        PlantDef {
            kind: PlantKind::PurpleMorningGlory,
            name: "Purple Morning Glory",
            glyph: "⚜️",
            seed_source: SeedSource::BreedOnly,
            sell_price: 2_000,
            growth_days: 2,
            co2_reduction: 6,
            xp: 100,
            seller_weight: 0.0,
            unlock_level: None,
            gene: Some(GeneKind::Purple),
            water_cost: 80,
        },
        PlantDef {
            kind: PlantKind::PurpleTulip,
            name: "Purple Tulip",
            glyph: "🌷",
            seed_source: SeedSource::BreedOnly,
            sell_price: 2_500,
            growth_days: 3,
            co2_reduction: 5,
            xp: 120,
            seller_weight: 0.0,
            unlock_level: None,
            gene: Some(GeneKind::Purple),
            water_cost: 90,
        },
    ];

    for plant in plants {
        registry.plants.insert(plant.kind, plant);
    }
}
