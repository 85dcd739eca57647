use crate::shared::*;

/// Populate the weather table.
///
/// Sunny 50%, Cloudy 25%, Rainy 20%, Stormy 5%. Selection normalizes by
/// total weight, so these are relative, not exact, probabilities.
pub fn populate_weather(table: &mut WeatherTable) {
    table.entries = vec![
        WeatherDef {
            kind: WeatherKind::Sunny,
            glyph: "☀️",
            name: "sunny",
            weight: 0.50,
        },
        WeatherDef {
            kind: WeatherKind::Cloudy,
            glyph: "☁️",
            name: "cloudy",
            weight: 0.25,
        },
        WeatherDef {
            kind: WeatherKind::Rainy,
            glyph: "🌧️",
            name: "rainy",
            weight: 0.20,
        },
        WeatherDef {
            kind: WeatherKind::Stormy,
            glyph: "⛈️",
            name: "stormy",
            weight: 0.05,
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn test_all_weather_kinds_present() {
        let mut table = WeatherTable::default();
        populate_weather(&mut table);
        assert_eq!(table.entries.len(), 4);
        for kind in [
            WeatherKind::Sunny,
            WeatherKind::Cloudy,
            WeatherKind::Rainy,
            WeatherKind::Stormy,
        ] {
            assert!(table.get(kind).is_some());
        }
    }

    #[test]
    fn test_weighted_draw_covers_common_weathers() {
        let mut table = WeatherTable::default();
        populate_weather(&mut table);
        let mut rng = GameRng::seeded(123);
        let mut sunny = 0u32;
        for _ in 0..10_000 {
            let picked = rng.weighted(&table.entries, |w| w.weight).unwrap();
            if picked.kind == WeatherKind::Sunny {
                sunny += 1;
            }
        }
        // ~50% sunny, loose tolerance.
        assert!(sunny > 4_000 && sunny < 6_000, "sunny count {}", sunny);
    }
}
