//! Breeding lab — gene extraction from grown plants and recipe-based
//! combination of two gene units into a hybrid seed.
//!
//! Genes are stored per plant kind (the gene category on the catalog entry
//! only gates whether a kind yields a gene at all).

use bevy::prelude::*;

use crate::shared::*;

pub struct GeneticsPlugin;

impl Plugin for GeneticsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_extract_gene, handle_combine_genes).run_if(in_session),
        );
    }
}

pub fn handle_extract_gene(
    mut events: EventReader<ExtractGeneEvent>,
    mut state: ResMut<GameState>,
    registry: Res<PlantRegistry>,
    balance: Res<Balance>,
    mut log: ResMut<MessageLog>,
    mut extracted: EventWriter<GeneExtractedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        if state.level < balance.breeding_unlock_level {
            continue;
        }
        // Needs an occupied plot with a grown, gene-bearing plant.
        let Some(plant) = state
            .plot(ev.plot_id)
            .and_then(|p| p.plant.as_ref())
            .filter(|plant| plant.is_grown)
        else {
            continue;
        };
        let kind = plant.kind;
        let Some(def) = registry.get(kind) else {
            continue;
        };
        let Some(gene) = def.gene else {
            continue;
        };
        let glyph = def.glyph;
        let name = def.name;

        // The plant is consumed by extraction.
        if let Some(plot) = state.plot_mut(ev.plot_id) {
            plot.plant = None;
        }
        *state.genes.entry(kind).or_insert(0) += 1;

        log.push(format!("Extracted {}{}'s {:?} gene!", glyph, name, gene));
        extracted.send(GeneExtractedEvent { kind });
        sfx.send(PlaySfxEvent {
            sfx_id: "extract".to_string(),
        });
    }
}

pub fn handle_combine_genes(
    mut events: EventReader<CombineGenesEvent>,
    mut state: ResMut<GameState>,
    registry: Res<PlantRegistry>,
    book: Res<RecipeBook>,
    balance: Res<Balance>,
    mut log: ResMut<MessageLog>,
    mut combined: EventWriter<GenesCombinedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        if state.level < balance.breeding_unlock_level {
            continue;
        }
        let Some(result) = book.lookup(ev.first, ev.second) else {
            log.push(ActionError::NoRecipe.to_string());
            continue;
        };

        // Self-combination needs two units of the single kind.
        let enough = if ev.first == ev.second {
            state.gene_count(ev.first) >= 2
        } else {
            state.gene_count(ev.first) >= 1 && state.gene_count(ev.second) >= 1
        };
        if !enough {
            log.push(ActionError::InsufficientGenes.to_string());
            continue;
        }

        *state.genes.entry(ev.first).or_insert(0) -= 1;
        *state.genes.entry(ev.second).or_insert(0) -= 1;
        *state.seeds.entry(result).or_insert(0) += 1;

        if let Some(def) = registry.get(result) {
            log.push(format!(
                "Combined genes into {}{} seeds!",
                def.glyph, def.name
            ));
        }
        combined.send(GenesCombinedEvent { result });
        sfx.send(PlaySfxEvent {
            sfx_id: "celebrate".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{full_plant_registry, full_recipe_book};

    fn breeding_state() -> GameState {
        let mut state = GameState::default();
        state.level = 5;
        state
    }

    #[test]
    fn test_combination_consumes_one_of_each() {
        let book = full_recipe_book();
        let mut state = breeding_state();
        state.genes.insert(PlantKind::MorningGlory, 1);
        state.genes.insert(PlantKind::Tulip, 1);

        // Mirror the handler's core: lookup, stock check, apply.
        let result = book
            .lookup(PlantKind::MorningGlory, PlantKind::Tulip)
            .unwrap();
        *state.genes.entry(PlantKind::MorningGlory).or_insert(0) -= 1;
        *state.genes.entry(PlantKind::Tulip).or_insert(0) -= 1;
        *state.seeds.entry(result).or_insert(0) += 1;

        assert_eq!(state.gene_count(PlantKind::MorningGlory), 0);
        assert_eq!(state.gene_count(PlantKind::Tulip), 0);
        assert_eq!(state.seed_count(PlantKind::PurpleMorningGlory), 1);
    }

    #[test]
    fn test_self_combination_requires_two_units() {
        let mut state = breeding_state();
        state.genes.insert(PlantKind::MorningGlory, 1);

        let first = PlantKind::MorningGlory;
        let second = PlantKind::MorningGlory;
        let enough = if first == second {
            state.gene_count(first) >= 2
        } else {
            state.gene_count(first) >= 1 && state.gene_count(second) >= 1
        };
        assert!(!enough, "one unit must not satisfy a self-combination");

        state.genes.insert(PlantKind::MorningGlory, 2);
        let enough = state.gene_count(first) >= 2;
        assert!(enough);

        // A self-combination decrements the same entry twice.
        *state.genes.entry(first).or_insert(0) -= 1;
        *state.genes.entry(second).or_insert(0) -= 1;
        assert_eq!(state.gene_count(PlantKind::MorningGlory), 0);
    }

    #[test]
    fn test_recipe_results_are_breed_only_kinds() {
        let registry = full_plant_registry();
        let book = full_recipe_book();
        for &result in book.recipes.values() {
            let def = registry.get(result).unwrap();
            assert_eq!(
                def.seed_source,
                SeedSource::BreedOnly,
                "{:?} is a hybrid but also purchasable",
                result
            );
        }
    }
}
