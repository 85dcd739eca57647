use crate::shared::*;

/// Populate the gene combination recipes.
///
/// The pair is ORDERED: the first donor sets the base flower, so
/// (MorningGlory, Tulip) and (Tulip, MorningGlory) yield different hybrids.
pub fn populate_recipes(book: &mut RecipeBook) {
    book.recipes.insert(
        (PlantKind::MorningGlory, PlantKind::Tulip),
        PlantKind::PurpleMorningGlory,
    );
    book.recipes.insert(
        (PlantKind::Tulip, PlantKind::MorningGlory),
        PlantKind::PurpleTulip,
    );
}
