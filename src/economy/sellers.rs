//! Seed sellers — cohort generation, purchases, and the phase routing that
//! happens when the seller view closes.

use bevy::prelude::*;

use crate::rng::GameRng;
use crate::shared::*;

/// Generate a fresh cohort of 3 offers for the given player level.
///
/// Kinds are drawn (with replacement) weighted by `seller_weight` over the
/// market kinds the player has unlocked; each offer's price is uniform in
/// the kind's seed price range.
pub fn generate_sellers(
    level: u32,
    registry: &PlantRegistry,
    rng: &mut GameRng,
) -> Vec<Seller> {
    let available: Vec<&PlantDef> = registry
        .plants
        .values()
        .filter(|def| {
            matches!(def.seed_source, SeedSource::Market { .. })
                && def.unlock_level.map_or(true, |required| level >= required)
        })
        .collect();

    let mut sellers = Vec::with_capacity(SELLER_COHORT_SIZE);
    for id in 0..SELLER_COHORT_SIZE as u32 {
        let Some(def) = rng.weighted(&available, |d| d.seller_weight) else {
            break;
        };
        let SeedSource::Market {
            min_price,
            max_price,
        } = def.seed_source
        else {
            continue;
        };
        sellers.push(Seller {
            id,
            kind: def.kind,
            price: rng.range_inclusive(min_price, max_price),
            sold: false,
        });
    }
    sellers
}

/// The fixed cohort a tutorial game starts with, so the scripted purchase
/// always points at the same offer.
pub fn tutorial_cohort() -> Vec<Seller> {
    vec![
        Seller {
            id: 0,
            kind: PlantKind::MorningGlory,
            price: 300,
            sold: false,
        },
        Seller {
            id: 1,
            kind: PlantKind::Tulip,
            price: 500,
            sold: false,
        },
        Seller {
            id: 2,
            kind: PlantKind::Violet,
            price: 800,
            sold: false,
        },
    ]
}

pub fn handle_buy_seed(
    mut events: EventReader<BuySeedEvent>,
    mut state: ResMut<GameState>,
    mut cohort: ResMut<SellerCohort>,
    registry: Res<PlantRegistry>,
    mut log: ResMut<MessageLog>,
    mut purchased: EventWriter<SeedPurchasedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for ev in events.read() {
        let Some(seller) = cohort.sellers.iter_mut().find(|s| s.id == ev.seller_id) else {
            continue;
        };
        if seller.sold {
            log.push(ActionError::AlreadySold.to_string());
            continue;
        }
        if state.money < seller.price {
            log.push(ActionError::InsufficientFunds.to_string());
            sfx.send(PlaySfxEvent {
                sfx_id: "deny".to_string(),
            });
            continue;
        }

        let price = seller.price;
        let kind = seller.kind;
        state.money -= price;
        state.money_spent_today += price;
        *state.seeds.entry(kind).or_insert(0) += 1;
        seller.sold = true;

        if let Some(def) = registry.get(kind) {
            log.push(format!("Bought {}{} seeds for {}.", def.glyph, def.name, price));
        }
        purchased.send(SeedPurchasedEvent {
            seller_id: ev.seller_id,
            kind,
        });
        sfx.send(PlaySfxEvent {
            sfx_id: "purchase".to_string(),
        });
        info!(
            "[Economy] Bought {:?} seeds for {}. Remaining money: {}",
            kind, price, state.money
        );
    }
}

/// All-or-nothing purchase of every unsold offer.
pub fn handle_buy_all_seeds(
    mut events: EventReader<BuyAllSeedsEvent>,
    mut state: ResMut<GameState>,
    mut cohort: ResMut<SellerCohort>,
    mut log: ResMut<MessageLog>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for _ in events.read() {
        let total: u32 = cohort
            .sellers
            .iter()
            .filter(|s| !s.sold)
            .map(|s| s.price)
            .sum();
        if total == 0 {
            continue;
        }
        if state.money < total {
            log.push(ActionError::InsufficientFunds.to_string());
            sfx.send(PlaySfxEvent {
                sfx_id: "deny".to_string(),
            });
            continue;
        }

        state.money -= total;
        state.money_spent_today += total;
        for seller in cohort.sellers.iter_mut().filter(|s| !s.sold) {
            *state.seeds.entry(seller.kind).or_insert(0) += 1;
            seller.sold = true;
        }
        log.push(format!("Bought all remaining seeds for {}.", total));
        sfx.send(PlaySfxEvent {
            sfx_id: "purchase".to_string(),
        });
    }
}

/// Closing the seller view. A revisit overlay closes without side effects;
/// the real seller visit routes to the buyer (every Nth day, outside the
/// tutorial) or straight to planting.
pub fn handle_close_seller(
    mut events: EventReader<CloseSellerEvent>,
    state: Res<GameState>,
    balance: Res<Balance>,
    tutorial: Res<TutorialState>,
    mut revisit: ResMut<Revisit>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut log: ResMut<MessageLog>,
    mut closed: EventWriter<SellerClosedEvent>,
) {
    for _ in events.read() {
        closed.send(SellerClosedEvent);

        if revisit.sellers {
            revisit.sellers = false;
            continue;
        }
        if *phase.get() != GamePhase::SellerVisit {
            continue;
        }

        if state.day % balance.buyer_visit_frequency == 0 && !tutorial.active {
            next_phase.set(GamePhase::BuyerVisit);
            log.push("A buyer is visiting today.");
        } else {
            next_phase.set(GamePhase::Planting);
            log.push("Plant seeds and tend your garden.");
        }
    }
}
