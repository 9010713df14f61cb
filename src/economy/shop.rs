use bevy::prelude::*;

use crate::data::CropCatalog;
use crate::error::ShopError;
use crate::save::{BlobKey, SaveStore};
use crate::shared::*;

use super::{Inventory, Ledger};

/// The core purchase flow. Returns the total cost on success.
///
/// Nothing changes unless the debit goes through; the seeds are added only
/// after the ledger accepted the charge.
pub fn purchase_seeds(
    catalog: &CropCatalog,
    ledger: &mut Ledger,
    inventory: &mut Inventory,
    region: Option<Region>,
    crop_id: &str,
    quantity: u32,
) -> Result<Coins, ShopError> {
    if quantity == 0 {
        return Err(ShopError::ZeroQuantity);
    }
    let def = catalog
        .by_id(crop_id)
        .ok_or_else(|| ShopError::UnknownCrop(crop_id.to_string()))?;
    if !catalog.offered(region).iter().any(|c| c.id == def.id) {
        return Err(ShopError::NotOffered(crop_id.to_string()));
    }

    let total_cost = def.price.saturating_mul(Coins::from(quantity));
    ledger.debit(total_cost, format!("Purchased {} {} seeds", quantity, def.name))?;
    inventory.add(&def.id, quantity);
    Ok(total_cost)
}

/// Processes BuySeedsEvents from the shop screen.
pub fn handle_seed_purchases(
    mut buy_events: EventReader<BuySeedsEvent>,
    catalog: Res<CropCatalog>,
    profile: Res<FarmProfile>,
    mut ledger: ResMut<Ledger>,
    mut inventory: ResMut<Inventory>,
    mut store: ResMut<SaveStore>,
    mut result_writer: EventWriter<PurchaseResultEvent>,
) {
    for ev in buy_events.read() {
        let result = purchase_seeds(
            &catalog,
            &mut ledger,
            &mut inventory,
            profile.region,
            &ev.crop_id,
            ev.quantity,
        );

        match &result {
            Ok(cost) => {
                info!(
                    "[Shop] Bought {} x '{}' for {}",
                    ev.quantity, ev.crop_id, cost
                );
                store.store(BlobKey::Ledger, &*ledger);
                store.store(BlobKey::Inventory, &*inventory);
            }
            Err(e) => info!("[Shop] Purchase of '{}' refused: {}", ev.crop_id, e),
        }

        result_writer.send(PurchaseResultEvent {
            crop_id: ev.crop_id.clone(),
            quantity: ev.quantity,
            result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    #[test]
    fn test_purchase_debits_and_adds_seeds() {
        let catalog = CropCatalog::builtin();
        let mut ledger = Ledger::new(100);
        let mut inv = Inventory::default();
        let cost = purchase_seeds(&catalog, &mut ledger, &mut inv, None, "tomato", 3).unwrap();
        assert_eq!(cost, 60);
        assert_eq!(ledger.balance(), 40);
        assert_eq!(inv.quantity_of("tomato"), 3);
        assert_eq!(ledger.transactions()[0].reason, "Purchased 3 Tomato seeds");
    }

    #[test]
    fn test_purchase_without_funds_changes_nothing() {
        let catalog = CropCatalog::builtin();
        let mut ledger = Ledger::new(30);
        let mut inv = Inventory::default();
        let err = purchase_seeds(&catalog, &mut ledger, &mut inv, None, "watermelon", 1).unwrap_err();
        assert_eq!(
            err,
            ShopError::Funds(LedgerError::InsufficientFunds {
                needed: 40,
                available: 30
            })
        );
        assert_eq!(ledger.balance(), 30);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_purchase_respects_region() {
        let catalog = CropCatalog::builtin();
        let mut ledger = Ledger::new(1000);
        let mut inv = Inventory::default();
        assert_eq!(
            purchase_seeds(&catalog, &mut ledger, &mut inv, Some(Region::Uk), "avocado", 1),
            Err(ShopError::NotOffered("avocado".into()))
        );
        assert!(purchase_seeds(&catalog, &mut ledger, &mut inv, Some(Region::Mexico), "avocado", 1).is_ok());
        assert!(purchase_seeds(&catalog, &mut ledger, &mut inv, Some(Region::Uk), "tomato", 1).is_ok());
    }

    #[test]
    fn test_purchase_rejects_unknown_and_zero() {
        let catalog = CropCatalog::builtin();
        let mut ledger = Ledger::new(1000);
        let mut inv = Inventory::default();
        assert_eq!(
            purchase_seeds(&catalog, &mut ledger, &mut inv, None, "mandrake", 1),
            Err(ShopError::UnknownCrop("mandrake".into()))
        );
        assert_eq!(
            purchase_seeds(&catalog, &mut ledger, &mut inv, None, "tomato", 0),
            Err(ShopError::ZeroQuantity)
        );
        assert_eq!(ledger.balance(), 1000);
    }
}
