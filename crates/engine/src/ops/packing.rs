use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, PackingItem, Principal, ResultEngine, custom_items,
    packing::{MAX_ITEM_QUANTITY, base_items},
};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Generated items for the trip's style and length followed by the items
    /// added by hand.
    pub async fn packing_list(
        &self,
        trip_id: &str,
        viewer: Option<&Principal>,
    ) -> ResultEngine<Vec<PackingItem>> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_read(&db_tx, trip_id, viewer).await?;
            let mut items = base_items(trip.travel_style, trip.days());
            let custom = custom_items::Entity::find()
                .filter(custom_items::Column::TripId.eq(trip.id))
                .order_by_asc(custom_items::Column::Name)
                .all(&db_tx)
                .await?;
            for model in custom {
                items.push(PackingItem::try_from(model)?);
            }
            Ok(items)
        })
    }

    /// Adds a custom item (owner-only).
    pub async fn add_packing_item(
        &self,
        trip_id: &str,
        name: &str,
        quantity: u32,
        principal: &Principal,
    ) -> ResultEngine<PackingItem> {
        let name = normalize_required_name(name, "item")?;
        if quantity == 0 || quantity > MAX_ITEM_QUANTITY {
            return Err(EngineError::InvalidInput(format!(
                "quantity must be between 1 and {MAX_ITEM_QUANTITY}"
            )));
        }
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let model = custom_items::ActiveModel::new(
                Uuid::new_v4().to_string(),
                &trip.id,
                name,
                quantity,
            )?
            .insert(&db_tx)
            .await?;
            PackingItem::try_from(model)
        })
    }

    /// Marks a custom item packed or unpacked (owner-only).
    pub async fn set_packing_item_packed(
        &self,
        trip_id: &str,
        item_id: &str,
        packed: bool,
        principal: &Principal,
    ) -> ResultEngine<PackingItem> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let item = find_item(&db_tx, &trip.id, item_id).await?;
            let mut active: custom_items::ActiveModel = item.into();
            active.packed = ActiveValue::Set(packed);
            let model = active.update(&db_tx).await?;
            PackingItem::try_from(model)
        })
    }

    /// Deletes a custom item (owner-only).
    pub async fn remove_packing_item(
        &self,
        trip_id: &str,
        item_id: &str,
        principal: &Principal,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_write(&db_tx, trip_id, principal).await?;
            let item = find_item(&db_tx, &trip.id, item_id).await?;
            custom_items::Entity::delete_by_id(item.id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}

async fn find_item(
    db: &sea_orm::DatabaseTransaction,
    trip_id: &str,
    item_id: &str,
) -> ResultEngine<custom_items::Model> {
    custom_items::Entity::find_by_id(item_id.to_string())
        .filter(custom_items::Column::TripId.eq(trip_id.to_string()))
        .one(db)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("packing item not exists".to_string()))
}
