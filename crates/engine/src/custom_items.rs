//! Packing list entries added by hand.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, PackingCategory, PackingItem, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub quantity: i32,
    pub packed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::trips::Entity",
        from = "Column::TripId",
        to = "crate::trips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trips,
}

impl Related<crate::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new(
        id: String,
        trip_id: &str,
        name: String,
        quantity: u32,
    ) -> ResultEngine<Self> {
        let quantity = i32::try_from(quantity)
            .map_err(|_| EngineError::InvalidInput("invalid quantity".to_string()))?;
        Ok(Self {
            id: ActiveValue::Set(id),
            trip_id: ActiveValue::Set(trip_id.to_string()),
            name: ActiveValue::Set(name),
            quantity: ActiveValue::Set(quantity),
            packed: ActiveValue::Set(false),
        })
    }
}

impl TryFrom<Model> for PackingItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(model.id),
            name: model.name,
            category: PackingCategory::Custom,
            quantity: u32::try_from(model.quantity)
                .map_err(|_| EngineError::InvalidInput("invalid quantity".to_string()))?,
            packed: model.packed,
        })
    }
}
