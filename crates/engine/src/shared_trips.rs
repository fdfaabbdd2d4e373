//! Explicit read grants of a trip to a named user.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::ExplicitShare;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shared_trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trip_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub shared_with_id: String,
    pub shared_by_id: String,
    pub created_at: DateTimeUtc,
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

impl From<Model> for ExplicitShare {
    fn from(model: Model) -> Self {
        Self {
            trip_id: model.trip_id,
            shared_with_id: model.shared_with_id,
            shared_by_id: model.shared_by_id,
            created_at: model.created_at,
        }
    }
}

impl From<&ExplicitShare> for ActiveModel {
    fn from(share: &ExplicitShare) -> Self {
        Self {
            trip_id: ActiveValue::Set(share.trip_id.clone()),
            shared_with_id: ActiveValue::Set(share.shared_with_id.clone()),
            shared_by_id: ActiveValue::Set(share.shared_by_id.clone()),
            created_at: ActiveValue::Set(share.created_at),
        }
    }
}
