//! Users table.
//!
//! The username is the principal id everywhere in the engine (trip owners,
//! explicit shares, expense authors).

use sea_orm::entity::prelude::*;

use crate::Principal;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub is_admin: bool,
    pub is_premium: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for Principal {
    fn from(user: &Model) -> Self {
        Self {
            id: user.username.clone(),
            is_admin: user.is_admin,
            is_premium: user.is_premium,
        }
    }
}
