use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{Capability, EngineError, Principal, ResultEngine, users};

use super::{Engine, UserView, with_tx};

impl From<users::Model> for UserView {
    fn from(user: users::Model) -> Self {
        Self {
            username: user.username,
            is_admin: user.is_admin,
            is_premium: user.is_premium,
        }
    }
}

impl Engine {
    /// Registers an account. Used to bootstrap users from the admin CLI, so it
    /// takes no principal.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> ResultEngine<UserView> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(EngineError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(username.to_string())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(format!(
                    "user already exists: {username}"
                )));
            }
            let model = users::ActiveModel {
                username: ActiveValue::Set(username.to_string()),
                password: ActiveValue::Set(password.to_string()),
                is_admin: ActiveValue::Set(is_admin),
                is_premium: ActiveValue::Set(false),
            }
            .insert(&db_tx)
            .await?;
            Ok(UserView::from(model))
        })
    }

    /// Checks HTTP Basic credentials. `None` when the user is unknown or the
    /// password does not match.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> ResultEngine<Option<Principal>> {
        with_tx!(self, |db_tx| {
            let user = users::Entity::find_by_id(username.to_string())
                .one(&db_tx)
                .await?;
            Ok(user
                .filter(|user| user.password == password)
                .map(|user| Principal::from(&user)))
        })
    }

    /// The principal of an existing user.
    pub async fn principal(&self, username: &str) -> ResultEngine<Principal> {
        with_tx!(self, |db_tx| {
            let user = self.require_user_exists(&db_tx, username).await?;
            Ok(Principal::from(&user))
        })
    }

    /// Every account, by username [`Capability::ManageUsers`].
    pub async fn list_users(&self, principal: &Principal) -> ResultEngine<Vec<UserView>> {
        self.require_capability(principal, Capability::ManageUsers)?;
        with_tx!(self, |db_tx| {
            let users = users::Entity::find()
                .order_by_asc(users::Column::Username)
                .all(&db_tx)
                .await?;
            Ok(users.into_iter().map(UserView::from).collect())
        })
    }

    /// Grants or withdraws the admin and premium flags
    /// [`Capability::ManageUsers`].
    ///
    /// An admin cannot drop their own admin flag, so the last admin can never
    /// lock everybody out.
    pub async fn set_user_flags(
        &self,
        username: &str,
        is_admin: Option<bool>,
        is_premium: Option<bool>,
        principal: &Principal,
    ) -> ResultEngine<UserView> {
        self.require_capability(principal, Capability::ManageUsers)?;
        if username == principal.id && is_admin == Some(false) {
            return Err(EngineError::Forbidden(
                "cannot remove your own admin flag".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let user = self.require_user_exists(&db_tx, username).await?;
            let mut active: users::ActiveModel = user.into();
            if let Some(is_admin) = is_admin {
                active.is_admin = ActiveValue::Set(is_admin);
            }
            if let Some(is_premium) = is_premium {
                active.is_premium = ActiveValue::Set(is_premium);
            }
            let user = active.update(&db_tx).await?;
            tracing::info!(
                username = %user.username,
                is_admin = user.is_admin,
                is_premium = user.is_premium,
                "user flags changed"
            );
            Ok(UserView::from(user))
        })
    }
}
