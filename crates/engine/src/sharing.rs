//! Trip sharing state and access decisions.
//!
//! A trip carries two independent sharing axes: the public flag and the share
//! token. The token is created lazily the first time a trip is made public and
//! then kept forever, so links already handed out keep working after the owner
//! turns sharing off and on again.
//!
//! | `is_public` | `share_token` | [`Visibility`] |
//! |---|---|---|
//! | false | none | `Private` |
//! | false | set  | `Revoked` |
//! | true  | set  | `Public` |
//! | true  | none | `Unresolved` (never persisted) |
//!
//! Reading may be granted by ownership, by the public flag or by an explicit
//! share. Writing is granted by ownership only.

use std::fmt;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Principal;

/// Length of tokens produced by [`RandomTokenGenerator`].
pub const SHARE_TOKEN_LEN: usize = 22;

/// Source of opaque share tokens.
pub trait TokenGenerator: Send + Sync + fmt::Debug {
    /// Returns a new URL-safe token.
    fn generate(&self) -> String;
}

/// 128 random bits (a v4 UUID) encoded as unpadded URL-safe base64.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Revoked,
    Public,
    Unresolved,
}

/// The sharing fields of a trip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareState {
    pub is_public: bool,
    pub share_token: Option<String>,
}

impl ShareState {
    pub fn new(is_public: bool, share_token: Option<String>) -> Self {
        Self {
            is_public,
            share_token,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        match (self.is_public, self.share_token.is_some()) {
            (false, false) => Visibility::Private,
            (false, true) => Visibility::Revoked,
            (true, true) => Visibility::Public,
            (true, false) => Visibility::Unresolved,
        }
    }

    /// Whether `token` currently opens this trip. A retained token of a
    /// non-public trip never matches.
    #[must_use]
    pub fn token_grants_access(&self, token: &str) -> bool {
        self.is_public && self.share_token.as_deref() == Some(token)
    }
}

/// Computes the sharing state after the owner asks for `want_public`.
///
/// An existing token is always carried over; a token is generated only when
/// the trip becomes public without one. Turning sharing off never clears the
/// token.
#[must_use]
pub fn set_public(
    current: &ShareState,
    want_public: bool,
    tokens: &dyn TokenGenerator,
) -> ShareState {
    let share_token = match (&current.share_token, want_public) {
        (Some(token), _) => Some(token.clone()),
        (None, true) => Some(tokens.generate()),
        (None, false) => None,
    };

    ShareState {
        is_public: want_public,
        share_token,
    }
}

/// A named, non-public grant of read access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitShare {
    pub trip_id: String,
    pub shared_with_id: String,
    pub shared_by_id: String,
    pub created_at: DateTime<Utc>,
}

/// The ownership and public flag of a trip, as seen by the access checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripAccess<'a> {
    pub owner_id: &'a str,
    pub is_public: bool,
}

fn is_owner(trip: TripAccess<'_>, viewer: Option<&Principal>) -> bool {
    viewer.is_some_and(|viewer| viewer.id == trip.owner_id)
}

/// `true` for the owner, for anyone while the trip is public, and for viewers
/// named in `explicit_shares`.
///
/// When a trip is resolved by share token the caller is responsible for token
/// equality; this function only looks at the public flag.
#[must_use]
pub fn can_read(
    trip: TripAccess<'_>,
    viewer: Option<&Principal>,
    explicit_shares: &[ExplicitShare],
) -> bool {
    if is_owner(trip, viewer) || trip.is_public {
        return true;
    }
    viewer.is_some_and(|viewer| {
        explicit_shares
            .iter()
            .any(|share| share.shared_with_id == viewer.id)
    })
}

/// `true` only for the owner. Public visibility and explicit shares never
/// grant write access.
#[must_use]
pub fn can_write(trip: TripAccess<'_>, viewer: Option<&Principal>) -> bool {
    is_owner(trip, viewer)
}
