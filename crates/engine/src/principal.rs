//! The authenticated caller and what it is allowed to do.

use serde::{Deserialize, Serialize};

/// Trips a non-premium user may own at once.
pub const FREE_TRIP_LIMIT: u64 = 3;

/// Minimal identity handed to the engine by the authentication layer.
///
/// `id` is the username. Anonymous callers are represented by the absence of a
/// principal (`Option<&Principal>`), never by a placeholder value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub is_admin: bool,
    pub is_premium: bool,
}

/// Actions gated by account role rather than by trip ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    ManageCities,
    ManageUsers,
    UnlimitedTrips,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: false,
            is_premium: false,
        }
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    #[must_use]
    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    /// Admins hold every capability; premium users only lift the trip limit.
    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCities | Capability::ManageUsers => self.is_admin,
            Capability::UnlimitedTrips => self.is_admin || self.is_premium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_table() {
        let plain = Principal::new("u1");
        let premium = Principal::new("u2").premium();
        let admin = Principal::new("u3").admin();

        for capability in [Capability::ManageCities, Capability::ManageUsers] {
            assert!(!plain.can(capability));
            assert!(!premium.can(capability));
            assert!(admin.can(capability));
        }

        assert!(!plain.can(Capability::UnlimitedTrips));
        assert!(premium.can(Capability::UnlimitedTrips));
        assert!(admin.can(Capability::UnlimitedTrips));
    }
}
