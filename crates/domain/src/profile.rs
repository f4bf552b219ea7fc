use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Whether a profile belongs to someone offering rides or booking them.
/// A profile is one or the other, never both at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Passenger,
    Driver,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Passenger => "passenger",
            ProfileRole::Driver => "driver",
        }
    }
}

/// Contact card for either party of a booking. Reminder texts embed the
/// name and phone number so driver and passenger can reach each other
/// before pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: ID,
    pub full_name: String,
    pub phone: String,
    pub role: ProfileRole,
}

impl UserProfile {
    pub fn new(full_name: &str, phone: &str, role: ProfileRole) -> Self {
        Self {
            id: Default::default(),
            full_name: full_name.into(),
            phone: phone.into(),
            role,
        }
    }
}

impl Entity<ID> for UserProfile {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
