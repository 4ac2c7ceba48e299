use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Id};

use super::City;

/// ジムのID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct GymId(u64);

impl Id for GymId {
    type Inner = u64;
}

/// ジム
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gym {
    id: GymId,
    name: String,
    address: String,
    city: City,
    latitude: f64,
    longitude: f64,
}

impl Gym {
    pub fn new(id: GymId, name: String, address: String, city: City) -> Self {
        Self {
            id,
            name,
            address,
            city,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn with_position(
        id: GymId,
        name: String,
        address: String,
        city: City,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name,
            address,
            city,
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Entity for Gym {
    type Id = GymId;

    const ENTITY_NAME: &'static str = "gym";

    fn id(&self) -> Self::Id {
        self.id
    }
}
