use chrono_tz::Tz;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::{Entity, Id};

/// 都市のID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct CityId(u64);

impl Id for CityId {
    type Inner = u64;
}

/// 都市。ジムのタイムゾーンはここから決まる
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    id: CityId,
    name: String,
    #[serde_as(as = "DisplayFromStr")]
    zone: Tz,
}

impl City {
    pub fn new(id: CityId, name: String, zone: Tz) -> Self {
        Self { id, name, zone }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Entity for City {
    type Id = CityId;

    const ENTITY_NAME: &'static str = "city";

    fn id(&self) -> Self::Id {
        self.id
    }
}
