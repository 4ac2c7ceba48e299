use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Id};

use super::Gym;

/// 器具種別のID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct AssetKindId(u64);

impl Id for AssetKindId {
    type Inner = u64;
}

/// 器具の種別。種別ごとに予約時間の上限を持つ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetKind {
    id: AssetKindId,
    name: String,
    max_reservation_time: i64,
}

impl AssetKind {
    pub fn new(id: AssetKindId, name: String, max_reservation_time: i64) -> Self {
        Self {
            id,
            name,
            max_reservation_time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// この種別の器具を一度に予約できる最大時間(分)
    pub fn max_reservation_time(&self) -> i64 {
        self.max_reservation_time
    }
}

impl Entity for AssetKind {
    type Id = AssetKindId;

    const ENTITY_NAME: &'static str = "asset_kind";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// 器具のID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct AssetId(u64);

impl Id for AssetId {
    type Inner = u64;
}

/// ジムに設置された器具
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    id: AssetId,
    name: String,
    kind: AssetKind,
    gym: Gym,
}

impl Asset {
    pub fn new(id: AssetId, name: String, kind: AssetKind, gym: Gym) -> Self {
        Self {
            id,
            name,
            kind,
            gym,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AssetKind {
        &self.kind
    }

    pub fn gym(&self) -> &Gym {
        &self.gym
    }
}

impl Entity for Asset {
    type Id = AssetId;

    const ENTITY_NAME: &'static str = "asset";

    fn id(&self) -> Self::Id {
        self.id
    }
}
