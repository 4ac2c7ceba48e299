use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Id};

/// ユーザーのID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct UserId(u64);

impl Id for UserId {
    type Inner = u64;
}

/// 予約を行うユーザー。認証はここでは扱わない
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    name: String,
}

impl User {
    pub fn new(id: UserId, username: String, name: String) -> Self {
        Self { id, username, name }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for User {
    type Id = UserId;

    const ENTITY_NAME: &'static str = "user";

    fn id(&self) -> Self::Id {
        self.id
    }
}
