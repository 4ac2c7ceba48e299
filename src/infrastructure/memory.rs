use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::core::{
    AssetId, GymId, Reservation, ReservationId, ReservationRepository, Timetable,
    TimetableRepository, UserId,
};
use crate::domain::{DataAccessError, Entity};

/// メモリ上のエンティティ格納庫
///
/// テストと開発用。IDをキーに1行ずつ持つだけの素朴な実装。
pub struct InMemoryStore<E: Entity> {
    rows: RwLock<Vec<E>>,
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    pub async fn find_by_id(&self, id: E::Id) -> Option<E> {
        self.rows.read().await.iter().find(|e| e.id() == id).cloned()
    }

    /// 同じIDの行があれば置き換え、なければ追加する。追加したら`true`
    pub async fn upsert(&self, entity: &E) -> bool {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|e| e.id() == entity.id()) {
            Some(row) => {
                *row = entity.clone();
                false
            }
            None => {
                rows.push(entity.clone());
                true
            }
        }
    }

    /// IDの行を書き換える。行が見つかったら`true`
    pub async fn update(&self, id: E::Id, f: impl FnOnce(&mut E)) -> bool {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|e| e.id() == id) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }

    /// 条件に合う行を削除する。1行でも消えたら`true`
    pub async fn remove_by(&self, f: impl Fn(&E) -> bool) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|e| !f(e));
        rows.len() < before
    }

    pub async fn select(&self, f: impl Fn(&E) -> bool) -> Vec<E> {
        self.rows.read().await.iter().filter(|e| f(e)).cloned().collect()
    }

    pub async fn count(&self, f: impl Fn(&E) -> bool) -> usize {
        self.rows.read().await.iter().filter(|e| f(e)).count()
    }
}

/// メモリ上の予約リポジトリ
#[derive(Default)]
pub struct InMemoryReservationRepository {
    store: InMemoryStore<Reservation>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError> {
        Ok(self.store.find_by_id(id).await)
    }

    async fn find_active_by_asset_with_end_after(
        &self,
        asset_id: AssetId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, DataAccessError> {
        Ok(self
            .store
            .select(|r| r.is_active() && r.asset().id() == asset_id && r.interval().end() > instant)
            .await)
    }

    async fn count_by_user_created_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<usize, DataAccessError> {
        // 非アクティブの予約も数に入れる
        Ok(self
            .store
            .count(|r| r.user().id() == user_id && from <= r.created_at() && r.created_at() <= to)
            .await)
    }

    async fn save(&self, entity: &Reservation) -> Result<bool, DataAccessError> {
        Ok(self.store.upsert(entity).await)
    }

    async fn delete(&self, id: ReservationId) -> Result<bool, DataAccessError> {
        Ok(self.store.update(id, |r| r.deactivate()).await)
    }
}

/// メモリ上の営業時間表リポジトリ
#[derive(Default)]
pub struct InMemoryTimetableRepository {
    store: InMemoryStore<Timetable>,
}

#[async_trait]
impl TimetableRepository for InMemoryTimetableRepository {
    async fn find_by_gym(&self, gym_id: GymId) -> Result<Option<Timetable>, DataAccessError> {
        Ok(self
            .store
            .select(|t| t.gym_id() == gym_id)
            .await
            .into_iter()
            .next())
    }

    async fn save(&self, entity: &Timetable) -> Result<bool, DataAccessError> {
        // ジムごとに1つ。既存の表は丸ごと置き換える
        self.store
            .remove_by(|t| t.gym_id() == entity.gym_id() && t.id() != entity.id())
            .await;
        Ok(self.store.upsert(entity).await)
    }

    async fn delete_by_gym(&self, gym_id: GymId) -> Result<bool, DataAccessError> {
        Ok(self.store.remove_by(|t| t.gym_id() == gym_id).await)
    }
}
