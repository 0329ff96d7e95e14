//! `SQLite` implementation of the [`Storage`] and [`PlaceAmenities`] ports.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};

use hbnb_app::ports::{PlaceAmenities, Storage};
use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::kind::{ObjectKey, ObjectKind};
use hbnb_domain::object::{Object, Registry};
use hbnb_domain::place::Place;
use hbnb_domain::review::Review;
use hbnb_domain::state::State;
use hbnb_domain::user::User;

use crate::error::StorageError;
use crate::pool;
use crate::rows::{Wrapper, stamp};

const UPSERT_STATE: &str = r"
    INSERT INTO states (id, created_at, updated_at, name)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at, name = excluded.name
";

const UPSERT_CITY: &str = r"
    INSERT INTO cities (id, created_at, updated_at, state_id, name)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at,
        state_id = excluded.state_id, name = excluded.name
";

const UPSERT_AMENITY: &str = r"
    INSERT INTO amenities (id, created_at, updated_at, name)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at, name = excluded.name
";

const UPSERT_USER: &str = r"
    INSERT INTO users (id, created_at, updated_at, email, password, first_name, last_name)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at,
        email = excluded.email, password = excluded.password,
        first_name = excluded.first_name, last_name = excluded.last_name
";

const UPSERT_PLACE: &str = r"
    INSERT INTO places (id, created_at, updated_at, city_id, user_id, name, description,
                        number_rooms, number_bathrooms, max_guest, price_by_night,
                        latitude, longitude)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at,
        city_id = excluded.city_id, user_id = excluded.user_id, name = excluded.name,
        description = excluded.description, number_rooms = excluded.number_rooms,
        number_bathrooms = excluded.number_bathrooms, max_guest = excluded.max_guest,
        price_by_night = excluded.price_by_night, latitude = excluded.latitude,
        longitude = excluded.longitude
";

const UPSERT_REVIEW: &str = r"
    INSERT INTO reviews (id, created_at, updated_at, place_id, user_id, text)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET created_at = excluded.created_at, updated_at = excluded.updated_at,
        place_id = excluded.place_id, user_id = excluded.user_id, text = excluded.text
";

const CLEAR_PLACE_LINKS: &str = "DELETE FROM place_amenity WHERE place_id = ?";
// Links to amenities that do not exist are dropped rather than failing the
// foreign key.
const RELINK: &str =
    "INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) SELECT ?, id FROM amenities WHERE id = ?";
const LINK: &str = "INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?, ?)";
const UNLINK: &str = "DELETE FROM place_amenity WHERE place_id = ? AND amenity_id = ?";
const SELECT_LINKS_OF_PLACE: &str =
    "SELECT amenity_id FROM place_amenity WHERE place_id = ? ORDER BY rowid";
const SELECT_ALL_LINKS: &str = "SELECT place_id, amenity_id FROM place_amenity ORDER BY rowid";

/// Run `$sql` and decode every row as `$model`, wrapped in [`Object`].
macro_rules! fetch_objects {
    ($model:ty, $pool:expr, $sql:expr $(, $bind:expr)*) => {{
        let rows: Vec<Wrapper<$model>> = sqlx::query_as($sql)
            $(.bind($bind))*
            .fetch_all($pool)
            .await
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Object::from(row.0))
            .collect::<Vec<Object>>()
    }};
}

fn select_all(kind: ObjectKind) -> String {
    format!("SELECT * FROM {} ORDER BY id", kind.collection())
}

fn select_by_id(kind: ObjectKind) -> String {
    format!("SELECT * FROM {} WHERE id = ?", kind.collection())
}

/// `SQLite`-backed object registry. Every write is durable immediately.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new storage using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_kind(&self, kind: ObjectKind) -> Result<Vec<Object>, HbnbError> {
        let sql = select_all(kind);
        let pool = &self.pool;
        Ok(match kind {
            ObjectKind::Amenity => fetch_objects!(Amenity, pool, &sql),
            ObjectKind::City => fetch_objects!(City, pool, &sql),
            ObjectKind::Place => {
                let mut places = fetch_objects!(Place, pool, &sql);
                self.attach_all_links(&mut places).await?;
                places
            }
            ObjectKind::Review => fetch_objects!(Review, pool, &sql),
            ObjectKind::State => fetch_objects!(State, pool, &sql),
            ObjectKind::User => fetch_objects!(User, pool, &sql),
        })
    }

    async fn attach_all_links(&self, places: &mut [Object]) -> Result<(), HbnbError> {
        let links: Vec<(String, String)> = sqlx::query_as(SELECT_ALL_LINKS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut by_place: HashMap<String, Vec<AmenityId>> = HashMap::new();
        for (place_id, amenity_id) in links {
            by_place
                .entry(place_id)
                .or_default()
                .push(AmenityId::from(amenity_id));
        }

        for object in places {
            if let Object::Place(place) = object {
                place.amenity_ids = by_place.remove(place.id.as_str()).unwrap_or_default();
            }
        }
        Ok(())
    }

    async fn write_place(&self, place: &Place) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(UPSERT_PLACE)
            .bind(place.id.as_str())
            .bind(stamp(&place.created_at))
            .bind(stamp(&place.updated_at))
            .bind(place.city_id.as_str())
            .bind(place.user_id.as_str())
            .bind(&place.name)
            .bind(&place.description)
            .bind(i64::from(place.number_rooms))
            .bind(i64::from(place.number_bathrooms))
            .bind(i64::from(place.max_guest))
            .bind(i64::from(place.price_by_night))
            .bind(place.latitude)
            .bind(place.longitude)
            .execute(&mut *tx)
            .await?;

        relink(&mut tx, place).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Replace the stored links of `place` with its `amenity_ids`.
async fn relink(tx: &mut Transaction<'_, Sqlite>, place: &Place) -> Result<(), sqlx::Error> {
    sqlx::query(CLEAR_PLACE_LINKS)
        .bind(place.id.as_str())
        .execute(&mut **tx)
        .await?;
    for amenity_id in &place.amenity_ids {
        sqlx::query(RELINK)
            .bind(place.id.as_str())
            .bind(amenity_id.as_str())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

impl Storage for SqliteStorage {
    async fn all(&self, kind: Option<ObjectKind>) -> Result<Registry, HbnbError> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => ObjectKind::ALL.to_vec(),
        };

        let mut registry = Registry::new();
        for kind in kinds {
            for object in self.fetch_kind(kind).await? {
                registry.insert(object.key(), object);
            }
        }
        Ok(registry)
    }

    async fn get(&self, kind: ObjectKind, id: &str) -> Result<Option<Object>, HbnbError> {
        let sql = select_by_id(kind);
        let pool = &self.pool;
        let mut found = match kind {
            ObjectKind::Amenity => fetch_objects!(Amenity, pool, &sql, id),
            ObjectKind::City => fetch_objects!(City, pool, &sql, id),
            ObjectKind::Place => fetch_objects!(Place, pool, &sql, id),
            ObjectKind::Review => fetch_objects!(Review, pool, &sql, id),
            ObjectKind::State => fetch_objects!(State, pool, &sql, id),
            ObjectKind::User => fetch_objects!(User, pool, &sql, id),
        };

        let Some(mut object) = found.pop() else {
            return Ok(None);
        };
        if let Object::Place(place) = &mut object {
            place.amenity_ids = self.linked_amenities(&place.id).await?;
        }
        Ok(Some(object))
    }

    async fn insert(&self, object: Object) -> Result<(), HbnbError> {
        let key = object.key();
        match &object {
            Object::State(state) => {
                sqlx::query(UPSERT_STATE)
                    .bind(state.id.as_str())
                    .bind(stamp(&state.created_at))
                    .bind(stamp(&state.updated_at))
                    .bind(&state.name)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
            Object::City(city) => {
                sqlx::query(UPSERT_CITY)
                    .bind(city.id.as_str())
                    .bind(stamp(&city.created_at))
                    .bind(stamp(&city.updated_at))
                    .bind(city.state_id.as_str())
                    .bind(&city.name)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
            Object::Amenity(amenity) => {
                sqlx::query(UPSERT_AMENITY)
                    .bind(amenity.id.as_str())
                    .bind(stamp(&amenity.created_at))
                    .bind(stamp(&amenity.updated_at))
                    .bind(&amenity.name)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
            Object::User(user) => {
                sqlx::query(UPSERT_USER)
                    .bind(user.id.as_str())
                    .bind(stamp(&user.created_at))
                    .bind(stamp(&user.updated_at))
                    .bind(&user.email)
                    .bind(&user.password)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
            Object::Place(place) => self.write_place(place).await?,
            Object::Review(review) => {
                sqlx::query(UPSERT_REVIEW)
                    .bind(review.id.as_str())
                    .bind(stamp(&review.created_at))
                    .bind(stamp(&review.updated_at))
                    .bind(review.place_id.as_str())
                    .bind(review.user_id.as_str())
                    .bind(&review.text)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
        }
        tracing::trace!(%key, "row written");
        Ok(())
    }

    async fn count(&self, kind: Option<ObjectKind>) -> Result<usize, HbnbError> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => ObjectKind::ALL.to_vec(),
        };

        let mut total = 0;
        for kind in kinds {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.collection());
            let (count,): (i64,) = sqlx::query_as(&sql)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::from)?;
            total += usize::try_from(count).unwrap_or_default();
        }
        Ok(total)
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), HbnbError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", key.kind().collection());
        sqlx::query(&sql)
            .bind(key.id())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        Ok(())
    }

    async fn reload(&self) -> Result<(), HbnbError> {
        pool::migrate(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        Ok(())
    }
}

impl PlaceAmenities for SqliteStorage {
    async fn linked_amenities(&self, place: &PlaceId) -> Result<Vec<AmenityId>, HbnbError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_LINKS_OF_PLACE)
            .bind(place.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|(id,)| AmenityId::from(id)).collect())
    }

    async fn link(&self, place: &PlaceId, amenity: &AmenityId) -> Result<bool, HbnbError> {
        let result = sqlx::query(LINK)
            .bind(place.as_str())
            .bind(amenity.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn unlink(&self, place: &PlaceId, amenity: &AmenityId) -> Result<bool, HbnbError> {
        let result = sqlx::query(UNLINK)
            .bind(place.as_str())
            .bind(amenity.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use hbnb_domain::id::UserId;
    use hbnb_domain::object::Model;

    async fn setup() -> SqliteStorage {
        Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap()
        .storage()
    }

    struct Fixture {
        state: State,
        city: City,
        user: User,
        place: Place,
        wifi: Amenity,
    }

    async fn seed(storage: &SqliteStorage) -> Fixture {
        let state = State::new("California");
        let city = City::new(state.id.clone(), "San Francisco");
        let mut user = User::new("owner@hbnb.io", "pw");
        user.first_name = Some("Betty".to_string());
        let wifi = Amenity::new("Wifi");
        let mut place = Place::new(city.id.clone(), user.id.clone(), "Loft");
        place.number_rooms = 2;
        place.latitude = Some(37.75);
        place.amenity_ids = vec![wifi.id.clone()];

        storage.insert(state.clone().into()).await.unwrap();
        storage.insert(city.clone().into()).await.unwrap();
        storage.insert(user.clone().into()).await.unwrap();
        storage.insert(wifi.clone().into()).await.unwrap();
        storage.insert(place.clone().into()).await.unwrap();

        Fixture {
            state,
            city,
            user,
            place,
            wifi,
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_every_kind() {
        let storage = setup().await;
        let fixture = seed(&storage).await;

        let fetched = storage
            .get(ObjectKind::State, fixture.state.id.as_str())
            .await
            .unwrap();
        assert_eq!(fetched, Some(Object::State(fixture.state)));

        let fetched = storage
            .get(ObjectKind::User, fixture.user.id.as_str())
            .await
            .unwrap();
        assert_eq!(fetched, Some(Object::User(fixture.user)));

        let fetched = storage
            .get(ObjectKind::Place, fixture.place.id.as_str())
            .await
            .unwrap();
        assert_eq!(fetched, Some(Object::Place(fixture.place)));
    }

    #[tokio::test]
    async fn should_return_none_when_object_not_found() {
        let storage = setup().await;
        let result = storage.get(ObjectKind::City, "missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_objects_keyed_by_composite_key() {
        let storage = setup().await;
        let fixture = seed(&storage).await;

        let all = storage.all(None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(storage.count(None).await.unwrap(), all.len());
        assert_eq!(all[&fixture.city.key()], Object::City(fixture.city));

        let places = storage.all(Some(ObjectKind::Place)).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[&fixture.place.key()], Object::Place(fixture.place));
    }

    #[tokio::test]
    async fn should_count_per_kind() {
        let storage = setup().await;
        seed(&storage).await;
        storage.insert(State::new("Nevada").into()).await.unwrap();

        assert_eq!(storage.count(Some(ObjectKind::State)).await.unwrap(), 2);
        assert_eq!(storage.count(Some(ObjectKind::Review)).await.unwrap(), 0);
        assert_eq!(storage.count(None).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn should_upsert_existing_row_without_dropping_children() {
        let storage = setup().await;
        let mut fixture = seed(&storage).await;

        fixture.state.name = "Golden State".to_string();
        storage.insert(fixture.state.clone().into()).await.unwrap();

        assert_eq!(storage.count(Some(ObjectKind::State)).await.unwrap(), 1);
        assert_eq!(storage.count(Some(ObjectKind::City)).await.unwrap(), 1);
        let fetched = storage
            .get(ObjectKind::State, fixture.state.id.as_str())
            .await
            .unwrap();
        assert_eq!(fetched, Some(Object::State(fixture.state)));
    }

    #[tokio::test]
    async fn should_cascade_delete_to_dependents() {
        let storage = setup().await;
        let fixture = seed(&storage).await;
        let review = Review::new(fixture.place.id.clone(), fixture.user.id.clone(), "Great");
        storage.insert(review.clone().into()).await.unwrap();

        storage.delete(&fixture.state.key()).await.unwrap();

        assert_eq!(storage.count(Some(ObjectKind::City)).await.unwrap(), 0);
        assert_eq!(storage.count(Some(ObjectKind::Place)).await.unwrap(), 0);
        assert_eq!(storage.count(Some(ObjectKind::Review)).await.unwrap(), 0);
        assert!(
            storage
                .linked_amenities(&fixture.place.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(storage.count(Some(ObjectKind::User)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_ignore_delete_of_missing_key() {
        let storage = setup().await;
        storage
            .delete(&ObjectKey::new(ObjectKind::Amenity, "missing"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn should_rewrite_links_when_place_is_inserted_again() {
        let storage = setup().await;
        let mut fixture = seed(&storage).await;
        let pool = Amenity::new("Pool");
        storage.insert(pool.clone().into()).await.unwrap();

        fixture.place.amenity_ids = vec![pool.id.clone(), AmenityId::from("ghost")];
        storage.insert(fixture.place.clone().into()).await.unwrap();

        assert_eq!(
            storage.linked_amenities(&fixture.place.id).await.unwrap(),
            vec![pool.id]
        );
    }

    #[tokio::test]
    async fn should_link_and_unlink_amenity() {
        let storage = setup().await;
        let fixture = seed(&storage).await;
        let pool = Amenity::new("Pool");
        storage.insert(pool.clone().into()).await.unwrap();

        assert!(storage.link(&fixture.place.id, &pool.id).await.unwrap());
        assert!(!storage.link(&fixture.place.id, &pool.id).await.unwrap());
        assert_eq!(
            storage.linked_amenities(&fixture.place.id).await.unwrap(),
            vec![fixture.wifi.id.clone(), pool.id.clone()]
        );

        assert!(storage.unlink(&fixture.place.id, &pool.id).await.unwrap());
        assert!(!storage.unlink(&fixture.place.id, &pool.id).await.unwrap());
        assert_eq!(
            storage.linked_amenities(&fixture.place.id).await.unwrap(),
            vec![fixture.wifi.id]
        );
    }

    #[tokio::test]
    async fn should_reject_place_with_unknown_owner() {
        let storage = setup().await;
        let fixture = seed(&storage).await;
        let orphan = Place::new(fixture.city.id.clone(), UserId::from("ghost"), "Shed");

        let result = storage.insert(orphan.into()).await;
        assert!(matches!(result, Err(HbnbError::Storage(_))));
    }

    #[tokio::test]
    async fn should_keep_data_across_save_reload_and_close() {
        let storage = setup().await;
        seed(&storage).await;

        storage.save().await.unwrap();
        storage.reload().await.unwrap();
        storage.close().await.unwrap();

        assert_eq!(storage.count(None).await.unwrap(), 5);
    }
}
