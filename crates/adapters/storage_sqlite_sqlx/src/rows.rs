//! Row decoding for every object table.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::id::{AmenityId, CityId, PlaceId, ReviewId, StateId, UserId};
use hbnb_domain::place::Place;
use hbnb_domain::review::Review;
use hbnb_domain::state::State;
use hbnb_domain::time::{self, Timestamp};
use hbnb_domain::user::User;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
pub(crate) struct Wrapper<T>(pub(crate) T);

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    time::parse(&raw).map_err(decode_error)
}

fn counter(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(decode_error)
}

/// Text form stored in the timestamp columns.
pub(crate) fn stamp(value: &Timestamp) -> String {
    time::format(value)
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper<State> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(State {
            id: StateId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper<City> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let state_id: String = row.try_get("state_id")?;
        Ok(Self(City {
            id: CityId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            state_id: StateId::from(state_id),
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper<Amenity> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(Amenity {
            id: AmenityId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper<User> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(User {
            id: UserId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        }))
    }
}

/// `amenity_ids` lives in `place_amenity` and is filled in by the caller.
impl<'r> FromRow<'r, SqliteRow> for Wrapper<Place> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let city_id: String = row.try_get("city_id")?;
        let user_id: String = row.try_get("user_id")?;
        Ok(Self(Place {
            id: PlaceId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            city_id: CityId::from(city_id),
            user_id: UserId::from(user_id),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            number_rooms: counter(row, "number_rooms")?,
            number_bathrooms: counter(row, "number_bathrooms")?,
            max_guest: counter(row, "max_guest")?,
            price_by_night: counter(row, "price_by_night")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            amenity_ids: Vec::new(),
        }))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper<Review> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let place_id: String = row.try_get("place_id")?;
        let user_id: String = row.try_get("user_id")?;
        Ok(Self(Review {
            id: ReviewId::from(id),
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
            place_id: PlaceId::from(place_id),
            user_id: UserId::from(user_id),
            text: row.try_get("text")?,
        }))
    }
}
