//! Place service — use-cases for places and the place search.

use std::collections::BTreeSet;
use std::sync::Arc;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields, require};
use hbnb_domain::id::{AmenityId, CityId, StateId, UserId};
use hbnb_domain::object::{Fields, Model};
use hbnb_domain::place::Place;
use hbnb_domain::user::User;
use serde::Deserialize;
use serde_json::Value;

use super::records;
use crate::ports::Storage;

/// Filters accepted by the place search. Every list is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub states: Option<Vec<StateId>>,
    #[serde(default)]
    pub cities: Option<Vec<CityId>>,
    #[serde(default)]
    pub amenities: Option<Vec<AmenityId>>,
}

/// Application service for place CRUD operations and search.
pub struct PlaceService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> PlaceService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the places of a city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city is missing.
    pub async fn list_places(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        let city: City = records::fetch(self.storage.as_ref(), city_id).await?;
        let places: Vec<Place> = records::list(self.storage.as_ref()).await?;
        Ok(places
            .into_iter()
            .filter(|place| place.city_id == city.id)
            .collect())
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no place with `id` exists.
    pub async fn get_place(&self, id: &str) -> Result<Place, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// Create a place in a city for a user.
    ///
    /// The payload is validated (`name`, then `user_id`) before the city and
    /// the user are looked up.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] for a missing field, or
    /// [`HbnbError::NotFound`] when the city or the user is missing.
    pub async fn create_place(&self, city_id: &str, mut fields: Fields) -> Result<Place, HbnbError> {
        require(&fields, Place::REQUIRED)?;
        let user_id: UserId = records::reference(&fields, "user_id")?;

        let city: City = records::fetch(self.storage.as_ref(), city_id).await?;
        let _: User = records::fetch(self.storage.as_ref(), user_id.as_str()).await?;

        fields.insert("city_id".to_string(), Value::String(city.id.to_string()));
        fields.remove("amenity_ids");
        let place: Place = from_fields(fields)?;
        records::persist(self.storage.as_ref(), place).await
    }

    /// Apply `changes` to a place. Owner, city and amenities cannot change.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place is missing.
    pub async fn update_place(&self, id: &str, changes: &Fields) -> Result<Place, HbnbError> {
        let current: Place = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place is missing.
    pub async fn delete_place(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, Place>(self.storage.as_ref(), id).await
    }

    /// Search places by states, cities and amenities.
    ///
    /// Cities of the listed states and the listed cities form one candidate
    /// set. When it is empty every place matches and `amenities` is not
    /// consulted. Otherwise places outside the candidate cities are dropped,
    /// and when `amenities` is non-empty a place must have at least one
    /// amenity and offer every listed one. Unknown ids in any list are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn search_places(&self, filters: SearchFilters) -> Result<Vec<Place>, HbnbError> {
        let storage = self.storage.as_ref();
        let states = filters.states.unwrap_or_default();
        let cities = filters.cities.unwrap_or_default();
        let amenities = filters.amenities.unwrap_or_default();

        let mut city_ids = BTreeSet::new();
        if !states.is_empty() {
            let all_cities: Vec<City> = records::list(storage).await?;
            city_ids.extend(
                all_cities
                    .into_iter()
                    .filter(|city| states.contains(&city.state_id))
                    .map(|city| city.id),
            );
        }
        for city_id in cities {
            if records::find::<_, City>(storage, city_id.as_str())
                .await?
                .is_some()
            {
                city_ids.insert(city_id);
            }
        }

        let mut places: Vec<Place> = records::list(storage).await?;
        if city_ids.is_empty() {
            tracing::debug!(matches = places.len(), "place search without city filter");
            return Ok(places);
        }
        places.retain(|place| city_ids.contains(&place.city_id));

        if !amenities.is_empty() {
            let mut wanted = Vec::with_capacity(amenities.len());
            for amenity_id in amenities {
                if records::find::<_, Amenity>(storage, amenity_id.as_str())
                    .await?
                    .is_some()
                {
                    wanted.push(amenity_id);
                }
            }
            places
                .retain(|place| !place.amenity_ids.is_empty() && place.has_amenities(&wanted));
        }

        tracing::debug!(matches = places.len(), "place search");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStorage;
    use hbnb_domain::error::ValidationError;
    use hbnb_domain::state::State;
    use serde_json::json;

    struct Fixture {
        svc: PlaceService<InMemoryStorage>,
        storage: Arc<InMemoryStorage>,
        user: User,
    }

    impl Fixture {
        async fn new() -> Self {
            let storage = Arc::new(InMemoryStorage::default());
            let user = User::new("owner@hbnb.io", "pw");
            storage.insert(user.clone().into()).await.unwrap();
            Self {
                svc: PlaceService::new(Arc::clone(&storage)),
                storage,
                user,
            }
        }

        async fn add<M: Model>(&self, model: M) -> M {
            self.storage.insert(model.clone().into()).await.unwrap();
            model
        }

        async fn place(&self, city: &City, name: &str, amenities: &[&Amenity]) -> Place {
            let mut place = Place::new(city.id.clone(), self.user.id.clone(), name);
            place.amenity_ids = amenities.iter().map(|a| a.id.clone()).collect();
            self.add(place).await
        }
    }

    fn names(places: &[Place]) -> Vec<&str> {
        let mut names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn should_create_place_for_existing_city_and_user() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;

        let place = fx
            .svc
            .create_place(
                city.id.as_str(),
                json!({"name": "Loft", "user_id": fx.user.id, "number_rooms": 2})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(place.city_id, city.id);
        assert_eq!(place.user_id, fx.user.id);
        assert_eq!(place.number_rooms, 2);
        assert_eq!(fx.svc.list_places(city.id.as_str()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_validate_payload_before_looking_up_city() {
        let fx = Fixture::new().await;

        let result = fx
            .svc
            .create_place("nope", json!({"name": "Loft"}).as_object().cloned().unwrap())
            .await;

        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("user_id")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;

        let result = fx
            .svc
            .create_place(
                city.id.as_str(),
                json!({"name": "Loft", "user_id": "ghost"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await;

        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_every_place_when_filters_empty() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;
        fx.place(&city, "A", &[]).await;
        fx.place(&city, "B", &[]).await;

        let found = fx.svc.search_places(SearchFilters::default()).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn should_union_cities_of_states_with_listed_cities() {
        let fx = Fixture::new().await;
        let california = fx.add(State::new("California")).await;
        let fresno = fx.add(City::new(california.id.clone(), "Fresno")).await;
        let reno = fx.add(City::new("nevada".into(), "Reno")).await;
        let austin = fx.add(City::new("texas".into(), "Austin")).await;
        fx.place(&fresno, "Fresno loft", &[]).await;
        fx.place(&reno, "Reno cabin", &[]).await;
        fx.place(&austin, "Austin flat", &[]).await;

        let found = fx
            .svc
            .search_places(SearchFilters {
                states: Some(vec![california.id.clone()]),
                cities: Some(vec![reno.id.clone(), CityId::from("ghost")]),
                amenities: None,
            })
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["Fresno loft", "Reno cabin"]);
    }

    #[tokio::test]
    async fn should_keep_places_offering_every_amenity() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;
        let wifi = fx.add(Amenity::new("Wifi")).await;
        let pool = fx.add(Amenity::new("Pool")).await;
        fx.place(&city, "Both", &[&wifi, &pool]).await;
        fx.place(&city, "Wifi only", &[&wifi]).await;
        fx.place(&city, "Nothing", &[]).await;

        let found = fx
            .svc
            .search_places(SearchFilters {
                cities: Some(vec![city.id.clone()]),
                amenities: Some(vec![wifi.id.clone(), pool.id.clone()]),
                ..SearchFilters::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Both"]);

        let found = fx
            .svc
            .search_places(SearchFilters {
                cities: Some(vec![city.id.clone()]),
                amenities: Some(vec![wifi.id.clone(), AmenityId::from("ghost")]),
                ..SearchFilters::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Both", "Wifi only"]);
    }

    #[tokio::test]
    async fn should_ignore_amenities_when_no_city_is_selected() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;
        let wifi = fx.add(Amenity::new("Wifi")).await;
        fx.place(&city, "Wifi loft", &[&wifi]).await;
        fx.place(&city, "Bare barn", &[]).await;

        let found = fx
            .svc
            .search_places(SearchFilters {
                amenities: Some(vec![wifi.id.clone()]),
                ..SearchFilters::default()
            })
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["Bare barn", "Wifi loft"]);
    }

    #[tokio::test]
    async fn should_drop_places_without_amenities_when_amenities_requested() {
        let fx = Fixture::new().await;
        let city = fx.add(City::new("s1".into(), "Fresno")).await;
        let wifi = fx.add(Amenity::new("Wifi")).await;
        fx.place(&city, "Wifi loft", &[&wifi]).await;
        fx.place(&city, "Bare barn", &[]).await;

        let found = fx
            .svc
            .search_places(SearchFilters {
                cities: Some(vec![city.id.clone()]),
                amenities: Some(vec![AmenityId::from("ghost")]),
                ..SearchFilters::default()
            })
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["Wifi loft"]);
    }

    #[test]
    fn should_parse_filters_with_null_lists() {
        let filters: SearchFilters =
            serde_json::from_value(json!({"states": null, "amenities": ["a1"]})).unwrap();
        assert!(filters.states.is_none());
        assert!(filters.cities.is_none());
        assert_eq!(filters.amenities.unwrap().len(), 1);
    }
}
