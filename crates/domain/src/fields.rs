//! Building and patching entities from client field maps.

use serde_json::Value;

use crate::error::{HbnbError, ValidationError};
use crate::object::{Fields, Model};
use crate::time;

/// Fields owned by the system: never taken from a client payload.
const MANAGED: [&str; 3] = ["id", "created_at", "updated_at"];

/// Check that every name in `required` is present, reporting the first one
/// missing.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming the first absent field.
pub fn require(fields: &Fields, required: &[&'static str]) -> Result<(), ValidationError> {
    match required.iter().find(|name| !fields.contains_key(**name)) {
        Some(name) => Err(ValidationError::MissingField(*name)),
        None => Ok(()),
    }
}

/// Build a new `M` from a client payload.
///
/// Required fields are checked first. Client-supplied `id` and timestamps are
/// replaced by fresh ones and unknown keys are ignored.
///
/// # Errors
///
/// Returns [`HbnbError::Validation`] when a required field is missing or a
/// field has the wrong type.
pub fn from_fields<M: Model>(mut fields: Fields) -> Result<M, HbnbError> {
    require(&fields, M::REQUIRED)?;

    let stamp = Value::String(time::format(&time::now()));
    fields.insert(
        "id".to_string(),
        Value::String(uuid::Uuid::new_v4().to_string()),
    );
    fields.insert("created_at".to_string(), stamp.clone());
    fields.insert("updated_at".to_string(), stamp);

    let model = serde_json::from_value(Value::Object(fields)).map_err(ValidationError::InvalidField)?;
    Ok(model)
}

/// Return a copy of `current` with `changes` applied and `updated_at`
/// refreshed.
///
/// `id`, the timestamps and the kind's immutable fields are skipped silently.
///
/// # Errors
///
/// Returns [`HbnbError::Validation`] when a changed field has the wrong type.
pub fn apply_changes<M: Model>(current: &M, changes: &Fields) -> Result<M, HbnbError> {
    let mut value = serde_json::to_value(current).map_err(ValidationError::InvalidField)?;
    if let Value::Object(fields) = &mut value {
        for (name, change) in changes {
            if MANAGED.contains(&name.as_str()) || M::IMMUTABLE.contains(&name.as_str()) {
                continue;
            }
            fields.insert(name.clone(), change.clone());
        }
    }

    let mut updated: M = serde_json::from_value(value).map_err(ValidationError::InvalidField)?;
    updated.touch();
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::id::{CityId, StateId, UserId};
    use crate::place::Place;
    use crate::state::State;
    use crate::user::User;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn should_build_state_with_fresh_identity() {
        let state: State = from_fields(fields(json!({"name": "California"}))).unwrap();
        assert_eq!(state.name, "California");
        assert_eq!(state.created_at, state.updated_at);
        assert!(uuid::Uuid::parse_str(state.id.as_str()).is_ok());
    }

    #[test]
    fn should_report_missing_name() {
        let result = from_fields::<State>(Fields::new());
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[test]
    fn should_report_first_missing_field_in_declared_order() {
        let result = from_fields::<User>(fields(json!({"password": "pw"})));
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("email")))
        ));

        let result = from_fields::<Place>(fields(json!({"city_id": "c1"})));
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[test]
    fn should_ignore_client_supplied_id_and_unknown_keys() {
        let state: State =
            from_fields(fields(json!({"name": "Texas", "id": "mine", "color": "red"}))).unwrap();
        assert_ne!(state.id.as_str(), "mine");
    }

    #[test]
    fn should_reject_wrong_field_type() {
        let result = from_fields::<State>(fields(json!({"name": 12})));
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::InvalidField(_)))
        ));
    }

    #[test]
    fn should_keep_optional_place_fields_from_payload() {
        let place: Place = from_fields(fields(json!({
            "name": "Loft",
            "user_id": "u1",
            "city_id": "c1",
            "number_rooms": 3,
            "latitude": 37.77,
        })))
        .unwrap();
        assert_eq!(place.number_rooms, 3);
        assert_eq!(place.latitude, Some(37.77));
        assert_eq!(place.city_id, CityId::from("c1"));
    }

    #[test]
    fn should_apply_changes_and_refresh_updated_at() {
        let state = State::new("Calfornia");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = apply_changes(&state, &fields(json!({"name": "California"}))).unwrap();
        assert_eq!(updated.name, "California");
        assert_eq!(updated.id, state.id);
        assert_eq!(updated.created_at, state.created_at);
        assert!(updated.updated_at > state.updated_at);
    }

    #[test]
    fn should_skip_managed_and_immutable_fields() {
        let city = City::new(StateId::from("s1"), "Fresno");
        let updated = apply_changes(
            &city,
            &fields(json!({
                "id": "other",
                "created_at": "2000-01-01T00:00:00Z",
                "state_id": "s2",
                "name": "Reno",
            })),
        )
        .unwrap();
        assert_eq!(updated.id, city.id);
        assert_eq!(updated.created_at, city.created_at);
        assert_eq!(updated.state_id, StateId::from("s1"));
        assert_eq!(updated.name, "Reno");
    }

    #[test]
    fn should_keep_place_owner_on_update() {
        let place = Place::new(CityId::from("c1"), UserId::from("u1"), "Loft");
        let updated = apply_changes(
            &place,
            &fields(json!({"user_id": "u2", "amenity_ids": ["a1"], "max_guest": 4})),
        )
        .unwrap();
        assert_eq!(updated.user_id, UserId::from("u1"));
        assert!(updated.amenity_ids.is_empty());
        assert_eq!(updated.max_guest, 4);
    }
}
