//! REST
//!
//! All persistent data lives on a remote backend which is reached via a JSON
//! API under `api/`. The browser session cookie authenticates every request,
//! so no credentials are stored on the device.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use gloo_net::http::{Request, Response};
use log::{debug, warn};
use robur_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<T, RequestError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| RequestError::Other(err.to_string()))
    }

    async fn fetch_no_content(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<(), RequestError> {
        self.send(request).await?;
        Ok(())
    }

    async fn send(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<Response, RequestError> {
        let request = request.map_err(|err| RequestError::Other(err.to_string()))?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| RequestError::NoConnection)?;
        if response.ok() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(request_error(response.status(), &body))
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
enum RequestError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("{0}")]
    MissingIndex(String),
    #[error("{0}")]
    Other(String),
}

fn request_error(status: u16, body: &str) -> RequestError {
    match status {
        401 | 403 => RequestError::NoSession,
        404 => RequestError::NotFound,
        409 => RequestError::Conflict,
        _ => {
            if body.to_lowercase().contains("index") {
                RequestError::MissingIndex(body.to_string())
            } else {
                RequestError::Other(format!("status {status}: {body}"))
            }
        }
    }
}

impl From<RequestError> for domain::ReadError {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NoConnection => Self::Storage(domain::StorageError::NoConnection),
            RequestError::NoSession => Self::Storage(domain::StorageError::NoSession),
            RequestError::NotFound => Self::NotFound,
            RequestError::MissingIndex(message) => {
                Self::Storage(domain::StorageError::MissingIndex(message))
            }
            RequestError::Conflict | RequestError::Other(_) => {
                Self::Other(value.to_string().into())
            }
        }
    }
}

impl From<RequestError> for domain::CreateError {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NoConnection => Self::Storage(domain::StorageError::NoConnection),
            RequestError::NoSession => Self::Storage(domain::StorageError::NoSession),
            RequestError::Conflict => Self::Conflict,
            RequestError::MissingIndex(message) => {
                Self::Storage(domain::StorageError::MissingIndex(message))
            }
            RequestError::NotFound | RequestError::Other(_) => {
                Self::Other(value.to_string().into())
            }
        }
    }
}

impl From<RequestError> for domain::UpdateError {
    fn from(value: RequestError) -> Self {
        domain::UpdateError::from(domain::CreateError::from(value))
    }
}

impl From<RequestError> for domain::DeleteError {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NoConnection => Self::Storage(domain::StorageError::NoConnection),
            RequestError::NoSession => Self::Storage(domain::StorageError::NoSession),
            RequestError::MissingIndex(message) => {
                Self::Storage(domain::StorageError::MissingIndex(message))
            }
            RequestError::NotFound | RequestError::Conflict | RequestError::Other(_) => {
                Self::Other(value.to_string().into())
            }
        }
    }
}

impl<S: SendRequest> domain::SessionRepository for REST<S> {
    async fn request_session(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::ReadError> {
        let user: User = self
            .fetch(Request::post("api/session").json(&SessionData::from(&credentials)))
            .await?;
        domain::User::try_from(user).map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn register_user(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::CreateError> {
        let user: User = self
            .fetch(Request::post("api/users").json(&SessionData::from(&credentials)))
            .await?;
        domain::User::try_from(user).map_err(|err| domain::CreateError::Other(err.into()))
    }

    async fn initialize_session(&self) -> Result<domain::User, domain::ReadError> {
        let user: User = self.fetch(Request::get("api/session").build()).await?;
        domain::User::try_from(user).map_err(|err| domain::ReadError::Other(err.into()))
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete("api/session").build())
            .await?)
    }
}

impl<S: SendRequest> domain::VersionRepository for REST<S> {
    async fn read_version(&self) -> Result<String, domain::ReadError> {
        Ok(self.fetch(Request::get("api/version").build()).await?)
    }
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let workouts: Vec<Workout> = self.fetch(Request::get("api/workouts").build()).await?;
        Ok(workouts
            .into_iter()
            .filter_map(|workout| match domain::Workout::try_from(workout) {
                Ok(workout) => Some(workout),
                Err(err) => {
                    warn!("skipping malformed workout: {err}");
                    None
                }
            })
            .collect())
    }

    async fn create_workout(
        &self,
        entry: domain::WorkoutEntry,
    ) -> Result<domain::Workout, domain::CreateError> {
        let workout: Workout = self
            .fetch(Request::post("api/workouts").json(&WorkoutData::from(&entry)))
            .await?;
        domain::Workout::try_from(workout).map_err(|err| domain::CreateError::Other(err.into()))
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        entry: domain::WorkoutEntry,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let workout: Workout = self
            .fetch(Request::patch(&format!("api/workouts/{id}")).json(&WorkoutData::from(&entry)))
            .await?;
        domain::Workout::try_from(workout).map_err(|err| domain::UpdateError::Other(err.into()))
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.fetch_no_content(Request::delete(&format!("api/workouts/{id}")).build())
            .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::SettingRepository for REST<S> {
    async fn read_settings(&self) -> Result<Vec<domain::Setting>, domain::ReadError> {
        let settings: Vec<Setting> = self.fetch(Request::get("api/settings").build()).await?;
        Ok(settings
            .into_iter()
            .filter_map(Setting::into_domain)
            .collect())
    }

    async fn create_setting(
        &self,
        key: domain::SettingKey,
        value: domain::SettingValue,
    ) -> Result<domain::Setting, domain::CreateError> {
        let setting: Setting = self
            .fetch(Request::post("api/settings").json(&SettingData::new(key, &value)))
            .await?;
        setting
            .into_domain()
            .ok_or(domain::CreateError::Other("malformed setting".into()))
    }

    async fn modify_setting(
        &self,
        id: domain::SettingID,
        value: domain::SettingValue,
    ) -> Result<domain::Setting, domain::UpdateError> {
        let setting: Setting = self
            .fetch(
                Request::put(&format!("api/settings/{}", *id))
                    .json(&serde_json::json!({ "value": json_value(&value) })),
            )
            .await?;
        setting
            .into_domain()
            .ok_or(domain::UpdateError::Other("malformed setting".into()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub email: String,
    pub password: String,
}

impl From<&domain::Credentials> for SessionData {
    fn from(credentials: &domain::Credentials) -> Self {
        Self {
            email: credentials.email.to_string(),
            password: credentials.password.as_ref().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl TryFrom<User> for domain::User {
    type Error = domain::EmailAddressError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(domain::User {
            id: user.id.into(),
            email: domain::EmailAddress::new(&user.email)?,
            display_name: user.display_name,
        })
    }
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: *user.id,
            email: user.email.to_string(),
            display_name: user.display_name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub cardio_details: Option<CardioDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardioDetails {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub distance: Option<f32>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("invalid notes: {0}")]
    Notes(#[from] domain::NotesError),
    #[error("invalid cardio activity: {0}")]
    CardioActivity(#[from] domain::CardioActivityError),
    #[error("invalid workout: {0}")]
    Workout(#[from] domain::WorkoutError),
}

impl TryFrom<Workout> for domain::Workout {
    type Error = DataError;

    fn try_from(workout: Workout) -> Result<Self, Self::Error> {
        // Unknown muscle groups may have been written by a newer schema
        // version and are skipped rather than rejected.
        let mut muscle_groups = workout
            .muscle_groups
            .iter()
            .filter_map(|name| match name.parse::<domain::MuscleGroup>() {
                Ok(muscle_group) => Some(muscle_group),
                Err(domain::UnknownMuscleGroup(name)) => {
                    warn!("skipping unknown muscle group: {name}");
                    None
                }
            })
            .collect::<BTreeSet<_>>();

        let cardio = workout
            .cardio_details
            .map(|details| -> Result<domain::CardioSession, DataError> {
                Ok(domain::CardioSession {
                    activity: domain::CardioActivity::new(&details.kind)?,
                    duration: details.duration,
                    distance: details.distance,
                    calories: details.calories,
                    notes: domain::Notes::new(&details.notes)?,
                })
            })
            .transpose()?;

        if cardio.is_some() {
            muscle_groups.insert(domain::MuscleGroup::Cardio);
        } else if muscle_groups.remove(&domain::MuscleGroup::Cardio) {
            warn!("dropping cardio muscle group without cardio details");
        }

        let notes = domain::Notes::new(&workout.notes)?;

        let entry = if workout.is_rest_day {
            domain::WorkoutEntry::rest_day(workout.date, notes, workout.completed)
        } else {
            domain::WorkoutEntry::new(
                workout.date,
                muscle_groups,
                notes,
                workout.completed,
                false,
                cardio,
            )?
        };

        Ok(domain::Workout {
            id: workout.id.into(),
            entry,
            created: workout.created_at,
            updated: workout.updated_at,
        })
    }
}

impl From<domain::Workout> for Workout {
    fn from(workout: domain::Workout) -> Self {
        let data = WorkoutData::from(&workout.entry);
        Self {
            id: *workout.id,
            date: data.date,
            muscle_groups: data.muscle_groups,
            notes: data.notes,
            completed: data.completed,
            is_rest_day: data.is_rest_day,
            cardio_details: data.cardio_details,
            created_at: workout.created,
            updated_at: workout.updated,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutData {
    pub date: NaiveDate,
    pub muscle_groups: Vec<String>,
    pub notes: String,
    pub completed: bool,
    pub is_rest_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardio_details: Option<CardioDetails>,
}

impl From<&domain::WorkoutEntry> for WorkoutData {
    fn from(entry: &domain::WorkoutEntry) -> Self {
        Self {
            date: entry.date(),
            muscle_groups: entry
                .muscle_groups()
                .iter()
                .map(ToString::to_string)
                .collect(),
            notes: entry.notes().to_string(),
            completed: entry.completed(),
            is_rest_day: entry.is_rest_day(),
            cardio_details: entry.cardio().map(|cardio| CardioDetails {
                kind: cardio.activity.to_string(),
                duration: cardio.duration,
                distance: cardio.distance,
                calories: cardio.calories,
                notes: cardio.notes.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: serde_json::Value,
}

impl Setting {
    /// Settings with keys or value types unknown to this app version are
    /// skipped rather than rejected.
    fn into_domain(self) -> Option<domain::Setting> {
        let key = match self.key.parse::<domain::SettingKey>() {
            Ok(key) => key,
            Err(domain::UnknownSettingKey(key)) => {
                debug!("skipping unknown setting key: {key}");
                return None;
            }
        };
        let value = match &self.value {
            serde_json::Value::Bool(value) => domain::SettingValue::Boolean(*value),
            serde_json::Value::Number(value) => {
                domain::SettingValue::Integer(value.as_i64().or_else(|| {
                    debug!("skipping non-integer setting value: {value}");
                    None
                })?)
            }
            serde_json::Value::String(value) => domain::SettingValue::Text(value.clone()),
            _ => {
                debug!("skipping unsupported setting value: {}", self.value);
                return None;
            }
        };
        Some(domain::Setting {
            id: self.id.into(),
            key,
            value,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SettingData {
    pub key: String,
    pub value: serde_json::Value,
}

impl SettingData {
    fn new(key: domain::SettingKey, value: &domain::SettingValue) -> Self {
        Self {
            key: key.to_string(),
            value: json_value(value),
        }
    }
}

fn json_value(value: &domain::SettingValue) -> serde_json::Value {
    match value {
        domain::SettingValue::Integer(value) => serde_json::json!(value),
        domain::SettingValue::Boolean(value) => serde_json::json!(value),
        domain::SettingValue::Text(value) => serde_json::json!(value),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn workout_dto() -> Workout {
        Workout {
            id: Uuid::from_u128(1),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            muscle_groups: vec!["chest".to_string(), "arms".to_string()],
            notes: "Bench press".to_string(),
            completed: true,
            is_rest_day: false,
            cardio_details: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    #[rstest]
    #[case::unauthorized(401, "", RequestError::NoSession)]
    #[case::forbidden(403, "", RequestError::NoSession)]
    #[case::not_found(404, "", RequestError::NotFound)]
    #[case::conflict(409, "", RequestError::Conflict)]
    #[case::missing_index(
        400,
        "The query requires an index.",
        RequestError::MissingIndex("The query requires an index.".to_string())
    )]
    #[case::other(
        500,
        "internal error",
        RequestError::Other("status 500: internal error".to_string())
    )]
    fn test_request_error(#[case] status: u16, #[case] body: &str, #[case] expected: RequestError) {
        assert_eq!(request_error(status, body), expected);
    }

    #[test]
    fn test_read_error_from_request_error() {
        assert!(matches!(
            domain::ReadError::from(RequestError::NoConnection),
            domain::ReadError::Storage(domain::StorageError::NoConnection)
        ));
        assert!(matches!(
            domain::ReadError::from(RequestError::NotFound),
            domain::ReadError::NotFound
        ));
        assert!(matches!(
            domain::ReadError::from(RequestError::MissingIndex("idx".to_string())),
            domain::ReadError::Storage(domain::StorageError::MissingIndex(message))
                if message == "idx"
        ));
    }

    #[test]
    fn test_create_error_from_request_error() {
        assert!(matches!(
            domain::CreateError::from(RequestError::Conflict),
            domain::CreateError::Conflict
        ));
        assert!(matches!(
            domain::CreateError::from(RequestError::NoSession),
            domain::CreateError::Storage(domain::StorageError::NoSession)
        ));
    }

    #[test]
    fn test_workout_into_domain() {
        let workout = domain::Workout::try_from(workout_dto()).unwrap();

        assert_eq!(workout.id, domain::WorkoutID::from(1));
        assert_eq!(
            *workout.muscle_groups(),
            [domain::MuscleGroup::Chest, domain::MuscleGroup::Arms]
                .into_iter()
                .collect()
        );
        assert_eq!(workout.notes().as_ref(), "Bench press");
        assert!(workout.completed());
        assert!(!workout.is_rest_day());
    }

    #[test]
    fn test_workout_into_domain_skips_unknown_muscle_groups() {
        let mut dto = workout_dto();
        dto.muscle_groups = vec!["chest".to_string(), "neck".to_string()];

        let workout = domain::Workout::try_from(dto).unwrap();

        assert_eq!(
            *workout.muscle_groups(),
            [domain::MuscleGroup::Chest].into_iter().collect()
        );
    }

    #[test]
    fn test_workout_into_domain_rest_day_ignores_muscle_groups() {
        let mut dto = workout_dto();
        dto.is_rest_day = true;

        let workout = domain::Workout::try_from(dto).unwrap();

        assert!(workout.is_rest_day());
        assert!(workout.muscle_groups().is_empty());
    }

    #[test]
    fn test_workout_into_domain_cardio() {
        let mut dto = workout_dto();
        dto.muscle_groups = vec!["cardio".to_string()];
        dto.cardio_details = Some(CardioDetails {
            kind: "Running".to_string(),
            duration: Some(30),
            distance: Some(5.0),
            calories: None,
            notes: String::new(),
        });

        let workout = domain::Workout::try_from(dto).unwrap();
        let cardio = workout.cardio().unwrap();

        assert_eq!(cardio.activity.as_ref(), "Running");
        assert_eq!(cardio.duration, Some(30));
        assert_eq!(cardio.distance, Some(5.0));
        assert_eq!(cardio.calories, None);
    }

    #[test]
    fn test_workout_into_domain_inserts_missing_cardio_group() {
        let mut dto = workout_dto();
        dto.muscle_groups = vec![];
        dto.cardio_details = Some(CardioDetails {
            kind: "Rowing".to_string(),
            duration: None,
            distance: None,
            calories: None,
            notes: String::new(),
        });

        let workout = domain::Workout::try_from(dto).unwrap();

        assert!(
            workout
                .muscle_groups()
                .contains(&domain::MuscleGroup::Cardio)
        );
    }

    #[test]
    fn test_workout_into_domain_drops_cardio_group_without_details() {
        let mut dto = workout_dto();
        dto.muscle_groups = vec!["chest".to_string(), "cardio".to_string()];

        let workout = domain::Workout::try_from(dto).unwrap();

        assert_eq!(
            *workout.muscle_groups(),
            [domain::MuscleGroup::Chest].into_iter().collect()
        );
    }

    #[test]
    fn test_workout_into_domain_no_muscle_groups() {
        let mut dto = workout_dto();
        dto.muscle_groups = vec![];

        assert!(matches!(
            domain::Workout::try_from(dto),
            Err(DataError::Workout(domain::WorkoutError::NoMuscleGroups))
        ));
    }

    #[test]
    fn test_workout_data_from_entry() {
        let entry = domain::WorkoutEntry::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            [domain::MuscleGroup::Back, domain::MuscleGroup::Legs]
                .into_iter()
                .collect(),
            domain::Notes::new("Deadlifts").unwrap(),
            false,
            false,
            None,
        )
        .unwrap();

        let data = WorkoutData::from(&entry);

        assert_eq!(
            data.muscle_groups,
            vec!["legs".to_string(), "back".to_string()]
        );
        assert_eq!(data.notes, "Deadlifts");
        assert!(!data.completed);
        assert!(!data.is_rest_day);
        assert_eq!(data.cardio_details, None);
    }

    #[test]
    fn test_workout_roundtrip() {
        let dto = workout_dto();
        let roundtripped = Workout::from(domain::Workout::try_from(dto.clone()).unwrap());
        assert_eq!(roundtripped, dto);
    }

    #[rstest]
    #[case::integer(serde_json::json!(5), Some(domain::SettingValue::Integer(5)))]
    #[case::boolean(serde_json::json!(true), Some(domain::SettingValue::Boolean(true)))]
    #[case::text(serde_json::json!("weekly"), Some(domain::SettingValue::Text("weekly".to_string())))]
    #[case::float(serde_json::json!(1.5), None)]
    #[case::array(serde_json::json!([1]), None)]
    fn test_setting_into_domain(
        #[case] value: serde_json::Value,
        #[case] expected: Option<domain::SettingValue>,
    ) {
        let setting = Setting {
            id: Uuid::from_u128(1),
            key: "restDayWarning".to_string(),
            value,
        };
        assert_eq!(setting.into_domain().map(|s| s.value), expected);
    }

    #[test]
    fn test_setting_into_domain_unknown_key() {
        let setting = Setting {
            id: Uuid::from_u128(1),
            key: "themeMode".to_string(),
            value: serde_json::json!(5),
        };
        assert_eq!(setting.into_domain(), None);
    }

    #[test]
    fn test_user_conversion() {
        let dto = User {
            id: Uuid::from_u128(1),
            email: "alex@example.com".to_string(),
            display_name: Some("Alex".to_string()),
        };

        let user = domain::User::try_from(dto.clone()).unwrap();
        assert_eq!(user.email.as_ref(), "alex@example.com");
        assert_eq!(User::from(user), dto);

        assert!(
            domain::User::try_from(User {
                id: Uuid::from_u128(1),
                email: "invalid".to_string(),
                display_name: None,
            })
            .is_err()
        );
    }
}
