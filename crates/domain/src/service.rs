use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, Credentials, DeleteError, ReadError, SessionRepository, SessionService, Setting,
    SettingKey, SettingRepository, SettingService, SettingValue, UpdateError, User,
    VersionRepository, VersionService, Workout, WorkoutEntry, WorkoutID, WorkoutRepository,
    WorkoutService, rest_day_warning,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: VersionRepository> VersionService for Service<R> {
    async fn get_version(&self) -> Result<String, ReadError> {
        log_on_error!(self.repository.read_version(), ReadError, "get", "version")
    }
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.request_session(credentials),
            ReadError,
            "request",
            "session"
        )
    }

    async fn register_user(&self, credentials: Credentials) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.register_user(credentials),
            CreateError,
            "register",
            "user"
        )
    }

    async fn get_session(&self) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.initialize_session(),
            ReadError,
            "get",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        let workouts = self.get_workouts().await?;
        workouts
            .into_iter()
            .find(|w| w.id == id)
            .ok_or(ReadError::NotFound)
    }

    async fn get_workout_on(&self, date: NaiveDate) -> Result<Workout, ReadError> {
        let workouts = self.get_workouts().await?;
        workouts
            .into_iter()
            .find(|w| w.date() == date)
            .ok_or(ReadError::NotFound)
    }

    async fn create_workout(&self, entry: WorkoutEntry) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(entry),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn modify_workout(
        &self,
        id: WorkoutID,
        entry: WorkoutEntry,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.modify_workout(id, entry),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: SettingRepository> SettingService for Service<R> {
    async fn get_settings(&self) -> Result<Vec<Setting>, ReadError> {
        log_on_error!(
            self.repository.read_settings(),
            ReadError,
            "get",
            "settings"
        )
    }

    async fn get_rest_day_warning(&self) -> Result<u32, ReadError> {
        Ok(rest_day_warning(&self.get_settings().await?))
    }

    async fn set_rest_day_warning(&self, days: u32) -> Result<Setting, UpdateError> {
        let settings = self.get_settings().await?;
        let value = SettingValue::Integer(i64::from(days));
        match settings
            .iter()
            .find(|s| s.key == SettingKey::RestDayWarning)
        {
            Some(setting) => {
                log_on_error!(
                    self.repository.modify_setting(setting.id, value),
                    UpdateError,
                    "modify",
                    "setting"
                )
            }
            None => {
                let result = log_on_error!(
                    self.repository
                        .create_setting(SettingKey::RestDayWarning, value),
                    CreateError,
                    "create",
                    "setting"
                );
                Ok(result?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use crate::{MuscleGroup, Notes, SettingID, StorageError};

    use super::*;

    struct FakeRepository {
        workouts: Vec<Workout>,
        settings: RefCell<Vec<Setting>>,
        connected: bool,
    }

    impl FakeRepository {
        fn new() -> Self {
            Self {
                workouts: vec![],
                settings: RefCell::new(vec![]),
                connected: true,
            }
        }

        fn with_workouts(workouts: Vec<Workout>) -> Self {
            Self {
                workouts,
                settings: RefCell::new(vec![]),
                connected: true,
            }
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            if self.connected {
                Ok(self.workouts.clone())
            } else {
                Err(ReadError::Storage(StorageError::NoConnection))
            }
        }

        async fn create_workout(&self, entry: WorkoutEntry) -> Result<Workout, CreateError> {
            Ok(workout_with_entry(99, entry))
        }

        async fn modify_workout(
            &self,
            id: WorkoutID,
            entry: WorkoutEntry,
        ) -> Result<Workout, UpdateError> {
            let mut workout = workout_with_entry(0, entry);
            workout.id = id;
            Ok(workout)
        }

        async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
            Ok(id)
        }
    }

    impl SettingRepository for FakeRepository {
        async fn read_settings(&self) -> Result<Vec<Setting>, ReadError> {
            Ok(self.settings.borrow().clone())
        }

        async fn create_setting(
            &self,
            key: SettingKey,
            value: SettingValue,
        ) -> Result<Setting, CreateError> {
            let setting = Setting {
                id: SettingID::from(1),
                key,
                value,
            };
            self.settings.borrow_mut().push(setting.clone());
            Ok(setting)
        }

        async fn modify_setting(
            &self,
            id: SettingID,
            value: SettingValue,
        ) -> Result<Setting, UpdateError> {
            let mut settings = self.settings.borrow_mut();
            let setting = settings
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(UpdateError::Other("not found".into()))?;
            setting.value = value;
            Ok(setting.clone())
        }
    }

    fn workout_with_entry(id: u128, entry: WorkoutEntry) -> Workout {
        Workout {
            id: WorkoutID::from(id),
            entry,
            created: DateTime::<Utc>::default(),
            updated: DateTime::<Utc>::default(),
        }
    }

    fn chest_workout(id: u128, date: NaiveDate) -> Workout {
        workout_with_entry(
            id,
            WorkoutEntry::new(
                date,
                BTreeSet::from([MuscleGroup::Chest]),
                Notes::default(),
                false,
                false,
                None,
            )
            .unwrap(),
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_get_workout() {
        let service = Service::new(FakeRepository::with_workouts(vec![
            chest_workout(1, date(2024, 1, 1)),
            chest_workout(2, date(2024, 1, 2)),
        ]));

        let workout = pollster_block_on(service.get_workout(WorkoutID::from(2))).unwrap();
        assert_eq!(workout.id, WorkoutID::from(2));

        assert!(matches!(
            pollster_block_on(service.get_workout(WorkoutID::from(3))),
            Err(ReadError::NotFound)
        ));
    }

    #[test]
    fn test_get_workout_on() {
        let service = Service::new(FakeRepository::with_workouts(vec![
            chest_workout(1, date(2024, 1, 1)),
            chest_workout(2, date(2024, 1, 2)),
        ]));

        let workout = pollster_block_on(service.get_workout_on(date(2024, 1, 2))).unwrap();
        assert_eq!(workout.id, WorkoutID::from(2));

        assert!(matches!(
            pollster_block_on(service.get_workout_on(date(2024, 1, 3))),
            Err(ReadError::NotFound)
        ));
    }

    #[test]
    fn test_set_rest_day_warning_creates_and_modifies() {
        let service = Service::new(FakeRepository::new());

        assert_eq!(
            pollster_block_on(service.get_rest_day_warning()).unwrap(),
            crate::REST_DAY_WARNING_DEFAULT
        );

        let setting = pollster_block_on(service.set_rest_day_warning(5)).unwrap();
        assert_eq!(setting.value, SettingValue::Integer(5));
        assert_eq!(pollster_block_on(service.get_rest_day_warning()).unwrap(), 5);

        let setting = pollster_block_on(service.set_rest_day_warning(7)).unwrap();
        assert_eq!(setting.value, SettingValue::Integer(7));
        assert_eq!(pollster_block_on(service.get_rest_day_warning()).unwrap(), 7);
    }

    #[test]
    fn test_get_workouts_no_connection() {
        let mut repository = FakeRepository::new();
        repository.connected = false;
        let service = Service::new(repository);

        assert!(matches!(
            pollster_block_on(service.get_workouts()),
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
    }

    // The futures returned by the service are ready immediately in tests, so
    // a trivial executor is sufficient.
    fn pollster_block_on<F: Future>(future: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn raw_waker() -> RawWaker {
            RawWaker::new(
                std::ptr::null(),
                &RawWakerVTable::new(|_| raw_waker(), |_| {}, |_| {}, |_| {}),
            )
        }

        let waker = unsafe { Waker::from_raw(raw_waker()) };
        let mut context = Context::from_waker(&waker);
        let mut future = std::pin::pin!(future);
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => output,
            Poll::Pending => unreachable!("future is not ready"),
        }
    }
}
