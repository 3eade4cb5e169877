#![warn(clippy::pedantic)]

mod credentials;
mod error;
mod muscle_group;
mod notes;
mod service;
mod session;
mod setting;
mod statistics;
mod user;
mod version;
mod workout;

pub use credentials::{Credentials, EmailAddress, EmailAddressError, Password, PasswordError};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use muscle_group::{MuscleGroup, UnknownMuscleGroup};
pub use notes::{Notes, NotesError};
pub use service::Service;
pub use session::{SessionRepository, SessionService};
pub use setting::{
    REST_DAY_WARNING_DEFAULT, Setting, SettingID, SettingKey, SettingRepository, SettingService,
    SettingValue, UnknownSettingKey, rest_day_warning,
};
pub use statistics::{
    MuscleGroupStats, days_since_last_trained, last_trained, monthly_count, muscle_group_stats,
    overdue, weekly_count,
};
pub use user::{User, UserID};
pub use version::{VersionRepository, VersionService};
pub use workout::{
    CardioActivity, CardioActivityError, CardioSession, CompletionStatus, Workout, WorkoutEntry,
    WorkoutError, WorkoutID, WorkoutRepository, WorkoutService,
};
