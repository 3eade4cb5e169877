use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, MuscleGroup, Notes, ReadError, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn get_workout_on(&self, date: NaiveDate) -> Result<Workout, ReadError>;
    async fn create_workout(&self, entry: WorkoutEntry) -> Result<Workout, CreateError>;
    async fn modify_workout(&self, id: WorkoutID, entry: WorkoutEntry)
    -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    fn validate_workout_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::Other("Invalid date".into()))
    }

    fn validate_workout_notes(&self, notes: &str) -> Result<Notes, ValidationError> {
        Notes::new(notes).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_cardio_activity(&self, activity: &str) -> Result<CardioActivity, ValidationError> {
        CardioActivity::new(activity).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_cardio_duration(&self, duration: &str) -> Result<Option<u32>, ValidationError> {
        validate_optional_integer(duration, "Duration")
    }

    fn validate_cardio_distance(&self, distance: &str) -> Result<Option<f32>, ValidationError> {
        if distance.trim().is_empty() {
            return Ok(None);
        }
        match distance.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_distance) if parsed_distance > 0.0 => Ok(Some(parsed_distance)),
            Ok(_) => Err(ValidationError::Other(
                "Distance must be a positive decimal number".into(),
            )),
            Err(_) => Err(ValidationError::Other(
                "Distance must be a decimal number".into(),
            )),
        }
    }

    fn validate_cardio_calories(&self, calories: &str) -> Result<Option<u32>, ValidationError> {
        validate_optional_integer(calories, "Calories")
    }
}

fn validate_optional_integer(value: &str, name: &str) -> Result<Option<u32>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    match value.trim().parse::<u32>() {
        Ok(parsed_value) if parsed_value > 0 => Ok(Some(parsed_value)),
        Ok(_) => Err(ValidationError::Other(
            format!("{name} must be a positive whole number").into(),
        )),
        Err(_) => Err(ValidationError::Other(
            format!("{name} must be a whole number").into(),
        )),
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, entry: WorkoutEntry) -> Result<Workout, CreateError>;
    async fn modify_workout(&self, id: WorkoutID, entry: WorkoutEntry)
    -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl fmt::Display for WorkoutID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutID {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

#[derive(Deref, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    #[deref]
    pub entry: WorkoutEntry,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// The user-supplied part of a workout.
///
/// Construction goes through [`WorkoutEntry::new`], which rejects
/// combinations the calendar cannot represent: a rest day carries neither
/// muscle groups nor a cardio session, any other workout has at least one
/// muscle group, and a cardio session and the cardio muscle group only occur
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    date: NaiveDate,
    muscle_groups: BTreeSet<MuscleGroup>,
    notes: Notes,
    completed: bool,
    rest_day: bool,
    cardio: Option<CardioSession>,
}

impl WorkoutEntry {
    pub fn new(
        date: NaiveDate,
        muscle_groups: BTreeSet<MuscleGroup>,
        notes: Notes,
        completed: bool,
        rest_day: bool,
        cardio: Option<CardioSession>,
    ) -> Result<Self, WorkoutError> {
        if rest_day {
            if !muscle_groups.is_empty() {
                return Err(WorkoutError::RestDayWithMuscleGroups);
            }
            if cardio.is_some() {
                return Err(WorkoutError::RestDayWithCardio);
            }
        } else if muscle_groups.is_empty() {
            return Err(WorkoutError::NoMuscleGroups);
        }

        if cardio.is_some() && !muscle_groups.contains(&MuscleGroup::Cardio) {
            return Err(WorkoutError::CardioSessionWithoutGroup);
        }
        if cardio.is_none() && muscle_groups.contains(&MuscleGroup::Cardio) {
            return Err(WorkoutError::CardioGroupWithoutSession);
        }

        Ok(Self {
            date,
            muscle_groups,
            notes,
            completed,
            rest_day,
            cardio,
        })
    }

    #[must_use]
    pub fn rest_day(date: NaiveDate, notes: Notes, completed: bool) -> Self {
        Self {
            date,
            muscle_groups: BTreeSet::new(),
            notes,
            completed,
            rest_day: true,
            cardio: None,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn muscle_groups(&self) -> &BTreeSet<MuscleGroup> {
        &self.muscle_groups
    }

    #[must_use]
    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.rest_day
    }

    #[must_use]
    pub fn cardio(&self) -> Option<&CardioSession> {
        self.cardio.as_ref()
    }

    /// Workouts on past days count as done even if never ticked off.
    #[must_use]
    pub fn effective_completed(&self, today: NaiveDate) -> bool {
        self.date < today || self.completed
    }

    #[must_use]
    pub fn completion_status(&self, today: NaiveDate) -> CompletionStatus {
        if self.date < today {
            if self.rest_day {
                CompletionStatus::Rested
            } else {
                CompletionStatus::Trained
            }
        } else if self.date == today {
            match (self.completed, self.rest_day) {
                (true, true) => CompletionStatus::Rested,
                (true, false) => CompletionStatus::Completed,
                (false, true) => CompletionStatus::PlannedRest,
                (false, false) => CompletionStatus::InProgress,
            }
        } else if self.rest_day {
            CompletionStatus::PlannedRest
        } else {
            CompletionStatus::Planned
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WorkoutError {
    #[error("A rest day must not have muscle groups")]
    RestDayWithMuscleGroups,
    #[error("A rest day must not have a cardio session")]
    RestDayWithCardio,
    #[error("At least one muscle group must be selected")]
    NoMuscleGroups,
    #[error("A cardio session requires the cardio muscle group")]
    CardioSessionWithoutGroup,
    #[error("The cardio muscle group requires a cardio session")]
    CardioGroupWithoutSession,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardioSession {
    pub activity: CardioActivity,
    pub duration: Option<u32>,
    pub distance: Option<f32>,
    pub calories: Option<u32>,
    pub notes: Notes,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CardioActivity(String);

impl CardioActivity {
    pub const MAX_LEN: usize = 64;

    pub fn new(activity: &str) -> Result<Self, CardioActivityError> {
        let trimmed_activity = activity.trim();

        if trimmed_activity.is_empty() {
            return Err(CardioActivityError::Empty);
        }

        let len = trimmed_activity.chars().count();

        if len > Self::MAX_LEN {
            return Err(CardioActivityError::TooLong(len));
        }

        Ok(CardioActivity(trimmed_activity.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CardioActivityError {
    #[error("Activity must not be empty")]
    Empty,
    #[error("Activity must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    Trained,
    Rested,
    Completed,
    InProgress,
    Planned,
    PlannedRest,
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CompletionStatus::Trained => "Trained",
                CompletionStatus::Rested => "Rested",
                CompletionStatus::Completed => "Completed",
                CompletionStatus::InProgress => "In progress",
                CompletionStatus::Planned => "Planned",
                CompletionStatus::PlannedRest => "Planned rest",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn cardio_session() -> CardioSession {
        CardioSession {
            activity: CardioActivity::new("Running").unwrap(),
            duration: Some(30),
            distance: Some(5.0),
            calories: None,
            notes: Notes::default(),
        }
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(WorkoutID::nil(), WorkoutID::default());
    }

    #[test]
    fn test_workout_id_roundtrip() {
        let id = WorkoutID::from(42);
        assert_eq!(id.to_string().parse::<WorkoutID>().unwrap(), id);
    }

    #[test]
    fn test_workout_entry_new() {
        let entry = WorkoutEntry::new(
            date(2024, 1, 1),
            BTreeSet::from([MuscleGroup::Chest, MuscleGroup::Arms]),
            Notes::new("Push day").unwrap(),
            false,
            false,
            None,
        )
        .unwrap();
        assert_eq!(entry.date(), date(2024, 1, 1));
        assert_eq!(
            *entry.muscle_groups(),
            BTreeSet::from([MuscleGroup::Chest, MuscleGroup::Arms])
        );
        assert!(!entry.completed());
        assert!(!entry.is_rest_day());
        assert!(entry.cardio().is_none());
    }

    #[test]
    fn test_workout_entry_rest_day() {
        let entry = WorkoutEntry::rest_day(date(2024, 1, 1), Notes::default(), false);
        assert!(entry.is_rest_day());
        assert!(entry.muscle_groups().is_empty());
    }

    #[rstest]
    #[case::rest_day_with_muscle_groups(
        BTreeSet::from([MuscleGroup::Chest]),
        true,
        None,
        WorkoutError::RestDayWithMuscleGroups
    )]
    #[case::rest_day_with_cardio(
        BTreeSet::new(),
        true,
        Some(cardio_session()),
        WorkoutError::RestDayWithCardio
    )]
    #[case::no_muscle_groups(BTreeSet::new(), false, None, WorkoutError::NoMuscleGroups)]
    #[case::cardio_session_without_group(
        BTreeSet::from([MuscleGroup::Legs]),
        false,
        Some(cardio_session()),
        WorkoutError::CardioSessionWithoutGroup
    )]
    #[case::cardio_group_without_session(
        BTreeSet::from([MuscleGroup::Cardio]),
        false,
        None,
        WorkoutError::CardioGroupWithoutSession
    )]
    fn test_workout_entry_new_invalid(
        #[case] muscle_groups: BTreeSet<MuscleGroup>,
        #[case] rest_day: bool,
        #[case] cardio: Option<CardioSession>,
        #[case] expected: WorkoutError,
    ) {
        assert_eq!(
            WorkoutEntry::new(
                date(2024, 1, 1),
                muscle_groups,
                Notes::default(),
                false,
                rest_day,
                cardio
            ),
            Err(expected)
        );
    }

    #[test]
    fn test_workout_entry_new_cardio() {
        let entry = WorkoutEntry::new(
            date(2024, 1, 1),
            BTreeSet::from([MuscleGroup::Cardio]),
            Notes::default(),
            false,
            false,
            Some(cardio_session()),
        )
        .unwrap();
        assert_eq!(entry.cardio(), Some(&cardio_session()));
    }

    #[rstest]
    #[case::past_not_completed(date(2024, 1, 9), false, true)]
    #[case::past_completed(date(2024, 1, 9), true, true)]
    #[case::today_not_completed(date(2024, 1, 10), false, false)]
    #[case::today_completed(date(2024, 1, 10), true, true)]
    #[case::future_not_completed(date(2024, 1, 11), false, false)]
    #[case::future_completed(date(2024, 1, 11), true, true)]
    fn test_effective_completed(
        #[case] workout_date: NaiveDate,
        #[case] completed: bool,
        #[case] expected: bool,
    ) {
        let today = date(2024, 1, 10);
        let entry = WorkoutEntry::new(
            workout_date,
            BTreeSet::from([MuscleGroup::Chest]),
            Notes::default(),
            completed,
            false,
            None,
        )
        .unwrap();
        assert_eq!(entry.effective_completed(today), expected);
    }

    #[rstest]
    #[case::past(date(2024, 1, 9), false, false, CompletionStatus::Trained)]
    #[case::past_rest(date(2024, 1, 9), false, true, CompletionStatus::Rested)]
    #[case::today_in_progress(date(2024, 1, 10), false, false, CompletionStatus::InProgress)]
    #[case::today_completed(date(2024, 1, 10), true, false, CompletionStatus::Completed)]
    #[case::today_planned_rest(date(2024, 1, 10), false, true, CompletionStatus::PlannedRest)]
    #[case::today_rested(date(2024, 1, 10), true, true, CompletionStatus::Rested)]
    #[case::future(date(2024, 1, 11), false, false, CompletionStatus::Planned)]
    #[case::future_rest(date(2024, 1, 11), false, true, CompletionStatus::PlannedRest)]
    fn test_completion_status(
        #[case] workout_date: NaiveDate,
        #[case] completed: bool,
        #[case] rest_day: bool,
        #[case] expected: CompletionStatus,
    ) {
        let today = date(2024, 1, 10);
        let entry = if rest_day {
            WorkoutEntry::rest_day(workout_date, Notes::default(), completed)
        } else {
            WorkoutEntry::new(
                workout_date,
                BTreeSet::from([MuscleGroup::Chest]),
                Notes::default(),
                completed,
                false,
                None,
            )
            .unwrap()
        };
        assert_eq!(entry.completion_status(today), expected);
    }

    #[rstest]
    #[case("Running", Ok(CardioActivity("Running".to_string())))]
    #[case("  Rowing  ", Ok(CardioActivity("Rowing".to_string())))]
    #[case("", Err(CardioActivityError::Empty))]
    #[case(&"x".repeat(65), Err(CardioActivityError::TooLong(65)))]
    fn test_cardio_activity_new(
        #[case] activity: &str,
        #[case] expected: Result<CardioActivity, CardioActivityError>,
    ) {
        assert_eq!(CardioActivity::new(activity), expected);
    }

    #[rstest]
    #[case(CompletionStatus::InProgress, "In progress")]
    #[case(CompletionStatus::PlannedRest, "Planned rest")]
    fn test_completion_status_display(
        #[case] status: CompletionStatus,
        #[case] string: &str,
    ) {
        assert_eq!(status.to_string(), string);
    }
}
