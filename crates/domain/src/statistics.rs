use chrono::{Datelike, Duration, NaiveDate};

use crate::{MuscleGroup, Workout};

/// Training statistics for a single muscle group, relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleGroupStats {
    pub muscle_group: MuscleGroup,
    pub last_trained: Option<NaiveDate>,
    pub days_since: Option<i64>,
    pub monthly_count: usize,
}

/// The most recent day up to `today` on which `muscle_group` was trained.
///
/// Only workouts that count as done are considered. `None` means the muscle
/// group has never been trained.
#[must_use]
pub fn last_trained(
    workouts: &[Workout],
    muscle_group: MuscleGroup,
    today: NaiveDate,
) -> Option<NaiveDate> {
    workouts
        .iter()
        .filter(|w| {
            w.date() <= today
                && w.effective_completed(today)
                && w.muscle_groups().contains(&muscle_group)
        })
        .map(|w| w.date())
        .max()
}

#[must_use]
pub fn days_since_last_trained(
    workouts: &[Workout],
    muscle_group: MuscleGroup,
    today: NaiveDate,
) -> Option<i64> {
    last_trained(workouts, muscle_group, today).map(|date| (today - date).num_days())
}

/// Workouts done within the last seven days, the current day included.
#[must_use]
pub fn weekly_count(workouts: &[Workout], today: NaiveDate) -> usize {
    workouts
        .iter()
        .filter(|w| {
            w.date() > today - Duration::days(7)
                && w.date() <= today
                && w.effective_completed(today)
        })
        .count()
}

/// Workouts done for `muscle_group` since the first day of the current month.
#[must_use]
pub fn monthly_count(workouts: &[Workout], muscle_group: MuscleGroup, today: NaiveDate) -> usize {
    let first_of_month = today.with_day(1).unwrap_or(today);
    workouts
        .iter()
        .filter(|w| {
            w.date() >= first_of_month
                && w.date() <= today
                && w.effective_completed(today)
                && w.muscle_groups().contains(&muscle_group)
        })
        .count()
}

#[must_use]
pub fn muscle_group_stats(workouts: &[Workout], today: NaiveDate) -> Vec<MuscleGroupStats> {
    MuscleGroup::trainable()
        .into_iter()
        .map(|muscle_group| {
            let last_trained = last_trained(workouts, muscle_group, today);
            MuscleGroupStats {
                muscle_group,
                last_trained,
                days_since: last_trained.map(|date| (today - date).num_days()),
                monthly_count: monthly_count(workouts, muscle_group, today),
            }
        })
        .collect()
}

/// Muscle groups that have not been trained for at least `threshold` days.
///
/// Never-trained muscle groups are always overdue.
#[must_use]
pub fn overdue(stats: &[MuscleGroupStats], threshold: u32) -> Vec<MuscleGroup> {
    stats
        .iter()
        .filter(|s| s.days_since.is_none_or(|days| days >= i64::from(threshold)))
        .map(|s| s.muscle_group)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Notes, WorkoutEntry, WorkoutID};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn workout(
        id: u128,
        workout_date: NaiveDate,
        muscle_groups: &[MuscleGroup],
        completed: bool,
        rest_day: bool,
    ) -> Workout {
        let entry = if rest_day {
            WorkoutEntry::rest_day(workout_date, Notes::default(), completed)
        } else {
            WorkoutEntry::new(
                workout_date,
                muscle_groups.iter().copied().collect::<BTreeSet<_>>(),
                Notes::default(),
                completed,
                false,
                None,
            )
            .unwrap()
        };
        Workout {
            id: WorkoutID::from(id),
            entry,
            created: DateTime::<Utc>::default(),
            updated: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_days_since_last_trained() {
        // Past workouts count as done regardless of the stored flag.
        let workouts = vec![
            workout(1, date(2024, 1, 1), &[MuscleGroup::Chest], false, false),
            workout(2, date(2024, 1, 3), &[MuscleGroup::Chest], true, false),
        ];
        let today = date(2024, 1, 10);

        assert!(workouts.iter().all(|w| w.effective_completed(today)));
        assert_eq!(
            days_since_last_trained(&workouts, MuscleGroup::Chest, today),
            Some(7)
        );
    }

    #[test]
    fn test_days_since_last_trained_never() {
        let workouts = vec![workout(
            1,
            date(2024, 1, 3),
            &[MuscleGroup::Chest],
            true,
            false,
        )];
        assert_eq!(
            days_since_last_trained(&workouts, MuscleGroup::Legs, date(2024, 1, 10)),
            None
        );
        assert_eq!(
            days_since_last_trained(&[], MuscleGroup::Chest, date(2024, 1, 10)),
            None
        );
    }

    #[test]
    fn test_days_since_last_trained_ignores_planned() {
        let workouts = vec![
            workout(1, date(2024, 1, 3), &[MuscleGroup::Chest], true, false),
            // planned for the future, not started
            workout(2, date(2024, 1, 12), &[MuscleGroup::Chest], false, false),
            // today, still in progress
            workout(3, date(2024, 1, 10), &[MuscleGroup::Chest], false, false),
        ];
        assert_eq!(
            days_since_last_trained(&workouts, MuscleGroup::Chest, date(2024, 1, 10)),
            Some(7)
        );
    }

    #[test]
    fn test_days_since_last_trained_today() {
        let workouts = vec![workout(
            1,
            date(2024, 1, 10),
            &[MuscleGroup::Chest],
            true,
            false,
        )];
        assert_eq!(
            days_since_last_trained(&workouts, MuscleGroup::Chest, date(2024, 1, 10)),
            Some(0)
        );
    }

    #[rstest]
    #[case::window_boundaries(
        vec![
            (date(2024, 1, 3), true),  // exactly 7 days ago, outside
            (date(2024, 1, 4), true),  // 6 days ago, inside
            (date(2024, 1, 10), true), // today, inside
            (date(2024, 1, 11), true), // future, outside
        ],
        2
    )]
    #[case::effective_completion(
        vec![
            (date(2024, 1, 8), false), // past, counts anyway
            (date(2024, 1, 10), false), // today, not completed
        ],
        1
    )]
    fn test_weekly_count(#[case] days: Vec<(NaiveDate, bool)>, #[case] expected: usize) {
        let workouts = days
            .into_iter()
            .enumerate()
            .map(|(i, (d, completed))| {
                workout(i as u128, d, &[MuscleGroup::Chest], completed, false)
            })
            .collect::<Vec<_>>();
        assert_eq!(weekly_count(&workouts, date(2024, 1, 10)), expected);
    }

    #[test]
    fn test_weekly_count_includes_rest_days() {
        let workouts = vec![
            workout(1, date(2024, 1, 8), &[], false, true),
            workout(2, date(2024, 1, 9), &[MuscleGroup::Back], false, false),
        ];
        assert_eq!(weekly_count(&workouts, date(2024, 1, 10)), 2);
    }

    #[test]
    fn test_monthly_count() {
        let workouts = vec![
            workout(1, date(2023, 12, 31), &[MuscleGroup::Legs], true, false),
            workout(2, date(2024, 1, 1), &[MuscleGroup::Legs], true, false),
            workout(3, date(2024, 1, 5), &[MuscleGroup::Legs], false, false),
            workout(4, date(2024, 1, 10), &[MuscleGroup::Legs], false, false),
            workout(5, date(2024, 1, 7), &[MuscleGroup::Back], true, false),
        ];
        assert_eq!(
            monthly_count(&workouts, MuscleGroup::Legs, date(2024, 1, 10)),
            2
        );
    }

    #[test]
    fn test_muscle_group_stats() {
        let workouts = vec![
            workout(1, date(2024, 1, 3), &[MuscleGroup::Chest], true, false),
            workout(2, date(2024, 1, 8), &[MuscleGroup::Back], true, false),
        ];
        let stats = muscle_group_stats(&workouts, date(2024, 1, 10));

        assert_eq!(stats.len(), 6);
        assert!(
            stats
                .iter()
                .all(|s| s.muscle_group != MuscleGroup::Cardio)
        );

        let chest = stats
            .iter()
            .find(|s| s.muscle_group == MuscleGroup::Chest)
            .unwrap();
        assert_eq!(chest.last_trained, Some(date(2024, 1, 3)));
        assert_eq!(chest.days_since, Some(7));
        assert_eq!(chest.monthly_count, 1);

        let legs = stats
            .iter()
            .find(|s| s.muscle_group == MuscleGroup::Legs)
            .unwrap();
        assert_eq!(legs.last_trained, None);
        assert_eq!(legs.days_since, None);
        assert_eq!(legs.monthly_count, 0);
    }

    #[test]
    fn test_overdue() {
        let stats = [
            MuscleGroupStats {
                muscle_group: MuscleGroup::Chest,
                last_trained: Some(date(2024, 1, 8)),
                days_since: Some(2),
                monthly_count: 1,
            },
            MuscleGroupStats {
                muscle_group: MuscleGroup::Back,
                last_trained: Some(date(2024, 1, 7)),
                days_since: Some(3),
                monthly_count: 1,
            },
            MuscleGroupStats {
                muscle_group: MuscleGroup::Legs,
                last_trained: None,
                days_since: None,
                monthly_count: 0,
            },
        ];
        assert_eq!(
            overdue(&stats, 3),
            vec![MuscleGroup::Back, MuscleGroup::Legs]
        );
        assert_eq!(overdue(&stats, 4), vec![MuscleGroup::Legs]);
    }
}
