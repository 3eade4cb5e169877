use std::{fmt, str::FromStr};

/// A trainable region of the body.
///
/// `Cardio` is not a muscle group in the anatomical sense. It marks workouts
/// with a cardio session and is excluded from per-group training statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MuscleGroup {
    Chest,
    Shoulders,
    Legs,
    Back,
    Abs,
    Arms,
    Cardio,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Shoulders,
        MuscleGroup::Legs,
        MuscleGroup::Back,
        MuscleGroup::Abs,
        MuscleGroup::Arms,
        MuscleGroup::Cardio,
    ];

    /// The six real muscle groups, without the cardio pseudo-group.
    #[must_use]
    pub const fn trainable() -> [MuscleGroup; 6] {
        [
            MuscleGroup::Chest,
            MuscleGroup::Shoulders,
            MuscleGroup::Legs,
            MuscleGroup::Back,
            MuscleGroup::Abs,
            MuscleGroup::Arms,
        ]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Back => "Back",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Cardio => "Cardio",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MuscleGroup::Chest => "chest",
                MuscleGroup::Shoulders => "shoulders",
                MuscleGroup::Legs => "legs",
                MuscleGroup::Back => "back",
                MuscleGroup::Abs => "abs",
                MuscleGroup::Arms => "arms",
                MuscleGroup::Cardio => "cardio",
            }
        )
    }
}

impl FromStr for MuscleGroup {
    type Err = UnknownMuscleGroup;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "chest" => Ok(MuscleGroup::Chest),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "legs" => Ok(MuscleGroup::Legs),
            "back" => Ok(MuscleGroup::Back),
            "abs" => Ok(MuscleGroup::Abs),
            "arms" => Ok(MuscleGroup::Arms),
            "cardio" => Ok(MuscleGroup::Cardio),
            _ => Err(UnknownMuscleGroup(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown muscle group: {0}")]
pub struct UnknownMuscleGroup(pub String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MuscleGroup::Chest, "chest")]
    #[case(MuscleGroup::Shoulders, "shoulders")]
    #[case(MuscleGroup::Legs, "legs")]
    #[case(MuscleGroup::Back, "back")]
    #[case(MuscleGroup::Abs, "abs")]
    #[case(MuscleGroup::Arms, "arms")]
    #[case(MuscleGroup::Cardio, "cardio")]
    fn test_muscle_group_roundtrip(#[case] muscle_group: MuscleGroup, #[case] string: &str) {
        assert_eq!(muscle_group.to_string(), string);
        assert_eq!(string.parse(), Ok(muscle_group));
    }

    #[test]
    fn test_muscle_group_from_str_unknown() {
        assert_eq!(
            MuscleGroup::from_str("glutes"),
            Err(UnknownMuscleGroup("glutes".to_string()))
        );
    }

    #[test]
    fn test_trainable_excludes_cardio() {
        assert!(!MuscleGroup::trainable().contains(&MuscleGroup::Cardio));
        assert_eq!(MuscleGroup::trainable().len(), 6);
    }
}
