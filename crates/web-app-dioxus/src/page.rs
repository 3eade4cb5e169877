use robur_domain::MuscleGroup;

pub mod calendar;
pub mod dashboard;
pub mod list;
pub mod login;
pub mod not_found;
pub mod plan;
pub mod root;

pub fn muscle_group_icon(muscle_group: MuscleGroup) -> &'static str {
    match muscle_group {
        MuscleGroup::Chest => "expand",
        MuscleGroup::Shoulders => "angles-up",
        MuscleGroup::Legs => "person-walking",
        MuscleGroup::Back => "shield-halved",
        MuscleGroup::Abs => "grip",
        MuscleGroup::Arms => "hand-fist",
        MuscleGroup::Cardio => "heart-pulse",
    }
}
