use chrono::{Local, NaiveDate};
use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::{MuscleGroup, SessionService, WorkoutService};

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{DeleteConfirmationDialog, ErrorMessage, LoadingPage, NoConnection, Title},
        form::{FieldValue, FieldValueState, InputField, TextAreaField},
    },
    ensure_session,
    page::muscle_group_icon,
    signal_changed_data,
};

#[component]
pub fn CreatePlan(date: String) -> Element {
    ensure_session!();

    let initial_date = date
        .parse::<NaiveDate>()
        .unwrap_or_else(|_| Local::now().date_naive());

    rsx! {
        WorkoutForm { id: None, entry: None, initial_date }
    }
}

#[component]
pub fn EditPlan(id: domain::WorkoutID) -> Element {
    ensure_session!();

    let workout = use_resource(move || async move { DOMAIN_SERVICE.read().get_workout(id).await });

    match &*workout.read() {
        Some(Ok(workout)) => rsx! {
            WorkoutForm {
                id: Some(workout.id),
                entry: Some(workout.entry.clone()),
                initial_date: workout.date(),
            }
        },
        Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => rsx! {
            NoConnection {}
        },
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        None => rsx! {
            LoadingPage {}
        },
    }
}

#[component]
fn WorkoutForm(
    #[props(!optional)] id: Option<domain::WorkoutID>,
    #[props(!optional)] entry: Option<domain::WorkoutEntry>,
    initial_date: NaiveDate,
) -> Element {
    let mut date = use_signal(|| FieldValue::new(entry.as_ref().map_or(initial_date, |e| e.date())));
    let mut muscle_groups = use_signal(|| {
        entry
            .as_ref()
            .map(|e| e.muscle_groups().clone())
            .unwrap_or_default()
    });
    let mut rest_day = use_signal(|| entry.as_ref().is_some_and(|e| e.is_rest_day()));
    let mut completed = use_signal(|| entry.as_ref().is_some_and(|e| e.completed()));
    let mut notes =
        use_signal(|| FieldValue::new(entry.as_ref().map(|e| e.notes().clone()).unwrap_or_default()));

    let cardio = entry.as_ref().and_then(|e| e.cardio());
    let mut activity =
        use_signal(|| cardio.map_or_else(FieldValue::default, |c| FieldValue::new(c.activity.clone())));
    let mut duration = use_signal(|| FieldValue::from_option(cardio.and_then(|c| c.duration)));
    let mut distance = use_signal(|| FieldValue::from_option(cardio.and_then(|c| c.distance)));
    let mut calories = use_signal(|| FieldValue::from_option(cardio.and_then(|c| c.calories)));
    let mut cardio_notes =
        use_signal(|| FieldValue::new(cardio.map(|c| c.notes.clone()).unwrap_or_default()));

    let mut is_loading = use_signal(|| false);
    let mut delete_requested = use_signal(|| false);
    let mut delete_in_progress = use_signal(|| false);
    let navigator = use_navigator();

    let cardio_selected = !rest_day() && muscle_groups.read().contains(&MuscleGroup::Cardio);

    let form_valid = {
        let date = date.read();
        let notes = notes.read();
        let activity = activity.read();
        let duration = duration.read();
        let distance = distance.read();
        let calories = calories.read();
        let cardio_notes = cardio_notes.read();
        let mut fields: Vec<&dyn FieldValueState> = vec![&*date as &dyn FieldValueState, &*notes];
        if cardio_selected {
            fields.extend([
                &*activity as &dyn FieldValueState,
                &*duration,
                &*distance,
                &*calories,
                &*cardio_notes,
            ]);
        }
        FieldValue::all_valid(&fields)
    } && (rest_day() || !muscle_groups.read().is_empty());

    let save = move |_| async move {
        let Ok(date) = date.read().validated.clone() else {
            return;
        };
        let Ok(notes) = notes.read().validated.clone() else {
            return;
        };
        let groups = muscle_groups.read().clone();

        let entry = if rest_day() {
            domain::WorkoutEntry::rest_day(date, notes, completed())
        } else {
            let cardio = if groups.contains(&MuscleGroup::Cardio) {
                let Ok(activity) = activity.read().validated.clone() else {
                    return;
                };
                let Ok(duration) = duration.read().validated.clone() else {
                    return;
                };
                let Ok(distance) = distance.read().validated.clone() else {
                    return;
                };
                let Ok(calories) = calories.read().validated.clone() else {
                    return;
                };
                let Ok(notes) = cardio_notes.read().validated.clone() else {
                    return;
                };
                Some(domain::CardioSession {
                    activity,
                    duration,
                    distance,
                    calories,
                    notes,
                })
            } else {
                None
            };
            match domain::WorkoutEntry::new(date, groups, notes, completed(), false, cardio) {
                Ok(entry) => entry,
                Err(err) => {
                    NOTIFICATIONS.write().push(err.to_string());
                    return;
                }
            }
        };

        *is_loading.write() = true;
        match id {
            Some(id) => match DOMAIN_SERVICE.read().modify_workout(id, entry).await {
                Ok(_) => {
                    signal_changed_data();
                    navigator.push(Route::Calendar {});
                }
                Err(domain::UpdateError::Storage(domain::StorageError::NoConnection)) => {
                    *NO_CONNECTION.write() = true;
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to edit workout: {err}"));
                }
            },
            None => match DOMAIN_SERVICE.read().create_workout(entry).await {
                Ok(_) => {
                    signal_changed_data();
                    navigator.push(Route::Calendar {});
                }
                Err(domain::CreateError::Conflict) => {
                    NOTIFICATIONS
                        .write()
                        .push("A workout already exists on this date".to_string());
                }
                Err(domain::CreateError::Storage(domain::StorageError::NoConnection)) => {
                    *NO_CONNECTION.write() = true;
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to create workout: {err}"));
                }
            },
        }
        *is_loading.write() = false;
    };

    let delete = move |_| async move {
        let Some(id) = id else {
            return;
        };
        *delete_in_progress.write() = true;
        match DOMAIN_SERVICE.read().delete_workout(id).await {
            Ok(_) => {
                signal_changed_data();
                navigator.push(Route::Calendar {});
            }
            Err(domain::DeleteError::Storage(domain::StorageError::NoConnection)) => {
                *NO_CONNECTION.write() = true;
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to delete workout: {err}"));
            }
        }
        *delete_in_progress.write() = false;
        *delete_requested.write() = false;
    };

    rsx! {
        div {
            class: "container px-4",
            InputField {
                label: "Date".to_string(),
                r#type: "date".to_string(),
                value: date.read().input.clone(),
                error: if let Err(err) = &date.read().validated { err.clone() },
                has_changed: date.read().changed(),
                oninput: move |event: FormEvent| {
                    let mut date = date.write();
                    date.input = event.value();
                    date.validated = DOMAIN_SERVICE
                        .read()
                        .validate_workout_date(&date.input)
                        .map_err(|err| err.to_string());
                },
            }
            div {
                class: "field",
                label { class: "label", "Muscle groups" }
                div {
                    class: "buttons are-small",
                    for muscle_group in MuscleGroup::ALL {
                        button {
                            class: "button",
                            class: if muscle_groups.read().contains(&muscle_group) { "is-link" },
                            disabled: rest_day(),
                            onclick: move |_| {
                                let mut groups = muscle_groups.write();
                                if !groups.remove(&muscle_group) {
                                    groups.insert(muscle_group);
                                }
                            },
                            span {
                                class: "icon is-small",
                                i { class: "fas fa-{muscle_group_icon(muscle_group)}" }
                            }
                            span { "{muscle_group.label()}" }
                        }
                    }
                }
            }
            div {
                class: "field is-grouped",
                div {
                    class: "control",
                    label { class: "label", "Rest day" }
                    button {
                        class: "button",
                        class: if rest_day() { "is-link" },
                        onclick: move |_| {
                            let enabled = !rest_day();
                            *rest_day.write() = enabled;
                            if enabled {
                                muscle_groups.write().clear();
                            }
                        },
                        if rest_day() { "Yes" } else { "No" }
                    }
                }
                div {
                    class: "control",
                    label { class: "label", "Completed" }
                    button {
                        class: "button",
                        class: if completed() { "is-link" },
                        onclick: move |_| { *completed.write() = !completed(); },
                        if completed() { "Yes" } else { "No" }
                    }
                }
            }
            TextAreaField {
                label: "Notes".to_string(),
                help: format!(
                    "{}/{}",
                    notes.read().input.chars().count(),
                    domain::Notes::MAX_LEN,
                ),
                rows: 3,
                value: notes.read().input.clone(),
                error: if let Err(err) = &notes.read().validated { err.clone() },
                has_changed: notes.read().changed(),
                oninput: move |event: FormEvent| {
                    let mut notes = notes.write();
                    notes.input = event.value();
                    notes.validated = DOMAIN_SERVICE
                        .read()
                        .validate_workout_notes(&notes.input)
                        .map_err(|err| err.to_string());
                },
            }
            if cardio_selected {
                Title { title: "Cardio".to_string() }
                InputField {
                    label: "Activity".to_string(),
                    value: activity.read().input.clone(),
                    error: if let Err(err) = &activity.read().validated { err.clone() },
                    has_changed: activity.read().changed(),
                    oninput: move |event: FormEvent| {
                        let mut activity = activity.write();
                        activity.input = event.value();
                        activity.validated = DOMAIN_SERVICE
                            .read()
                            .validate_cardio_activity(&activity.input)
                            .map_err(|err| err.to_string());
                    },
                }
                InputField {
                    label: "Duration".to_string(),
                    inputmode: "numeric".to_string(),
                    right_icon: rsx! { "min" },
                    value: duration.read().input.clone(),
                    error: if let Err(err) = &duration.read().validated { err.clone() },
                    has_changed: duration.read().changed(),
                    oninput: move |event: FormEvent| {
                        let mut duration = duration.write();
                        duration.input = event.value();
                        duration.validated = DOMAIN_SERVICE
                            .read()
                            .validate_cardio_duration(&duration.input)
                            .map_err(|err| err.to_string());
                    },
                }
                InputField {
                    label: "Distance".to_string(),
                    inputmode: "decimal".to_string(),
                    right_icon: rsx! { "km" },
                    value: distance.read().input.clone(),
                    error: if let Err(err) = &distance.read().validated { err.clone() },
                    has_changed: distance.read().changed(),
                    oninput: move |event: FormEvent| {
                        let mut distance = distance.write();
                        distance.input = event.value();
                        distance.validated = DOMAIN_SERVICE
                            .read()
                            .validate_cardio_distance(&distance.input)
                            .map_err(|err| err.to_string());
                    },
                }
                InputField {
                    label: "Calories".to_string(),
                    inputmode: "numeric".to_string(),
                    right_icon: rsx! { "kcal" },
                    value: calories.read().input.clone(),
                    error: if let Err(err) = &calories.read().validated { err.clone() },
                    has_changed: calories.read().changed(),
                    oninput: move |event: FormEvent| {
                        let mut calories = calories.write();
                        calories.input = event.value();
                        calories.validated = DOMAIN_SERVICE
                            .read()
                            .validate_cardio_calories(&calories.input)
                            .map_err(|err| err.to_string());
                    },
                }
                TextAreaField {
                    label: "Cardio notes".to_string(),
                    rows: 2,
                    value: cardio_notes.read().input.clone(),
                    error: if let Err(err) = &cardio_notes.read().validated { err.clone() },
                    has_changed: cardio_notes.read().changed(),
                    oninput: move |event: FormEvent| {
                        let mut cardio_notes = cardio_notes.write();
                        cardio_notes.input = event.value();
                        cardio_notes.validated = DOMAIN_SERVICE
                            .read()
                            .validate_workout_notes(&cardio_notes.input)
                            .map_err(|err| err.to_string());
                    },
                }
            }
            div {
                class: "field is-grouped is-grouped-centered mt-5",
                div {
                    class: "control",
                    button {
                        class: "button is-primary",
                        class: if is_loading() { "is-loading" },
                        disabled: !form_valid,
                        onclick: save,
                        "Save"
                    }
                }
                if id.is_some() {
                    div {
                        class: "control",
                        button {
                            class: "button is-danger is-light",
                            onclick: move |_| { *delete_requested.write() = true; },
                            "Delete"
                        }
                    }
                }
            }
        }
        if *delete_requested.read() {
            DeleteConfirmationDialog {
                element_type: "workout".to_string(),
                element_name: rsx! { i { "{date.read().orig}" } },
                delete_event: delete,
                cancel_event: move |_| { *delete_requested.write() = false; },
                is_loading: *delete_in_progress.read(),
            }
        }
    }
}
