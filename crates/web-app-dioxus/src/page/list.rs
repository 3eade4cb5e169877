use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::{MuscleGroup, SessionService, WorkoutService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::element::{
        DeleteConfirmationDialog, ErrorMessage, FloatingActionButton, Icon, LoadingPage,
        MenuOption, NoConnection, NoWrap, OptionsMenu, Table,
    },
    ensure_session, signal_changed_data,
};

#[component]
pub fn List() -> Element {
    ensure_session!();

    let workouts = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workouts().await
    });

    let mut filter = use_signal::<Option<MuscleGroup>>(|| None);
    let mut selected = use_signal::<Option<domain::Workout>>(|| None);
    let mut workout_to_delete = use_signal::<Option<domain::Workout>>(|| None);
    let mut delete_in_progress = use_signal(|| false);
    let navigator = use_navigator();

    let today = chrono::Local::now().date_naive();

    let delete = move |_| async move {
        let Some(workout) = workout_to_delete.read().clone() else {
            return;
        };
        *delete_in_progress.write() = true;
        match DOMAIN_SERVICE.read().delete_workout(workout.id).await {
            Ok(_) => {
                signal_changed_data();
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
        *workout_to_delete.write() = None;
    };

    match &*workouts.read() {
        Some(Ok(workouts)) => {
            let mut workouts = workouts.clone();
            if let Some(muscle_group) = *filter.read() {
                workouts.retain(|w| w.muscle_groups().contains(&muscle_group));
            }
            workouts.sort_by_key(|w| std::cmp::Reverse(w.date()));

            let head = vec![
                rsx! { "Date" },
                rsx! { "Muscle groups" },
                rsx! { "Status" },
                rsx! { "Notes" },
                rsx! {},
            ];

            let body = workouts
                .iter()
                .map(|workout| {
                    let workout = workout.clone();
                    let muscle_groups = if workout.is_rest_day() {
                        "Rest day".to_string()
                    } else {
                        workout
                            .muscle_groups()
                            .iter()
                            .map(|muscle_group| muscle_group.label())
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    vec![
                        rsx! { NoWrap { "{workout.date()}" } },
                        rsx! { "{muscle_groups}" },
                        rsx! { NoWrap { "{workout.completion_status(today)}" } },
                        rsx! { "{workout.notes()}" },
                        rsx! {
                            a {
                                onclick: move |_| { *selected.write() = Some(workout.clone()); },
                                Icon { name: "ellipsis-vertical" }
                            }
                        },
                    ]
                })
                .collect::<Vec<_>>();

            rsx! {
                div {
                    class: "buttons are-small is-centered mx-2",
                    button {
                        class: "button",
                        class: if filter.read().is_none() { "is-link" },
                        onclick: move |_| { *filter.write() = None; },
                        "All"
                    }
                    for muscle_group in MuscleGroup::ALL {
                        button {
                            class: "button",
                            class: if *filter.read() == Some(muscle_group) { "is-link" },
                            onclick: move |_| { *filter.write() = Some(muscle_group); },
                            "{muscle_group.label()}"
                        }
                    }
                }
                Table { head, body }
                if let Some(workout) = selected.read().clone() {
                    OptionsMenu {
                        options: vec![
                            rsx! {
                                MenuOption {
                                    icon: "pen".to_string(),
                                    text: "Edit workout".to_string(),
                                    onclick: {
                                        let id = workout.id;
                                        move |_| {
                                            *selected.write() = None;
                                            navigator.push(Route::EditPlan { id });
                                        }
                                    },
                                }
                            },
                            rsx! {
                                MenuOption {
                                    icon: "trash".to_string(),
                                    text: "Delete workout".to_string(),
                                    onclick: {
                                        let workout = workout.clone();
                                        move |_| {
                                            *workout_to_delete.write() = Some(workout.clone());
                                            *selected.write() = None;
                                        }
                                    },
                                }
                            },
                        ],
                        close_event: move |_| { *selected.write() = None; },
                    }
                }
                if let Some(workout) = workout_to_delete.read().clone() {
                    DeleteConfirmationDialog {
                        element_type: "workout".to_string(),
                        element_name: rsx! { i { "{workout.date()}" } },
                        delete_event: delete,
                        cancel_event: move |_| { *workout_to_delete.write() = None; },
                        is_loading: *delete_in_progress.read(),
                    }
                }
                FloatingActionButton {
                    icon: "plus".to_string(),
                    onclick: move |_| {
                        navigator.push(Route::CreatePlan { date: String::new() });
                    },
                }
            }
        }
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
