use chrono::{Datelike, Duration, Local, Months, NaiveDate, Weekday};
use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::{CompletionStatus, SessionService, WorkoutService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, Route,
    component::element::{ErrorMessage, FloatingActionButton, Icon, LoadingPage, NoConnection},
    ensure_session,
};

#[component]
pub fn Calendar() -> Element {
    ensure_session!();

    let workouts = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workouts().await
    });

    let today = Local::now().date_naive();
    let mut month = use_signal(|| today.with_day(1).unwrap_or(today));
    let navigator = use_navigator();

    let month_title = month.read().format("%B %Y").to_string();

    match &*workouts.read() {
        Some(Ok(workouts)) => rsx! {
            div {
                class: "is-flex is-justify-content-space-between is-align-items-center mx-3",
                a {
                    onclick: move |_| {
                        let current = *month.read();
                        if let Some(previous) = current.checked_sub_months(Months::new(1)) {
                            *month.write() = previous;
                        }
                    },
                    Icon { name: "chevron-left" }
                }
                div {
                    class: "title is-5 my-2",
                    "{month_title}"
                }
                a {
                    onclick: move |_| {
                        let current = *month.read();
                        if let Some(next) = current.checked_add_months(Months::new(1)) {
                            *month.write() = next;
                        }
                    },
                    Icon { name: "chevron-right" }
                }
            }
            MonthGrid { month: *month.read(), workouts: workouts.clone(), today }
            FloatingActionButton {
                icon: "plus".to_string(),
                onclick: move |_| {
                    navigator.push(Route::CreatePlan { date: String::new() });
                },
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
fn MonthGrid(month: NaiveDate, workouts: Vec<domain::Workout>, today: NaiveDate) -> Element {
    let first = month.week(Weekday::Mon).first_day();
    let last_of_month = month
        .checked_add_months(Months::new(1))
        .and_then(|date| date.pred_opt())
        .unwrap_or(month);
    let last = last_of_month.week(Weekday::Mon).last_day();

    let mut weeks = vec![];
    let mut day = first;
    while day <= last {
        let week = (0..7)
            .map(|_| {
                let date = day;
                day += Duration::days(1);
                date
            })
            .collect::<Vec<_>>();
        weeks.push(week);
    }

    let navigator = use_navigator();

    rsx! {
        div {
            class: "table-container is-calendar py-2",
            table {
                class: "table mx-auto",
                thead {
                    tr {
                        for weekday in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
                            th { class: "has-text-centered", "{weekday}" }
                        }
                    }
                }
                tbody {
                    for week in weeks {
                        tr {
                            for date in week {
                                {
                                    let workout = workouts.iter().find(|w| w.date() == date);
                                    let id = workout.map(|w| w.id);
                                    let status = workout.map(|w| w.completion_status(today));
                                    let marker = workout.map(|w| {
                                        if w.is_rest_day() {
                                            "bed"
                                        } else if w.cardio().is_some() {
                                            "heart-pulse"
                                        } else {
                                            "dumbbell"
                                        }
                                    });
                                    let status_class = match status {
                                        Some(
                                            CompletionStatus::Rested
                                            | CompletionStatus::PlannedRest,
                                        ) => "has-background-info-light",
                                        Some(
                                            CompletionStatus::Trained
                                            | CompletionStatus::Completed,
                                        ) => "has-background-success-light",
                                        Some(CompletionStatus::InProgress) => {
                                            "has-background-warning-light"
                                        }
                                        Some(CompletionStatus::Planned) => {
                                            "has-background-link-light"
                                        }
                                        None => "",
                                    };
                                    rsx! {
                                        td {
                                            class: "has-text-centered is-clickable",
                                            class: if date.month() != month.month() { "has-text-grey-light" },
                                            class: "{status_class}",
                                            onclick: move |_| {
                                                if let Some(id) = id {
                                                    navigator.push(Route::EditPlan { id });
                                                } else {
                                                    navigator.push(Route::CreatePlan {
                                                        date: date.to_string(),
                                                    });
                                                }
                                            },
                                            div {
                                                class: if date == today { "has-text-weight-bold" },
                                                "{date.day()}"
                                            }
                                            div {
                                                class: "is-size-7",
                                                if let Some(marker) = marker {
                                                    span {
                                                        class: "icon is-small",
                                                        i { class: "fas fa-{marker}" }
                                                    }
                                                } else {
                                                    span { class: "icon is-small" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
