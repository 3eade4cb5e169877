use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::{SessionService, SettingService, WorkoutService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, Route,
    component::element::{
        Color, DataBox, ErrorMessage, LoadingPage, Message, NoConnection, NoWrap, Table, Title,
    },
    ensure_session,
};

#[component]
pub fn Dashboard() -> Element {
    ensure_session!();

    let workouts = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workouts().await
    });
    let rest_day_warning = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_rest_day_warning().await
    });

    let today = chrono::Local::now().date_naive();

    match &*workouts.read() {
        Some(Ok(workouts)) => {
            let stats = domain::muscle_group_stats(workouts, today);
            let weekly = domain::weekly_count(workouts, today);
            let monthly_total = stats.iter().map(|s| s.monthly_count).sum::<usize>();
            let threshold = match *rest_day_warning.read() {
                Some(Ok(days)) => days,
                Some(Err(_)) | None => domain::REST_DAY_WARNING_DEFAULT,
            };
            let overdue = domain::overdue(&stats, threshold);
            let todays_workout = workouts.iter().find(|w| w.date() == today);

            rsx! {
                if !overdue.is_empty() {
                    Message {
                        color: Color::Warning,
                        "Not trained for {threshold} days or more: "
                        strong {
                            {
                                overdue
                                    .iter()
                                    .map(|muscle_group| muscle_group.label())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            }
                        }
                    }
                }
                div {
                    class: "is-flex is-justify-content-center",
                    DataBox {
                        title: "This week",
                        "{weekly} workouts"
                    }
                    DataBox {
                        title: "This month",
                        "{monthly_total} workouts"
                    }
                    DataBox {
                        title: "Today",
                        if let Some(workout) = todays_workout {
                            "{workout.completion_status(today)}"
                        } else {
                            "-"
                        }
                    }
                }
                Title { title: "Muscle groups".to_string() }
                {muscle_group_table(&stats, today, threshold)}
                Tile {
                    title: "Calendar",
                    target: Route::Calendar {},
                    target_add: Some(Route::CreatePlan { date: String::new() }),
                }
                Tile {
                    title: "Workouts",
                    target: Route::List {},
                    target_add: Some(Route::CreatePlan { date: String::new() }),
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

fn muscle_group_table(
    stats: &[domain::MuscleGroupStats],
    today: chrono::NaiveDate,
    threshold: u32,
) -> Element {
    let head = vec![
        rsx! {"Muscle group"},
        rsx! {"Last trained"},
        rsx! {"This month"},
    ];

    let body = stats
        .iter()
        .map(|s| {
            let stale = s
                .last_trained
                .is_none_or(|date| (today - date).num_days() >= i64::from(threshold));
            vec![
                rsx! { "{s.muscle_group.label()}" },
                rsx! {
                    NoWrap {
                        span {
                            class: if stale { "has-text-danger" },
                            if let Some(date) = s.last_trained {
                                "{last(date, today)}"
                            } else {
                                "never"
                            }
                        }
                    }
                },
                rsx! { "{s.monthly_count}" },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Table { head, body }
    }
}

fn last(date: chrono::NaiveDate, today: chrono::NaiveDate) -> String {
    let days = (today - date).num_days();

    if days == 0 {
        return "today".to_string();
    }

    if days == 1 {
        return "yesterday".to_string();
    }

    format!("{days} days ago")
}

#[component]
fn Tile(title: String, target: Route, #[props(!optional)] target_add: Option<Route>) -> Element {
    let navigator = use_navigator();

    rsx! {
        div {
            class: "grid mx-3 my-3",
            div {
                class: "cell",
                a {
                    class: "box px-4 py-3",
                    onclick: move |_| { navigator.push(target.clone()); },
                    div {
                        class: "is-flex is-justify-content-space-between",
                        div {
                            a { class: "title is-size-5 has-text-link", {title} }
                        }
                        if let Some(target_add) = target_add {
                            div {
                                a {
                                    class: "title is-size-5 has-text-link",
                                    onclick: move |event| { navigator.push(target_add.clone()); event.stop_propagation(); },
                                    span { class: "icon",
                                        i { class: "fas fa-plus-circle" }
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
