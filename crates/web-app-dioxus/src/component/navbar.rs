use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::{SessionService, SettingService};
use robur_web_app as web_app;
use robur_web_app::SettingsService;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route, WEB_APP_SERVICE,
    component::{
        element::{Color, Dialog, ElementWithDescription, ErrorMessage, Icon, Loading},
        form::{FieldValue, FieldValueState, InputField},
    },
    signal_changed_data,
};

#[component]
pub fn Navbar() -> Element {
    let mut menu_visible = use_signal(|| false);
    let settings_visible = use_signal(|| false);
    let mut session = use_resource(|| async { DOMAIN_SERVICE.read().get_session().await });
    let settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });
    let rest_day_warning = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_rest_day_warning().await
    });
    let navigator = use_navigator();

    use_effect(move || {
        if let Some(Ok(settings)) = *settings.read() {
            let theme = match settings.current_theme() {
                web_app::Theme::Dark => "dark",
                web_app::Theme::Light | web_app::Theme::System => "light",
            };
            if let Some(element) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
            {
                let _ = element.set_attribute("data-theme", theme);
            }
        }
    });

    let user = match *session.read() {
        Some(Ok(ref user)) => Some(user.clone()),
        Some(Err(domain::ReadError::Storage(domain::StorageError::NoConnection))) => {
            *NO_CONNECTION.write() = true;
            None
        }
        Some(Err(_)) | None => None,
    };
    let page_title = match use_route::<Route>() {
        Route::Root {} | Route::Login {} => "Robur".to_string(),
        Route::Dashboard {} => {
            if let Some(ref user) = user {
                user.display_name
                    .clone()
                    .unwrap_or_else(|| user.email.to_string())
            } else {
                "Dashboard".to_string()
            }
        }
        Route::Calendar {} => "Calendar".to_string(),
        Route::CreatePlan { .. } | Route::Add { .. } => "Create plan".to_string(),
        Route::EditPlan { .. } => "Edit plan".to_string(),
        Route::List {} => "Workouts".to_string(),
        Route::NotFound { .. } => String::new(),
    };
    let go_up_target = match use_route::<Route>() {
        Route::Root {} | Route::Login {} | Route::Dashboard {} => None,
        Route::Calendar {}
        | Route::CreatePlan { .. }
        | Route::Add { .. }
        | Route::List {}
        | Route::NotFound { .. } => Some(Route::Dashboard {}),
        Route::EditPlan { .. } => Some(Route::Calendar {}),
    };

    rsx! {
        nav {
            class: "navbar is-fixed-top is-primary has-shadow has-text-weight-bold",
            div {
                class: "container",
                div {
                    class: "navbar-brand is-flex-grow-1",
                    a {
                        class: "navbar-item is-size-5",
                        class: if go_up_target.is_none() { "has-text-primary" },
                        Icon {
                            name: "chevron-left",
                            onclick: {
                                let go_up_target = go_up_target.clone();
                                move |_| {
                                    if let Some(go_up_target) = &go_up_target {
                                        navigator.push(go_up_target.clone());
                                    }
                                }
                            },
                        }
                    }
                    div { class: "navbar-item is-size-5", "{page_title}" }
                    div { class: "mx-auto" }
                    if NO_CONNECTION() {
                        a {
                            class: "navbar-item",
                            class: "is-size-5",
                            class: "mx-1",
                            ElementWithDescription {
                                description: "No connection to server",
                                right_aligned: true,
                                Icon { name: "plug-circle-xmark" }
                            }
                        }
                    }
                    a {
                        aria_expanded: menu_visible(),
                        aria_label: "menu",
                        class: "navbar-burger ml-0",
                        class: if menu_visible() { "is-active" },
                        role: "button",
                        onclick: move |_| { *menu_visible.write() = !menu_visible() },
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                    }
                }
                div {
                    class: "navbar-menu is-flex-grow-0",
                    class: if menu_visible() { "is-active" },
                    div {
                        class: "navbar-end",
                        a {
                            class: "navbar-item",
                            onclick: {
                                let mut settings_visible = settings_visible;
                                move |_| {
                                    *settings_visible.write() = true;
                                    *menu_visible.write() = false;
                                }
                            },
                            Icon { name: "gear", px: 5 }
                            "Settings"
                        }
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                signal_changed_data();
                                *menu_visible.write() = false;
                            },
                            Icon { name: "rotate", px: 5 }
                            "Refresh data"
                        }
                        if let Some(user) = user {
                            a {
                                class: "navbar-item",
                                onclick: {
                                    move |_| {
                                        async move {
                                            let result = DOMAIN_SERVICE.read().delete_session().await;
                                            match result {
                                                Ok(()) => {
                                                    session.restart();
                                                    navigator.push(Route::Root {});
                                                }
                                                Err(err) => {
                                                    NOTIFICATIONS
                                                        .write()
                                                        .push(format!("Failed to log out: {err}"));
                                                }
                                            }
                                            *menu_visible.write() = false;
                                        }
                                    }
                                },
                                Icon { name: "sign-out-alt", px: 5 }
                                "Log out ({user.display_name.clone().unwrap_or_else(|| user.email.to_string())})"
                            }
                        }
                    }
                }
            }
        }

        if *settings_visible.read() {
            Settings { settings, rest_day_warning, settings_visible }
        }

        Outlet::<Route> {}
    }
}

#[component]
fn Settings(
    settings: Resource<Result<web_app::Settings, String>>,
    rest_day_warning: Resource<Result<u32, domain::ReadError>>,
    settings_visible: Signal<bool>,
) -> Element {
    match settings.read().clone() {
        Some(Ok(settings)) => rsx! {
            Dialog {
                color: Color::Primary,
                title: rsx! { "Settings" },
                close_event: {
                    move |_| {
                        async move {
                            *settings_visible.write() = false;
                        }
                    }
                },
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Theme" }
                    div {
                        class: "field has-addons",
                        p {
                            class: "control",
                            button {
                                class: "button",
                                class: if settings.theme == web_app::Theme::Light { "is-link" },
                                onclick: {
                                    move |_| {
                                        let mut settings = settings;
                                        settings.theme = web_app::Theme::Light;
                                        async move {
                                            let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                        }
                                    }
                                },
                                Icon { name: "sun", is_small: true }
                                span { "Light" }
                            }
                        }
                        p {
                            class: "control",
                            span {
                                class: "button",
                                class: if settings.theme == web_app::Theme::Dark { "is-link" },
                                onclick: {
                                    move |_| {
                                        let mut settings = settings;
                                        settings.theme = web_app::Theme::Dark;
                                        async move {
                                            let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                        }
                                    }
                                },
                                Icon { name: "moon", is_small: true }
                                span { "Dark" }
                            }
                        }
                        p { class: "control",
                            span {
                                class: "button",
                                class: if settings.theme == web_app::Theme::System { "is-link" },
                                onclick: {
                                    move |_| {
                                        let mut settings = settings;
                                        settings.theme = web_app::Theme::System;
                                        async move {
                                            let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                                        }
                                    }
                                },
                                Icon { name: "desktop", is_small: true }
                                span { "System" }
                            }
                        }
                    }
                }
                p {
                    class: "mb-5",
                    onclick: {
                        move |_| {
                            let mut settings = settings;
                            settings.notifications = !settings.notifications;
                            async move {
                                let _ = WEB_APP_SERVICE.write().set_settings(settings).await;
                            }
                        }
                    },
                    h1 { class: "subtitle", "Notifications" }
                    if settings.notifications {
                        button { class: "button is-link", "Enabled" }
                    } else {
                        button { class: "button", "Disabled" }
                    }
                }
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Rest day warning" }
                    match *rest_day_warning.read() {
                        Some(Ok(days)) => rsx! {
                            RestDayWarningField { days }
                        },
                        Some(Err(ref err)) => rsx! {
                            ErrorMessage { message: "Failed to get rest day warning: {err}" }
                        },
                        None => rsx! { Loading {} },
                    }
                }
            }
        },
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "Failed to get settings: {err}" }
        },
        None => Loading(),
    }
}

#[component]
fn RestDayWarningField(days: u32) -> Element {
    let mut value = use_signal(|| FieldValue::new(days));

    let save = move |_| async move {
        let validated = value.read().validated.clone();
        if let Ok(days) = validated {
            match DOMAIN_SERVICE.read().set_rest_day_warning(days).await {
                Ok(_) => {
                    *value.write() = FieldValue::new(days);
                    signal_changed_data();
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to save rest day warning: {err}"));
                }
            }
        }
    };

    rsx! {
        InputField {
            help: "Warn when a muscle group has not been trained for this many days.".to_string(),
            inputmode: "numeric".to_string(),
            right_icon: rsx! { "days" },
            value: value.read().input.clone(),
            error: if let Err(err) = &value.read().validated { err.clone() },
            has_changed: value.read().changed(),
            oninput: move |event: FormEvent| {
                let mut value = value.write();
                value.input = event.value();
                value.validated = DOMAIN_SERVICE
                    .read()
                    .validate_rest_day_warning(&value.input)
                    .map_err(|err| err.to_string());
            },
        }
        button {
            class: "button is-primary",
            disabled: !FieldValue::has_valid_changes(&[&*value.read() as &dyn FieldValueState]),
            onclick: save,
            "Save"
        }
    }
}
