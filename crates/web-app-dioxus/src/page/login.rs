use dioxus::prelude::*;

use robur_domain as domain;
use robur_domain::SessionService;

use crate::{
    DOMAIN_SERVICE, NO_CONNECTION, NOTIFICATIONS, Route,
    component::{
        element::{Icon, NoConnection, Title},
        form::{FieldValue, FieldValueState, InputField},
    },
};

#[component]
pub fn Login() -> Element {
    let mut email = use_signal(FieldValue::<domain::EmailAddress>::default);
    let mut password = use_signal(FieldValue::<domain::Password>::default);
    let mut is_loading = use_signal(|| false);
    let navigator = use_navigator();

    let credentials = move || {
        let email = email.read().validated.clone();
        let password = password.read().validated.clone();
        if let (Ok(email), Ok(password)) = (email, password) {
            Some(domain::Credentials { email, password })
        } else {
            None
        }
    };

    let log_in = move |_| async move {
        let Some(credentials) = credentials() else {
            return;
        };
        *is_loading.write() = true;
        let result = DOMAIN_SERVICE.read().request_session(credentials).await;
        *is_loading.write() = false;
        match result {
            Ok(_) => {
                navigator.push(Route::Dashboard {});
            }
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection)) => {
                *NO_CONNECTION.write() = true;
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to log in: {err}"));
            }
        }
    };

    let register = move |_| async move {
        let Some(credentials) = credentials() else {
            return;
        };
        *is_loading.write() = true;
        let result = DOMAIN_SERVICE.read().register_user(credentials).await;
        *is_loading.write() = false;
        match result {
            Ok(_) => {
                navigator.push(Route::Dashboard {});
            }
            Err(domain::CreateError::Conflict) => {
                NOTIFICATIONS
                    .write()
                    .push("An account with this email address already exists".to_string());
            }
            Err(err) => {
                NOTIFICATIONS
                    .write()
                    .push(format!("Failed to register: {err}"));
            }
        }
    };

    rsx! {
        div {
            class: "container",
            Title { title: "Log in".to_string() }
            if NO_CONNECTION() {
                NoConnection {}
            }
            InputField {
                label: "Email address".to_string(),
                r#type: "email".to_string(),
                left_icon: rsx! { Icon { name: "envelope" } },
                value: email.read().input.clone(),
                error: if let Err(err) = &email.read().validated { err.clone() },
                has_changed: email.read().changed(),
                oninput: move |event: FormEvent| {
                    let mut email = email.write();
                    email.input = event.value();
                    email.validated = DOMAIN_SERVICE
                        .read()
                        .validate_email(&email.input)
                        .map_err(|err| err.to_string());
                },
            }
            InputField {
                label: "Password".to_string(),
                r#type: "password".to_string(),
                left_icon: rsx! { Icon { name: "lock" } },
                value: password.read().input.clone(),
                error: if let Err(err) = &password.read().validated { err.clone() },
                has_changed: password.read().changed(),
                oninput: move |event: FormEvent| {
                    let mut password = password.write();
                    password.input = event.value();
                    password.validated = DOMAIN_SERVICE
                        .read()
                        .validate_password(&password.input)
                        .map_err(|err| err.to_string());
                },
            }
            div {
                class: "field is-grouped is-grouped-centered",
                div {
                    class: "control",
                    button {
                        class: "button is-primary",
                        class: if is_loading() { "is-loading" },
                        disabled: !FieldValue::all_valid(&[
                            &*email.read() as &dyn FieldValueState,
                            &*password.read(),
                        ]),
                        onclick: log_in,
                        "Log in"
                    }
                }
                div {
                    class: "control",
                    button {
                        class: "button is-light",
                        class: if is_loading() { "is-loading" },
                        disabled: !FieldValue::all_valid(&[
                            &*email.read() as &dyn FieldValueState,
                            &*password.read(),
                        ]),
                        onclick: register,
                        "Register"
                    }
                }
            }
        }
    }
}
