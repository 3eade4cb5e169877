use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    log::warn!("page not found: /{}", route.join("/"));
    navigator().replace(Route::Dashboard {});
    rsx! {}
}
