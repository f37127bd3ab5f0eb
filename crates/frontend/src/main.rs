mod components;
mod config;
mod geolocation;
mod leaflet;
mod logging;
mod pages;

use dioxus::prelude::*;
use tracing::warn;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        pages::tracker::Tracker {}
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let (config, problem) = config::load();
    logging::init(&config.log_filter);
    if let Some(e) = problem {
        warn!(key = config::STORAGE_KEY, "ignoring stored overrides: {}", e);
    }

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}
