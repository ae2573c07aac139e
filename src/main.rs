use dioxus::prelude::*;
use std::sync::Arc;

mod account;
mod actions;
mod clipboard;
mod components;
mod config;
mod error;
mod keystore;
mod network;
mod pin;
mod storage;
mod transaction;
mod wallet;

use components::*;
use config::NetworkConfig;
use network::HorizonClient;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    WalletView {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("stellar_demo_wallet"),
    );

    #[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = NetworkConfig::from_env();
        if !config.is_valid() {
            log::warn!("Network configuration looks incomplete: {:?}", config);
        }
        log::info!("Using Horizon at {}", config.horizon_url);
        WalletServices {
            client: Arc::new(HorizonClient::new(config.clone())),
            config,
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
