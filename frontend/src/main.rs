use crate::app::App;

mod app;
mod components;
mod config;
mod logger;
mod services;
mod unload_guard;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    unload_guard::install();

    yew::Renderer::<App>::new().render();
}
