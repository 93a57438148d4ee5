use yew::prelude::*;

mod api;
mod config;
mod error;
mod export;
mod filter;
mod incomes;
mod layout;
mod loader;
mod modal;
mod models;
mod mutations;
mod state;
mod toast;

#[cfg(test)]
mod testing;

use config::{load_settings, AppSettings};
use incomes::IncomesPage;
use layout::Layout;

#[function_component(App)]
fn app() -> Html {
    let settings = use_state(load_settings);

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <Layout>
                <IncomesPage />
            </Layout>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}

fn main() {
    tracing_wasm::set_as_global_default();
    tracing::debug!("starting incomes frontend");
    yew::Renderer::<App>::new().render();
}
