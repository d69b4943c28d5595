pub mod audio;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod storage;
pub mod styles;

use yew::prelude::*;

use crate::pages::spinner::SpinnerPage;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class={styles::CONTAINER}>
            <div class="mx-auto">
                <SpinnerPage />
            </div>
        </div>
    }
}
