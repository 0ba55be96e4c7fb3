//! Home page: where a signed-in user lands.

use crate::components::Nav;
use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <Nav/>
            <section class="lists">
                <h1>"Minhas listas"</h1>
                <p class="empty-state">"Nenhuma lista ainda."</p>
            </section>
        </div>
    }
}
