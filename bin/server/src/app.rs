//! Main Leptos application component and routing.

use crate::pages::{HomePage, LoginPage};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/entrar";

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="listas"/>
        <Router>
            <main>
                <Routes fallback=|| "Pagina nao encontrada.".into_view()>
                    <Route path=path!("/") view=|| view! { <Redirect path=LOGIN_PATH/> }/>
                    <Route path=path!("/entrar") view=LoginPage/>
                    <Route path=path!("/home") view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}
