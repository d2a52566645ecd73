//! Root layout: HTML shell, metadata, context providers, and routing.

use leptos::prelude::*;
use leptos_meta::{Meta, MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, users::UsersPage};
use crate::state::auth::AuthState;

/// Document title shared by every route.
pub const PAGE_TITLE: &str = "Chat App";
/// Document description shared by every route.
pub const PAGE_DESCRIPTION: &str = "Chat application";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth-session context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/messenger.css"/>
        <Title text=PAGE_TITLE/>
        <Meta name="description" content=PAGE_DESCRIPTION/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("users") view=UsersPage/>
            </Routes>
        </Router>
    }
}
