use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::auth_header::AuthHeader;
use crate::features::auth::view::{LoginPage, RegisterPage};
use crate::features::library::view::{MyRatingsPage, WatchlistPage};
use crate::features::movies::view::{MovieDetailPage, MoviesPage};

pub(crate) use api::AppCtx;
pub(crate) use routes::Route;

mod api;
mod routes;

#[function_component(MicroflixApp)]
fn microflix_app() -> Html {
    let ctx = use_memo(|_| AppCtx::new(), ());

    match &*ctx {
        Ok(ctx) => html! {
            <ContextProvider<AppCtx> context={ctx.clone()}>
                <BrowserRouter>
                    <header class="app-header">
                        <Link<Route> to={Route::Movies} classes="brand">{"MicroFlix"}</Link<Route>>
                        <AuthHeader />
                    </header>
                    <main class="app-main">
                        <Switch<Route> render={switch} />
                    </main>
                </BrowserRouter>
            </ContextProvider<AppCtx>>
        },
        Err(err) => {
            console::error!("gateway client unavailable", err.clone());
            html! { <p class="error-text">{"The app could not start. Please reload the page."}</p> }
        }
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Movies => html! { <MoviesPage /> },
        Route::MovieDetail { id } => html! { <MovieDetailPage {id} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Watchlist => html! { <WatchlistPage /> },
        Route::MyRatings => html! { <MyRatingsPage /> },
        Route::NotFound => html! { <p class="muted">{"Page not found."}</p> },
    }
}

/// Mount the app on `#root`, or on `<body>` when there is none.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<MicroflixApp>::with_root(root).render();
    } else {
        yew::Renderer::<MicroflixApp>::new().render();
    }
}
