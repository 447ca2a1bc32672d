use microflix_session::AuthView;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::session::use_auth_view;

/// Header fragment: login and sign-up links when signed out; the user's
/// lists, name and a logout button when signed in.
#[function_component(AuthHeader)]
pub(crate) fn auth_header() -> Html {
    let ctx = use_context::<AppCtx>();
    let navigator = use_navigator();

    match use_auth_view() {
        AuthView::Loading => html! { <div class="auth-header muted">{"Checking session…"}</div> },
        AuthView::SignedOut => html! {
            <div class="auth-header">
                <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
                <Link<Route> to={Route::Register}>{"Sign up"}</Link<Route>>
            </div>
        },
        AuthView::SignedIn { display_name } => {
            let on_logout = Callback::from(move |_: MouseEvent| {
                if let Some(ctx) = &ctx {
                    ctx.session.clear();
                }
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Login);
                }
            });
            html! {
                <div class="auth-header">
                    <Link<Route> to={Route::Watchlist}>{"Watchlist"}</Link<Route>>
                    <Link<Route> to={Route::MyRatings}>{"My ratings"}</Link<Route>>
                    <span>{"Signed in as "}<strong>{display_name}</strong></span>
                    <button type="button" class="ghost" onclick={on_logout}>{"Logout"}</button>
                </div>
            }
        }
    }
}
