use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::join;
use gloo::console;
use microflix_client::ApiError;
use microflix_session::AuthView;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::lifecycle::use_unmounted;
use crate::components::notice::NoticeList;
use crate::components::session::use_auth_view;
use crate::core::feedback::{Feedback, classify};
use crate::core::forms::{format_rating_input, parse_rating_input};
use crate::features::movie_actions::state::{
    DELETE_FAILED, LOAD_FAILED, MovieActionsEvent, MovieActionsState, SAVE_FAILED,
    WATCHLIST_FAILED,
};

impl Reducible for MovieActionsState {
    type Action = MovieActionsEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

type Dispatcher = UseReducerDispatcher<MovieActionsState>;

#[derive(Properties, PartialEq, Eq)]
pub(crate) struct MovieActionsProps {
    pub(crate) movie_id: i64,
}

/// Rating and watchlist controls for the signed-in user.
#[function_component(MovieActions)]
pub(crate) fn movie_actions(props: &MovieActionsProps) -> Html {
    let ctx = use_context::<AppCtx>();
    let auth = use_auth_view();
    let state = use_reducer(MovieActionsState::default);
    let unmounted = use_unmounted();

    {
        let ctx = ctx.clone();
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |(auth, movie_id): &(AuthView, i64)| {
                let movie_id = *movie_id;
                let cancelled = Rc::new(Cell::new(false));
                dispatcher.dispatch(MovieActionsEvent::Session(auth.clone()));
                if let (true, Some(ctx)) = (auth.is_signed_in(), ctx) {
                    if let Some(token) = ctx.token() {
                        let cancelled = cancelled.clone();
                        spawn_local(async move {
                            let (rating, membership) = join(
                                ctx.api.fetch_my_rating(movie_id, &token),
                                ctx.api.is_in_watchlist(movie_id, &token),
                            )
                            .await;
                            if cancelled.get() {
                                return;
                            }
                            match (rating, membership) {
                                (Ok(rating), Ok(in_watchlist)) => {
                                    dispatcher.dispatch(MovieActionsEvent::Loaded {
                                        rating,
                                        in_watchlist,
                                    });
                                }
                                (Err(err), _) | (_, Err(err)) => {
                                    report(&ctx, &dispatcher, &err, LOAD_FAILED);
                                }
                            }
                        });
                    }
                }
                move || cancelled.set(true)
            },
            (auth, props.movie_id),
        );
    }

    if !state.auth.is_signed_in() {
        return html! {
            <div class="movie-actions">
                <p>{"Sign in to rate this movie and manage your watchlist."}</p>
                <Link<Route> to={Route::Login}>{"Go to login →"}</Link<Route>>
            </div>
        };
    }

    let movie_id = props.movie_id;

    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                dispatcher.dispatch(MovieActionsEvent::InputChanged(input.value()));
            }
        })
    };

    let on_save = {
        let ctx = ctx.clone();
        let dispatcher = state.dispatcher();
        let unmounted = unmounted.clone();
        let input = state.rating_input.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some((ctx, token)) = signed_in(ctx.as_ref()) else {
                return;
            };
            let rate = match parse_rating_input(&input) {
                Ok(rate) => rate,
                Err(message) => {
                    dispatcher.dispatch(MovieActionsEvent::Invalid(message));
                    return;
                }
            };
            dispatcher.dispatch(MovieActionsEvent::SavingStarted);
            let dispatcher = dispatcher.clone();
            let unmounted = unmounted.clone();
            spawn_local(async move {
                let result = ctx.api.upsert_my_rating(movie_id, rate, &token).await;
                if unmounted.get() {
                    return;
                }
                match result {
                    Ok(rating) => dispatcher.dispatch(MovieActionsEvent::RatingSaved(rating)),
                    Err(err) => report(&ctx, &dispatcher, &err, SAVE_FAILED),
                }
            });
        })
    };

    let on_delete = {
        let ctx = ctx.clone();
        let dispatcher = state.dispatcher();
        let unmounted = unmounted.clone();
        Callback::from(move |_: MouseEvent| {
            let Some((ctx, token)) = signed_in(ctx.as_ref()) else {
                return;
            };
            dispatcher.dispatch(MovieActionsEvent::SavingStarted);
            let dispatcher = dispatcher.clone();
            let unmounted = unmounted.clone();
            spawn_local(async move {
                let result = ctx.api.delete_my_rating(movie_id, &token).await;
                if unmounted.get() {
                    return;
                }
                match result {
                    Ok(()) => dispatcher.dispatch(MovieActionsEvent::RatingRemoved),
                    Err(err) => report(&ctx, &dispatcher, &err, DELETE_FAILED),
                }
            });
        })
    };

    let on_toggle = {
        let dispatcher = state.dispatcher();
        let unmounted = unmounted.clone();
        let present = state.in_watchlist;
        Callback::from(move |_: MouseEvent| {
            let Some((ctx, token)) = signed_in(ctx.as_ref()) else {
                return;
            };
            dispatcher.dispatch(MovieActionsEvent::ToggleStarted);
            let dispatcher = dispatcher.clone();
            let unmounted = unmounted.clone();
            spawn_local(async move {
                let result = if present {
                    ctx.api.remove_from_watchlist(movie_id, &token).await
                } else {
                    ctx.api.add_to_watchlist(movie_id, &token).await
                };
                if unmounted.get() {
                    return;
                }
                match result {
                    Ok(()) => dispatcher.dispatch(MovieActionsEvent::WatchlistChanged(!present)),
                    Err(err) => report(&ctx, &dispatcher, &err, WATCHLIST_FAILED),
                }
            });
        })
    };

    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(MovieActionsEvent::Dismiss(id)))
    };

    let display_name = match &state.auth {
        AuthView::SignedIn { display_name } => display_name.clone(),
        AuthView::Loading | AuthView::SignedOut => String::new(),
    };

    html! {
        <div class="movie-actions">
            <p class="muted">{"Signed in as "}<strong>{display_name}</strong></p>
            <NoticeList notices={state.notices.items().to_vec()} {on_dismiss} />
            {if state.loading {
                html! { <p class="muted">{"Loading your rating…"}</p> }
            } else {
                html! {
                    <div class="action-panels">
                        <form class="stack" onsubmit={on_save}>
                            <h3>{"Your rating"}</h3>
                            {state.rating.as_ref().map_or_else(Html::default, |rating| html! {
                                <p class="muted">{format!("Current: {}/10", format_rating_input(rating.rate))}</p>
                            })}
                            <input
                                type="number"
                                min="1"
                                max="10"
                                step="0.1"
                                value={state.rating_input.clone()}
                                oninput={on_input}
                            />
                            <button type="submit" class="solid" disabled={state.saving_rating}>
                                {if state.saving_rating { "Saving…" } else { "Save rating" }}
                            </button>
                            {if state.rating.is_some() {
                                html! {
                                    <button type="button" class="ghost" disabled={state.saving_rating} onclick={on_delete}>
                                        {"Remove"}
                                    </button>
                                }
                            } else {
                                html! {}
                            }}
                            <p class="muted">{"Enter a value between 1.0 and 10.0."}</p>
                        </form>
                        <div class="stack">
                            <h3>{"Watchlist"}</h3>
                            <p class="muted">
                                {if state.in_watchlist {
                                    "This movie is on your watchlist."
                                } else {
                                    "Add this movie to your watchlist to find it later."
                                }}
                            </p>
                            <button type="button" class="ghost" disabled={state.toggling_watchlist} onclick={on_toggle}>
                                {match (state.toggling_watchlist, state.in_watchlist) {
                                    (true, _) => "Updating…",
                                    (false, true) => "Remove from watchlist",
                                    (false, false) => "Add to watchlist",
                                }}
                            </button>
                        </div>
                    </div>
                }
            }}
        </div>
    }
}

fn signed_in(ctx: Option<&AppCtx>) -> Option<(AppCtx, String)> {
    let ctx = ctx?;
    let token = ctx.token()?;
    Some((ctx.clone(), token))
}

fn report(ctx: &AppCtx, dispatcher: &Dispatcher, err: &ApiError, fallback: &str) {
    let feedback = classify(err, fallback);
    if feedback == Feedback::AuthExpired {
        console::warn!("session rejected by the gateway; signing out");
        ctx.session.clear();
    }
    dispatcher.dispatch(MovieActionsEvent::Failed(feedback));
}
