use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures_util::future::try_join_all;
use gloo::console;
use microflix_client::ApiError;
use microflix_session::AuthView;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::lifecycle::use_unmounted;
use crate::components::notice::NoticeList;
use crate::components::session::use_auth_view;
use crate::core::feedback::{Feedback, classify};
use crate::core::forms::format_rating_input;
use crate::core::remote::Remote;
use crate::features::library::state::{
    RATING_REMOVE_FAILED, RATINGS_LOAD_FAILED, RatedMovie, Shelf, ShelfEntry, ShelfEvent,
    WATCHLIST_LOAD_FAILED, WATCHLIST_UPDATE_FAILED, WatchlistEntry, rated_movies,
    watchlist_entries,
};

impl<T: ShelfEntry + Clone + 'static> Reducible for Shelf<T> {
    type Action = ShelfEvent<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

type ShelfDispatcher<T> = UseReducerDispatcher<Shelf<T>>;

async fn load_watchlist(ctx: AppCtx, token: String) -> Result<Vec<WatchlistEntry>, ApiError> {
    let items = ctx.api.fetch_watchlist(&token).await?;
    let movies = try_join_all(items.iter().map(|item| ctx.api.fetch_movie(item.movie_id))).await?;
    Ok(watchlist_entries(items, movies))
}

async fn load_ratings(ctx: AppCtx, token: String) -> Result<Vec<RatedMovie>, ApiError> {
    let ratings = ctx.api.fetch_my_ratings(&token).await?;
    let movies =
        try_join_all(ratings.iter().map(|rating| ctx.api.fetch_movie(rating.movie_id))).await?;
    Ok(rated_movies(ratings, movies))
}

async fn remove_watchlist_entry(
    ctx: AppCtx,
    movie_id: i64,
    token: String,
) -> Result<(), ApiError> {
    ctx.api.remove_from_watchlist(movie_id, &token).await
}

async fn remove_rating(ctx: AppCtx, movie_id: i64, token: String) -> Result<(), ApiError> {
    ctx.api.delete_my_rating(movie_id, &token).await
}

fn report<T>(ctx: &AppCtx, dispatcher: &ShelfDispatcher<T>, err: &ApiError, fallback: &str)
where
    T: ShelfEntry + Clone + 'static,
{
    let feedback = classify(err, fallback);
    if feedback == Feedback::AuthExpired {
        console::warn!("session rejected by the gateway; signing out");
        ctx.session.clear();
    }
    dispatcher.dispatch(ShelfEvent::Failed(feedback));
}

/// Shared wiring of a personal list page: follows the session, loads the
/// rows while signed in and removes rows on request.
#[hook]
fn use_shelf<T, L, LF, R, RF>(
    load: L,
    load_failed: &'static str,
    remove: R,
    remove_failed: &'static str,
) -> (AuthView, UseReducerHandle<Shelf<T>>, Callback<i64>)
where
    T: ShelfEntry + Clone + 'static,
    L: Fn(AppCtx, String) -> LF + 'static,
    LF: Future<Output = Result<Vec<T>, ApiError>> + 'static,
    R: Fn(AppCtx, i64, String) -> RF + 'static,
    RF: Future<Output = Result<(), ApiError>> + 'static,
{
    let ctx = use_context::<AppCtx>();
    let auth = use_auth_view();
    let shelf = use_reducer(Shelf::<T>::default);
    let unmounted = use_unmounted();

    {
        let ctx = ctx.clone();
        let dispatcher = shelf.dispatcher();
        use_effect_with_deps(
            move |auth: &AuthView| {
                let cancelled = Rc::new(Cell::new(false));
                dispatcher.dispatch(ShelfEvent::Started);
                let session = ctx.filter(|_| auth.is_signed_in()).and_then(|ctx| {
                    let token = ctx.token()?;
                    Some((ctx, token))
                });
                if let Some((ctx, token)) = session {
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        let result = load(ctx.clone(), token).await;
                        if cancelled.get() {
                            return;
                        }
                        match result {
                            Ok(rows) => dispatcher.dispatch(ShelfEvent::Loaded(rows)),
                            Err(err) => report(&ctx, &dispatcher, &err, load_failed),
                        }
                    });
                }
                move || cancelled.set(true)
            },
            auth.clone(),
        );
    }

    let on_remove = {
        let dispatcher = shelf.dispatcher();
        Callback::from(move |movie_id: i64| {
            let Some(ctx) = ctx.clone() else {
                return;
            };
            let Some(token) = ctx.token() else {
                return;
            };
            dispatcher.dispatch(ShelfEvent::Removing(movie_id));
            let dispatcher = dispatcher.clone();
            let unmounted = unmounted.clone();
            let pending = remove(ctx.clone(), movie_id, token);
            spawn_local(async move {
                let result = pending.await;
                if unmounted.get() {
                    return;
                }
                match result {
                    Ok(()) => dispatcher.dispatch(ShelfEvent::Removed(movie_id)),
                    Err(err) => report(&ctx, &dispatcher, &err, remove_failed),
                }
            });
        })
    };

    (auth, shelf, on_remove)
}

fn signed_out_prompt(title: &'static str, reason: &'static str) -> Html {
    html! {
        <section class="library stack">
            <h1>{title}</h1>
            <p>{reason}</p>
            <Link<Route> to={Route::Login}>{"Go to login →"}</Link<Route>>
        </section>
    }
}

fn shelf_notices<T: ShelfEntry + Clone + 'static>(shelf: &UseReducerHandle<Shelf<T>>) -> Html {
    let dispatcher = shelf.dispatcher();
    let on_dismiss = Callback::from(move |id: u64| dispatcher.dispatch(ShelfEvent::Dismiss(id)));
    html! { <NoticeList notices={shelf.notices.items().to_vec()} {on_dismiss} /> }
}

fn remove_button(
    movie_id: i64,
    busy: bool,
    label: &'static str,
    on_remove: &Callback<i64>,
) -> Html {
    html! {
        <button
            type="button"
            class="ghost"
            disabled={busy}
            onclick={on_remove.reform(move |_: MouseEvent| movie_id)}
        >
            {label}
        </button>
    }
}

#[function_component(WatchlistPage)]
pub(crate) fn watchlist_page() -> Html {
    let (auth, shelf, on_remove) = use_shelf(
        load_watchlist,
        WATCHLIST_LOAD_FAILED,
        remove_watchlist_entry,
        WATCHLIST_UPDATE_FAILED,
    );

    match auth {
        AuthView::Loading => return html! { <p class="muted">{"Checking session…"}</p> },
        AuthView::SignedOut => {
            return signed_out_prompt("Watchlist", "Sign in to see the movies you saved for later.");
        }
        AuthView::SignedIn { .. } => {}
    }

    let body = match &shelf.entries {
        Remote::Loading => html! { <p class="muted">{"Loading your watchlist…"}</p> },
        Remote::Failed => html! {},
        Remote::Loaded(rows) if rows.is_empty() => html! {
            <p class="muted">
                {"Your watchlist is empty. "}
                <Link<Route> to={Route::Movies}>{"Browse movies"}</Link<Route>>
            </p>
        },
        Remote::Loaded(rows) => html! {
            <ul class="library-list">
                {for rows.iter().map(|row| html! {
                    <li key={row.movie.id}>
                        <Link<Route> to={Route::MovieDetail { id: row.movie.id }}>
                            {row.movie.title.clone()}
                        </Link<Route>>
                        <span class="muted">{format!(" added {}", row.item.added_at.date_naive())}</span>
                        {remove_button(row.movie.id, shelf.busy(), "Remove", &on_remove)}
                    </li>
                })}
            </ul>
        },
    };

    html! {
        <section class="library stack">
            <h1>{"Watchlist"}</h1>
            {shelf_notices(&shelf)}
            {body}
        </section>
    }
}

#[function_component(MyRatingsPage)]
pub(crate) fn my_ratings_page() -> Html {
    let (auth, shelf, on_remove) =
        use_shelf(load_ratings, RATINGS_LOAD_FAILED, remove_rating, RATING_REMOVE_FAILED);

    match auth {
        AuthView::Loading => return html! { <p class="muted">{"Checking session…"}</p> },
        AuthView::SignedOut => {
            return signed_out_prompt("My ratings", "Sign in to see the movies you rated.");
        }
        AuthView::SignedIn { .. } => {}
    }

    let body = match &shelf.entries {
        Remote::Loading => html! { <p class="muted">{"Loading your ratings…"}</p> },
        Remote::Failed => html! {},
        Remote::Loaded(rows) if rows.is_empty() => html! {
            <p class="muted">
                {"You have not rated any movies yet. "}
                <Link<Route> to={Route::Movies}>{"Browse movies"}</Link<Route>>
            </p>
        },
        Remote::Loaded(rows) => html! {
            <ul class="library-list">
                {for rows.iter().map(|row| html! {
                    <li key={row.movie.id}>
                        <Link<Route> to={Route::MovieDetail { id: row.movie.id }}>
                            {row.movie.title.clone()}
                        </Link<Route>>
                        <span class="muted">{format!(" {}/10", format_rating_input(row.rating.rate))}</span>
                        {remove_button(row.movie.id, shelf.busy(), "Remove rating", &on_remove)}
                    </li>
                })}
            </ul>
        },
    };

    html! {
        <section class="library stack">
            <h1>{"My ratings"}</h1>
            {shelf_notices(&shelf)}
            {body}
        </section>
    }
}
