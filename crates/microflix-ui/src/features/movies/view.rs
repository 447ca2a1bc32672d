use std::cell::Cell;
use std::rc::Rc;

use microflix_api_models::{Movie, RatingSummary};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::notice::NoticeList;
use crate::components::pagination::Pagination;
use crate::components::remote::dismiss_callback;
use crate::core::feedback::failure_message;
use crate::core::remote::{LoadEvent, Loadable, Remote};
use crate::features::movie_actions::view::MovieActions;
use crate::features::movies::state::{DETAIL_FAILED, LIST_FAILED, ListState, listing_query};

#[function_component(MoviesPage)]
pub(crate) fn movies_page() -> Html {
    let ctx = use_context::<AppCtx>();
    let page = use_state(|| 0_u32);
    let list = use_reducer(ListState::default);

    {
        let dispatcher = list.dispatcher();
        use_effect_with_deps(
            move |page: &u32| {
                let cancelled = Rc::new(Cell::new(false));
                dispatcher.dispatch(LoadEvent::Started);
                if let Some(ctx) = ctx {
                    let query = listing_query(*page);
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        let result = ctx.api.fetch_movies(&query).await;
                        if cancelled.get() {
                            return;
                        }
                        dispatcher.dispatch(LoadEvent::Finished(
                            result.map_err(|err| failure_message(&err, LIST_FAILED)),
                        ));
                    });
                }
                move || cancelled.set(true)
            },
            *page,
        );
    }

    let on_select = {
        let page = page.clone();
        Callback::from(move |target: u32| page.set(target))
    };

    let body = match &list.data {
        Remote::Loading => html! { <p class="muted">{"Loading movies..."}</p> },
        Remote::Failed => html! {},
        Remote::Loaded(result) if result.content.is_empty() => html! {
            <div class="empty-state muted">{"No movies found yet."}</div>
        },
        Remote::Loaded(result) => html! {
            <div class="movie-grid">
                {for result.content.iter().map(render_card)}
            </div>
        },
    };

    html! {
        <section class="movies">
            <header>
                <h1>{"Movies"}</h1>
                <p class="muted">{"Browse the MicroFlix catalog."}</p>
            </header>
            <NoticeList notices={list.notices.items().to_vec()} on_dismiss={dismiss_callback(list.dispatcher())} />
            {body}
            <Pagination current={*page} total={list.total_pages()} {on_select} />
        </section>
    }
}

fn render_card(movie: &Movie) -> Html {
    html! {
        <article class="movie-card" key={movie.id}>
            <Link<Route> to={Route::MovieDetail { id: movie.id }}>
                {poster(movie)}
                <h2>{movie.title.clone()}</h2>
            </Link<Route>>
            {movie.release_year.map_or_else(Html::default, |year| html! { <p class="muted">{year}</p> })}
            {if movie.genres.is_empty() {
                html! {}
            } else {
                html! { <p class="muted">{movie.genres.join(" • ")}</p> }
            }}
        </article>
    }
}

fn poster(movie: &Movie) -> Html {
    movie.poster_url.as_ref().map_or_else(
        || html! { <div class="poster placeholder">{"No poster"}</div> },
        |url| html! { <img class="poster" src={url.clone()} alt={movie.title.clone()} /> },
    )
}

#[derive(Properties, PartialEq, Eq)]
pub(crate) struct MovieDetailProps {
    pub(crate) id: i64,
}

type Detail = Loadable<(Movie, Option<RatingSummary>)>;

#[function_component(MovieDetailPage)]
pub(crate) fn movie_detail_page(props: &MovieDetailProps) -> Html {
    let ctx = use_context::<AppCtx>();
    let detail = use_reducer(Detail::default);

    {
        let dispatcher = detail.dispatcher();
        use_effect_with_deps(
            move |id: &i64| {
                let id = *id;
                let cancelled = Rc::new(Cell::new(false));
                dispatcher.dispatch(LoadEvent::Started);
                if let Some(ctx) = ctx {
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        let movie = ctx.api.fetch_movie(id).await;
                        let summary = ctx.api.fetch_rating_summary(id).await.ok();
                        if cancelled.get() {
                            return;
                        }
                        dispatcher.dispatch(LoadEvent::Finished(
                            movie
                                .map(|movie| (movie, summary))
                                .map_err(|err| failure_message(&err, DETAIL_FAILED)),
                        ));
                    });
                }
                move || cancelled.set(true)
            },
            props.id,
        );
    }

    let notices = html! {
        <NoticeList notices={detail.notices.items().to_vec()} on_dismiss={dismiss_callback(detail.dispatcher())} />
    };

    match &detail.data {
        Remote::Loading => html! { <p class="muted">{"Loading movie..."}</p> },
        Remote::Failed => html! {
            <section class="movie-detail">
                {notices}
                <Link<Route> to={Route::Movies}>{"← Back to movies"}</Link<Route>>
            </section>
        },
        Remote::Loaded((movie, summary)) => html! {
            <section class="movie-detail">
                {notices}
                {poster(movie)}
                <div class="stack">
                    <h1>{movie.title.clone()}</h1>
                    {movie.release_year.map_or_else(Html::default, |year| html! { <p class="muted">{year}</p> })}
                    {movie.overview.clone().map_or_else(Html::default, |text| html! { <p>{text}</p> })}
                    {render_summary(summary.as_ref())}
                    <MovieActions movie_id={movie.id} />
                </div>
            </section>
        },
    }
}

fn render_summary(summary: Option<&RatingSummary>) -> Html {
    match summary {
        Some(RatingSummary {
            average: Some(average),
            count,
            ..
        }) if *count > 0 => html! {
            <p class="muted">{format!("{average:.1} / 10 from {count} ratings")}</p>
        },
        Some(_) => html! { <p class="muted">{"No ratings yet."}</p> },
        None => html! {},
    }
}
