//! Routing definitions for the Microflix UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/movies")]
    Movies,
    #[at("/movies/:id")]
    MovieDetail { id: i64 },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/watchlist")]
    Watchlist,
    #[at("/profile/ratings")]
    MyRatings,
    #[not_found]
    #[at("/404")]
    NotFound,
}
