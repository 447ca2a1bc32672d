//! Yew glue for [`Loadable`] state.

use std::rc::Rc;

use yew::prelude::*;

use crate::core::remote::{LoadEvent, Loadable};

impl<T: Clone + 'static> Reducible for Loadable<T> {
    type Action = LoadEvent<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

/// Close-button callback for the notices of a `use_reducer(Loadable::default)`.
pub(crate) fn dismiss_callback<T: Clone + 'static>(
    dispatcher: UseReducerDispatcher<Loadable<T>>,
) -> Callback<u64> {
    Callback::from(move |id: u64| dispatcher.dispatch(LoadEvent::Dismiss(id)))
}
