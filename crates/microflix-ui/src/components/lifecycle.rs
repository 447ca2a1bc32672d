use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

/// Flag that turns true when the component unmounts. Async handlers check
/// it before touching component state.
#[hook]
pub(crate) fn use_unmounted() -> Rc<Cell<bool>> {
    let unmounted = use_memo(|_| Rc::new(Cell::new(false)), ());
    {
        let unmounted = (*unmounted).clone();
        use_effect_with_deps(move |_| move || unmounted.set(true), ());
    }
    (*unmounted).clone()
}
