//! Hook that keeps a component in step with the stored session.

use futures_util::future::abortable;
use microflix_session::{AuthView, SessionFragment};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::AppCtx;

/// Current session view. Loads synchronously on mount, follows every
/// change signal while mounted and unsubscribes on unmount.
#[hook]
pub(crate) fn use_auth_view() -> AuthView {
    let ctx = use_context::<AppCtx>();
    let view = use_state(AuthView::default);
    {
        let view = view.clone();
        use_effect_with_deps(
            move |_| {
                let handle = if let Some(ctx) = ctx {
                    let mut fragment = SessionFragment::mount(ctx.session);
                    view.set(fragment.view().clone());
                    let (task, handle) = abortable(async move {
                        while let Some(next) = fragment.changed().await {
                            view.set(next.clone());
                        }
                    });
                    spawn_local(async move {
                        let _ = task.await;
                    });
                    Some(handle)
                } else {
                    view.set(AuthView::SignedOut);
                    None
                };
                // Aborting drops the fragment and with it the subscription.
                move || {
                    if let Some(handle) = handle {
                        handle.abort();
                    }
                }
            },
            (),
        );
    }
    (*view).clone()
}
