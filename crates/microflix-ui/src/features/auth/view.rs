use microflix_api_models::SessionRecord;
use microflix_client::ApiError;
use microflix_session::AuthView;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::components::notice::FormNotices;
use crate::components::session::use_auth_view;
use crate::core::feedback::{NoticeAction, Notices, failure_message};
use crate::core::forms::{LoginForm, RegisterForm};
use crate::features::auth::{LOGIN_FAILED, REGISTER_FAILED};

/// Session view for a sign-in style page; moves on to the catalog once a
/// session exists.
#[hook]
fn use_signed_out_only() -> AuthView {
    let navigator = use_navigator();
    let auth = use_auth_view();
    use_effect_with_deps(
        move |auth: &AuthView| {
            if auth.is_signed_in() {
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Movies);
                }
            }
        },
        auth.clone(),
    );
    auth
}

fn text_input<F>(form: &UseStateHandle<F>, update: fn(&mut F, String)) -> Callback<InputEvent>
where
    F: Clone + 'static,
{
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
        }
    })
}

/// Save the session a successful call returned, or show why it failed.
fn finish(
    ctx: &AppCtx,
    result: Result<SessionRecord, ApiError>,
    fallback: &str,
    notices: &UseReducerDispatcher<Notices>,
    submitting: &UseStateHandle<bool>,
    navigator: Option<&Navigator>,
) {
    match result {
        Ok(session) => {
            // Every mounted fragment, this page included, reloads from the
            // bus signal.
            ctx.session.save(&session);
            if let Some(navigator) = navigator {
                navigator.push(&Route::Movies);
            }
        }
        Err(err) => {
            notices.dispatch(NoticeAction::ShowError(failure_message(&err, fallback)));
            submitting.set(false);
        }
    }
}

fn checking(title: &'static str) -> Html {
    html! {
        <section class="login">
            <h1>{title}</h1>
            <p class="muted">{"Checking your session…"}</p>
        </section>
    }
}

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let ctx = use_context::<AppCtx>();
    let navigator = use_navigator();
    let auth = use_signed_out_only();
    let form = use_state(LoginForm::default);
    let submitting = use_state(|| false);
    let notices = use_reducer(Notices::default);

    if auth != AuthView::SignedOut {
        return checking("Sign in");
    }

    let on_email = text_input(&form, |form, value| form.email = value);
    let on_password = text_input(&form, |form, value| form.password = value);

    let on_submit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let notices = notices.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match form.validate() {
                Ok(request) => request,
                Err(message) => {
                    notices.dispatch(NoticeAction::ShowError(message));
                    return;
                }
            };
            let Some(ctx) = ctx.clone() else {
                return;
            };
            notices.dispatch(NoticeAction::Clear);
            submitting.set(true);
            let submitting = submitting.clone();
            let notices = notices.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = ctx.api.login(&request).await;
                finish(&ctx, result, LOGIN_FAILED, &notices, &submitting, navigator.as_ref());
            });
        })
    };

    html! {
        <section class="login stack">
            <h1>{"Sign in"}</h1>
            <p class="muted">{"Use your MicroFlix account to rate movies and manage your watchlist."}</p>
            <FormNotices notices={notices.clone()} />
            <form class="stack" onsubmit={on_submit}>
                <label class="stack">
                    <span>{"Email"}</span>
                    <input type="email" autocomplete="email" required=true value={form.email.clone()} oninput={on_email} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" autocomplete="current-password" required=true value={form.password.clone()} oninput={on_password} />
                </label>
                <button type="submit" class="solid" disabled={*submitting}>
                    {if *submitting { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="muted">
                {"New here? "}
                <Link<Route> to={Route::Register}>{"Create an account"}</Link<Route>>
            </p>
        </section>
    }
}

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let ctx = use_context::<AppCtx>();
    let navigator = use_navigator();
    let auth = use_signed_out_only();
    let form = use_state(RegisterForm::default);
    let submitting = use_state(|| false);
    let notices = use_reducer(Notices::default);

    if auth != AuthView::SignedOut {
        return checking("Create account");
    }

    let on_display_name = text_input(&form, |form, value| form.display_name = value);
    let on_email = text_input(&form, |form, value| form.email = value);
    let on_password = text_input(&form, |form, value| form.password = value);

    let on_submit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let notices = notices.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match form.validate() {
                Ok(request) => request,
                Err(message) => {
                    notices.dispatch(NoticeAction::ShowError(message));
                    return;
                }
            };
            let Some(ctx) = ctx.clone() else {
                return;
            };
            notices.dispatch(NoticeAction::Clear);
            submitting.set(true);
            let submitting = submitting.clone();
            let notices = notices.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = ctx.api.register(&request).await;
                finish(&ctx, result, REGISTER_FAILED, &notices, &submitting, navigator.as_ref());
            });
        })
    };

    html! {
        <section class="login stack">
            <h1>{"Create account"}</h1>
            <p class="muted">{"Join MicroFlix to rate movies and keep a watchlist."}</p>
            <FormNotices notices={notices.clone()} />
            <form class="stack" onsubmit={on_submit}>
                <label class="stack">
                    <span>{"Display name"}</span>
                    <input type="text" autocomplete="nickname" required=true value={form.display_name.clone()} oninput={on_display_name} />
                </label>
                <label class="stack">
                    <span>{"Email"}</span>
                    <input type="email" autocomplete="email" required=true value={form.email.clone()} oninput={on_email} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" autocomplete="new-password" required=true value={form.password.clone()} oninput={on_password} />
                </label>
                <button type="submit" class="solid" disabled={*submitting}>
                    {if *submitting { "Creating account..." } else { "Create account" }}
                </button>
            </form>
            <p class="muted">
                {"Already registered? "}
                <Link<Route> to={Route::Login}>{"Sign in"}</Link<Route>>
            </p>
        </section>
    }
}
