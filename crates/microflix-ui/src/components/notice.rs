use std::rc::Rc;

use yew::prelude::*;

use crate::core::feedback::{Notice, NoticeAction, NoticeKind, Notices};

impl Reducible for Notices {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NoticeListProps {
    pub(crate) notices: Vec<Notice>,
    pub(crate) on_dismiss: Callback<u64>,
}

/// Inline notices, each with a close button.
#[function_component(NoticeList)]
pub(crate) fn notice_list(props: &NoticeListProps) -> Html {
    if props.notices.is_empty() {
        return html! {};
    }
    html! {
        <div class="notices" aria-live="polite">
            {for props.notices.iter().map(|notice| render_notice(notice, &props.on_dismiss))}
        </div>
    }
}

fn render_notice(notice: &Notice, on_dismiss: &Callback<u64>) -> Html {
    let class = match notice.kind {
        NoticeKind::Error => "error",
        NoticeKind::Success => "success",
    };
    let id = notice.id;
    let on_close = on_dismiss.reform(move |_: MouseEvent| id);

    html! {
        <div class={classes!("notice", class)} role="status">
            <span>{notice.message.clone()}</span>
            <button type="button" class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}

/// Notices owned by a form page through `use_reducer(Notices::default)`.
#[derive(Properties, PartialEq)]
pub(crate) struct FormNoticesProps {
    pub(crate) notices: UseReducerHandle<Notices>,
}

#[function_component(FormNotices)]
pub(crate) fn form_notices(props: &FormNoticesProps) -> Html {
    let dispatcher = props.notices.dispatcher();
    let on_dismiss = Callback::from(move |id: u64| dispatcher.dispatch(NoticeAction::Dismiss(id)));
    html! { <NoticeList notices={props.notices.items().to_vec()} {on_dismiss} /> }
}
