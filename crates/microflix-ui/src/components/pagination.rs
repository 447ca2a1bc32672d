use yew::prelude::*;

use crate::core::pagination::{next_page, page_links, previous_page};

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    /// Zero-based page shown.
    pub(crate) current: u32,
    pub(crate) total: u32,
    pub(crate) on_select: Callback<u32>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    if props.total <= 1 {
        return html! {};
    }

    let step = |target: Option<u32>, label: &'static str| {
        let on_select = props.on_select.clone();
        match target {
            Some(page) => html! {
                <button type="button" class="ghost" onclick={on_select.reform(move |_: MouseEvent| page)}>{label}</button>
            },
            None => html! { <button type="button" class="ghost" disabled=true>{label}</button> },
        }
    };

    html! {
        <nav class="pagination" aria-label="Pagination">
            {step(previous_page(props.current), "Previous")}
            {for page_links(props.current, props.total).into_iter().map(|link| {
                match link.target {
                    Some(_) if link.current => html! {
                        <span class="page current" aria-current="page">{link.label}</span>
                    },
                    Some(page) => html! {
                        <button type="button" class="page" onclick={props.on_select.reform(move |_: MouseEvent| page)}>
                            {link.label}
                        </button>
                    },
                    None => html! { <span class="gap">{link.label}</span> },
                }
            })}
            {step(next_page(props.current, props.total), "Next")}
        </nav>
    }
}
