//! 結果領域の描画
//!
//! ViewModelをそのままDOMへ写す。テキストはすべてテキストノードとして挿入する

use leptos::prelude::*;
use puzzle_tools_common::{ListItem, Region, Tone, ViewNode};

use crate::app::BoardActions;
use crate::surface::SignalSurface;

#[component]
pub fn ResultView(region: Region, surface: SignalSurface, actions: BoardActions) -> impl IntoView {
    let view_model = surface.region(region);

    view! {
        <div class="results">
            {move || {
                view_model
                    .get()
                    .nodes
                    .into_iter()
                    .map(|node| render_node(node, region, actions))
                    .collect_view()
            }}
        </div>
    }
}

fn render_node(node: ViewNode, region: Region, actions: BoardActions) -> AnyView {
    match node {
        ViewNode::Loading { text } => view! { <p class="loading">{text}</p> }.into_any(),
        ViewNode::Message { text, tone } => {
            let class = match tone {
                Tone::Info => "message",
                Tone::Error => "message error",
            };
            view! { <p class=class>{text}</p> }.into_any()
        }
        ViewNode::Dismiss => view! {
            <button class="dismiss" on:click=move |_| actions.dismiss(region)>"×"</button>
        }
        .into_any(),
        ViewNode::List { items } => view! { <ul>{render_items(items)}</ul> }.into_any(),
        ViewNode::FlagCard { country, image_src } => {
            let alt = country.clone();
            view! {
                <div class="flag-card">
                    <h3>{country}</h3>
                    <img src=image_src alt=alt />
                </div>
            }
            .into_any()
        }
    }
}

fn render_items(items: Vec<ListItem>) -> AnyView {
    items
        .into_iter()
        .map(render_item)
        .collect_view()
        .into_any()
}

fn render_item(item: ListItem) -> AnyView {
    match item {
        ListItem::Text { text } => view! { <li>{text}</li> }.into_any(),
        ListItem::Link { label, href, title } => view! {
            <li>
                <a href=href title=title target="_blank" rel="noopener noreferrer">{label}</a>
            </li>
        }
        .into_any(),
        ListItem::Group { header, items } => view! {
            <li>
                {header}
                <ul>{render_items(items)}</ul>
            </li>
        }
        .into_any(),
    }
}
