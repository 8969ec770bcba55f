//! 国旗検索コンポーネント

use leptos::prelude::*;
use puzzle_tools_common::PanelId;

use crate::app::BoardActions;
use crate::surface::SignalSurface;

#[component]
pub fn FlagSearch(surface: SignalSurface, actions: BoardActions) -> impl IntoView {
    // 入力のたびに絞り込む（同じクエリなら再描画しない）
    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        surface.set_input(PanelId::FlagSearch, value.clone());
        actions.search_flags(&value);
    };

    view! {
        <form class="tool-form" id=PanelId::FlagSearch.as_str() on:submit=|ev| ev.prevent_default()>
            <label>"Flags"</label>
            <input
                type="text"
                placeholder="red white cross"
                prop:value=move || surface.input(PanelId::FlagSearch)
                on:input=on_input
            />
        </form>
    }
}
