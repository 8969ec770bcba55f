//! テキスト入力のツールフォーム

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use puzzle_tools_common::{PanelId, ToolInput};

use crate::app::BoardActions;
use crate::surface::SignalSurface;

#[component]
pub fn ToolForm(
    panel: PanelId,
    label: &'static str,
    placeholder: &'static str,
    surface: SignalSurface,
    actions: BoardActions,
) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        // 空入力もそのまま送る
        actions.dispatch(panel, ToolInput::Text(surface.input_untracked(panel)));
    };

    view! {
        <form class="tool-form" id=panel.as_str() on:submit=on_submit>
            <label>{label}</label>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || surface.input(panel)
                on:input=move |ev| surface.set_input(panel, event_target_value(&ev))
            />
            <button type="submit">"Go"</button>
        </form>
    }
}
