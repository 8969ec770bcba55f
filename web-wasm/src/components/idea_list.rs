//! アイデア一覧コンポーネント

use leptos::prelude::*;
use puzzle_tools_common::Region;

use crate::app::BoardActions;
use crate::components::result_view::ResultView;
use crate::surface::SignalSurface;

#[component]
pub fn IdeaList(surface: SignalSurface, actions: BoardActions) -> impl IntoView {
    let ideas_view = surface.region(Region::Ideas);

    // カテゴリは一覧の再描画に合わせて読み直す
    let categories = move || {
        ideas_view.track();
        actions.idea_categories()
    };

    view! {
        <form class="categories" on:submit=|ev| ev.prevent_default()>
            <For
                each=categories
                key=|toggle| (toggle.name.clone(), toggle.enabled)
                children=move |toggle| {
                    let name = toggle.name.clone();
                    view! {
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=toggle.enabled
                                on:change=move |ev| actions.set_idea_category(&name, event_target_checked(&ev))
                            />
                            {toggle.name}
                        </label>
                    }
                }
            />
        </form>
        <ResultView region=Region::Ideas surface=surface actions=actions />
    }
}
