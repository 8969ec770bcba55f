//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use puzzle_tools_common::{
    BoardConfig, CategoryToggle, PanelId, Region, ToolBoard, ToolInput, ToolTransport,
};

use crate::api::FetchTransport;
use crate::components::{
    exif_upload::ExifUpload, flag_search::FlagSearch, header::Header, idea_list::IdeaList,
    result_view::ResultView, tool_form::ToolForm,
};
use crate::surface::SignalSurface;

/// ボードへの操作口
///
/// ボードはウィジェット（`Send` でない）を持つのでローカル保存にする
#[derive(Clone, Copy)]
pub struct BoardActions {
    board: StoredValue<ToolBoard<SignalSurface>, LocalStorage>,
    transport: StoredValue<FetchTransport>,
    surface: SignalSurface,
}

impl BoardActions {
    pub fn new(surface: SignalSurface, transport: FetchTransport) -> Self {
        Self {
            board: StoredValue::new_local(ToolBoard::new(surface, BoardConfig::default())),
            transport: StoredValue::new(transport),
            surface,
        }
    }

    /// パネルを起動し、応答を待ってボードへ戻す
    pub fn dispatch(&self, panel: PanelId, input: ToolInput) {
        let request = match self.board.try_update_value(|board| board.activate(panel, input)) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                tracing::warn!(panel = %panel, "cannot dispatch: {}", e);
                return;
            }
            None => return,
        };

        let transport = self.transport.get_value();
        let board = self.board;
        spawn_local(async move {
            let outcome = transport.send(&request).await;
            board.update_value(|board| {
                board.complete(request.ticket, outcome);
            });
        });
    }

    /// 閉じるボタン（フォーム全体のリセット）
    pub fn dismiss(&self, region: Region) {
        let Some(panel) = PanelId::ALL.iter().find(|panel| panel.region() == region) else {
            return;
        };
        self.board.update_value(|board| board.reset(*panel));
    }

    pub fn search_flags(&self, raw: &str) {
        self.board.update_value(|board| {
            board.search_flags(raw);
        });
    }

    pub fn load_flags(&self) {
        let transport = self.transport.get_value();
        let board = self.board;
        let surface = self.surface;
        spawn_local(async move {
            let index = transport.fetch_flags().await;
            tracing::debug!(entries = index.len(), "flag dataset loaded");
            board.update_value(|board| {
                board.load_flags(index);
                // 読み込み前に入力されていた場合は検索し直す
                let typed = surface.input_untracked(PanelId::FlagSearch);
                if !typed.is_empty() {
                    board.refresh_flags(&typed);
                }
            });
        });
    }

    pub fn set_idea_category(&self, category: &str, enabled: bool) {
        self.board.update_value(|board| {
            board.set_idea_category(category, enabled);
        });
    }

    pub fn idea_categories(&self) -> Vec<CategoryToggle> {
        self.board
            .try_with_value(|board| board.ideas().categories().to_vec())
            .unwrap_or_default()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let surface = SignalSurface::new();
    let actions = BoardActions::new(surface, FetchTransport::same_origin());

    actions.dispatch(PanelId::Ideas, ToolInput::None);
    actions.load_flags();

    view! {
        <div class="container">
            <Header />

            <section class="tools">
                <ToolForm panel=PanelId::Anagram label="Anagram" placeholder="letters" surface=surface actions=actions />
                <ToolForm panel=PanelId::Match label="Match" placeholder="c?t or c*" surface=surface actions=actions />
                <ToolForm panel=PanelId::Morse label="Morse" placeholder="... --- ..." surface=surface actions=actions />
                <ToolForm panel=PanelId::T9 label="T9" placeholder="43556" surface=surface actions=actions />
                <ToolForm panel=PanelId::Analyse label="Analyse" placeholder="text" surface=surface actions=actions />
                <ExifUpload surface=surface actions=actions />
                <ResultView region=Region::Tools surface=surface actions=actions />
            </section>

            <section class="flags">
                <FlagSearch surface=surface actions=actions />
                <ResultView region=Region::Flags surface=surface actions=actions />
            </section>

            <section class="ideas">
                <IdeaList surface=surface actions=actions />
            </section>
        </div>
    }
}
