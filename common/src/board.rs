//! ツールボード
//!
//! 全パネルのセッションと共有の結果領域をまとめて管理する。
//! 描画は `Surface` 経由で行い、コアは表示要素を直接操作しない

use std::collections::BTreeMap;

use crate::config::BoardConfig;
use crate::error::{Error, Result};
use crate::flags::KeywordFilterIndex;
use crate::ideas::{IdeaSet, WidgetRegistry};
use crate::panel::{InputKind, PanelId, Region};
use crate::query::Query;
use crate::render::{render_flags, render_reply, render_transport_error};
use crate::result::{parse_reply, ToolReply, ToolResult};
use crate::session::{Rendered, SessionState, ToolSession};
use crate::transport::{Ticket, ToolInput, ToolRequest, ToolTransport, TransportError};
use crate::view::ViewModel;

/// 描画先
pub trait Surface {
    /// 領域の内容を丸ごと置き換える
    fn render(&mut self, region: Region, view: &ViewModel);

    /// パネルの入力欄を空にする
    fn clear_input(&mut self, panel: PanelId);
}

/// 応答の反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(Rendered),
    /// より新しいリクエストがある、または領域がクリア済み
    Stale,
}

pub struct ToolBoard<S> {
    surface: S,
    config: BoardConfig,
    sessions: BTreeMap<PanelId, ToolSession>,
    /// 何か表示している領域
    occupied: BTreeMap<Region, bool>,
    flags: KeywordFilterIndex,
    last_flag_query: Query,
    /// 最後に操作された排他領域（Tools か Flags）
    last_surface: Option<Region>,
    ideas: IdeaSet,
    widgets: WidgetRegistry,
}

impl<S: Surface> ToolBoard<S> {
    pub fn new(surface: S, config: BoardConfig) -> Self {
        Self {
            surface,
            config,
            sessions: PanelId::ALL
                .iter()
                .map(|panel| (*panel, ToolSession::new(*panel)))
                .collect(),
            occupied: Region::ALL.iter().map(|region| (*region, false)).collect(),
            flags: KeywordFilterIndex::default(),
            last_flag_query: Query::default(),
            last_surface: None,
            ideas: IdeaSet::default(),
            widgets: WidgetRegistry::new(),
        }
    }

    pub fn with_widgets(mut self, widgets: WidgetRegistry) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self, panel: PanelId) -> SessionState {
        self.sessions
            .get(&panel)
            .map(ToolSession::state)
            .unwrap_or(SessionState::Idle)
    }

    pub fn flag_index(&self) -> &KeywordFilterIndex {
        &self.flags
    }

    pub fn ideas(&self) -> &IdeaSet {
        &self.ideas
    }

    fn session_mut(&mut self, panel: PanelId) -> &mut ToolSession {
        self.sessions
            .entry(panel)
            .or_insert_with(|| ToolSession::new(panel))
    }

    fn show(&mut self, region: Region, view: &ViewModel) {
        self.surface.render(region, view);
        self.occupied.insert(region, !view.is_empty());
    }

    /// 領域内の全セッションを待機状態に戻す
    fn idle_region(&mut self, region: Region, except: Option<PanelId>) {
        for session in self.sessions.values_mut() {
            if session.panel().region() == region && Some(session.panel()) != except {
                session.go_idle();
            }
        }
        if region == Region::Flags {
            self.last_flag_query = Query::default();
        }
    }

    /// 領域をクリア（表示中の場合のみ再描画）
    fn clear_region(&mut self, region: Region) {
        self.idle_region(region, None);
        if self.occupied.get(&region).copied().unwrap_or(false) {
            self.show(region, &ViewModel::empty());
        }
    }

    /// パネルを起動してリクエストを発行
    ///
    /// 入力の業務的な妥当性は検証しない（空入力もそのまま送る）。
    /// 順序: 排他領域と自領域のクリア → 読み込み中表示 → リクエストを返す
    pub fn activate(&mut self, panel: PanelId, input: ToolInput) -> Result<ToolRequest> {
        let definition = panel.definition();
        let endpoint = definition.endpoint.ok_or(Error::NotRemote(panel))?;
        let accepted = matches!(
            (definition.input, &input),
            (InputKind::Text, ToolInput::Text(_))
                | (InputKind::File, ToolInput::File(_))
                | (InputKind::None, ToolInput::None)
        );
        if !accepted {
            return Err(Error::InputMismatch {
                panel,
                input: input.kind_name(),
            });
        }

        for other in definition.region.exclusive_with() {
            self.clear_region(*other);
        }
        if !definition.region.exclusive_with().is_empty() {
            self.last_surface = Some(definition.region);
        }
        self.idle_region(definition.region, Some(panel));

        let ticket = self.session_mut(panel).begin();
        let loading = ViewModel::loading(&self.config.loading_text);
        self.show(definition.region, &loading);

        tracing::debug!(panel = %panel, seq = ticket.seq, "dispatching request");
        Ok(ToolRequest::build(ticket, endpoint, input))
    }

    /// 通信結果を反映
    pub fn complete(&mut self, ticket: Ticket, outcome: std::result::Result<String, TransportError>) -> Completion {
        match outcome {
            Ok(body) => self.on_success(ticket, &body),
            Err(error) => self.on_transport_error(ticket, &error),
        }
    }

    /// 通信成功時
    ///
    /// `Success=false` は「結果なし」として描画し、エラーとしてはログに出さない
    pub fn on_success(&mut self, ticket: Ticket, body: &str) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }

        let panel = ticket.panel;
        let reply = match parse_reply(panel.definition().shape, body) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(panel = %panel, "malformed response: {}", e);
                return self.fail(ticket, &format!("invalid response ({})", e));
            }
        };

        let (view, rendered) = match reply {
            ToolReply::Data(ToolResult::IdeaSet(ideas)) => {
                self.ideas = IdeaSet::load(ideas);
                (self.ideas.render(&self.widgets), Rendered::Results)
            }
            ToolReply::NoResult if panel == PanelId::Ideas => {
                self.ideas = IdeaSet::unavailable();
                (self.ideas.render(&self.widgets), Rendered::Empty)
            }
            ToolReply::NoResult => (
                render_reply(panel, &ToolReply::NoResult, self.config.cap_for(panel)),
                Rendered::Empty,
            ),
            reply => (render_reply(panel, &reply, self.config.cap_for(panel)), Rendered::Results),
        };

        self.session_mut(panel).finish(ticket, rendered);
        self.show(panel.region(), &view);
        Completion::Applied(rendered)
    }

    /// 通信失敗時
    ///
    /// 汎用エラーメッセージを表示し、パネルは操作可能なまま残す
    pub fn on_transport_error(&mut self, ticket: Ticket, error: &TransportError) -> Completion {
        if !self.is_current(ticket) {
            return Completion::Stale;
        }
        tracing::warn!(panel = %ticket.panel, "request failed: {}", error);
        self.fail(ticket, &error.message)
    }

    fn fail(&mut self, ticket: Ticket, message: &str) -> Completion {
        let panel = ticket.panel;
        let view = if panel == PanelId::Ideas {
            // アイデアが取得できない場合は空の一覧に落とす
            self.ideas = IdeaSet::unavailable();
            self.ideas.render(&self.widgets)
        } else {
            render_transport_error(message)
        };

        self.session_mut(panel).finish(ticket, Rendered::Error);
        self.show(panel.region(), &view);
        Completion::Applied(Rendered::Error)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        let current = self
            .sessions
            .get(&ticket.panel)
            .is_some_and(|session| session.accepts(ticket));
        if !current {
            tracing::debug!(panel = %ticket.panel, seq = ticket.seq, "discarding stale response");
        }
        current
    }

    /// 発行から完了まで一括で実行
    pub async fn run<T: ToolTransport>(
        &mut self,
        transport: &T,
        panel: PanelId,
        input: ToolInput,
    ) -> Result<Completion> {
        let request = self.activate(panel, input)?;
        let outcome = transport.send(&request).await;
        Ok(self.complete(request.ticket, outcome))
    }

    /// 閉じるボタン
    ///
    /// 全パネルの入力欄と、このパネルの結果領域をクリアする（フォーム全体のリセット）
    pub fn reset(&mut self, panel: PanelId) {
        for other in PanelId::ALL {
            if other.definition().input != InputKind::None {
                self.surface.clear_input(other);
            }
        }
        self.last_flag_query = Query::default();
        self.last_surface = None;
        self.clear_region(panel.region());
    }

    /// 国旗データセットを設定
    ///
    /// 入力済みのテキストがあれば呼び出し側で `search_flags` を再実行すること
    pub fn load_flags(&mut self, index: KeywordFilterIndex) {
        self.flags = index;
        self.last_flag_query = Query::default();
    }

    /// 国旗検索の入力が変わった
    ///
    /// 正規化後のクエリが前回と同じなら再描画しない。再描画した場合 `true`
    pub fn search_flags(&mut self, raw: &str) -> bool {
        self.clear_region(Region::Tools);
        self.last_surface = Some(Region::Flags);
        self.evaluate_flags(raw)
    }

    /// データセット読み込み後に入力済みのクエリを評価し直す
    ///
    /// 入力イベントではないので Tools 領域には触れない。
    /// 国旗検索の後にツールが起動されていれば何もしない
    pub fn refresh_flags(&mut self, raw: &str) -> bool {
        if self.last_surface != Some(Region::Flags) {
            tracing::debug!("tools active, skipping flag refresh");
            return false;
        }
        self.evaluate_flags(raw)
    }

    fn evaluate_flags(&mut self, raw: &str) -> bool {
        let query = self.flags.normalize(raw);
        if query == self.last_flag_query {
            tracing::debug!("flag query unchanged, skipping redraw");
            return false;
        }

        let view = if query.is_empty() {
            ViewModel::empty()
        } else {
            render_flags(&self.flags.query(&query))
        };

        let session = self.session_mut(PanelId::FlagSearch);
        if query.is_empty() {
            session.go_idle();
        } else {
            let ticket = session.begin();
            session.finish(ticket, Rendered::Results);
        }

        self.last_flag_query = query;
        self.show(Region::Flags, &view);
        true
    }

    /// アイデアのカテゴリ表示を切り替え
    ///
    /// 状態が変わった場合のみ再描画する
    pub fn set_idea_category(&mut self, category: &str, enabled: bool) -> bool {
        if !self.ideas.set_category(category, enabled) {
            return false;
        }
        let view = self.ideas.render(&self.widgets);
        self.show(Region::Ideas, &view);
        true
    }
}
