//! パネルごとのセッション状態
//!
//! `Idle → Loading → Rendered(Results | Empty | Error) → Idle`
//!
//! リクエストはキャンセルできないので、パネルごとの連番で
//! 最後に発行したリクエストの応答だけを採用する

use crate::panel::PanelId;
use crate::transport::Ticket;

/// 描画済み状態の内訳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Results,
    /// 業務上の結果なし
    Empty,
    /// 通信エラー
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Rendered(Rendered),
}

/// 1パネル分のセッション
#[derive(Debug, Clone)]
pub struct ToolSession {
    panel: PanelId,
    state: SessionState,
    /// 最後に発行した連番
    issued: u64,
}

impl ToolSession {
    pub fn new(panel: PanelId) -> Self {
        Self {
            panel,
            state: SessionState::Idle,
            issued: 0,
        }
    }

    pub fn panel(&self) -> PanelId {
        self.panel
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// 新しいリクエストを開始
    ///
    /// それ以前に発行したリクエストはすべて古くなる
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = SessionState::Loading;
        Ticket {
            panel: self.panel,
            seq: self.issued,
        }
    }

    /// この応答を描画してよいか
    pub fn accepts(&self, ticket: Ticket) -> bool {
        ticket.panel == self.panel && ticket.seq == self.issued && self.state == SessionState::Loading
    }

    /// 応答を反映
    ///
    /// 古い応答なら何もせず `false`
    pub fn finish(&mut self, ticket: Ticket, rendered: Rendered) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = SessionState::Rendered(rendered);
        true
    }

    /// 領域がクリアされた
    ///
    /// 読み込み中のリクエストも以後は採用しない
    pub fn go_idle(&mut self) {
        self.state = SessionState::Idle;
    }
}
