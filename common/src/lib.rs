//! Puzzle Tools Common Library
//!
//! 端末(CLI)とWeb(WASM)で共有されるコア:
//! - 国旗キーワード検索（KeywordFilterIndex）
//! - ツールパネルのリクエスト/描画状態機械（ToolBoard, ToolSession）

pub mod board;
pub mod config;
pub mod error;
pub mod flags;
pub mod ideas;
pub mod panel;
pub mod query;
pub mod render;
pub mod result;
pub mod session;
pub mod transport;
pub mod view;

pub use board::{Completion, Surface, ToolBoard};
pub use config::BoardConfig;
pub use error::{Error, Result};
pub use flags::{FlagEntry, KeywordFilterIndex};
pub use ideas::{CategoryToggle, IdeaSet, IdeaWidget, WidgetRegistry};
pub use panel::{InputKind, PanelId, Region, ResultShape};
pub use query::{normalize_terms, Query};
pub use result::{parse_reply, ExifData, Idea, ImageMetadata, ToolReply, ToolResult, WordGroup};
pub use session::{Rendered, SessionState, ToolSession};
pub use transport::{
    check_status, FileUpload, Method, RequestBody, Ticket, ToolInput, ToolRequest, ToolTransport, TransportError,
};
pub use view::{ListItem, Tone, ViewModel, ViewNode};
