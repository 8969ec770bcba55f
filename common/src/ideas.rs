//! アイデア一覧とカテゴリフィルタ
//!
//! 取得済みのアイデアを再取得せずにカテゴリで絞り込む。
//! `html+js` 型のアイデアは任意コードを実行せず、登録済みウィジェットに委譲する

use std::collections::HashMap;

use crate::result::Idea;
use crate::view::{ListItem, Tone, ViewModel};

pub const NO_IDEAS_TEXT: &str = "No Ideas.";

/// アイデアに付随するウィジェット
///
/// `script` フィールドはコードではなくウィジェット名として扱う
pub trait IdeaWidget {
    fn mount(&self, idea: &Idea) -> Vec<ListItem>;
}

impl<F> IdeaWidget for F
where
    F: Fn(&Idea) -> Vec<ListItem>,
{
    fn mount(&self, idea: &Idea) -> Vec<ListItem> {
        self(idea)
    }
}

/// ウィジェット登録表
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: HashMap<String, Box<dyn IdeaWidget>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, widget: impl IdeaWidget + 'static) {
        self.widgets.insert(name.into(), Box::new(widget));
    }

    pub fn get(&self, name: &str) -> Option<&dyn IdeaWidget> {
        self.widgets.get(name).map(|w| w.as_ref())
    }
}

/// カテゴリの表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryToggle {
    pub name: String,
    pub enabled: bool,
}

/// 取得済みアイデアとフィルタ状態
#[derive(Debug, Clone, Default)]
pub struct IdeaSet {
    /// `None` は未取得または取得失敗
    ideas: Option<Vec<Idea>>,
    categories: Vec<CategoryToggle>,
}

impl IdeaSet {
    /// 取得結果を反映（カテゴリは初出順、すべて有効）
    pub fn load(ideas: Vec<Idea>) -> Self {
        let mut categories: Vec<CategoryToggle> = Vec::new();
        for idea in &ideas {
            if !categories.iter().any(|c| c.name == idea.category) {
                categories.push(CategoryToggle {
                    name: idea.category.clone(),
                    enabled: true,
                });
            }
        }
        Self {
            ideas: Some(ideas),
            categories,
        }
    }

    /// 取得失敗時
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.ideas.is_some()
    }

    pub fn categories(&self) -> &[CategoryToggle] {
        &self.categories
    }

    /// カテゴリの表示切替
    ///
    /// 状態が変わった場合のみ `true`
    pub fn set_category(&mut self, name: &str, enabled: bool) -> bool {
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(toggle) if toggle.enabled != enabled => {
                toggle.enabled = enabled;
                true
            }
            _ => false,
        }
    }

    /// 表示対象のアイデア
    pub fn visible(&self) -> impl Iterator<Item = &Idea> {
        self.ideas
            .iter()
            .flatten()
            .filter(move |idea| self.is_enabled(&idea.category))
    }

    fn is_enabled(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.enabled && c.name == category)
    }

    /// 一覧を描画
    ///
    /// ウィジェットは描画ごとに表示中のアイデアにつき1回だけマウントされる
    pub fn render(&self, widgets: &WidgetRegistry) -> ViewModel {
        if self.ideas.is_none() {
            return ViewModel::message(NO_IDEAS_TEXT, Tone::Info);
        }

        let items = self
            .visible()
            .map(|idea| match idea.script.as_deref().filter(|_| idea.has_widget()) {
                Some(name) => match widgets.get(name) {
                    Some(widget) => ListItem::group(&idea.text, widget.mount(idea)),
                    None => {
                        tracing::warn!("idea widget not registered: {}", name);
                        ListItem::text(&idea.text)
                    }
                },
                None => ListItem::text(&idea.text),
            })
            .collect();

        ViewModel {
            nodes: vec![crate::view::ViewNode::List { items }],
        }
    }
}
