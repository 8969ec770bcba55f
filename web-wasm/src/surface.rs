//! リアクティブな描画先
//!
//! ボードの描画を領域ごとのシグナルへ流し込む。入力欄もここで持つ

use std::collections::BTreeMap;

use leptos::prelude::*;
use puzzle_tools_common::{InputKind, PanelId, Region, Surface, ViewModel};

#[derive(Clone, Copy)]
pub struct SignalSurface {
    tools: RwSignal<ViewModel>,
    flags: RwSignal<ViewModel>,
    ideas: RwSignal<ViewModel>,
    texts: RwSignal<BTreeMap<PanelId, String>>,
    /// ファイル入力は値を書き換えられないので、世代を進めて作り直す
    file_generation: RwSignal<u32>,
}

impl SignalSurface {
    pub fn new() -> Self {
        Self {
            tools: RwSignal::new(ViewModel::empty()),
            flags: RwSignal::new(ViewModel::empty()),
            ideas: RwSignal::new(ViewModel::empty()),
            texts: RwSignal::new(BTreeMap::new()),
            file_generation: RwSignal::new(0),
        }
    }

    pub fn region(&self, region: Region) -> RwSignal<ViewModel> {
        match region {
            Region::Tools => self.tools,
            Region::Flags => self.flags,
            Region::Ideas => self.ideas,
        }
    }

    pub fn input(&self, panel: PanelId) -> String {
        self.texts
            .with(|texts| texts.get(&panel).cloned().unwrap_or_default())
    }

    pub fn input_untracked(&self, panel: PanelId) -> String {
        self.texts
            .with_untracked(|texts| texts.get(&panel).cloned().unwrap_or_default())
    }

    pub fn set_input(&self, panel: PanelId, value: String) {
        self.texts.update(|texts| {
            texts.insert(panel, value);
        });
    }

    pub fn file_generation(&self) -> u32 {
        self.file_generation.get()
    }
}

impl Default for SignalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SignalSurface {
    fn render(&mut self, region: Region, view: &ViewModel) {
        self.region(region).set(view.clone());
    }

    fn clear_input(&mut self, panel: PanelId) {
        match panel.definition().input {
            InputKind::Text => self.texts.update(|texts| {
                texts.remove(&panel);
            }),
            InputKind::File => self.file_generation.update(|generation| *generation += 1),
            InputKind::None => {}
        }
    }
}
