//! 端末への描画
//!
//! ViewModelをインデント付きのテキストとして書き出す。
//! 読み込み中表示はスピナーで代用する

use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use puzzle_tools_common::{ListItem, PanelId, Region, Surface, Tone, ViewModel, ViewNode};

pub struct TerminalSurface<W: Write> {
    out: W,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
    /// 保留中は領域ごとの最新の表示だけを残す
    pending: Option<BTreeMap<Region, ViewModel>>,
}

impl TerminalSurface<std::io::Stdout> {
    /// 端末に出力する場合だけスピナーを表示
    pub fn stdout() -> Self {
        let out = std::io::stdout();
        let show_spinner = out.is_terminal();
        Self::new(out, show_spinner)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, show_spinner: bool) -> Self {
        Self {
            out,
            spinner: None,
            show_spinner,
            pending: None,
        }
    }

    /// 以降の描画を保留する
    pub fn hold(&mut self) {
        self.pending.get_or_insert_with(BTreeMap::new);
    }

    /// 保留していた最終表示を書き出す
    pub fn release(&mut self) -> std::io::Result<()> {
        self.stop_spinner();
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        for view in pending.values() {
            self.write_view(view)?;
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn start_spinner(&mut self, text: &str) {
        if !self.show_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(text.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn write_view(&mut self, view: &ViewModel) -> std::io::Result<()> {
        for node in &view.nodes {
            match node {
                ViewNode::Loading { text } => writeln!(self.out, "{}", text)?,
                ViewNode::Message { text, tone: Tone::Error } => writeln!(self.out, "✘ {}", text)?,
                ViewNode::Message { text, tone: Tone::Info } => writeln!(self.out, "{}", text)?,
                ViewNode::Dismiss => {}
                ViewNode::List { items } => self.write_items(items, 0)?,
                ViewNode::FlagCard { country, image_src } => {
                    writeln!(self.out, "■ {}  ({})", country, image_src)?
                }
            }
        }
        self.out.flush()
    }

    fn write_items(&mut self, items: &[ListItem], depth: usize) -> std::io::Result<()> {
        let indent = "  ".repeat(depth);
        for item in items {
            match item {
                ListItem::Text { text } => writeln!(self.out, "{}- {}", indent, text)?,
                ListItem::Link { label, href, .. } => writeln!(self.out, "{}- {}: {}", indent, label, href)?,
                ListItem::Group { header, items } => {
                    writeln!(self.out, "{}- {}", indent, header)?;
                    self.write_items(items, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, region: Region, view: &ViewModel) {
        self.stop_spinner();

        if view.is_loading() && self.show_spinner {
            if let [ViewNode::Loading { text }] = view.nodes.as_slice() {
                self.start_spinner(text);
            }
            return;
        }

        tracing::debug!(region = ?region, nodes = view.nodes.len(), "render");
        if let Some(pending) = self.pending.as_mut() {
            pending.insert(region, view.clone());
            return;
        }
        if let Err(e) = self.write_view(view) {
            tracing::warn!("failed to write output: {}", e);
        }
    }

    fn clear_input(&mut self, panel: PanelId) {
        // 端末では入力欄を持たない
        tracing::trace!(panel = %panel, "clear input");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8_lossy(surface.writer()).into_owned()
    }

    #[test]
    fn test_writes_nested_groups() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        let view = ViewModel::dismissable_list(vec![ListItem::group(
            "english",
            vec![ListItem::text("act"), ListItem::text("cat")],
        )]);
        surface.render(Region::Tools, &view);
        assert_eq!(output(&surface), "- english\n  - act\n  - cat\n");
    }

    #[test]
    fn test_error_message_prefix() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.render(Region::Tools, &ViewModel::message("boom", Tone::Error));
        assert_eq!(output(&surface), "✘ boom\n");
    }

    #[test]
    fn test_hold_keeps_last_view_per_region() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.hold();
        surface.render(Region::Ideas, &ViewModel::message("first", Tone::Info));
        surface.render(Region::Ideas, &ViewModel::message("second", Tone::Info));
        assert!(output(&surface).is_empty());

        surface.release().unwrap();
        assert_eq!(output(&surface), "second\n");
    }
}
