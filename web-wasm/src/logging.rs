//! ブラウザコンソールへのログ出力
//!
//! tracingの1イベントを1行にまとめ、レベルに応じたconsoleメソッドへ渡す

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => gloo::console::error!(line),
            Level::WARN => gloo::console::warn!(line),
            Level::INFO => gloo::console::info!(line),
            _ => gloo::console::debug!(line),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

pub fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .with_ansi(false)
        .without_time()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        gloo::console::warn!("tracing subscriber already installed");
    }
}
