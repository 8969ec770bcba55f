use clap::{Parser, Subcommand};
use puzzle_tools_common::PanelId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "puzzle-tools")]
#[command(about = "Word puzzle solvers, EXIF viewer and flag search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// サーバーURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アナグラムを解く
    Anagram {
        /// 文字列（そのままサーバーへ送る）
        input: String,
    },

    /// パターンに一致する単語を探す（? や * を使用）
    Match {
        input: String,
    },

    /// モールス信号を復号
    Morse {
        input: String,
    },

    /// T9入力を復号
    T9 {
        input: String,
    },

    /// テキストを解析
    Analyse {
        input: String,
    },

    /// 画像のEXIF情報を表示
    Exif {
        /// 画像ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// キーワードで国旗を検索
    Flags {
        /// 検索語（AND検索）
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// ローカルのflags.json（省略時はサーバーから取得）
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// アイデア一覧を表示
    Ideas {
        /// 非表示にするカテゴリ（複数指定可）
        #[arg(long)]
        hide: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// テキスト入力を取るツールのパネルと入力
    pub fn text_tool(&self) -> Option<(PanelId, &str)> {
        match self {
            Commands::Anagram { input } => Some((PanelId::Anagram, input)),
            Commands::Match { input } => Some((PanelId::Match, input)),
            Commands::Morse { input } => Some((PanelId::Morse, input)),
            Commands::T9 { input } => Some((PanelId::T9, input)),
            Commands::Analyse { input } => Some((PanelId::Analyse, input)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_tool() {
        let cli = Cli::parse_from(["puzzle-tools", "anagram", "cat"]);
        assert_eq!(cli.command.text_tool(), Some((PanelId::Anagram, "cat")));
    }

    #[test]
    fn test_parse_flags_terms() {
        let cli = Cli::parse_from(["puzzle-tools", "flags", "red", "cross", "--dataset", "flags.json"]);
        match cli.command {
            Commands::Flags { terms, dataset } => {
                assert_eq!(terms, vec!["red", "cross"]);
                assert_eq!(dataset, Some(PathBuf::from("flags.json")));
            }
            _ => panic!("flags expected"),
        }
    }

    #[test]
    fn test_parse_ideas_hide_multiple() {
        let cli = Cli::parse_from(["puzzle-tools", "ideas", "--hide", "word", "--hide", "grid"]);
        match cli.command {
            Commands::Ideas { hide } => assert_eq!(hide, vec!["word", "grid"]),
            _ => panic!("ideas expected"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["puzzle-tools", "-v", "morse", "...", "--url", "http://x"]);
        assert!(cli.verbose);
        assert_eq!(cli.url.as_deref(), Some("http://x"));
        assert!(cli.command.text_tool().is_some());
    }
}
