use clap::Parser;
use puzzle_tools::{cli, config, error, terminal, transport};
use puzzle_tools_common::{Completion, FileUpload, PanelId, Rendered, ToolBoard, ToolInput};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use error::{Result, ToolError};
use terminal::TerminalSurface;
use transport::HttpTransport;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn content_type_for(path: &std::path::Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime.to_string())
}

fn read_upload(path: &std::path::Path) -> Result<FileUpload> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(FileUpload {
        file_name,
        content_type: content_type_for(path),
        bytes,
    })
}

fn exit_code(completion: Completion) -> i32 {
    match completion {
        Completion::Applied(Rendered::Error) => 1,
        _ => 0,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(url) = &cli.url {
        config.set_base_url(url.clone())?;
    }

    if let Commands::Config { set_url, show } = &cli.command {
        if let Some(url) = set_url {
            config.set_base_url(url.clone())?;
            config.save()?;
            println!("✔ サーバーURLを保存しました: {}", config.base_url);
        }
        if *show {
            println!("設定ファイル: {}", Config::config_path()?.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        return Ok(());
    }

    let mut board = ToolBoard::new(TerminalSurface::stdout(), config.board.clone());
    let transport = HttpTransport::new(&config)?;
    tracing::debug!(base_url = transport.base_url(), "using server");

    let code = match &cli.command {
        Commands::Exif { file } => {
            let upload = read_upload(file)?;
            let completion = board
                .run(&transport, PanelId::ExifUpload, ToolInput::File(upload))
                .await?;
            exit_code(completion)
        }

        Commands::Flags { terms, dataset } => {
            let index = match dataset {
                Some(path) => transport::load_flags_file(path)?,
                None => transport.fetch_flags().await,
            };
            if index.is_empty() {
                tracing::warn!("flag dataset is empty");
            }
            board.load_flags(index);
            if !board.search_flags(&terms.join(" ")) {
                println!("(検索語がデータセットに含まれていません)");
            }
            0
        }

        Commands::Ideas { hide } => {
            board.surface_mut().hold();
            let completion = board.run(&transport, PanelId::Ideas, ToolInput::None).await?;
            for category in hide {
                if !board.set_idea_category(category, false) {
                    tracing::warn!("idea category not found or already hidden: {}", category);
                }
            }
            board.surface_mut().release()?;
            exit_code(completion)
        }

        command => match command.text_tool() {
            Some((panel, input)) => {
                let completion = board
                    .run(&transport, panel, ToolInput::Text(input.to_string()))
                    .await?;
                exit_code(completion)
            }
            None => 0,
        },
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
