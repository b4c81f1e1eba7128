//! tresde command-line host.
//!
//! Runs the scene runtime outside the browser: export a scene to a
//! standalone HTML page, mint or read share links, publish to and import from
//! the persistence service, print the readable scene source, and preview the
//! embed camera headlessly.
//!
//! The working scene lives in a JSON file (`--state`), the file-backed
//! counterpart of the editor's saved state. Commands that read a scene take
//! `--input` to use another file instead.

mod config;
mod http;
mod preview;
mod storage;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scene::doc::SceneSnapshot;
use scene::export::{self, ExportOptions};
use scene::remote::{self, RemoteError, SceneService};
use scene::share::{self, ShareError};
use scene::templates;
use tracing::{info, warn};

use crate::config::HttpTimeouts;
use crate::http::{HttpAssetFetcher, HttpSceneService, HttpSetupError};
use crate::preview::{PreviewOptions, ScrollDriver};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] HttpSetupError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
    #[error(transparent)]
    Share(#[from] ShareError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("unknown template `{0}`; expected one of: {1}")]
    UnknownTemplate(String, String),
    #[error("missing session id; pass --session or set TRESDE_SESSION")]
    MissingSession,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> CliError + '_ {
    move |source| CliError::Io { path: path.display().to_string(), source }
}

#[derive(Parser, Debug)]
#[command(name = "tresde", about = "tresde 3D scene runtime and publishing CLI")]
struct Cli {
    #[arg(long, env = "TRESDE_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "TRESDE_SESSION")]
    session: Option<String>,

    /// Working scene file.
    #[arg(long = "state", env = "TRESDE_STATE_PATH", default_value = config::DEFAULT_STATE_PATH)]
    state_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the scene as a standalone HTML document.
    Export {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = export::DEFAULT_FILENAME)]
        output: PathBuf,
        /// Embed page to inject into; a minimal page is used by default.
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(long, env = "TRESDE_FONT_URL", default_value = scene::resolve::FONT_PATH)]
        font_url: String,
    },
    /// Print a share link for the scene.
    Share {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Decode a share link (or `#scene=` fragment) to scene JSON.
    Decode {
        link: String,
        /// Replace the working scene instead of printing.
        #[arg(long, default_value_t = false)]
        load: bool,
    },
    /// Export and publish the scene.
    Publish {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
        /// Republish over an existing scene id.
        #[arg(long)]
        scene_id: Option<String>,
    },
    /// List scenes published by this session.
    List,
    /// Replace the working scene with a published one.
    Import { id: String },
    /// Print the readable scene source.
    Code {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Replace the working scene with a bundled template.
    Template { name: String },
    /// Run the embed runtime headlessly and print one JSON line per frame.
    Preview {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 120)]
        frames: u32,
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Hold this scroll offset.
        #[arg(long, conflicts_with = "sweep")]
        scroll: Option<f32>,
        /// Sweep scroll from 0 to 1 across the run.
        #[arg(long, default_value_t = false)]
        sweep: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: .env not loaded: {e}");
        }
    }
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let Cli { base_url, session, state_path, command } = Cli::parse();
    let timeouts = HttpTimeouts::from_env();
    let services = RemoteContext { base_url: &base_url, session: session.as_deref(), timeouts };

    match command {
        Command::Export { input, output, template, font_url } => {
            let snapshot = read_scene(input.as_deref(), &state_path)?;
            let template = match template {
                Some(path) => fs::read_to_string(&path).map_err(io_error(&path))?,
                None => export::EMBED_TEMPLATE.to_owned(),
            };
            let fetcher = HttpAssetFetcher::new(&base_url, timeouts)?;
            let options = ExportOptions { template: &template, font_url: &font_url };
            let html = export::generate_html(&snapshot, &fetcher, options).await?;
            fs::write(&output, html).map_err(io_error(&output))?;
            info!(path = %output.display(), "export written");
            println!("{}", output.display());
        }
        Command::Share { input } => {
            let snapshot = read_scene(input.as_deref(), &state_path)?;
            println!("{}", share::share_url(&base_url, &snapshot)?);
        }
        Command::Decode { link, load } => {
            let snapshot = decode_link(&link)?;
            if load {
                let mut store = storage::open_store(&state_path).map_err(io_error(&state_path))?;
                store.load_scene(snapshot);
                info!(path = %state_path.display(), "shared scene loaded");
            } else {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
        }
        Command::Publish { input, title, scene_id } => {
            let snapshot = read_scene(input.as_deref(), &state_path)?;
            let fetcher = HttpAssetFetcher::new(&base_url, timeouts)?;
            let service = services.service()?;
            let published =
                remote::publish_scene(&snapshot, &fetcher, &service, title.as_deref(), scene_id.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&published)?);
        }
        Command::List => {
            let service = services.service()?;
            let scenes = service.list().await?;
            println!("{}", serde_json::to_string_pretty(&scenes)?);
        }
        Command::Import { id } => {
            let service = services.service()?;
            let mut store = storage::open_store(&state_path).map_err(io_error(&state_path))?;
            remote::import_scene(&mut store, &service, &id).await?;
            println!("{}", state_path.display());
        }
        Command::Code { input } => {
            let snapshot = read_scene(input.as_deref(), &state_path)?;
            println!("{}", scene::source::generate(&snapshot));
        }
        Command::Template { name } => {
            let Some(template) = templates::by_name(&name) else {
                return Err(CliError::UnknownTemplate(name, templates::NAMES.join(", ")));
            };
            let mut store = storage::open_store(&state_path).map_err(io_error(&state_path))?;
            if let Some(environment) = template.environment {
                store.set_environment(environment);
            }
            store.load_template(template.objects);
            info!(template = template.name, "template loaded");
        }
        Command::Preview { input, frames, fps, scroll, sweep } => {
            let snapshot = read_scene(input.as_deref(), &state_path)?;
            let scroll = match (scroll, sweep) {
                (Some(offset), _) => ScrollDriver::Fixed(offset),
                (None, true) => ScrollDriver::Sweep,
                (None, false) => ScrollDriver::None,
            };
            for frame in preview::run(snapshot, PreviewOptions { frames, fps, scroll }) {
                println!("{}", serde_json::to_string(&frame)?);
            }
        }
    }
    Ok(())
}

/// The scene at `input`, or the working scene.
fn read_scene(input: Option<&Path>, state_path: &Path) -> Result<SceneSnapshot, CliError> {
    let path = input.unwrap_or(state_path);
    storage::load_snapshot(path).map_err(io_error(path))
}

fn decode_link(link: &str) -> Result<SceneSnapshot, ShareError> {
    if link.starts_with(share::FRAGMENT_PREFIX) {
        share::decode_fragment(link)
    } else if link.contains('#') {
        share::decode_url(link)
    } else {
        share::decode(link)
    }
}

struct RemoteContext<'a> {
    base_url: &'a str,
    session: Option<&'a str>,
    timeouts: HttpTimeouts,
}

impl RemoteContext<'_> {
    fn service(&self) -> Result<HttpSceneService, CliError> {
        let session = match self.session {
            Some("") => return Err(CliError::MissingSession),
            Some(session) => session.to_owned(),
            None => {
                let minted = uuid::Uuid::new_v4().to_string();
                warn!(session = %minted, "no session configured; using a fresh one (set TRESDE_SESSION to reuse it)");
                minted
            }
        };
        Ok(HttpSceneService::new(self.base_url, &session, self.timeouts)?)
    }
}
