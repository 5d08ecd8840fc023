//! Weather-map dashboard in the terminal
//!
//! # Usage
//!
//! ```sh
//! # Default server and map from the config file
//! cargo run -p meteo-dashboard
//!
//! # Another server and map, with a debug log
//! RUST_LOG=debug cargo run -p meteo-dashboard -- \
//!     --base-url http://localhost:8080 --path bretagne --log-file meteo.log
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use meteo_core::{EffectStoreWithMiddleware, LoggingMiddleware};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meteo_dashboard::action::Action;
use meteo_dashboard::api::{self, Endpoints};
use meteo_dashboard::components::{Component, Dashboard, DashboardProps};
use meteo_dashboard::config::DashboardConfig;
use meteo_dashboard::effect::Effect;
use meteo_dashboard::event::{process_raw_event, spawn_event_poller, RawEvent};
use meteo_dashboard::reducer::reducer;
use meteo_dashboard::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "meteo-dashboard")]
#[command(about = "Weather maps, forecasts and charts in the terminal")]
struct Args {
    /// Map server URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Map path to open, e.g. `france` or `bretagne` (overrides the config file)
    #[arg(long, short)]
    path: Option<String>,

    /// Config file instead of the platform default
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default config file location and exit
    #[arg(long)]
    print_config_path: bool,
}

/// The terminal belongs to the UI, so logs only go to a file
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "meteo_dashboard=info,meteo_core=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.print_config_path {
        match DashboardConfig::config_path() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => eprintln!("Error: {e}"),
        }
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut config = match DashboardConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: could not load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(path) = args.path {
        config.path = path;
    }
    tracing::info!(base_url = %config.base_url, path = %config.path, "Starting dashboard");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: DashboardConfig,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut state = AppState::new(&config);
    let size = terminal.size()?;
    state.terminal_size = (size.width, size.height);
    state.selection.observe_viewport_width(u32::from(size.width));

    let mut store = EffectStoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());

    let client = reqwest::Client::new();
    let endpoints = Arc::new(Endpoints::new(&config.base_url));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut dashboard = Dashboard::new();
    let _ = action_tx.send(Action::DataFetch);
    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| {
                dashboard.render(
                    frame,
                    frame.area(),
                    DashboardProps {
                        state: store.state(),
                        is_focused: true,
                    },
                );
            })?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                let actions = dashboard.handle_event(
                    &event,
                    DashboardProps {
                        state: store.state(),
                        is_focused: true,
                    },
                );
                for action in actions {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                let result = store.dispatch(action);
                for effect in result.effects {
                    handle_effect(effect, &client, &endpoints, &action_tx);
                }
                should_render |= result.changed;
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}

fn handle_effect(
    effect: Effect,
    client: &reqwest::Client,
    endpoints: &Arc<Endpoints>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    match effect {
        Effect::FetchMapData { path } => {
            let client = client.clone();
            let endpoints = Arc::clone(endpoints);
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let action = match api::fetch_map_data(&client, &endpoints, &path).await {
                    Ok(payload) => Action::DataDidLoad {
                        path,
                        payload: Arc::new(payload),
                    },
                    Err(e) => {
                        tracing::warn!(%path, error = %e, "Map data fetch failed");
                        Action::DataDidError {
                            path,
                            error: e.to_string(),
                        }
                    }
                };
                // receiver is gone once the app quits
                let _ = tx.send(action);
            });
        }
    }
}
