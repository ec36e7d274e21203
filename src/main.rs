use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use env_logger::{Env, Target};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use speedtype::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    catalog::SentenceCatalog,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, FixedTicker, Runner, TrialEvent},
};

const LOG_ENV: &str = "SPEEDTYPE_LOG";

/// type a random sentence, get your words per minute and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a randomly chosen sentence as fast as you can. The timer starts on your first keystroke and stops when the sentence matches exactly; the best speed of the run is kept."
)]
pub struct Cli {
    /// custom sentence to type instead of the catalog
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// seed for the sentence order (reproducible runs)
    #[clap(long)]
    seed: Option<u64>,

    /// path to an alternate config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the default config file and exit
    #[clap(long)]
    init_config: bool,

    /// redraw interval for the elapsed timer, in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,
}

impl Cli {
    /// Command line values take precedence over the config file
    fn merge(&self, mut cfg: Config) -> Config {
        if let Some(prompt) = &self.prompt {
            cfg.sentences = vec![prompt.clone()];
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(ms) = self.tick_rate_ms {
            cfg.tick_rate_ms = ms;
        }
        cfg
    }

    fn config_store(&self) -> Result<FileConfigStore> {
        match &self.config {
            Some(path) => Ok(FileConfigStore::with_path(path)),
            None => FileConfigStore::new().context("resolving config file location"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let store = cli.config_store()?;

    if cli.init_config {
        store
            .save(&Config::default())
            .with_context(|| format!("writing {}", store.path().display()))?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    let cfg = cli.merge(store.load());
    let catalog = match &cli.prompt {
        Some(prompt) => match SentenceCatalog::new([prompt]) {
            Ok(catalog) => catalog,
            Err(e) => {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::InvalidValue, format!("--prompt: {e}"))
                    .exit();
            }
        },
        None => cfg.catalog(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    log::info!(
        "starting with {} sentences, seed {:?}",
        catalog.len(),
        cfg.seed
    );
    let mut app = App::new(catalog, cfg.seed, SystemClock);

    enable_raw_mode()?;
    let restore = RestoreOnDrop::new(restore_terminal);

    let result = run_tui(&mut app, Duration::from_millis(cfg.tick_rate_ms.max(1)));

    drop(restore);

    if app.trial.best_wpm() > 0 {
        println!("best: {} wpm", app.trial.best_wpm());
    }

    result
}

/// Calls `restore` when dropped, so every exit path after raw mode is enabled undoes it
struct RestoreOnDrop<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::error!("failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        log::error!("failed to leave alternate screen: {e}");
    }
}

fn run_tui(app: &mut App<SystemClock>, tick: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    start_tui(&mut terminal, app, tick)
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<SystemClock>,
    tick: Duration,
) -> Result<()> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick));

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            TrialEvent::Tick => {
                // only the elapsed timer changes between keystrokes
                if app.is_timing() {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            TrialEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TrialEvent::Closed => {
                log::warn!("terminal input closed, exiting");
                break;
            }
            TrialEvent::Key(key) => {
                if app.on_key(key) == AppAction::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}

/// Logs go to a file; the terminal belongs to the TUI
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}
