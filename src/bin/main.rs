//! Terminal host for the lantern presenter core.
//!
//! Loads a deck of numbered HTML fragments from a local folder, then drives
//! navigation from stdin commands. All rendering is plain console output;
//! the core neither knows nor cares.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use lantern_core::{
    deck::{self, DeckLoader},
    hooks::SlideHooks,
    nav::MoveRequest,
    presenter::{Presenter, PresenterConfig},
};
use log::{debug, info, warn};

#[path = "main/console.rs"]
mod console;
#[path = "main/fs_probe.rs"]
mod fs_probe;

use console::{Command, ConsoleChrome};
use fs_probe::FsSlideProbe;

/// Present a folder of numbered slide fragments from the terminal.
#[derive(Debug, Parser)]
#[command(name = "lantern", version)]
struct Cli {
    /// Folder containing the slide files (1.html, 2.html, ...).
    #[arg(default_value = "slides")]
    folder: String,

    /// Prefix of the published location tag.
    #[arg(long, default_value = "slide")]
    tag_prefix: String,

    /// Index the deck scan starts at.
    #[arg(long, default_value_t = 1)]
    start_index: u32,

    /// Hide the navigation buttons.
    #[arg(long)]
    no_controls: bool,

    /// Hide the slide counter.
    #[arg(long)]
    no_counter: bool,

    /// Probe the deck's script resource for slide hooks.
    #[arg(long)]
    scripts: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = PresenterConfig {
        folder: cli.folder.clone(),
        location_prefix: cli.tag_prefix.clone(),
        show_buttons: !cli.no_controls,
        show_counter: !cli.no_counter,
        fetch_script: cli.scripts,
    };
    let chrome = ConsoleChrome::new(&cli.tag_prefix, !cli.no_controls, !cli.no_counter);
    let mut presenter = Presenter::new(config, chrome);

    presenter.begin_load();
    let mut probe = FsSlideProbe::default();
    let deck = DeckLoader::load(&cli.folder, cli.start_index, &mut probe)
        .with_context(|| format!("loading deck from {}/", cli.folder))?;
    if deck.is_empty() {
        info!("deck in {}/ is empty, nothing to present", cli.folder);
    }
    presenter.install_deck(deck);
    if presenter.config().fetch_script {
        match deck::fetch_script(&cli.folder, &mut probe) {
            Ok(Some(_)) => {
                // The resource exists for browser hosts; this one has no
                // way to run it, so the hook slots stay empty.
                warn!(
                    "host: {} exists but cannot run here, slide hooks stay empty",
                    deck::script_path(&cli.folder)
                );
                presenter.hooks_loaded(SlideHooks::new());
            }
            Ok(None) => debug!("host: no script resource in {}/", cli.folder),
            Err(err) => warn!("host: script probe failed err={err}"),
        }
    }
    let _ = presenter.finalize();

    // The original schedules the chrome reveal shortly after init; a
    // terminal has no timers, so the reveal request is honored here.
    if presenter.reactions_mut().take_reveal_request() {
        presenter.toggle_ui();
    }
    show_current(&presenter);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let Some(command) = Command::parse(line.trim()) else {
            println!("commands: next prev first last <number> dim toggle history quit");
            continue;
        };

        match command {
            Command::Move(request) => {
                if suppressed_at_boundary(&presenter, request) {
                    debug!("host: move {request:?} suppressed at deck boundary");
                    continue;
                }
                match presenter.request_move(request) {
                    Ok(_) => {
                        // No animation clock in a terminal: the transition
                        // completes as soon as it starts.
                        presenter.complete_transition();
                        show_current(&presenter);
                    }
                    Err(err) => println!("{err}"),
                }
            }
            Command::Dim => presenter.toggle_dimmer(),
            Command::Toggle => presenter.toggle_ui(),
            Command::History => {
                for (idx, snapshot) in presenter.history().enumerate() {
                    println!(
                        "{idx}: slide {}/{} pending={:?} dimmer={}",
                        snapshot.current_slide,
                        snapshot.total_slides,
                        snapshot.next_slide,
                        snapshot.dimmer
                    );
                }
            }
            Command::Quit => break,
        }
    }

    Ok(())
}

/// The engine leaves edge suppression to its caller; mirror the original
/// key handler, which swallows next-at-last and prev-at-first.
fn suppressed_at_boundary(presenter: &Presenter<ConsoleChrome>, request: MoveRequest) -> bool {
    let state = presenter.state();
    let on_first = state.current_slide <= 1;
    let on_last = state.current_slide >= state.total_slides;

    match request {
        MoveRequest::Next | MoveRequest::Last => on_last,
        MoveRequest::Prev | MoveRequest::First => on_first,
        MoveRequest::Absolute(_) => state.total_slides == 0,
    }
}

fn show_current(presenter: &Presenter<ConsoleChrome>) {
    let state = presenter.state();
    let Some(content) = presenter
        .deck()
        .and_then(|deck| deck.slide(state.current_slide))
    else {
        return;
    };
    println!("--- slide {}/{} ---", state.current_slide, state.total_slides);
    println!("{}", content.trim_end());
}
