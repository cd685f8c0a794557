use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use linkcard_core::{update, AppState, Msg};
use linkcard_engine::EngineHandle;
use linkcard_logging::{card_debug, card_info, card_warn};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::commands::{parse_command, Command};

const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let loaded = config::load();
    logging::initialize(
        loaded.config.log_destination,
        logging::parse_level(&loaded.config.log_level),
    );
    for warning in &loaded.warnings {
        card_warn!("{}", warning);
    }
    match &loaded.source {
        Some(path) => card_info!("Loaded config from {:?}", path),
        None => card_info!("Using default config"),
    }
    card_info!(
        "Generator at {} output to {:?}",
        loaded.config.server_url,
        loaded.config.output_dir
    );

    let engine = EngineHandle::new(loaded.config.engine_config())
        .context("failed to start the generation engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx);
    let line_rx = spawn_stdin_reader();

    let mut session = Session {
        state: AppState::new(),
        runner,
        msg_rx,
    };

    println!("{}", ui::constants::BANNER);
    session.print_view();
    prompt()?;

    loop {
        session.drain_messages();
        let line = match line_rx.recv_timeout(INPUT_POLL) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Msg(msg))) => session.dispatch(msg),
            Ok(Some(Command::Wait)) => session.wait_until_settled(),
            Ok(Some(Command::Show)) => session.print_view(),
            Ok(Some(Command::Help)) => println!("{}", ui::constants::HELP_TEXT),
            Ok(Some(Command::Quit)) => break,
            Err(err) => println!("{err}"),
        }
        prompt()?;
    }

    session.dispatch(Msg::Teardown);
    card_info!("Session closed");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        card_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.print_view();
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    /// Block until nothing is loading and every engine call has reported back.
    fn wait_until_settled(&mut self) {
        loop {
            // Sample before draining: once settled, every result is already queued.
            let settled = self.runner.is_settled();
            self.drain_messages();
            if settled && !self.state.view().is_loading {
                return;
            }
            if let Ok(msg) = self.msg_rx.recv_timeout(INPUT_POLL) {
                self.dispatch(msg);
            }
        }
    }

    fn print_view(&self) {
        for line in ui::render::render(&self.state.view()) {
            println!("{line}");
        }
    }
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", ui::constants::PROMPT)?;
    stdout.flush()
}

/// Lines from stdin; the channel closes on end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    card_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
