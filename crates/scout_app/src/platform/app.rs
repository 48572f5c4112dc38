use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use scout_core::{update, AppState, Msg};
use scout_engine::EngineHandle;
use scout_logging::{scout_debug, scout_error, scout_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::command::{parse_command, Command, HELP};
use super::ui::render;
use crate::Cli;

const TICK: Duration = Duration::from_millis(75);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    logging::initialize(cli.log, &config.log_file, cli.verbose)?;
    scout_info!("contact-scout starting against {}", config.base_url);

    let engine = EngineHandle::spawn(config.agent_settings()).context("starting engine")?;
    let runner = EffectRunner::new(engine, config.export_dir.clone(), config.export_options());

    let line_rx = spawn_line_reader(io::stdin()).context("starting input reader")?;

    let mut session = Session::new(runner, io::stdout());
    session.redraw(true)?;

    loop {
        match line_rx.recv_timeout(TICK) {
            Ok(line) => match parse_command(&line, &session.state.view()) {
                Command::Dispatch(msgs) => msgs.into_iter().for_each(|msg| session.dispatch(msg)),
                Command::Show => session.redraw(true)?,
                Command::Help => session.print(HELP.iter().map(|line| line.to_string()))?,
                Command::Invalid(reason) => {
                    session.print([reason, "type 'help' for commands".to_string()])?
                }
                Command::Quit => break,
            },
            Err(mpsc::RecvTimeoutError::Timeout) => session.dispatch(Msg::Tick),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        for msg in session.runner.poll_events() {
            session.dispatch(msg);
        }
        session.redraw(false)?;
    }

    scout_info!("contact-scout exiting");
    Ok(())
}

/// Forwards input lines to a channel until the input ends or the receiver
/// is dropped.
fn spawn_line_reader<R>(input: R) -> io::Result<mpsc::Receiver<String>>
where
    R: io::Read + Send + 'static,
{
    let (line_tx, line_rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::BufReader::new(input).lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        })?;
    Ok(line_rx)
}

struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Session<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if !matches!(msg, Msg::Tick) {
            scout_debug!("dispatch {:?}", msg);
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for followup in self.runner.run(effects) {
            self.dispatch(followup);
        }
    }

    /// Draws the screen when the state changed, or always when `force` is
    /// set. A render failure moves the core into its recovery state and the
    /// recovery screen is drawn instead.
    fn redraw(&mut self, force: bool) -> io::Result<()> {
        if !self.state.consume_dirty() && !force {
            return Ok(());
        }
        let lines = match render::render(&self.state.view()) {
            Ok(lines) => lines,
            Err(err) => {
                scout_error!("render failed: {}", err);
                self.dispatch(Msg::RenderFailed(err.to_string()));
                self.state.consume_dirty();
                match self.state.view().fatal {
                    Some(fatal) => render::render_recovery(&fatal),
                    None => vec![err.to_string()],
                }
            }
        };
        self.print(lines)
    }

    fn print(&mut self, lines: impl IntoIterator<Item = String>) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        write!(self.out, "> ")?;
        self.out.flush()
    }
}
