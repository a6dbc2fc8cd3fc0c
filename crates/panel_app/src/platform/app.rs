use std::io::BufRead;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Local;
use log::LevelFilter;
use panel_client::ReqwestPanelApi;
use panel_core::{update, Effect, Msg, PanelState};
use panel_logging::{panel_debug, panel_info, panel_warn};

use super::console::{self, ConsoleCommand, ShowTarget};
use super::effects::EffectRunner;
use super::logging;
use super::settings::{self, PanelSettings};
use super::ui;
use super::ui::dom::DomDocument;

/// Everything the message loop reacts to, in arrival order.
pub(crate) enum Inbound {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let path = settings::settings_path(std::env::args().skip(1));
    let (mut panel_settings, load_error) = match settings::load(&path) {
        Ok(loaded) => (loaded, None),
        Err(err) => (PanelSettings::default(), Some(err)),
    };
    panel_settings.apply_env_overrides(|key| std::env::var(key).ok());

    logging::initialize(panel_settings.log_destination, LevelFilter::Info);
    if let Some(err) = load_error {
        panel_warn!("{}; using default settings", err);
    }

    let client_settings = panel_settings
        .client_settings()
        .context("invalid panel settings")?;
    panel_info!("Crawler backend at {}", client_settings.base_url);
    let api = ReqwestPanelApi::new(client_settings).context("failed to build HTTP client")?;

    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(Arc::new(api), inbound_tx.clone());
    spawn_stdin_reader(inbound_tx);

    let mut app = ConsoleApp::new(runner);
    app.start(&panel_settings);
    app.run(inbound_rx);
    Ok(())
}

fn spawn_stdin_reader(inbound_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if inbound_tx.send(Inbound::Line(line)).is_err() {
                return;
            }
        }
        let _ = inbound_tx.send(Inbound::InputClosed);
    });
}

struct ConsoleApp {
    state: PanelState,
    document: DomDocument,
    runner: EffectRunner,
    awaiting_confirmation: bool,
}

impl ConsoleApp {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: PanelState::new(),
            document: ui::layout::initial_document(),
            runner,
            awaiting_confirmation: false,
        }
    }

    fn start(&mut self, panel_settings: &PanelSettings) {
        let view = self.state.view();
        self.state.consume_dirty();
        self.document.apply_all(ui::render::render(&view));
        println!("{}", console::format_status(&view));
        println!("Type 'help' for a list of commands.");

        self.dispatch(Msg::RefreshRequested);
        self.runner.start_polling(panel_settings.poll_interval());
    }

    fn run(&mut self, inbound_rx: mpsc::Receiver<Inbound>) {
        while let Ok(inbound) = inbound_rx.recv() {
            let keep_going = match inbound {
                Inbound::Msg(msg) => {
                    self.dispatch(msg);
                    true
                }
                Inbound::Line(line) => self.handle_line(&line),
                Inbound::InputClosed => false,
            };
            if !keep_going {
                break;
            }
        }
        self.runner.stop_polling();
        panel_info!("Panel shut down");
    }

    fn handle_line(&mut self, line: &str) -> bool {
        if self.awaiting_confirmation {
            self.awaiting_confirmation = false;
            self.dispatch(Msg::ClearConfirmed(console::parse_confirmation(line)));
            return true;
        }

        match console::parse_line(line, self.state.form()) {
            Ok(ConsoleCommand::Dispatch(msg)) => self.dispatch(msg),
            Ok(ConsoleCommand::Show(target)) => {
                let lines = match target {
                    ShowTarget::Videos => console::format_videos(self.state.videos()),
                    ShowTarget::Creators => console::format_creators(self.state.creators()),
                    ShowTarget::Form => console::format_form(self.state.form()),
                };
                lines.iter().for_each(|line| println!("{line}"));
            }
            Ok(ConsoleCommand::Status) => println!("{}", console::format_status(&self.state.view())),
            Ok(ConsoleCommand::Help) => println!("{}", console::HELP),
            Ok(ConsoleCommand::Quit) => return false,
            Err(usage) => println!("{usage}"),
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let reconciling = matches!(msg, Msg::StatusReceived(_));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        if reconciling {
            panel_debug!(
                "Poll {} reconciled, run_state={:?}",
                state.polls_reconciled(),
                state.run_state()
            );
        }

        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            let changed = self.document.apply_all(ui::render::render(&view));
            for line in console::format_changes(&self.document, &changed) {
                println!("{line}");
            }
        }

        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        let mut network = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(notice) => {
                    println!("{}", console::format_notice(&notice, Local::now()));
                }
                Effect::ConfirmClear => {
                    println!("Clear all crawled data? This cannot be undone. [y/N]");
                    self.awaiting_confirmation = true;
                }
                other => network.push(other),
            }
        }
        if !network.is_empty() {
            self.runner.enqueue(network);
        }
    }
}
