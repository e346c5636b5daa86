mod ui;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use etude_core::config::{Config, PracticeSettings};
use etude_core::dispatch::dispatch_action;
use etude_core::midi::{MidiInputManager, NoteEventKind};
use etude_types::{
    Action, ChordSet, Clef, Deferred, DeviceAction, DispatchResult, FilterAction, Phase,
    RoundAction, SessionState,
};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("etude")
        .join("etude.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = File::create(&log_path).unwrap_or_else(|_| {
        File::create("/tmp/etude.log").expect("Cannot create log file")
    });

    WriteLogger::init(log_level, simplelog::Config::default(), log_file)
        .expect("Failed to initialize logger");

    log::info!("etude starting (log level: {:?})", log_level);
}

fn port_names(midi: &MidiInputManager) -> Vec<String> {
    midi.list_ports().iter().map(|p| p.name.clone()).collect()
}

/// Fold a dispatch result into the UI layer's timers and status line. The
/// engine never sleeps; the feedback-delay advance is scheduled here.
fn apply_result(
    result: DispatchResult,
    pending_advance: &mut Option<(Instant, u64)>,
    status: &mut Option<String>,
) {
    for deferred in result.deferred {
        let Deferred::AdvanceRound { generation, delay_ms } = deferred;
        *pending_advance = Some((Instant::now() + Duration::from_millis(delay_ms), generation));
    }
    if let Some(msg) = result.status.into_iter().last() {
        *status = Some(msg);
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let config = Config::load();
    let settings = config.settings();
    let mut state = SessionState::new(config.filters());
    let mut rng: u64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15);

    let mut midi = MidiInputManager::new();
    midi.refresh_ports();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, &settings, &mut rng, &mut midi);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SessionState,
    settings: &PracticeSettings,
    rng: &mut u64,
    midi: &mut MidiInputManager,
) -> io::Result<()> {
    let mut pending_advance: Option<(Instant, u64)> = None;
    let mut status: Option<String> = None;
    let mut selected_port: usize = 0;
    let mut round_start = Instant::now();
    let mut last_generation = state.round_generation;
    let mut last_render_time = Instant::now();

    // Report the backend probe as an action so the session leaves Waiting
    // through the same path it would on a rescan.
    let startup = if midi.is_available() {
        Action::Device(DeviceAction::Ready { ports: port_names(midi) })
    } else {
        Action::Device(DeviceAction::Failed {
            error: "MIDI backend unavailable".to_string(),
        })
    };
    apply_result(
        dispatch_action(&startup, state, settings, rng),
        &mut pending_advance,
        &mut status,
    );

    loop {
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut actions: Vec<Action> = Vec::new();
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => match state.phase {
                            Phase::Waiting => {
                                // The backend may have come up since last probe.
                                *midi = MidiInputManager::new();
                                midi.refresh_ports();
                                if midi.is_available() {
                                    actions.push(Action::Device(DeviceAction::Ready {
                                        ports: port_names(midi),
                                    }));
                                } else {
                                    actions.push(Action::Device(DeviceAction::Failed {
                                        error: "MIDI backend unavailable".to_string(),
                                    }));
                                }
                            }
                            Phase::SelectingDevice => {
                                midi.refresh_ports();
                                selected_port = 0;
                                actions.push(Action::Device(DeviceAction::Rescan {
                                    ports: port_names(midi),
                                }));
                            }
                            _ => {}
                        },
                        KeyCode::Up if state.phase == Phase::SelectingDevice => {
                            selected_port = selected_port.saturating_sub(1);
                        }
                        KeyCode::Down if state.phase == Phase::SelectingDevice => {
                            if selected_port + 1 < state.ports.len() {
                                selected_port += 1;
                            }
                        }
                        KeyCode::Enter if state.phase == Phase::SelectingDevice => {
                            if let Some(name) = state.ports.get(selected_port).cloned() {
                                match midi.connect(selected_port) {
                                    Ok(()) => {
                                        actions.push(Action::Device(DeviceAction::Select {
                                            name,
                                        }));
                                    }
                                    Err(e) => {
                                        log::warn!("connect to {:?} failed: {}", name, e);
                                        status = Some(format!("Connect failed: {}", e));
                                    }
                                }
                            }
                        }
                        KeyCode::Char('1') => {
                            actions.push(Action::Filter(FilterAction::ToggleChordSet(
                                ChordSet::MajorTriads,
                            )));
                        }
                        KeyCode::Char('2') => {
                            actions.push(Action::Filter(FilterAction::ToggleChordSet(
                                ChordSet::MinorTriads,
                            )));
                        }
                        KeyCode::Char('t') => {
                            actions.push(Action::Filter(FilterAction::ToggleClef(Clef::Treble)));
                        }
                        KeyCode::Char('b') => {
                            actions.push(Action::Filter(FilterAction::ToggleClef(Clef::Bass)));
                        }
                        KeyCode::Char('e') => actions.push(Action::EndSession),
                        _ => {}
                    }
                    for action in &actions {
                        apply_result(
                            dispatch_action(action, state, settings, rng),
                            &mut pending_advance,
                            &mut status,
                        );
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        // Drain note events from the connected device.
        for note_event in midi.poll_events() {
            if let NoteEventKind::On { note, .. } = note_event.kind {
                let action = Action::Round(RoundAction::NoteOn { note });
                apply_result(
                    dispatch_action(&action, state, settings, rng),
                    &mut pending_advance,
                    &mut status,
                );
            }
        }

        // Fire the feedback-delay advance once its deadline passes. The
        // dispatch layer drops it if the round has already moved on.
        if let Some((deadline, generation)) = pending_advance {
            if Instant::now() >= deadline {
                pending_advance = None;
                let action = Action::Round(RoundAction::Advance { generation });
                apply_result(
                    dispatch_action(&action, state, settings, rng),
                    &mut pending_advance,
                    &mut status,
                );
            }
        }

        // A new round restarts the wall clock for the timer display.
        if state.round_generation != last_generation {
            last_generation = state.round_generation;
            round_start = Instant::now();
        }

        let now_render = Instant::now();
        if now_render.duration_since(last_render_time).as_millis() >= 16 {
            last_render_time = now_render;

            if state.phase == Phase::DeviceSelected && !state.input_locked {
                let action = Action::Round(RoundAction::Tick {
                    elapsed_ms: round_start.elapsed().as_millis() as u64,
                });
                apply_result(
                    dispatch_action(&action, state, settings, rng),
                    &mut pending_advance,
                    &mut status,
                );
            }

            terminal.draw(|frame| {
                ui::draw(frame, state, selected_port, status.as_deref());
            })?;
        }
    }
}
