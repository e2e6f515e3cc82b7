//! Runtime: event loop and input routing for the storefront TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (alternate screen, raw mode, mouse capture).
//! - Forward terminal input to [`MainView`] and apply the navigation effects
//!   it returns to the router.
//! - Collect market fetches as they finish.
//! - Render only when something visible changed.
//!
//! Ticking
//! - Fast interval (100 ms) while a panel is entering or cards are loading;
//!   long interval (5 s) when idle. The tick also picks up theme changes
//!   published by the provider.
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use evoque_api::{CoinGeckoClient, MarketDataSource};
use evoque_types::Effect;
use evoque_util::UserPreferences;
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, Msg, TuiOptions};
use crate::market::PendingFetch;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

type PendingFetches = FuturesUnordered<PendingFetch>;

/// Spawn a dedicated input task that reads terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// `poll()` and `read()` stay on the same task so no event is lost between
/// them.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_move = Instant::now();

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if !matches!(event::poll(sixteen_ms), Ok(true)) {
                if sender.is_closed() {
                    break;
                }
                continue;
            }
            match event::read() {
                Ok(event) => {
                    // Hover only needs one move per frame.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(e) = sender.send(event).await {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// What the loop does after an input event.
enum InputOutcome {
    Continue(Vec<Effect>),
    Refetch,
    Exit,
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> InputOutcome {
    match input_event {
        Event::Key(key_event) if is_ctrl(&key_event, 'c') || is_ctrl(&key_event, 'q') => InputOutcome::Exit,
        Event::Key(key_event) if is_ctrl(&key_event, 'r') => InputOutcome::Refetch,
        Event::Key(key_event) => InputOutcome::Continue(main_view.handle_key_events(app, key_event)),
        Event::Mouse(mouse_event) => InputOutcome::Continue(main_view.handle_mouse_events(app, mouse_event)),
        Event::Resize(width, height) => {
            main_view.handle_message(app, Msg::Resize(width, height));
            InputOutcome::Continue(Vec::new())
        }
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => InputOutcome::Continue(Vec::new()),
    }
}

/// Builds the market client once. `None` when offline or when the client
/// could not be configured; the cards say why.
fn market_source(app: &mut App) -> Option<Arc<dyn MarketDataSource>> {
    if app.is_offline() {
        return None;
    }
    match CoinGeckoClient::from_env() {
        Ok(client) => Some(Arc::new(client)),
        Err(error) => {
            warn!(%error, "market client unavailable");
            app.market.fail_all(&error.to_string());
            None
        }
    }
}

fn start_fetches(app: &mut App, source: &Arc<dyn MarketDataSource>, pending: &mut PendingFetches) {
    pending.extend(app.market.spawn_fetches(Arc::clone(source)));
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the input
/// producer, runs the event loop, and restores the terminal on exit.
pub async fn run_app(options: TuiOptions) -> Result<()> {
    let preferences = match UserPreferences::new() {
        Ok(preferences) => preferences,
        Err(error) => {
            warn!(%error, "preferences unavailable; theme changes will not persist");
            UserPreferences::ephemeral()
        }
    };
    let mut app = App::new(options, Arc::new(preferences));
    let mut main_view = MainView::new();

    let source = market_source(&mut app);
    let mut pending_fetches: PendingFetches = FuturesUnordered::new();
    if let Some(source) = source.as_ref() {
        start_fetches(&mut app, source, &mut pending_fetches);
    }

    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        main_view.handle_message(&mut app, Msg::Resize(width, height));
    }

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    info!(path = app.current_path(), "storefront started");

    // Ticking strategy: fast while animating, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let needs_animation = app.needs_animation();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                match handle_input_event(&mut app, &mut main_view, event) {
                    InputOutcome::Exit => break,
                    InputOutcome::Refetch => match source.as_ref() {
                        Some(source) if pending_fetches.is_empty() => {
                            debug!("refetching market data");
                            start_fetches(&mut app, source, &mut pending_fetches);
                        }
                        Some(_) => debug!("market fetch already in flight"),
                        None => debug!("market data disabled"),
                    },
                    InputOutcome::Continue(effects) => app.apply_effects(effects),
                }
                needs_render = true;
            }

            _ = ticker.tick() => {
                needs_render = main_view.handle_message(&mut app, Msg::Tick);
            }

            Some(outcome) = pending_fetches.next(), if !pending_fetches.is_empty() => {
                needs_render = main_view.handle_message(&mut app, Msg::MarketLoaded(outcome));
            }

            _ = signal::ctrl_c() => { break; }
        }

        // Some terminals drop resize notifications; compare sizes each turn.
        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            main_view.handle_message(&mut app, Msg::Resize(w, h));
            needs_render = true;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    app.controller.unmount();
    // Fetch tasks still in flight are cancelled with the runtime.
    drop(pending_fetches);
    info!(path = app.current_path(), "storefront closed");
    cleanup_terminal(&mut terminal)?;
    Ok(())
}
