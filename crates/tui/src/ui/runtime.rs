//! Runtime: event loop and input routing for the menu TUI.
//!
//! - Owns the terminal lifecycle (raw mode, alternate screen, mouse capture).
//! - A dedicated input thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel.
//! - Ticking is fast (16 ms) while a section is animating and slow (5 s) when
//!   idle. Each tick drains the animation scheduler.
//! - Components return `Effect`s that `App::apply` executes; `Effect::Quit`
//!   and Ctrl+C end the loop.

use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tiernav_engine::SystemClock;
use tiernav_types::{Effect, MenuDataset, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::{App, TuiOptions};
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

const FAST_TICK: Duration = Duration::from_millis(16);
const IDLE_TICK: Duration = Duration::from_millis(5000);

/// Spawn a dedicated input thread that forwards `crossterm` events over a Tokio
/// channel. Mouse moves are dropped; nothing in the menu reacts to hover.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved) {
                        continue;
                    }
                    if let Err(error) = sender.blocking_send(event) {
                        warn!("Failed to send event: {}", error);
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
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
    // Rebuild focus just before rendering so panel visibility changes are reflected
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = FocusBuilder::rebuild_for(app, Some(old_focus));
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects in order. Returns `false` once `Effect::Quit` is seen.
fn process_effects(app: &mut App, effects: Vec<Effect>) -> bool {
    for effect in effects {
        debug!(?effect, "applying effect");
        if effect == Effect::Quit {
            return false;
        }
        app.apply(effect);
    }
    true
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event loop
/// and restores the terminal on exit.
pub async fn run_app(dataset: MenuDataset, options: TuiOptions) -> Result<()> {
    let loaded_theme = theme::load(options.theme.as_deref(), dataset.settings.theme.as_deref());
    let mut app = App::new(&dataset, loaded_theme, options, SystemClock::new());
    let mut main_view = MainView::new();

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;

    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        app.update(&Msg::Resize(width, height));
    }

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let target_interval = if app.is_animating() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                        break;
                    }
                let effects = handle_input_event(&mut app, &mut main_view, event);
                if !process_effects(&mut app, effects) {
                    break;
                }
                true
            }

            _ = ticker.tick() => app.update(&Msg::Tick),

            _ = signal::ctrl_c() => { break; }
        };

        // Some terminals drop resize notifications; compare against the
        // current size every iteration.
        if let Ok((width, height)) = crossterm::terminal::size()
            && last_size != Some((width, height))
        {
            last_size = Some((width, height));
            app.update(&Msg::Resize(width, height));
            needs_render = true;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
        }
    }

    info!("shutting down");
    app.dispose();
    cleanup_terminal(&mut terminal)?;
    Ok(())
}
