use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::info;

use snapdeck_core::{AppConfig, Deck};
use snapdeck_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme,
    widgets::{DotsWidget, PopupWidget, SectionsWidget, StatusBarWidget},
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: Arc<AppConfig>, deck_path: &Path) -> Result<()> {
    // Fail before touching the terminal
    let deck = Deck::load(deck_path)
        .with_context(|| format!("failed to load deck {}", deck_path.display()))?;
    info!(path = %deck_path.display(), sections = deck.len(), "Deck loaded");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = match deck.title.as_deref() {
        Some(title) => format!("snapdeck - {}", title),
        None => "snapdeck".to_string(),
    };
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = present(&mut terminal, config, deck);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn present(terminal: &mut Term, config: Arc<AppConfig>, deck: Deck) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);

    let size = terminal.size()?;
    let (body, _) = split(Rect::new(0, 0, size.width, size.height), &config);
    let mut app = App::new(config.clone(), deck, theme, body.height)?;
    app.start();

    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_fps,
    );

    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = true;

    // Main loop
    loop {
        // Settle messages, tweens, scroll position and visibility
        app.tick();

        // Draw UI
        terminal.draw(|frame| {
            let (body, status) = split(frame.area(), &app.config);
            app.set_viewport_height(body.height);

            SectionsWidget::render(frame, body, &mut app);
            DotsWidget::render(frame, body, &mut app);
            if let Some(status) = status {
                StatusBarWidget::render(frame, status, &app);
            }

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.theme);
            }
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, &keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => {
                    if app.mode == Mode::Normal {
                        let action = handle_mouse_event(mouse, &app.dot_areas, app.more_area);
                        app.handle_mouse(action);
                    }
                }
                AppEvent::Resize(_, _) => {
                    // Next draw picks up the new size
                }
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    info!("Presentation closed");
    Ok(())
}

/// Body area plus the status bar row, if shown
fn split(area: Rect, config: &AppConfig) -> (Rect, Option<Rect>) {
    if !config.ui.show_status_bar || area.height < 2 {
        return (area, None);
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (layout[0], Some(layout[1]))
}
