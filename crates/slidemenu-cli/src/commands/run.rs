use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use slidemenu_core::AppConfig;
use slidemenu_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, pointer_phase, Action},
    widgets::{MessageListWidget, PopupWidget, StatusBarWidget},
    Theme,
};

pub fn run(config: AppConfig) -> Result<()> {
    info!("starting demo");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Slidemenu"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_tick_duration());
    let mut app = App::new(config, Theme::default());

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // The first frame also lays the rows out for mouse hit-testing
    let mut needs_draw = true;

    loop {
        app.tick(Instant::now());
        needs_draw |= app.take_repaint();

        if needs_draw {
            needs_draw = false;
            terminal.draw(|frame| {
                let main_layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(frame.area());

                app.layout(main_layout[0]);
                MessageListWidget::render(frame, main_layout[0], app);
                StatusBarWidget::render(frame, main_layout[1], app);

                if app.mode == Mode::Help {
                    PopupWidget::render_help(frame, &app.theme);
                }
            })?;
        }

        // Poll at frame rate while a row is being dragged or settling
        let event = if app.needs_animation() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(app, action);
                    needs_draw = true;
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(phase) = pointer_phase(mouse.kind) {
                        app.handle_pointer(phase, mouse.column, mouse.row, Instant::now());
                        needs_draw = true;
                    }
                }
                // Rows are re-measured on the next draw
                AppEvent::Resize(_, _) => needs_draw = true,
                // Settle frames are applied at the top of the loop
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(app: &mut App, action: Action) {
    let now = Instant::now();
    match action {
        Action::Quit => app.should_quit = true,
        Action::MoveDown => {
            app.clear_status();
            app.move_down();
        }
        Action::MoveUp => {
            app.clear_status();
            app.move_up();
        }
        Action::OpenRow => app.open_selected(now),
        Action::CloseRow => app.close_selected(now),
        Action::Activate(kind) => app.activate_selected(kind, now),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => app.mode = Mode::Normal,
        Action::None => {}
    }
}
