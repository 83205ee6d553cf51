use anyhow::{bail, Context, Result};
use clap::Parser;
use country_bubbles::app::{App, LoadState, Message};
use country_bubbles::chart::GroupMode;
use country_bubbles::config::{Args, Config, View};
use country_bubbles::{logging, ui};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    let _log_guard = logging::init(&config.log_file, &config.log_level)?;

    if config.headless {
        return run_headless(config);
    }

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, config);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Load, settle and export without touching the terminal
fn run_headless(config: Config) -> Result<()> {
    let path = config.export_target();
    let mut app = App::new(config, 0, 0);
    if let LoadState::Failed(reason) = &app.load {
        bail!("{reason}");
    }
    app.settle();
    app.export_chart(&path)
        .with_context(|| format!("headless export of {} bubbles", app.nodes().len()))?;
    println!("{}", path.display());
    Ok(())
}

/// Translate a key press into an application message
fn key_message(app: &App, key: KeyEvent) -> Option<Message> {
    let message = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Message::Quit,

        // Grouping
        KeyCode::Char('g') => Message::ToggleGroup,
        KeyCode::Char('c') => Message::SelectGroup(GroupMode::Country),
        KeyCode::Char('r') => Message::SelectGroup(GroupMode::Region),

        // Metric
        KeyCode::Char('m') => Message::NextMetric,
        KeyCode::Char(ch @ '1'..='4') => Message::SelectMetricIndex(ch as usize - '1' as usize),

        KeyCode::Tab | KeyCode::Char('t') => Message::ToggleView,

        // Keyboard selection in the chart, scrolling in the table
        KeyCode::Char('n') | KeyCode::Down | KeyCode::Char('j') => Message::SelectNext,
        KeyCode::Char('p') | KeyCode::Up | KeyCode::Char('k') => Message::SelectPrev,
        KeyCode::PageDown if app.view == View::Table => Message::Scroll(20),
        KeyCode::PageUp if app.view == View::Table => Message::Scroll(-20),

        KeyCode::Char('e') => Message::Export,
        KeyCode::Char('R') | KeyCode::F(5) => Message::Reload,
        _ => return None,
    };
    Some(message)
}

/// Translate a mouse event into an application message
fn mouse_message(app: &App, mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            Some(Message::Hover {
                col: mouse.column,
                row: mouse.row,
            })
        }
        MouseEventKind::ScrollDown if app.view == View::Table => Some(Message::Scroll(3)),
        MouseEventKind::ScrollUp if app.view == View::Table => Some(Message::Scroll(-3)),
        _ => None,
    }
}

fn run(terminal: &mut DefaultTerminal, config: Config) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, size.width, size.height);

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            let message = match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => key_message(&app, key),
                Event::Mouse(mouse) => mouse_message(&app, mouse),
                Event::Resize(width, height) => Some(Message::Resize { width, height }),
                _ => None,
            };
            if let Some(message) = message {
                app.dispatch(message);
            }
        }

        // Advance the bubble layout
        app.dispatch(Message::Tick);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
