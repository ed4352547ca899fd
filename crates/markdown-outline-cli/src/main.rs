mod app;

use anyhow::{Context, Result};
use app::{Action, App};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_outline_config::Config;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

fn init_logging(config: &Config) -> Result<()> {
    // The terminal belongs to the UI, so only log when there is a file
    let Some(log_file) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <markdown-file>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config file: {}", Config::config_path().display());
            process::exit(1);
        }
    };
    init_logging(&config)?;
    log::info!("markdown-outline starting up on {}", path.display());

    let mut app = App::open(&path, &config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Ok(Action::Quit) => return Ok(()),
                Ok(Action::Continue) => {}
                Err(e) => {
                    log::error!("{e:#}");
                    app.status = format!("Error: {e}");
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    // Editor pane, borders take a row/column on each side
    let height = chunks[0].height.saturating_sub(2) as usize;
    app.scroll_to_cursor(height);

    let lines: Vec<Line> = app
        .display_lines()
        .into_iter()
        .skip(app.scroll)
        .take(height)
        .map(|line| Line::from(vec![Span::raw(line)]))
        .collect();

    let title = format!(
        "{}{}",
        app.path.display(),
        if app.is_dirty() { " [+]" } else { "" }
    );
    let editor = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(editor, chunks[0]);

    let (column, row) = app.cursor_offset();
    let width = chunks[0].width.saturating_sub(2) as usize;
    let x = chunks[0].x + 1 + column.min(width.saturating_sub(1)) as u16;
    let y = chunks[0].y + 1 + row.min(height.saturating_sub(1)) as u16;
    f.set_cursor_position((x, y));

    // Status line
    let help = Line::from(vec![
        Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw(" | Ctrl-S: Save | Ctrl-Q: Quit | Tab/Shift-Tab: Indent"),
    ]);
    f.render_widget(Paragraph::new(vec![help]), chunks[1]);
}
