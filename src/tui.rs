use crate::config::Settings;
use crate::console;
use crate::history::HistoryCache;
use crate::input::{Input, Outcome, handle_input};
use crate::mouse::{MouseInput, handle_mouse};
use crate::wallconf;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Browse the history interactively. Returns the chosen configuration path,
/// or `None` when the user quits.
pub fn run_tui(
    history: &mut HistoryCache,
    settings: &Settings,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if settings.enable_mouse_support {
        execute!(stdout, EnableMouseCapture)?;
    }
    console::set_quiet(true);

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = browse(&mut terminal, history, settings);

    console::set_quiet(false);
    if settings.enable_mouse_support {
        execute!(terminal.backend_mut(), DisableMouseCapture).ok();
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn browse(
    terminal: &mut Tui,
    history: &mut HistoryCache,
    settings: &Settings,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut selected = 0;
    let mut list_state = ListState::default();
    if !history.is_empty() {
        list_state.select(Some(selected));
    }
    let mut status = format!(
        "{} entries in {}  |  d: remove  c: clear  r: reload  enter: use  q: quit",
        history.len(),
        history.cache_file_path().display()
    );
    let mut preview: Option<(String, Vec<String>)> = None;

    loop {
        // Only re-read the configuration when the selection changes
        let current = history.get(selected + 1).ok().flatten();
        if current.as_ref() != preview.as_ref().map(|(path, _)| path) {
            preview = current.map(|path| {
                let lines = describe(&path);
                (path, lines)
            });
        }

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);
        let list_area = chunks[0];

        terminal.draw(|f| {
            // Left list
            let items: Vec<ListItem> = history
                .iter()
                .enumerate()
                .map(|(i, path)| ListItem::new(format!("{:>2}. {path}", i + 1)))
                .collect();
            let list = List::new(items)
                .block(Block::default().title("History").borders(Borders::ALL))
                .highlight_style(Style::default().fg(Color::Yellow))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, list_area, &mut list_state);

            // Right preview
            let text = match &preview {
                Some((_, lines)) => lines.join("\n"),
                None => "No configuration selected".to_string(),
            };
            let details = Paragraph::new(text)
                .block(Block::default().title("Configuration").borders(Borders::ALL));
            f.render_widget(details, chunks[1]);

            let status_line =
                Paragraph::new(status.as_str()).style(Style::default().fg(Color::DarkGray));
            f.render_widget(status_line, rows[1]);
        })?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let outcome = handle_input(&mut Input {
                        key: key.code,
                        selected: &mut selected,
                        list_state: &mut list_state,
                        history: &mut *history,
                        status: &mut status,
                        vim_motion: settings.vim_motion,
                    });
                    match outcome {
                        Some(Outcome::Selected(path)) => return Ok(Some(path)),
                        Some(Outcome::Quit) => return Ok(None),
                        None => {}
                    }
                }
                Event::Mouse(me) if settings.enable_mouse_support => {
                    handle_mouse(&mut MouseInput {
                        me,
                        selected: &mut selected,
                        list_state: &mut list_state,
                        len: history.len(),
                        list_area: &list_area,
                    });
                }
                _ => {}
            }
        }
    }
}

fn describe(config_path: &str) -> Vec<String> {
    match wallconf::read_config(Path::new(config_path)) {
        Ok(conf) => conf.summary(),
        Err(e) => vec!["Cannot read configuration:".to_string(), e.to_string()],
    }
}
