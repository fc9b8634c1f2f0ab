//! UI rendering using ratatui
//!
//! One screen: the board on the left; players, the play form, feedback
//! and the score tables on the right.

use crate::app::{App, Field, Tone};
use crate::game::board::{Multiplier, MultiplierKind, BOARD_SIZE};
use crate::game::{DictionaryStatus, Position, Tile};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Width of one board square in terminal columns
const CELL_WIDTH: u16 = 5;

/// Render the whole game screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board and side panels
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let board_width = CELL_WIDTH * (BOARD_SIZE as u16 + 1) + 2;
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(30)])
        .split(layout[1]);

    render_board(frame, body[0], app);
    render_side(frame, body[1], app);

    let footer = Paragraph::new(
        "Tab Field  Space Direction  Enter Play  F2 Hint  F5 New  F6 Reload  F9 End  Esc Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Render the header: logo, player to move, bag and dictionary status
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Logo
            Constraint::Min(20),    // Turn
            Constraint::Length(34), // Bag and dictionary
        ])
        .split(inner);

    let logo = Paragraph::new("SCRAWL")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let session = app.session();
    let turn = Paragraph::new(format!("{} to play", session.current_player().name))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(turn, header_layout[1]);

    let dictionary = session.dictionary();
    let dictionary_color = match dictionary.status() {
        DictionaryStatus::Loaded => Color::Green,
        DictionaryStatus::Unloaded => Color::Yellow,
        DictionaryStatus::Unavailable => Color::Red,
    };
    let status = Line::from(vec![
        Span::raw(format!("Bag {:>3}  ", session.bag().remaining())),
        Span::styled(
            format!("Dictionary {}", dictionary.status().label()),
            Style::default().fg(dictionary_color),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Right),
        header_layout[2],
    );
}

/// Render the 15x15 grid with column and row numbers
fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.session().board();
    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);

    let width = CELL_WIDTH as usize;
    let mut numbers = vec![Span::raw(" ".repeat(width))];
    numbers.extend((1..=BOARD_SIZE).map(|x| {
        Span::styled(format!("{:>width$}", x), Style::default().fg(Color::DarkGray))
    }));
    lines.push(Line::from(numbers));

    for (y, row) in board.rows().iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:>width$}", y + 1),
            Style::default().fg(Color::DarkGray),
        )];
        for (x, cell) in row.iter().enumerate() {
            spans.push(match cell {
                Some(tile) => tile_span(*tile),
                None => square_span(app, Position::new(x + 1, y + 1)),
            });
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Board"),
    );
    frame.render_widget(widget, area);
}

fn tile_span(tile: Tile) -> Span<'static> {
    let style = if tile.is_blank() {
        Style::default().fg(Color::Black).bg(Color::Gray)
    } else {
        Style::default().fg(Color::Black).bg(Color::Yellow).bold()
    };
    Span::styled(
        format!("  {}  ", tile.symbol().to_ascii_uppercase()),
        style,
    )
}

fn square_span(app: &App, position: Position) -> Span<'static> {
    let board = app.session().board();
    let label = board.label(position.x, position.y);
    let color = match board.layout().get(position) {
        Some(Multiplier {
            kind: MultiplierKind::Word,
            factor: 3,
        }) => Color::Red,
        Some(Multiplier {
            kind: MultiplierKind::Word,
            ..
        }) => Color::Magenta,
        Some(Multiplier {
            kind: MultiplierKind::Letter,
            factor: 3,
        }) => Color::Blue,
        Some(Multiplier {
            kind: MultiplierKind::Letter,
            ..
        }) => Color::Cyan,
        None => {
            return Span::styled(
                format!("{:>w$}", ".", w = CELL_WIDTH as usize),
                Style::default().fg(Color::DarkGray),
            )
        }
    };
    Span::styled(
        format!("{:>w$}", label, w = CELL_WIDTH as usize),
        Style::default().fg(color),
    )
}

/// Render the right-hand column
fn render_side(frame: &mut Frame, area: Rect, app: &App) {
    let players = app.session().players().len() as u16;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(players + 2), // Players
            Constraint::Length(5),           // Play form
            Constraint::Length(4),           // Feedback and hint
            Constraint::Min(6),              // Score tables
        ])
        .split(area);

    render_players(frame, layout[0], app);
    render_form(frame, layout[1], app);
    render_feedback(frame, layout[2], app);

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(layout[3]);
    render_session_words(frame, tables[0], app);
    render_top_words(frame, tables[1], app);
    render_top_games(frame, tables[2], app);
}

/// Render each player's rack and running total
fn render_players(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let items: Vec<ListItem> = session
        .players()
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let active = i == session.turn();
            let style = if active {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if active { "> " } else { "  " };
            ListItem::new(format!(
                "{}{:<12} {:<22} {:>4}",
                prefix,
                player.name,
                format_rack(player.rack.tiles()),
                player.score
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Players"),
    );
    frame.render_widget(list, area);
}

/// Render the word, column, row and direction inputs
fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let field = |label: &str, value: &str, field: Field| {
        let focused = app.focus == field;
        let style = if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if focused { "_" } else { "" };
        Span::styled(format!("{}: [{}{}]  ", label, value, cursor), style)
    };

    let lines = vec![
        Line::from(vec![field("Word", &app.word, Field::Word)]),
        Line::from(vec![
            field("Column", &app.column, Field::Column),
            field("Row", &app.row, Field::Row),
            Span::styled(
                format!("Direction: {}", app.direction.label()),
                Style::default().fg(Color::Magenta),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Play"),
    );
    frame.render_widget(widget, area);
}

/// Render the feedback line and the last hint
fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Neutral => Color::White,
    };
    let hint = match &app.hint {
        Some(word) => format!("Hint: {}", word),
        None => String::new(),
    };
    let lines = vec![
        Line::styled(app.feedback.clone(), Style::default().fg(color)),
        Line::styled(hint, Style::default().fg(Color::Yellow)),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(widget, area);
}

/// Render the words played since launch, newest first
fn render_session_words(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .played_words()
        .iter()
        .rev()
        .map(|entry| {
            ListItem::new(format!("{}: {} +{}", entry.player, entry.word, entry.score))
                .style(Style::default().fg(Color::Green))
        })
        .collect();
    frame.render_widget(score_list(items, "This Session"), area);
}

fn render_top_words(frame: &mut Frame, area: Rect, app: &App) {
    if !app.has_storage() {
        frame.render_widget(unavailable("Top Words"), area);
        return;
    }
    let items: Vec<ListItem> = app
        .top_words()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(format!(
                "{:>2}. {} {} {}",
                i + 1,
                entry.word,
                entry.score,
                entry.name
            ))
            .style(rank_style(i))
        })
        .collect();
    frame.render_widget(score_list(items, "Top Words"), area);
}

fn render_top_games(frame: &mut Frame, area: Rect, app: &App) {
    if !app.has_storage() {
        frame.render_widget(unavailable("Top Games"), area);
        return;
    }
    let items: Vec<ListItem> = app
        .top_games()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(format!("{:>2}. {} {}", i + 1, entry.name, entry.score))
                .style(rank_style(i))
        })
        .collect();
    frame.render_widget(score_list(items, "Top Games"), area);
}

fn score_list<'a>(items: Vec<ListItem<'a>>, title: &'a str) -> List<'a> {
    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    )
}

fn unavailable(title: &str) -> Paragraph<'_> {
    Paragraph::new("Scores unavailable")
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
}

fn rank_style(rank: usize) -> Style {
    if rank == 0 {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    }
}

/// Format a rack for display
fn format_rack(tiles: &[Tile]) -> String {
    if tiles.is_empty() {
        return String::from("[ ]");
    }

    let letters: String = tiles
        .iter()
        .map(|t| t.symbol().to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    format!("[ {} ]", letters)
}
