use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use yacht_core::{Category, MAX_ROLLS_PER_ROUND};

use crate::App;

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(NUM_TABLE_ROWS),
            Constraint::Length(3),
        ])
        .split(f.size());

    draw_header(f, app, chunks[0]);
    draw_dice(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);
}

const NUM_TABLE_ROWS: u16 = 15;

fn draw_header(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let s = &app.session;
    let text = if s.is_game_over() {
        format!(" Yacht | GAME OVER | final score {} ", s.total_score())
    } else {
        format!(
            " Yacht | rolls {}/{} | total {} ",
            s.rolls_used(),
            MAX_ROLLS_PER_ROUND,
            s.total_score()
        )
    };
    let style = if s.is_game_over() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_dice(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    for (i, die) in app.session.dice().iter().enumerate() {
        let held = die.held;
        let border_style = if held {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let title = if held {
            format!("{}·held", i + 1)
        } else {
            format!("{}", i + 1)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let rows = pip_rows(die.value);
        let lines: Vec<Line> = rows.iter().map(|r| Line::from(*r)).collect();
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            cells[i],
        );
    }
}

fn draw_table(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let s = &app.session;
    let candidates = s.candidate_scores();
    let best = if s.has_rolled_this_round() {
        s.best_category()
    } else {
        None
    };

    let mut items: Vec<ListItem> = Vec::with_capacity(Category::ALL.len());
    for (i, &cat) in Category::ALL.iter().enumerate() {
        let recorded = s.sheet().get(cat);
        let cursor = if i == app.selected { "▸" } else { " " };
        let (line, mut style) = match recorded {
            Some(value) => (
                format!("{cursor} {:<16} {value:>4}   recorded", cat.label()),
                Style::default().fg(Color::DarkGray),
            ),
            None => (
                format!("{cursor} {:<16} {:>4}", cat.label(), candidates[i]),
                Style::default(),
            ),
        };
        if best == Some(cat) && recorded.is_none() {
            style = style.fg(Color::Green);
        }
        if i == app.selected {
            style = style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED);
        }
        items.push(ListItem::new(line).style(style));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("score sheet (candidate scores for the current dice)"),
    );
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(app.status.as_str()).block(block), area);
}

/// Three text rows of pips for one die face; 0 renders as a blank die.
fn pip_rows(value: u8) -> [&'static str; 3] {
    match value {
        1 => ["     ", "  ●  ", "     "],
        2 => ["●    ", "     ", "    ●"],
        3 => ["●    ", "  ●  ", "    ●"],
        4 => ["●   ●", "     ", "●   ●"],
        5 => ["●   ●", "  ●  ", "●   ●"],
        6 => ["●   ●", "●   ●", "●   ●"],
        _ => ["     ", "  ·  ", "     "],
    }
}
