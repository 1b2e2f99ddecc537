//! Stateless rendering of a game session.

use crate::app::App;
use perfect_tictactoe::{GameSession, Mark, Position, Square, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    text: Color,
    dim: Color,
    x: Color,
    o: Color,
    cursor: Color,
    winning: Color,
    accent: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                dim: Color::Gray,
                x: Color::Blue,
                o: Color::Red,
                cursor: Color::LightYellow,
                winning: Color::LightGreen,
                accent: Color::Magenta,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                dim: Color::DarkGray,
                x: Color::LightBlue,
                o: Color::LightRed,
                cursor: Color::DarkGray,
                winning: Color::Green,
                accent: Color::Cyan,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, session: &GameSession, app: &App) {
    let palette = Palette::for_theme(session.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board and history
            Constraint::Length(3), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    let title = Paragraph::new(format!("Perfect Tic-Tac-Toe - {}", session.mode().label()))
        .style(palette.base().fg(palette.accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(24)])
        .split(chunks[1]);
    draw_board(frame, body[0], session, app.cursor(), &palette);
    draw_history(frame, body[1], session, &palette);

    let status = match app.message() {
        Some(message) => format!("{} | {}", session.status_line(), message),
        None => session.status_line(),
    };
    let status = Paragraph::new(status)
        .style(palette.base())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let keys = Paragraph::new(
        "arrows/enter or 1-9 play  [ ] step  home/end  m mode  r restart  t theme  q quit",
    )
    .style(palette.base().fg(palette.dim))
    .alignment(Alignment::Center);
    frame.render_widget(keys, chunks[3]);
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    cursor: Position,
    palette: &Palette,
) {
    let board_area = center_rect(area, 40, 11);
    let winning = session.outcome().line();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(2),
                Constraint::Length(12),
                Constraint::Length(2),
                Constraint::Length(12),
            ])
            .split(rows[row * 2]);

        for col in 0..3 {
            let Some(pos) = Position::from_index(row * 3 + col) else {
                continue;
            };
            let highlighted = winning.is_some_and(|line| line.contains(pos));
            let square = session.board().get(pos);
            draw_cell(frame, cols[col * 2], square, pos, pos == cursor, highlighted, palette);
            if col < 2 {
                let sep = Paragraph::new("│\n│\n│").style(palette.base().fg(palette.dim));
                frame.render_widget(sep, cols[col * 2 + 1]);
            }
        }

        if row < 2 {
            let sep = Paragraph::new("─".repeat(40)).style(palette.base().fg(palette.dim));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    square: Square,
    pos: Position,
    is_cursor: bool,
    is_winning: bool,
    palette: &Palette,
) {
    let (symbol, mut style) = match square {
        Square::Empty => (format!("{}", pos.to_index() + 1), palette.base().fg(palette.dim)),
        Square::Occupied(Mark::X) => ("X".to_string(), palette.base().fg(palette.x)),
        Square::Occupied(Mark::O) => ("O".to_string(), palette.base().fg(palette.o)),
    };
    if square.mark().is_some() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if is_winning {
        style = style.bg(palette.winning);
    }
    if is_cursor {
        style = style.bg(palette.cursor).add_modifier(Modifier::REVERSED);
    }

    let text = vec![Line::default(), Line::from(Span::styled(format!(" {} ", symbol), style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// One line per recorded step, the displayed one marked.
fn history_lines(session: &GameSession) -> Vec<String> {
    (0..session.history().len())
        .map(|step| {
            let marker = if step == session.current_step() { ">" } else { " " };
            match session.move_at(step) {
                Some(mv) => format!("{} Go to move #{} ({})", marker, step, mv),
                None => format!("{} Go to game start", marker),
            }
        })
        .collect()
}

fn draw_history(frame: &mut Frame, area: Rect, session: &GameSession, palette: &Palette) {
    let lines: Vec<Line> = history_lines(session)
        .into_iter()
        .enumerate()
        .map(|(step, text)| {
            let style = if step == session.current_step() {
                palette.base().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                palette.base()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let history = Paragraph::new(lines)
        .style(palette.base())
        .block(Block::default().title("History").borders(Borders::ALL));
    frame.render_widget(history, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
