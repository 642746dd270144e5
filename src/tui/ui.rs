//! Stateless UI rendering for quantum tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use quantum_tictactoe::{Cell, Player, Position};

use super::app::App;
use crate::selection::Selection;
use crate::tutorial::{Focus, RULES};

const ROWS: [[Position; 3]; 3] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
];

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board and side panel
            Constraint::Length(4), // Status
        ])
        .split(area);

    let title = Paragraph::new("Quantum Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(chunks[1]);

    draw_board(frame, body[0], app);
    draw_side_panel(frame, body[1], app);

    let focused = focus(app) == Some(Focus::Message);
    let status = Paragraph::new(app.status().as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("Message", focused));
    frame.render_widget(status, chunks[2]);

    if *app.show_rules() {
        draw_rules(frame, area);
    }
    if app.tutorial().is_some() {
        draw_tutorial(frame, area, app);
    }
}

fn focus(app: &App) -> Option<Focus> {
    app.tutorial().as_ref().map(|t| t.current().focus)
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let frame_block = panel("Board", focus(app) == Some(Focus::Board));
    let inner = frame_block.inner(area);
    frame.render_widget(frame_block, area);

    let board_area = center_rect(inner, 38, 11);
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

    for (i, positions) in ROWS.iter().enumerate() {
        draw_row(frame, rows[i * 2], app, positions);
        if i < 2 {
            draw_separator(frame, rows[i * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, positions: &[Position; 3]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], app, *pos);
        if i < 2 {
            draw_separator_vertical(frame, cols[i * 2 + 1]);
        }
    }
}

fn mark_style(mark: Player) -> Style {
    let color = match mark {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position) {
    let cell = app.game().board().get(pos);

    let (symbol, base_style) = match cell {
        Cell::Quantum => (
            "?".to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ),
        Cell::Classical { mark, .. } => (mark.to_string(), mark_style(mark)),
    };
    let link = match cell.entangled_with() {
        Some(control) => format!("~{}", control.number()),
        None => String::new(),
    };

    let highlight = if app.is_flashing(pos) {
        Some(Style::default().bg(Color::Green).fg(Color::Black))
    } else if app.selection().pending_control() == Some(pos) {
        Some(Style::default().bg(Color::Yellow).fg(Color::Black))
    } else if pos == *app.cursor() {
        Some(Style::default().bg(Color::White).fg(Color::Black))
    } else {
        None
    };
    let patch = |style: Style| highlight.map_or(style, |h| style.patch(h));

    let lines = vec![
        Line::from(Span::styled(
            pos.number().to_string(),
            patch(Style::default().fg(Color::DarkGray)),
        )),
        Line::from(Span::styled(symbol, patch(base_style))),
        Line::from(Span::styled(link, patch(Style::default().fg(Color::Magenta)))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(patch(Style::default()));
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn mode_label(selection: &Selection) -> String {
    match selection {
        Selection::Idle => "Choose a move".to_string(),
        Selection::AwaitingCell => "Classical: pick a box".to_string(),
        Selection::AwaitingControl => "Quantum: pick control".to_string(),
        Selection::AwaitingTarget(control) => {
            format!("Quantum: pick target for {}", control.number())
        }
    }
}

fn key_line(keys: &str, action: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{:>7} ", keys), style.fg(Color::Cyan)),
        Span::styled(action.to_string(), style),
    ])
}

fn draw_side_panel(frame: &mut Frame, area: Rect, app: &App) {
    let game = app.game();
    let focus = focus(app);

    let turn = if game.is_over() {
        Line::from(Span::styled(
            "Game over",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        let player = game.current_player();
        Line::from(vec![
            Span::raw("Turn: "),
            Span::styled(format!("Player {}", player), mark_style(player)),
        ])
    };

    let mut lines = vec![
        turn,
        Line::from(format!("Mode: {}", mode_label(app.selection()))),
        Line::from(""),
        Line::from(Span::styled(
            "Entanglements",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
    ];
    let links = game.board().entanglements();
    if links.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.extend(links.into_iter().map(|(target, control)| {
        Line::from(format!("  box {} <- box {}", target.number(), control.number()))
    }));

    lines.push(Line::from(""));
    lines.extend([
        key_line("c", "Classical move", focus == Some(Focus::ClassicalMove)),
        key_line("e", "Quantum move", focus == Some(Focus::QuantumMove)),
        key_line("1-9", "Pick box", false),
        key_line("arrows", "Move cursor", false),
        key_line("enter", "Pick cursor box", false),
        key_line("esc", "Cancel move", false),
        key_line("r", "Reset", focus == Some(Focus::Reset)),
        key_line("?", "Rules", focus == Some(Focus::Rules)),
        key_line("t", "Tutorial", false),
        key_line("q", "Quit", false),
    ]);

    let side = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Game"));
    frame.render_widget(side, area);
}

fn draw_rules(frame: &mut Frame, area: Rect) {
    let popup = center_rect(area, 76.min(area.width), 26.min(area.height));
    frame.render_widget(Clear, popup);
    let rules = Paragraph::new(RULES)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Rules (any key to close)"),
        );
    frame.render_widget(rules, popup);
}

fn draw_tutorial(frame: &mut Frame, area: Rect, app: &App) {
    let Some(tutorial) = app.tutorial() else {
        return;
    };
    let popup = center_rect(area, 60.min(area.width), 12.min(area.height));
    frame.render_widget(Clear, popup);

    let next = if tutorial.is_last() {
        "Enter: finish"
    } else {
        "Enter: next"
    };
    let title = format!(
        "Tutorial {}/{}: {} ({} | Esc: close)",
        tutorial.page(),
        tutorial.pages(),
        tutorial.current().focus,
        next
    );
    let text = Paragraph::new(tutorial.current().message)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(title),
        );
    frame.render_widget(text, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use quantum_tictactoe::{Bit, CollapseSource, QuantumGame, ScriptedCollapse};
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_board_and_links() {
        let source: Box<dyn CollapseSource> = Box::new(ScriptedCollapse::new([Bit::Zero]));
        let mut game = QuantumGame::new(source);
        game.apply_classical_move(1).unwrap();
        game.apply_quantum_move(0, 1).unwrap();
        let mut settings = Settings::default();
        settings.complete_onboarding();
        let app = App::new(game, settings, None, false);

        let screen = rendered(&app);
        assert!(screen.contains("Quantum Tic-Tac-Toe"));
        assert!(screen.contains("box 2 <- box 1"));
        assert!(screen.contains("~1"));
        assert!(screen.contains("Player X"));
    }

    #[test]
    fn test_renders_tutorial_overlay() {
        let source: Box<dyn CollapseSource> = Box::new(ScriptedCollapse::default());
        let app = App::new(QuantumGame::new(source), Settings::default(), None, true);
        let screen = rendered(&app);
        assert!(screen.contains("Tutorial 1/6"));
    }
}
