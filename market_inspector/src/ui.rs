use std::collections::VecDeque;

use quest_core::shop::{CUSTOMISE_HEADING, EXIT_LABEL, PURCHASE_HEADING};
use quest_core::{CustomisationChoice, EffectOverlay, GameSession, RoboticonArt, ShopView};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Sprite drawn in the selected-roboticon slot.
pub type Sprite = &'static str;

pub fn terminal_art() -> RoboticonArt<Sprite> {
    RoboticonArt {
        uncustomised: "[o_o]",
        energy: "[o_o]~",
        ore: "[o_o]#",
        food: "[o_o]*",
        empty: "( no roboticons )",
    }
}

pub struct UiState {
    pub cursor: (u32, u32),
    pub grid_size: (u32, u32),
    pub selected_effect: usize,
    pub effect_count: usize,
    pub overlay: Option<EffectOverlay>,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl UiState {
    pub fn new(grid_size: (u32, u32), effect_count: usize) -> Self {
        Self {
            cursor: (0, 0),
            grid_size,
            selected_effect: 0,
            effect_count,
            overlay: None,
            logs: VecDeque::new(),
            max_logs: 8,
        }
    }

    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (width, height) = self.grid_size;
        if width == 0 || height == 0 {
            return;
        }
        let x = (self.cursor.0 as i64 + dx as i64).clamp(0, width as i64 - 1);
        let y = (self.cursor.1 as i64 + dy as i64).clamp(0, height as i64 - 1);
        self.cursor = (x as u32, y as u32);
    }

    pub fn cycle_effect(&mut self) {
        if self.effect_count > 0 {
            self.selected_effect = (self.selected_effect + 1) % self.effect_count;
        }
    }
}

pub fn draw_ui(
    frame: &mut Frame,
    state: &UiState,
    session: &GameSession,
    view: &ShopView<Sprite>,
    customisation: CustomisationChoice,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(10),
        ])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(columns[1]);

    draw_header(frame, rows[0], session);
    draw_shop(frame, columns[0], view, customisation);
    draw_plots(frame, right[0], state, session);
    draw_effects(frame, right[1], state, session);
    draw_commands(frame, rows[2]);
    draw_logs(frame, rows[3], state);

    if let Some(overlay) = &state.overlay {
        draw_overlay(frame, overlay);
    }
}

fn bordered(frame: &mut Frame, area: Rect, title: &str, paragraph: Paragraph) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_header(frame: &mut Frame, area: Rect, session: &GameSession) {
    let line = Line::from(vec![
        Span::styled(
            format!("phase {}", session.phase().as_str()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | funds "),
        Span::styled(
            format!("{}", session.player().money()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" | q to exit"),
    ]);
    bordered(
        frame,
        area,
        "Roboticon Quest Market",
        Paragraph::new(line).wrap(Wrap { trim: true }),
    );
}

fn enabled_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_shop(
    frame: &mut Frame,
    area: Rect,
    view: &ShopView<Sprite>,
    customisation: CustomisationChoice,
) {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let options: Vec<Span> = CustomisationChoice::OPTIONS
        .iter()
        .map(|choice| {
            let style = if *choice == customisation {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", choice.label()), style)
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(PURCHASE_HEADING, heading)),
        Line::from(vec![
            Span::raw("- "),
            Span::styled(view.quantity_label.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(" +   "),
            Span::styled(view.purchase_label.clone(), enabled_style(view.purchase_enabled)),
        ]),
        Line::from(""),
        Line::from(Span::styled(CUSTOMISE_HEADING, heading)),
        Line::from(vec![
            Span::raw("<  "),
            Span::styled(view.selected_image, Style::default().fg(Color::Magenta)),
            Span::raw("  >"),
        ]),
        Line::from(view.selection_label.clone()),
        Line::from(options),
        Line::from(Span::styled(
            view.customise_label.clone(),
            enabled_style(view.customise_enabled),
        )),
        Line::from(""),
        Line::from(Span::styled(EXIT_LABEL, Style::default().fg(Color::Red))),
    ];

    bordered(
        frame,
        area,
        "Roboticon Shop",
        Paragraph::new(lines).wrap(Wrap { trim: false }),
    );
}

fn draw_plots(frame: &mut Frame, area: Rect, state: &UiState, session: &GameSession) {
    let (width, height) = state.grid_size;
    let mut lines = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut spans = Vec::with_capacity(width as usize);
        for x in 0..width {
            let text = session
                .plot_at(x, y)
                .and_then(|plot| session.plot_modifiers(plot))
                .map(|m| format!("{:>3}/{:>3}/{:>3}", m.food, m.energy, m.ore))
                .unwrap_or_else(|| "  ?/  ?/  ?".to_string());
            let style = if state.cursor == (x, y) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    bordered(
        frame,
        area,
        "Plots (food/energy/ore)",
        Paragraph::new(lines).wrap(Wrap { trim: false }),
    );
}

fn draw_effects(frame: &mut Frame, area: Rect, state: &UiState, session: &GameSession) {
    let lines: Vec<Line> = session
        .effects()
        .iter()
        .enumerate()
        .map(|(index, effect)| {
            let marker = if index == state.selected_effect { ">" } else { " " };
            let mode = session
                .default_mode(effect.name())
                .map(|mode| mode.as_str())
                .unwrap_or("add");
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {:<16}", effect.name())),
                Span::styled(format!("{:<10}", mode), Style::default().fg(Color::Cyan)),
                Span::raw(format!("applied {}", effect.affected_count())),
            ])
        })
        .collect();

    bordered(
        frame,
        area,
        "Effects",
        Paragraph::new(lines).wrap(Wrap { trim: false }),
    );
}

fn draw_commands(frame: &mut Frame, area: Rect) {
    let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
    let lines = vec![
        Line::from(vec![
            key("+/-"),
            Span::raw(" quantity  "),
            key("enter"),
            Span::raw(" buy  "),
            key("</>"),
            Span::raw(" browse  "),
            key("1-3"),
            Span::raw(" pick customisation  "),
            key("c"),
            Span::raw(" customise"),
        ]),
        Line::from(vec![
            key("arrows"),
            Span::raw(" move plot cursor  "),
            key("p"),
            Span::raw(" install selected roboticon  "),
            key("x"),
            Span::raw(" exit shop"),
        ]),
        Line::from(vec![
            key("tab"),
            Span::raw(" next effect  "),
            key("i"),
            Span::raw(" impose  "),
            key("t"),
            Span::raw(" trigger on cursor  "),
            key("u"),
            Span::raw(" undo effect  "),
            key("r"),
            Span::raw(" revert all"),
        ]),
        Line::from(vec![key("q"), Span::raw(" exit")]),
    ];
    bordered(
        frame,
        area,
        "Commands",
        Paragraph::new(lines).wrap(Wrap { trim: false }),
    );
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    bordered(
        frame,
        area,
        "Logs",
        Paragraph::new(lines).wrap(Wrap { trim: false }),
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_overlay(frame: &mut Frame, overlay: &EffectOverlay) {
    let area = centered(frame.size(), 64, 9);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                overlay.header,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(overlay.title.clone(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(overlay.description.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!("[{}] any key", overlay.close_label),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(218, 165, 32)));
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        area.inner(&Margin {
            vertical: 1,
            horizontal: 2,
        }),
    );
}
