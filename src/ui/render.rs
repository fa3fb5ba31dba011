use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Focus, LoginFocus};
use crate::routes::Screen;

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Login => render_login(frame, app),
        Screen::Dashboard => render_dashboard(frame, app),
    }
}

// ===== Login screen =====

fn render_login(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 12, frame.area());

    let mut lines = vec![
        Line::from(Span::styled("  Winged", styles::title_style())),
        Line::from(""),
    ];

    lines.push(field_line(
        "Username",
        &app.login.username,
        app.login.focus == LoginFocus::Username,
    ));
    let masked = "*".repeat(app.login.password.len());
    lines.push(field_line(
        "Password",
        &masked,
        app.login.focus == LoginFocus::Password,
    ));
    lines.push(Line::from(""));

    if let Some(ref error) = app.login.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  [Tab] switch field  [Enter] log in  [Esc] quit",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style())
        .title(" Login ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    Line::from(vec![
        Span::styled(format!("  {:<9}", label), styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), style),
    ])
}

// ===== Dashboard screen =====

fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Min(5),    // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_lists(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled("  Winged", styles::title_style()));
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_lists(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let container_items: Vec<ListItem> = app
        .containers
        .iter()
        .map(|c| {
            let indent = if c.is_top_level() { "" } else { "  " };
            ListItem::new(format!("{}{}", indent, c.name)).style(styles::list_item_style())
        })
        .collect();

    let containers = List::new(container_items)
        .block(bordered(" Containers ", app.focus == Focus::Containers))
        .highlight_style(styles::selected_style());
    let mut container_state = ListState::default();
    if !app.containers.is_empty() {
        container_state.select(Some(app.selected_container));
    }
    frame.render_stateful_widget(containers, columns[0], &mut container_state);

    let item_rows: Vec<ListItem> = app
        .items
        .iter()
        .map(|i| {
            ListItem::new(format!("[{}] {}", i.status_marker(), i.statement))
                .style(styles::list_item_style())
        })
        .collect();

    let items = List::new(item_rows)
        .block(bordered(" Items ", app.focus == Focus::Items))
        .highlight_style(styles::selected_style());
    let mut item_state = ListState::default();
    if !app.items.is_empty() {
        item_state.select(Some(app.selected_item));
    }
    frame.render_stateful_widget(items, columns[1], &mut item_state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]efresh | [l]ogout | [q]uit";

    let left_text = if let Some(ref msg) = app.status {
        format!(" {} ", msg)
    } else if let Some(refreshed) = app.last_refresh {
        format!(" Refreshed {} ", refreshed.format("%H:%M:%S"))
    } else {
        " ".to_string()
    };

    let padding = (area.width as usize).saturating_sub(left_text.len() + shortcuts.len() + 2);
    let line = Line::from(vec![
        Span::raw(left_text),
        Span::raw(" ".repeat(padding)),
        Span::styled(shortcuts, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

// ===== Helpers =====

fn bordered(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        styles::title_style()
    } else {
        styles::muted_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

/// A fixed-size rect centered in `area`, clamped to fit.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
