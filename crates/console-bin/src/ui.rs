use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use console_core::protocol::{Conflict, Side};
use console_core::sync::{SyncPhase, CONFLICT_PREFIX, MSG_NO_CONFLICTS};

use crate::app::{App, Pane};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // directory panes
            Constraint::Length(1), // status line
            Constraint::Length(8), // logs
            Constraint::Length(6), // conflicts
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_pane(f, panes[0], app.pane(Side::Source), "源目录", app.focus == Side::Source);
    draw_pane(f, panes[1], app.pane(Side::Dest), "目标目录", app.focus == Side::Dest);
    draw_status(f, chunks[1], app);
    draw_logs(f, chunks[2], app);
    draw_conflicts(f, chunks[3], app);
    draw_hints(f, chunks[4]);
}

fn draw_pane(f: &mut Frame, area: Rect, pane: &Pane, title: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let loading = if pane.browser.is_loading() { " …" } else { "" };
    let title = format!(" {title}: {}{loading} ", pane.browser.cursor());

    let mut items: Vec<ListItem> = pane
        .browser
        .entries()
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name))
                    .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(entry.name.clone())
            }
        })
        .collect();

    if let Some(err) = pane.browser.error() {
        items.push(
            ListItem::new(format!("加载失败: {err}")).style(Style::default().fg(Color::Red)),
        );
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused && !pane.browser.entries().is_empty() {
        state.select(Some(pane.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let style = match app.sync.phase() {
        SyncPhase::Idle => Style::default().fg(Color::DarkGray),
        SyncPhase::Syncing => Style::default().fg(Color::Yellow),
        SyncPhase::Completed => Style::default().fg(Color::Green),
        SyncPhase::Failed => Style::default().fg(Color::Red),
    };
    let text = if app.sync.message().is_empty() {
        "就绪"
    } else {
        app.sync.message()
    };
    f.render_widget(Paragraph::new(Span::styled(format!(" {text}"), style)), area);
}

fn draw_logs(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" 日志 ");
    let para = match &app.logs_error {
        Some(err) => Paragraph::new(Span::styled(
            format!("加载失败: {err}"),
            Style::default().fg(Color::Red),
        )),
        None => {
            // Verbatim text, tailed to what fits inside the borders.
            let inner_height = area.height.saturating_sub(2) as usize;
            let lines: Vec<&str> = app.logs.lines().collect();
            let start = lines.len().saturating_sub(inner_height);
            Paragraph::new(lines[start..].join("\n"))
        }
    };
    f.render_widget(para.block(block), area);
}

fn draw_conflicts(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" 冲突 ");
    let para = match (&app.conflicts_error, &app.conflicts) {
        (Some(err), _) => Paragraph::new(Span::styled(
            format!("加载失败: {err}"),
            Style::default().fg(Color::Red),
        )),
        (None, Some(list)) => {
            let style = if list.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            };
            Paragraph::new(conflict_lines(list).join("\n")).style(style)
        }
        (None, None) => Paragraph::new(""),
    };
    f.render_widget(para.block(block), area);
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let hints = " [Tab] 切换面板  [↑↓] 移动  [Enter] 进入  [Backspace] 上级  [s] 同步  [r] 刷新  [l] 日志  [c] 冲突  [q] 退出";
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Conflict pane contents: the placeholder for an empty list, otherwise one
/// line per conflicting path.
pub fn conflict_lines(conflicts: &[Conflict]) -> Vec<String> {
    if conflicts.is_empty() {
        vec![MSG_NO_CONFLICTS.to_string()]
    } else {
        conflicts
            .iter()
            .map(|c| format!("{CONFLICT_PREFIX}{}", c.path))
            .collect()
    }
}
