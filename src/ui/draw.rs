use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::Priority;
use crate::view::{PageButton, Screen, TaskCard, ViewState};

const HELP: &str =
    "a add  e edit  d delete  s status  p priority  1-5/←→ page  ↑↓ select  r refresh  q quit";

pub fn draw(f: &mut Frame, state: &ViewState, screen: Option<&Screen>, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_filters(f, chunks[0], state);
    match screen {
        Some(screen) => {
            draw_cards(f, chunks[1], &screen.cards, selected);
            draw_pages(f, chunks[2], &screen.pages);
        }
        None => {
            let loading = Paragraph::new("Loading tasks...")
                .block(Block::default().title("Tasks").borders(Borders::ALL));
            f.render_widget(loading, chunks[1]);
        }
    }
    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn draw_filters(f: &mut Frame, area: Rect, state: &ViewState) {
    let status = state
        .status_filter
        .map_or_else(|| "All".to_string(), |s| s.to_string());
    let priority = state
        .priority_filter
        .map_or_else(|| "All".to_string(), |p| p.to_string());
    let line = Line::from(vec![
        Span::raw("Status: "),
        Span::styled(status, Style::default().fg(Color::Cyan)),
        Span::raw("   Priority: "),
        Span::styled(priority, Style::default().fg(Color::Cyan)),
    ]);
    let title = format!("TaskBoard {}", env!("SIMPLE_VERSION"));
    f.render_widget(
        Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn card_item(card: &TaskCard) -> ListItem<'_> {
    ListItem::new(vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.description.clone()),
        Line::from(format!("Status: {}", card.status)),
        Line::from(format!("Due Date: {}", card.due)),
        Line::from(vec![
            Span::raw("Priority: "),
            Span::styled(card.priority.to_string(), priority_style(card.priority)),
        ]),
        Line::from(Span::styled(
            "[e] Edit  [d] Delete",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ])
}

fn draw_cards(f: &mut Frame, area: Rect, cards: &[TaskCard], selected: usize) {
    let block = Block::default().title("Tasks").borders(Borders::ALL);
    if cards.is_empty() {
        f.render_widget(Paragraph::new("No tasks on this page.").block(block), area);
        return;
    }

    let items: Vec<ListItem> = cards.iter().map(card_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_pages(f: &mut Frame, area: Rect, pages: &[PageButton]) {
    let mut spans = Vec::with_capacity(pages.len() * 2);
    for button in pages {
        let style = if button.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", button.page), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().title("Pages").borders(Borders::ALL)),
        area,
    );
}
