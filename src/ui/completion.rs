//! Completion view shown after the last data step

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use registrar::model::{RegistrationAggregate, RegistrationSummary};
use registrar::schema::{CompanyDetailsSchema, CompanySchema, StepSchema};

use super::centered_rect;

/// Summary lines with the company records spelled out
fn completion_lines(aggregate: &RegistrationAggregate) -> Vec<(&'static str, String)> {
    let mut lines = RegistrationSummary::from_aggregate(aggregate).lines();
    if let Some((_, company)) = lines.first_mut() {
        *company = CompanySchema::describe(&aggregate.company);
    }
    let details = CompanyDetailsSchema::describe(&aggregate.company_details);
    if !details.is_empty() {
        lines.insert(1, ("Details", details));
    }
    lines
}

pub fn render_completion(frame: &mut Frame, area: Rect, aggregate: &RegistrationAggregate) {
    let area = centered_rect(60, 60, area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Registration complete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(4),    // Summary
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Your company is ready to go",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = completion_lines(aggregate)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" finish  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" back"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}
