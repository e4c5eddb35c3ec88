//! Step indicator bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use registrar::wizard::{IndicatorItem, StepState};

fn item_spans<'a>(item: &IndicatorItem<'a>, show_optional_badge: bool) -> Vec<Span<'a>> {
    let (marker, style) = match item.state {
        StepState::Completed => ("✓", Style::default().fg(Color::Green)),
        StepState::Active => (
            "●",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        StepState::Pending => ("○", Style::default().fg(Color::DarkGray)),
    };

    let mut spans = vec![
        Span::styled(format!("{marker} {}. ", item.step.id), style),
        Span::styled(item.step.title.as_str(), style),
    ];
    if show_optional_badge && item.optional {
        spans.push(Span::styled(" (optional)", Style::default().fg(Color::DarkGray)));
    }
    spans
}

/// Indicator as a single line, steps separated by arrows
pub fn indicator_line<'a>(items: &[IndicatorItem<'a>], show_optional_badge: bool) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  →  ", Style::default().fg(Color::DarkGray)));
        }
        spans.extend(item_spans(item, show_optional_badge));
    }
    Line::from(spans)
}

pub fn render_indicator(
    frame: &mut Frame,
    area: Rect,
    items: &[IndicatorItem<'_>],
    show_optional_badge: bool,
) {
    let para = Paragraph::new(indicator_line(items, show_optional_badge))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar::wizard::{default_steps, indicator_items};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_indicator_line_marks_states() {
        let steps = default_steps();
        let items = indicator_items(&steps, 2);
        let text = line_text(&indicator_line(&items[..3], true));
        assert_eq!(
            text,
            "✓ 1. Company  →  ● 2. Company Details (optional)  →  ○ 3. Teams (optional)"
        );
    }

    #[test]
    fn test_optional_badge_can_be_hidden() {
        let steps = default_steps();
        let items = indicator_items(&steps, 1);
        let text = line_text(&indicator_line(&items, false));
        assert!(!text.contains("optional"));
    }
}
