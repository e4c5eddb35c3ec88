//! Form field widgets and the per-step input form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use registrar::form::StepForm;
use registrar::model::RegistrationAggregate;
use registrar::schema::{FieldSpec, InputKind};

/// Label of the empty option in optional choice fields
const NONE_LABEL: &str = "(none)";

/// Byte offset of the `chars`-th character
fn byte_index(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

/// A form field widget that can handle different input types
pub enum FormField {
    /// Single-line text input; `cursor_pos` counts characters
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        masked: bool,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// One `(value, label)` option out of a list
    Select {
        options: Vec<(String, String)>,
        selected: Option<usize>,
        list_state: ListState,
    },
    /// Boolean toggle; a locked toggle can be switched off but not on
    Toggle {
        value: bool,
        locked: bool,
        true_label: String,
        false_label: String,
    },
}

/// Keys that switch an off toggle on
fn turns_on(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ' | 'y') | KeyCode::Right)
}

impl FormField {
    /// Create a widget for `spec` holding `value`
    ///
    /// A choice field with no options degrades to free text so the step can
    /// still be filled in before the list it draws from exists.
    pub fn from_spec(spec: &FieldSpec, value: &str, options: Vec<(String, String)>) -> Self {
        match spec.input {
            InputKind::Text | InputKind::Secret => FormField::text(spec, value),
            InputKind::Multiline => {
                let mut textarea = TextArea::default();
                textarea.insert_str(value);
                FormField::TextArea {
                    textarea: Box::new(textarea),
                    placeholder: spec.placeholder.to_string(),
                }
            }
            InputKind::Choice(_) if options.is_empty() => FormField::text(spec, value),
            InputKind::Choice(_) => {
                let mut options = options;
                if !spec.required {
                    options.insert(0, (String::new(), NONE_LABEL.to_string()));
                }
                let selected = options.iter().position(|(v, _)| v == value);
                let mut list_state = ListState::default();
                list_state.select(selected);
                FormField::Select {
                    options,
                    selected,
                    list_state,
                }
            }
            InputKind::Toggle => FormField::Toggle {
                value: value == "true",
                locked: false,
                true_label: "Yes".to_string(),
                false_label: "No".to_string(),
            },
        }
    }

    fn text(spec: &FieldSpec, value: &str) -> Self {
        FormField::TextInput {
            cursor_pos: value.chars().count(),
            value: value.to_string(),
            placeholder: spec.placeholder.to_string(),
            masked: spec.input == InputKind::Secret,
        }
    }

    /// Lock or unlock a toggle; other widgets are unaffected
    pub fn with_locked(mut self, lock: bool) -> Self {
        if let FormField::Toggle { locked, .. } = &mut self {
            *locked = lock;
        }
        self
    }

    /// Whether `key` would switch on a locked toggle
    pub fn refuses(&self, key: KeyEvent) -> bool {
        matches!(self, FormField::Toggle { value: false, locked: true, .. }) && turns_on(key.code)
    }

    /// Get the current value as a string
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::Select {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .map(|(value, _)| value.clone())
                .unwrap_or_default(),
            FormField::Toggle { value, .. } => value.to_string(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::TextArea { .. })
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => match key.code {
                KeyCode::Char(c) => {
                    value.insert(byte_index(value, *cursor_pos), c);
                    *cursor_pos += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        value.remove(byte_index(value, *cursor_pos));
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.chars().count() {
                        value.remove(byte_index(value, *cursor_pos));
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor_pos = cursor_pos.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.chars().count();
                    true
                }
                _ => false,
            },
            FormField::TextArea { textarea, .. } => {
                // TextArea handles its own key events
                textarea.input(key)
            }
            FormField::Select {
                options,
                selected,
                list_state,
            } => {
                let last = options.len().saturating_sub(1);
                let next = match key.code {
                    KeyCode::Up | KeyCode::Char('k') => selected.map_or(0, |i| i.saturating_sub(1)),
                    KeyCode::Down | KeyCode::Char('j') => selected.map_or(0, |i| (i + 1).min(last)),
                    _ => return false,
                };
                *selected = Some(next);
                list_state.select(Some(next));
                true
            }
            FormField::Toggle { value, locked, .. } => match key.code {
                code if *locked && !*value && turns_on(code) => false,
                KeyCode::Char(' ') => {
                    *value = !*value;
                    true
                }
                KeyCode::Left | KeyCode::Char('n') => {
                    *value = false;
                    true
                }
                KeyCode::Right | KeyCode::Char('y') => {
                    *value = true;
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } => 1,
            FormField::TextArea { .. } => 5, // Multi-line gets more space
            FormField::Select { options, .. } => (options.len() as u16).clamp(1, 4),
            FormField::Toggle { .. } => 1,
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                masked,
            } => {
                let mut text = if *masked {
                    "*".repeat(value.chars().count())
                } else {
                    value.clone()
                };
                if focused {
                    text.insert(byte_index(&text, *cursor_pos), '|');
                }

                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(text)
                };

                let para = Paragraph::new(content).style(Style::default().fg(if focused {
                    Color::White
                } else {
                    Color::Gray
                }));
                frame.render_widget(para, area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );

                if textarea.lines().iter().all(|l| l.is_empty()) && !focused {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }

                frame.render_widget(&**textarea, area);
            }
            FormField::Select {
                options,
                selected,
                list_state,
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .enumerate()
                    .map(|(i, (_, label))| {
                        let style = if Some(i) == *selected {
                            Style::default().add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        ListItem::new(Span::styled(label.as_str(), style))
                    })
                    .collect();

                let highlight = if focused {
                    Style::default()
                        .add_modifier(Modifier::REVERSED)
                        .fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let list = List::new(items)
                    .highlight_style(highlight)
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list, area, list_state);
            }
            FormField::Toggle {
                value,
                locked,
                true_label,
                false_label,
            } => {
                let yes_style = if *locked && !*value {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else if *value {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let no_style = if *value {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                };

                let mut spans = vec![
                    Span::styled(format!("[{true_label}]"), yes_style),
                    Span::raw(" / "),
                    Span::styled(format!("[{false_label}]"), no_style),
                ];
                if *locked && !*value {
                    spans.push(Span::styled(
                        "  (limit reached)",
                        Style::default().fg(Color::Yellow),
                    ));
                } else if focused {
                    spans.push(Span::styled(
                        "  (space to toggle)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                frame.render_widget(Paragraph::new(Line::from(spans)), area);
            }
        }
    }
}

/// Input widgets for the visible fields of the mounted step
pub struct EntryForm {
    /// Field specs and their widgets, in display order
    pub fields: Vec<(FieldSpec, FormField)>,
    /// Currently focused field index
    pub focused_index: usize,
}

impl EntryForm {
    /// Build widgets from the step's draft values
    pub fn for_step(form: &StepForm, aggregate: &RegistrationAggregate) -> Self {
        let fields = form
            .fields()
            .iter()
            .filter(|spec| form.is_visible(spec))
            .map(|spec| {
                let options = match spec.input {
                    InputKind::Choice(source) => form.choices(source, aggregate),
                    _ => Vec::new(),
                };
                let field = FormField::from_spec(spec, &form.field_value(spec.name), options)
                    .with_locked(form.locked_reason(spec).is_some());
                (*spec, field)
            })
            .collect();

        Self {
            fields,
            focused_index: 0,
        }
    }

    /// Rebuild after the visible field set may have changed, keeping focus
    /// on the same field where possible
    pub fn refresh(&mut self, form: &StepForm, aggregate: &RegistrationAggregate) {
        let focused = self.focused_field_name();
        let mut rebuilt = Self::for_step(form, aggregate);
        if let Some(name) = focused {
            if let Some(index) = rebuilt.fields.iter().position(|(spec, _)| spec.name == name) {
                rebuilt.focused_index = index;
            }
        }
        *self = rebuilt;
    }

    /// Get the currently focused field name
    pub fn focused_field_name(&self) -> Option<&'static str> {
        self.fields.get(self.focused_index).map(|(spec, _)| spec.name)
    }

    pub fn focused_spec(&self) -> Option<&FieldSpec> {
        self.fields.get(self.focused_index).map(|(spec, _)| spec)
    }

    /// Whether the focused widget is locked against `key`
    pub fn refuses(&self, key: KeyEvent) -> bool {
        self.fields
            .get(self.focused_index)
            .is_some_and(|(_, field)| field.refuses(key))
    }

    pub fn focused_is_multiline(&self) -> bool {
        self.fields
            .get(self.focused_index)
            .is_some_and(|(_, field)| field.is_multiline())
    }

    /// Move to the next field, wrapping around
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused_index = (self.focused_index + 1) % self.fields.len();
        }
    }

    /// Move to the previous field, wrapping around
    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused_index = (self.focused_index + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Pass a key to the focused widget and return the field it changed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<(&'static str, String)> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && !self.focused_is_multiline() {
            return None;
        }
        let (spec, field) = self.fields.get_mut(self.focused_index)?;
        if field.handle_key(key) {
            Some((spec.name, field.value()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar::schema::ChoiceSource;
    use registrar::wizard::StepKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn text_field(value: &str) -> FormField {
        FormField::from_spec(&FieldSpec::text("name", "Name", "Full name"), value, Vec::new())
    }

    #[test]
    fn test_text_input_handles_chars() {
        let mut field = text_field("");
        assert!(field.handle_key(key(KeyCode::Char('h'))));
        assert!(field.handle_key(key(KeyCode::Char('i'))));
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn test_text_input_edits_multibyte_text() {
        let mut field = text_field("Joã");
        field.handle_key(key(KeyCode::Char('o')));
        assert_eq!(field.value(), "João");

        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Joo");
    }

    #[test]
    fn test_optional_select_offers_none() {
        const SPEC: FieldSpec = FieldSpec::text("team", "Team", "")
            .with_input(InputKind::Choice(ChoiceSource::Teams));
        let options = vec![("Platform".to_string(), "Platform".to_string())];
        let mut field = FormField::from_spec(&SPEC, "", options);

        // Empty value matches the "(none)" entry
        assert_eq!(field.value(), "");
        field.handle_key(key(KeyCode::Down));
        assert_eq!(field.value(), "Platform");
        field.handle_key(key(KeyCode::Up));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_required_select_starts_unselected() {
        const SPEC: FieldSpec = FieldSpec::text("type", "Type", "")
            .with_input(InputKind::Choice(ChoiceSource::Fixed(&[
                ("technical", "Technical"),
                ("behavioral", "Behavioral"),
            ])))
            .required();
        let options = vec![
            ("technical".to_string(), "Technical".to_string()),
            ("behavioral".to_string(), "Behavioral".to_string()),
        ];
        let mut field = FormField::from_spec(&SPEC, "", options);
        assert_eq!(field.value(), "");
        field.handle_key(key(KeyCode::Down));
        assert_eq!(field.value(), "technical");
    }

    #[test]
    fn test_choice_without_options_is_free_text() {
        const SPEC: FieldSpec = FieldSpec::text("role", "Role", "")
            .with_input(InputKind::Choice(ChoiceSource::Roles));
        let field = FormField::from_spec(&SPEC, "Engineer", Vec::new());
        assert!(matches!(field, FormField::TextInput { .. }));
        assert_eq!(field.value(), "Engineer");
    }

    #[test]
    fn test_toggle_keys() {
        let spec = FieldSpec::text("hasLogin", "Has login", "").with_input(InputKind::Toggle);
        let mut field = FormField::from_spec(&spec, "false", Vec::new());
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), "true");
        field.handle_key(key(KeyCode::Left));
        assert_eq!(field.value(), "false");
    }

    #[test]
    fn test_locked_toggle_only_switches_off() {
        let spec = FieldSpec::text("hasLogin", "Has login", "").with_input(InputKind::Toggle);
        let mut field = FormField::from_spec(&spec, "false", Vec::new()).with_locked(true);
        assert!(field.refuses(key(KeyCode::Char(' '))));
        assert!(!field.handle_key(key(KeyCode::Char(' '))));
        assert!(!field.handle_key(key(KeyCode::Right)));
        assert_eq!(field.value(), "false");
        assert!(field.handle_key(key(KeyCode::Left)));

        let mut on = FormField::from_spec(&spec, "true", Vec::new()).with_locked(true);
        assert!(!on.refuses(key(KeyCode::Char(' '))));
        assert!(on.handle_key(key(KeyCode::Char(' '))));
        assert_eq!(on.value(), "false");
    }

    #[test]
    fn test_entry_form_hides_credentials_until_login() {
        let aggregate = RegistrationAggregate::default();
        let mut step = StepForm::mount(StepKind::Collaborators, &aggregate);

        let mut inputs = EntryForm::for_step(&step, &aggregate);
        assert!(inputs.fields.iter().all(|(spec, _)| spec.name != "email"));

        step.set_field("hasLogin", "true");
        inputs.focused_index = 3;
        let focused = inputs.focused_field_name();
        inputs.refresh(&step, &aggregate);
        assert!(inputs.fields.iter().any(|(spec, _)| spec.name == "email"));
        assert_eq!(inputs.focused_field_name(), focused);
    }

    #[test]
    fn test_entry_form_focus_wraps() {
        let aggregate = RegistrationAggregate::default();
        let step = StepForm::mount(StepKind::Company, &aggregate);
        let mut inputs = EntryForm::for_step(&step, &aggregate);

        inputs.prev_field();
        assert_eq!(inputs.focused_field_name(), Some("password"));
        inputs.next_field();
        assert_eq!(inputs.focused_field_name(), Some("name"));
    }

    #[test]
    fn test_entry_form_reports_changed_field() {
        let aggregate = RegistrationAggregate::default();
        let step = StepForm::mount(StepKind::Teams, &aggregate);
        let mut inputs = EntryForm::for_step(&step, &aggregate);

        assert_eq!(
            inputs.handle_key(key(KeyCode::Char('Q'))),
            Some(("name", "Q".to_string()))
        );
        assert_eq!(
            inputs.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }
}
