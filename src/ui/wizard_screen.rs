//! Wizard screen: step indicator, current step form and entry list

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use registrar::form::{AddEntryError, StepForm};
use registrar::schema::{InputKind, ValidationErrors};
use registrar::wizard::{FinishError, FinishHandler, View, WizardController};

use super::completion::render_completion;
use super::form_field::EntryForm;
use super::indicator::render_indicator;

/// Result of a key press on the wizard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenResult {
    /// Keep running
    Continue,
    /// User confirmed the completion view
    Finish,
    /// User aborted the wizard
    Quit,
}

/// Transient status-line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Mounted step: the domain form and its input widgets
struct MountedStep {
    form: StepForm,
    inputs: EntryForm,
}

/// Hosts a [`WizardController`] in the terminal
pub struct WizardScreen {
    controller: WizardController,
    step: Option<MountedStep>,
    /// Errors from the last rejected add or continue
    errors: Option<ValidationErrors>,
    pub notice: Option<Notice>,
    entry_state: ListState,
    show_optional_badge: bool,
}

impl WizardScreen {
    pub fn new(controller: WizardController, show_optional_badge: bool) -> Self {
        let mut screen = Self {
            controller,
            step: None,
            errors: None,
            notice: None,
            entry_state: ListState::default(),
            show_optional_badge,
        };
        screen.mount();
        screen
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    /// The mounted step form, `None` on the completion view
    pub fn form(&self) -> Option<&StepForm> {
        self.step.as_ref().map(|s| &s.form)
    }

    #[cfg(test)]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    #[cfg(test)]
    pub fn selected_entry(&self) -> Option<usize> {
        self.entry_state.selected()
    }

    /// Re-create the form for the current step from the aggregate
    fn mount(&mut self) {
        self.errors = None;
        self.step = match self.controller.current_view() {
            View::Step(descriptor) => {
                let form = StepForm::mount(descriptor.kind, self.controller.aggregate());
                let inputs = EntryForm::for_step(&form, self.controller.aggregate());
                Some(MountedStep { form, inputs })
            }
            View::Completion(_) => None,
        };
        let count = self.form().map_or(0, StepForm::entry_count);
        self.entry_state.select((count > 0).then_some(0));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return ScreenResult::Quit;
        }
        self.notice = None;

        if self.controller.is_complete() {
            match key.code {
                KeyCode::Enter => return ScreenResult::Finish,
                KeyCode::Esc => self.back(),
                _ => {}
            }
            return ScreenResult::Continue;
        }

        let multiline = self
            .step
            .as_ref()
            .is_some_and(|s| s.inputs.focused_is_multiline());

        match (key.code, ctrl) {
            (KeyCode::Char('n'), true) => self.continue_step(),
            (KeyCode::Char('s'), true) => self.skip_step(),
            (KeyCode::Char('x'), true) => self.remove_selected(),
            (KeyCode::Esc, _) => self.back(),
            (KeyCode::Tab, _) => {
                if let Some(step) = self.step.as_mut() {
                    step.inputs.next_field();
                }
            }
            (KeyCode::BackTab, _) => {
                if let Some(step) = self.step.as_mut() {
                    step.inputs.prev_field();
                }
            }
            (KeyCode::PageUp, _) => self.move_selection(false),
            (KeyCode::PageDown, _) => self.move_selection(true),
            (KeyCode::Enter, _) if !multiline => {
                if self.form().is_some_and(StepForm::is_list) {
                    self.add_entry();
                } else {
                    self.continue_step();
                }
            }
            _ => self.edit(key),
        }
        ScreenResult::Continue
    }

    /// Hand the aggregate to `handler` from the completion view
    pub fn finish<H: FinishHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), FinishError> {
        self.controller.finish(handler)
    }

    fn edit(&mut self, key: KeyEvent) {
        let aggregate = self.controller.aggregate();
        let Some(step) = self.step.as_mut() else {
            return;
        };
        if step.inputs.refuses(key) {
            self.notice = step
                .inputs
                .focused_spec()
                .and_then(|spec| step.form.locked_reason(spec))
                .map(|quota| Notice::error(quota.message));
            return;
        }
        let Some((name, value)) = step.inputs.handle_key(key) else {
            return;
        };
        step.form.set_field(name, &value);

        // Toggles can show or hide dependent fields
        let is_toggle = step
            .form
            .fields()
            .iter()
            .any(|spec| spec.name == name && spec.input == InputKind::Toggle);
        if is_toggle {
            step.inputs.refresh(&step.form, aggregate);
        }
    }

    fn add_entry(&mut self) {
        let aggregate = self.controller.aggregate();
        let Some(step) = self.step.as_mut() else {
            return;
        };
        match step.form.add_draft() {
            Ok(true) => {
                self.errors = None;
                step.inputs = EntryForm::for_step(&step.form, aggregate);
                self.entry_state
                    .select(step.form.entry_count().checked_sub(1));
                self.notice = Some(Notice::info("Entry added"));
            }
            Ok(false) => {}
            Err(AddEntryError::Invalid(errors)) => {
                self.errors = Some(errors);
            }
            Err(AddEntryError::Quota(quota)) => {
                self.notice = Some(Notice::error(quota.message));
            }
        }
    }

    fn continue_step(&mut self) {
        let Some(step) = self.step.as_ref() else {
            return;
        };
        match step.form.commit() {
            Ok(patch) => {
                if self.controller.advance(Some(patch)).moved() {
                    self.mount();
                }
            }
            Err(errors) => {
                self.errors = Some(errors);
                self.notice = Some(Notice::error("Fix the highlighted fields to continue"));
            }
        }
    }

    fn skip_step(&mut self) {
        if self.controller.skip().moved() {
            self.mount();
        } else {
            self.notice = Some(Notice::error("This step is required"));
        }
    }

    fn back(&mut self) {
        if self.controller.retreat().moved() {
            self.mount();
        }
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.form().map_or(0, StepForm::entry_count);
        if count == 0 {
            return;
        }
        let next = match (self.entry_state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(count - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.entry_state.select(Some(next));
    }

    fn remove_selected(&mut self) {
        let aggregate = self.controller.aggregate();
        let (Some(step), Some(position)) = (self.step.as_mut(), self.entry_state.selected()) else {
            return;
        };
        if step.form.remove_entry(position) {
            let count = step.form.entry_count();
            self.entry_state
                .select((count > 0).then(|| position.min(count - 1)));
            // Choice lists may have drawn from the removed entry
            step.inputs.refresh(&step.form, aggregate);
            self.notice = Some(Notice::info("Entry removed"));
        }
    }

    /// Render the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let complete = self.controller.is_complete();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                              // Header
                Constraint::Length(if complete { 0 } else { 3 }), // Indicator
                Constraint::Min(5),                                 // Body
                Constraint::Length(1),                              // Status
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        if complete {
            render_completion(frame, chunks[2], self.controller.aggregate());
        } else {
            render_indicator(
                frame,
                chunks[1],
                &self.controller.indicator(),
                self.show_optional_badge,
            );
            self.render_step(frame, chunks[2]);
        }

        self.render_status(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let total = self.controller.steps().len();
        let position = match self.controller.current_step() {
            Some(step) => format!("Step {} of {total}: {}", step.id, step.title),
            None => "Done".to_string(),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                " Registrar ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(position, Style::default().fg(Color::White)),
        ]));
        frame.render_widget(header, area);
    }

    fn render_step(&mut self, frame: &mut Frame, area: Rect) {
        let Self {
            controller,
            step,
            errors,
            entry_state,
            ..
        } = self;
        let Some(step) = step.as_mut() else {
            return;
        };
        let title = controller
            .current_step()
            .map(|s| format!(" {} ", s.title))
            .unwrap_or_default();

        let (form_area, list_area) = if step.form.is_list() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            (cols[0], Some(cols[1]))
        } else {
            (area, None)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        // Label, widget and optional error line per field
        let mut constraints = Vec::new();
        for (spec, field) in &step.inputs.fields {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(field.render_height()));
            let has_error = errors.as_ref().and_then(|e| e.for_field(spec.name)).is_some();
            constraints.push(Constraint::Length(u16::from(has_error)));
        }
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        let focused_index = step.inputs.focused_index;
        for (i, (spec, field)) in step.inputs.fields.iter_mut().enumerate() {
            let focused = i == focused_index;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut label = vec![Span::styled(spec.label, label_style)];
            if spec.required {
                label.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            if let Some(hint) = step.form.field_hint(spec) {
                label.push(Span::styled(
                    format!(" {hint}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(label)), rows[i * 3]);
            field.render(frame, rows[i * 3 + 1], focused);

            if let Some(error) = errors.as_ref().and_then(|e| e.for_field(spec.name)) {
                let line = Paragraph::new(Span::styled(
                    error.message.as_str(),
                    Style::default().fg(Color::Red),
                ));
                frame.render_widget(line, rows[i * 3 + 2]);
            }
        }

        if let Some(list_area) = list_area {
            let labels = step.form.entry_labels();
            let items: Vec<ListItem> = if labels.is_empty() {
                vec![ListItem::new(Span::styled(
                    "Nothing added yet",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                labels.into_iter().map(ListItem::new).collect()
            };
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!(" Added ({}) ", step.form.entry_count()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Gray)),
                )
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, entry_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.notice {
            Some(notice) => {
                let color = if notice.is_error { Color::Red } else { Color::Green };
                Line::from(Span::styled(notice.text.as_str(), Style::default().fg(color)))
            }
            None => Line::from(self.help_spans()),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn help_spans(&self) -> Vec<Span<'static>> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
        let mut spans = Vec::new();
        if self.controller.is_complete() {
            spans.extend([key("Enter"), Span::raw(" finish  ")]);
        } else {
            spans.extend([key("Tab"), Span::raw(" next field  ")]);
            if self.form().is_some_and(StepForm::is_list) {
                spans.extend([
                    key("Enter"),
                    Span::raw(" add  "),
                    key("PgUp/PgDn"),
                    Span::raw(" select  "),
                    key("^X"),
                    Span::raw(" remove  "),
                    key("^N"),
                    Span::raw(" continue  "),
                ]);
            } else {
                spans.extend([key("Enter/^N"), Span::raw(" continue  ")]);
            }
            if self.controller.can_skip() {
                spans.extend([key("^S"), Span::raw(" skip  ")]);
            }
        }
        if self.controller.can_retreat() {
            spans.extend([key("Esc"), Span::raw(" back  ")]);
        }
        spans.extend([key("^C"), Span::raw(" quit")]);
        spans
    }
}
