//! Terminal view.
//!
//! Rendering reads [`ClientState`] and never changes it. Key handling turns a
//! key press into an [`Input`]; only focus and selection live here, since
//! they mean nothing outside the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use tasktracker_domain::{Task, TaskStatus};

use crate::intent::Intent;
use crate::state::{Action, ClientState, Severity};

// =============================================================================
// View State
// =============================================================================

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Title,
    Description,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::List => Self::Title,
            Self::Title => Self::Description,
            Self::Description => Self::List,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::List => Self::Description,
            Self::Title => Self::List,
            Self::Description => Self::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub focus: Focus,
    /// Index into the listed tasks.
    pub selected: usize,
}

impl ViewState {
    /// Keeps the selection inside a list of `len` tasks.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Local(Action),
    Remote(Intent),
    Quit,
}

// =============================================================================
// Key Handling
// =============================================================================

/// Maps a key press to an input, updating focus and selection on the way.
pub fn handle_key(key: KeyEvent, state: &ClientState, view: &mut ViewState) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    match view.focus {
        Focus::List => handle_list_key(key, state, view),
        Focus::Title | Focus::Description => handle_form_key(key, state, view),
    }
}

fn handle_list_key(key: KeyEvent, state: &ClientState, view: &mut ViewState) -> Option<Input> {
    let selected = state.tasks.get(view.selected);

    match key.code {
        KeyCode::Char('q') => Some(Input::Quit),
        KeyCode::Esc | KeyCode::Char('c') => Some(Input::Local(Action::DismissNotice)),
        KeyCode::Down | KeyCode::Char('j') => {
            view.selected = view.selected.saturating_add(1);
            view.clamp(state.tasks.len());
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.selected = view.selected.saturating_sub(1);
            None
        }
        KeyCode::Char(' ' | 'x') => {
            selected.map(|task| Input::Remote(Intent::ToggleCompletion(task.id)))
        }
        KeyCode::Char('e') | KeyCode::Enter => selected.map(|task| {
            view.focus = Focus::Title;
            Input::Local(Action::BeginEdit(task.clone()))
        }),
        KeyCode::Char('d') | KeyCode::Delete => {
            selected.map(|task| Input::Remote(Intent::Delete(task.id)))
        }
        KeyCode::Char('f') => {
            view.selected = 0;
            Some(Input::Remote(Intent::ChangeFilter(state.filter.next())))
        }
        KeyCode::Char('r') => Some(Input::Remote(Intent::Load)),
        KeyCode::Char('a' | 'i') | KeyCode::Tab => {
            view.focus = Focus::Title;
            None
        }
        KeyCode::BackTab => {
            view.focus = Focus::Description;
            None
        }
        _ => None,
    }
}

fn handle_form_key(key: KeyEvent, state: &ClientState, view: &mut ViewState) -> Option<Input> {
    let draft = &state.draft;
    let focus = view.focus;
    let edit = |text: String| match focus {
        Focus::Description => Action::SetDraftDescription(text),
        Focus::Title | Focus::List => Action::SetDraftTitle(text),
    };
    let field = match focus {
        Focus::Description => &draft.description,
        Focus::Title | Focus::List => &draft.title,
    };

    match key.code {
        KeyCode::Enter => Some(Input::Remote(Intent::Submit)),
        KeyCode::Esc => {
            view.focus = Focus::List;
            state
                .is_editing()
                .then_some(Input::Local(Action::CancelEdit))
        }
        KeyCode::Tab => {
            view.focus = focus.next();
            None
        }
        KeyCode::BackTab => {
            view.focus = focus.previous();
            None
        }
        KeyCode::Down => Some(Input::Local(Action::SetDraftStatus(draft.status.next()))),
        KeyCode::Up => Some(Input::Local(Action::SetDraftStatus(
            draft.status.next().next(),
        ))),
        KeyCode::Backspace => {
            let mut text = field.clone();
            text.pop();
            Some(Input::Local(edit(text)))
        }
        KeyCode::Char(character) => {
            let mut text = field.clone();
            text.push(character);
            Some(Input::Local(edit(text)))
        }
        _ => None,
    }
}

// =============================================================================
// Rendering
// =============================================================================

const FOCUSED: Style = Style::new().fg(Color::Cyan);

/// Draws the whole screen.
pub fn render(frame: &mut Frame<'_>, state: &ClientState, view: &ViewState) {
    let notice_height = if state.notice.is_some() { 3 } else { 0 };
    let [header, title, description, mode, heading, list, notice, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(notice_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Task Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .centered(),
        header,
    );

    render_field(frame, title, "Task Title", &state.draft.title, view.focus == Focus::Title);
    render_field(
        frame,
        description,
        "Description",
        &state.draft.description,
        view.focus == Focus::Description,
    );

    let submit = if state.is_editing() {
        "[Enter] Update Task  [Esc] Cancel"
    } else {
        "[Enter] Add Task"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                state.draft.status.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Up/Down)   ", Style::default().fg(Color::Gray)),
            Span::raw(submit),
        ])),
        mode,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                state.heading(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   filter: {} (f)", state.filter.as_str()),
                Style::default().fg(Color::Gray),
            ),
        ])),
        heading,
    );

    render_tasks(frame, list, state, view);

    if let Some(current) = &state.notice {
        let color = match current.severity {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(current.text.as_str())
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title("[Esc] dismiss")),
            notice,
        );
    }

    frame.render_widget(
        Paragraph::new(help_line(view.focus)).style(Style::default().fg(Color::Gray)),
        help,
    );
}

fn render_field(frame: &mut Frame<'_>, area: Rect, label: &str, value: &str, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(if focused { FOCUSED } else { Style::default() });
    frame.render_widget(Paragraph::new(value.to_string()).block(block), area);
}

fn render_tasks(frame: &mut Frame<'_>, area: Rect, state: &ClientState, view: &ViewState) {
    let items: Vec<ListItem<'_>> = state.tasks.iter().map(task_item).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if view.focus == Focus::List {
            FOCUSED
        } else {
            Style::default()
        });

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    if !state.tasks.is_empty() {
        list_state.select(Some(view.selected.min(state.tasks.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn task_item(task: &Task) -> ListItem<'_> {
    let checkbox = if task.status.is_completed() { "[x] " } else { "[ ] " };
    let status_color = match task.status {
        TaskStatus::Pending => Color::Gray,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Completed => Color::Blue,
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(checkbox),
        Span::raw(task.title.as_str()),
        Span::raw("  "),
        Span::styled(task.status.to_string(), Style::default().fg(status_color)),
    ])];
    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", task.description),
            Style::default().fg(Color::Gray),
        )));
    }

    let item = ListItem::new(lines);
    if task.status.is_completed() {
        item.style(Style::default().add_modifier(Modifier::DIM))
    } else {
        item
    }
}

const fn help_line(focus: Focus) -> &'static str {
    match focus {
        Focus::List => {
            "j/k move  space toggle  e edit  d delete  f filter  r reload  a add  q quit"
        }
        Focus::Title | Focus::Description => {
            "type to edit  Tab next field  Up/Down status  Enter submit  Esc back"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
