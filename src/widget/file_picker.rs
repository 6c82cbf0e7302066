//! Modal picker for PDF files
//!
//! Lists `..`, then sub-directories, then `*.pdf` files of the current
//! directory. Hidden entries are skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Directory,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Result of feeding a key to the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Still open
    Pending,
    Chosen(PathBuf),
    Cancelled,
}

pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    state: ListState,
    error: Option<String>,
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn read_entries(dir: &Path) -> io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        // Follows symlinks so linked folders can be browsed
        if path.is_dir() {
            dirs.push(PickerEntry {
                name,
                path,
                kind: EntryKind::Directory,
            });
        } else if is_pdf(&path) {
            files.push(PickerEntry {
                name,
                path,
                kind: EntryKind::Pdf,
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(PickerEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            kind: EntryKind::Parent,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

impl FilePicker {
    /// Open the picker in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut picker = Self {
            dir: PathBuf::new(),
            entries: Vec::new(),
            state: ListState::default(),
            error: None,
        };
        picker.change_dir(dir.into());
        picker
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn change_dir(&mut self, dir: PathBuf) {
        match read_entries(&dir) {
            Ok(entries) => {
                debug!("File picker at {dir:?}: {} entries", entries.len());
                // Land on the first real entry rather than ".."
                let first = entries
                    .iter()
                    .position(|e| e.kind != EntryKind::Parent)
                    .or_else(|| (!entries.is_empty()).then_some(0));
                self.entries = entries;
                self.state = ListState::default();
                self.state.select(first);
                self.dir = dir;
                self.error = None;
            }
            Err(e) => {
                warn!("Cannot list {dir:?}: {e}");
                self.error = Some(format!("{}: {e}", dir.display()));
                if self.entries.is_empty() && self.dir.as_os_str().is_empty() {
                    self.dir = dir;
                }
            }
        }
    }

    fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(parent);
        }
    }

    fn activate(&mut self) -> PickerOutcome {
        let Some(entry) = self.selected().cloned() else {
            return PickerOutcome::Pending;
        };
        match entry.kind {
            EntryKind::Parent | EntryKind::Directory => {
                self.change_dir(entry.path);
                PickerOutcome::Pending
            }
            EntryKind::Pdf => PickerOutcome::Chosen(entry.path),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => return self.activate(),
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => self.go_up(),
            KeyCode::Esc | KeyCode::Char('q') => return PickerOutcome::Cancelled,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return PickerOutcome::Cancelled;
            }
            _ => {}
        }
        PickerOutcome::Pending
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(60, 70, area);
        Clear.render(popup_area, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let (name, style) = match entry.kind {
                    EntryKind::Parent => (entry.name.clone(), Style::default().fg(Color::Gray)),
                    EntryKind::Directory => {
                        (format!("{}/", entry.name), Style::default().fg(Color::Cyan))
                    }
                    EntryKind::Pdf => (entry.name.clone(), Style::default()),
                };
                ListItem::new(Line::from(Span::styled(name, style)))
            })
            .collect();

        let title = match &self.error {
            Some(err) => format!(" {err} "),
            None => format!(" Open PDF: {} ", self.dir.display()),
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");

        StatefulWidget::render(list, popup_area, buf, &mut self.state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
