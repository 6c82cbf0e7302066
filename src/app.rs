use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, error, info};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::event_source::{
    Event, EventSource, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crate::notification::{NotificationLevel, NotificationManager};
use crate::pdf::{DocumentController, DocumentLoader, ScrollDirection, ZoomMode};
use crate::settings::Settings;
use crate::widget::{FilePicker, PageViewer, PickerOutcome, Toolbar, ToolbarAction};

const KEY_HELP: &str = "o open  h/l page  +/- zoom  0 fit  w width  j/k/H/L scroll  q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    pub controller: DocumentController,
    pub viewer: PageViewer,
    pub toolbar: Toolbar,
    pub picker: Option<FilePicker>,
    pub notifications: NotificationManager,
    settings: Settings,
    layout_changed: bool,
}

impl App {
    pub fn new(settings: Settings, loader: Box<dyn DocumentLoader>) -> Self {
        let notifications = NotificationManager::with_default_duration(Duration::from_secs(
            settings.notification_secs,
        ));
        Self {
            controller: DocumentController::new(loader),
            viewer: PageViewer::new(&settings),
            toolbar: Toolbar::new(),
            picker: None,
            notifications,
            settings,
            layout_changed: false,
        }
    }

    /// Show the file picker
    pub fn open(&mut self) {
        let root = self.settings.picker_root();
        debug!("Opening file picker at {root:?}");
        self.picker = Some(FilePicker::new(root));
    }

    pub fn has_picker(&self) -> bool {
        self.picker.is_some()
    }

    /// Load `path` and present it. A failure keeps the current document.
    pub fn load_document(&mut self, path: &Path) {
        match self.controller.load(path) {
            Ok(document) => {
                let message = format!(
                    "Opened {} ({} pages)",
                    document.display_name(),
                    document.source().page_count()
                );
                self.viewer.set_document(document);
                self.viewer.set_zoom_mode(ZoomMode::FitInView);
                self.viewer.show_maximized();
                self.layout_changed = true;
                self.notifications.info(message);
            }
            Err(e) => {
                error!("Failed to open {path:?}: {e}");
                self.notifications
                    .error(format!("Cannot open {}: {e}", path.display()));
            }
        }
    }

    pub fn next_page(&mut self) {
        if self.controller.next_page() {
            self.viewer.request_redraw();
        }
    }

    pub fn previous_page(&mut self) {
        if self.controller.previous_page() {
            self.viewer.request_redraw();
        }
    }

    fn scroll(&mut self, direction: ScrollDirection) {
        if self.controller.scroll(direction) {
            self.viewer.request_redraw();
        }
    }

    fn run_toolbar_action(&mut self, action: ToolbarAction) {
        debug!("Toolbar: {}", action.label());
        match action {
            ToolbarAction::Open => self.open(),
            ToolbarAction::PreviousPage => self.previous_page(),
            ToolbarAction::NextPage => self.next_page(),
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                None
            }
            Event::Resize(cols, rows) => {
                debug!("Terminal resized to {cols}x{rows}");
                self.viewer.request_redraw();
                self.layout_changed = true;
                None
            }
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerOutcome::Pending => {}
                PickerOutcome::Cancelled => {
                    debug!("File selection cancelled");
                    self.picker = None;
                }
                PickerOutcome::Chosen(path) => {
                    self.picker = None;
                    self.load_document(&path);
                }
            }
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c')).then_some(AppAction::Quit);
        }

        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('o') => self.open(),
            KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                self.previous_page()
            }
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                self.next_page()
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if self.controller.zoom_in() {
                    self.viewer.request_redraw();
                }
            }
            KeyCode::Char('-') => {
                if self.controller.zoom_out() {
                    self.viewer.request_redraw();
                }
            }
            KeyCode::Char('0') => {
                self.controller.reset_zoom();
                self.viewer.set_zoom_mode(ZoomMode::FitInView);
                self.viewer.request_redraw();
            }
            KeyCode::Char('w') => self.viewer.set_zoom_mode(ZoomMode::FitToWidth),
            KeyCode::Char('j') | KeyCode::Down => self.scroll(ScrollDirection::Down),
            KeyCode::Char('k') | KeyCode::Up => self.scroll(ScrollDirection::Up),
            KeyCode::Char('H') => self.scroll(ScrollDirection::Left),
            KeyCode::Char('L') => self.scroll(ScrollDirection::Right),
            _ => {}
        }
        None
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if self.picker.is_some() {
            // A release still ends a gesture begun before the picker opened
            if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
                self.viewer.handle_mouse(mouse);
            }
            return;
        }
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if let Some(action) = self.toolbar.hit_test(mouse.column, mouse.row) {
                self.run_toolbar_action(action);
                return;
            }
        }
        self.viewer.handle_mouse(mouse);
    }

    /// Whether widget placement changed since the last call. Hit testing
    /// uses the last drawn layout, so the caller redraws before routing
    /// further input.
    pub fn take_layout_change(&mut self) -> bool {
        std::mem::take(&mut self.layout_changed)
    }

    /// "page N / M", or empty without a document
    pub fn page_indicator(&self) -> String {
        match (self.controller.current_page(), self.controller.page_count()) {
            (Some(page), Some(count)) => format!("page {} / {count}", page + 1),
            _ => String::new(),
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Toolbar::HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        let indicator = self.page_indicator();
        self.toolbar.render(chunks[0], f.buffer_mut(), &indicator);
        self.viewer
            .render(chunks[1], f.buffer_mut(), self.controller.document_mut());
        f.render_widget(self.status_line(), chunks[2]);

        if let Some(picker) = self.picker.as_mut() {
            let area: Rect = f.area();
            picker.render(area, f.buffer_mut());
        }
    }

    fn status_line(&self) -> Paragraph<'static> {
        let line = match self.notifications.current() {
            Some(notification) => {
                let color = match notification.level {
                    NotificationLevel::Info => Color::Green,
                    NotificationLevel::Error => Color::Red,
                };
                Line::from(Span::styled(
                    notification.message.clone(),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(vec![
                Span::styled(
                    format!(
                        "[{}] {} ",
                        self.viewer.editor().state().as_str(),
                        self.viewer.zoom_mode().as_str()
                    ),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
            ]),
        };
        Paragraph::new(line)
    }
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();
    // Hit testing needs a drawn layout before the first event
    terminal.draw(|f| app.draw(f))?;
    loop {
        let mut events_processed = 0;
        let mut should_quit = false;
        while event_source.poll(Duration::from_millis(0))? && events_processed < 50 {
            let event = event_source.read()?;
            events_processed += 1;
            if app.handle_event(&event) == Some(AppAction::Quit) {
                should_quit = true;
                break;
            }
            if app.take_layout_change() {
                terminal.draw(|f| app.draw(f))?;
            }
        }

        let mut needs_redraw = events_processed > 0 || app.viewer.needs_redraw();

        if last_tick.elapsed() >= tick_rate {
            if app.notifications.prune_expired() {
                needs_redraw = true;
            }
            last_tick = Instant::now();
        }

        if needs_redraw {
            terminal.draw(|f| app.draw(f))?;
        }

        if should_quit {
            info!("Quit requested");
            return Ok(());
        }

        // If no events were processed, wait a bit to avoid busy-waiting
        if events_processed == 0 {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            let _ = event_source.poll(timeout);
        }
    }
}
