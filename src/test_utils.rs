pub mod test_helpers {
    use std::cell::Cell;
    use std::path::Path;
    use std::rc::Rc;

    use crate::event_source::{Event, KeyCode, KeyModifiers, SimulatedEventSource};
    use crate::pdf::{DocumentError, DocumentLoader, PageImage, PageSize, PageSource};
    use image::Rgb;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Colour every page of a [`FakeSource`] is filled with
    pub const PAGE_COLOR: [u8; 3] = [250, 250, 240];

    /// In-memory document with uniform blank pages
    pub struct FakeSource {
        pages: usize,
        size: PageSize,
        fail: bool,
        renders: Rc<Cell<usize>>,
    }

    impl FakeSource {
        pub fn new(pages: usize, width: f32, height: f32) -> Self {
            Self {
                pages,
                size: PageSize::new(width, height),
                fail: false,
                renders: Rc::new(Cell::new(0)),
            }
        }

        /// Every render returns an error
        pub fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        /// Shared counter of successful renders
        pub fn render_counter(&self) -> Rc<Cell<usize>> {
            self.renders.clone()
        }
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn page_size(&self, page: usize) -> Result<PageSize, DocumentError> {
            if page >= self.pages {
                return Err(DocumentError::PageOutOfRange {
                    page,
                    count: self.pages,
                });
            }
            Ok(self.size)
        }

        fn render(&self, page: usize, scale: f32) -> Result<PageImage, DocumentError> {
            if self.fail {
                return Err(DocumentError::generic("cannot render"));
            }
            let size = self.page_size(page)?;
            let width = (size.width * scale).round().max(1.0) as u32;
            let height = (size.height * scale).round().max(1.0) as u32;
            self.renders.set(self.renders.get() + 1);
            Ok(PageImage::from_pixel(width, height, Rgb(PAGE_COLOR)))
        }
    }

    /// Loader that hands out [`FakeSource`]s for any path
    pub struct FakeLoader {
        pages: usize,
    }

    impl FakeLoader {
        pub fn new(pages: usize) -> Self {
            Self { pages }
        }
    }

    impl DocumentLoader for FakeLoader {
        fn load(&self, _path: &Path) -> Result<Box<dyn PageSource>, DocumentError> {
            Ok(Box::new(FakeSource::new(self.pages, 100.0, 100.0)))
        }
    }

    /// Loader that rejects every path
    pub struct FailingLoader;

    impl DocumentLoader for FailingLoader {
        fn load(&self, _path: &Path) -> Result<Box<dyn PageSource>, DocumentError> {
            Err(DocumentError::generic("not a PDF"))
        }
    }

    /// Builder for creating test scenarios with simulated user input
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        /// Add a special key press
        pub fn press_key(mut self, code: KeyCode) -> Self {
            self.events
                .push(SimulatedEventSource::key_event(code, KeyModifiers::empty()));
            self
        }

        /// Press Enter
        pub fn press_enter(self) -> Self {
            self.press_key(KeyCode::Enter)
        }

        /// Left button press at a terminal cell
        pub fn mouse_down(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::left_down(column, row));
            self
        }

        /// Left button drag to a terminal cell
        pub fn mouse_drag(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::left_drag(column, row));
            self
        }

        /// Left button release at a terminal cell
        pub fn mouse_up(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::left_up(column, row));
            self
        }

        /// Press and release at the same cell
        pub fn click(self, column: u16, row: u16) -> Self {
            self.mouse_down(column, row).mouse_up(column, row)
        }

        /// Next page (press 'l')
        pub fn next_page(self) -> Self {
            self.press_char('l')
        }

        /// Previous page (press 'h')
        pub fn prev_page(self) -> Self {
            self.press_char('h')
        }

        /// Quit the application (press 'q')
        pub fn quit(self) -> Self {
            self.press_char('q')
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Create a test terminal for snapshot testing
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}
