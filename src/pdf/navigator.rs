//! Page cursor, zoom factor and in-page scroll location

/// Scroll/pan direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Returns true if the direction is vertical (Up or Down)
    pub fn vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Scroll location inside a page, in view pixels from the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub x: u32,
    pub y: u32,
}

impl Location {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };
}

/// Current page, zoom and scroll location of a document
#[derive(Debug, Clone)]
pub struct PageNavigator {
    current_page: usize,
    page_count: usize,
    zoom: f32,
    location: Location,
}

impl PageNavigator {
    /// Zoom in rate multiplier per step - 10%
    pub const ZOOM_IN_RATE: f32 = 1.1;
    /// Zoom out rate divisor per step - 5%
    pub const ZOOM_OUT_RATE: f32 = 1.05;
    /// Minimum allowed zoom factor
    pub const MIN_SCALE: f32 = 0.1;

    /// Base scroll step in view pixels for horizontal movement
    pub const BASE_PAN_STEP_X: f32 = 4.0;
    /// Base scroll step in view pixels for vertical movement
    pub const BASE_PAN_STEP_Y: f32 = 8.0;

    #[must_use]
    pub fn new(page_count: usize) -> Self {
        Self {
            current_page: 0,
            page_count,
            zoom: 1.0,
            location: Location::ORIGIN,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[must_use]
    pub fn current_zoom(&self) -> f32 {
        self.zoom
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Move to `page` at `location` with `zoom`. The page is clamped to the
    /// document.
    pub fn jump(&mut self, page: usize, location: Location, zoom: f32) {
        self.current_page = page.min(self.page_count.saturating_sub(1));
        self.location = location;
        self.zoom = Self::clamp_factor(zoom);
    }

    /// Replace the scroll location, keeping page and zoom
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Zoom in by one step
    pub fn step_in(&mut self) {
        self.zoom = Self::clamp_factor(self.zoom * Self::ZOOM_IN_RATE);
    }

    /// Zoom out by one step
    pub fn step_out(&mut self) {
        self.zoom = Self::clamp_factor(self.zoom / Self::ZOOM_OUT_RATE);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.location = Location::ORIGIN;
    }

    /// Scroll in the given direction, adjusting step size by zoom factor.
    /// The result is clamped by the viewer when it knows the page size.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let base_step = if direction.vertical() {
            Self::BASE_PAN_STEP_Y
        } else {
            Self::BASE_PAN_STEP_X
        };
        let step = (base_step / self.zoom).max(1.0) as u32;

        match direction {
            ScrollDirection::Up => self.location.y = self.location.y.saturating_sub(step),
            ScrollDirection::Down => self.location.y = self.location.y.saturating_add(step),
            ScrollDirection::Left => self.location.x = self.location.x.saturating_sub(step),
            ScrollDirection::Right => self.location.x = self.location.x.saturating_add(step),
        }
    }

    /// Clamp factor to valid range, handling NaN/Inf
    pub fn clamp_factor(factor: f32) -> f32 {
        if !factor.is_finite() {
            1.0
        } else {
            factor.max(Self::MIN_SCALE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_clamps_to_last_page() {
        let mut nav = PageNavigator::new(5);
        nav.jump(99, Location::ORIGIN, 1.0);
        assert_eq!(nav.current_page(), 4);
    }

    #[test]
    fn jump_sets_location_and_zoom() {
        let mut nav = PageNavigator::new(5);
        nav.jump(2, Location { x: 3, y: 7 }, 1.5);
        assert_eq!(nav.current_page(), 2);
        assert_eq!(nav.location(), Location { x: 3, y: 7 });
        assert!((nav.current_zoom() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_steps_and_floor() {
        let mut nav = PageNavigator::new(1);
        nav.step_in();
        assert!((nav.current_zoom() - 1.1).abs() < 1e-6);

        for _ in 0..200 {
            nav.step_out();
        }
        assert!((nav.current_zoom() - PageNavigator::MIN_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn non_finite_zoom_falls_back() {
        assert!((PageNavigator::clamp_factor(f32::NAN) - 1.0).abs() < f32::EPSILON);
        assert!((PageNavigator::clamp_factor(f32::INFINITY) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scroll_saturates_at_origin() {
        let mut nav = PageNavigator::new(1);
        nav.scroll(ScrollDirection::Up);
        nav.scroll(ScrollDirection::Left);
        assert_eq!(nav.location(), Location::ORIGIN);

        nav.scroll(ScrollDirection::Down);
        nav.scroll(ScrollDirection::Right);
        assert_eq!(nav.location(), Location { x: 4, y: 8 });
    }

    #[test]
    fn scroll_step_shrinks_with_zoom() {
        let mut nav = PageNavigator::new(1);
        nav.jump(0, Location::ORIGIN, 2.0);
        nav.scroll(ScrollDirection::Down);
        assert_eq!(nav.location().y, 4);
    }
}
