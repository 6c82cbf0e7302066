//! Rectangle editing state machine
//!
//! A press either grabs one of the two vertical edges of the current
//! rectangle or starts a new one. Edge drags only move the edge
//! horizontally. Every release returns the editor to [`EditState::Free`].

use log::trace;

use crate::geometry::{Point, Rectangle};

/// Default distance in view pixels within which a press grabs an edge
pub const DEFAULT_HIT_TOLERANCE: i32 = 3;

/// Current gesture of the editor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    /// No gesture in progress
    #[default]
    Free,
    /// A new rectangle is being stretched from its anchor
    Drawing,
    /// The vertical edge through `begin` is being moved
    DraggingBeginEdge,
    /// The vertical edge through `end` is being moved
    DraggingEndEdge,
}

impl EditState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditState::Free => "free",
            EditState::Drawing => "drawing",
            EditState::DraggingBeginEdge => "dragging begin edge",
            EditState::DraggingEndEdge => "dragging end edge",
        }
    }
}

/// Pointer input in view coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// Owns the overlay rectangle and the gesture state
#[derive(Clone, Debug)]
pub struct RectangleEditor {
    state: EditState,
    rect: Option<Rectangle>,
    hit_tolerance: i32,
}

impl Default for RectangleEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RectangleEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_hit_tolerance(DEFAULT_HIT_TOLERANCE)
    }

    #[must_use]
    pub fn with_hit_tolerance(hit_tolerance: i32) -> Self {
        Self {
            state: EditState::Free,
            rect: None,
            hit_tolerance: hit_tolerance.max(0),
        }
    }

    #[must_use]
    pub fn state(&self) -> EditState {
        self.state
    }

    /// The rectangle, or `None` before the first press
    #[must_use]
    pub fn rectangle(&self) -> Option<Rectangle> {
        self.rect
    }

    #[must_use]
    pub fn hit_tolerance(&self) -> i32 {
        self.hit_tolerance
    }

    /// Whether a press has not been released yet
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != EditState::Free
    }

    /// Feed one pointer event. Returns true when the overlay must be redrawn.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    /// Grab an edge or start a new rectangle at `p`
    pub fn pointer_down(&mut self, p: Point) -> bool {
        if let Some(grab) = self.edge_at(p) {
            trace!("edge grabbed at {p:?}: {}", grab.as_str());
            self.state = grab;
            return false;
        }

        trace!("new rectangle anchored at {p:?}");
        self.state = EditState::Drawing;
        self.rect = Some(Rectangle::at(p));
        true
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.apply(p)
    }

    /// Capture the final position and end the gesture
    pub fn pointer_up(&mut self, p: Point) -> bool {
        let changed = self.apply(p);
        self.state = EditState::Free;
        changed
    }

    /// Edge drag state for a press at `p`, if it lands on an edge
    fn edge_at(&self, p: Point) -> Option<EditState> {
        // Only a missing rectangle is ungrabbable; a corner at (0,0) is a real corner
        let rect = self.rect?;

        let (y1, y2) = rect.y_span();
        if p.y < y1 || p.y > y2 {
            return None;
        }

        if (rect.begin.x - p.x).abs() <= self.hit_tolerance {
            Some(EditState::DraggingBeginEdge)
        } else if (rect.end.x - p.x).abs() <= self.hit_tolerance {
            Some(EditState::DraggingEndEdge)
        } else {
            None
        }
    }

    fn apply(&mut self, p: Point) -> bool {
        let Some(rect) = self.rect.as_mut() else {
            return false;
        };

        match self.state {
            EditState::Free => return false,
            EditState::Drawing => rect.end = p,
            EditState::DraggingBeginEdge => rect.begin = rect.begin.with_x(p.x),
            EditState::DraggingEndEdge => rect.end = rect.end.with_x(p.x),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// Editor holding the rectangle (10,10)-(50,50)
    fn editor_with_rect() -> RectangleEditor {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(10, 10));
        editor.pointer_up(p(50, 50));
        assert_eq!(editor.rectangle(), Some(Rectangle::new(p(10, 10), p(50, 50))));
        editor
    }

    #[test]
    fn starts_free_without_rectangle() {
        let editor = RectangleEditor::new();
        assert_eq!(editor.state(), EditState::Free);
        assert_eq!(editor.rectangle(), None);
        assert_eq!(editor.hit_tolerance(), DEFAULT_HIT_TOLERANCE);
    }

    #[test]
    fn first_press_starts_drawing_at_anchor() {
        let mut editor = RectangleEditor::new();
        assert!(editor.pointer_down(p(4, 6)));
        assert_eq!(editor.state(), EditState::Drawing);
        assert_eq!(editor.rectangle(), Some(Rectangle::at(p(4, 6))));
    }

    #[test]
    fn press_then_release_without_move_captures_release_point() {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(3, 4));
        assert!(editor.pointer_up(p(20, 30)));

        let rect = editor.rectangle().unwrap();
        assert_eq!(rect.begin, p(3, 4));
        assert_eq!(rect.end, p(20, 30));
        assert_eq!(editor.state(), EditState::Free);
    }

    #[test]
    fn drawing_move_updates_full_end_point() {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(0, 0));
        assert!(editor.pointer_move(p(12, 8)));
        assert!(editor.pointer_move(p(-5, 40)));
        assert_eq!(editor.rectangle().unwrap().end, p(-5, 40));
        assert_eq!(editor.rectangle().unwrap().begin, p(0, 0));
    }

    #[test]
    fn press_on_begin_edge_drags_x_only() {
        let mut editor = editor_with_rect();

        assert!(!editor.pointer_down(p(10, 30)));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);
        assert_eq!(editor.rectangle().unwrap().begin, p(10, 10));

        assert!(editor.pointer_move(p(20, 99)));
        let rect = editor.rectangle().unwrap();
        assert_eq!(rect.begin, p(20, 10));
        assert_eq!(rect.end, p(50, 50));
    }

    #[test]
    fn press_on_end_edge_drags_x_only() {
        let mut editor = editor_with_rect();

        editor.pointer_down(p(52, 11));
        assert_eq!(editor.state(), EditState::DraggingEndEdge);

        editor.pointer_up(p(70, -3));
        let rect = editor.rectangle().unwrap();
        assert_eq!(rect.end, p(70, 50));
        assert_eq!(rect.begin, p(10, 10));
        assert_eq!(editor.state(), EditState::Free);
    }

    #[test]
    fn press_inside_body_restarts_drawing() {
        let mut editor = editor_with_rect();

        editor.pointer_down(p(30, 30));
        assert_eq!(editor.state(), EditState::Drawing);
        assert_eq!(editor.rectangle(), Some(Rectangle::at(p(30, 30))));
    }

    #[test]
    fn press_outside_y_span_restarts_even_on_edge_x() {
        let mut editor = editor_with_rect();

        editor.pointer_down(p(10, 100));
        assert_eq!(editor.state(), EditState::Drawing);
        assert_eq!(editor.rectangle(), Some(Rectangle::at(p(10, 100))));
    }

    #[test]
    fn y_span_is_inclusive() {
        let mut editor = editor_with_rect();
        editor.pointer_down(p(10, 50));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);

        let mut editor = editor_with_rect();
        editor.pointer_down(p(50, 10));
        assert_eq!(editor.state(), EditState::DraggingEndEdge);

        let mut editor = editor_with_rect();
        editor.pointer_down(p(10, 51));
        assert_eq!(editor.state(), EditState::Drawing);
    }

    #[test]
    fn hit_tolerance_is_three_pixels() {
        let mut editor = editor_with_rect();
        editor.pointer_down(p(13, 20));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);

        let mut editor = editor_with_rect();
        editor.pointer_down(p(7, 20));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);

        let mut editor = editor_with_rect();
        editor.pointer_down(p(14, 20));
        assert_eq!(editor.state(), EditState::Drawing);
    }

    #[test]
    fn begin_edge_wins_when_both_edges_are_close() {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(10, 0));
        editor.pointer_up(p(14, 20));

        editor.pointer_down(p(12, 5));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);
    }

    #[test]
    fn reversed_corners_still_hit_edges() {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(50, 50));
        editor.pointer_up(p(10, 10));

        editor.pointer_down(p(11, 25));
        assert_eq!(editor.state(), EditState::DraggingEndEdge);
    }

    #[test]
    fn move_while_free_does_nothing() {
        let mut editor = editor_with_rect();
        assert!(!editor.pointer_move(p(0, 0)));
        assert_eq!(editor.rectangle(), Some(Rectangle::new(p(10, 10), p(50, 50))));
    }

    #[test]
    fn release_without_press_is_tolerated() {
        let mut editor = RectangleEditor::new();
        assert!(!editor.pointer_up(p(5, 5)));
        assert_eq!(editor.state(), EditState::Free);
        assert_eq!(editor.rectangle(), None);
    }

    #[test]
    fn every_release_returns_to_free() {
        let presses = [p(10, 30), p(50, 30), p(30, 30), p(10, 100)];
        for press in presses {
            let mut editor = editor_with_rect();
            editor.pointer_down(press);
            assert!(editor.is_active());
            editor.pointer_up(press);
            assert_eq!(editor.state(), EditState::Free);
        }
    }

    #[test]
    fn arbitrary_sequences_keep_a_single_valid_state() {
        let events = [
            PointerEvent::Up(p(1, 1)),
            PointerEvent::Move(p(2, 2)),
            PointerEvent::Down(p(0, 0)),
            PointerEvent::Down(p(9, 9)),
            PointerEvent::Move(p(40, 40)),
            PointerEvent::Up(p(40, 40)),
            PointerEvent::Down(p(40, 20)),
            PointerEvent::Move(p(60, 0)),
            PointerEvent::Up(p(61, 0)),
            PointerEvent::Up(p(61, 0)),
        ];

        let mut editor = RectangleEditor::new();
        for event in events {
            editor.handle(event);
            assert!(matches!(
                editor.state(),
                EditState::Free
                    | EditState::Drawing
                    | EditState::DraggingBeginEdge
                    | EditState::DraggingEndEdge
            ));
            if let PointerEvent::Up(_) = event {
                assert_eq!(editor.state(), EditState::Free);
            }
        }

        let rect = editor.rectangle().unwrap();
        assert_eq!(rect.begin, p(9, 9));
        assert_eq!(rect.end, p(61, 40));
    }

    #[test]
    fn custom_tolerance_applies() {
        let mut editor = RectangleEditor::with_hit_tolerance(0);
        editor.pointer_down(p(10, 10));
        editor.pointer_up(p(50, 50));

        editor.pointer_down(p(11, 20));
        assert_eq!(editor.state(), EditState::Drawing);
    }

    #[test]
    fn corner_at_origin_is_grabbable() {
        let mut editor = RectangleEditor::new();
        editor.pointer_down(p(0, 0));
        editor.pointer_up(p(40, 20));

        editor.pointer_down(p(1, 10));
        assert_eq!(editor.state(), EditState::DraggingBeginEdge);
        editor.pointer_up(p(5, 10));
        assert_eq!(editor.rectangle(), Some(Rectangle::new(p(5, 0), p(40, 20))));
    }
}
