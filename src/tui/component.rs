use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into part of the screen.
///
/// Data comes in as struct fields. `render` takes `&mut self` so a component
/// can keep presentation state such as a table selection in step with what
/// it just drew.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw key events into its own higher-level events.
pub trait EventHandler {
    type Event;

    /// Returns `None` when the key was consumed locally or ignored.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
