use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Inputs arrive as struct fields ("props"); persistent state is either
/// owned (`InputBox`) or borrowed mutably (`MessageList` over
/// `MessageListState`). `render` takes `&mut self` so layout caches and
/// scroll offsets can be refreshed while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// What the component reports to the event loop.
    type Event;

    /// Consume a `TuiEvent`, returning a higher-level event if one results.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
