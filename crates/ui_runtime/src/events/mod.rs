//! Frame-local UI event queue
//!
//! Key principles:
//! - Widgets push typed events while the input pass runs
//! - Delivery order is emission order, independent of who listens
//! - The queue is cleared when the next frame begins; hosts drain it in between

use crate::input::MouseButton;
use crate::tree::NodeId;

/// What happened to a node
#[derive(Debug, Clone, PartialEq)]
pub enum UiEventKind {
    /// Cursor started hovering the node
    CursorEntered,
    /// Cursor stopped hovering the node
    CursorExited,
    /// A mouse button was pressed while the node owned the cursor
    Pressed(MouseButton),
    /// A mouse button was released after pressing on the node
    Released(MouseButton),
    /// A button was clicked
    Clicked,
    /// A slider value changed
    ValueChanged(f32),
    /// A list selection changed
    SelectionChanged(Option<usize>),
    /// Editable text changed
    TextChanged,
    /// Enter was pressed in a text field
    Submitted,
    /// Visible range of a scroll box changed
    Scrolled {
        /// First visible member index
        start: usize,
        /// Last visible member index
        end: usize,
    },
    /// A window was dragged
    Moved,
    /// A window was resized
    Resized,
    /// Keyboard focus was gained (true) or lost (false)
    FocusChanged(bool),
}

/// Event with the node that emitted it
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    /// Emitting node
    pub source: NodeId,
    /// Event payload
    pub kind: UiEventKind,
}

/// Ordered queue of events produced during one frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<UiEvent>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event
    pub fn send(&mut self, source: NodeId, kind: UiEventKind) {
        log::trace!("UI event {:?} from {:?}", kind, source);
        self.events.push(UiEvent { source, kind });
    }

    /// Iterate events without removing them
    pub fn iter(&self) -> impl Iterator<Item = &UiEvent> {
        self.events.iter()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events are queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return every event
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove and return the events emitted by one node, keeping the rest
    pub fn drain_for(&mut self, source: NodeId) -> Vec<UiEventKind> {
        let mut taken = Vec::new();
        self.events.retain(|event| {
            if event.source == source {
                taken.push(event.kind.clone());
                false
            } else {
                true
            }
        });
        taken
    }

    /// Check whether a node emitted a given event
    pub fn contains(&self, source: NodeId, kind: &UiEventKind) -> bool {
        self.events.iter().any(|e| e.source == source && &e.kind == kind)
    }

    /// Drop every event
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn node(n: u64) -> NodeId {
        NodeId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn test_drain_for_keeps_order_of_others() {
        let mut queue = EventQueue::new();
        queue.send(node(1), UiEventKind::Clicked);
        queue.send(node(2), UiEventKind::TextChanged);
        queue.send(node(1), UiEventKind::ValueChanged(0.5));
        queue.send(node(3), UiEventKind::Submitted);

        let mine = queue.drain_for(node(1));
        assert_eq!(mine, vec![UiEventKind::Clicked, UiEventKind::ValueChanged(0.5)]);

        let rest: Vec<_> = queue.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(rest, vec![UiEventKind::TextChanged, UiEventKind::Submitted]);
        assert!(queue.is_empty());
    }
}
