//! Pointer events delivered to widget listeners.

use rz_core::math::Vec2;

/// The three pointer phases a resizer listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

impl PointerKind {
    /// DOM event type name for this phase.
    pub const fn event_name(self) -> &'static str {
        match self {
            PointerKind::Down => "mousedown",
            PointerKind::Move => "mousemove",
            PointerKind::Up => "mouseup",
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held while the event fired.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
        const META = 0b1000;
    }
}

/// A pointer event as seen by a listener.
///
/// `page` is relative to the document origin, `offset` to the target
/// element's padding edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub page: Vec2,
    pub offset: Vec2,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, page: Vec2, offset: Vec2) -> Self {
        Self {
            kind,
            page,
            offset,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    pub fn down(page: Vec2, offset: Vec2) -> Self {
        Self::new(PointerKind::Down, page, offset)
    }

    pub fn moved(page: Vec2) -> Self {
        Self::new(PointerKind::Move, page, Vec2::ZERO)
    }

    pub fn up(page: Vec2) -> Self {
        Self::new(PointerKind::Up, page, Vec2::ZERO)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Suppress the host's default action (text selection, native drag).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerScope<E> {
    /// Events targeted at this element or one of its descendants.
    Element(E),
    /// Every event of the kind, wherever it lands.
    Document,
}

/// Handle returned by [`Document::add_listener`](crate::Document::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Callback invoked for each matching pointer event.
pub type PointerListener = Box<dyn FnMut(&mut PointerEvent)>;
