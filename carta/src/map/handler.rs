use std::fmt::{Display, Formatter};

use maybe_sync::{MaybeSend, MaybeSync};

/// Interaction handler of a map: dragging, zooming with the wheel, keyboard navigation...
///
/// The handler listens to the events it needs only while it is enabled. Listeners are added in
/// [`Handler::add_hooks`] and removed in [`Handler::remove_hooks`].
pub trait Handler: MaybeSend + MaybeSync {
    /// Whether the handler is enabled.
    fn enabled(&self) -> bool;
    /// Stores the enabled flag without adding or removing hooks.
    fn set_enabled(&mut self, enabled: bool);
    /// Starts listening to events.
    fn add_hooks(&mut self) {}
    /// Stops listening to events.
    fn remove_hooks(&mut self) {}

    /// Enables the handler. Does nothing if it is enabled already.
    fn enable(&mut self) -> &mut Self {
        if !self.enabled() {
            self.set_enabled(true);
            self.add_hooks();
        }

        self
    }

    /// Disables the handler. Does nothing if it is disabled already.
    fn disable(&mut self) -> &mut Self {
        if self.enabled() {
            self.set_enabled(false);
            self.remove_hooks();
        }

        self
    }
}

/// Handlers every map has.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MapHandlerName {
    /// Shift-drag zooms to the dragged box.
    BoxZoom,
    /// Double click zooms in.
    DoubleClickZoom,
    /// Dragging pans the map.
    Dragging,
    /// Arrow keys pan, `+` and `-` zoom.
    Keyboard,
    /// Wheel zooms.
    ScrollWheelZoom,
    /// Taps are converted to clicks on mobile.
    Tap,
    /// Pinch zooms.
    TouchZoom,
}

impl MapHandlerName {
    /// Name the runtime registers the handler under, also the name of its map option.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapHandlerName::BoxZoom => "boxZoom",
            MapHandlerName::DoubleClickZoom => "doubleClickZoom",
            MapHandlerName::Dragging => "dragging",
            MapHandlerName::Keyboard => "keyboard",
            MapHandlerName::ScrollWheelZoom => "scrollWheelZoom",
            MapHandlerName::Tap => "tap",
            MapHandlerName::TouchZoom => "touchZoom",
        }
    }
}

impl Display for MapHandlerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        enabled: bool,
        hooks_added: usize,
        hooks_removed: usize,
    }

    impl Handler for Counting {
        fn enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn add_hooks(&mut self) {
            self.hooks_added += 1;
        }

        fn remove_hooks(&mut self) {
            self.hooks_removed += 1;
        }
    }

    #[test]
    fn hooks_follow_state_changes() {
        let mut handler = Counting::default();
        handler.enable().enable();
        assert!(handler.enabled());
        assert_eq!(handler.hooks_added, 1);

        handler.disable().disable();
        assert!(!handler.enabled());
        assert_eq!(handler.hooks_removed, 1);
    }

    #[test]
    fn names() {
        assert_eq!(MapHandlerName::ScrollWheelZoom.to_string(), "scrollWheelZoom");
    }
}
