//! Events fired by the runtime objects and the [`Evented`] capability shared by all of them.
//!
//! Every event is an [`Event`] value. Its variant is decided by the event name: a `tileerror`
//! event is always [`Event::TileError`], a `click` always [`Event::Mouse`], and so on (see
//! [`EventType::payload_kind`]). Handlers match on the variant to get the payload fields.
//!
//! Propagating events to the parents of an object is done by the runtime. [`ListenerRegistry`]
//! only keeps track of the handlers of one object and calls them.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use ahash::AHashMap;

mod event_type;
mod payload;
mod registry;

pub use event_type::EventType;
pub use payload::{
    BaseEvent, DragEndEvent, ErrorEvent, GeoJsonEvent, KeyboardEvent, LayerEvent,
    LayersControlEvent, LocationEvent, MouseEvent, PopupEvent, ResizeEvent, TileErrorEvent,
    TileEvent, TooltipEvent, ZoomAnimEvent,
};
pub use registry::ListenerRegistry;

/// Identity of a runtime object, assigned once with [`stamp`](crate::util::stamp).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of the payload an event carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`BaseEvent`].
    Base,
    /// [`MouseEvent`].
    Mouse,
    /// [`KeyboardEvent`].
    Keyboard,
    /// [`LocationEvent`].
    Location,
    /// [`ErrorEvent`].
    Error,
    /// [`LayerEvent`].
    Layer,
    /// [`LayersControlEvent`].
    LayersControl,
    /// [`TileEvent`].
    Tile,
    /// [`TileErrorEvent`].
    TileError,
    /// [`ResizeEvent`].
    Resize,
    /// [`GeoJsonEvent`].
    GeoJson,
    /// [`PopupEvent`].
    Popup,
    /// [`TooltipEvent`].
    Tooltip,
    /// [`DragEndEvent`].
    DragEnd,
    /// [`ZoomAnimEvent`].
    ZoomAnim,
}

/// Event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Event without payload.
    Base(BaseEvent),
    /// Mouse interaction.
    Mouse(MouseEvent),
    /// Keyboard interaction.
    Keyboard(KeyboardEvent),
    /// Geolocation result.
    Location(LocationEvent),
    /// Failure.
    Error(ErrorEvent),
    /// Layer added or removed.
    Layer(LayerEvent),
    /// Layer switched with the layers control.
    LayersControl(LayersControlEvent),
    /// Tile lifecycle.
    Tile(TileEvent),
    /// Tile failure.
    TileError(TileErrorEvent),
    /// Container resize.
    Resize(ResizeEvent),
    /// GeoJSON layer event.
    GeoJson(GeoJsonEvent),
    /// Popup opened or closed.
    Popup(PopupEvent),
    /// Tooltip opened or closed.
    Tooltip(TooltipEvent),
    /// Dragging ended.
    DragEnd(DragEndEvent),
    /// Zoom animation.
    ZoomAnim(ZoomAnimEvent),
}

macro_rules! for_each_payload {
    ($event:expr, $p:ident => $body:expr) => {
        match $event {
            Event::Base($p) => $body,
            Event::Mouse($p) => $body,
            Event::Keyboard($p) => $body,
            Event::Location($p) => $body,
            Event::Error($p) => $body,
            Event::Layer($p) => $body,
            Event::LayersControl($p) => $body,
            Event::Tile($p) => $body,
            Event::TileError($p) => $body,
            Event::Resize($p) => $body,
            Event::GeoJson($p) => $body,
            Event::Popup($p) => $body,
            Event::Tooltip($p) => $body,
            Event::DragEnd($p) => $body,
            Event::ZoomAnim($p) => $body,
        }
    };
}

impl Event {
    /// Creates an event without payload.
    pub fn base(event_type: impl Into<EventType>, target: ObjectId) -> Self {
        Event::Base(BaseEvent {
            event_type: event_type.into(),
            target,
        })
    }

    /// Event name.
    pub fn event_type(&self) -> &EventType {
        for_each_payload!(self, p => &p.event_type)
    }

    /// Object that fired the event.
    pub fn target(&self) -> ObjectId {
        for_each_payload!(self, p => p.target)
    }

    /// Kind of the payload.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Base(_) => EventKind::Base,
            Event::Mouse(_) => EventKind::Mouse,
            Event::Keyboard(_) => EventKind::Keyboard,
            Event::Location(_) => EventKind::Location,
            Event::Error(_) => EventKind::Error,
            Event::Layer(_) => EventKind::Layer,
            Event::LayersControl(_) => EventKind::LayersControl,
            Event::Tile(_) => EventKind::Tile,
            Event::TileError(_) => EventKind::TileError,
            Event::Resize(_) => EventKind::Resize,
            Event::GeoJson(_) => EventKind::GeoJson,
            Event::Popup(_) => EventKind::Popup,
            Event::Tooltip(_) => EventKind::Tooltip,
            Event::DragEnd(_) => EventKind::DragEnd,
            Event::ZoomAnim(_) => EventKind::ZoomAnim,
        }
    }

    /// Whether the payload is the one the event name requires. Custom events may carry any
    /// payload.
    pub fn is_consistent(&self) -> bool {
        match self.event_type() {
            EventType::Custom(_) => true,
            t => t.payload_kind() == self.kind(),
        }
    }
}

/// Event handler.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Event handlers by event name.
pub type EventHandlerMap = AHashMap<EventType, EventHandler>;

/// Creates an [`EventHandler`] from a closure.
pub fn handler(f: impl Fn(&Event) + Send + Sync + 'static) -> EventHandler {
    Arc::new(f)
}

/// Handlers to add or remove.
#[derive(Clone)]
pub enum Listeners {
    /// One handler for the event name.
    Single(EventType, EventHandler),
    /// Handlers by event name.
    Map(EventHandlerMap),
}

impl Listeners {
    /// Listener pairs in no particular order.
    pub fn pairs(&self) -> Vec<(&EventType, &EventHandler)> {
        match self {
            Listeners::Single(t, h) => vec![(t, h)],
            Listeners::Map(map) => map.iter().collect(),
        }
    }
}

impl<T: Into<EventType>> From<(T, EventHandler)> for Listeners {
    fn from((event_type, handler): (T, EventHandler)) -> Self {
        Listeners::Single(event_type.into(), handler)
    }
}

impl From<EventHandlerMap> for Listeners {
    fn from(value: EventHandlerMap) -> Self {
        Listeners::Map(value)
    }
}

/// Capability of an object to fire events and have listeners.
///
/// Every runtime object has it. Methods return `&mut Self` so calls can be chained.
pub trait Evented {
    /// Identity of the object.
    fn id(&self) -> ObjectId;
    /// Adds the listeners.
    fn on(&mut self, listeners: impl Into<Listeners>) -> &mut Self;
    /// Removes the listeners. Handlers are matched by identity.
    fn off(&mut self, listeners: impl Into<Listeners>) -> &mut Self;
    /// Removes all listeners of the event name.
    fn off_type(&mut self, event_type: &EventType) -> &mut Self;
    /// Removes all listeners.
    fn off_all(&mut self) -> &mut Self;
    /// Adds the listeners, each to be removed after it is called once.
    fn once(&mut self, listeners: impl Into<Listeners>) -> &mut Self;
    /// Calls the listeners of the event. If `propagate` is set, the event is then fired on the
    /// event parents too.
    fn fire(&mut self, event: Event, propagate: bool) -> &mut Self;
    /// Whether there are listeners for the event name.
    fn listens(&self, event_type: &EventType) -> bool;
    /// Adds an object that receives propagated events of this object.
    fn add_event_parent(&mut self, parent: ObjectId) -> &mut Self;
    /// Reverts [`Evented::add_event_parent`].
    fn remove_event_parent(&mut self, parent: ObjectId) -> &mut Self;
}
