//! Opaque handles to DOM objects and the helpers the runtime provides for working with them.
//!
//! The crate never touches the DOM itself. Elements and native events are identified by handles
//! given out by the runtime, and every operation on them goes through [`DomUtil`] and
//! [`DomEvent`].

use std::sync::Arc;

use carta_types::cartesian::Point;
use serde::{Deserialize, Serialize};

/// Handle of a DOM element owned by the runtime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(pub u64);

/// Handle of a native (browser) event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeEventRef(pub u64);

/// Element given directly or by its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementOrId {
    /// Element handle.
    Element(ElementRef),
    /// Id attribute of the element.
    Id(String),
}

impl From<ElementRef> for ElementOrId {
    fn from(value: ElementRef) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for ElementOrId {
    fn from(value: &str) -> Self {
        Self::Id(value.to_string())
    }
}

impl From<String> for ElementOrId {
    fn from(value: String) -> Self {
        Self::Id(value)
    }
}

/// Helpers manipulating elements.
pub trait DomUtil {
    /// Returns the element with the given id, or the element itself.
    fn get(&self, element: ElementOrId) -> Option<ElementRef>;
    /// Computed value of the style attribute.
    fn style(&self, el: ElementRef, style_attrib: &str) -> Option<String>;
    /// Creates an element with the tag and class, appending it to `container` if given.
    fn create(
        &self,
        tag_name: &str,
        class_name: Option<&str>,
        container: Option<ElementRef>,
    ) -> ElementRef;
    /// Removes the element from its parent.
    fn remove(&self, el: ElementRef);
    /// Removes all children of the element.
    fn empty(&self, el: ElementRef);
    /// Moves the element to the end of its parent's children, so it is drawn on top.
    fn to_front(&self, el: ElementRef);
    /// Moves the element to the start of its parent's children, so it is drawn below the others.
    fn to_back(&self, el: ElementRef);
    /// Whether the element has the class.
    fn has_class(&self, el: ElementRef, name: &str) -> bool;
    /// Adds the class (or whitespace separated classes) to the element.
    fn add_class(&self, el: ElementRef, name: &str);
    /// Removes the class from the element.
    fn remove_class(&self, el: ElementRef, name: &str);
    /// Replaces all classes of the element.
    fn set_class(&self, el: ElementRef, name: &str);
    /// All classes of the element.
    fn class(&self, el: ElementRef) -> String;
    /// Sets the opacity, `0.0` to `1.0`.
    fn set_opacity(&self, el: ElementRef, opacity: f64);
    /// First of the style properties supported by the browser, `None` if none is.
    fn test_prop(&self, props: &[&str]) -> Option<String>;
    /// Moves (and optionally scales) the element with a CSS transform.
    fn set_transform(&self, el: ElementRef, offset: Point, scale: Option<f64>);
    /// Moves the element to the position and remembers the position for [`DomUtil::position`].
    fn set_position(&self, el: ElementRef, position: Point);
    /// Position set with [`DomUtil::set_position`].
    fn position(&self, el: ElementRef) -> Point;
    /// Prevents text selection, e.g. while dragging.
    fn disable_text_selection(&self);
    /// Reverts [`DomUtil::disable_text_selection`].
    fn enable_text_selection(&self);
    /// Prevents native image dragging.
    fn disable_image_drag(&self);
    /// Reverts [`DomUtil::disable_image_drag`].
    fn enable_image_drag(&self);
    /// Hides the focus outline of the element until [`DomUtil::restore_outline`].
    fn prevent_outline(&self, el: ElementRef);
    /// Restores the outline hidden by [`DomUtil::prevent_outline`].
    fn restore_outline(&self);
    /// Vendor-prefixed name of the `transform` style property.
    fn transform_property(&self) -> String;
    /// Vendor-prefixed name of the `transition` style property.
    fn transition_property(&self) -> String;
    /// Vendor-prefixed name of the `transitionend` event.
    fn transition_end_event(&self) -> String;
}

/// Handler of a native event.
pub type DomEventHandler = Arc<dyn Fn(NativeEventRef) + Send + Sync>;

/// Native listeners to add or remove: one handler for whitespace separated event types, or a
/// map of event type to handler.
#[derive(Clone)]
pub enum DomListeners {
    /// Handler for the event types.
    Single(String, DomEventHandler),
    /// Handlers by event type.
    Map(Vec<(String, DomEventHandler)>),
}

impl DomListeners {
    /// Splits the listeners into `(event type, handler)` pairs.
    pub fn pairs(&self) -> Vec<(&str, &DomEventHandler)> {
        match self {
            DomListeners::Single(types, handler) => crate::util::split_words(types)
                .into_iter()
                .filter(|t| !t.is_empty())
                .map(|t| (t, handler))
                .collect(),
            DomListeners::Map(map) => map.iter().map(|(t, h)| (t.as_str(), h)).collect(),
        }
    }
}

/// Helpers for native events.
pub trait DomEvent {
    /// Adds native listeners to the element.
    fn on(&self, el: ElementRef, listeners: DomListeners) -> &Self;
    /// Removes native listeners from the element.
    fn off(&self, el: ElementRef, listeners: DomListeners) -> &Self;
    /// Stops the event from propagating to parent elements.
    fn stop_propagation(&self, ev: NativeEventRef) -> &Self;
    /// Stops wheel events on the element from reaching the map.
    fn disable_scroll_propagation(&self, el: ElementRef) -> &Self;
    /// Stops click, double click and mouse down events on the element from reaching the map.
    fn disable_click_propagation(&self, el: ElementRef) -> &Self;
    /// Prevents the default action of the event.
    fn prevent_default(&self, ev: NativeEventRef) -> &Self;
    /// Both [`DomEvent::stop_propagation`] and [`DomEvent::prevent_default`].
    fn stop(&self, ev: NativeEventRef) -> &Self {
        self.stop_propagation(ev).prevent_default(ev)
    }
    /// Mouse position of the event relative to the container, or to the page if not given.
    fn mouse_position(&self, ev: NativeEventRef, container: Option<ElementRef>) -> Point;
    /// Normalized wheel delta of the event in pixels.
    fn wheel_delta(&self, ev: NativeEventRef) -> f64;
}

/// Makes an element draggable by mouse or touch.
pub trait Draggable {
    /// Starts listening to drag events.
    fn enable(&mut self);
    /// Stops listening to drag events.
    fn disable(&mut self);
    /// Ends the current drag, firing `dragend`.
    fn finish_drag(&mut self);
}

/// Features of the environment the runtime is running in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BrowserFeatures {
    /// Internet Explorer (not Edge).
    pub ie: bool,
    /// Internet Explorer older than 9.
    pub ielt9: bool,
    /// Edge.
    pub edge: bool,
    /// WebKit based browser.
    pub webkit: bool,
    /// Gecko based browser.
    pub gecko: bool,
    /// Android.
    pub android: bool,
    /// Android 2 or 3.
    pub android23: bool,
    /// Chrome.
    pub chrome: bool,
    /// Safari.
    pub safari: bool,
    /// Windows.
    pub win: bool,
    /// Internet Explorer with CSS 3d transforms.
    pub ie3d: bool,
    /// WebKit with CSS 3d transforms.
    pub webkit3d: bool,
    /// Gecko with CSS 3d transforms.
    pub gecko3d: bool,
    /// Opera 12.
    pub opera12: bool,
    /// CSS 3d transforms are supported.
    pub any3d: bool,
    /// Mobile device.
    pub mobile: bool,
    /// Mobile WebKit.
    pub mobile_webkit: bool,
    /// Mobile WebKit with 3d transforms.
    pub mobile_webkit3d: bool,
    /// Mobile Opera.
    pub mobile_opera: bool,
    /// Mobile Gecko.
    pub mobile_gecko: bool,
    /// Touch events are supported.
    pub touch: bool,
    /// Microsoft pointer events are supported.
    pub ms_pointer: bool,
    /// Pointer events are supported.
    pub pointer: bool,
    /// High density screen.
    pub retina: bool,
    /// Canvas is supported.
    pub canvas: bool,
    /// VML is supported.
    pub vml: bool,
    /// SVG is supported.
    pub svg: bool,
}
