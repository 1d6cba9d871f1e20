use carta_types::cartesian::PointExpression;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dom::ElementRef;
use crate::options::{impl_options, impl_options_projection};

/// Class name of div icons when none is given.
pub const DIV_ICON_CLASS: &str = "leaflet-div-icon";

/// Options shared by all icons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BaseIconOptions {
    /// Map pane.
    pub pane: Option<String>,
    /// Attribution.
    pub attribution: Option<String>,
    /// Url of the icon image.
    pub icon_url: Option<String>,
    /// Url of the icon image for high density screens.
    pub icon_retina_url: Option<String>,
    /// Size of the icon image in pixels.
    pub icon_size: Option<PointExpression>,
    /// Point of the icon placed at the marker position, relative to the top left corner.
    pub icon_anchor: Option<PointExpression>,
    /// Point popups open at, relative to the icon anchor.
    pub popup_anchor: Option<PointExpression>,
    /// Point tooltips open at, relative to the icon anchor.
    pub tooltip_anchor: Option<PointExpression>,
    /// Url of the shadow image.
    pub shadow_url: Option<String>,
    /// Url of the shadow image for high density screens.
    pub shadow_retina_url: Option<String>,
    /// Size of the shadow image in pixels.
    pub shadow_size: Option<PointExpression>,
    /// Point of the shadow placed at the marker position.
    pub shadow_anchor: Option<PointExpression>,
    /// Class name added to the icon and shadow images.
    pub class_name: Option<String>,
}

impl_options!(BaseIconOptions {
    pane,
    attribution,
    icon_url,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
});

impl BaseIconOptions {
    /// Url of the icon image to use. The retina url is preferred on high density screens.
    pub fn icon_url_for(&self, retina: bool) -> Option<&str> {
        pick_url(retina, &self.icon_retina_url, &self.icon_url)
    }

    /// Url of the shadow image to use.
    pub fn shadow_url_for(&self, retina: bool) -> Option<&str> {
        pick_url(retina, &self.shadow_retina_url, &self.shadow_url)
    }
}

fn pick_url<'a>(
    retina: bool,
    retina_url: &'a Option<String>,
    url: &'a Option<String>,
) -> Option<&'a str> {
    match retina_url {
        Some(u) if retina => Some(u),
        _ => url.as_deref(),
    }
}

/// Options of an image icon. The image url is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IconOptions {
    /// Map pane.
    pub pane: Option<String>,
    /// Attribution.
    pub attribution: Option<String>,
    /// Url of the icon image.
    pub icon_url: String,
    /// Url of the icon image for high density screens.
    pub icon_retina_url: Option<String>,
    /// Size of the icon image in pixels.
    pub icon_size: Option<PointExpression>,
    /// Point of the icon placed at the marker position.
    pub icon_anchor: Option<PointExpression>,
    /// Point popups open at, relative to the icon anchor.
    pub popup_anchor: Option<PointExpression>,
    /// Point tooltips open at, relative to the icon anchor.
    pub tooltip_anchor: Option<PointExpression>,
    /// Url of the shadow image.
    pub shadow_url: Option<String>,
    /// Url of the shadow image for high density screens.
    pub shadow_retina_url: Option<String>,
    /// Size of the shadow image in pixels.
    pub shadow_size: Option<PointExpression>,
    /// Point of the shadow placed at the marker position.
    pub shadow_anchor: Option<PointExpression>,
    /// Class name added to the icon and shadow images.
    pub class_name: Option<String>,
}

fn has_icon_url(options: &IconOptions) -> Result<(), crate::error::CartaError> {
    if options.icon_url.is_empty() {
        Err(crate::error::CartaError::Configuration(
            "iconUrl is required".into(),
        ))
    } else {
        Ok(())
    }
}

impl IconOptions {
    /// Options with the image url and nothing else.
    pub fn new(icon_url: impl Into<String>) -> Self {
        Self {
            icon_url: icon_url.into(),
            ..Default::default()
        }
    }
}

impl_options!(IconOptions {
    required: [icon_url],
    pane,
    attribution,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
} validate = has_icon_url);

impl From<&IconOptions> for BaseIconOptions {
    fn from(value: &IconOptions) -> Self {
        Self {
            pane: value.pane.clone(),
            attribution: value.attribution.clone(),
            icon_url: Some(value.icon_url.clone()),
            icon_retina_url: value.icon_retina_url.clone(),
            icon_size: value.icon_size,
            icon_anchor: value.icon_anchor,
            popup_anchor: value.popup_anchor,
            tooltip_anchor: value.tooltip_anchor,
            shadow_url: value.shadow_url.clone(),
            shadow_retina_url: value.shadow_retina_url.clone(),
            shadow_size: value.shadow_size,
            shadow_anchor: value.shadow_anchor,
            class_name: value.class_name.clone(),
        }
    }
}

/// Options of the default marker icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DefaultIconOptions {
    /// Map pane.
    pub pane: Option<String>,
    /// Attribution.
    pub attribution: Option<String>,
    /// Url of the icon image, relative to `image_path`.
    pub icon_url: Option<String>,
    /// Url of the icon image for high density screens.
    pub icon_retina_url: Option<String>,
    /// Size of the icon image in pixels.
    pub icon_size: Option<PointExpression>,
    /// Point of the icon placed at the marker position.
    pub icon_anchor: Option<PointExpression>,
    /// Point popups open at.
    pub popup_anchor: Option<PointExpression>,
    /// Point tooltips open at.
    pub tooltip_anchor: Option<PointExpression>,
    /// Url of the shadow image.
    pub shadow_url: Option<String>,
    /// Url of the shadow image for high density screens.
    pub shadow_retina_url: Option<String>,
    /// Size of the shadow image in pixels.
    pub shadow_size: Option<PointExpression>,
    /// Point of the shadow placed at the marker position.
    pub shadow_anchor: Option<PointExpression>,
    /// Class name added to the images.
    pub class_name: Option<String>,
    /// Directory the image urls are relative to.
    pub image_path: Option<String>,
}

impl_options!(DefaultIconOptions {
    pane,
    attribution,
    icon_url,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
    image_path,
});
impl_options_projection!(DefaultIconOptions => BaseIconOptions {
    pane,
    attribution,
    icon_url,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
});

impl DefaultIconOptions {
    /// Options of the stock blue marker.
    pub fn stock() -> Self {
        Self {
            icon_url: Some("marker-icon.png".into()),
            icon_retina_url: Some("marker-icon-2x.png".into()),
            shadow_url: Some("marker-shadow.png".into()),
            icon_size: Some([25.0, 41.0].into()),
            icon_anchor: Some([12.0, 41.0].into()),
            popup_anchor: Some([1.0, -34.0].into()),
            tooltip_anchor: Some([16.0, -28.0].into()),
            shadow_size: Some([41.0, 41.0].into()),
            ..Default::default()
        }
    }

    /// Icon options with the stock values filled in and the image urls prefixed with the image
    /// path. `detected_path` is used when the options have no image path.
    pub fn resolve(&self, detected_path: &str) -> IconOptions {
        use crate::options::Options;

        let options = Self::stock().merged(self.clone());
        let path = options.image_path.as_deref().unwrap_or(detected_path);
        let prefixed = |url: Option<String>| url.map(|u| format!("{path}{u}"));

        let mut icon = IconOptions::new(prefixed(options.icon_url).unwrap_or_default());
        icon.pane = options.pane;
        icon.attribution = options.attribution;
        icon.icon_retina_url = prefixed(options.icon_retina_url);
        icon.icon_size = options.icon_size;
        icon.icon_anchor = options.icon_anchor;
        icon.popup_anchor = options.popup_anchor;
        icon.tooltip_anchor = options.tooltip_anchor;
        icon.shadow_url = prefixed(options.shadow_url);
        icon.shadow_retina_url = prefixed(options.shadow_retina_url);
        icon.shadow_size = options.shadow_size;
        icon.shadow_anchor = options.shadow_anchor;
        icon.class_name = options.class_name;
        icon
    }
}

/// Literal `false`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct False;

impl Serialize for False {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }
}

impl<'de> Deserialize<'de> for False {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match bool::deserialize(deserializer)? {
            false => Ok(False),
            true => Err(serde::de::Error::custom("expected `false`")),
        }
    }
}

/// Inside of a div icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconHtml {
    /// HTML string.
    Html(String),
    /// Element inserted as is.
    #[serde(skip)]
    Element(ElementRef),
    /// `false`: the inside is left as is.
    Disabled(False),
}

/// Options of an icon made of an HTML element instead of an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DivIconOptions {
    /// Map pane.
    pub pane: Option<String>,
    /// Attribution.
    pub attribution: Option<String>,
    /// Url of the background image.
    pub icon_url: Option<String>,
    /// Url of the background image for high density screens.
    pub icon_retina_url: Option<String>,
    /// Size of the element in pixels.
    pub icon_size: Option<PointExpression>,
    /// Point of the element placed at the marker position.
    pub icon_anchor: Option<PointExpression>,
    /// Point popups open at.
    pub popup_anchor: Option<PointExpression>,
    /// Point tooltips open at.
    pub tooltip_anchor: Option<PointExpression>,
    /// Url of the shadow image.
    pub shadow_url: Option<String>,
    /// Url of the shadow image for high density screens.
    pub shadow_retina_url: Option<String>,
    /// Size of the shadow in pixels.
    pub shadow_size: Option<PointExpression>,
    /// Point of the shadow placed at the marker position.
    pub shadow_anchor: Option<PointExpression>,
    /// Class name of the element.
    pub class_name: Option<String>,
    /// Inside of the element.
    pub html: Option<IconHtml>,
    /// Position of the background image.
    pub bg_pos: Option<PointExpression>,
}

impl_options!(DivIconOptions {
    pane,
    attribution,
    icon_url,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
    html,
    bg_pos,
});
impl_options_projection!(DivIconOptions => BaseIconOptions {
    pane,
    attribution,
    icon_url,
    icon_retina_url,
    icon_size,
    icon_anchor,
    popup_anchor,
    tooltip_anchor,
    shadow_url,
    shadow_retina_url,
    shadow_size,
    shadow_anchor,
    class_name,
});

impl DivIconOptions {
    /// Options with the stock size and class filled in where not set.
    pub fn with_defaults(self) -> Self {
        use crate::options::Options;

        Self {
            icon_size: Some([12.0, 12.0].into()),
            class_name: Some(DIV_ICON_CLASS.into()),
            html: Some(IconHtml::Disabled(False)),
            ..Default::default()
        }
        .merged(self)
    }
}

/// Icon of a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerIcon {
    /// Image icon.
    Icon(IconOptions),
    /// The stock marker image.
    Default(DefaultIconOptions),
    /// HTML element icon.
    Div(DivIconOptions),
}

impl From<IconOptions> for MarkerIcon {
    fn from(value: IconOptions) -> Self {
        MarkerIcon::Icon(value)
    }
}

impl From<DivIconOptions> for MarkerIcon {
    fn from(value: DivIconOptions) -> Self {
        MarkerIcon::Div(value)
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        MarkerIcon::Default(DefaultIconOptions::default())
    }
}

/// Icon created by the runtime from icon options.
pub trait Icon {
    /// Options the icon was created with.
    fn options(&self) -> BaseIconOptions;
    /// Creates the icon element, reusing `old_icon` if given.
    fn create_icon(&self, old_icon: Option<ElementRef>) -> ElementRef;
    /// Creates the shadow element, reusing `old_icon` if given. `None` if the icon has no shadow.
    fn create_shadow(&self, old_icon: Option<ElementRef>) -> Option<ElementRef>;
}
