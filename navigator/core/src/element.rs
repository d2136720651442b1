//! UI Elements
//!
//! A UI element is the unit the navigator shows and hides. It carries a stable
//! identity, the layer it lives on, a persistence flag and its current
//! visibility. What the element actually draws is owned by the host; the
//! navigator only reaches it through [`ElementHooks`].
//!
//! # Layers
//!
//! | Layer     | Policy                                                        |
//! |-----------|---------------------------------------------------------------|
//! | `Hud`     | stacking, no exclusivity                                      |
//! | `Screen`  | primary: one current view, recorded in navigation history     |
//! | `Panel`   | exclusive: a non-persistent panel evicts other non-persistent |
//! | `Overlay` | stacking, no exclusivity                                      |
//! | `Debug`   | stacking, no exclusivity                                      |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identity of a UI element
///
/// The navigator is agnostic to how the host derives the key (a type name,
/// a route, an enum label); it only requires it to be unique per navigator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new element ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Visual layer an element belongs to
///
/// Declaration order is back-to-front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Always-on heads-up display
    Hud,
    /// Full screens; one primary view at a time, with history
    Screen,
    /// Panels that exclude each other unless persistent
    Panel,
    /// Popups and toasts stacked over everything else
    Overlay,
    /// Developer tooling
    Debug,
}

impl Layer {
    /// Every layer, back to front
    pub const ALL: [Layer; 5] = [
        Layer::Hud,
        Layer::Screen,
        Layer::Panel,
        Layer::Overlay,
        Layer::Debug,
    ];

    /// Whether this layer holds the primary view and drives history
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Screen)
    }

    /// Whether showing a non-persistent element evicts its non-persistent siblings
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Panel)
    }

    /// Lower-case label, matching the serialized form
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hud => "hud",
            Self::Screen => "screen",
            Self::Panel => "panel",
            Self::Overlay => "overlay",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a layer name is not recognized
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown layer '{0}' (expected hud, screen, panel, overlay or debug)")]
pub struct ParseLayerError(String);

impl FromStr for Layer {
    type Err = ParseLayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hud" => Ok(Self::Hud),
            "screen" => Ok(Self::Screen),
            "panel" => Ok(Self::Panel),
            "overlay" => Ok(Self::Overlay),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseLayerError(s.to_string())),
        }
    }
}

/// Visibility of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// On screen
    Visible,
    /// Off screen
    #[default]
    Hidden,
}

/// Host callbacks attached to an element
///
/// All methods default to doing nothing. Hooks must not fail; anything that
/// can go wrong inside them is the implementor's business.
pub trait ElementHooks {
    /// Called once when the navigator takes ownership of the element
    fn on_init(&mut self, _id: &ElementId) {}

    /// Called every time the element is shown, including repeated shows
    fn on_show(&mut self, _id: &ElementId) {}

    /// Called every time the element is hidden, including repeated hides
    fn on_hide(&mut self, _id: &ElementId) {}

    /// Called once when the navigator is disposed
    fn on_dispose(&mut self, _id: &ElementId) {}
}

/// Hooks that do nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl ElementHooks for NoopHooks {}

/// A visible unit managed by the navigator
pub struct UiElement {
    id: ElementId,
    layer: Layer,
    persistent: bool,
    visibility: Visibility,
    /// Position within the layer's active list (ascending)
    sort_order: i32,
    hooks: Box<dyn ElementHooks>,
}

impl UiElement {
    /// Create a hidden, non-persistent element with no hooks
    pub fn new(id: impl Into<ElementId>, layer: Layer) -> Self {
        Self {
            id: id.into(),
            layer,
            persistent: false,
            visibility: Visibility::Hidden,
            sort_order: 0,
            hooks: Box::new(NoopHooks),
        }
    }

    /// Set the persistence flag
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Set the ordering key used within the layer's active list
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Attach host callbacks
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl ElementHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Element identity
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Layer the element lives on for its whole lifetime
    #[must_use]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Whether the element is exempt from eviction and replacement hiding
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Current visibility
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Shorthand for `visibility() == Visibility::Visible`
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Ordering key within the layer
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Mark visible and run the show hook
    pub fn show(&mut self) {
        self.visibility = Visibility::Visible;
        self.hooks.on_show(&self.id);
    }

    /// Mark hidden and run the hide hook
    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.hooks.on_hide(&self.id);
    }

    /// Run the init hook
    pub fn init(&mut self) {
        self.hooks.on_init(&self.id);
    }

    /// Run the dispose hook
    pub fn dispose(&mut self) {
        self.hooks.on_dispose(&self.id);
    }
}

impl fmt::Debug for UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiElement")
            .field("id", &self.id)
            .field("layer", &self.layer)
            .field("persistent", &self.persistent)
            .field("visibility", &self.visibility)
            .field("sort_order", &self.sort_order)
            .finish_non_exhaustive()
    }
}
