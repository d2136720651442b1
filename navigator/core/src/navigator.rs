//! UI Navigator
//!
//! The controller that owns the element registry, the navigation history and
//! the current primary view. Hosts drive it by element identity; it decides
//! what else has to be hidden, what goes into history, and who gets notified.
//!
//! # State Machine
//!
//! ```text
//!  Uninitialized ──init()──► Initializing ──(hide-all + default view)──► Ready
//!                                                                         │
//!                                                          dispose() ◄────┘
//!                                                              │
//!                                                           Disposed
//! ```
//!
//! Notifications are only emitted in `Ready`, so the initial hide-all and the
//! default-view pass are silent.
//!
//! # Show Pipeline
//!
//! 1. Resolve the identity (unknown ids are logged and ignored).
//! 2. Screen layer: record the replaced primary view in history (unless told
//!    not to) and hide it unless it is persistent.
//! 3. Panel layer: a non-persistent panel hides every other non-persistent
//!    panel.
//! 4. Show the element and add it to its layer's active list.
//! 5. Notify listeners.
//!
//! Showing an element that is already visible runs the whole pipeline again.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::config::NavigatorConfig;
use crate::element::{ElementId, Layer, UiElement};
use crate::error::NavigationError;
use crate::events::{StateChange, StateChangeChannel, SubscriptionId};
use crate::history::NavigationHistory;
use crate::layers::LayerRegistry;

/// Lifecycle state of the navigator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorState {
    /// Created, no elements registered yet
    Uninitialized,
    /// Registering elements and running the initial hide-all pass
    Initializing,
    /// Steady state; notifications enabled
    Ready,
    /// Torn down; every command is ignored
    Disposed,
}

impl NavigatorState {
    /// Whether commands are processed in this state
    #[must_use]
    pub fn accepts_commands(&self) -> bool {
        matches!(self, Self::Initializing | Self::Ready)
    }
}

impl fmt::Display for NavigatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Disposed => "disposed",
        };
        write!(f, "{label}")
    }
}

/// Outcome of [`UiNavigator::init`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Number of elements registered
    pub registered: usize,
    /// Identities rejected as duplicates
    pub rejected: Vec<ElementId>,
    /// Default view that was shown, if any
    pub default_view: Option<ElementId>,
}

/// Serializable snapshot of the navigator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorSummary {
    /// Lifecycle state
    pub state: NavigatorState,
    /// Current primary view
    pub current_primary: Option<ElementId>,
    /// History, bottom to top
    pub history: Vec<ElementId>,
    /// Non-empty active lists, back to front
    pub active: BTreeMap<Layer, Vec<ElementId>>,
    /// Number of registered elements
    pub element_count: usize,
}

/// Layered UI navigation controller
pub struct UiNavigator {
    state: NavigatorState,
    registry: LayerRegistry,
    history: NavigationHistory,
    current_primary: Option<ElementId>,
    default_view: Option<ElementId>,
    channel: StateChangeChannel,
}

impl UiNavigator {
    /// Create an uninitialized navigator
    #[must_use]
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            state: NavigatorState::Uninitialized,
            registry: LayerRegistry::new(),
            history: NavigationHistory::with_limit(config.history_limit),
            current_primary: None,
            default_view: None,
            channel: StateChangeChannel::new(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Register the elements, hide everything and show the default view
    ///
    /// Duplicate identities are rejected and reported in the returned
    /// [`InitReport`]. A default view that is not registered is ignored with a
    /// warning. No notifications are emitted until this returns.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotReady`] if the navigator was already
    /// initialized or disposed.
    pub fn init(
        &mut self,
        elements: impl IntoIterator<Item = UiElement>,
        default_view: Option<ElementId>,
    ) -> Result<InitReport, NavigationError> {
        if self.state != NavigatorState::Uninitialized {
            tracing::warn!(state = %self.state, "Navigator init called twice");
            return Err(NavigationError::NotReady(self.state));
        }
        self.state = NavigatorState::Initializing;

        let mut report = InitReport::default();
        for element in elements {
            let id = element.id().clone();
            match self.registry.register(element) {
                Ok(()) => {
                    if let Some(element) = self.registry.get_mut(id.as_str()) {
                        element.init();
                    }
                    report.registered += 1;
                }
                Err(_) => report.rejected.push(id),
            }
        }

        self.hide_all();

        self.default_view = default_view.filter(|id| {
            let Some(element) = self.registry.get(id.as_str()) else {
                tracing::warn!(element = %id, "Default view is not registered, ignoring");
                return false;
            };
            if !element.layer().is_primary() {
                tracing::warn!(
                    element = %id,
                    layer = %element.layer(),
                    "Default view is not on the screen layer"
                );
            }
            true
        });
        if let Some(default_view) = self.default_view.clone() {
            self.show_with(default_view.as_str(), false);
            report.default_view = Some(default_view);
        }

        self.state = NavigatorState::Ready;
        tracing::info!(
            registered = report.registered,
            rejected = report.rejected.len(),
            default_view = ?self.default_view,
            "Navigator ready"
        );
        Ok(report)
    }

    /// Run every element's dispose hook and drop all state
    pub fn dispose(&mut self) {
        if self.state == NavigatorState::Disposed {
            return;
        }
        for mut element in self.registry.drain() {
            element.dispose();
        }
        self.history.clear();
        self.current_primary = None;
        self.default_view = None;
        self.channel.clear();
        self.state = NavigatorState::Disposed;
        tracing::info!("Navigator disposed");
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Show an element, recording the replaced primary view in history
    ///
    /// Returns false if the element is unknown or the navigator is not
    /// accepting commands.
    pub fn show(&mut self, id: impl AsRef<str>) -> bool {
        self.show_with(id, true)
    }

    /// Show an element, optionally without recording history
    pub fn show_with(&mut self, id: impl AsRef<str>, remember_in_history: bool) -> bool {
        match self.try_show_with(id.as_ref(), remember_in_history) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Show ignored");
                false
            }
        }
    }

    /// Show an element, reporting why nothing happened
    ///
    /// # Errors
    ///
    /// [`NavigationError::UnknownIdentity`] or [`NavigationError::NotReady`].
    /// Nothing is mutated when an error is returned.
    pub fn try_show_with(
        &mut self,
        id: &str,
        remember_in_history: bool,
    ) -> Result<(), NavigationError> {
        self.check_accepts_commands()?;
        let element = self
            .registry
            .get(id)
            .ok_or_else(|| NavigationError::UnknownIdentity(ElementId::new(id)))?;
        let target = element.id().clone();
        let layer = element.layer();
        let persistent = element.is_persistent();

        if layer.is_primary() {
            self.replace_primary(&target, remember_in_history);
        }

        if layer.is_exclusive() && !persistent {
            self.evict_exclusive(layer, &target);
        }

        let Some(element) = self.registry.get_mut(target.as_str()) else {
            return Err(NavigationError::UnknownIdentity(target));
        };
        element.show();
        let ordering_key = element.sort_order();
        self.registry.activate(target.as_str(), ordering_key);

        tracing::debug!(element = %target, layer = %layer, "Element shown");
        self.notify(StateChange::shown(target, layer));
        Ok(())
    }

    /// Hide an element
    ///
    /// Returns false if the element is unknown or the navigator is not
    /// accepting commands.
    pub fn hide(&mut self, id: impl AsRef<str>) -> bool {
        match self.try_hide(id.as_ref()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Hide ignored");
                false
            }
        }
    }

    /// Hide an element, reporting why nothing happened
    ///
    /// # Errors
    ///
    /// [`NavigationError::UnknownIdentity`] or [`NavigationError::NotReady`].
    pub fn try_hide(&mut self, id: &str) -> Result<(), NavigationError> {
        self.check_accepts_commands()?;
        if !self.registry.contains(id) {
            return Err(NavigationError::UnknownIdentity(ElementId::new(id)));
        }
        self.hide_element(id);
        Ok(())
    }

    /// Hide the element if it is visible, show it otherwise
    pub fn toggle(&mut self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        if self.is_visible(id) {
            self.hide(id)
        } else {
            self.show(id)
        }
    }

    /// Return to the previous primary view
    ///
    /// Falls back to the default view when history is empty. The view being
    /// left is not recorded. Returns the identity now shown, or `None` (with a
    /// warning) when there is nowhere to go.
    pub fn go_back(&mut self) -> Option<ElementId> {
        match self.try_go_back() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Go back ignored");
                None
            }
        }
    }

    /// Return to the previous primary view, reporting why nothing happened
    ///
    /// # Errors
    ///
    /// [`NavigationError::EmptyHistory`] when there is no history and no
    /// default view, or [`NavigationError::NotReady`].
    pub fn try_go_back(&mut self) -> Result<ElementId, NavigationError> {
        self.check_accepts_commands()?;

        let target = match self.history.pop() {
            Some(previous) => previous,
            None => match self.default_view.clone() {
                Some(default_view) => {
                    tracing::debug!(element = %default_view, "History empty, falling back to default view");
                    default_view
                }
                None => return Err(NavigationError::EmptyHistory),
            },
        };

        self.try_show_with(target.as_str(), false)?;
        Ok(target)
    }

    /// Hide every active element in a layer
    ///
    /// Persistent elements are skipped unless `include_persistent` is set.
    /// Returns how many elements were hidden.
    pub fn hide_all_in_layer(&mut self, layer: Layer, include_persistent: bool) -> usize {
        if let Err(e) = self.check_accepts_commands() {
            tracing::warn!(error = %e, layer = %layer, "Hide layer ignored");
            return 0;
        }

        // Hiding mutates the active list
        let snapshot = self.registry.active_in(layer);
        let mut hidden = 0;
        for id in snapshot {
            let persistent = self
                .registry
                .get(id.as_str())
                .is_some_and(UiElement::is_persistent);
            if persistent && !include_persistent {
                continue;
            }
            self.hide_element(id.as_str());
            hidden += 1;
        }

        tracing::debug!(layer = %layer, hidden, "Layer hidden");
        hidden
    }

    /// Force every element hidden and reset active lists and history
    ///
    /// Emits no notifications regardless of state.
    pub fn hide_all(&mut self) {
        for id in self.registry.ids() {
            if let Some(element) = self.registry.get_mut(id.as_str()) {
                element.hide();
            }
        }
        self.registry.clear_active();
        self.history.clear();
        self.current_primary = None;
        tracing::debug!(elements = self.registry.len(), "All elements hidden");
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a callback for state changes
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Register a channel for state changes
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<StateChange>) {
        self.channel.subscribe_channel()
    }

    /// Remove a listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lifecycle state
    #[must_use]
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    /// The current primary view, if any
    #[must_use]
    pub fn current_primary_view(&self) -> Option<&ElementId> {
        self.current_primary.as_ref()
    }

    /// The configured default view, if any
    #[must_use]
    pub fn default_view(&self) -> Option<&ElementId> {
        self.default_view.as_ref()
    }

    /// Whether `go_back` has a history entry to return to
    #[must_use]
    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// History snapshot, bottom to top
    #[must_use]
    pub fn history(&self) -> Vec<ElementId> {
        self.history.entries()
    }

    /// Look up an element
    #[must_use]
    pub fn get_element(&self, id: impl AsRef<str>) -> Option<&UiElement> {
        self.registry.get(id.as_ref())
    }

    /// Whether an element is visible; false for unknown ids
    #[must_use]
    pub fn is_visible(&self, id: impl AsRef<str>) -> bool {
        self.registry
            .get(id.as_ref())
            .is_some_and(UiElement::is_visible)
    }

    /// Active list of a layer, back to front
    #[must_use]
    pub fn active_in(&self, layer: Layer) -> Vec<ElementId> {
        self.registry.active_in(layer)
    }

    /// Read access to the registry
    #[must_use]
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Serializable snapshot of the whole navigator
    #[must_use]
    pub fn summary(&self) -> NavigatorSummary {
        let active = Layer::ALL
            .iter()
            .map(|layer| (*layer, self.registry.active_in(*layer)))
            .filter(|(_, ids)| !ids.is_empty())
            .collect();

        NavigatorSummary {
            state: self.state,
            current_primary: self.current_primary.clone(),
            history: self.history.entries(),
            active,
            element_count: self.registry.len(),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn check_accepts_commands(&self) -> Result<(), NavigationError> {
        if self.state.accepts_commands() {
            Ok(())
        } else {
            Err(NavigationError::NotReady(self.state))
        }
    }

    /// Screen-layer bookkeeping before `target` is shown
    fn replace_primary(&mut self, target: &ElementId, remember_in_history: bool) {
        if let Some(current) = self.current_primary.clone() {
            if current != *target {
                if remember_in_history {
                    self.history.push(current.clone());
                }
                let keep = self
                    .registry
                    .get(current.as_str())
                    .is_some_and(UiElement::is_persistent);
                if !keep {
                    self.hide_element(current.as_str());
                }
            }
        }

        self.history.discard_top(target.as_str());
        self.current_primary = Some(target.clone());
    }

    /// Hide every non-persistent active element of an exclusive layer except `target`
    fn evict_exclusive(&mut self, layer: Layer, target: &ElementId) {
        for id in self.registry.active_in(layer) {
            if id == *target {
                continue;
            }
            let persistent = self
                .registry
                .get(id.as_str())
                .is_some_and(UiElement::is_persistent);
            if !persistent {
                tracing::debug!(element = %id, by = %target, "Evicted from exclusive layer");
                self.hide_element(id.as_str());
            }
        }
    }

    /// Shared hide path; `id` must be registered
    fn hide_element(&mut self, id: &str) {
        let Some(element) = self.registry.get_mut(id) else {
            return;
        };
        element.hide();
        let target = element.id().clone();
        let layer = element.layer();
        self.registry.deactivate(id);

        tracing::debug!(element = %target, layer = %layer, "Element hidden");
        if self.current_primary.as_ref() == Some(&target) {
            self.current_primary = None;
        }
        self.notify(StateChange::hidden(target, layer));
    }

    fn notify(&mut self, change: StateChange) {
        if self.state == NavigatorState::Ready {
            self.channel.emit(&change);
        }
    }
}

impl Default for UiNavigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}

impl fmt::Debug for UiNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiNavigator")
            .field("state", &self.state)
            .field("current_primary", &self.current_primary)
            .field("history", &self.history)
            .field("default_view", &self.default_view)
            .field("elements", &self.registry.len())
            .field("listeners", &self.channel.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::element::ElementHooks;

    fn id(s: &str) -> ElementId {
        ElementId::new(s)
    }

    fn elements() -> Vec<UiElement> {
        vec![
            UiElement::new("menu", Layer::Screen),
            UiElement::new("game", Layer::Screen),
            UiElement::new("settings", Layer::Screen),
            UiElement::new("pause", Layer::Panel),
            UiElement::new("inventory", Layer::Panel),
            UiElement::new("chat", Layer::Panel).persistent(true),
            UiElement::new("hud", Layer::Hud).persistent(true),
            UiElement::new("toast", Layer::Overlay),
        ]
    }

    fn navigator(default_view: Option<&str>) -> UiNavigator {
        let mut nav = UiNavigator::default();
        nav.init(elements(), default_view.map(id)).unwrap();
        nav
    }

    fn recorded(nav: &mut UiNavigator) -> Rc<RefCell<Vec<StateChange>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        nav.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        log
    }

    #[test]
    fn test_init_hides_everything_and_shows_default() {
        let nav = navigator(Some("menu"));
        assert_eq!(nav.state(), NavigatorState::Ready);
        assert_eq!(nav.current_primary_view(), Some(&id("menu")));
        assert!(nav.is_visible("menu"));
        assert!(!nav.has_history());
        for other in ["game", "pause", "hud", "toast"] {
            assert!(!nav.is_visible(other));
        }
    }

    #[test]
    fn test_init_rejects_duplicates() {
        let mut nav = UiNavigator::default();
        let mut list = elements();
        list.push(UiElement::new("menu", Layer::Overlay));
        let report = nav.init(list, None).unwrap();

        assert_eq!(report.registered, 8);
        assert_eq!(report.rejected, vec![id("menu")]);
        assert_eq!(nav.get_element("menu").unwrap().layer(), Layer::Screen);
    }

    #[test]
    fn test_init_twice_is_rejected() {
        let mut nav = navigator(None);
        assert_eq!(
            nav.init(elements(), None),
            Err(NavigationError::NotReady(NavigatorState::Ready))
        );
    }

    #[test]
    fn test_init_is_silent() {
        struct Counter(Rc<RefCell<usize>>);
        impl ElementHooks for Counter {
            fn on_show(&mut self, _id: &ElementId) {
                *self.0.borrow_mut() += 1;
            }
        }

        let shows = Rc::new(RefCell::new(0));
        let mut nav = UiNavigator::default();
        let log = recorded(&mut nav);
        nav.init(
            vec![UiElement::new("menu", Layer::Screen).with_hooks(Counter(shows.clone()))],
            Some(id("menu")),
        )
        .unwrap();

        assert_eq!(*shows.borrow(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unknown_default_view_ignored() {
        let nav = navigator(Some("credits"));
        assert!(nav.default_view().is_none());
        assert!(nav.current_primary_view().is_none());
    }

    #[test]
    fn test_commands_before_init_are_ignored() {
        let mut nav = UiNavigator::default();
        assert!(!nav.show("menu"));
        assert_eq!(
            nav.try_show_with("menu", true),
            Err(NavigationError::NotReady(NavigatorState::Uninitialized))
        );
        assert_eq!(nav.go_back(), None);
    }

    #[test]
    fn test_show_unknown_is_noop() {
        let mut nav = navigator(Some("menu"));
        let before = nav.summary();
        assert!(!nav.show("credits"));
        assert!(!nav.hide("credits"));
        assert_eq!(nav.summary(), before);
    }

    #[test]
    fn test_primary_replacement_records_history() {
        let mut nav = navigator(None);
        nav.show("menu");
        nav.show("game");

        assert!(!nav.is_visible("menu"));
        assert!(nav.is_visible("game"));
        assert_eq!(nav.current_primary_view(), Some(&id("game")));
        assert_eq!(nav.history(), vec![id("menu")]);
        assert_eq!(nav.active_in(Layer::Screen), vec![id("game")]);
    }

    #[test]
    fn test_show_without_history() {
        let mut nav = navigator(Some("menu"));
        nav.show_with("game", false);
        assert!(!nav.has_history());
        assert!(!nav.is_visible("menu"));
    }

    #[test]
    fn test_reshow_current_primary_keeps_history() {
        let mut nav = navigator(None);
        nav.show("menu");
        nav.show("game");
        nav.show("game");
        assert_eq!(nav.history(), vec![id("menu")]);
    }

    #[test]
    fn test_reshow_visible_element_notifies_again() {
        let mut nav = navigator(Some("menu"));
        let log = recorded(&mut nav);

        nav.show("game");
        nav.show("game");

        assert_eq!(
            *log.borrow(),
            vec![
                StateChange::hidden(id("menu"), Layer::Screen),
                StateChange::shown(id("game"), Layer::Screen),
                StateChange::shown(id("game"), Layer::Screen),
            ]
        );
        assert_eq!(nav.active_in(Layer::Screen), vec![id("game")]);
    }

    #[test]
    fn test_go_back() {
        let mut nav = navigator(None);
        nav.show("menu");
        nav.show("game");

        assert_eq!(nav.go_back(), Some(id("menu")));
        assert!(nav.is_visible("menu"));
        assert!(!nav.is_visible("game"));
        assert!(!nav.has_history());

        // No history, no default
        assert_eq!(nav.go_back(), None);
        assert_eq!(nav.try_go_back(), Err(NavigationError::EmptyHistory));
        assert!(nav.is_visible("menu"));
    }

    #[test]
    fn test_go_back_falls_back_to_default() {
        let mut nav = navigator(Some("menu"));
        nav.show_with("settings", false);

        assert_eq!(nav.go_back(), Some(id("menu")));
        assert_eq!(nav.current_primary_view(), Some(&id("menu")));
        assert!(!nav.is_visible("settings"));
    }

    #[test]
    fn test_go_back_does_not_record_left_view() {
        let mut nav = navigator(Some("menu"));
        nav.show("game");
        nav.show("settings");
        assert_eq!(nav.history(), vec![id("menu"), id("game")]);

        nav.go_back();
        assert_eq!(nav.history(), vec![id("menu")]);
        nav.go_back();
        assert!(nav.history().is_empty());
        assert_eq!(nav.current_primary_view(), Some(&id("menu")));
    }

    #[test]
    fn test_history_top_never_current() {
        let mut nav = navigator(Some("menu"));
        nav.show("game");
        nav.show("menu");
        nav.show_with("game", false);

        assert_ne!(nav.history().last(), nav.current_primary_view());
        assert_eq!(nav.history(), vec![id("menu")]);
    }

    #[test]
    fn test_persistent_primary_not_hidden_on_replace() {
        let mut nav = UiNavigator::default();
        nav.init(
            vec![
                UiElement::new("world", Layer::Screen).persistent(true),
                UiElement::new("map", Layer::Screen),
            ],
            Some(id("world")),
        )
        .unwrap();

        nav.show("map");
        assert!(nav.is_visible("world"));
        assert!(nav.is_visible("map"));
        assert_eq!(nav.current_primary_view(), Some(&id("map")));
        assert_eq!(nav.history(), vec![id("world")]);
    }

    #[test]
    fn test_exclusive_panels() {
        let mut nav = navigator(Some("game"));
        nav.show("chat");
        nav.show("pause");
        nav.show("inventory");

        assert!(!nav.is_visible("pause"));
        assert!(nav.is_visible("inventory"));
        assert!(nav.is_visible("chat"));
        assert!(nav.is_visible("game"));
        assert_eq!(nav.active_in(Layer::Panel), vec![id("chat"), id("inventory")]);
    }

    #[test]
    fn test_persistent_panel_does_not_evict() {
        let mut nav = navigator(Some("game"));
        nav.show("pause");
        nav.show("chat");

        assert!(nav.is_visible("pause"));
        assert!(nav.is_visible("chat"));
    }

    #[test]
    fn test_hide_clears_primary() {
        let mut nav = navigator(Some("menu"));
        let log = recorded(&mut nav);
        assert!(nav.hide("menu"));

        assert!(nav.current_primary_view().is_none());
        assert_eq!(
            *log.borrow(),
            vec![StateChange::hidden(id("menu"), Layer::Screen)]
        );
    }

    #[test]
    fn test_notifications_for_replacement() {
        let mut nav = navigator(Some("menu"));
        nav.show("pause");
        let log = recorded(&mut nav);

        nav.show("game");
        nav.show("inventory");

        assert_eq!(
            *log.borrow(),
            vec![
                StateChange::hidden(id("menu"), Layer::Screen),
                StateChange::shown(id("game"), Layer::Screen),
                StateChange::hidden(id("pause"), Layer::Panel),
                StateChange::shown(id("inventory"), Layer::Panel),
            ]
        );
    }

    #[test]
    fn test_toggle() {
        let mut nav = navigator(Some("menu"));
        assert!(nav.toggle("toast"));
        assert!(nav.is_visible("toast"));
        assert!(nav.toggle("toast"));
        assert!(!nav.is_visible("toast"));
        assert!(!nav.toggle("credits"));
    }

    #[test]
    fn test_hide_all_in_layer() {
        let mut nav = navigator(Some("game"));
        nav.show("inventory");
        nav.show("chat");

        assert_eq!(nav.hide_all_in_layer(Layer::Panel, false), 1);
        assert!(nav.is_visible("chat"));
        assert_eq!(nav.active_in(Layer::Panel), vec![id("chat")]);

        assert_eq!(nav.hide_all_in_layer(Layer::Panel, true), 1);
        assert!(nav.active_in(Layer::Panel).is_empty());
        assert_eq!(nav.hide_all_in_layer(Layer::Debug, true), 0);
    }

    #[test]
    fn test_hide_all() {
        let mut nav = navigator(Some("menu"));
        nav.show("game");
        nav.show("hud");
        nav.show("chat");
        let log = recorded(&mut nav);

        nav.hide_all();

        for element in nav.registry().ids() {
            assert!(!nav.is_visible(&element));
        }
        for layer in Layer::ALL {
            assert!(nav.active_in(layer).is_empty());
        }
        assert!(!nav.has_history());
        assert!(nav.current_primary_view().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_dispose() {
        struct Disposed(Rc<RefCell<Vec<String>>>);
        impl ElementHooks for Disposed {
            fn on_dispose(&mut self, id: &ElementId) {
                self.0.borrow_mut().push(id.to_string());
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut nav = UiNavigator::default();
        nav.init(
            vec![
                UiElement::new("menu", Layer::Screen).with_hooks(Disposed(log.clone())),
                UiElement::new("hud", Layer::Hud).with_hooks(Disposed(log.clone())),
            ],
            Some(id("menu")),
        )
        .unwrap();

        nav.dispose();
        assert_eq!(nav.state(), NavigatorState::Disposed);
        assert_eq!(*log.borrow(), vec!["hud", "menu"]);
        assert!(!nav.show("menu"));

        // Second dispose is a no-op
        nav.dispose();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_history_limit() {
        let mut nav = UiNavigator::new(NavigatorConfig::default().with_history_limit(1));
        nav.init(elements(), Some(id("menu"))).unwrap();
        nav.show("game");
        nav.show("settings");

        assert_eq!(nav.history(), vec![id("game")]);
    }

    #[test]
    fn test_summary() {
        let mut nav = navigator(Some("menu"));
        nav.show("game");
        nav.show("hud");

        let summary = nav.summary();
        assert_eq!(summary.state, NavigatorState::Ready);
        assert_eq!(summary.current_primary, Some(id("game")));
        assert_eq!(summary.history, vec![id("menu")]);
        assert_eq!(summary.active.get(&Layer::Hud), Some(&vec![id("hud")]));
        assert!(!summary.active.contains_key(&Layer::Panel));
        assert_eq!(summary.element_count, 8);
    }
}
