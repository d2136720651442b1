//! Navigator Core - Headless Layered UI Navigation
//!
//! This crate decides which interface elements are visible, keeps a
//! back-stack of primary views, and enforces exclusivity between elements
//! sharing a layer. It knows nothing about how elements are drawn: hosts hand
//! it elements with hooks, drive it by element identity, and listen for
//! visibility changes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Host (UI / event loop)                   │
//! │   button handlers ──► show / hide / go_back / hide_layer     │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼──────────────────────────────┐
//! │                         UiNavigator                          │
//! │  ┌───────────────┐  ┌───────────────────┐  ┌──────────────┐  │
//! │  │ LayerRegistry │  │ NavigationHistory │  │ StateChange  │  │
//! │  │ (elements +   │  │ (prior primary    │  │ Channel      │──┼──► listeners
//! │  │  active lists)│  │  views, LIFO)     │  │              │  │
//! │  └───────┬───────┘  └───────────────────┘  └──────────────┘  │
//! └──────────┼───────────────────────────────────────────────────┘
//!            │ on_show / on_hide
//!     ┌──────▼──────┐
//!     │  UiElement  │ ──► ElementHooks (host rendering)
//!     └─────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use navigator_core::{ElementId, Layer, NavigatorConfig, UiElement, UiNavigator};
//!
//! let mut nav = UiNavigator::new(NavigatorConfig::default());
//! nav.init(
//!     vec![
//!         UiElement::new("menu", Layer::Screen),
//!         UiElement::new("game", Layer::Screen),
//!         UiElement::new("hud", Layer::Hud).persistent(true),
//!     ],
//!     Some(ElementId::new("menu")),
//! )
//! .unwrap();
//!
//! nav.show("game");
//! assert!(nav.has_history());
//! assert_eq!(nav.go_back(), Some(ElementId::new("menu")));
//! ```
//!
//! # Module Overview
//!
//! - [`element`]: element identity, layers, visibility and host hooks
//! - [`layers`]: registry of elements and per-layer active lists
//! - [`history`]: back-stack of primary views
//! - [`navigator`]: the controller and its state machine
//! - [`events`]: state change notifications
//! - [`config`]: TOML configuration loading
//! - [`error`]: navigation error taxonomy
//!
//! # Threading
//!
//! Everything runs synchronously on the caller's thread. The navigator takes
//! `&mut self` for every command, so there is no internal locking.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod element;
pub mod error;
pub mod events;
pub mod history;
pub mod layers;
pub mod navigator;

// Re-exports for convenience
pub use config::{
    default_config_path, load_config, load_config_from_path, parse_config, ConfigError,
    ConfigOverrides, ConfigSource, ElementToml, NavigatorConfig, NavigatorConfigFile,
};
pub use element::{ElementHooks, ElementId, Layer, NoopHooks, ParseLayerError, UiElement, Visibility};
pub use error::NavigationError;
pub use events::{EmitResult, StateChange, StateChangeChannel, SubscriptionId};
pub use history::NavigationHistory;
pub use layers::LayerRegistry;
pub use navigator::{InitReport, NavigatorState, NavigatorSummary, UiNavigator};
