//! Command Scripts
//!
//! A script is a plain text file with one navigator command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! show game
//! show-quiet settings     # show without recording history
//! hide pause
//! toggle inventory
//! back
//! hide-layer panel        # skips persistent panels
//! hide-layer panel all    # includes persistent panels
//! hide-all
//! state                   # print a navigator summary
//! ```

use std::str::FromStr;

use navigator_core::{ElementId, Layer, UiNavigator};
use thiserror::Error;

/// One scripted navigator command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show, recording history
    Show(ElementId),
    /// Show without recording history
    ShowQuiet(ElementId),
    /// Hide
    Hide(ElementId),
    /// Toggle visibility
    Toggle(ElementId),
    /// Go back
    Back,
    /// Hide every active element in a layer
    HideLayer {
        /// Target layer
        layer: Layer,
        /// Include persistent elements
        include_persistent: bool,
    },
    /// Hide everything
    HideAll,
    /// Print a summary
    State,
}

/// Error parsing a script
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    /// What went wrong
    pub message: String,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let single = |args: &[&str]| match args {
            [target] => Ok(ElementId::new(*target)),
            _ => Err(format!("'{verb}' takes exactly one element id")),
        };
        let none = |args: &[&str], command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(format!("'{verb}' takes no arguments"))
            }
        };

        match verb {
            "show" => single(args.as_slice()).map(Command::Show),
            "show-quiet" => single(args.as_slice()).map(Command::ShowQuiet),
            "hide" => single(args.as_slice()).map(Command::Hide),
            "toggle" => single(args.as_slice()).map(Command::Toggle),
            "back" => none(args.as_slice(), Command::Back),
            "hide-all" => none(args.as_slice(), Command::HideAll),
            "state" => none(args.as_slice(), Command::State),
            "hide-layer" => match args.as_slice() {
                [layer] => Ok(Command::HideLayer {
                    layer: layer.parse().map_err(|e| format!("{e}"))?,
                    include_persistent: false,
                }),
                [layer, "all"] => Ok(Command::HideLayer {
                    layer: layer.parse().map_err(|e| format!("{e}"))?,
                    include_persistent: true,
                }),
                _ => Err("usage: hide-layer <layer> [all]".to_string()),
            },
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

impl Command {
    /// Run the command against a navigator
    ///
    /// Returns whether the navigator did something. `State` always succeeds.
    pub fn apply(&self, nav: &mut UiNavigator) -> bool {
        match self {
            Self::Show(id) => nav.show(id),
            Self::ShowQuiet(id) => nav.show_with(id, false),
            Self::Hide(id) => nav.hide(id),
            Self::Toggle(id) => nav.toggle(id),
            Self::Back => nav.go_back().is_some(),
            Self::HideLayer {
                layer,
                include_persistent,
            } => {
                nav.hide_all_in_layer(*layer, *include_persistent);
                true
            }
            Self::HideAll => {
                nav.hide_all();
                true
            }
            Self::State => true,
        }
    }
}

/// Parse a whole script
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((index + 1, line))
        })
        .map(|(line, text)| {
            text.parse()
                .map_err(|message| ScriptError { line, message })
        })
        .collect()
}
