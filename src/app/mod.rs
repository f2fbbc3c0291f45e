//! Screens and the state machine that moves between them

pub mod machine;
pub mod widgets;

pub use machine::{App, Flow, RoundSummary, Screen, ScreenKind};
pub use widgets::{Area, Button, Checkbox, MainMenu, MenuItem, SettingOption, SettingsForm};
