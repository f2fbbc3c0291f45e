//! Unit Circle Snake - a snake game for drilling trigonometric values
//!
//! The snake must eat the food labelled with the value of the question shown
//! above the board, e.g. `sin(4π/3)`, while steering clear of wrong answers.
//!
//! This library provides:
//! - Core game logic: trigonometry tables, question and food generation, movement (game module)
//! - Screens and the state machine between them (app module)
//! - Math typesetting, render caching and drawing primitives (render module)
//! - Terminal input translation (input module)
//! - Session statistics (metrics module)
//! - Execution modes: interactive play and headless simulation (modes module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
