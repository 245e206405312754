pub mod config;
pub mod console;
pub mod controller;
pub mod logging;
pub mod parser;
pub mod render;
pub mod serve;

pub use render::{render, render_with, RenderOptions};
