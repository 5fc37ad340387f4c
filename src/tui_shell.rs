use anyhow::Result;

mod console;
mod registry;
mod time_utils;
mod view;
mod views;

pub use console::Console;
pub use registry::{FrameBuilder, ViewRegistry};
pub use view::{FrameView, Navigator, RenderCtx, StatusKind, StatusLine};

use crate::config::ShellConfig;

pub fn run(config: ShellConfig) -> Result<()> {
    console::run(config)
}
