//! Presentation layer
//!
//! Controllers return a [`View`] or a [`SeeOther`] redirect; [`render_views`]
//! renders views through the configured [`Renderer`].

pub mod cookies;
pub mod flash;
pub mod render;
pub mod view;

pub use flash::{Flash, Level};
pub use render::{JsonRenderer, Rendered, Renderer, render_views};
pub use view::{SeeOther, View};
