//! Tally is a tiny counting ui: a clickable counter widget, a wrapper that
//! drives the counter it frames, and the event plumbing between them.
//!
//! # Example
//!
//! ```
//! use tally::prelude::*;
//!
//! let counter = Stateful::new(Counter::default());
//! let wnd = Window::new(WrapCounter::wrapping(counter.clone_writer()));
//!
//! // a tap on the wrapper frame raises the counter it drives.
//! wnd.tap(wnd.root());
//! assert_eq!(counter.read().value(), 1);
//!
//! let frame = wnd.draw_frame();
//! assert_eq!(frame.find_by_class("counter").and_then(|e| e.text()), Some("1"));
//! ```
pub use tally_core as core;
#[cfg(feature = "widgets")]
pub use tally_widgets as widgets;

pub mod prelude {
  pub use tally_core::prelude::*;

  #[cfg(feature = "widgets")]
  pub use super::widgets::prelude::*;
}
