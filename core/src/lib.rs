//! The core of tally: a small retained widget tree with observable state,
//! explicit per-widget listener lists and frame descriptions that tests can
//! assert on.

pub mod events;
pub mod state;
#[cfg(feature = "test-utils")]
pub mod test_helper;
pub mod view;
pub mod widget;
pub mod widget_tree;
pub mod window;

pub mod prelude {
  pub use rxrust::prelude::*;

  pub use crate::{
    events::{EventCommon, ListenFlags, PointerEvent},
    state::{ModifyScope, Notifier, ReadRef, Reader, Stateful, WriteRef},
    view::{Element, Frame, ViewNode},
    widget::{Compose, ComposeChild, IntoWidget, Render, Void, Widget},
    widget_tree::{WidgetId, WidgetTree},
    window::{DiagnosticSink, Diagnostics, LogSink, UiEvent, Window},
  };
}
