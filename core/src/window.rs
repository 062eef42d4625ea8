use std::{
  cell::{Ref, RefCell},
  rc::Rc,
};

use crate::{
  events::dispatcher::Dispatcher,
  view::Frame,
  widget::IntoWidget,
  widget_tree::{DirtyMarker, WidgetId, WidgetTree},
};

/// Receiver of the diagnostic messages widgets emit from their event
/// handlers.
pub trait DiagnosticSink {
  fn emit(&self, message: &str);
}

/// The default sink, forwarding every message to the log facade.
pub struct LogSink;

impl DiagnosticSink for LogSink {
  fn emit(&self, message: &str) { log::info!(target: "tally::diagnostic", "{message}"); }
}

/// Shared handle to the diagnostic sink of a window, cheap to clone into
/// events.
#[derive(Clone)]
pub struct Diagnostics(Rc<dyn DiagnosticSink>);

impl Diagnostics {
  pub(crate) fn new(sink: Rc<dyn DiagnosticSink>) -> Self { Self(sink) }

  pub fn emit(&self, message: &str) { self.0.emit(message); }
}

/// The raw input a window accepts from its shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
  PointerDown { target: WidgetId },
  PointerUp { target: WidgetId },
}

/// Window is the root to represent: it owns the widget tree, routes ui events
/// into it and turns it into frames on demand.
pub struct Window {
  tree: RefCell<WidgetTree>,
  dispatcher: RefCell<Dispatcher>,
  diagnostics: Diagnostics,
  last_frame: RefCell<Option<Frame>>,
}

impl Window {
  pub fn new<K: ?Sized>(root: impl IntoWidget<K>) -> Self {
    Self::with_sink(root, Rc::new(LogSink))
  }

  /// Build a window whose diagnostic messages go to `sink` instead of the
  /// log facade.
  pub fn with_sink<K: ?Sized>(root: impl IntoWidget<K>, sink: Rc<dyn DiagnosticSink>) -> Self {
    let (tree, hooks) = WidgetTree::inflate(root.into_widget());
    let wnd = Self {
      tree: RefCell::new(tree),
      dispatcher: RefCell::new(<_>::default()),
      diagnostics: Diagnostics::new(sink),
      last_frame: RefCell::new(None),
    };
    for (id, hook) in hooks {
      hook(&wnd, id);
    }
    wnd
  }

  pub fn root(&self) -> WidgetId { self.tree.borrow().root() }

  /// processes a raw event from the shell of this window
  pub fn process_event(&self, event: UiEvent) {
    log::info!("dispatch ui event {event:?}");
    self.dispatcher.borrow_mut().dispatch(event, self);
  }

  /// Shorthand for a full press-release pair on one widget.
  pub fn tap(&self, target: WidgetId) {
    self.process_event(UiEvent::PointerDown { target });
    self.process_event(UiEvent::PointerUp { target });
  }

  pub fn need_draw(&self) -> bool {
    self.last_frame.borrow().is_none() || self.tree.borrow().dirty.is_dirty()
  }

  /// Describe what the current tree represents, rebuilding only when some
  /// widget changed since the last call.
  pub fn draw_frame(&self) -> Frame {
    let mut cache = self.last_frame.borrow_mut();
    match &*cache {
      Some(frame) if !self.tree.borrow().dirty.is_dirty() => frame.clone(),
      _ => {
        let tree = self.tree.borrow();
        let frame = tree.draw();
        tree.dirty.clear();
        *cache = Some(frame.clone());
        frame
      }
    }
  }

  /// Drop the subtree rooted at `id` from this window.
  pub fn remove_subtree(&self, id: WidgetId) {
    self.tree.borrow_mut().remove_subtree(id);
    // the cached frame may still describe the removed widgets.
    self.last_frame.borrow_mut().take();
  }

  pub(crate) fn tree(&self) -> Ref<'_, WidgetTree> { self.tree.borrow() }

  pub(crate) fn diagnostics(&self) -> Diagnostics { self.diagnostics.clone() }

  pub(crate) fn dirty_marker(&self) -> DirtyMarker { self.tree.borrow().dirty.clone() }
}

#[cfg(test)]
mod tests {
  use crate::{
    state::Stateful,
    test_helper::{MockLabel, MockMulti, TestWindow},
    widget::{IntoWidget, Void},
  };

  #[test]
  fn dirty_redraw() {
    let label = Stateful::new(MockLabel("a".into()));
    let wnd = TestWindow::new(label.clone_writer());

    let frame = wnd.draw_frame();
    assert_eq!(frame.root.text(), Some("a"));
    assert!(!wnd.need_draw());

    label.write().0 = "b".into();
    assert!(wnd.need_draw());
    let frame = wnd.draw_frame();
    assert_eq!(frame.root.text(), Some("b"));
  }

  #[test]
  fn silent_not_redraw() {
    let label = Stateful::new(MockLabel("a".into()));
    let wnd = TestWindow::new(label.clone_writer());

    wnd.draw_frame();
    label.silent().0 = "b".into();
    assert!(!wnd.need_draw());
    // the cached frame still shows the old text.
    assert_eq!(wnd.draw_frame().root.text(), Some("a"));
  }

  #[test]
  fn remove_subtree_drops() {
    let wnd = TestWindow::new(
      MockMulti
        .into_widget()
        .with_child(MockLabel("a".into()))
        .with_child(MockLabel("b".into())),
    );
    assert_eq!(wnd.draw_frame().root.children.len(), 2);

    let a = wnd.id_by_path(&[0]);
    wnd.remove_subtree(a);
    assert_eq!(wnd.draw_frame().root.children.len(), 1);

    // events on the removed widget are ignored, not a panic.
    wnd.tap(a);
  }

  #[test]
  fn record_sink_captures() {
    let (wnd, records) = TestWindow::new_with_records(Void.into_widget().on_tap(|e| {
      e.diagnostic("hi");
    }));

    wnd.tap(wnd.root());
    assert_eq!(*records.borrow(), ["hi"]);
  }
}
