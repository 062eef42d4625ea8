use std::{cell::RefCell, rc::Rc};

use crate::{
  view::ViewNode,
  widget::{IntoWidget, Render},
  widget_tree::WidgetId,
  window::{DiagnosticSink, Window},
};

/// The diagnostic messages a test window captured, in emit order.
pub type DiagnosticRecords = Rc<RefCell<Vec<String>>>;

/// A sink that keeps every message around for assertions, besides logging it.
pub struct RecordSink(DiagnosticRecords);

impl DiagnosticSink for RecordSink {
  fn emit(&self, message: &str) {
    log::info!(target: "tally::diagnostic", "{message}");
    self.0.borrow_mut().push(message.to_string());
  }
}

/// The Window assists in writing unit tests.
pub struct TestWindow(pub Window);

impl TestWindow {
  pub fn new<K: ?Sized>(root: impl IntoWidget<K>) -> Self { Self(Window::new(root)) }

  /// Create a window that records its diagnostic messages, and hand the
  /// records back for assertions.
  pub fn new_with_records<K: ?Sized>(root: impl IntoWidget<K>) -> (Self, DiagnosticRecords) {
    let records: DiagnosticRecords = <_>::default();
    let wnd = Window::with_sink(root, Rc::new(RecordSink(records.clone())));
    (Self(wnd), records)
  }

  /// Use an index path to access the widget tree and return the id there,
  /// `[0, 1]` means the second child of the first child of the root.
  pub fn id_by_path(&self, path: &[usize]) -> WidgetId {
    let tree = self.0.tree();
    let mut node = tree.root();
    for (level, idx) in path.iter().enumerate() {
      node = node.children(&tree).nth(*idx).unwrap_or_else(|| {
        panic!("node no exist: {:?}", &path[0..level]);
      });
    }
    node
  }
}

impl std::ops::Deref for TestWindow {
  type Target = Window;

  fn deref(&self) -> &Self::Target { &self.0 }
}

/// A widget that accepts any number of children, for tests needing a plain
/// container.
#[derive(Clone, Copy, Default)]
pub struct MockMulti;

impl Render for MockMulti {
  fn render(&self) -> ViewNode { ViewNode::new(&["mock-multi"]) }
}

/// A widget showing its string, for tests asserting on frame text.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct MockLabel(pub String);

impl Render for MockLabel {
  fn render(&self) -> ViewNode { ViewNode::new(&["mock-label"]).with_text(self.0.clone()) }
}
