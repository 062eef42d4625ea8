use smallvec::SmallVec;

use crate::widget_tree::WidgetId;

/// The shallow view of one widget: the class names hooking the external
/// presentation layer and an optional text label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewNode {
  classes: SmallVec<[&'static str; 2]>,
  text: Option<String>,
}

impl ViewNode {
  pub fn new(classes: &[&'static str]) -> Self {
    ViewNode { classes: SmallVec::from_slice(classes), text: None }
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn classes(&self) -> &[&'static str] { &self.classes }

  pub fn text(&self) -> Option<&str> { self.text.as_deref() }

  pub fn has_class(&self, class: &str) -> bool { self.classes.iter().any(|c| *c == class) }
}

/// One rendered element of a frame: the widget it belongs to, its shallow
/// view and its rendered children.
#[derive(Clone, Debug)]
pub struct Element {
  pub id: WidgetId,
  pub view: ViewNode,
  pub children: Vec<Element>,
}

impl Element {
  /// Depth first search of the first element carrying `class`, self included.
  pub fn find_by_class(&self, class: &str) -> Option<&Element> {
    if self.view.has_class(class) {
      return Some(self);
    }
    self
      .children
      .iter()
      .find_map(|c| c.find_by_class(class))
  }

  pub fn text(&self) -> Option<&str> { self.view.text() }
}

/// A complete description of the window content, produced by
/// [`Window::draw_frame`](crate::window::Window::draw_frame).
#[derive(Clone, Debug)]
pub struct Frame {
  pub root: Element,
}

impl Frame {
  pub fn find_by_class(&self, class: &str) -> Option<&Element> { self.root.find_by_class(class) }
}
