use std::convert::Infallible;

use rxrust::{ops::box_it::CloneableBoxOp, prelude::*};
use smallvec::SmallVec;

use crate::{
  events::{ListenFlags, Listeners, PointerEvent},
  state::{ModifyScope, Stateful},
  view::ViewNode,
  widget_tree::WidgetId,
  window::Window,
};

/// Render widget is the base building block of the widget tree, it produces
/// the shallow view of one element each time the tree draws.
pub trait Render: 'static {
  fn render(&self) -> ViewNode;
}

/// Trait to compose a stateful object into a widget together with its
/// interaction wiring.
pub trait Compose: 'static {
  fn compose(this: Stateful<Self>) -> Widget
  where
    Self: Sized;
}

/// Trait to compose a widget around child content supplied by the caller.
pub trait ComposeChild: Sized + 'static {
  type Child;

  fn compose_child(this: Stateful<Self>, child: Self::Child) -> Widget;
}

pub(crate) type MountHook = Box<dyn FnOnce(&Window, WidgetId)>;

/// The build recipe of a widget subtree: the render object of its host
/// element, the listeners attached on it, the hooks to run when it mounts and
/// its child recipes.
pub struct Widget {
  pub(crate) render: Box<dyn Render>,
  pub(crate) listeners: Listeners,
  pub(crate) children: Vec<Widget>,
  pub(crate) mounted: SmallVec<[MountHook; 1]>,
}

macro_rules! impl_listener_api {
  ($($(#[$outer:meta])* $name:ident => $flag:ident),* $(,)?) => {
    paste::paste! {
      $(
        $(#[$outer])*
        pub fn [<on_ $name>](mut self, handler: impl FnMut(&mut PointerEvent) + 'static) -> Self {
          self.listeners.add(ListenFlags::$flag, handler);
          self
        }
      )*
    }
  };
}

impl Widget {
  pub fn from_render(render: impl Render) -> Self {
    Widget {
      render: Box::new(render),
      listeners: <_>::default(),
      children: vec![],
      mounted: <_>::default(),
    }
  }

  /// Append `child` as the last child of this widget.
  pub fn with_child<K: ?Sized>(mut self, child: impl IntoWidget<K>) -> Self {
    self.children.push(child.into_widget());
    self
  }

  /// Run `hook` once this widget is mounted into a window's tree.
  pub fn on_mounted(mut self, hook: impl FnOnce(&Window, WidgetId) + 'static) -> Self {
    self.mounted.push(Box::new(hook));
    self
  }

  /// Mark this widget dirty whenever `modifies` emits a framework scope, so
  /// the next frame renders it with fresh state.
  pub fn update_on(self, modifies: CloneableBoxOp<'static, ModifyScope, Infallible>) -> Self {
    self.on_mounted(move |wnd, id| {
      let dirty = wnd.dirty_marker();
      modifies
        .filter(|s| s.contains(ModifyScope::FRAMEWORK))
        .subscribe(move |_| dirty.mark(id));
    })
  }

  impl_listener_api! {
    /// Attach a handler for the tap (click) gesture on this widget.
    tap => TAP,
    /// Attach a handler called when a pointer is pressed on this widget.
    pointer_down => POINTER_DOWN,
    /// Attach a handler called when a pointer is released on this widget.
    pointer_up => POINTER_UP,
  }
}

/// A widget that renders an empty element, useful wherever a widget slot
/// needs a placeholder.
pub struct Void;

impl Render for Void {
  fn render(&self) -> ViewNode { ViewNode::default() }
}

/// The render proxy of a stateful object, reading the fresh state each draw.
struct StateRender<R>(Stateful<R>);

impl<R: Render> Render for StateRender<R> {
  fn render(&self) -> ViewNode { self.0.read().render() }
}

/// Convert a value into a widget build recipe. The `K` marker keeps the
/// conversions of render objects, composable objects and their stateful
/// wrappers apart from each other.
pub trait IntoWidget<K: ?Sized> {
  fn into_widget(self) -> Widget;
}

impl IntoWidget<Widget> for Widget {
  fn into_widget(self) -> Widget { self }
}

impl<R: Render> IntoWidget<dyn Render> for R {
  fn into_widget(self) -> Widget { Widget::from_render(self) }
}

impl<C: Compose> IntoWidget<dyn Compose> for C {
  fn into_widget(self) -> Widget { Compose::compose(Stateful::new(self)) }
}

impl<'a, R: Render> IntoWidget<&'a dyn Render> for Stateful<R> {
  fn into_widget(self) -> Widget {
    let modifies = self.raw_modifies();
    Widget::from_render(StateRender(self)).update_on(modifies)
  }
}

impl<'a, C: Compose> IntoWidget<&'a dyn Compose> for Stateful<C> {
  fn into_widget(self) -> Widget { Compose::compose(self) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recipe_accumulates() {
    let w = Void
      .into_widget()
      .on_tap(|_| {})
      .on_pointer_down(|_| {})
      .with_child(Void)
      .with_child(Void.into_widget().with_child(Void));

    assert_eq!(w.children.len(), 2);
    assert_eq!(w.children[1].children.len(), 1);
    assert!(
      w.listeners
        .flags()
        .contains(ListenFlags::TAP | ListenFlags::POINTER_DOWN)
    );
    assert!(!w.listeners.flags().contains(ListenFlags::POINTER_UP));
  }

  #[test]
  fn stateful_render_reads_fresh_state() {
    struct Label(String);
    impl Render for Label {
      fn render(&self) -> ViewNode { ViewNode::new(&["label"]).with_text(self.0.clone()) }
    }

    let label = Stateful::new(Label("a".into()));
    let proxy = StateRender(label.clone_writer());
    assert_eq!(proxy.render().text(), Some("a"));
    label.write().0 = "b".into();
    assert_eq!(proxy.render().text(), Some("b"));
  }
}
