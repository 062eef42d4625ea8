use std::{cell::RefCell, collections::HashSet, rc::Rc};

use indextree::Arena;

pub mod widget_id;
pub use widget_id::WidgetId;

use crate::{
  events::Listeners,
  view::{Element, Frame},
  widget::{MountHook, Render, Widget},
};

/// One node of the widget tree: the render object of the element and the
/// explicit listener table attached on it.
pub(crate) struct WidgetNode {
  pub(crate) render: Box<dyn Render>,
  pub(crate) listeners: Listeners,
}

/// Tracks the widgets whose state changed since the last drawn frame, shared
/// between the tree and the state subscriptions marking into it.
#[derive(Clone, Default)]
pub(crate) struct DirtyMarker(Rc<RefCell<HashSet<WidgetId, ahash::RandomState>>>);

impl DirtyMarker {
  pub(crate) fn mark(&self, id: WidgetId) { self.0.borrow_mut().insert(id); }

  pub(crate) fn unmark(&self, id: WidgetId) { self.0.borrow_mut().remove(&id); }

  pub(crate) fn is_dirty(&self) -> bool { !self.0.borrow().is_empty() }

  pub(crate) fn clear(&self) { self.0.borrow_mut().clear(); }
}

pub struct WidgetTree {
  pub(crate) arena: Arena<WidgetNode>,
  root: WidgetId,
  pub(crate) dirty: DirtyMarker,
}

impl WidgetTree {
  /// Build the tree from a widget recipe, returning the tree and the mount
  /// hooks to run once the hosting window is ready.
  pub(crate) fn inflate(widget: Widget) -> (Self, Vec<(WidgetId, MountHook)>) {
    let mut arena = Arena::new();
    let mut hooks = vec![];
    let root = inflate_node(widget, None, &mut arena, &mut hooks);
    (WidgetTree { arena, root, dirty: <_>::default() }, hooks)
  }

  pub fn root(&self) -> WidgetId { self.root }

  /// Render the whole tree into a frame description.
  pub(crate) fn draw(&self) -> Frame { Frame { root: self.draw_element(self.root) } }

  pub(crate) fn draw_element(&self, id: WidgetId) -> Element {
    let node = id.assert_get(self);
    Element {
      id,
      view: node.render.render(),
      children: id
        .children(self)
        .map(|c| self.draw_element(c))
        .collect(),
    }
  }

  /// Remove the subtree rooted at `id`, dropping its nodes and purging their
  /// dirty marks. The tree root cannot be removed.
  pub(crate) fn remove_subtree(&mut self, id: WidgetId) {
    if id == self.root {
      log::warn!("ignore removing the tree root {id:?}");
      return;
    }
    if id.is_dropped(self) {
      return;
    }

    let descendants = id.descendants(self).collect::<Vec<_>>();
    for w in descendants {
      self.dirty.unmark(w);
    }
    id.0.remove_subtree(&mut self.arena);
  }
}

fn inflate_node(
  widget: Widget, parent: Option<WidgetId>, arena: &mut Arena<WidgetNode>,
  hooks: &mut Vec<(WidgetId, MountHook)>,
) -> WidgetId {
  let Widget { render, listeners, children, mounted } = widget;
  let id = WidgetId(arena.new_node(WidgetNode { render, listeners }));
  if let Some(p) = parent {
    p.0.append(id.0, arena);
  }
  for hook in mounted {
    hooks.push((id, hook));
  }
  for child in children {
    inflate_node(child, Some(id), arena, hooks);
  }
  id
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::widget::{IntoWidget, Void};

  fn three_level_tree() -> WidgetTree {
    // root -> [a, b -> [c]]
    let (tree, _) = WidgetTree::inflate(
      Void
        .into_widget()
        .with_child(Void)
        .with_child(Void.into_widget().with_child(Void)),
    );
    tree
  }

  #[test]
  fn inflate_shape() {
    let tree = three_level_tree();
    let root = tree.root();
    assert_eq!(root.children(&tree).count(), 2);
    let b = root.children(&tree).nth(1).unwrap();
    assert_eq!(b.children(&tree).count(), 1);
    let c = b.children(&tree).next().unwrap();
    assert_eq!(c.parent(&tree), Some(b));
  }

  #[test]
  fn lowest_common_ancestor() {
    let tree = three_level_tree();
    let root = tree.root();
    let a = root.children(&tree).next().unwrap();
    let b = root.children(&tree).nth(1).unwrap();
    let c = b.children(&tree).next().unwrap();

    assert_eq!(a.lowest_common_ancestor(c, &tree), Some(root));
    assert_eq!(b.lowest_common_ancestor(c, &tree), Some(b));
    assert_eq!(c.lowest_common_ancestor(c, &tree), Some(c));
  }

  #[test]
  fn remove_subtree_purges_dirty() {
    let mut tree = three_level_tree();
    let b = tree.root().children(&tree).nth(1).unwrap();
    let c = b.children(&tree).next().unwrap();

    tree.dirty.mark(c);
    assert!(tree.dirty.is_dirty());

    tree.remove_subtree(b);
    assert!(b.is_dropped(&tree));
    assert!(c.is_dropped(&tree));
    assert!(!tree.dirty.is_dirty());
    assert_eq!(tree.root().children(&tree).count(), 1);
  }

  #[test]
  fn root_not_removable() {
    let mut tree = three_level_tree();
    let root = tree.root();
    tree.remove_subtree(root);
    assert!(!root.is_dropped(&tree));
  }
}
