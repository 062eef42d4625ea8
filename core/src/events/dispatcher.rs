use crate::{
  events::{EventSubject, ListenFlags, PointerEvent},
  widget_tree::WidgetId,
  window::{UiEvent, Window},
};

/// Routes ui events into the widget tree and synthesizes taps from
/// pointer-down/pointer-up pairs.
#[derive(Default)]
pub(crate) struct Dispatcher {
  pointer_down_uid: Option<WidgetId>,
}

impl Dispatcher {
  pub(crate) fn dispatch(&mut self, event: UiEvent, wnd: &Window) {
    match event {
      UiEvent::PointerDown { target } => {
        if target.is_dropped(&wnd.tree()) {
          log::debug!("pointer event on a removed widget {target:?}, ignored");
          return;
        }
        self.pointer_down_uid = Some(target);
        bubble_event(wnd, target, ListenFlags::POINTER_DOWN);
      }
      UiEvent::PointerUp { target } => {
        if target.is_dropped(&wnd.tree()) {
          log::debug!("pointer event on a removed widget {target:?}, ignored");
          self.pointer_down_uid = None;
          return;
        }
        bubble_event(wnd, target, ListenFlags::POINTER_UP);

        if let Some(down) = self.pointer_down_uid.take() {
          let tap_on = down.lowest_common_ancestor(target, &wnd.tree());
          if let Some(tap_on) = tap_on {
            bubble_event(wnd, tap_on, ListenFlags::TAP);
          }
        }
      }
    }
  }
}

/// Bubble one event kind from `target` up to the tree root, until a handler
/// halts the propagation.
fn bubble_event(wnd: &Window, target: WidgetId, kind: ListenFlags) {
  // snapshot the bubbling chain so handlers are free to borrow the tree.
  let chain: Vec<(WidgetId, EventSubject)> = {
    let tree = wnd.tree();
    target
      .ancestors(&tree)
      .filter_map(|id| {
        id.assert_get(&tree)
          .listeners
          .subject_of(kind)
          .map(|subject| (id, subject))
      })
      .collect()
  };
  if chain.is_empty() {
    return;
  }

  let mut event = PointerEvent::new(target, wnd.diagnostics());
  for (id, subject) in chain {
    // a handler may have removed this part of the chain meanwhile.
    if id.is_dropped(&wnd.tree()) {
      continue;
    }
    event.common.id = id;
    subject.dispatch(&mut event);
    if !event.is_propagation() {
      log::debug!("{kind:?} propagation halted at {id:?}");
      break;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::{
    test_helper::TestWindow,
    widget::{IntoWidget, Void},
    window::UiEvent,
  };

  #[test]
  fn bubble_inner_first() {
    let log = Rc::new(RefCell::new(vec![]));
    let l1 = log.clone();
    let l2 = log.clone();
    let wnd = TestWindow::new(
      Void
        .into_widget()
        .on_tap(move |_| l1.borrow_mut().push("outer"))
        .with_child(
          Void
            .into_widget()
            .on_tap(move |_| l2.borrow_mut().push("inner")),
        ),
    );

    let inner = wnd.id_by_path(&[0]);
    wnd.tap(inner);
    assert_eq!(*log.borrow(), ["inner", "outer"]);
  }

  #[test]
  fn cancel_bubble() {
    let log = Rc::new(RefCell::new(vec![]));
    let l1 = log.clone();
    let l2 = log.clone();
    let wnd = TestWindow::new(
      Void
        .into_widget()
        .on_tap(move |_| l1.borrow_mut().push("outer"))
        .with_child(Void.into_widget().on_tap(move |e| {
          e.stop_propagation();
          l2.borrow_mut().push("inner");
        })),
    );

    let inner = wnd.id_by_path(&[0]);
    wnd.tap(inner);
    assert_eq!(*log.borrow(), ["inner"]);
  }

  #[test]
  fn tap_on_common_ancestor() {
    let log = Rc::new(RefCell::new(vec![]));
    let l1 = log.clone();
    let l2 = log.clone();
    let l3 = log.clone();
    let wnd = TestWindow::new(
      Void
        .into_widget()
        .on_tap(move |_| l1.borrow_mut().push("parent"))
        .with_child(Void.into_widget().on_tap(move |_| l2.borrow_mut().push("a")))
        .with_child(Void.into_widget().on_tap(move |_| l3.borrow_mut().push("b"))),
    );

    let a = wnd.id_by_path(&[0]);
    let b = wnd.id_by_path(&[1]);
    wnd.process_event(UiEvent::PointerDown { target: a });
    wnd.process_event(UiEvent::PointerUp { target: b });
    // press on one child, release on the other: only the shared parent taps.
    assert_eq!(*log.borrow(), ["parent"]);
  }

  #[test]
  fn up_without_down_no_tap() {
    let log = Rc::new(RefCell::new(vec![]));
    let l1 = log.clone();
    let wnd = TestWindow::new(
      Void
        .into_widget()
        .on_tap(move |_| l1.borrow_mut().push("tap")),
    );

    wnd.process_event(UiEvent::PointerUp { target: wnd.root() });
    assert!(log.borrow().is_empty());
  }
}
