use std::{cell::RefCell, rc::Rc};

use smallvec::SmallVec;

use crate::{widget_tree::WidgetId, window::Diagnostics};

pub(crate) mod dispatcher;

bitflags::bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct ListenFlags: u8 {
    const POINTER_DOWN = 1 << 0;
    const POINTER_UP = 1 << 1;
    const TAP = 1 << 2;
  }
}

/// The part shared by every ui event: where it was dispatched, where it
/// currently bubbles, and whether bubbling goes on.
pub struct EventCommon {
  pub(crate) target: WidgetId,
  pub(crate) id: WidgetId,
  pub(crate) propagation: bool,
  pub(crate) diagnostics: Diagnostics,
}

impl EventCommon {
  pub(crate) fn new(target: WidgetId, diagnostics: Diagnostics) -> Self {
    Self { target, id: target, propagation: true, diagnostics }
  }

  /// The target property of the Event interface is a reference to the object
  /// onto which the event was dispatched. It is different from
  /// Event::current_target when the event handler is called during the
  /// bubbling phase of the event.
  #[inline]
  pub fn target(&self) -> WidgetId { self.target }

  /// A reference to the currently registered target for the event. This is
  /// the object to which the event is currently slated to be sent.
  #[inline]
  pub fn current_target(&self) -> WidgetId { self.id }

  /// Prevent event bubbling to parent.
  #[inline]
  pub fn stop_propagation(&mut self) { self.propagation = false }

  /// Whether the event is bubbling or not.
  #[inline]
  pub fn is_propagation(&self) -> bool { self.propagation }

  /// Emit a message on the diagnostic channel of the hosting window.
  #[inline]
  pub fn diagnostic(&self, message: &str) { self.diagnostics.emit(message) }
}

pub struct PointerEvent {
  pub(crate) common: EventCommon,
}

impl PointerEvent {
  pub(crate) fn new(target: WidgetId, diagnostics: Diagnostics) -> Self {
    Self { common: EventCommon::new(target, diagnostics) }
  }
}

impl std::ops::Deref for PointerEvent {
  type Target = EventCommon;
  #[inline]
  fn deref(&self) -> &Self::Target { &self.common }
}

impl std::ops::DerefMut for PointerEvent {
  #[inline]
  fn deref_mut(&mut self) -> &mut Self::Target { &mut self.common }
}

pub(crate) type BoxHandler = Box<dyn FnMut(&mut PointerEvent)>;

/// An ordered list of handlers for one event kind on one widget. Handlers run
/// in subscribe order; halting propagation never skips handlers already
/// registered on the same widget, only the ancestors.
#[derive(Clone, Default)]
pub(crate) struct EventSubject(Rc<RefCell<SmallVec<[BoxHandler; 1]>>>);

impl EventSubject {
  pub(crate) fn subscribe(&self, handler: impl FnMut(&mut PointerEvent) + 'static) {
    self.0.borrow_mut().push(Box::new(handler));
  }

  pub(crate) fn dispatch(&self, event: &mut PointerEvent) {
    for handler in self.0.borrow_mut().iter_mut() {
      handler(event);
    }
  }
}

/// The listener table of a widget, one subject per subscribed event kind.
#[derive(Default)]
pub(crate) struct Listeners {
  flags: ListenFlags,
  pointer_down: EventSubject,
  pointer_up: EventSubject,
  tap: EventSubject,
}

impl Listeners {
  pub(crate) fn add(
    &mut self, kind: ListenFlags, handler: impl FnMut(&mut PointerEvent) + 'static,
  ) {
    self.flags |= kind;
    self.subject(kind).subscribe(handler);
  }

  pub(crate) fn subject_of(&self, kind: ListenFlags) -> Option<EventSubject> {
    self
      .flags
      .contains(kind)
      .then(|| self.subject(kind).clone())
  }

  pub(crate) fn flags(&self) -> ListenFlags { self.flags }

  fn subject(&self, kind: ListenFlags) -> &EventSubject {
    if kind == ListenFlags::POINTER_DOWN {
      &self.pointer_down
    } else if kind == ListenFlags::POINTER_UP {
      &self.pointer_up
    } else {
      &self.tap
    }
  }
}
