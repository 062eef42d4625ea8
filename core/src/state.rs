use std::{
  cell::{Cell, Ref, RefCell, RefMut},
  convert::Infallible,
  ops::{Deref, DerefMut},
  rc::Rc,
};

use bitflags::bitflags;
use rxrust::{ops::box_it::CloneableBoxOp, prelude::*};

/// Stateful object use to watch the modifies of the inner data.
pub struct Stateful<W> {
  data: Rc<RefCell<W>>,
  info: Rc<WriterInfo>,
}

/// A read-only handle sharing the same data with the writers it was cloned
/// from, it can never trigger a notification.
pub struct Reader<W>(Rc<RefCell<W>>);

/// The notifier is a `RxRust` stream that emit notification when the state
/// changed.
#[derive(Default, Clone)]
pub struct Notifier(Subject<'static, ModifyScope, Infallible>);

bitflags! {
  #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
  pub struct ModifyScope: u8 {
    /// state change only effect the data, transparent to the framework.
    const DATA = 1 << 0;
    /// state change only effect the framework.
    const FRAMEWORK = 1 << 1;
    /// state change effect both the data and the framework.
    const BOTH = Self::DATA.bits() | Self::FRAMEWORK.bits();
  }
}

pub(crate) struct WriterInfo {
  pub(crate) notifier: Notifier,
  /// The count of writers that may modify the data.
  pub(crate) writer_count: Cell<usize>,
}

impl<W: 'static> Stateful<W> {
  pub fn new(data: W) -> Self {
    Stateful { data: Rc::new(RefCell::new(data)), info: Rc::new(WriterInfo::new()) }
  }

  /// Return a read reference of the inner data.
  pub fn read(&self) -> ReadRef<'_, W> { ReadRef(self.data.borrow()) }

  /// Return a write reference of the inner data; when it drops with a modify
  /// recorded, both data and framework subscribers are notified.
  pub fn write(&self) -> WriteRef<'_, W> { self.write_ref(ModifyScope::BOTH) }

  /// Return a write reference that modifies the data without notifying the
  /// framework, so no re-render is triggered.
  pub fn silent(&self) -> WriteRef<'_, W> { self.write_ref(ModifyScope::DATA) }

  pub fn clone_writer(&self) -> Stateful<W> {
    self.info.inc_writer();
    Stateful { data: self.data.clone(), info: self.info.clone() }
  }

  pub fn clone_reader(&self) -> Reader<W> { Reader(self.data.clone()) }

  /// A stream of every modify applied through any writer of this state.
  pub fn raw_modifies(&self) -> CloneableBoxOp<'static, ModifyScope, Infallible> {
    self.info.notifier.raw_modifies()
  }

  /// A stream of the data modifies, framework-only scopes are filtered out.
  pub fn modifies(&self) -> CloneableBoxOp<'static, ModifyScope, Infallible> {
    self
      .raw_modifies()
      .filter(|s| s.contains(ModifyScope::DATA))
      .box_it()
  }

  fn write_ref(&self, scope: ModifyScope) -> WriteRef<'_, W> {
    let value = self.data.borrow_mut();
    WriteRef { value: Some(value), modified: false, modify_scope: scope, info: &self.info }
  }
}

impl<W> Drop for Stateful<W> {
  fn drop(&mut self) { self.info.dec_writer(); }
}

impl Drop for WriterInfo {
  fn drop(&mut self) {
    if self.writer_count.get() == 0 {
      // no writer is alive, no more modifies can come, complete the stream.
      let mut notifier = self.notifier.clone();
      notifier.unsubscribe();
    }
  }
}

impl<W: 'static> Reader<W> {
  pub fn read(&self) -> ReadRef<'_, W> { ReadRef(self.0.borrow()) }
}

impl<W> Clone for Reader<W> {
  fn clone(&self) -> Self { Reader(self.0.clone()) }
}

/// A shared read reference of the state data.
pub struct ReadRef<'a, W>(Ref<'a, W>);

/// A write reference of the state data; the modify notification is sent when
/// the reference drops, after the borrow is released.
pub struct WriteRef<'a, W> {
  value: Option<RefMut<'a, W>>,
  modified: bool,
  modify_scope: ModifyScope,
  info: &'a WriterInfo,
}

impl<'a, W> Deref for ReadRef<'a, W> {
  type Target = W;

  fn deref(&self) -> &W { &self.0 }
}

impl<'a, W> Deref for WriteRef<'a, W> {
  type Target = W;

  fn deref(&self) -> &W {
    self
      .value
      .as_deref()
      .expect("write reference used after release")
  }
}

impl<'a, W> DerefMut for WriteRef<'a, W> {
  fn deref_mut(&mut self) -> &mut W {
    self.modified = true;
    self
      .value
      .as_deref_mut()
      .expect("write reference used after release")
  }
}

impl<'a, W> Drop for WriteRef<'a, W> {
  fn drop(&mut self) {
    // release the borrow before notifying, subscribers may read the state.
    self.value.take();
    if self.modified {
      self.info.notifier.next(self.modify_scope);
    }
  }
}

impl WriterInfo {
  pub(crate) fn new() -> Self {
    WriterInfo { notifier: <_>::default(), writer_count: Cell::new(1) }
  }

  pub(crate) fn inc_writer(&self) { self.writer_count.set(self.writer_count.get() + 1); }

  pub(crate) fn dec_writer(&self) { self.writer_count.set(self.writer_count.get() - 1); }
}

impl Notifier {
  pub fn raw_modifies(&self) -> CloneableBoxOp<'static, ModifyScope, Infallible> {
    self.0.clone().box_it()
  }

  pub(crate) fn next(&self, scope: ModifyScope) { self.0.clone().next(scope) }

  pub(crate) fn unsubscribe(&mut self) { self.0.clone().unsubscribe(); }
}

impl<W: std::fmt::Debug> std::fmt::Debug for Stateful<W> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Stateful")
      .field(&*self.data.borrow())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn smoke() {
    let counter = Stateful::new(0);
    {
      *counter.write() += 1;
    }
    assert_eq!(*counter.read(), 1);
  }

  #[test]
  fn reader_shares_data() {
    let state = Stateful::new(1);
    let reader = state.clone_reader();
    *state.write() = 2;
    assert_eq!(*reader.read(), 2);
  }

  #[test]
  fn change_notify() {
    let notified = Rc::new(RefCell::new(vec![]));
    let c_notified = notified.clone();
    let state = Stateful::new(0);
    state
      .raw_modifies()
      .subscribe(move |s| c_notified.borrow_mut().push(s));

    *state.write() += 1;
    assert_eq!(notified.borrow().as_slice(), &[ModifyScope::BOTH]);

    *state.silent() += 1;
    assert_eq!(notified.borrow().as_slice(), &[ModifyScope::BOTH, ModifyScope::DATA]);
  }

  #[test]
  fn untouched_write_not_notify() {
    let notified = Rc::new(RefCell::new(vec![]));
    let c_notified = notified.clone();
    let state = Stateful::new(0);
    state
      .raw_modifies()
      .subscribe(move |s| c_notified.borrow_mut().push(s));

    // a write reference that never hands out a mutable borrow records no
    // modify.
    {
      let _ = state.write();
    }
    assert!(notified.borrow().is_empty());
  }

  #[test]
  fn modifies_sees_every_data_write() {
    let notified = Rc::new(RefCell::new(vec![]));
    let c_notified = notified.clone();
    let state = Stateful::new(0);
    state
      .modifies()
      .subscribe(move |s| c_notified.borrow_mut().push(s));

    *state.write() += 1;
    *state.silent() += 1;
    assert_eq!(notified.borrow().as_slice(), &[ModifyScope::BOTH, ModifyScope::DATA]);
  }
}
