use tally_core::prelude::*;

use crate::counter::Counter;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
  #[error("no embedded counter instance found")]
  EmbeddedWidgetNotFound,
}

/// A round frame around a counter. A tap on the frame itself reports
/// `click wrapper` and raises the embedded counter by one, without the
/// counter reporting anything; a tap on the counter inside stays the
/// counter's own business.
///
/// The wrapper drives the counter through an injected handle, so the pair
/// works no matter where either of them sits in the tree.
///
/// # Example
///
/// ```
/// use tally_core::prelude::*;
/// use tally_widgets::prelude::*;
///
/// let counter = Stateful::new(Counter::default());
/// let wnd = Window::new(WrapCounter::wrapping(counter.clone_writer()));
///
/// // tap the frame, not the counter in it.
/// wnd.tap(wnd.root());
/// assert_eq!(counter.read().value(), 1);
/// ```
#[derive(Default)]
pub struct WrapCounter {
  counter: Option<Stateful<Counter>>,
}

/// The render object of the wrapper frame.
struct WrapView;

impl Render for WrapView {
  fn render(&self) -> ViewNode { ViewNode::new(&["circle", "wrapcounter"]) }
}

impl WrapCounter {
  /// A wrapper driving `counter`, wherever that counter is shown.
  pub fn embed(counter: &Stateful<Counter>) -> Self {
    WrapCounter { counter: Some(counter.clone_writer()) }
  }

  /// Raise the embedded counter by one and return its new value.
  pub fn delegate_increment(&self) -> Result<u64, WidgetError> {
    let counter = self
      .counter
      .as_ref()
      .ok_or(WidgetError::EmbeddedWidgetNotFound)?;
    let mut counter = counter.write();
    counter.increment();
    Ok(counter.value())
  }

  /// Compose this wrapper around `content`.
  pub fn with_content<K: ?Sized>(self, content: impl IntoWidget<K>) -> Widget {
    WrapCounter::compose_child(Stateful::new(self), content.into_widget())
  }

  /// The common shape: a wrapper framing the very counter it drives.
  pub fn wrapping(counter: Stateful<Counter>) -> Widget {
    Self::embed(&counter).with_content(counter)
  }
}

impl ComposeChild for WrapCounter {
  type Child = Widget;

  fn compose_child(this: Stateful<Self>, child: Self::Child) -> Widget {
    let handle = this.clone_reader();
    Widget::from_render(WrapView)
      .with_child(child)
      .on_tap(move |e| {
        e.stop_propagation();
        e.diagnostic("click wrapper");
        if let Err(err) = handle.read().delegate_increment() {
          log::warn!("wrap counter click ignored: {err}");
        }
      })
  }
}
