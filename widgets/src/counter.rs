use tally_core::prelude::*;

/// A round click counter: every tap on it raises the shown count by one and
/// reports `click counter` on the diagnostic channel of its window.
///
/// # Example
///
/// ```
/// use tally_core::prelude::*;
/// use tally_widgets::prelude::*;
///
/// let counter = Stateful::new(Counter::default());
/// let wnd = Window::new(counter.clone_writer());
///
/// wnd.tap(wnd.root());
/// assert_eq!(counter.read().value(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
  value: u64,
}

impl Counter {
  pub fn increment(&mut self) { self.value += 1; }

  pub fn value(&self) -> u64 { self.value }
}

/// The render object of a counter, showing the fresh count as its text.
struct CounterView(Reader<Counter>);

impl Render for CounterView {
  fn render(&self) -> ViewNode {
    ViewNode::new(&["circle", "counter"]).with_text(self.0.read().value().to_string())
  }
}

impl Compose for Counter {
  fn compose(this: Stateful<Self>) -> Widget {
    let writer = this.clone_writer();
    Widget::from_render(CounterView(this.clone_reader()))
      .update_on(this.raw_modifies())
      .on_tap(move |e| {
        // a direct click belongs to this counter alone.
        e.stop_propagation();
        e.diagnostic("click counter");
        writer.write().increment();
      })
  }
}
