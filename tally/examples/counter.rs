use env_logger::Env;
use tally::prelude::*;

fn main() {
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

  let counter = Stateful::new(Counter::default());
  let wnd = Window::new(WrapCounter::wrapping(counter.clone_writer()));

  print_frame(&wnd.draw_frame());

  // tap the counter itself, then the frame around it.
  let inner = wnd
    .draw_frame()
    .find_by_class("counter")
    .map(|e| e.id)
    .expect("the counter is in the frame");
  wnd.tap(inner);
  wnd.tap(wnd.root());

  print_frame(&wnd.draw_frame());
  println!("counter value: {}", counter.read().value());
}

fn print_frame(frame: &Frame) {
  println!("frame:");
  print_element(&frame.root, 1);
}

fn print_element(elem: &Element, depth: usize) {
  let indent = "  ".repeat(depth);
  let classes = elem.view.classes().join(" ");
  match elem.text() {
    Some(text) => println!("{indent}[{classes}] {text}"),
    None => println!("{indent}[{classes}]"),
  }
  for child in &elem.children {
    print_element(child, depth + 1);
  }
}
