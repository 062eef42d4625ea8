//! The widgets of tally: a clickable counter and the wrapper that frames it.

pub mod counter;
pub mod wrap_counter;

pub mod prelude {
  pub use super::{counter::*, wrap_counter::*};
}
