pub mod pointer;
pub mod slot;

pub use pointer::{SmoothedPointer, Viewport};
pub use slot::LatestSlot;
