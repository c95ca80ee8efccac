mod paint;
mod pick;

pub use paint::run_paint;
pub use pick::run_pick;
