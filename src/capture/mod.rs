pub mod accumulator;
pub mod diagnostics;
pub mod line_buffer;

pub use accumulator::Accumulator;
pub use diagnostics::{Diagnostics, Reporter};
pub use line_buffer::LineBuffer;
