pub mod chip;
pub mod choice;
pub mod field;
pub mod panel;

// Re-export component symbols so pages can `use crate::components::ui::TopicChip` etc.
pub use chip::*;
pub use choice::*;
pub use field::*;
#[allow(unused_imports)]
pub use panel::*;
