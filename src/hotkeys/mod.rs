pub mod events;
pub mod keymap;

#[cfg(test)]
mod tests;

pub use events::{code_for_key, pressed_codes};
pub use keymap::{FocusTarget, Keymap};
