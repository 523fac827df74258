//! Hardware drivers written against `embedded-hal` 1.0 traits.

pub mod drive;
pub mod motor;
pub mod stop_button;
