//! Motion control: straight driving and closed-loop rotation.

pub mod forward;
pub mod heading;
