//! Request filters applied in front of the handlers.

pub mod negotiate;
