//! Course about page and enrollment.

pub mod gate;
pub mod service;
pub mod settings;
