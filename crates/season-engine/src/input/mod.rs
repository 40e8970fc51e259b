pub mod capture;
pub mod drag;
pub mod event;
pub mod viewport;
