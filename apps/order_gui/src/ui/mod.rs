//! UI layer: the window shell and the order form view it mounts.

pub mod order_form;
pub mod shell;

pub use order_form::OrderFormView;
pub use shell::ShellApp;
