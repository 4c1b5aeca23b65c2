#![deny(unsafe_code)]

/// Host window that mounts the widget.
///
/// The widget itself does not depend on the host; the shell only gives it a
/// page to float over.
pub mod app;
/// Settings loading and the inference configuration derived from them.
pub mod settings;
/// The chat widget views.
pub mod widget;
