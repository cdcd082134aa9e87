//! Parameter form controller for the rasterization demo.
//!
//! The controller never touches a document directly: it drives a
//! [`FormView`](view::FormView) and posts through a
//! [`Transport`](transport::Transport), both injected at construction.

pub mod config;
pub mod controller;
pub mod transport;
pub mod view;

pub use config::ControllerConfig;
pub use controller::{FormController, FormError, RunState, SELECT_ALGORITHM_NOTICE, Submission};
pub use transport::{Transport, TransportError};
pub use view::FormView;
