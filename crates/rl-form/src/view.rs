//! The form surface the controller draws into.

use rl_core::FieldDescriptor;

/// Everything the controller needs from the host page.
///
/// A browser implementation wraps the `algorithm` select, the `parameters`
/// container, and the `resultImage` element; tests use an in-memory fake.
pub trait FormView {
    /// Current value of the algorithm select control (empty when unselected).
    fn selected_algorithm(&self) -> String;

    /// Remove every rendered parameter input and its label.
    fn clear_parameters(&mut self);

    /// Render one labeled input initialized to `field.default_value`.
    fn append_field(&mut self, field: &FieldDescriptor);

    /// `(id, current value)` of every rendered input, in document order.
    fn rendered_inputs(&self) -> Vec<(String, String)>;

    fn set_image_source(&mut self, src: &str);

    /// Blocking, user-facing notice.
    fn notify_user(&mut self, message: &str);
}
