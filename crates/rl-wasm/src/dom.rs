//! `FormView` backed by live page elements.

use rl_core::FieldDescriptor;
use rl_form::FormView;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlLabelElement,
    HtmlSelectElement,
};

/// The select, parameter container, and result image of the host page.
pub struct DomView {
    document: Document,
    select: HtmlSelectElement,
    container: HtmlElement,
    image: HtmlImageElement,
}

impl DomView {
    pub fn new(
        document: Document,
        select: HtmlSelectElement,
        container: HtmlElement,
        image: HtmlImageElement,
    ) -> Self {
        Self {
            document,
            select,
            container,
            image,
        }
    }

    /// `<label for=id>label</label><input type id value><br>`
    fn try_append_field(&self, field: &FieldDescriptor) -> Result<(), JsValue> {
        let label: HtmlLabelElement = self.document.create_element("label")?.dyn_into()?;
        label.set_html_for(field.id);
        label.set_text_content(Some(field.label));

        let input: HtmlInputElement = self.document.create_element("input")?.dyn_into()?;
        input.set_type(field.input_type);
        input.set_id(field.id);
        input.set_value(field.default_value);

        let br = self.document.create_element("br")?;

        self.container.append_child(&label)?;
        self.container.append_child(&input)?;
        self.container.append_child(&br)?;
        Ok(())
    }
}

impl FormView for DomView {
    fn selected_algorithm(&self) -> String {
        self.select.value()
    }

    fn clear_parameters(&mut self) {
        self.container.set_inner_html("");
    }

    fn append_field(&mut self, field: &FieldDescriptor) {
        if let Err(e) = self.try_append_field(field) {
            log::error!("failed to render field `{}`: {e:?}", field.id);
        }
    }

    fn rendered_inputs(&self) -> Vec<(String, String)> {
        let nodes = match self.container.query_selector_all("input") {
            Ok(nodes) => nodes,
            Err(e) => {
                log::error!("failed to scan parameter inputs: {e:?}");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .map(|input| (input.id(), input.value()))
            .collect()
    }

    fn set_image_source(&mut self, src: &str) {
        self.image.set_src(src);
    }

    fn notify_user(&mut self, message: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window to show notice: {message}");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::error!("alert failed: {e:?}");
        }
    }
}
