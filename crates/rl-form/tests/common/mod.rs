//! Shared fakes for the form integration tests.

#![allow(dead_code)]

use rl_core::FieldDescriptor;
use rl_form::{FormView, Transport, TransportError};
use std::cell::RefCell;
use std::collections::VecDeque;

/// A rendered element inside the parameters container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Label { for_id: String, text: String },
    Input { id: String, kind: String, value: String },
    Break,
}

/// In-memory stand-in for the four page elements.
#[derive(Debug, Default)]
pub struct FakePage {
    pub select: String,
    pub container: Vec<Element>,
    pub image_src: Option<String>,
    pub alerts: Vec<String>,
}

impl FakePage {
    pub fn select(&mut self, value: &str) {
        self.select = value.to_string();
    }

    /// Simulate the user typing into an input.
    pub fn edit(&mut self, id: &str, value: &str) {
        for el in &mut self.container {
            if let Element::Input { id: el_id, value: v, .. } = el
                && el_id == id
            {
                *v = value.to_string();
                return;
            }
        }
        panic!("no input with id {id:?}");
    }

    pub fn inputs(&self) -> Vec<(&str, &str)> {
        self.container
            .iter()
            .filter_map(|el| match el {
                Element::Input { id, value, .. } => Some((id.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl FormView for FakePage {
    fn selected_algorithm(&self) -> String {
        self.select.clone()
    }

    fn clear_parameters(&mut self) {
        self.container.clear();
    }

    fn append_field(&mut self, field: &FieldDescriptor) {
        self.container.push(Element::Label {
            for_id: field.id.to_string(),
            text: field.label.to_string(),
        });
        self.container.push(Element::Input {
            id: field.id.to_string(),
            kind: field.input_type.to_string(),
            value: field.default_value.to_string(),
        });
        self.container.push(Element::Break);
    }

    fn rendered_inputs(&self) -> Vec<(String, String)> {
        self.inputs()
            .into_iter()
            .map(|(id, v)| (id.to_string(), v.to_string()))
            .collect()
    }

    fn set_image_source(&mut self, src: &str) {
        self.image_src = Some(src.to_string());
    }

    fn notify_user(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Transport that records every post and answers from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    pub posts: RefCell<Vec<(String, String)>>,
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
}

impl ScriptedTransport {
    pub fn replying(replies: impl IntoIterator<Item = Result<String, TransportError>>) -> Self {
        Self {
            posts: RefCell::new(Vec::new()),
            replies: RefCell::new(replies.into_iter().collect()),
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.borrow().len()
    }

    pub fn last_body(&self) -> serde_json::Value {
        let posts = self.posts.borrow();
        let (_, body) = posts.last().expect("no post recorded");
        serde_json::from_str(body).expect("body is JSON")
    }
}

impl Transport for ScriptedTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<String, TransportError> {
        self.posts.borrow_mut().push((path.to_string(), body));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("connection refused".into())))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
