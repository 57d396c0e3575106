//! HTML5 document backed by `markup5ever_rcdom`.

use std::rc::{Rc, Weak};

use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::{DocumentTree, DomError};

/// Node handle of an [`HtmlDocument`].
pub type HtmlNode = Handle;

/// A parsed HTML page.
///
/// Parsing follows the HTML5 tree construction rules, so malformed markup is
/// repaired the same way a browser would repair it and never fails.
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    /// Parse a complete HTML page (or a body fragment, which is wrapped in an
    /// implied `<html><body>`).
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> Result<String, DomError> {
        let mut out = Vec::new();
        let document = SerializableHandle::from(Rc::clone(&self.dom.document));
        serialize(&mut out, &document, SerializeOpts::default())?;
        Ok(String::from_utf8(out)?)
    }

    /// Value of attribute `name` on an element.
    #[must_use]
    pub fn attribute(&self, node: &HtmlNode, name: &str) -> Option<String> {
        let NodeData::Element { attrs, .. } = &node.data else {
            return None;
        };
        attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| (*attr.value).to_owned())
    }

    /// Serialize only the children of the `<body>` element.
    ///
    /// Useful when the document was parsed from a fragment.
    pub fn body_html(&self) -> Result<String, DomError> {
        let Some(body) = find_element(&self.dom.document, "body") else {
            return Ok(String::new());
        };
        let mut out = Vec::new();
        serialize(
            &mut out,
            &SerializableHandle::from(body),
            SerializeOpts::default(),
        )?;
        Ok(String::from_utf8(out)?)
    }
}

impl DocumentTree for HtmlDocument {
    type Node = Handle;

    fn elements(&self) -> Vec<Handle> {
        let mut elements = Vec::new();
        let mut stack = vec![Rc::clone(&self.dom.document)];
        while let Some(node) = stack.pop() {
            if matches!(node.data, NodeData::Element { .. }) {
                elements.push(Rc::clone(&node));
            }
            // Reverse so the first child is visited next.
            stack.extend(node.children.borrow().iter().rev().map(Rc::clone));
        }
        elements
    }

    fn tag_name(&self, node: &Handle) -> Option<String> {
        match &node.data {
            NodeData::Element { name, .. } => Some((*name.local).to_owned()),
            _ => None,
        }
    }

    fn has_class(&self, node: &Handle, class: &str) -> bool {
        let NodeData::Element { attrs, .. } = &node.data else {
            return false;
        };
        attrs
            .borrow()
            .iter()
            .filter(|attr| &*attr.name.local == "class")
            .any(|attr| attr.value.split_ascii_whitespace().any(|c| c == class))
    }

    fn parent(&self, node: &Handle) -> Option<Handle> {
        parent_of(node).filter(|p| matches!(p.data, NodeData::Element { .. }))
    }

    fn text_content(&self, node: &Handle) -> String {
        let mut text = String::new();
        let mut stack = vec![Rc::clone(node)];
        while let Some(current) = stack.pop() {
            if let NodeData::Text { contents } = &current.data {
                text.push_str(&contents.borrow());
            }
            stack.extend(current.children.borrow().iter().rev().map(Rc::clone));
        }
        text
    }

    fn contains(&self, node: &Handle) -> bool {
        let mut current = Rc::clone(node);
        loop {
            if Rc::ptr_eq(&current, &self.dom.document) {
                return true;
            }
            match parent_of(&current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn replace_children(&mut self, node: &Handle, markup: &str) {
        let fragment = parse_document(RcDom::default(), ParseOpts::default())
            .one(format!("<body>{markup}</body>"));
        let new_children = find_element(&fragment.document, "body")
            .map(|body| body.children.take())
            .unwrap_or_default();

        for old in node.children.take() {
            old.parent.set(None);
        }
        for child in &new_children {
            child.parent.set(Some(Rc::downgrade(node)));
        }
        *node.children.borrow_mut() = new_children;
    }
}

/// Parent of any node kind, including the document node.
fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

/// First element named `tag` below `root`, in document order.
fn find_element(root: &Handle, tag: &str) -> Option<Handle> {
    let mut stack = vec![Rc::clone(root)];
    while let Some(node) = stack.pop() {
        if let NodeData::Element { name, .. } = &node.data
            && &*name.local == tag
        {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().map(Rc::clone));
    }
    None
}
