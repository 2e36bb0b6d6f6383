//! Declarative view tree produced by a card render.
//!
//! A [`View`] is an immutable snapshot. Click bindings live on the elements
//! themselves, so they are created and dropped together with the tree.

use maud::Markup;
use maud::PreEscaped;
use maud::Render;
use maud::html;

use crate::command::RemoteCommand;
use crate::icons::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The dashboard's card container, `<ha-card>`.
    HaCard,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Icon(Icon),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<&'static str>,
    pub style: Option<&'static str>,
    /// Command emitted when this element is clicked.
    pub on_click: Option<RemoteCommand>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            class: None,
            style: None,
            on_click: None,
            children: Vec::new(),
        }
    }

    /// Shorthand for a `<div class="...">`.
    pub fn div(class: &'static str) -> Self {
        Self::new(Tag::Div).class(class)
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn style(mut self, style: &'static str) -> Self {
        self.style = Some(style);
        self
    }

    pub fn on_click(mut self, command: RemoteCommand) -> Self {
        self.on_click = Some(command);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn icon(self, icon: Icon) -> Self {
        self.child(Node::Icon(icon))
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            if let Node::Element(el) = child {
                el.walk(visit);
            }
        }
    }
}

impl Render for Element {
    fn render(&self) -> Markup {
        let command = self.on_click.as_ref().map(RemoteCommand::as_str);
        let children = html! {
            @for child in &self.children {
                (child)
            }
        };
        match self.tag {
            Tag::HaCard => html! {
                ha-card class=[self.class] style=[self.style] data-command=[command] { (children) }
            },
            Tag::Div => html! {
                div class=[self.class] style=[self.style] data-command=[command] { (children) }
            },
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Render for Node {
    fn render(&self) -> Markup {
        match self {
            Node::Element(el) => el.render(),
            Node::Text(text) => html! { (text) },
            Node::Icon(icon) => PreEscaped(icon.svg().to_string()),
        }
    }
}

/// One rendered snapshot of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    stylesheet: &'static str,
    root: Element,
}

impl View {
    pub fn new(stylesheet: &'static str, root: Element) -> Self {
        Self { stylesheet, root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Text of the first element with class `card-title`.
    pub fn title(&self) -> Option<&str> {
        let mut title = None;
        self.root.walk(&mut |el| {
            if title.is_none() && el.class == Some("card-title") {
                title = el.children.iter().find_map(|n| match n {
                    Node::Text(t) => Some(t.as_str()),
                    _ => None,
                });
            }
        });
        title
    }

    /// Every clickable element, in document order.
    pub fn controls(&self) -> Vec<&Element> {
        let mut controls = Vec::new();
        self.root.walk(&mut |el| {
            if el.on_click.is_some() {
                controls.push(el);
            }
        });
        controls
    }

    /// The control bound to `command`, if this view has one.
    pub fn binding(&self, command: RemoteCommand) -> Option<&Element> {
        self.controls()
            .into_iter()
            .find(|el| el.on_click == Some(command))
    }

    pub fn to_html(&self) -> String {
        html! {
            style { (PreEscaped(self.stylesheet)) }
            (self.root)
        }
        .into_string()
    }
}
