//! Node arena for parsed payload fragments.
//!
//! A [`Fragment`] stores every node in one `Vec` and links them by index.
//! Slot 0 is a synthetic root that owns the top-level nodes and is never
//! written out.

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Fragment {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Element(ElementData),
    /// Decoded text. Each char is one reveal unit.
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag: TagName,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

macro_rules! tag_names {
    ($($variant:ident = $name:literal),* $(,)?) => {
        /// Element names the tree builder or a renderer cares about. Any
        /// other name is carried through as `Other`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum TagName {
            $($variant,)*
            Other(String),
        }

        impl TagName {
            /// Map a lowercased tag name.
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)*
                    other => Self::Other(other.to_owned()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Other(name) => name.as_str(),
                }
            }
        }
    };
}

tag_names! {
    A = "a",
    B = "b",
    Blockquote = "blockquote",
    Br = "br",
    Code = "code",
    Div = "div",
    Em = "em",
    H1 = "h1",
    H2 = "h2",
    H3 = "h3",
    H4 = "h4",
    H5 = "h5",
    H6 = "h6",
    Hr = "hr",
    I = "i",
    Img = "img",
    Li = "li",
    Mark = "mark",
    Ol = "ol",
    P = "p",
    Pre = "pre",
    S = "s",
    Small = "small",
    Span = "span",
    Strong = "strong",
    U = "u",
    Ul = "ul",
    Wbr = "wbr",
}

impl TagName {
    /// Elements that never have content or an end tag.
    pub fn is_void(&self) -> bool {
        match self {
            Self::Br | Self::Hr | Self::Img | Self::Wbr => true,
            Self::Other(name) => matches!(
                name.as_str(),
                "area" | "base" | "col" | "embed" | "input" | "link" | "meta" | "source" | "track"
            ),
            _ => false,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Self::H1 | Self::H2 | Self::H3 | Self::H4 | Self::H5 | Self::H6)
    }

    /// Block elements whose start tag ends an open `<p>`.
    pub fn closes_paragraph(&self) -> bool {
        self.is_heading()
            || matches!(
                self,
                Self::Blockquote | Self::Div | Self::Hr | Self::Ol | Self::P | Self::Pre | Self::Ul
            )
    }
}

impl ElementData {
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find_map(|attr| (attr.name == name).then_some(attr.value.as_str()))
    }
}

impl Node {
    fn detached(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Fragment {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeKind::Root)],
            root: 0,
        }
    }

    /// Store a node with no parent yet.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::detached(kind));
        self.nodes.len() - 1
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        if let NodeKind::Element(data) = &self.nodes[id].kind {
            Some(data)
        } else {
            None
        }
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.nodes[self.root].children
    }

    /// Text under `id` in document order, comments excluded.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = &self.nodes[next];
            match &node.kind {
                NodeKind::Text(run) => text.push_str(run),
                NodeKind::Comment(_) => {},
                NodeKind::Root | NodeKind::Element(_) => {
                    pending.extend(node.children.iter().rev());
                },
            }
        }
        text
    }

    /// Reveal units in the whole fragment.
    pub fn unit_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Text(run) => Some(run.chars().count()),
                _ => None,
            })
            .sum()
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}
