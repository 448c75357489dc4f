//! Bracket-depth tokenizer for WKT text.
//!
//! Tokens are grouped into a tree of parenthesised [`Group`]s as they are
//! read, so the parser never has to track nesting itself. Groups still open
//! when the input ends are kept but flagged as unclosed.

/// A lexical element inside a group.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Node<'a> {
    /// Any run of characters other than whitespace, `(`, `)` and `,`.
    Word(&'a str),
    Comma,
    Group(Group<'a>),
}

/// The contents of one `( ... )` pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct Group<'a> {
    pub(super) children: Vec<Node<'a>>,
    /// False if the input ended before the matching `)`.
    pub(super) closed: bool,
}

impl<'a> Group<'a> {
    /// Iterate over the direct child groups, skipping words and commas.
    pub(super) fn groups(&self) -> impl Iterator<Item = &Group<'a>> {
        self.children.iter().filter_map(|node| match node {
            Node::Group(group) => Some(group),
            _ => None,
        })
    }
}

/// Split `text` into a tree of nodes. The returned group is the implicit
/// top level and is always `closed`. A `)` with no matching `(` is dropped.
pub(super) fn tokenize(text: &str) -> Group<'_> {
    let mut stack: Vec<Vec<Node<'_>>> = vec![Vec::new()];
    let mut word_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        let is_delim = ch.is_whitespace() || matches!(ch, '(' | ')' | ',');
        if !is_delim {
            word_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = word_start.take() {
            push(&mut stack, Node::Word(&text[start..i]));
        }

        match ch {
            '(' => stack.push(Vec::new()),
            ')' if stack.len() > 1 => {
                let children = stack.pop().unwrap_or_default();
                push(&mut stack, Node::Group(Group { children, closed: true }));
            }
            ')' => log::trace!("[io::wkt::tokenize] Ignoring unmatched ')' at byte {}", i),
            ',' => push(&mut stack, Node::Comma),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        push(&mut stack, Node::Word(&text[start..]));
    }

    // Unwind groups left open at end of input.
    while stack.len() > 1 {
        let children = stack.pop().unwrap_or_default();
        push(&mut stack, Node::Group(Group { children, closed: false }));
    }

    Group { children: stack.pop().unwrap_or_default(), closed: true }
}

#[inline]
fn push<'a>(stack: &mut [Vec<Node<'a>>], node: Node<'a>) {
    if let Some(top) = stack.last_mut() { top.push(node) }
}
