use super::undo::*;

use std::fmt;
use std::rc::{Rc, Weak};
use std::cell::RefCell;

///
/// A typed attribute value stored on a tree node
///
#[derive(Clone, PartialEq, Debug)]
pub enum TreeValue {
    Text(String),
    Number(f64),
    Flag(bool)
}

impl TreeValue {
    ///
    /// Reads this value as text (numbers and flags are formatted)
    ///
    pub fn as_text(&self) -> String {
        match self {
            TreeValue::Text(text)       => text.clone(),
            TreeValue::Number(number)   => format!("{}", number),
            TreeValue::Flag(flag)       => (if *flag { "true" } else { "false" }).to_string()
        }
    }

    ///
    /// Reads this value as a number (unparseable text degrades to 0)
    ///
    pub fn as_number(&self) -> f64 {
        match self {
            TreeValue::Text(text)       => text.trim().parse::<f64>().unwrap_or(0.0),
            TreeValue::Number(number)   => *number,
            TreeValue::Flag(flag)       => if *flag { 1.0 } else { 0.0 }
        }
    }

    ///
    /// Reads this value as a flag
    ///
    pub fn as_flag(&self) -> bool {
        match self {
            TreeValue::Text(text)       => text == "true" || text == "1",
            TreeValue::Number(number)   => *number != 0.0,
            TreeValue::Flag(flag)       => *flag
        }
    }
}

impl From<&str> for TreeValue {
    fn from(text: &str) -> TreeValue { TreeValue::Text(text.to_string()) }
}

impl From<String> for TreeValue {
    fn from(text: String) -> TreeValue { TreeValue::Text(text) }
}

impl From<f64> for TreeValue {
    fn from(number: f64) -> TreeValue { TreeValue::Number(number) }
}

impl From<bool> for TreeValue {
    fn from(flag: bool) -> TreeValue { TreeValue::Flag(flag) }
}

///
/// Data stored for a single tree node
///
pub (super) struct TreeNode {
    pub (super) node_type:  String,
    pub (super) attributes: Vec<(String, TreeValue)>,
    pub (super) children:   Vec<ValueTree>,
    pub (super) parent:     Weak<RefCell<TreeNode>>
}

///
/// A node in the attributed tree: a type tag, an ordered attribute list and an
/// ordered child list. Cloning a `ValueTree` clones the *reference*: both
/// values name the same underlying node, as edits made through one handle must
/// be visible through every other handle to that node.
///
/// Equality (`==`) is node identity; use `is_equivalent_to` for a structural
/// comparison.
///
#[derive(Clone)]
pub struct ValueTree {
    node: Rc<RefCell<TreeNode>>
}

impl ValueTree {
    ///
    /// Creates a new tree node with the specified type tag
    ///
    pub fn new(node_type: &str) -> ValueTree {
        ValueTree {
            node: Rc::new(RefCell::new(TreeNode {
                node_type:  node_type.to_string(),
                attributes: vec![],
                children:   vec![],
                parent:     Weak::new()
            }))
        }
    }

    pub fn node_type(&self) -> String {
        self.node.borrow().node_type.clone()
    }

    pub fn has_type(&self, node_type: &str) -> bool {
        self.node.borrow().node_type == node_type
    }

    ///
    /// True if two handles name the same underlying node
    ///
    pub fn same_node(&self, other: &ValueTree) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    //
    // Attributes
    //

    ///
    /// Retrieves the value of an attribute, if present
    ///
    pub fn attribute(&self, name: &str) -> Option<TreeValue> {
        self.node.borrow().attributes.iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.clone())
    }

    ///
    /// Sets or replaces an attribute, optionally recording the edit with an
    /// undo manager
    ///
    pub fn set_attribute<Value: Into<TreeValue>>(&self, name: &str, value: Value, undo: Option<&UndoManager>) {
        if let Some(undo) = undo {
            undo.record(TreeEdit::SetAttribute {
                node:       self.clone(),
                name:       name.to_string(),
                previous:   self.attribute(name)
            });
        }

        self.set_attribute_raw(name, Some(value.into()));
    }

    ///
    /// Removes an attribute if it is present
    ///
    pub fn remove_attribute(&self, name: &str, undo: Option<&UndoManager>) {
        if self.attribute(name).is_none() {
            return;
        }

        if let Some(undo) = undo {
            undo.record(TreeEdit::SetAttribute {
                node:       self.clone(),
                name:       name.to_string(),
                previous:   self.attribute(name)
            });
        }

        self.set_attribute_raw(name, None);
    }

    ///
    /// Writes or removes an attribute without touching the undo history
    ///
    pub (super) fn set_attribute_raw(&self, name: &str, value: Option<TreeValue>) {
        let mut node    = self.node.borrow_mut();
        let existing    = node.attributes.iter().position(|(attr_name, _)| attr_name == name);

        match (existing, value) {
            (Some(index), Some(value))  => node.attributes[index].1 = value,
            (Some(index), None)         => { node.attributes.remove(index); }
            (None, Some(value))         => node.attributes.push((name.to_string(), value)),
            (None, None)                => { }
        }
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.node.borrow().attributes.iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    //
    // Children
    //

    pub fn child_count(&self) -> usize {
        self.node.borrow().children.len()
    }

    pub fn child(&self, index: usize) -> Option<ValueTree> {
        self.node.borrow().children.get(index).cloned()
    }

    pub fn children(&self) -> Vec<ValueTree> {
        self.node.borrow().children.clone()
    }

    ///
    /// Finds the first child with the specified type tag
    ///
    pub fn child_with_type(&self, node_type: &str) -> Option<ValueTree> {
        self.node.borrow().children.iter()
            .find(|child| child.has_type(node_type))
            .cloned()
    }

    ///
    /// Finds the first child with the specified type tag, creating and
    /// appending one if it is missing
    ///
    pub fn get_or_create_child_with_type(&self, node_type: &str, undo: Option<&UndoManager>) -> ValueTree {
        if let Some(child) = self.child_with_type(node_type) {
            return child;
        }

        let child = ValueTree::new(node_type);
        self.add_child(child.clone(), undo);
        child
    }

    ///
    /// Appends a child node
    ///
    pub fn add_child(&self, child: ValueTree, undo: Option<&UndoManager>) {
        let index = self.child_count();
        self.insert_child(index, child, undo);
    }

    ///
    /// Inserts a child node at an index
    ///
    pub fn insert_child(&self, index: usize, child: ValueTree, undo: Option<&UndoManager>) {
        if let Some(undo) = undo {
            undo.record(TreeEdit::AddedChild {
                parent: self.clone(),
                index:  index
            });
        }

        self.insert_child_raw(index, child);
    }

    ///
    /// Removes a child node, returning true if it was present
    ///
    pub fn remove_child(&self, child: &ValueTree, undo: Option<&UndoManager>) -> bool {
        let index = self.node.borrow().children.iter().position(|existing| existing.same_node(child));

        if let Some(index) = index {
            if let Some(undo) = undo {
                undo.record(TreeEdit::RemovedChild {
                    parent: self.clone(),
                    index:  index,
                    child:  child.clone()
                });
            }

            self.remove_child_index_raw(index);
            true
        } else {
            false
        }
    }

    ///
    /// Replaces a child node in place, preserving its position
    ///
    pub fn replace_child(&self, old_child: &ValueTree, new_child: ValueTree, undo: Option<&UndoManager>) -> bool {
        let index = self.node.borrow().children.iter().position(|existing| existing.same_node(old_child));

        if let Some(index) = index {
            self.remove_child(old_child, undo);
            self.insert_child(index, new_child, undo);
            true
        } else {
            false
        }
    }

    pub (super) fn insert_child_raw(&self, index: usize, child: ValueTree) {
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);

        let mut node    = self.node.borrow_mut();
        let index       = index.min(node.children.len());
        node.children.insert(index, child);
    }

    pub (super) fn remove_child_index_raw(&self, index: usize) -> Option<ValueTree> {
        let mut node = self.node.borrow_mut();

        if index < node.children.len() {
            let child = node.children.remove(index);
            child.node.borrow_mut().parent = Weak::new();
            Some(child)
        } else {
            None
        }
    }

    //
    // Navigation
    //

    ///
    /// The parent of this node, if it is attached to one
    ///
    pub fn parent(&self) -> Option<ValueTree> {
        self.node.borrow().parent
            .upgrade()
            .map(|node| ValueTree { node })
    }

    ///
    /// This node's position among its parent's children
    ///
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let index  = parent.node.borrow().children.iter().position(|child| child.same_node(self));

        index
    }

    ///
    /// The sibling at a relative offset from this node (-1 for the previous
    /// sibling, 1 for the next)
    ///
    pub fn sibling(&self, offset: isize) -> Option<ValueTree> {
        let parent  = self.parent()?;
        let index   = self.index_in_parent()? as isize + offset;

        if index < 0 {
            None
        } else {
            parent.child(index as usize)
        }
    }

    //
    // Comparison
    //

    ///
    /// Structural comparison: same type, same attribute set (order
    /// insensitive) and pairwise-equivalent children
    ///
    pub fn is_equivalent_to(&self, other: &ValueTree) -> bool {
        if self.same_node(other) {
            return true;
        }

        if self.node_type() != other.node_type() {
            return false;
        }

        let our_names   = self.attribute_names();
        let their_names = other.attribute_names();

        if our_names.len() != their_names.len() {
            return false;
        }

        for name in our_names.iter() {
            if self.attribute(name) != other.attribute(name) {
                return false;
            }
        }

        if self.child_count() != other.child_count() {
            return false;
        }

        self.children().iter()
            .zip(other.children().iter())
            .all(|(ours, theirs)| ours.is_equivalent_to(theirs))
    }
}

impl PartialEq for ValueTree {
    ///
    /// Tree handles compare by node identity, matching the semantics of the
    /// reference-counted handle itself
    ///
    fn eq(&self, other: &ValueTree) -> bool {
        self.same_node(other)
    }
}

impl fmt::Debug for ValueTree {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let node = self.node.borrow();

        formatter.debug_struct("ValueTree")
            .field("node_type", &node.node_type)
            .field("attributes", &node.attributes)
            .field("children", &node.children)
            .finish()
    }
}
