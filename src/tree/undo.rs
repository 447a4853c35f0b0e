use super::value_tree::*;

use std::cell::RefCell;

///
/// A single reversible edit to a value tree
///
pub (super) enum TreeEdit {
    /// An attribute was set or removed (`previous` restores the old state)
    SetAttribute { node: ValueTree, name: String, previous: Option<TreeValue> },

    /// A child was inserted at an index
    AddedChild { parent: ValueTree, index: usize },

    /// The child at an index was removed
    RemovedChild { parent: ValueTree, index: usize, child: ValueTree }
}

impl TreeEdit {
    ///
    /// Applies the inverse of this edit to the tree, returning the edit that
    /// would redo it
    ///
    fn revert(self) -> TreeEdit {
        match self {
            TreeEdit::SetAttribute { node, name, previous } => {
                let current = node.attribute(&name);
                node.set_attribute_raw(&name, previous);

                TreeEdit::SetAttribute { node, name, previous: current }
            }

            TreeEdit::AddedChild { parent, index } => {
                match parent.remove_child_index_raw(index) {
                    Some(child) => TreeEdit::RemovedChild { parent, index, child },
                    None        => TreeEdit::AddedChild { parent, index }
                }
            }

            TreeEdit::RemovedChild { parent, index, child } => {
                parent.insert_child_raw(index, child);

                TreeEdit::AddedChild { parent, index }
            }
        }
    }
}

///
/// Groups tree edits into undoable transactions and replays them on request.
///
/// The manager is single threaded like the rest of this crate: it uses
/// interior mutability so that it can be passed around as `Option<&UndoManager>`
/// in the same way the tree accessors expect.
///
pub struct UndoManager {
    state: RefCell<UndoState>
}

struct UndoState {
    current:    Vec<TreeEdit>,
    undo_stack: Vec<Vec<TreeEdit>>,
    redo_stack: Vec<Vec<TreeEdit>>
}

impl UndoManager {
    pub fn new() -> UndoManager {
        UndoManager {
            state: RefCell::new(UndoState {
                current:    vec![],
                undo_stack: vec![],
                redo_stack: vec![]
            })
        }
    }

    ///
    /// Adds an edit to the transaction currently being built (any pending redo
    /// history becomes unreachable)
    ///
    pub (super) fn record(&self, edit: TreeEdit) {
        let mut state = self.state.borrow_mut();

        state.redo_stack.clear();
        state.current.push(edit);
    }

    ///
    /// Closes the transaction currently being built: later edits will undo
    /// separately from earlier ones
    ///
    pub fn begin_new_transaction(&self) {
        let mut state = self.state.borrow_mut();

        if !state.current.is_empty() {
            let transaction = state.current.drain(..).collect();
            state.undo_stack.push(transaction);
        }
    }

    pub fn can_undo(&self) -> bool {
        let state = self.state.borrow();
        !state.current.is_empty() || !state.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.borrow().redo_stack.is_empty()
    }

    ///
    /// Reverts the most recent transaction, returning false if there was
    /// nothing to undo
    ///
    pub fn undo(&self) -> bool {
        self.begin_new_transaction();

        let transaction = self.state.borrow_mut().undo_stack.pop();

        match transaction {
            Some(transaction) => {
                // Edits revert newest first; the collected opposites are
                // already ordered so that reverting them replays oldest first
                let redo_transaction = transaction.into_iter()
                    .rev()
                    .map(|edit| edit.revert())
                    .collect::<Vec<_>>();

                self.state.borrow_mut().redo_stack.push(redo_transaction);
                true
            }

            None => false
        }
    }

    ///
    /// Replays the most recently undone transaction, returning false if there
    /// was nothing to redo
    ///
    pub fn redo(&self) -> bool {
        let transaction = self.state.borrow_mut().redo_stack.pop();

        match transaction {
            Some(transaction) => {
                let undo_transaction = transaction.into_iter()
                    .rev()
                    .map(|edit| edit.revert())
                    .collect::<Vec<_>>();

                self.state.borrow_mut().undo_stack.push(undo_transaction);
                true
            }

            None => false
        }
    }
}
