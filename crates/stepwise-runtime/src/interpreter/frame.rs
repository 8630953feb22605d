//! Call frames and the call stack
//!
//! Each function call pushes a frame that tracks:
//! - The statement sequence it executes (`code`) and its position (`pc`)
//! - Its own variable bindings
//! - The call cache holding results of calls it dispatched
//! - Which call site in the parent frame receives its return value
//!
//! The top-level program runs in the root frame ("<main>"), which is created
//! once per run and never popped.

use super::cache::CallCache;
use crate::ast::{CallSiteId, FunctionDecl, Stmt};
use crate::value::Value;
use std::collections::BTreeMap;

/// One call activation
#[derive(Debug, Clone)]
pub struct Frame<'p> {
    id: usize,
    function: Option<&'p FunctionDecl>,
    code: &'p [Stmt],
    pub(super) pc: usize,
    pub(super) bindings: BTreeMap<&'p str, Value>,
    pub(super) cache: CallCache,
    return_to: Option<CallSiteId>,
}

impl<'p> Frame<'p> {
    fn root(code: &'p [Stmt]) -> Self {
        Self {
            id: 0,
            function: None,
            code,
            pc: 0,
            bindings: BTreeMap::new(),
            cache: CallCache::new(),
            return_to: None,
        }
    }

    /// Frame id; equals the frame's depth below the root
    pub fn id(&self) -> usize {
        self.id
    }

    /// Function name ("<main>" for the root frame)
    pub fn function_name(&self) -> &'p str {
        self.function.map_or("<main>", |f| f.name.as_str())
    }

    pub fn code(&self) -> &'p [Stmt] {
        self.code
    }

    /// Index of the next statement to execute
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Statement at the program counter, `None` once past the end
    pub fn current_statement(&self) -> Option<&'p Stmt> {
        self.code.get(self.pc)
    }

    pub fn is_at_end(&self) -> bool {
        self.pc >= self.code.len()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).copied()
    }

    pub fn bindings(&self) -> &BTreeMap<&'p str, Value> {
        &self.bindings
    }

    pub fn cache(&self) -> &CallCache {
        &self.cache
    }

    /// Call site in the parent frame awaiting this frame's return value
    pub fn return_target(&self) -> Option<CallSiteId> {
        self.return_to
    }
}

/// LIFO stack of frames above a permanent root
#[derive(Debug, Clone)]
pub struct CallStack<'p> {
    root: Frame<'p>,
    calls: Vec<Frame<'p>>,
}

impl<'p> CallStack<'p> {
    pub fn new(program: &'p [Stmt]) -> Self {
        Self {
            root: Frame::root(program),
            calls: Vec::new(),
        }
    }

    /// Frames on the stack, root included
    pub fn depth(&self) -> usize {
        self.calls.len() + 1
    }

    pub fn root(&self) -> &Frame<'p> {
        &self.root
    }

    pub fn current(&self) -> &Frame<'p> {
        self.calls.last().unwrap_or(&self.root)
    }

    pub fn current_mut(&mut self) -> &mut Frame<'p> {
        self.calls.last_mut().unwrap_or(&mut self.root)
    }

    /// Parent of the current frame, if the current frame is a call
    pub fn caller(&self) -> Option<&Frame<'p>> {
        match self.calls.len() {
            0 => None,
            1 => Some(&self.root),
            n => self.calls.get(n - 2),
        }
    }

    /// Push an activation of `function` that returns into `return_to`
    pub fn push(
        &mut self,
        function: &'p FunctionDecl,
        bindings: BTreeMap<&'p str, Value>,
        return_to: CallSiteId,
    ) {
        let id = self.current().id + 1;
        self.calls.push(Frame {
            id,
            function: Some(function),
            code: &function.body,
            pc: 0,
            bindings,
            cache: CallCache::new(),
            return_to: Some(return_to),
        });
    }

    /// Pop the current call frame. The root frame is never popped.
    pub fn pop(&mut self) -> Option<Frame<'p>> {
        self.calls.pop()
    }

    /// Frames from root to top
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Frame<'p>> {
        std::iter::once(&self.root).chain(self.calls.iter())
    }

    /// Look up a variable: current frame first, then the root frame.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current().get(name).or_else(|| self.root.get(name))
    }
}
