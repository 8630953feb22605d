//! Single-step interpreter
//!
//! There is no native call stack behind function calls. The driver executes
//! exactly one statement attempt per tick against the frame on top of an
//! explicit [`CallStack`]:
//! - A statement whose expression reaches an unresolved call pushes the
//!   callee's frame and suspends; it is replayed once the callee returns.
//! - `return` pops the current frame and leaves its value in the caller's
//!   call cache, where the replayed statement picks it up.
//! - `if` moves the program counter forward over its guarded statements.
//!
//! Because every tick ends at a statement boundary, a host can stop between
//! any two ticks and inspect the call stack.

use crate::ast::{CallSiteId, FunctionDecl};
use crate::program::Program;
use crate::value::{FatalError, RuntimeError, Value};
use log::{debug, info, trace};
use std::fmt;
use std::io::Write;

/// Unwrap `Eval::Done`, or return `$pending` from the enclosing function.
macro_rules! ready {
    ($eval:expr, $pending:expr) => {
        match $eval {
            $crate::interpreter::expr::Eval::Done(value) => value,
            $crate::interpreter::expr::Eval::Pending => return Ok($pending),
        }
    };
}

mod cache;
mod expr;
mod frame;
mod functions;
mod stmt;

pub use cache::CallCache;
pub use frame::{CallStack, Frame};
pub use functions::FunctionTable;

use stmt::Flow;

/// Outcome of one driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// More ticks remain
    Running,
    /// Only the root frame is left and it ran past its last statement
    Finished,
}

/// Counters accumulated over a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Statement attempts
    pub ticks: u64,
    /// Frames pushed
    pub calls: u64,
    /// Frames popped
    pub returns: u64,
    /// Statement attempts suspended on a call and replayed later
    pub replays: u64,
    /// Deepest nesting of active calls, root frame excluded
    pub peak_depth: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} calls={} returns={} replays={} peak_depth={}",
            self.ticks, self.calls, self.returns, self.replays, self.peak_depth
        )
    }
}

/// Interpreter state
///
/// Owns everything that changes during a run; the program is borrowed.
pub struct Interpreter<'p, W> {
    program: &'p Program,
    stack: CallStack<'p>,
    functions: FunctionTable<'p>,
    output: W,
    stats: RunStats,
}

impl<'p, W: Write> Interpreter<'p, W> {
    /// Create an interpreter positioned at the first statement of `program`,
    /// printing to `output`.
    pub fn new(program: &'p Program, output: W) -> Self {
        Self {
            program,
            stack: CallStack::new(program.statements()),
            functions: FunctionTable::new(),
            output,
            stats: RunStats::default(),
        }
    }

    /// Run until the program finishes or a fatal error occurs
    pub fn run(&mut self) -> Result<RunStats, FatalError> {
        info!(
            "running program: {} statements, {} call sites",
            self.program.statements().len(),
            self.program.call_site_count()
        );
        while self.step()? == StepState::Running {}
        info!("program finished: {}", self.stats);
        Ok(self.stats)
    }

    /// Execute one statement attempt against the current frame
    pub fn step(&mut self) -> Result<StepState, FatalError> {
        if self.is_finished() {
            return Ok(StepState::Finished);
        }

        let frame = self.stack.current();
        let Some(stmt) = frame.current_statement() else {
            return Err(self.missing_return());
        };

        self.stats.ticks += 1;
        trace!(
            "[{}] {}: {} | {}",
            self.stack.depth(),
            stmt.line,
            frame.function_name(),
            stmt
        );

        let flow = self
            .execute(stmt)
            .map_err(|error| FatalError {
                line: stmt.line,
                error,
            })?;

        match flow {
            Flow::Next => self.advance(1),
            Flow::Skip(skip) => self.advance(skip + 1),
            Flow::Suspend => self.stats.replays += 1,
            Flow::Return => {}
        }

        Ok(if self.is_finished() {
            StepState::Finished
        } else {
            StepState::Running
        })
    }

    /// True once only the root frame remains and it is past its last statement
    pub fn is_finished(&self) -> bool {
        self.stack.depth() == 1 && self.stack.root().is_at_end()
    }

    /// Line of the statement the next tick will execute
    pub fn current_line(&self) -> Option<u32> {
        self.stack.current().current_statement().map(|s| s.line)
    }

    pub fn call_stack(&self) -> &CallStack<'p> {
        &self.stack
    }

    pub fn functions(&self) -> &FunctionTable<'p> {
        &self.functions
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Complete the current statement: move past it and drop its call results.
    fn advance(&mut self, by: usize) {
        let frame = self.stack.current_mut();
        frame.pc += by;
        frame.cache.clear();
    }

    /// Push a callee frame for the call at `site`
    fn push_call(
        &mut self,
        function: &'p FunctionDecl,
        args: Vec<Value>,
        site: CallSiteId,
    ) {
        let bindings = function
            .params
            .iter()
            .map(String::as_str)
            .zip(args)
            .collect();
        self.stack.push(function, bindings, site);
        self.stats.calls += 1;
        self.stats.peak_depth = self.stats.peak_depth.max(self.stack.depth() - 1);
        debug!(
            "call {} at site {} (depth {})",
            function.name,
            site,
            self.stack.depth()
        );
    }

    /// Pop the current frame and deliver `value` to the caller's cache
    fn return_from_call(&mut self, value: Value) -> Result<(), RuntimeError> {
        let frame = self
            .stack
            .pop()
            .ok_or(RuntimeError::ReturnOutsideFunction)?;
        if let Some(site) = frame.return_target() {
            self.stack.current_mut().cache.fill(site, value);
        }
        self.stats.returns += 1;
        debug!(
            "return {} from {} to site {:?} (depth {})",
            value,
            frame.function_name(),
            frame.return_target(),
            self.stack.depth()
        );
        Ok(())
    }

    /// Error for a call frame whose body ran out without `return`.
    ///
    /// Reported at the body's last statement, or at the calling statement
    /// when the body is empty.
    fn missing_return(&self) -> FatalError {
        let frame = self.stack.current();
        let line = frame
            .code()
            .last()
            .map(|s| s.line)
            .or_else(|| {
                self.stack
                    .caller()
                    .and_then(|caller| caller.current_statement())
                    .map(|s| s.line)
            })
            .unwrap_or(0);
        FatalError {
            line,
            error: RuntimeError::MissingReturn {
                name: frame.function_name().to_string(),
            },
        }
    }
}
