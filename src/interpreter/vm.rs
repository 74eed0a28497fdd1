use tracing::{debug, trace};

use crate::{
    error::RuntimeError,
    interpreter::compiler::{Instruction, Program, Slot},
};

/// Result type used by the virtual machine.
pub type VmResult<T> = Result<T, RuntimeError>;

/// A stack-based virtual machine.
///
/// The machine runs a borrowed [`Program`] in one linear pass. It owns an
/// operand stack of numbers and a slot array for locals that grows on the
/// first write past its end. Arithmetic follows IEEE 754, so dividing by
/// zero produces an infinity or NaN rather than an error.
///
/// ## Example
/// ```
/// use olang::{
///     interpreter::{compiler::compile, vm::Vm},
///     parse,
/// };
///
/// let program = compile(&parse("var x = 4\nx / 2").unwrap()).unwrap();
/// let mut vm = Vm::new(&program);
///
/// assert_eq!(vm.execute().unwrap(), Some(2.0));
/// ```
pub struct Vm<'p> {
    program: &'p Program,
    stack:   Vec<f64>,
    slots:   Vec<Option<f64>>,
}

impl<'p> Vm<'p> {
    /// Creates a machine for `program` with an empty stack and no slots.
    #[must_use]
    pub const fn new(program: &'p Program) -> Self {
        Self { program,
               stack: Vec::new(),
               slots: Vec::new() }
    }

    /// Runs the program until `End` or the last instruction.
    ///
    /// # Returns
    /// The value on top of the operand stack afterwards, or `None` if the
    /// stack is empty.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if an instruction pops an empty stack or
    /// reads a local that was never written.
    pub fn execute(&mut self) -> VmResult<Option<f64>> {
        let program = self.program;
        for (index, instruction) in program.instructions().iter().enumerate() {
            trace!(index, %instruction, depth = self.stack.len(), "executing");

            match *instruction {
                Instruction::LoadConstant(value) => self.stack.push(value.into_inner()),
                Instruction::LoadLocal(slot) => {
                    let value = self.load(slot, index)?;
                    self.stack.push(value);
                },
                Instruction::StoreLocal(slot) => {
                    let value = self.pop(index)?;
                    self.store(slot, value);
                },
                Instruction::Add => self.binary(index, |a, b| a + b)?,
                Instruction::Subtract => self.binary(index, |a, b| a - b)?,
                Instruction::Multiply => self.binary(index, |a, b| a * b)?,
                Instruction::Divide => self.binary(index, |a, b| a / b)?,
                Instruction::Negate => {
                    let value = self.pop(index)?;
                    self.stack.push(-value);
                },
                Instruction::End => break,
            }
        }

        debug!(depth = self.stack.len(), "execution finished");
        Ok(self.stack.last().copied())
    }

    /// The operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    fn pop(&mut self, instruction: usize) -> VmResult<f64> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { instruction })
    }

    /// Pops the later operand, then the earlier one, and pushes
    /// `apply(earlier, later)`.
    fn binary(&mut self, instruction: usize, apply: impl Fn(f64, f64) -> f64) -> VmResult<()> {
        let later = self.pop(instruction)?;
        let earlier = self.pop(instruction)?;
        self.stack.push(apply(earlier, later));
        Ok(())
    }

    fn load(&self, slot: Slot, instruction: usize) -> VmResult<f64> {
        debug_assert!(slot < self.program.locals().len() || self.program.locals().is_empty(),
                      "slot {slot} is not declared");

        self.slots.get(slot).copied().flatten().ok_or_else(|| {
            let position = self.program.position(instruction).unwrap_or_default();
            RuntimeError::UninitializedLocal { name:   self.program
                                                           .slot_name(slot)
                                                           .unwrap_or("<unknown>")
                                                           .to_string(),
                                               line:   position.line,
                                               column: position.column, }
        })
    }

    fn store(&mut self, slot: Slot, value: f64) {
        debug_assert!(slot < self.program.locals().len() || self.program.locals().is_empty(),
                      "slot {slot} is not declared");

        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(value);
    }
}
