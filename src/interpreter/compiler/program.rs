use std::fmt::{self, Display, Formatter};

use indexmap::{IndexMap, map::Entry};
use ordered_float::OrderedFloat;

use crate::interpreter::lexer::Position;

/// Index of a local variable in the virtual machine's slot array.
pub type Slot = usize;

/// A single virtual machine instruction.
///
/// Each variant carries the operand it needs, if any. Constants are wrapped
/// in [`OrderedFloat`] so instructions, and whole programs, can be compared
/// and hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Pushes a constant.
    LoadConstant(OrderedFloat<f64>),
    /// Pushes the current value of a local.
    LoadLocal(Slot),
    /// Pops the top of the stack into a local.
    StoreLocal(Slot),
    /// Pops two values and pushes their sum.
    Add,
    /// Pops two values and pushes `earlier - later`.
    Subtract,
    /// Pops two values and pushes their product.
    Multiply,
    /// Pops two values and pushes `earlier / later`.
    Divide,
    /// Pops one value and pushes its negation.
    Negate,
    /// Stops execution.
    End,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadConstant(value) => write!(f, "LOAD_CONSTANT {value}"),
            Self::LoadLocal(slot) => write!(f, "LOAD_LOCAL {slot}"),
            Self::StoreLocal(slot) => write!(f, "STORE_LOCAL {slot}"),
            Self::Add => write!(f, "ADD"),
            Self::Subtract => write!(f, "SUBTRACT"),
            Self::Multiply => write!(f, "MULTIPLY"),
            Self::Divide => write!(f, "DIVIDE"),
            Self::Negate => write!(f, "NEGATE"),
            Self::End => write!(f, "END"),
        }
    }
}

/// A compiled program.
///
/// Holds the instruction sequence, the source position each instruction was
/// compiled from, and the table of declared locals. Locals get slots in
/// declaration order, so the `i`-th entry of [`Program::locals`] always owns
/// slot `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    positions:    Vec<Position>,
    locals:       IndexMap<String, Slot>,
}

impl Program {
    /// Creates an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a program from raw instructions, without locals or positions.
    ///
    /// Useful for feeding hand-written bytecode to the virtual machine.
    ///
    /// ## Example
    /// ```
    /// use olang::interpreter::{
    ///     compiler::{Instruction, Program},
    ///     vm::Vm,
    /// };
    /// use ordered_float::OrderedFloat;
    ///
    /// let program = Program::from_instructions(vec![Instruction::LoadConstant(OrderedFloat(4.0)),
    ///                                               Instruction::Negate,
    ///                                               Instruction::End]);
    ///
    /// assert_eq!(Vm::new(&program).execute().unwrap(), Some(-4.0));
    /// ```
    #[must_use]
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        let positions = vec![Position::default(); instructions.len()];
        Self { instructions,
               positions,
               locals: IndexMap::new() }
    }

    /// Appends an instruction compiled from the node at `position`.
    pub fn emit(&mut self, instruction: Instruction, position: Position) {
        self.instructions.push(instruction);
        self.positions.push(position);
    }

    /// Registers a new local and returns its slot, or `None` if the name is
    /// already declared.
    pub fn declare(&mut self, name: &str) -> Option<Slot> {
        let slot = self.locals.len();
        match self.locals.entry(name.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => Some(*entry.insert(slot)),
        }
    }

    /// Looks up the slot of a declared local.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<Slot> {
        self.locals.get(name).copied()
    }

    /// Name of the local that owns `slot`.
    #[must_use]
    pub fn slot_name(&self, slot: Slot) -> Option<&str> {
        self.locals.get_index(slot).map(|(name, _)| name.as_str())
    }

    /// The instruction sequence.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Source position of the instruction at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Position> {
        self.positions.get(index).copied()
    }

    /// Declared locals, in slot order.
    #[must_use]
    pub const fn locals(&self) -> &IndexMap<String, Slot> {
        &self.locals
    }
}

/// Disassembly listing: a header of locals followed by one numbered
/// instruction per line.
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, slot) in &self.locals {
            writeln!(f, "; local {slot}: {name}")?;
        }
        for (index, (instruction, position)) in
            self.instructions.iter().zip(&self.positions).enumerate()
        {
            writeln!(f, "{index:04} {:>7}  {instruction}", position.to_string())?;
        }
        Ok(())
    }
}
