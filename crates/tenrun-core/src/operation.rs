//! Tensor operations.
//!
//! A [`TensorOperation`] is a formal numerical operation on one or more
//! tensors: an opcode, an ordered operand list (position 0 is the result,
//! subsequent positions are inputs), optional complex scalar prefactors, and
//! an optional symbolic index pattern. Operations are immutable once built;
//! ownership is shared between the submitting client and the graph.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::tensor::Tensor;

/// Kind of a tensor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// No-op placeholder; still carries its single operand.
    Noop,
    /// Allocate backend storage for a tensor.
    Create,
    /// Release backend storage of a tensor.
    Destroy,
    /// In-place unary transform (scaling, initialization, functor apply).
    Transform,
    /// Accumulate one tensor into another.
    Add,
    /// Pairwise tensor contraction.
    Contract,
    /// Three-factor decomposition (SVD-like split).
    Decompose,
    /// Persist a tensor through the I/O layer.
    Save,
    /// Restore a tensor through the I/O layer.
    Load,
}

impl OpCode {
    /// Required operand count, if fixed for this opcode.
    pub fn arity(&self) -> Option<usize> {
        match self {
            OpCode::Noop
            | OpCode::Create
            | OpCode::Destroy
            | OpCode::Transform
            | OpCode::Save
            | OpCode::Load => Some(1),
            OpCode::Add => Some(2),
            OpCode::Contract => Some(3),
            OpCode::Decompose => Some(4),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpCode::Noop => "NOOP",
            OpCode::Create => "CREATE",
            OpCode::Destroy => "DESTROY",
            OpCode::Transform => "TRANSFORM",
            OpCode::Add => "ADD",
            OpCode::Contract => "CONTRACT",
            OpCode::Decompose => "DECOMPOSE",
            OpCode::Save => "SAVE",
            OpCode::Load => "LOAD",
        };
        f.write_str(s)
    }
}

/// An immutable tensor operation.
///
/// Operand position 0 is the result tensor; positions >= 1 are inputs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tenrun_core::{Leg, OpCode, Tensor, TensorOperation};
///
/// let d = Arc::new(Tensor::new("d", [Leg::new(0, 4), Leg::new(2, 4)]));
/// let l = Arc::new(Tensor::new("l", [Leg::new(0, 4), Leg::new(1, 8)]));
/// let r = Arc::new(Tensor::new("r", [Leg::new(1, 8), Leg::new(2, 4)]));
///
/// let op = TensorOperation::new(OpCode::Contract, vec![d, l, r])
///     .with_index_pattern("D(a,c)+=L(a,b)*R(b,c)");
/// assert_eq!(op.num_operands(), 3);
/// assert_eq!(op.output().name(), "d");
/// ```
#[derive(Debug, Clone)]
pub struct TensorOperation {
    opcode: OpCode,
    operands: Vec<Arc<Tensor>>,
    scalars: Vec<Complex64>,
    index_pattern: Option<String>,
}

impl TensorOperation {
    /// Build an operation from its opcode and ordered operands.
    ///
    /// # Panics
    ///
    /// Panics if the operand list is empty or does not match the opcode's
    /// fixed arity.
    pub fn new(opcode: OpCode, operands: Vec<Arc<Tensor>>) -> Self {
        assert!(!operands.is_empty(), "{opcode}: operation has no operands");
        if let Some(arity) = opcode.arity() {
            assert_eq!(
                operands.len(),
                arity,
                "{opcode}: expected {arity} operands, got {}",
                operands.len()
            );
        }
        Self {
            opcode,
            operands,
            scalars: Vec::new(),
            index_pattern: None,
        }
    }

    /// Attach scalar prefactors.
    pub fn with_scalars(mut self, scalars: Vec<Complex64>) -> Self {
        self.scalars = scalars;
        self
    }

    /// Attach a symbolic index pattern.
    pub fn with_index_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.index_pattern = Some(pattern.into());
        self
    }

    /// Operation kind.
    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    /// Number of tensor operands.
    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    /// Operand at the given position (0 = result).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    pub fn operand(&self, pos: usize) -> &Arc<Tensor> {
        assert!(
            pos < self.operands.len(),
            "{}: operand position {pos} out of range ({} operands)",
            self.opcode,
            self.operands.len()
        );
        &self.operands[pos]
    }

    /// The result operand (position 0).
    pub fn output(&self) -> &Arc<Tensor> {
        &self.operands[0]
    }

    /// Input operands (positions >= 1).
    pub fn inputs(&self) -> impl Iterator<Item = &Arc<Tensor>> {
        self.operands.iter().skip(1)
    }

    /// Number of scalar prefactors.
    pub fn num_scalars(&self) -> usize {
        self.scalars.len()
    }

    /// Scalar prefactor at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    pub fn scalar(&self, pos: usize) -> Complex64 {
        assert!(
            pos < self.scalars.len(),
            "{}: scalar position {pos} out of range ({} scalars)",
            self.opcode,
            self.scalars.len()
        );
        self.scalars[pos]
    }

    /// Symbolic index pattern, if set.
    pub fn index_pattern(&self) -> Option<&str> {
        self.index_pattern.as_deref()
    }
}

impl fmt::Display for TensorOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.opcode)?;
        for (n, t) in self.operands.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", t.name())?;
        }
        write!(f, "]")?;
        if let Some(pattern) = &self.index_pattern {
            write!(f, " \"{pattern}\"")?;
        }
        Ok(())
    }
}
