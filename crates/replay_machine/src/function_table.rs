use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use thiserror_no_std::Error;

use crate::memory::{self, MemoryError, MemoryManager};
use crate::{Address, BaseType, StackFault, StackValue};

/// Api local function index.
pub type Id = u16;

pub type FunctionResult = Result<Option<StackValue>, FunctionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("the function reported failure")]
    Failed,
    #[error("argument {0} is missing")]
    MissingArgument(usize),
    #[error("the caller expects a return value but none was produced")]
    MissingReturnValue,
    #[error("resource {0} is unknown")]
    UnknownResource(u32),
    #[error("resource {index} is {expected} bytes but {found} were provided")]
    ResourceSize {
        index: u32,
        expected: usize,
        found: usize,
    },
    #[error("bad argument: {0}")]
    Argument(#[from] StackFault),
    #[error("memory access failed: {0}")]
    Memory(#[from] MemoryError),
}

enum Params {
    Arity(usize),
    Typed(Vec<BaseType>),
}

type Body<'f> = Box<dyn FnMut(&mut Call<'_>) -> FunctionResult + 'f>;

/// A native callable with the number, and optionally the types, of the
/// arguments it takes from the stack.
pub struct Function<'f> {
    params: Params,
    body: Body<'f>,
}

impl<'f> Function<'f> {
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: FnMut(&mut Call<'_>) -> FunctionResult + 'f,
    {
        Self {
            params: Params::Arity(arity),
            body: Box::new(body),
        }
    }

    /// A function whose arguments must match `params` exactly. EXTEND is
    /// expected to have widened each argument to its parameter type.
    pub fn typed<F>(params: &[BaseType], body: F) -> Self
    where
        F: FnMut(&mut Call<'_>) -> FunctionResult + 'f,
    {
        Self {
            params: Params::Typed(params.to_vec()),
            body: Box::new(body),
        }
    }

    pub fn arity(&self) -> usize {
        match &self.params {
            Params::Arity(arity) => *arity,
            Params::Typed(params) => params.len(),
        }
    }

    pub fn params(&self) -> Option<&[BaseType]> {
        match &self.params {
            Params::Arity(_) => None,
            Params::Typed(params) => Some(params),
        }
    }

    pub fn check_args(&self, args: &[StackValue]) -> Result<(), StackFault> {
        if args.len() < self.arity() {
            return Err(StackFault::Underflow);
        }
        let Some(params) = self.params() else {
            return Ok(());
        };
        for (param, arg) in params.iter().zip(args) {
            arg.expect(*param)?;
        }
        Ok(())
    }

    pub fn invoke(&mut self, call: &mut Call<'_>) -> FunctionResult {
        (self.body)(call)
    }
}

/// Maps function ids to the callables of one api, or to the builtins.
#[derive(Default)]
pub struct FunctionTable<'f> {
    functions: BTreeMap<Id, Function<'f>>,
}

impl<'f> FunctionTable<'f> {
    pub fn new() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    /// Returns the function previously registered under `id`.
    pub fn insert(&mut self, id: Id, function: Function<'f>) -> Option<Function<'f>> {
        self.functions.insert(id, function)
    }

    pub fn lookup_mut(&mut self, id: Id) -> Option<&mut Function<'f>> {
        self.functions.get_mut(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.functions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// What a native function sees while it runs: its arguments in push order
/// and checked access to replay memory. The memory manager itself is not
/// exposed, so every access goes through the predicates.
pub struct Call<'a> {
    id: Id,
    args: &'a [StackValue],
    push_return: bool,
    memory: &'a mut dyn MemoryManager,
}

impl<'a> Call<'a> {
    pub fn new(
        id: Id,
        args: &'a [StackValue],
        push_return: bool,
        memory: &'a mut dyn MemoryManager,
    ) -> Self {
        Self {
            id,
            args,
            push_return,
            memory,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn args(&self) -> &[StackValue] {
        self.args
    }

    pub fn arg(&self, index: usize) -> Result<StackValue, FunctionError> {
        self.args
            .get(index)
            .copied()
            .ok_or(FunctionError::MissingArgument(index))
    }

    /// True if the caller will push the returned value.
    pub fn push_return(&self) -> bool {
        self.push_return
    }

    /// Classifies a range the callee is about to read, before it commits
    /// to a buffer of that size.
    pub fn classify_read(&self, address: Address, size: usize) -> Result<(), MemoryError> {
        memory::classify_read(&*self.memory, address, size)
    }

    pub fn classify_write(&self, address: Address, size: usize) -> Result<(), MemoryError> {
        memory::classify_write(&*self.memory, address, size)
    }

    pub fn read(&self, address: Address, out: &mut [u8]) -> Result<(), MemoryError> {
        memory::checked_read(&*self.memory, address, out)
    }

    pub fn write(&mut self, address: Address, bytes: &[u8]) -> Result<(), MemoryError> {
        memory::checked_write(&mut *self.memory, address, bytes)
    }
}
