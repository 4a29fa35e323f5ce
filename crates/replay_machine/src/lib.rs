#![no_std]

#![cfg_attr(
    not(test),
    deny(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing,
        clippy::string_slice,
        clippy::arithmetic_side_effects,
        clippy::panicking_unwrap,
        clippy::out_of_bounds_indexing,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
    )
)]
#![cfg_attr(not(test), warn(clippy::missing_panics_doc))]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;
use core::array;
use thiserror_no_std::Error;
use tracing::{debug, trace, warn};
use variant_count::VariantCount;

pub mod base_type;
pub mod builder;
pub mod builtins;
pub mod function_table;
pub mod memory;
pub mod stack;

pub use base_type::{BaseType, Extension, StackValue};
pub use function_table::{Call, Function, FunctionError, FunctionResult, FunctionTable, Id};
pub use memory::{MemoryError, MemoryManager, RegionMemory};
pub use stack::Stack;

/// This crate implements the replay side virtual machine.
///
/// A replay is driven by an opcode stream of 32 bit words produced by the
/// capture host. Each word is decoded purely by bit position:
/// `
///     bits[31:26] opcode
///     bits[25:20] type
///     bits[19:16] api index        (CALL only)
///     bit [24]    push return flag (CALL only)
///     bits[19:0]  20 bit payload
///     bits[25:0]  26 bit payload
/// `
/// The machine owns a fixed depth stack of typed values and a set of
/// function tables, one builtin table plus one table per api. Api tables
/// are attached lazily through the callback handed to `Interpreter::new`.
///
/// Memory is never touched directly. Every load and store is first
/// classified through the `MemoryManager` as constant, volatile or not
/// observed and only then read or written.
pub type InstructionWord = u32;

/// Absolute address in the replay host's address space. Pointers are
/// rewritten to this width by the capture side.
pub type Address = usize;

pub const TYPE_MASK: u32 = 0x03f0_0000;
pub const FUNCTION_ID_MASK: u32 = 0x0000_ffff;
pub const API_INDEX_MASK: u32 = 0x000f_0000;
pub const PUSH_RETURN_MASK: u32 = 0x0100_0000;
pub const DATA_MASK20: u32 = 0x000f_ffff;
pub const DATA_MASK26: u32 = 0x03ff_ffff;
pub const API_BIT_SHIFT: u32 = 16;
pub const TYPE_BIT_SHIFT: u32 = 20;
pub const OPCODE_BIT_SHIFT: u32 = 26;

/// Number of api table slots addressable by the 4 bit api index.
pub const API_COUNT: usize = 16;

pub const POST_FUNCTION_ID: Id = 0xff00;
pub const RESOURCE_FUNCTION_ID: Id = 0xff01;
pub const PRINT_STACK_FUNCTION_ID: Id = 0xff80;
// 0xff81..=0xffff reserved for synthetic functions.
pub const BUILTIN_ID_START: Id = 0xff00;

pub fn is_builtin_id(id: Id) -> bool {
    id >= BUILTIN_ID_START
}

pub fn extract_opcode(word: InstructionWord) -> u8 {
    (word >> OPCODE_BIT_SHIFT) as u8
}

pub fn extract_type_code(word: InstructionWord) -> u8 {
    ((word & TYPE_MASK) >> TYPE_BIT_SHIFT) as u8
}

pub fn extract_type(word: InstructionWord) -> Result<BaseType, DecodeError> {
    BaseType::try_from(extract_type_code(word))
}

pub fn extract_20bit_data(word: InstructionWord) -> u32 {
    word & DATA_MASK20
}

pub fn extract_26bit_data(word: InstructionWord) -> u32 {
    word & DATA_MASK26
}

pub fn extract_api_index(word: InstructionWord) -> u8 {
    ((word & API_INDEX_MASK) >> API_BIT_SHIFT) as u8
}

pub fn extract_function_id(word: InstructionWord) -> Id {
    (word & FUNCTION_ID_MASK) as Id
}

pub fn has_push_return(word: InstructionWord) -> bool {
    word & PUSH_RETURN_MASK != 0
}

#[repr(u8)] // Must match the 6 bit opcode field
#[derive(VariantCount, Clone, Copy, Debug, Eq, PartialEq)]
pub enum InstructionCode {
    Call,
    PushI,
    LoadC,
    LoadV,
    Load,
    Pop,
    StoreV,
    Store,
    Resource,
    Post,
    Copy,
    Clone,
    StrCpy,
    Extend,
    Add,
    Label,
}

// Ordered by discriminant so the opcode value indexes it directly.
const INSTRUCTION_CODES: [InstructionCode; InstructionCode::VARIANT_COUNT] = [
    InstructionCode::Call,
    InstructionCode::PushI,
    InstructionCode::LoadC,
    InstructionCode::LoadV,
    InstructionCode::Load,
    InstructionCode::Pop,
    InstructionCode::StoreV,
    InstructionCode::Store,
    InstructionCode::Resource,
    InstructionCode::Post,
    InstructionCode::Copy,
    InstructionCode::Clone,
    InstructionCode::StrCpy,
    InstructionCode::Extend,
    InstructionCode::Add,
    InstructionCode::Label,
];

impl From<InstructionCode> for u8 {
    fn from(code: InstructionCode) -> u8 {
        code as u8
    }
}

impl TryFrom<u8> for InstructionCode {
    type Error = DecodeError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        INSTRUCTION_CODES
            .get(usize::from(value))
            .copied()
            .ok_or(DecodeError::UnknownOpcode(value))
    }
}

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeError {
    #[error("the value {0} is an invalid opcode")]
    UnknownOpcode(u8),
    #[error("the value {0} is an invalid base type")]
    UnknownType(u8),
    #[error("opcode {0:?} can not operate on void")]
    VoidOperand(InstructionCode),
    #[error("opcode {code:?} can not take {count} operands")]
    OperandCount { code: InstructionCode, count: u32 },
}

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum StackFault {
    #[error("attempted opperation would overflow the stack")]
    Overflow,
    #[error("attempted opperation would underflow the stack")]
    Underflow,
    #[error("expected a {expected:?} on the stack but found {found:?}")]
    TypeMismatch { expected: BaseType, found: BaseType },
    #[error("a {0:?} can not be used as an address")]
    NotAPointer(BaseType),
    #[error("a {0:?} can not be used as a count")]
    NotACount(BaseType),
    #[error("stack index {0} is out of range")]
    IndexOutOfRange(usize),
}

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum DispatchError {
    #[error("builtin function {0:#06x} is not registered")]
    UnknownBuiltin(Id),
    #[error("function {id:#06x} is not in the table of api {api}")]
    UnknownFunction { api: u8, id: Id },
    #[error("api {0} could not be registered")]
    ApiNotRegistered(u8),
    #[error("api index {0} is out of range")]
    ApiIndexOutOfRange(u8),
    #[error("function id {0:#06x} is outside the builtin range")]
    NotABuiltinId(Id),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("stack fault: {0}")]
    Stack(#[from] StackFault),
    #[error("memory safety violation: {0}")]
    Memory(#[from] MemoryError),
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("function {id:#06x} failed: {source}")]
    Callee { id: Id, source: FunctionError },
}

/// The fault that halted a run together with where it happened.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("instruction {index} ({word:#010x}) failed after label {label}: {fault}")]
pub struct RunError {
    pub index: usize,
    pub word: InstructionWord,
    pub label: u32,
    pub fault: Fault,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Idle,
    Running,
    Halted(Outcome),
}

/// Invoked with the interpreter and an api index when a CALL names an api
/// with no attached table. Expected to call `set_renderer_functions`.
pub type ApiRequestCallback<'m, const STACK_DEPTH: usize> =
    Box<dyn FnMut(&mut Interpreter<'m, STACK_DEPTH>, u8) -> bool + 'm>;

pub struct Interpreter<'m, const STACK_DEPTH: usize> {
    memory: &'m mut dyn MemoryManager,
    builtins: FunctionTable<'m>,
    renderer_functions: [Option<FunctionTable<'m>>; API_COUNT],
    api_request: Option<ApiRequestCallback<'m, STACK_DEPTH>>,
    stack: Stack<STACK_DEPTH>,
    label: u32,
    state: State,
    last_error: Option<RunError>,
}

impl<'m, const STACK_DEPTH: usize> Interpreter<'m, STACK_DEPTH> {
    pub fn new<F>(memory: &'m mut dyn MemoryManager, api_request: F) -> Self
    where
        F: FnMut(&mut Interpreter<'m, STACK_DEPTH>, u8) -> bool + 'm,
    {
        Self {
            memory,
            builtins: FunctionTable::new(),
            renderer_functions: array::from_fn(|_| None),
            api_request: Some(Box::new(api_request)),
            stack: Stack::new(),
            label: 0,
            state: State::Idle,
            last_error: None,
        }
    }

    /// Adds `function` to the builtin table. Only ids in the reserved
    /// range can be reached by CALL, so other ids are rejected.
    pub fn register_builtin(
        &mut self,
        id: Id,
        function: Function<'m>,
    ) -> Result<(), DispatchError> {
        if !is_builtin_id(id) {
            return Err(DispatchError::NotABuiltinId(id));
        }
        self.builtins.insert(id, function);
        Ok(())
    }

    /// Attaches `table` to `api`, replacing any table attached before.
    pub fn set_renderer_functions(
        &mut self,
        api: u8,
        table: FunctionTable<'m>,
    ) -> Result<(), DispatchError> {
        let Some(slot) = self.renderer_functions.get_mut(usize::from(api)) else {
            return Err(DispatchError::ApiIndexOutOfRange(api));
        };
        *slot = Some(table);
        Ok(())
    }

    pub fn has_api(&self, api: u8) -> bool {
        matches!(self.renderer_functions.get(usize::from(api)), Some(Some(_)))
    }

    /// Makes sure `api` has a table, asking the api request callback for
    /// one if it does not. Returns true if a table was already attached.
    pub fn register_api(&mut self, api: u8) -> bool {
        if self.has_api(api) {
            return true;
        }
        if usize::from(api) >= API_COUNT {
            return false;
        }
        let Some(mut request) = self.api_request.take() else {
            // Re-entrant request from inside the callback.
            return false;
        };
        debug!(api, "requesting api functions");
        let registered = request(self, api);
        self.api_request = Some(request);
        debug!(api, registered, "api request finished");
        registered
    }

    pub fn label(&self) -> u32 {
        self.label
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stack(&self) -> &Stack<STACK_DEPTH> {
        &self.stack
    }

    pub fn last_error(&self) -> Option<&RunError> {
        self.last_error.as_ref()
    }

    /// Runs `instructions` in order, halting at the first failing one.
    pub fn run(&mut self, instructions: &[InstructionWord]) -> bool {
        self.try_run(instructions).is_ok()
    }

    pub fn try_run(&mut self, instructions: &[InstructionWord]) -> Result<(), RunError> {
        self.stack.clear();
        self.last_error = None;
        self.state = State::Running;
        debug!(count = instructions.len(), label = self.label, "run started");

        for (index, &word) in instructions.iter().enumerate() {
            trace!(index, word, "interpret");
            if let Err(fault) = self.interpret(word) {
                let error = RunError {
                    index,
                    word,
                    label: self.label,
                    fault,
                };
                warn!(index, word, label = self.label, fault = ?error.fault, "run halted");
                self.state = State::Halted(Outcome::Failure);
                self.last_error = Some(error.clone());
                return Err(error);
            }
        }

        self.state = State::Halted(Outcome::Success);
        debug!(label = self.label, depth = self.stack.len(), "run finished");
        Ok(())
    }

    fn interpret(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let code = InstructionCode::try_from(extract_opcode(word))?;
        match code {
            InstructionCode::Call => self.call(word),
            InstructionCode::PushI => self.push_i(word),
            InstructionCode::LoadC => self.load_c(word),
            InstructionCode::LoadV => self.load_v(word),
            InstructionCode::Load => self.load(word),
            InstructionCode::Pop => self.pop(word),
            InstructionCode::StoreV => self.store_v(word),
            InstructionCode::Store => self.store(),
            InstructionCode::Resource => self.resource(word),
            InstructionCode::Post => self.post(word),
            InstructionCode::Copy => self.copy(word),
            InstructionCode::Clone => self.clone_value(word),
            InstructionCode::StrCpy => self.strcpy(word),
            InstructionCode::Extend => self.extend(word),
            InstructionCode::Add => self.add(word),
            InstructionCode::Label => self.set_label(word),
        }
    }

    fn call(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let id = extract_function_id(word);
        let api = extract_api_index(word);
        let push_return = has_push_return(word);

        // Reserved ids never reach an api table, whatever the api field says.
        if is_builtin_id(id) {
            if id == PRINT_STACK_FUNCTION_ID {
                self.print_stack();
                return Ok(());
            }
            let function = self
                .builtins
                .lookup_mut(id)
                .ok_or(DispatchError::UnknownBuiltin(id))?;
            return invoke(function, &mut self.stack, &mut *self.memory, id, push_return);
        }

        if !self.register_api(api) {
            return Err(DispatchError::ApiNotRegistered(api).into());
        }
        let Some(Some(table)) = self.renderer_functions.get_mut(usize::from(api)) else {
            return Err(DispatchError::ApiNotRegistered(api).into());
        };
        let function = table
            .lookup_mut(id)
            .ok_or(DispatchError::UnknownFunction { api, id })?;
        invoke(function, &mut self.stack, &mut *self.memory, id, push_return)
    }

    fn push_i(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let ty = extract_type(word)?;
        let data = extract_20bit_data(word);
        let value = match ty {
            BaseType::ConstantPointer => {
                let address = self
                    .memory
                    .constant_to_absolute(data)
                    .ok_or(MemoryError::BadOffset(data))?;
                StackValue::pointer(ty, address)
            }
            BaseType::VolatilePointer => {
                let address = self
                    .memory
                    .volatile_to_absolute(data)
                    .ok_or(MemoryError::BadOffset(data))?;
                StackValue::pointer(ty, address)
            }
            _ => StackValue::from_immediate(ty, data)
                .ok_or(DecodeError::VoidOperand(InstructionCode::PushI))?,
        };
        self.stack.push(value)?;
        Ok(())
    }

    fn load_c(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let ty = value_type(word, InstructionCode::LoadC)?;
        let offset = extract_20bit_data(word);
        let address = self
            .memory
            .constant_to_absolute(offset)
            .ok_or(MemoryError::BadOffset(offset))?;
        if !self.memory.is_constant_address_for_type(address, ty) {
            return Err(MemoryError::NotConstant { address, size: ty.size() }.into());
        }
        let value = read_value(&*self.memory, address, ty)?;
        self.stack.push(value)?;
        Ok(())
    }

    fn load_v(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let ty = value_type(word, InstructionCode::LoadV)?;
        let offset = extract_20bit_data(word);
        let address = self
            .memory
            .volatile_to_absolute(offset)
            .ok_or(MemoryError::BadOffset(offset))?;
        if !self.memory.is_volatile_address_for_type(address, ty) {
            return Err(MemoryError::NotVolatile { address, size: ty.size() }.into());
        }
        let value = read_value(&*self.memory, address, ty)?;
        self.stack.push(value)?;
        Ok(())
    }

    fn load(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let ty = value_type(word, InstructionCode::Load)?;
        let address = self.stack.pop_address()?;
        if !self.memory.is_read_address(address) {
            return Err(MemoryError::NotReadable(address).into());
        }
        if !self.memory.is_constant_address_for_type(address, ty)
            && !self.memory.is_volatile_address_for_type(address, ty)
        {
            return Err(MemoryError::Unclassified { address, size: ty.size() }.into());
        }
        let value = read_value(&*self.memory, address, ty)?;
        self.stack.push(value)?;
        Ok(())
    }

    fn pop(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let count = payload_to_usize(extract_26bit_data(word));
        self.stack.discard(count)?;
        Ok(())
    }

    fn store_v(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let offset = extract_26bit_data(word);
        let address = self
            .memory
            .volatile_to_absolute(offset)
            .ok_or(MemoryError::BadOffset(offset))?;
        let value = self.stack.pop()?;
        write_value(&mut *self.memory, address, value)
    }

    fn store(&mut self) -> Result<(), Fault> {
        let address = self.stack.pop_address()?;
        let value = self.stack.pop()?;
        write_value(&mut *self.memory, address, value)
    }

    fn resource(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let index = extract_26bit_data(word);
        let destination = self.stack.pop()?;
        destination.as_address()?;
        let args = [destination, StackValue::u32(index)];
        let function = self
            .builtins
            .lookup_mut(RESOURCE_FUNCTION_ID)
            .ok_or(DispatchError::UnknownBuiltin(RESOURCE_FUNCTION_ID))?;
        invoke_with(function, &mut self.stack, &mut *self.memory, RESOURCE_FUNCTION_ID, &args, false)
    }

    fn post(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let ty = extract_type(word)?;
        let args = if ty == BaseType::Void {
            // Range form: [address, size]
            let args = self.stack.pop_many(2)?;
            if let Some(address) = args.first() {
                address.as_address()?;
            }
            args
        } else {
            vec![self.stack.pop_typed(ty)?]
        };
        let function = self
            .builtins
            .lookup_mut(POST_FUNCTION_ID)
            .ok_or(DispatchError::UnknownBuiltin(POST_FUNCTION_ID))?;
        invoke_with(function, &mut self.stack, &mut *self.memory, POST_FUNCTION_ID, &args, false)
    }

    fn copy(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let count = payload_to_usize(extract_26bit_data(word));
        let target = self.stack.pop_address()?;
        let source = self.stack.pop_address()?;
        memory::classify_write(&*self.memory, target, count)?;
        memory::classify_read(&*self.memory, source, count)?;
        let mut buffer = vec![0u8; count];
        memory::checked_read(&*self.memory, source, &mut buffer)?;
        memory::checked_write(&mut *self.memory, target, &buffer)?;
        Ok(())
    }

    fn clone_value(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let depth = payload_to_usize(extract_26bit_data(word));
        self.stack.clone_at(depth)?;
        Ok(())
    }

    fn strcpy(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let count = payload_to_usize(extract_26bit_data(word));
        let target = self.stack.pop_address()?;
        let source = self.stack.pop_address()?;
        if !self.memory.is_write_address(target) {
            return Err(MemoryError::NotWritable(target).into());
        }
        if !self.memory.is_read_address(source) {
            return Err(MemoryError::NotReadable(source).into());
        }
        let Some(limit) = count.checked_sub(1) else {
            return Ok(());
        };

        let mut copied: usize = 0;
        while copied < limit {
            let from = offset_address(source, copied)?;
            let mut byte = [0u8; 1];
            memory::checked_read(&*self.memory, from, &mut byte)?;
            if byte == [0] {
                break;
            }
            let to = offset_address(target, copied)?;
            memory::checked_write(&mut *self.memory, to, &byte)?;
            copied = copied.checked_add(1).ok_or(MemoryError::AddressOverflow)?;
        }

        let terminator = offset_address(target, copied)?;
        memory::checked_write(&mut *self.memory, terminator, &[0])?;
        Ok(())
    }

    fn extend(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let data = extract_26bit_data(word);
        let value = self.stack.pop()?;
        self.stack.push(value.extend(data)?)?;
        Ok(())
    }

    fn add(&mut self, word: InstructionWord) -> Result<(), Fault> {
        let payload = extract_26bit_data(word);
        if payload < 2 {
            return Err(DecodeError::OperandCount {
                code: InstructionCode::Add,
                count: payload,
            }
            .into());
        }
        let count = payload_to_usize(payload);
        let operands = self.stack.top_n(count)?;
        let sum = base_type::sum(operands)?;
        self.stack.discard(count)?;
        self.stack.push(sum)?;
        Ok(())
    }

    fn set_label(&mut self, word: InstructionWord) -> Result<(), Fault> {
        self.label = extract_26bit_data(word);
        trace!(label = self.label, "label");
        Ok(())
    }

    fn print_stack(&self) {
        debug!(depth = self.stack.len(), label = self.label, "stack dump");
        for (depth, value) in self.stack.as_slice().iter().rev().enumerate() {
            debug!(depth, ty = ?value.ty(), bits = value.bits(), "stack value");
        }
    }
}

fn invoke<const STACK_DEPTH: usize>(
    function: &mut Function<'_>,
    stack: &mut Stack<STACK_DEPTH>,
    memory: &mut dyn MemoryManager,
    id: Id,
    push_return: bool,
) -> Result<(), Fault> {
    let args = stack.top_n(function.arity())?.to_vec();
    function.check_args(&args)?;
    stack.discard(args.len())?;
    invoke_with(function, stack, memory, id, &args, push_return)
}

fn invoke_with<const STACK_DEPTH: usize>(
    function: &mut Function<'_>,
    stack: &mut Stack<STACK_DEPTH>,
    memory: &mut dyn MemoryManager,
    id: Id,
    args: &[StackValue],
    push_return: bool,
) -> Result<(), Fault> {
    let mut call = Call::new(id, args, push_return, memory);
    let result = function
        .invoke(&mut call)
        .map_err(|source| Fault::Callee { id, source })?;
    match (push_return, result) {
        (true, Some(value)) => stack.push(value)?,
        (true, None) => {
            return Err(Fault::Callee {
                id,
                source: FunctionError::MissingReturnValue,
            });
        }
        (false, _) => {}
    }
    Ok(())
}

fn value_type(word: InstructionWord, code: InstructionCode) -> Result<BaseType, DecodeError> {
    let ty = extract_type(word)?;
    if ty == BaseType::Void {
        return Err(DecodeError::VoidOperand(code));
    }
    Ok(ty)
}

fn read_value(
    memory: &dyn MemoryManager,
    address: Address,
    ty: BaseType,
) -> Result<StackValue, Fault> {
    let mut buffer = [0u8; 8];
    let bytes = buffer
        .get_mut(..ty.size())
        .ok_or(MemoryError::Unclassified { address, size: ty.size() })?;
    memory.read(address, bytes)?;
    let value = StackValue::from_ne_bytes(ty, bytes)
        .ok_or(MemoryError::Unclassified { address, size: ty.size() })?;
    Ok(value)
}

fn write_value(
    memory: &mut dyn MemoryManager,
    address: Address,
    value: StackValue,
) -> Result<(), Fault> {
    if !memory.is_write_address(address) {
        return Err(MemoryError::NotWritable(address).into());
    }
    let ty = value.ty();
    if !memory.is_volatile_address_for_type(address, ty) {
        return Err(MemoryError::NotVolatile { address, size: ty.size() }.into());
    }
    memory.write(address, &value.to_ne_bytes())?;
    Ok(())
}

fn offset_address(base: Address, offset: usize) -> Result<Address, MemoryError> {
    base.checked_add(offset).ok_or(MemoryError::AddressOverflow)
}

fn payload_to_usize(payload: u32) -> usize {
    const { assert!(size_of::<u32>() <= size_of::<usize>()) };
    // Lossless per the assertion above.
    payload as usize
}
