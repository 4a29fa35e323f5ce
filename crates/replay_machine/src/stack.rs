use alloc::vec::Vec as AllocVec;
use heapless::Vec;

use crate::{Address, BaseType, StackFault, StackValue};

/// Fixed depth operand stack. Failed operations leave the stack as it was.
#[derive(Debug, Default)]
pub struct Stack<const DEPTH: usize> {
    values: Vec<StackValue, DEPTH>,
}

impl<const DEPTH: usize> Stack<DEPTH> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, value: StackValue) -> Result<(), StackFault> {
        if self.values.push(value).is_err() {
            return Err(StackFault::Overflow);
        }
        Ok(())
    }

    pub fn pop(&mut self) -> Result<StackValue, StackFault> {
        self.values.pop().ok_or(StackFault::Underflow)
    }

    /// Pops the top value, which must be of type `ty`.
    pub fn pop_typed(&mut self, ty: BaseType) -> Result<StackValue, StackFault> {
        self.top()?.expect(ty)?;
        self.pop()
    }

    /// Pops the top value, which must be one of the pointer types.
    pub fn pop_address(&mut self) -> Result<Address, StackFault> {
        let address = self.top()?.as_address()?;
        self.pop()?;
        Ok(address)
    }

    pub fn top(&self) -> Result<StackValue, StackFault> {
        self.values.last().copied().ok_or(StackFault::Underflow)
    }

    pub fn top_type(&self) -> Result<BaseType, StackFault> {
        Ok(self.top()?.ty())
    }

    /// The top `count` values, deepest first.
    pub fn top_n(&self, count: usize) -> Result<&[StackValue], StackFault> {
        let start = self
            .values
            .len()
            .checked_sub(count)
            .ok_or(StackFault::Underflow)?;
        self.values.get(start..).ok_or(StackFault::Underflow)
    }

    /// Pops `count` values, returned in the order they were pushed.
    pub fn pop_many(&mut self, count: usize) -> Result<AllocVec<StackValue>, StackFault> {
        let values = self.top_n(count)?.to_vec();
        self.discard(count)?;
        Ok(values)
    }

    pub fn discard(&mut self, count: usize) -> Result<(), StackFault> {
        let new_len = self
            .values
            .len()
            .checked_sub(count)
            .ok_or(StackFault::Underflow)?;
        self.values.truncate(new_len);
        Ok(())
    }

    /// Pushes a copy of the value `depth` slots below the top, 0 being the top.
    pub fn clone_at(&mut self, depth: usize) -> Result<(), StackFault> {
        let index = self
            .values
            .len()
            .checked_sub(1)
            .and_then(|top| top.checked_sub(depth))
            .ok_or(StackFault::IndexOutOfRange(depth))?;
        let value = *self
            .values
            .get(index)
            .ok_or(StackFault::IndexOutOfRange(depth))?;
        self.push(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        DEPTH
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn as_slice(&self) -> &[StackValue] {
        self.values.as_slice()
    }
}

#[cfg(test)]
mod test;
