use super::*;
extern crate std;

const DEPTH: usize = 4;

#[test]
fn test_push_pop_restores_state() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    stack.push(StackValue::u32(1))?;
    let before = stack.as_slice().to_vec();

    stack.push(StackValue::u32(2))?;
    stack.push(StackValue::i32(-3))?;
    stack.pop()?;
    stack.pop()?;

    assert_eq!(stack.as_slice(), before.as_slice());
    Ok(())
}

#[test]
fn test_overflow_leaves_entries_intact() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    for value in 0..DEPTH as u32 {
        stack.push(StackValue::u32(value))?;
    }
    let err = stack.push(StackValue::u32(99)).unwrap_err();
    assert_eq!(err, StackFault::Overflow);
    assert_eq!(stack.len(), DEPTH);
    assert_eq!(stack.top()?, StackValue::u32(3));
    assert_eq!(stack.as_slice()[0], StackValue::u32(0));
    Ok(())
}

#[test]
fn test_pop_on_empty_fails() {
    let mut stack = Stack::<DEPTH>::new();
    assert_eq!(stack.pop(), Err(StackFault::Underflow));
    assert_eq!(stack.discard(1), Err(StackFault::Underflow));
    assert!(stack.is_empty());
}

#[test]
fn test_typed_pop_rejects_mismatch() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    stack.push(StackValue::i32(5))?;
    let err = stack.pop_typed(BaseType::Uint32).unwrap_err();
    assert_eq!(
        err,
        StackFault::TypeMismatch {
            expected: BaseType::Uint32,
            found: BaseType::Int32,
        }
    );
    // Not consumed.
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.pop_typed(BaseType::Int32)?.as_i64(), 5);
    Ok(())
}

#[test]
fn test_pop_address_requires_pointer() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    stack.push(StackValue::u64(0x1000))?;
    assert_eq!(
        stack.pop_address(),
        Err(StackFault::NotAPointer(BaseType::Uint64))
    );
    stack.push(StackValue::pointer(BaseType::VolatilePointer, 0x2000))?;
    assert_eq!(stack.pop_address()?, 0x2000);
    Ok(())
}

#[test]
fn test_pop_many_keeps_push_order() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    stack.push(StackValue::u32(1))?;
    stack.push(StackValue::u32(2))?;
    stack.push(StackValue::u32(3))?;
    let values = stack.pop_many(2)?;
    assert_eq!(values, std::vec![StackValue::u32(2), StackValue::u32(3)]);
    assert_eq!(stack.len(), 1);

    assert_eq!(stack.pop_many(2), Err(StackFault::Underflow));
    assert_eq!(stack.len(), 1);
    Ok(())
}

#[test]
fn test_clone_at_depth() -> Result<(), StackFault> {
    let mut stack = Stack::<DEPTH>::new();
    stack.push(StackValue::u32(10))?;
    stack.push(StackValue::u32(20))?;
    stack.clone_at(0)?;
    assert_eq!(stack.top()?, StackValue::u32(20));
    stack.clone_at(2)?;
    assert_eq!(stack.top()?, StackValue::u32(10));
    assert_eq!(stack.clone_at(4), Err(StackFault::IndexOutOfRange(4)));
    Ok(())
}
