//! Constructors for the POST and RESOURCE builtins.
//!
//! The interpreter only knows their reserved ids. The session decides
//! where posted bytes go and where resource bytes come from, and attaches
//! them with `Interpreter::register_builtin`.

use alloc::vec;

use crate::{Function, FunctionError, StackValue};

/// Receives data posted back to the capture host for verification.
pub trait PostSink {
    fn post(&mut self, bytes: &[u8]) -> Result<(), FunctionError>;
}

/// Supplies resource bytes staged alongside the capture, such as buffer
/// or texture contents.
pub trait ResourceProvider {
    fn size(&self, index: u32) -> Option<usize>;
    fn fetch(&mut self, index: u32, out: &mut [u8]) -> Result<(), FunctionError>;
}

/// The POST builtin.
///
/// Called with `[address, size]` it posts that memory range, called with
/// a single value it posts the value's bytes.
pub fn post<'f, S>(mut sink: S) -> Function<'f>
where
    S: PostSink + 'f,
{
    Function::new(2, move |call| {
        match call.args() {
            [value] => sink.post(&value.to_ne_bytes())?,
            [address, size] => {
                let address = address.as_address()?;
                let size = size.as_count()?;
                call.classify_read(address, size)?;
                let mut bytes = vec![0u8; size];
                call.read(address, &mut bytes)?;
                sink.post(&bytes)?;
            }
            args => return Err(FunctionError::MissingArgument(args.len())),
        }
        Ok(None)
    })
}

/// The RESOURCE builtin, called with `[destination, index]`.
pub fn resource<'f, P>(mut provider: P) -> Function<'f>
where
    P: ResourceProvider + 'f,
{
    Function::new(2, move |call| {
        let destination = call.arg(0)?.as_address()?;
        let index = resource_index(call.arg(1)?)?;
        let size = provider
            .size(index)
            .ok_or(FunctionError::UnknownResource(index))?;
        call.classify_write(destination, size)?;
        let mut bytes = vec![0u8; size];
        provider.fetch(index, &mut bytes)?;
        call.write(destination, &bytes)?;
        Ok(None)
    })
}

fn resource_index(value: StackValue) -> Result<u32, FunctionError> {
    let index = value.as_count()?;
    u32::try_from(index).map_err(|_| FunctionError::UnknownResource(u32::MAX))
}
