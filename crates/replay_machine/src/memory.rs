use alloc::vec::Vec;
use core::ops::Range;
use thiserror_no_std::Error;

use crate::{Address, BaseType};

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum MemoryError {
    #[error("address {0:#x} is not safe to read")]
    NotReadable(Address),
    #[error("address {0:#x} is not safe to write")]
    NotWritable(Address),
    #[error("{size} bytes at {address:#x} are not constant memory")]
    NotConstant { address: Address, size: usize },
    #[error("{size} bytes at {address:#x} are not volatile memory")]
    NotVolatile { address: Address, size: usize },
    #[error("{size} bytes at {address:#x} are neither constant nor volatile memory")]
    Unclassified { address: Address, size: usize },
    #[error("offset {0:#x} is outside the memory region")]
    BadOffset(u32),
    #[error("address computation overflowed")]
    AddressOverflow,
    #[error("the constant and volatile regions overlap")]
    OverlappingRegions,
}

/// Classification and access to replay memory.
///
/// Implementations own the layout of memory, the interpreter only asks
/// which class an address belongs to and then reads or writes through it.
/// The provided predicates are the only gate in front of any access.
pub trait MemoryManager {
    /// True if `[address, address + size)` is wholly constant memory.
    fn is_constant_address_with_size(&self, address: Address, size: usize) -> bool;

    /// True if `[address, address + size)` is wholly volatile memory.
    fn is_volatile_address_with_size(&self, address: Address, size: usize) -> bool;

    /// True if the capture never recorded the value at `address`.
    fn is_not_observed_absolute_address(&self, address: Address) -> bool;

    fn is_constant_address(&self, address: Address) -> bool;

    fn constant_to_absolute(&self, offset: u32) -> Option<Address>;

    fn volatile_to_absolute(&self, offset: u32) -> Option<Address>;

    fn read(&self, address: Address, out: &mut [u8]) -> Result<(), MemoryError>;

    fn write(&mut self, address: Address, bytes: &[u8]) -> Result<(), MemoryError>;

    /// False if `address` is known not safe to read from.
    fn is_read_address(&self, address: Address) -> bool {
        address != 0 && !self.is_not_observed_absolute_address(address)
    }

    /// False if `address` is known not safe to write to.
    fn is_write_address(&self, address: Address) -> bool {
        address != 0
            && !self.is_not_observed_absolute_address(address)
            && !self.is_constant_address(address)
    }

    fn is_constant_address_for_type(&self, address: Address, ty: BaseType) -> bool {
        self.is_constant_address_with_size(address, ty.size())
    }

    fn is_volatile_address_for_type(&self, address: Address, ty: BaseType) -> bool {
        self.is_volatile_address_with_size(address, ty.size())
    }
}

/// Fails unless `[address, address + size)` may be read: the start is not
/// known unsafe and the whole range is constant or volatile memory.
pub fn classify_read(
    memory: &dyn MemoryManager,
    address: Address,
    size: usize,
) -> Result<(), MemoryError> {
    if !memory.is_read_address(address) {
        return Err(MemoryError::NotReadable(address));
    }
    if !memory.is_constant_address_with_size(address, size)
        && !memory.is_volatile_address_with_size(address, size)
    {
        return Err(MemoryError::Unclassified { address, size });
    }
    Ok(())
}

/// Fails unless `[address, address + size)` may be written, which requires
/// the whole range to be volatile.
pub fn classify_write(
    memory: &dyn MemoryManager,
    address: Address,
    size: usize,
) -> Result<(), MemoryError> {
    if !memory.is_write_address(address) {
        return Err(MemoryError::NotWritable(address));
    }
    if !memory.is_volatile_address_with_size(address, size) {
        return Err(MemoryError::NotVolatile { address, size });
    }
    Ok(())
}

/// Reads `out.len()` bytes after classifying the whole range.
pub fn checked_read(
    memory: &dyn MemoryManager,
    address: Address,
    out: &mut [u8],
) -> Result<(), MemoryError> {
    classify_read(memory, address, out.len())?;
    memory.read(address, out)
}

/// Writes `bytes` after checking the whole range is volatile.
pub fn checked_write(
    memory: &mut dyn MemoryManager,
    address: Address,
    bytes: &[u8],
) -> Result<(), MemoryError> {
    classify_write(&*memory, address, bytes.len())?;
    memory.write(address, bytes)
}

struct Region {
    base: Address,
    bytes: Vec<u8>,
}

impl Region {
    fn end(&self) -> Option<Address> {
        self.base.checked_add(self.bytes.len())
    }

    fn contains(&self, address: Address) -> bool {
        address >= self.base && self.end().is_some_and(|end| address < end)
    }

    fn range(&self, address: Address, size: usize) -> Option<Range<usize>> {
        let start = address.checked_sub(self.base)?;
        let end = start.checked_add(size)?;
        if end > self.bytes.len() {
            return None;
        }
        Some(start..end)
    }

    fn to_absolute(&self, offset: u32) -> Option<Address> {
        let offset = usize::try_from(offset).ok()?;
        self.base.checked_add(offset)
    }
}

/// A memory manager with one constant and one volatile region.
///
/// Constant data is shipped with the capture and served read only. The
/// volatile region is live replay memory. Ranges marked not observed are
/// excluded from both classes.
pub struct RegionMemory {
    constant: Region,
    volatile: Region,
    not_observed: Vec<Range<Address>>,
}

impl RegionMemory {
    pub fn new(
        constant_base: Address,
        constant: Vec<u8>,
        volatile_base: Address,
        volatile_size: usize,
    ) -> Result<Self, MemoryError> {
        let constant = Region {
            base: constant_base,
            bytes: constant,
        };
        let volatile = Region {
            base: volatile_base,
            bytes: alloc::vec![0; volatile_size],
        };
        let constant_end = constant.end().ok_or(MemoryError::AddressOverflow)?;
        let volatile_end = volatile.end().ok_or(MemoryError::AddressOverflow)?;
        if constant.base < volatile_end && volatile.base < constant_end {
            return Err(MemoryError::OverlappingRegions);
        }
        Ok(Self {
            constant,
            volatile,
            not_observed: Vec::new(),
        })
    }

    pub fn mark_not_observed(&mut self, range: Range<Address>) {
        self.not_observed.push(range);
    }

    pub fn constant(&self) -> &[u8] {
        &self.constant.bytes
    }

    pub fn volatile(&self) -> &[u8] {
        &self.volatile.bytes
    }

    pub fn volatile_mut(&mut self) -> &mut [u8] {
        &mut self.volatile.bytes
    }

    pub fn constant_base(&self) -> Address {
        self.constant.base
    }

    pub fn volatile_base(&self) -> Address {
        self.volatile.base
    }

    fn overlaps_not_observed(&self, address: Address, size: usize) -> bool {
        let Some(end) = address.checked_add(size) else {
            return true;
        };
        self.not_observed
            .iter()
            .any(|range| range.start < end && address < range.end)
    }
}

impl MemoryManager for RegionMemory {
    fn is_constant_address_with_size(&self, address: Address, size: usize) -> bool {
        self.constant.range(address, size).is_some() && !self.overlaps_not_observed(address, size)
    }

    fn is_volatile_address_with_size(&self, address: Address, size: usize) -> bool {
        self.volatile.range(address, size).is_some() && !self.overlaps_not_observed(address, size)
    }

    fn is_not_observed_absolute_address(&self, address: Address) -> bool {
        self.not_observed.iter().any(|range| range.contains(&address))
    }

    fn is_constant_address(&self, address: Address) -> bool {
        self.constant.contains(address)
    }

    fn constant_to_absolute(&self, offset: u32) -> Option<Address> {
        self.constant.to_absolute(offset)
    }

    fn volatile_to_absolute(&self, offset: u32) -> Option<Address> {
        self.volatile.to_absolute(offset)
    }

    fn read(&self, address: Address, out: &mut [u8]) -> Result<(), MemoryError> {
        let size = out.len();
        let source = if let Some(range) = self.constant.range(address, size) {
            self.constant.bytes.get(range)
        } else if let Some(range) = self.volatile.range(address, size) {
            self.volatile.bytes.get(range)
        } else {
            None
        };
        let source = source.ok_or(MemoryError::Unclassified { address, size })?;
        out.copy_from_slice(source);
        Ok(())
    }

    fn write(&mut self, address: Address, bytes: &[u8]) -> Result<(), MemoryError> {
        let size = bytes.len();
        let target = self
            .volatile
            .range(address, size)
            .and_then(|range| self.volatile.bytes.get_mut(range))
            .ok_or(MemoryError::NotVolatile { address, size })?;
        target.copy_from_slice(bytes);
        Ok(())
    }
}
