use heapless::Vec;
use variant_count::VariantCount;

use crate::{Address, DecodeError, StackFault};

const IMMEDIATE_BITS: u32 = 20;
const EXTEND_BITS: u32 = 26;
const FLOAT_IMMEDIATE_SHIFT: u32 = 12;
const DOUBLE_IMMEDIATE_SHIFT: u32 = 44;
const FLOAT_EXTEND_MASK: u64 = 0xfff;

#[repr(u8)] // Must match the 6 bit type field
#[derive(VariantCount, Clone, Copy, Debug, Eq, PartialEq)]
pub enum BaseType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    AbsolutePointer,
    ConstantPointer,
    VolatilePointer,
    Void,
}

const BASE_TYPES: [BaseType; BaseType::VARIANT_COUNT] = [
    BaseType::Bool,
    BaseType::Int8,
    BaseType::Int16,
    BaseType::Int32,
    BaseType::Int64,
    BaseType::Uint8,
    BaseType::Uint16,
    BaseType::Uint32,
    BaseType::Uint64,
    BaseType::Float,
    BaseType::Double,
    BaseType::AbsolutePointer,
    BaseType::ConstantPointer,
    BaseType::VolatilePointer,
    BaseType::Void,
];

impl From<BaseType> for u8 {
    fn from(ty: BaseType) -> u8 {
        ty as u8
    }
}

impl TryFrom<u8> for BaseType {
    type Error = DecodeError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BASE_TYPES
            .get(usize::from(value))
            .copied()
            .ok_or(DecodeError::UnknownType(value))
    }
}

/// How a narrow payload is widened into a value of a given type, used by
/// both PUSH_I and EXTEND.
///
/// | type                  | PUSH_I payload           | EXTEND                          |
/// |-----------------------|--------------------------|---------------------------------|
/// | Int8..Int64           | sign extended from bit 19| `v << 26 | data`, sign extended |
/// | Bool, Uint8..Uint64   | zero extended            | `v << 26 | data`, truncated     |
/// | pointers              | zero extended            | `v << 26 | data`, truncated     |
/// | Float                 | bits 31..12              | data bits 11..0 into bits 11..0 |
/// | Double                | bits 63..44              | data into bits 25..0            |
///
/// Truncation and sign extension are always from the width of the type,
/// pointers being as wide as the replay host's pointers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extension {
    Sign,
    Zero,
    Float,
}

impl BaseType {
    pub const fn size(self) -> usize {
        match self {
            BaseType::Bool | BaseType::Int8 | BaseType::Uint8 => 1,
            BaseType::Int16 | BaseType::Uint16 => 2,
            BaseType::Int32 | BaseType::Uint32 | BaseType::Float => 4,
            BaseType::Int64 | BaseType::Uint64 | BaseType::Double => 8,
            // Captured pointers are rewritten to the replay host's width.
            BaseType::AbsolutePointer | BaseType::ConstantPointer | BaseType::VolatilePointer => {
                size_of::<Address>()
            }
            BaseType::Void => 0,
        }
    }

    pub const fn is_pointer(self) -> bool {
        matches!(
            self,
            BaseType::AbsolutePointer | BaseType::ConstantPointer | BaseType::VolatilePointer
        )
    }

    pub const fn is_integer(self) -> bool {
        matches!(self.extension(), Some(Extension::Sign))
            || matches!(
                self,
                BaseType::Uint8 | BaseType::Uint16 | BaseType::Uint32 | BaseType::Uint64
            )
    }

    pub const fn extension(self) -> Option<Extension> {
        match self {
            BaseType::Int8 | BaseType::Int16 | BaseType::Int32 | BaseType::Int64 => {
                Some(Extension::Sign)
            }
            BaseType::Bool
            | BaseType::Uint8
            | BaseType::Uint16
            | BaseType::Uint32
            | BaseType::Uint64
            | BaseType::AbsolutePointer
            | BaseType::ConstantPointer
            | BaseType::VolatilePointer => Some(Extension::Zero),
            BaseType::Float | BaseType::Double => Some(Extension::Float),
            BaseType::Void => None,
        }
    }

    fn bit_width(self) -> u32 {
        // Sizes are at most 8 bytes.
        (self.size() as u32).saturating_mul(8)
    }
}

/// A typed value on the operand stack.
///
/// The raw bits are kept normalized: integers are truncated to the width of
/// their type and signed ones are sign extended to 64 bits, floats hold
/// their IEEE bit pattern in the low bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StackValue {
    ty: BaseType,
    bits: u64,
}

impl StackValue {
    pub fn new(ty: BaseType, bits: u64) -> Self {
        Self {
            ty,
            bits: normalize(ty, bits),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::new(BaseType::Bool, u64::from(value))
    }

    pub fn i32(value: i32) -> Self {
        Self::new(BaseType::Int32, i64::from(value) as u64)
    }

    pub fn i64(value: i64) -> Self {
        Self::new(BaseType::Int64, value as u64)
    }

    pub fn u32(value: u32) -> Self {
        Self::new(BaseType::Uint32, u64::from(value))
    }

    pub fn u64(value: u64) -> Self {
        Self::new(BaseType::Uint64, value)
    }

    pub fn f32(value: f32) -> Self {
        Self::new(BaseType::Float, u64::from(value.to_bits()))
    }

    pub fn f64(value: f64) -> Self {
        Self::new(BaseType::Double, value.to_bits())
    }

    pub fn pointer(ty: BaseType, address: Address) -> Self {
        Self::new(ty, address as u64)
    }

    /// Widens a PUSH_I payload, `None` for `Void`.
    pub fn from_immediate(ty: BaseType, data: u32) -> Option<Self> {
        let data = u64::from(data) & low_mask(IMMEDIATE_BITS);
        let bits = match ty.extension()? {
            Extension::Sign => sign_extend(data, IMMEDIATE_BITS),
            Extension::Zero => data,
            Extension::Float if ty == BaseType::Float => data << FLOAT_IMMEDIATE_SHIFT,
            Extension::Float => data << DOUBLE_IMMEDIATE_SHIFT,
        };
        Some(Self::new(ty, bits))
    }

    /// Shifts a 26 bit EXTEND payload into the value.
    pub fn extend(self, data: u32) -> Result<Self, StackFault> {
        let data = u64::from(data) & low_mask(EXTEND_BITS);
        let bits = match self.ty.extension() {
            Some(Extension::Sign) | Some(Extension::Zero) => {
                (self.bits << EXTEND_BITS) | data
            }
            Some(Extension::Float) if self.ty == BaseType::Float => {
                self.bits | (data & FLOAT_EXTEND_MASK)
            }
            Some(Extension::Float) => self.bits | data,
            None => {
                return Err(StackFault::TypeMismatch {
                    expected: BaseType::Uint64,
                    found: self.ty,
                });
            }
        };
        Ok(Self::new(self.ty, bits))
    }

    pub fn from_ne_bytes(ty: BaseType, bytes: &[u8]) -> Option<Self> {
        let bits = match bytes.len() {
            1 => u64::from(u8::from_ne_bytes(bytes.try_into().ok()?)),
            2 => u64::from(u16::from_ne_bytes(bytes.try_into().ok()?)),
            4 => u64::from(u32::from_ne_bytes(bytes.try_into().ok()?)),
            8 => u64::from_ne_bytes(bytes.try_into().ok()?),
            _ => return None,
        };
        if bytes.len() != ty.size() {
            return None;
        }
        Some(Self::new(ty, bits))
    }

    /// The value as it is laid out in replay memory.
    pub fn to_ne_bytes(&self) -> Vec<u8, 8> {
        let mut bytes = Vec::new();
        // At most 8 bytes, always fits.
        let _ = match self.ty.size() {
            1 => bytes.extend_from_slice(&(self.bits as u8).to_ne_bytes()),
            2 => bytes.extend_from_slice(&(self.bits as u16).to_ne_bytes()),
            4 => bytes.extend_from_slice(&(self.bits as u32).to_ne_bytes()),
            8 => bytes.extend_from_slice(&self.bits.to_ne_bytes()),
            _ => Ok(()),
        };
        bytes
    }

    pub fn ty(&self) -> BaseType {
        self.ty
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn as_i64(&self) -> i64 {
        self.bits as i64
    }

    pub fn as_u64(&self) -> u64 {
        self.bits
    }

    pub fn as_f32(&self) -> f32 {
        f32::from_bits(self.bits as u32)
    }

    pub fn as_f64(&self) -> f64 {
        f64::from_bits(self.bits)
    }

    pub fn expect(self, ty: BaseType) -> Result<Self, StackFault> {
        if self.ty != ty {
            return Err(StackFault::TypeMismatch {
                expected: ty,
                found: self.ty,
            });
        }
        Ok(self)
    }

    pub fn as_address(&self) -> Result<Address, StackFault> {
        if !self.ty.is_pointer() {
            return Err(StackFault::NotAPointer(self.ty));
        }
        Address::try_from(self.bits).map_err(|_| StackFault::NotAPointer(self.ty))
    }

    /// Sizes and indices passed on the stack, any non negative integer.
    pub fn as_count(&self) -> Result<usize, StackFault> {
        if !self.ty.is_integer() {
            return Err(StackFault::NotACount(self.ty));
        }
        if self.ty.extension() == Some(Extension::Sign) && self.as_i64() < 0 {
            return Err(StackFault::NotACount(self.ty));
        }
        usize::try_from(self.bits).map_err(|_| StackFault::NotACount(self.ty))
    }
}

/// Sums `operands` for ADD. All operands share the type of the first one,
/// except that integers may be added to a pointer.
pub fn sum(operands: &[StackValue]) -> Result<StackValue, StackFault> {
    let Some(first) = operands.first() else {
        return Err(StackFault::Underflow);
    };
    let ty = operands
        .iter()
        .map(StackValue::ty)
        .find(|ty| ty.is_pointer())
        .unwrap_or(first.ty);

    if matches!(ty, BaseType::Bool | BaseType::Void) {
        return Err(StackFault::TypeMismatch {
            expected: BaseType::Int64,
            found: ty,
        });
    }

    for operand in operands {
        let compatible = operand.ty == ty || (ty.is_pointer() && operand.ty.is_integer());
        if !compatible {
            return Err(StackFault::TypeMismatch {
                expected: ty,
                found: operand.ty,
            });
        }
    }

    let value = match ty {
        BaseType::Float => StackValue::f32(operands.iter().map(StackValue::as_f32).sum()),
        BaseType::Double => StackValue::f64(operands.iter().map(StackValue::as_f64).sum()),
        _ => {
            let bits = operands
                .iter()
                .fold(0u64, |total, operand| total.wrapping_add(operand.bits));
            StackValue::new(ty, bits)
        }
    };
    Ok(value)
}

fn low_mask(width: u32) -> u64 {
    u64::MAX
        .checked_shr(64u32.saturating_sub(width))
        .unwrap_or(0)
}

fn sign_extend(bits: u64, width: u32) -> u64 {
    let shift = 64u32.saturating_sub(width);
    if shift == 0 || width == 0 {
        return bits;
    }
    ((bits.wrapping_shl(shift) as i64).wrapping_shr(shift)) as u64
}

fn normalize(ty: BaseType, bits: u64) -> u64 {
    let width = ty.bit_width();
    match ty.extension() {
        Some(Extension::Sign) => sign_extend(bits & low_mask(width), width),
        Some(Extension::Zero) | Some(Extension::Float) => bits & low_mask(width),
        None => 0,
    }
}
