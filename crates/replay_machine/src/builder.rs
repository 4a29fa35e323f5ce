use thiserror_no_std::Error;

use super::*;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum BuilderError {
    #[error("the instruction buffer is too small")]
    BufferTooSmall,
    #[error("payload {value:#x} does not fit in {bits} bits")]
    PayloadTooWide { value: u64, bits: u32 },
    #[error("api index {0} is out of range")]
    ApiIndexOutOfRange(u8),
    #[error("value can not be encoded as a {0:?} immediate")]
    NotEncodable(BaseType),
}

/// Packs one instruction word from its fields.
pub fn encode(code: InstructionCode, type_code: u8, data: u32) -> InstructionWord {
    (u32::from(u8::from(code)) << OPCODE_BIT_SHIFT)
        | ((u32::from(type_code) << TYPE_BIT_SHIFT) & TYPE_MASK)
        | (data & DATA_MASK26)
}

pub fn encode_call(api: u8, id: Id, push_return: bool) -> InstructionWord {
    let push_return = if push_return { PUSH_RETURN_MASK } else { 0 };
    (u32::from(u8::from(InstructionCode::Call)) << OPCODE_BIT_SHIFT)
        | push_return
        | ((u32::from(api) << API_BIT_SHIFT) & API_INDEX_MASK)
        | u32::from(id)
}

fn check_width(value: u32, bits: u32, mask: u32) -> Result<u32, BuilderError> {
    if value & !mask != 0 {
        return Err(BuilderError::PayloadTooWide {
            value: u64::from(value),
            bits,
        });
    }
    Ok(value)
}

/// Stream is a flat sequence of instruction words:
/// [word][word]...
///
/// The builder writes into a caller supplied buffer and reports how many
/// words were used when finished.
#[derive(Debug)]
pub struct StreamBuilder<'a> {
    buffer: &'a mut [InstructionWord],
    free: usize,
}

impl<'a> StreamBuilder<'a> {
    pub fn new(buffer: &'a mut [InstructionWord]) -> Self {
        Self { buffer, free: 0 }
    }

    pub fn len(&self) -> usize {
        self.free
    }

    pub fn is_empty(&self) -> bool {
        self.free == 0
    }

    pub fn words(&self) -> &[InstructionWord] {
        self.buffer.get(..self.free).unwrap_or_default()
    }

    pub fn finish(self) -> usize {
        self.free
    }

    fn add_word(&mut self, word: InstructionWord) -> Result<&mut Self, BuilderError> {
        let Some(slot) = self.buffer.get_mut(self.free) else {
            return Err(BuilderError::BufferTooSmall);
        };
        *slot = word;
        let Some(free) = self.free.checked_add(1) else {
            return Err(BuilderError::BufferTooSmall);
        };
        self.free = free;
        Ok(self)
    }

    fn add_short(
        &mut self,
        code: InstructionCode,
        ty: BaseType,
        data: u32,
    ) -> Result<&mut Self, BuilderError> {
        let data = check_width(data, 20, DATA_MASK20)?;
        self.add_word(encode(code, u8::from(ty), data))
    }

    fn add_long(&mut self, code: InstructionCode, data: u32) -> Result<&mut Self, BuilderError> {
        let data = check_width(data, 26, DATA_MASK26)?;
        self.add_word(encode(code, 0, data))
    }

    pub fn call(&mut self, api: u8, id: Id, push_return: bool) -> Result<&mut Self, BuilderError> {
        if usize::from(api) >= API_COUNT {
            return Err(BuilderError::ApiIndexOutOfRange(api));
        }
        self.add_word(encode_call(api, id, push_return))
    }

    /// PUSH_I with a raw 20 bit payload.
    pub fn push_i(&mut self, ty: BaseType, data: u32) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::PushI, ty, data)
    }

    /// Pushes `bits` as a `ty`, using PUSH_I followed by as many EXTEND
    /// words as the value needs.
    pub fn push_value(&mut self, ty: BaseType, bits: u64) -> Result<&mut Self, BuilderError> {
        let bits = StackValue::new(ty, bits).bits();
        match ty.extension() {
            Some(Extension::Sign) => self.push_chunks(ty, bits, |head| {
                let head = head as i64;
                (-(1 << 19)..(1 << 19)).contains(&head)
            }),
            Some(Extension::Zero) => self.push_chunks(ty, bits, |head| head < (1 << 20)),
            Some(Extension::Float) if ty == BaseType::Float => {
                self.push_i(ty, ((bits >> 12) as u32) & DATA_MASK20)?;
                let low = (bits as u32) & 0xfff;
                if low != 0 {
                    self.extend(low)?;
                }
                Ok(self)
            }
            Some(Extension::Float) => {
                let middle = bits & 0x0000_0fff_fc00_0000;
                if middle != 0 {
                    return Err(BuilderError::NotEncodable(ty));
                }
                self.push_i(ty, ((bits >> 44) as u32) & DATA_MASK20)?;
                let low = (bits as u32) & DATA_MASK26;
                if low != 0 {
                    self.extend(low)?;
                }
                Ok(self)
            }
            None => Err(BuilderError::NotEncodable(ty)),
        }
    }

    fn push_chunks<F>(&mut self, ty: BaseType, bits: u64, fits: F) -> Result<&mut Self, BuilderError>
    where
        F: Fn(u64) -> bool,
    {
        let signed = ty.extension() == Some(Extension::Sign);
        for chunks in 0u32..=2 {
            let shift = chunks.saturating_mul(26);
            let head = if signed {
                (bits as i64).wrapping_shr(shift) as u64
            } else {
                bits.wrapping_shr(shift)
            };
            if !fits(head) {
                continue;
            }
            self.push_i(ty, (head as u32) & DATA_MASK20)?;
            for chunk in (0..chunks).rev() {
                let low = bits.wrapping_shr(chunk.saturating_mul(26)) as u32;
                self.extend(low & DATA_MASK26)?;
            }
            return Ok(self);
        }
        Err(BuilderError::NotEncodable(ty))
    }

    pub fn load_c(&mut self, ty: BaseType, offset: u32) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::LoadC, ty, offset)
    }

    pub fn load_v(&mut self, ty: BaseType, offset: u32) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::LoadV, ty, offset)
    }

    pub fn load(&mut self, ty: BaseType) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::Load, ty, 0)
    }

    /// Discards `count` values, none for 0.
    pub fn pop(&mut self, count: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Pop, count)
    }

    pub fn store_v(&mut self, offset: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::StoreV, offset)
    }

    pub fn store(&mut self) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Store, 0)
    }

    pub fn resource(&mut self, index: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Resource, index)
    }

    /// POST of the `[address, size]` range on the stack.
    pub fn post_range(&mut self) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::Post, BaseType::Void, 0)
    }

    /// POST of the top value, which must be a `ty`.
    pub fn post_value(&mut self, ty: BaseType) -> Result<&mut Self, BuilderError> {
        self.add_short(InstructionCode::Post, ty, 0)
    }

    pub fn copy(&mut self, count: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Copy, count)
    }

    pub fn clone_at(&mut self, depth: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Clone, depth)
    }

    pub fn strcpy(&mut self, count: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::StrCpy, count)
    }

    pub fn extend(&mut self, data: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Extend, data)
    }

    /// Sums the top `count` values. The interpreter rejects counts below 2.
    pub fn add(&mut self, count: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Add, count)
    }

    pub fn label(&mut self, value: u32) -> Result<&mut Self, BuilderError> {
        self.add_long(InstructionCode::Label, value)
    }
}

#[cfg(test)]
mod test;
