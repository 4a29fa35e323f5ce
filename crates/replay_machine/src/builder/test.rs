use super::*;
extern crate std;

#[test]
fn test_encode_uses_wire_layout() {
    let word = encode(InstructionCode::PushI, u8::from(BaseType::Uint32), 0x12345);
    assert_eq!(word >> OPCODE_BIT_SHIFT, 1);
    assert_eq!((word & TYPE_MASK) >> TYPE_BIT_SHIFT, 7);
    assert_eq!(word & DATA_MASK20, 0x12345);

    let word = encode(InstructionCode::Label, 0, 0x3ff_ffff);
    assert_eq!(word, (15 << 26) | 0x3ff_ffff);
}

#[test]
fn test_encode_call_fields() {
    let word = encode_call(2, 3, true);
    assert_eq!(word >> OPCODE_BIT_SHIFT, 0);
    assert_eq!(word & PUSH_RETURN_MASK, PUSH_RETURN_MASK);
    assert_eq!((word & API_INDEX_MASK) >> API_BIT_SHIFT, 2);
    assert_eq!(word & FUNCTION_ID_MASK, 3);

    let word = encode_call(15, POST_FUNCTION_ID, false);
    assert!(!has_push_return(word));
    assert_eq!(extract_api_index(word), 15);
    assert_eq!(extract_function_id(word), POST_FUNCTION_ID);
}

#[test]
fn test_buffer_too_small() -> Result<(), BuilderError> {
    let mut buffer = [0u32; 2];
    let mut builder = StreamBuilder::new(&mut buffer);
    builder.label(1)?.label(2)?;
    assert_eq!(builder.label(3).unwrap_err(), BuilderError::BufferTooSmall);
    assert_eq!(builder.finish(), 2);
    Ok(())
}

#[test]
fn test_payload_width_checked() {
    let mut buffer = [0u32; 4];
    let mut builder = StreamBuilder::new(&mut buffer);
    assert_eq!(
        builder.push_i(BaseType::Uint32, 0x10_0000).unwrap_err(),
        BuilderError::PayloadTooWide {
            value: 0x10_0000,
            bits: 20
        }
    );
    assert_eq!(
        builder.call(16, 0, false).unwrap_err(),
        BuilderError::ApiIndexOutOfRange(16)
    );
    assert!(builder.is_empty());
}

#[test]
fn test_push_value_small_is_single_word() -> Result<(), BuilderError> {
    let mut buffer = [0u32; 4];
    let mut builder = StreamBuilder::new(&mut buffer);
    builder.push_value(BaseType::Int32, (-5i64) as u64)?;
    assert_eq!(builder.words().len(), 1);
    let word = builder.words()[0];
    assert_eq!(extract_20bit_data(word), 0xffffb);
    Ok(())
}

#[test]
fn test_push_value_wide_uses_extend() -> Result<(), BuilderError> {
    let mut buffer = [0u32; 4];
    let mut builder = StreamBuilder::new(&mut buffer);
    builder.push_value(BaseType::Uint32, 0xffff_ffff)?;
    let words = builder.words();
    assert_eq!(words.len(), 2);
    assert_eq!(extract_opcode(words[0]), u8::from(InstructionCode::PushI));
    assert_eq!(extract_20bit_data(words[0]), 0x3f);
    assert_eq!(extract_opcode(words[1]), u8::from(InstructionCode::Extend));
    assert_eq!(extract_26bit_data(words[1]), 0x3ff_ffff);
    Ok(())
}

#[test]
fn test_push_value_rejects_void_and_wide_double() {
    let mut buffer = [0u32; 4];
    let mut builder = StreamBuilder::new(&mut buffer);
    assert_eq!(
        builder.push_value(BaseType::Void, 0).unwrap_err(),
        BuilderError::NotEncodable(BaseType::Void)
    );
    assert_eq!(
        builder.push_value(BaseType::Double, 0.1f64.to_bits()).unwrap_err(),
        BuilderError::NotEncodable(BaseType::Double)
    );
}
