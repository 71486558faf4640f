use bytes::Buf;
use std::io::Cursor;

use crate::error::Result;

pub type EncodeResult = Result<()>;

pub trait Encodable {
    fn encode(&self, encoder: &mut Encoder) -> EncodeResult;

    fn encode_to_bytes(&self) -> Result<Vec<u8>> {
        Encoder::encode(self)
    }
}

pub struct Encoder {
    buffer: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(16),
        }
    }

    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend(value.to_be_bytes());
    }

    pub fn write_registers(&mut self, value: &[u16]) {
        self.buffer.extend(value.iter().flat_map(|v| v.to_be_bytes()));
    }

    pub fn write_type<T>(&mut self, value: &T) -> EncodeResult
    where
        T: Encodable + ?Sized,
    {
        value.encode(self)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Encodes into a fresh buffer. Nothing is returned when encoding fails part way.
    pub fn encode<T>(value: &T) -> Result<Vec<u8>>
    where
        T: Encodable + ?Sized,
    {
        let mut encoder = Self::new();
        encoder.write_type(value)?;
        Ok(encoder.finish())
    }
}

#[derive(PartialEq, Debug)]
pub enum DecodeError {
    MissingData,
    InvalidData(&'static str),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

pub trait Decodable<T> {
    fn decode(decoder: &mut Decoder) -> Result<T>;

    fn decode_from_bytes(buffer: &[u8]) -> Result<T>
    where
        T: Decodable<T>,
    {
        Decoder::decode(buffer)
    }
}

pub struct Decoder<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Decoder<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buffer),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Looks at a byte relative to the start of the buffer without moving the cursor.
    pub fn peek_u8_at(&self, offset: usize) -> DecodeResult<u8> {
        self.cursor.get_ref().get(offset).copied().ok_or(DecodeError::MissingData)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        if self.cursor.remaining() < 1 {
            return Err(DecodeError::MissingData);
        }
        Ok(self.cursor.get_u8())
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        if self.cursor.remaining() < 2 {
            return Err(DecodeError::MissingData);
        }
        Ok(self.cursor.get_u16())
    }

    pub fn read_registers(&mut self, length: usize) -> DecodeResult<Vec<u16>> {
        if self.cursor.remaining() < length * 2 {
            return Err(DecodeError::MissingData);
        }
        let mut registers = Vec::with_capacity(length);
        for _ in 0..length {
            registers.push(self.cursor.get_u16());
        }
        Ok(registers)
    }

    pub fn read_type<T>(&mut self) -> Result<T>
    where
        T: Decodable<T>,
    {
        T::decode(self)
    }

    pub fn decode<T>(buffer: &'a [u8]) -> Result<T>
    where
        T: Decodable<T>,
    {
        let mut decoder = Self::new(buffer);
        let value: T = decoder.read_type()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let mut encoder = Encoder::new();
        encoder.write_u8(0xAA);
        encoder.write_u16(0xBBCC);
        encoder.write_u8(6);
        encoder.write_registers(&[300, 301, 302]);

        assert_eq!(encoder.position(), 10);

        let bytes = encoder.finish();
        let mut decoder = Decoder::new(&bytes);

        assert_eq!(decoder.peek_u8_at(3), Ok(6));
        assert_eq!(decoder.position(), 0);

        assert_eq!(decoder.read_u8(), Ok(0xAA));
        assert_eq!(decoder.read_u16(), Ok(0xBBCC));
        assert_eq!(decoder.read_u8(), Ok(6));
        assert_eq!(decoder.read_registers(3), Ok(vec![300, 301, 302]));

        assert_eq!(decoder.position(), 10);
        assert_eq!(decoder.remaining(), 0);
        assert_eq!(decoder.read_u8(), Err(DecodeError::MissingData));
    }

    #[test]
    fn short_register_block() {
        let bytes = [0x00, 0x01, 0x02];
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_registers(2), Err(DecodeError::MissingData));
        assert_eq!(decoder.position(), 0);
        assert_eq!(decoder.peek_u8_at(3), Err(DecodeError::MissingData));
    }
}
