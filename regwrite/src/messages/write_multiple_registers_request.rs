use std::fmt::Display;

use crate::{
    consts::*,
    encoding::*,
    error::{Error, Result},
    function_code::FunctionCode,
    messages::WriteMultipleRegistersResponse,
};

/// Request writing a contiguous block of holding registers on one slave.
///
/// The register count and byte count are derived from the owned register data,
/// so a request can not be built or decoded with inconsistent lengths.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WriteMultipleRegistersRequest {
    slave_address: u8,
    start_address: u16,
    registers: Vec<u16>,
}

impl WriteMultipleRegistersRequest {
    /// Fails with [`Error::OutOfRange`] unless `1 <= registers.len() <= MAX_REGISTERS`.
    pub fn new(slave_address: u8, start_address: u16, registers: Vec<u16>) -> Result<Self> {
        check_number_of_points(registers.len())?;
        Ok(Self {
            slave_address,
            start_address,
            registers,
        })
    }

    pub fn slave_address(&self) -> u8 {
        self.slave_address
    }

    pub fn function_code(&self) -> FunctionCode {
        FunctionCode::WriteMultipleRegisters
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn number_of_points(&self) -> u16 {
        self.registers.len() as u16
    }

    pub fn byte_count(&self) -> u8 {
        (self.registers.len() * 2) as u8
    }

    pub fn registers(&self) -> &[u16] {
        &self.registers
    }

    /// Checks that `response` acknowledges exactly this write.
    pub fn validate_response(&self, response: &WriteMultipleRegistersResponse) -> Result<()> {
        if self.start_address != response.start_address {
            tracing::debug!(
                expected = self.start_address,
                received = response.start_address,
                "response start address mismatch"
            );
            return Err(Error::UnexpectedStartAddress {
                expected: self.start_address,
                received: response.start_address,
            });
        }

        if self.number_of_points() != response.number_of_points {
            tracing::debug!(
                expected = self.number_of_points(),
                received = response.number_of_points,
                "response number of points mismatch"
            );
            return Err(Error::UnexpectedNumberOfPoints {
                expected: self.number_of_points(),
                received: response.number_of_points,
            });
        }

        Ok(())
    }
}

fn check_number_of_points(number_of_points: usize) -> Result<()> {
    if !(MIN_REGISTERS as usize..=MAX_REGISTERS as usize).contains(&number_of_points) {
        return Err(Error::OutOfRange {
            field: "number of points",
            value: number_of_points,
            min: MIN_REGISTERS as usize,
            max: MAX_REGISTERS as usize,
        });
    }
    Ok(())
}

impl Encodable for WriteMultipleRegistersRequest {
    fn encode(&self, encoder: &mut Encoder) -> EncodeResult {
        check_number_of_points(self.registers.len())?;
        encoder.write_u8(self.slave_address);
        encoder.write_u8(self.function_code().into());
        encoder.write_u16(self.start_address);
        encoder.write_u16(self.number_of_points());
        encoder.write_u8(self.byte_count());
        encoder.write_registers(&self.registers);
        tracing::trace!(request = %self, bytes = encoder.position(), "encoded request");
        Ok(())
    }
}

impl Decodable<Self> for WriteMultipleRegistersRequest {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        if decoder.remaining() < REQUEST_HEADER_SIZE {
            tracing::debug!(length = decoder.remaining(), "request frame shorter than header");
            return Err(DecodeError::InvalidData("Frame is shorter than the request header").into());
        }

        let slave_address = decoder.read_u8()?;
        let function_code = FunctionCode::from(decoder.read_u8()?);
        if function_code != FunctionCode::WriteMultipleRegisters {
            return Err(DecodeError::InvalidData("Function code is not Write Multiple Registers").into());
        }
        let start_address = decoder.read_u16()?;
        let number_of_points = decoder.read_u16()?;
        let byte_count = decoder.read_u8()? as usize;

        if decoder.remaining() < byte_count {
            tracing::debug!(byte_count, available = decoder.remaining(), "request frame truncated");
            return Err(DecodeError::InvalidData("Message frame does not contain enough bytes").into());
        }

        check_number_of_points(number_of_points as usize)?;

        if byte_count % 2 != 0 {
            return Err(DecodeError::InvalidData("Byte count is not a multiple of 2").into());
        }
        if byte_count != number_of_points as usize * 2 {
            return Err(DecodeError::InvalidData("Byte count does not match number of points").into());
        }

        let registers = decoder.read_registers(byte_count / 2)?;

        Ok(Self {
            slave_address,
            start_address,
            registers,
        })
    }
}

impl Display for WriteMultipleRegistersRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Write {} holding registers starting at address {}.",
            self.number_of_points(),
            self.start_address
        )
    }
}
