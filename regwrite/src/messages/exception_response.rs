use crate::{
    consts::EXCEPTION_FRAME_SIZE,
    encoding::*,
    error::{Error, Result},
    function_code::FunctionCode,
    modbus_exception::ModbusException,
};

/// Response a slave sends instead of [`super::WriteMultipleRegistersResponse`] when the write failed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ExceptionResponse {
    pub slave_address: u8,
    pub exception: ModbusException,
}

impl ExceptionResponse {
    pub fn function_code(&self) -> FunctionCode {
        FunctionCode::WriteMultipleRegisters.as_exception()
    }
}

impl From<ExceptionResponse> for Error {
    fn from(value: ExceptionResponse) -> Self {
        Error::SlaveException {
            slave_address: value.slave_address,
            exception: value.exception,
        }
    }
}

impl Encodable for ExceptionResponse {
    fn encode(&self, encoder: &mut Encoder) -> EncodeResult {
        encoder.write_u8(self.slave_address);
        encoder.write_u8(self.function_code().into());
        encoder.write_u8(self.exception.into());
        Ok(())
    }
}

impl Decodable<Self> for ExceptionResponse {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        if decoder.remaining() < EXCEPTION_FRAME_SIZE {
            return Err(DecodeError::InvalidData("Frame is shorter than an exception response").into());
        }
        let slave_address = decoder.read_u8()?;
        if FunctionCode::from(decoder.read_u8()?) != FunctionCode::WriteMultipleRegisters.as_exception() {
            return Err(DecodeError::InvalidData("Function code is not a Write Multiple Registers exception").into());
        }
        Ok(Self {
            slave_address,
            exception: decoder.read_u8()?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode() {
        let ex = ExceptionResponse {
            slave_address: 0x11,
            exception: ModbusException::IllegalDataAddress,
        };
        let bytes = ex.encode_to_bytes().unwrap();
        assert_eq!(bytes, [0x11, 0x90, 0x02]);
        assert_eq!(ExceptionResponse::decode_from_bytes(&bytes), Ok(ex));
    }

    #[test]
    fn into_error() {
        let ex = ExceptionResponse {
            slave_address: 3,
            exception: ModbusException::ServerDeviceBusy,
        };
        assert_eq!(
            Error::from(ex),
            Error::SlaveException {
                slave_address: 3,
                exception: ModbusException::ServerDeviceBusy
            }
        );
    }
}
