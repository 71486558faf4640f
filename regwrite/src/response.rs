use crate::{
    encoding::*,
    error::{Error, Result},
    function_code::FunctionCode,
    messages::{ExceptionResponse, WriteMultipleRegistersResponse},
};

/// A response frame resolved by its function code.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Response {
    WriteMultipleRegisters(WriteMultipleRegistersResponse),
    Exception(ExceptionResponse),
}

impl Response {
    /// Returns the acknowledgement, or the slave exception as an [`Error`].
    pub fn into_write_response(self) -> Result<WriteMultipleRegistersResponse> {
        match self {
            Response::WriteMultipleRegisters(res) => Ok(res),
            Response::Exception(ex) => Err(ex.into()),
        }
    }

    pub fn slave_address(&self) -> u8 {
        match self {
            Response::WriteMultipleRegisters(res) => res.slave_address,
            Response::Exception(ex) => ex.slave_address,
        }
    }
}

impl Encodable for Response {
    fn encode(&self, encoder: &mut Encoder) -> EncodeResult {
        match self {
            Response::WriteMultipleRegisters(res) => encoder.write_type(res),
            Response::Exception(ex) => encoder.write_type(ex),
        }
    }
}

impl Decodable<Self> for Response {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        let function_code = FunctionCode::from(decoder.peek_u8_at(decoder.position() + 1)?);
        tracing::trace!(?function_code, "dispatching response");
        match function_code {
            FunctionCode::WriteMultipleRegisters => Ok(Response::WriteMultipleRegisters(decoder.read_type()?)),
            code if code == FunctionCode::WriteMultipleRegisters.as_exception() => Ok(Response::Exception(decoder.read_type()?)),
            FunctionCode::Exception(received) | FunctionCode::Unknown(received) => Err(Error::UnexpectedFunctionCode {
                expected: FunctionCode::WriteMultipleRegisters.into(),
                received,
            }),
        }
    }
}
