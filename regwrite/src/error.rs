use thiserror::Error;

use crate::{
    encoding::DecodeError,
    modbus_exception::ModbusException,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building, encoding, decoding or validating messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value is outside the range the protocol allows.
    /// Oversized writes must be split into several requests by the caller.
    #[error("{field} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// The frame is structurally invalid and could not be decoded.
    #[error("Malformed frame: {0}")]
    MalformedFrame(&'static str),

    /// The response reports a different start address than the request.
    #[error("Unexpected start address in response. Expected {expected}, received {received}.")]
    UnexpectedStartAddress { expected: u16, received: u16 },

    /// The response reports a different register count than the request.
    #[error("Unexpected number of points in response. Expected {expected}, received {received}.")]
    UnexpectedNumberOfPoints { expected: u16, received: u16 },

    /// The response frame carries a function code this request never produces.
    #[error("Unexpected function code in response. Expected {expected:#04x}, received {received:#04x}.")]
    UnexpectedFunctionCode { expected: u8, received: u8 },

    /// The slave answered with an exception response.
    #[error("Slave {slave_address} reported exception {exception:?}")]
    SlaveException { slave_address: u8, exception: ModbusException },
}

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::MissingData => Error::MalformedFrame("Message frame does not contain enough bytes"),
            DecodeError::InvalidData(reason) => Error::MalformedFrame(reason),
        }
    }
}
