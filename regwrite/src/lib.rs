//! Codec and response validation for the Modbus Write Multiple Registers (0x10) message.
//!
//! ```
//! use regwrite::{Decodable, Encodable, Response, WriteMultipleRegistersRequest};
//!
//! let request = WriteMultipleRegistersRequest::new(0x11, 0x0001, vec![0x000A, 0x0102])?;
//! assert_eq!(request.encode_to_bytes()?, [0x11, 0x10, 0x00, 0x01, 0x00, 0x02, 0x04, 0x00, 0x0A, 0x01, 0x02]);
//!
//! let response = Response::decode_from_bytes(&[0x11, 0x10, 0x00, 0x01, 0x00, 0x02])?.into_write_response()?;
//! request.validate_response(&response)?;
//! # Ok::<(), regwrite::Error>(())
//! ```

pub mod consts;
mod encoding;
mod error;
mod function_code;
mod messages;
mod modbus_exception;
mod response;

pub use encoding::{Decodable, Decoder, Encodable, Encoder};
pub use error::{Error, Result};
pub use function_code::FunctionCode;
pub use messages::{ExceptionResponse, WriteMultipleRegistersRequest, WriteMultipleRegistersResponse};
pub use modbus_exception::ModbusException;
pub use response::Response;
