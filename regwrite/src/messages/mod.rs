mod exception_response;
mod write_multiple_registers_request;
mod write_multiple_registers_response;

pub use exception_response::ExceptionResponse;
pub use write_multiple_registers_request::WriteMultipleRegistersRequest;
pub use write_multiple_registers_response::WriteMultipleRegistersResponse;
