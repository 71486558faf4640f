//! Protocol limits for the Write Multiple Registers function.

/// Maximum number of registers a single Write Multiple Registers request may carry.
/// Bounded by the 253 byte PDU: 1 function code + 2 address + 2 count + 1 byte count + 123 * 2.
pub const MAX_REGISTERS: u16 = 123;

/// Minimum number of registers a request may carry.
pub const MIN_REGISTERS: u16 = 1;

/// Request header up to and including the byte count, before any register data.
pub const REQUEST_HEADER_SIZE: usize = 7;

/// Slave address, function code, start address and register count.
pub const RESPONSE_FRAME_SIZE: usize = 6;

/// Slave address, function code and exception code.
pub const EXCEPTION_FRAME_SIZE: usize = 3;
