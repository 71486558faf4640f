use std::{error::Error, fmt::Display};

use regwrite::consts::MAX_REGISTERS;

/// Holding register address in `4xxxxx` notation, resolved to a wire address.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Address {
    pub index: u16,
}

#[derive(PartialEq, Clone, Debug)]
pub struct ParseAddressError(String);

impl From<&str> for ParseAddressError {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl Display for ParseAddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ParseAddressError {}

impl Address {
    pub fn parse(value: &str, offset: i32) -> Result<Self, ParseAddressError> {
        let mut iter = value.chars();

        match iter.next() {
            Some('4') => {}
            Some(_) => return Err("Only holding registers (4xxxxx) can be written.".into()),
            None => return Err("Empty value".into()),
        };

        let index = iter.by_ref().take(5).collect::<String>();
        if index.is_empty() {
            return Err("Address must be at least 2 digits long".into());
        }
        if iter.next().is_some() {
            return Err("Address must be at most 6 digits".into());
        }

        let index = index.parse::<u32>().map_err(|_| "Address out of range")?;
        let index: i32 = index.try_into().map_err(|_| "Address out of range")?;
        let index = index + offset;
        let index: u16 = index.try_into().map_err(|_| "Address out of range")?;

        Ok(Self { index })
    }

    /// Checks that `length` registers starting here fit in one request and in the address space.
    pub fn check_block(&self, length: usize) -> Result<(), ParseAddressError> {
        if length == 0 || length > MAX_REGISTERS as usize {
            return Err(ParseAddressError(format!(
                "{length} registers do not fit in one request (1..={MAX_REGISTERS})"
            )));
        }
        u16::checked_add(self.index, (length - 1) as u16).ok_or("Address + length exceeds device address space")?;
        Ok(())
    }

    /// Display form of a wire address. Falls back to the raw wire index when the offset would make it negative.
    pub fn display(index: u16, offset: i32) -> String {
        let shown = index as i32 - offset;
        if shown < 0 {
            return format!("4{index:05}");
        }
        format!("4{shown:05}")
    }
}
