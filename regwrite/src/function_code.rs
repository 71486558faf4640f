const EXCEPTION_BIT: u8 = 0x80;

#[repr(u8)]
#[derive(Debug, Clone, Copy)]
pub enum FunctionCode {
    WriteMultipleRegisters = 0x10,
    Exception(u8),
    Unknown(u8),
}

impl FunctionCode {
    /// The function code a slave uses to answer this function with an exception.
    pub fn as_exception(self) -> Self {
        FunctionCode::Exception(u8::from(self) | EXCEPTION_BIT)
    }
}

impl From<u8> for FunctionCode {
    fn from(value: u8) -> Self {
        match value {
            0x10 => Self::WriteMultipleRegisters,
            _ => {
                if value & EXCEPTION_BIT != 0 {
                    Self::Exception(value)
                } else {
                    Self::Unknown(value)
                }
            }
        }
    }
}

impl From<FunctionCode> for u8 {
    fn from(value: FunctionCode) -> Self {
        match value {
            FunctionCode::WriteMultipleRegisters => 0x10,
            FunctionCode::Exception(value) => value,
            FunctionCode::Unknown(value) => value,
        }
    }
}

impl PartialEq for FunctionCode {
    fn eq(&self, other: &Self) -> bool {
        u8::from(*self) == u8::from(*other)
    }
}
