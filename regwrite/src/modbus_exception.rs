use std::fmt::Display;

/// Exception codes a slave may answer a request with.
/// See the [MODBUS Application Protocol Specification](https://www.modbus.org/docs/Modbus_Application_Protocol_V1_1b3.pdf).
#[derive(Debug, Clone, Copy)]
pub enum ModbusException {
    /// The slave does not support Write Multiple Registers.
    IllegalFunction,
    /// Start address + register count falls outside the slave's register map.
    IllegalDataAddress,
    /// Register count or byte count is not acceptable to the slave.
    IllegalDataValue,
    /// The slave failed while writing the registers.
    ServerDeviceFailure,
    /// The write was accepted but will take a long time to complete.
    Acknowledge,
    /// The slave is busy with a long running command.
    ServerDeviceBusy,
    MemoryParityError,
    GatewayPathUnavailable,
    GatewayTargetDeviceFailedToRespond,
    /// Code not defined by the protocol.
    Unknown(u8),
}

impl From<u8> for ModbusException {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::IllegalFunction,
            2 => Self::IllegalDataAddress,
            3 => Self::IllegalDataValue,
            4 => Self::ServerDeviceFailure,
            5 => Self::Acknowledge,
            6 => Self::ServerDeviceBusy,
            8 => Self::MemoryParityError,
            10 => Self::GatewayPathUnavailable,
            11 => Self::GatewayTargetDeviceFailedToRespond,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ModbusException> for u8 {
    fn from(value: ModbusException) -> Self {
        match value {
            ModbusException::IllegalFunction => 1,
            ModbusException::IllegalDataAddress => 2,
            ModbusException::IllegalDataValue => 3,
            ModbusException::ServerDeviceFailure => 4,
            ModbusException::Acknowledge => 5,
            ModbusException::ServerDeviceBusy => 6,
            ModbusException::MemoryParityError => 8,
            ModbusException::GatewayPathUnavailable => 10,
            ModbusException::GatewayTargetDeviceFailedToRespond => 11,
            ModbusException::Unknown(value) => value,
        }
    }
}

impl PartialEq for ModbusException {
    fn eq(&self, other: &Self) -> bool {
        u8::from(*self) == u8::from(*other)
    }
}

impl Display for ModbusException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModbusException::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?} ({})", u8::from(*other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(ModbusException::from(2), ModbusException::IllegalDataAddress);
        assert_eq!(u8::from(ModbusException::GatewayTargetDeviceFailedToRespond), 11);
        assert_eq!(ModbusException::from(7), ModbusException::Unknown(7));
        assert_eq!(ModbusException::IllegalDataValue.to_string(), "IllegalDataValue (3)");
    }
}
