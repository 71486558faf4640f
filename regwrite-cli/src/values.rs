use std::error::Error;

use crate::args::{WriteDatatype, WriteOrder};

/// Converts typed command line values into the registers that carry them.
pub fn to_registers(values: &[String], datatype: WriteDatatype, order: WriteOrder) -> Result<Vec<u16>, Box<dyn Error>> {
    let mut registers: Vec<u16> = vec![];

    for value in values.iter() {
        let bytes = match datatype {
            WriteDatatype::U16 => value.parse::<u16>()?.to_be_bytes().to_vec(),
            WriteDatatype::I16 => value.parse::<i16>()?.to_be_bytes().to_vec(),
            WriteDatatype::U32 => value.parse::<u32>()?.to_be_bytes().to_vec(),
            WriteDatatype::I32 => value.parse::<i32>()?.to_be_bytes().to_vec(),
            WriteDatatype::F32 => value.parse::<f32>()?.to_be_bytes().to_vec(),
            WriteDatatype::U64 => value.parse::<u64>()?.to_be_bytes().to_vec(),
            WriteDatatype::I64 => value.parse::<i64>()?.to_be_bytes().to_vec(),
            WriteDatatype::F64 => value.parse::<f64>()?.to_be_bytes().to_vec(),
            WriteDatatype::Hex => u16::from_str_radix(value.trim_start_matches("0x"), 16)?.to_be_bytes().to_vec(),
            WriteDatatype::Bin => u16::from_str_radix(value.trim_start_matches("0b"), 2)?.to_be_bytes().to_vec(),
        };

        let words = bytes.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        match order {
            WriteOrder::HL => registers.extend(words),
            WriteOrder::LH => registers.extend(words.rev()),
        }
    }

    Ok(registers)
}

/// Parses a frame written as hex, e.g. `"11 10 00 01"` or `"11100001"`.
pub fn parse_frame(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

/// Formats a frame as space separated upper case hex bytes.
pub fn format_frame(frame: &[u8]) -> String {
    frame.iter().map(|b| hex::encode_upper([*b])).collect::<Vec<String>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn sixteen_bit() {
        assert_eq!(to_registers(&strings(&["10", "-1"]), WriteDatatype::I16, WriteOrder::HL).unwrap(), [10, 0xFFFF]);
        assert_eq!(to_registers(&strings(&["0x0102", "ff"]), WriteDatatype::Hex, WriteOrder::HL).unwrap(), [0x0102, 0xFF]);
        assert_eq!(to_registers(&strings(&["0b101"]), WriteDatatype::Bin, WriteOrder::HL).unwrap(), [5]);
        assert!(to_registers(&strings(&["70000"]), WriteDatatype::U16, WriteOrder::HL).is_err());
    }

    #[test]
    fn word_order() {
        assert_eq!(to_registers(&strings(&["65538"]), WriteDatatype::U32, WriteOrder::HL).unwrap(), [0x0001, 0x0002]);
        assert_eq!(to_registers(&strings(&["65538"]), WriteDatatype::U32, WriteOrder::LH).unwrap(), [0x0002, 0x0001]);
        assert_eq!(to_registers(&strings(&["1.0"]), WriteDatatype::F32, WriteOrder::HL).unwrap(), [0x3F80, 0x0000]);
        assert_eq!(to_registers(&strings(&["1"]), WriteDatatype::U64, WriteOrder::LH).unwrap(), [1, 0, 0, 0]);
    }

    #[test]
    fn hex_frames() {
        let frame = parse_frame("11 10 00 01 00 02 04 00 0a 01 02").unwrap();
        assert_eq!(frame, [0x11, 0x10, 0x00, 0x01, 0x00, 0x02, 0x04, 0x00, 0x0A, 0x01, 0x02]);
        assert_eq!(format_frame(&frame), "11 10 00 01 00 02 04 00 0A 01 02");
        assert_eq!(parse_frame("1110").unwrap(), [0x11, 0x10]);
        assert!(parse_frame("111").is_err());
        assert!(parse_frame("zz").is_err());
    }
}
