use crate::{
    consts::RESPONSE_FRAME_SIZE,
    encoding::*,
    error::Result,
    function_code::FunctionCode,
    messages::WriteMultipleRegistersRequest,
};

/// Acknowledgement of a Write Multiple Registers request. Carries no register data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriteMultipleRegistersResponse {
    pub slave_address: u8,
    pub start_address: u16,
    pub number_of_points: u16,
}

impl WriteMultipleRegistersResponse {
    /// The response a slave sends after writing every register of `request`.
    pub fn for_request(request: &WriteMultipleRegistersRequest) -> Self {
        Self {
            slave_address: request.slave_address(),
            start_address: request.start_address(),
            number_of_points: request.number_of_points(),
        }
    }
}

impl Encodable for WriteMultipleRegistersResponse {
    fn encode(&self, encoder: &mut Encoder) -> EncodeResult {
        encoder.write_u8(self.slave_address);
        encoder.write_u8(FunctionCode::WriteMultipleRegisters.into());
        encoder.write_u16(self.start_address);
        encoder.write_u16(self.number_of_points);
        Ok(())
    }
}

impl Decodable<Self> for WriteMultipleRegistersResponse {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        if decoder.remaining() < RESPONSE_FRAME_SIZE {
            return Err(DecodeError::InvalidData("Frame is shorter than the response").into());
        }
        let slave_address = decoder.read_u8()?;
        if FunctionCode::from(decoder.read_u8()?) != FunctionCode::WriteMultipleRegisters {
            return Err(DecodeError::InvalidData("Function code is not Write Multiple Registers").into());
        }
        Ok(Self {
            slave_address,
            start_address: decoder.read_u16()?,
            number_of_points: decoder.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn echo_of_request() {
        let req = WriteMultipleRegistersRequest::new(0x11, 0x0001, vec![0x000A, 0x0102]).unwrap();
        let res = WriteMultipleRegistersResponse::for_request(&req);

        assert_eq!(res.encode_to_bytes().unwrap(), [0x11, 0x10, 0x00, 0x01, 0x00, 0x02]);
        assert_eq!(req.validate_response(&res), Ok(()));
    }

    #[test]
    fn decode() {
        let res = WriteMultipleRegistersResponse::decode_from_bytes(&[0x01, 0x10, 0x00, 0x20, 0x00, 0x7B]).unwrap();
        assert_eq!(
            res,
            WriteMultipleRegistersResponse {
                slave_address: 1,
                start_address: 0x20,
                number_of_points: 123,
            }
        );

        assert!(matches!(
            WriteMultipleRegistersResponse::decode_from_bytes(&[0x01, 0x10, 0x00, 0x20, 0x00]),
            Err(Error::MalformedFrame(_))
        ));
        assert!(matches!(
            WriteMultipleRegistersResponse::decode_from_bytes(&[0x01, 0x03, 0x00, 0x20, 0x00, 0x01]),
            Err(Error::MalformedFrame(_))
        ));
    }
}
