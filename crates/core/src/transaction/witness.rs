use crate::UInt160;
use neo_config::MAX_SCRIPT_SIZE;
use neo_io::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};

/// Proof that the owner of `verification_script` authorised the transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    /// Account this witness speaks for.
    #[inline]
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script)
    }
}

impl NeoEncode for Witness {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
    }
}

impl NeoDecode for Witness {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let invocation_script = reader.read_var_bytes(MAX_SCRIPT_SIZE as u64)?;
        let verification_script = reader.read_var_bytes(MAX_SCRIPT_SIZE as u64)?;
        Ok(Self {
            invocation_script,
            verification_script,
        })
    }
}
