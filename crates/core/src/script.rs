//! Verification and invocation scripts.
//!
//! The toolkit never assembles general VM bytecode; it only needs the push
//! opcodes plus `CHECKSIG`/`CHECKMULTISIG` to build and read back the two
//! standard account scripts:
//!
//! - signature: `PUSHBYTES33 <key> CHECKSIG`
//! - multi-signature: `PUSH(m) (PUSHBYTES33 <key>)×n PUSH(n) CHECKMULTISIG`

use crate::{CoreError, CoreResult, UInt160};
use neo_cryptography::{PublicKey, Signature};

/// Opcodes of the legacy VM used by account scripts.
pub mod opcode {
    pub const PUSH0: u8 = 0x00;
    pub const PUSHBYTES1: u8 = 0x01;
    pub const PUSHBYTES33: u8 = 0x21;
    pub const PUSHBYTES64: u8 = 0x40;
    pub const PUSHBYTES75: u8 = 0x4b;
    pub const PUSHDATA1: u8 = 0x4c;
    pub const PUSHDATA2: u8 = 0x4d;
    pub const PUSHDATA4: u8 = 0x4e;
    pub const PUSHM1: u8 = 0x4f;
    pub const PUSH1: u8 = 0x51;
    pub const PUSH16: u8 = 0x60;
    pub const CHECKSIG: u8 = 0xac;
    pub const CHECKMULTISIG: u8 = 0xae;
}

/// Largest key count a multi-signature script may carry.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// Builds legacy VM scripts one push at a time.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    /// Pushes `data` with the shortest push instruction.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= opcode::PUSHBYTES75 as usize {
            self.script.push(len as u8);
        } else if len <= 0xFF {
            self.script.push(opcode::PUSHDATA1);
            self.script.push(len as u8);
        } else if len <= 0xFFFF {
            self.script.push(opcode::PUSHDATA2);
            self.script.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.script.push(opcode::PUSHDATA4);
            self.script.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);
        self
    }

    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => self.emit(opcode::PUSHM1),
            0 => self.emit(opcode::PUSH0),
            1..=16 => self.emit(opcode::PUSH1 - 1 + value as u8),
            _ => {
                let bytes = minimal_le_bytes(value);
                self.emit_push_bytes(&bytes)
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.script.clone()
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.script
    }
}

// Shortest two's complement little-endian form of `value`.
fn minimal_le_bytes(value: i64) -> Vec<u8> {
    let mut bytes = value.to_le_bytes().to_vec();
    while bytes.len() > 1 {
        let last = bytes[bytes.len() - 1];
        let prev = bytes[bytes.len() - 2];
        let redundant = (last == 0x00 && prev & 0x80 == 0) || (last == 0xff && prev & 0x80 != 0);
        if !redundant {
            break;
        }
        bytes.pop();
    }
    bytes
}

/// The standard single-key verification script.
pub fn signature_redeem_script(public_key: &PublicKey) -> Vec<u8> {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(public_key.as_bytes()).emit(opcode::CHECKSIG);
    builder.into_bytes()
}

/// The `m`-of-`n` verification script; keys keep the order given.
pub fn multisig_redeem_script(threshold: usize, public_keys: &[PublicKey]) -> CoreResult<Vec<u8>> {
    let n = public_keys.len();
    if n == 0 || n > MAX_MULTISIG_KEYS || threshold == 0 || threshold > n {
        return Err(CoreError::InvalidScript(format!(
            "invalid multi-signature parameters: m={threshold}, n={n}"
        )));
    }
    let mut builder = ScriptBuilder::new();
    builder.emit_push_int(threshold as i64);
    for key in public_keys {
        builder.emit_push_bytes(key.as_bytes());
    }
    builder.emit_push_int(n as i64).emit(opcode::CHECKMULTISIG);
    Ok(builder.into_bytes())
}

/// Invocation script pushing each signature in order.
pub fn invocation_script(signatures: &[Signature]) -> Vec<u8> {
    let mut builder = ScriptBuilder::new();
    for signature in signatures {
        builder.emit_push_bytes(signature.as_bytes());
    }
    builder.into_bytes()
}

/// Reads the signatures pushed by an invocation script.
pub fn parse_invocation_script(script: &[u8]) -> CoreResult<Vec<Signature>> {
    let mut cursor = ScriptCursor::new(script);
    let mut signatures = Vec::new();
    while !cursor.is_done() {
        let data = cursor.read_push_bytes()?;
        signatures.push(Signature::from_slice(data)?);
    }
    Ok(signatures)
}

/// A parsed standard verification script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationScript {
    Signature(PublicKey),
    MultiSig {
        threshold: usize,
        public_keys: Vec<PublicKey>,
    },
}

impl VerificationScript {
    pub fn multisig(threshold: usize, public_keys: Vec<PublicKey>) -> CoreResult<Self> {
        multisig_redeem_script(threshold, &public_keys)?;
        Ok(Self::MultiSig {
            threshold,
            public_keys,
        })
    }

    pub fn parse(script: &[u8]) -> CoreResult<Self> {
        let mut cursor = ScriptCursor::new(script);
        if script.first() == Some(&opcode::PUSHBYTES33) {
            let key = PublicKey::from_bytes(cursor.read_push_bytes()?)?;
            cursor.expect_op(opcode::CHECKSIG)?;
            cursor.expect_end()?;
            return Ok(Self::Signature(key));
        }

        let threshold = cursor.read_push_int()?;
        let mut public_keys = Vec::new();
        while cursor.peek() == Some(opcode::PUSHBYTES33) {
            public_keys.push(PublicKey::from_bytes(cursor.read_push_bytes()?)?);
        }
        let n = cursor.read_push_int()?;
        cursor.expect_op(opcode::CHECKMULTISIG)?;
        cursor.expect_end()?;

        if n != public_keys.len() as i64 {
            return Err(CoreError::InvalidScript(format!(
                "script declares {n} keys but pushes {}",
                public_keys.len()
            )));
        }
        if threshold < 1 || threshold > n {
            return Err(CoreError::InvalidScript(format!(
                "threshold {threshold} out of range for {n} keys"
            )));
        }
        Ok(Self::MultiSig {
            threshold: threshold as usize,
            public_keys,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Signature(key) => signature_redeem_script(key),
            Self::MultiSig {
                threshold,
                public_keys,
            } => {
                let mut builder = ScriptBuilder::new();
                builder.emit_push_int(*threshold as i64);
                for key in public_keys {
                    builder.emit_push_bytes(key.as_bytes());
                }
                builder
                    .emit_push_int(public_keys.len() as i64)
                    .emit(opcode::CHECKMULTISIG);
                builder.into_bytes()
            }
        }
    }

    #[inline]
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.to_bytes())
    }

    pub fn threshold(&self) -> usize {
        match self {
            Self::Signature(_) => 1,
            Self::MultiSig { threshold, .. } => *threshold,
        }
    }

    pub fn public_keys(&self) -> &[PublicKey] {
        match self {
            Self::Signature(key) => std::slice::from_ref(key),
            Self::MultiSig { public_keys, .. } => public_keys,
        }
    }
}

struct ScriptCursor<'a> {
    script: &'a [u8],
    pos: usize,
}

impl<'a> ScriptCursor<'a> {
    fn new(script: &'a [u8]) -> Self {
        Self { script, pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.script.len()
    }

    fn peek(&self) -> Option<u8> {
        self.script.get(self.pos).copied()
    }

    fn next_op(&mut self) -> CoreResult<u8> {
        let op = self
            .peek()
            .ok_or_else(|| CoreError::InvalidScript("unexpected end of script".into()))?;
        self.pos += 1;
        Ok(op)
    }

    fn take(&mut self, len: usize) -> CoreResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.script.len())
            .ok_or_else(|| CoreError::InvalidScript("push exceeds script length".into()))?;
        let data = &self.script[self.pos..end];
        self.pos = end;
        Ok(data)
    }

    fn take_len(&mut self, width: usize) -> CoreResult<usize> {
        let raw = self.take(width)?;
        let mut buf = [0u8; 4];
        buf[..width].copy_from_slice(raw);
        Ok(u32::from_le_bytes(buf) as usize)
    }

    fn read_push_bytes(&mut self) -> CoreResult<&'a [u8]> {
        let op = self.next_op()?;
        let len = match op {
            opcode::PUSHBYTES1..=opcode::PUSHBYTES75 => op as usize,
            opcode::PUSHDATA1 => self.take_len(1)?,
            opcode::PUSHDATA2 => self.take_len(2)?,
            opcode::PUSHDATA4 => self.take_len(4)?,
            other => {
                return Err(CoreError::InvalidScript(format!(
                    "expected a data push, found opcode {other:#04x}"
                )))
            }
        };
        self.take(len)
    }

    fn read_push_int(&mut self) -> CoreResult<i64> {
        match self.peek() {
            Some(opcode::PUSHM1) => {
                self.pos += 1;
                Ok(-1)
            }
            Some(opcode::PUSH0) => {
                self.pos += 1;
                Ok(0)
            }
            Some(op @ opcode::PUSH1..=opcode::PUSH16) => {
                self.pos += 1;
                Ok((op - opcode::PUSH1 + 1) as i64)
            }
            _ => {
                let bytes = self.read_push_bytes()?;
                if bytes.is_empty() || bytes.len() > 8 {
                    return Err(CoreError::InvalidScript(format!(
                        "integer push of {} bytes",
                        bytes.len()
                    )));
                }
                let fill = if bytes[bytes.len() - 1] & 0x80 != 0 { 0xff } else { 0x00 };
                let mut buf = [fill; 8];
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(i64::from_le_bytes(buf))
            }
        }
    }

    fn expect_op(&mut self, expected: u8) -> CoreResult<()> {
        match self.next_op()? {
            op if op == expected => Ok(()),
            op => Err(CoreError::InvalidScript(format!(
                "expected opcode {expected:#04x}, found {op:#04x}"
            ))),
        }
    }

    fn expect_end(&self) -> CoreResult<()> {
        if self.is_done() {
            Ok(())
        } else {
            Err(CoreError::InvalidScript(format!(
                "{} trailing bytes",
                self.script.len() - self.pos
            )))
        }
    }
}
