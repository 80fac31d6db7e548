use super::error::DecodeError;
use super::ext::{Extension, TimestampExt};
use crate::model::{Map, Value};

const MAX_DEPTH: usize = 512;

/// Sequential MessagePack decoder over an owned copy of a chunk.
///
/// The decoder keeps a cursor into its buffer and is meant for a single
/// caller; share it across threads only behind external synchronization.
/// The timestamp extension (type 0) is registered on construction.
pub struct ByteDecoder {
    data: Vec<u8>,
    x: usize,
    extensions: Vec<Box<dyn Extension>>,
}

impl ByteDecoder {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            x: 0,
            extensions: Vec::new(),
        }
        .with_extension(Box::new(TimestampExt))
    }

    /// Registers `ext`, replacing any decoder for the same type tag.
    pub fn with_extension(mut self, ext: Box<dyn Extension>) -> Self {
        self.extensions.retain(|e| e.tag() != ext.tag());
        self.extensions.push(ext);
        self
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Decodes the next top-level value.
    ///
    /// Returns `DecodeError::Eof` once the buffer is exhausted. On any other
    /// error the cursor stays where the failed value started.
    pub fn decode_next(&mut self) -> Result<Value, DecodeError> {
        if self.is_empty() {
            return Err(DecodeError::Eof);
        }

        let start = self.x;
        self.read_value(0).map_err(|e| {
            self.x = start;
            e
        })
    }

    /// The decoder never writes MessagePack.
    pub fn encode(&self, _value: &Value) -> Result<Vec<u8>, DecodeError> {
        Err(DecodeError::Unsupported("encoding"))
    }

    fn take(&mut self, n: usize) -> Result<&[u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEof(self.data.len()));
        }
        let buf = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(buf)
    }

    fn be<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.be::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.be()?))
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.be()?))
    }

    fn u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.be()?))
    }

    fn read_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::DepthLimit(MAX_DEPTH));
        }

        let offset = self.x;
        let byte = self.u8()?;

        match byte {
            0x00..=0x7f => Ok(Value::Uint(byte as u64)),
            0x80..=0x8f => self.read_map((byte & 0x0f) as usize, depth),
            0x90..=0x9f => self.read_array((byte & 0x0f) as usize, depth),
            0xa0..=0xbf => self.read_str((byte & 0x1f) as usize),
            0xc0 => Ok(Value::Nil),
            0xc2 => Ok(Value::Bool(false)),
            0xc3 => Ok(Value::Bool(true)),
            0xc4 => {
                let n = self.u8()? as usize;
                self.read_bin(n)
            }
            0xc5 => {
                let n = self.u16()? as usize;
                self.read_bin(n)
            }
            0xc6 => {
                let n = self.u32()? as usize;
                self.read_bin(n)
            }
            0xc7 => {
                let n = self.u8()? as usize;
                self.read_ext(n)
            }
            0xc8 => {
                let n = self.u16()? as usize;
                self.read_ext(n)
            }
            0xc9 => {
                let n = self.u32()? as usize;
                self.read_ext(n)
            }
            0xca => Ok(Value::Float(f32::from_be_bytes(self.be()?) as f64)),
            0xcb => Ok(Value::Float(f64::from_be_bytes(self.be()?))),
            0xcc => Ok(Value::Uint(self.u8()? as u64)),
            0xcd => Ok(Value::Uint(self.u16()? as u64)),
            0xce => Ok(Value::Uint(self.u32()? as u64)),
            0xcf => Ok(Value::Uint(self.u64()?)),
            0xd0 => Ok(Value::Int(i8::from_be_bytes(self.be()?) as i64)),
            0xd1 => Ok(Value::Int(i16::from_be_bytes(self.be()?) as i64)),
            0xd2 => Ok(Value::Int(i32::from_be_bytes(self.be()?) as i64)),
            0xd3 => Ok(Value::Int(i64::from_be_bytes(self.be()?))),
            0xd4 => self.read_ext(1),
            0xd5 => self.read_ext(2),
            0xd6 => self.read_ext(4),
            0xd7 => self.read_ext(8),
            0xd8 => self.read_ext(16),
            0xd9 => {
                let n = self.u8()? as usize;
                self.read_str(n)
            }
            0xda => {
                let n = self.u16()? as usize;
                self.read_str(n)
            }
            0xdb => {
                let n = self.u32()? as usize;
                self.read_str(n)
            }
            0xdc => {
                let n = self.u16()? as usize;
                self.read_array(n, depth)
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_array(n, depth)
            }
            0xde => {
                let n = self.u16()? as usize;
                self.read_map(n, depth)
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_map(n, depth)
            }
            0xe0..=0xff => Ok(Value::Int(byte as i8 as i64)),
            _ => Err(DecodeError::InvalidByte { byte, offset }),
        }
    }

    fn read_str(&mut self, n: usize) -> Result<Value, DecodeError> {
        let buf = self.take(n)?;
        Ok(Value::Str(String::from_utf8_lossy(buf).into_owned()))
    }

    fn read_bin(&mut self, n: usize) -> Result<Value, DecodeError> {
        Ok(Value::Bin(self.take(n)?.to_vec()))
    }

    fn read_ext(&mut self, n: usize) -> Result<Value, DecodeError> {
        let tag = self.u8()? as i8;
        let data = self.take(n)?.to_vec();
        match self.extensions.iter().find(|e| e.tag() == tag) {
            Some(ext) => ext.decode(&data),
            None => Ok(Value::Ext(tag, data)),
        }
    }

    // Every element takes at least one byte, so the remaining length bounds
    // any preallocation driven by an untrusted header.
    fn read_array(&mut self, n: usize, depth: usize) -> Result<Value, DecodeError> {
        let mut items = Vec::with_capacity(n.min(self.remaining()));
        for _ in 0..n {
            items.push(self.read_value(depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn read_map(&mut self, n: usize, depth: usize) -> Result<Value, DecodeError> {
        let mut map = Map::with_capacity(n.min(self.remaining() / 2));
        for _ in 0..n {
            let key = self.read_value(depth + 1)?;
            let value = self.read_value(depth + 1)?;
            map.push(key, value);
        }
        Ok(Value::Map(map))
    }
}
