use std::io::{self, Write};

pub trait Writer<W: Write> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;
    fn into_inner(self: Box<Self>) -> io::Result<W>;
}

/// Writes each buffer followed by a delimiter.
pub struct LineWriter<W> {
    inner: W,
    delim: u8,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            delim: b'\n',
        }
    }

    pub fn with_delimiter(inner: W, delim: u8) -> Self {
        Self { inner, delim }
    }
}

impl<W: Write> Writer<W> for LineWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.inner.write_all(&[self.delim])
    }

    fn into_inner(mut self: Box<Self>) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_writer() -> io::Result<()> {
        let mut writer = Box::new(LineWriter::new(Vec::new()));
        writer.write(b"a")?;
        writer.write(b"")?;
        writer.write(b"b")?;
        assert_eq!(b"a\n\nb\n".to_vec(), writer.into_inner()?);
        Ok(())
    }

    #[test]
    fn test_custom_delimiter() -> io::Result<()> {
        let mut writer = Box::new(LineWriter::with_delimiter(Vec::new(), 0));
        writer.write(b"x")?;
        assert_eq!(vec![b'x', 0], writer.into_inner()?);
        Ok(())
    }
}
