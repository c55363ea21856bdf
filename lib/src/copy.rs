use std::io::{self, ErrorKind, Read, Write};

/// The block size used when moving bytes between streams.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Copies `reader` into `writer` in blocks of at most [`CHUNK_SIZE`] bytes.
///
/// Stops at the first read that returns zero bytes and returns the number of bytes copied.
///
/// # Errors
///
/// Any read or write error except [`ErrorKind::Interrupted`].
pub fn copy_stream<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0; CHUNK_SIZE];
    let mut copied = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        copied += n as u64;
    }

    Ok(copied)
}
