use std::io::Read;

use zstd_safe::{DCtx, InBuffer, OutBuffer};

use crate::error::{Error, Result};

/// A streaming decoder for one or more concatenated zstd frames.
///
/// # Examples
///
/// ```no_run
/// use std::{fs::File, io};
/// use zarc::Decoder;
///
/// let input = File::open("notes.zst")?;
/// let mut output = File::create("notes")?;
/// let mut decoder = Decoder::new(input)?;
/// io::copy(&mut decoder, &mut output)?;
/// # Ok::<(), zarc::Error>(())
/// ```
pub struct Decoder<R> {
    dctx: DCtx<'static>,
    src: R,
    in_buf: Vec<u8>,
    in_buf_pos: usize,
    in_buf_limit: usize,
    // zstd still expects input (or has output buffered) for the current frame
    in_frame: bool,
    read_compressed: u64,
    written_decompressed: u64,
}

impl<R> Decoder<R> {
    /// Creates a new `Decoder` reading compressed data from `src`.
    ///
    /// # Errors
    ///
    /// Fails if the decompression context cannot be created.
    pub fn new(src: R) -> Result<Self> {
        let dctx =
            DCtx::try_create().ok_or_else(|| Error::zstd_create("decompression context"))?;

        Ok(Self {
            dctx,
            src,
            in_buf: vec![0; DCtx::in_size()],
            in_buf_pos: 0,
            in_buf_limit: 0,
            in_frame: false,
            read_compressed: 0,
            written_decompressed: 0,
        })
    }

    /// Gets the total number of compressed bytes consumed from the source.
    pub fn read_compressed(&self) -> u64 {
        self.read_compressed
    }

    /// Gets the total number of decompressed bytes produced.
    pub fn written_decompressed(&self) -> u64 {
        self.written_decompressed
    }

    /// Consumes the decoder, returning the source.
    pub fn into_inner(self) -> R {
        self.src
    }
}

impl<R: Read> Decoder<R> {
    /// Decompresses data from the source into `buf`.
    ///
    /// Returns the number of bytes written to `buf`, zero once the source is exhausted at a frame
    /// boundary.
    ///
    /// # Errors
    ///
    /// If the data is not valid zstd, the source ends in the middle of a frame, or reading from
    /// the source fails.
    pub fn decompress(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut out_buffer = OutBuffer::around(buf);
        while out_buffer.pos() == 0 {
            if self.in_buf_pos == self.in_buf_limit {
                self.in_buf_limit = self.src.read(&mut self.in_buf)?;
                self.in_buf_pos = 0;

                if self.in_buf_limit == 0 {
                    if !self.in_frame {
                        break;
                    }
                    // Output may still be buffered inside zstd
                    let mut empty = InBuffer::around(&[]);
                    let hint = self.dctx.decompress_stream(&mut out_buffer, &mut empty)?;
                    if out_buffer.pos() == 0 {
                        return Err(Error::truncated());
                    }
                    self.in_frame = hint != 0;
                    break;
                }
            }

            let mut in_buffer = InBuffer::around(&self.in_buf[self.in_buf_pos..self.in_buf_limit]);
            let hint = self
                .dctx
                .decompress_stream(&mut out_buffer, &mut in_buffer)?;
            self.in_buf_pos += in_buffer.pos();
            self.read_compressed += in_buffer.pos() as u64;
            // Zero means a frame was completely decoded and flushed
            self.in_frame = hint != 0;
        }

        let n = out_buffer.pos();
        self.written_decompressed += n as u64;

        Ok(n)
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.decompress(buf).map_err(std::io::Error::other)
    }
}
