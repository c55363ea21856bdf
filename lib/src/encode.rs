use std::io::Write;

use zstd_safe::{
    CCtx, CParameter, CompressionLevel, InBuffer, OutBuffer, zstd_sys::ZSTD_EndDirective,
};

use crate::error::{Error, Result};

/// Options that configure how data is compressed.
///
/// # Examples
///
/// Supports builder like chaining.
///
/// ```
/// use zarc::EncodeOptions;
///
/// let mut archive: Vec<u8> = vec![];
/// let encoder = EncodeOptions::new()
///     .checksum_flag(false)
///     .compression_level(9)
///     .into_encoder(&mut archive)?;
/// # Ok::<(), zarc::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    checksum_flag: bool,
    compression_level: CompressionLevel,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeOptions {
    /// Creates a set of options with default values, compression level 3 and frame checksums.
    pub fn new() -> Self {
        Self {
            checksum_flag: true,
            compression_level: 3,
        }
    }

    /// Whether to write a 32 bit checksum at the end of the frame.
    pub fn checksum_flag(mut self, flag: bool) -> Self {
        self.checksum_flag = flag;
        self
    }

    /// Sets the compression level used by zstd.
    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    /// Creates an [`Encoder`] with the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the compression context cannot be created or rejects a parameter.
    pub fn into_encoder<W>(self, writer: W) -> Result<Encoder<W>> {
        Encoder::with_opts(writer, &self)
    }
}

/// A single-use streaming encoder that writes one zstd frame.
///
/// Compressed data is passed to the inner writer as soon as zstd produces it. The frame must be
/// ended with [`Encoder::finish`], dropping the encoder leaves an incomplete frame behind.
///
/// # Examples
///
/// ```no_run
/// use std::{fs::File, io};
/// use zarc::Encoder;
///
/// let mut input = File::open("notes")?;
/// let output = File::create("notes.zst")?;
/// let mut encoder = Encoder::new(output)?;
/// io::copy(&mut input, &mut encoder)?;
/// encoder.finish()?;
/// # Ok::<(), zarc::Error>(())
/// ```
pub struct Encoder<W> {
    cctx: CCtx<'static>,
    out_buf: Vec<u8>,
    writer: W,
    written_compressed: u64,
}

impl<W> Encoder<W> {
    /// Creates a new `Encoder` with default parameters.
    ///
    /// # Errors
    ///
    /// Fails if the encoder could not be created.
    pub fn new(writer: W) -> Result<Self> {
        Self::with_opts(writer, &EncodeOptions::new())
    }

    /// Creates a new `Encoder` with the given [`EncodeOptions`].
    ///
    /// # Errors
    ///
    /// Fails if the encoder could not be created.
    pub fn with_opts(writer: W, opts: &EncodeOptions) -> Result<Self> {
        let mut cctx =
            CCtx::try_create().ok_or_else(|| Error::zstd_create("compression context"))?;
        cctx.set_parameter(CParameter::CompressionLevel(opts.compression_level))?;
        cctx.set_parameter(CParameter::ChecksumFlag(opts.checksum_flag))?;

        Ok(Self {
            cctx,
            out_buf: vec![0; CCtx::out_size()],
            writer,
            written_compressed: 0,
        })
    }

    /// The total number of compressed bytes that have been written to the inner writer.
    pub fn written_compressed(&self) -> u64 {
        self.written_compressed
    }

    /// Returns a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Encoder<W> {
    /// Consumes and compresses all of `buf`.
    ///
    /// Returns the number of bytes consumed, which is always `buf.len()`.
    ///
    /// # Errors
    ///
    /// If compression fails or the inner writer returns an error.
    pub fn compress(&mut self, buf: &[u8]) -> Result<usize> {
        let mut in_buffer = InBuffer::around(buf);

        while in_buffer.pos() < buf.len() {
            let mut out_buffer = OutBuffer::around(self.out_buf.as_mut_slice());
            self.cctx.compress_stream2(
                &mut out_buffer,
                &mut in_buffer,
                ZSTD_EndDirective::ZSTD_e_continue,
            )?;
            let n = out_buffer.pos();
            self.write_out_buf(n)?;
        }

        Ok(buf.len())
    }

    /// Ends the frame and flushes the inner writer.
    ///
    /// Returns the total number of compressed bytes written by this `Encoder`.
    ///
    /// # Errors
    ///
    /// Fails if the frame epilogue cannot be written.
    pub fn finish(mut self) -> Result<u64> {
        self.drain(ZSTD_EndDirective::ZSTD_e_end)?;
        self.writer.flush()?;

        Ok(self.written_compressed)
    }

    /// Calls zstd with no further input until it reports nothing left to flush.
    fn drain(&mut self, directive: ZSTD_EndDirective) -> Result<()> {
        loop {
            let mut empty = InBuffer::around(&[]);
            let mut out_buffer = OutBuffer::around(self.out_buf.as_mut_slice());
            let left = self
                .cctx
                .compress_stream2(&mut out_buffer, &mut empty, directive)?;
            let n = out_buffer.pos();
            self.write_out_buf(n)?;

            if left == 0 {
                return Ok(());
            }
        }
    }

    #[inline]
    fn write_out_buf(&mut self, n: usize) -> Result<()> {
        if n > 0 {
            self.writer.write_all(&self.out_buf[..n])?;
            self.written_compressed += n as u64;
        }

        Ok(())
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.compress(buf).map_err(std::io::Error::other)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain(ZSTD_EndDirective::ZSTD_e_flush)
            .map_err(std::io::Error::other)?;
        self.writer.flush()
    }
}
