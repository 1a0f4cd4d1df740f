//! Storage for system-exclusive frames.
//!
//! Every other message fits in 3 bytes, but a sysex frame grows until its terminator arrives, so
//! the decoder stores it in a [`Buffer`] picked by the caller. Buffers have a capacity limit, and
//! a frame that outgrows it is reported and dropped instead of growing without bound.

use crate::prelude::*;

/// Describes types that can be used as sysex buffers for the
/// [`MidiStream`](struct.MidiStream.html) type.
///
/// This trait is automatically implemented by the [`stack_buffer!`](macro.stack_buffer.html)
/// macro, and very rarely should be implemented manually.
pub trait Buffer {
    /// Append bytes to the buffer.
    ///
    /// If the bytes do not fit, the buffer must be left unmodified and `Err(())` returned.
    fn push(&mut self, data: &[u8]) -> Result<(), ()>;
    fn clear(&mut self);
    fn as_slice(&self) -> &[u8];
}

/// A `Buffer` with virtually unlimited capacity.
impl Buffer for Vec<u8> {
    #[inline]
    fn push(&mut self, data: &[u8]) -> Result<(), ()> {
        self.extend_from_slice(data);
        Ok(())
    }
    #[inline]
    fn clear(&mut self) {
        Vec::clear(self)
    }
    #[inline]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

/// Define a stack buffer type, suitable for use with [`MidiStream`](struct.MidiStream.html).
///
/// # Usage
///
/// The `stack_buffer!` macro defines a buffer type, which can later be instatiated for use with
/// a `MidiStream`.
///
/// ```rust
/// midi_parser::stack_buffer! {
///     struct MyBuffer([u8; 512]);
/// }
///
/// use midi_parser::MidiStream;
/// let stream = MidiStream::with_buffer(MyBuffer::new());
/// ```
///
/// Buffers can have attributes, documentation, and be made `pub`lic.
///
/// ```rust
/// midi_parser::stack_buffer! {
///     /// Enough for a short device inquiry reply.
///     #[repr(C)]
///     pub struct InquiryBuffer([u8; 16]);
/// }
///
/// use midi_parser::MidiStream;
/// let stream = MidiStream::<InquiryBuffer>::default();
/// ```
#[macro_export]
macro_rules! stack_buffer {
    {
        @impl_def {$($attr:meta)*} {$($pub:ident)?} {$name:ident} {$size:expr}
    } => {
        $(#[$attr])*
        #[derive(Clone)]
        $($pub)? struct $name {
            buf: [u8; $size],
            len: usize,
        }
        impl core::hash::Hash for $name {
            #[inline]
            fn hash<H: core::hash::Hasher>(&self, h: &mut H) {
                h.write(&self.buf[..self.len]);
                h.write(&[0xFF]);
            }
        }
        impl core::cmp::PartialEq for $name {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                self.buf[..self.len] == other.buf[..other.len]
            }
        }
        impl core::cmp::Eq for $name {}
        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), "["))?;
                for databyte in self.buf[..self.len].iter() {
                    write!(f, "{:02x}", databyte)?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }
        #[allow(dead_code)]
        impl $name {
            pub const MAX_CAP: usize = $size;
            #[inline]
            $($pub)? const fn new() -> $name {
                $name {
                    buf: [0; $size],
                    len: 0,
                }
            }
        }
        impl core::default::Default for $name {
            #[inline]
            fn default() -> $name {
                Self::new()
            }
        }
        impl $crate::Buffer for $name {
            #[inline]
            fn push(&mut self, data: &[u8]) -> core::result::Result<(), ()> {
                let new_len = self.len + data.len();
                if new_len > Self::MAX_CAP {
                    Err(())
                } else {
                    self.buf[self.len..new_len].copy_from_slice(data);
                    self.len = new_len;
                    Ok(())
                }
            }
            #[inline]
            fn clear(&mut self) {
                self.len = 0;
            }
            #[inline]
            fn as_slice(&self) -> &[u8] {
                &self.buf[..self.len]
            }
        }
    };
    {
        $(#[$attr:meta])*
        struct $name:ident([u8; $size:expr]);
    }=> {
        $crate::stack_buffer!(@impl_def {$($attr)*} {} {$name} {$size});
    };
    {
        $(#[$attr:meta])*
        pub struct $name:ident([u8; $size:expr]);
    }=> {
        $crate::stack_buffer!(@impl_def {$($attr)*} {pub} {$name} {$size});
    };
}

/// The default sysex buffer type used for [`MidiStream`](struct.MidiStream.html).
///
/// Backed by a `Vec`, limited to 256KB unless a different limit is given through
/// [`with_limit`](#method.with_limit).
/// The limit counts the manufacturer id byte along with the payload.
#[derive(Clone, Hash)]
pub struct DefaultBuffer {
    buf: Vec<u8>,
    limit: usize,
}
impl DefaultBuffer {
    pub const DEFAULT_LIMIT: usize = 256 * 1024;

    #[inline]
    pub const fn new() -> DefaultBuffer {
        DefaultBuffer::with_limit(Self::DEFAULT_LIMIT)
    }

    /// Create an empty buffer that refuses to grow past `limit` bytes.
    #[inline]
    pub const fn with_limit(limit: usize) -> DefaultBuffer {
        DefaultBuffer {
            buf: Vec::new(),
            limit,
        }
    }

    #[inline]
    pub const fn max_cap(&self) -> usize {
        self.limit
    }
}
impl Default for DefaultBuffer {
    #[inline]
    fn default() -> DefaultBuffer {
        DefaultBuffer::new()
    }
}
impl fmt::Debug for DefaultBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DefaultBuffer[")?;
        for databyte in self.buf.iter() {
            write!(f, "{:02x}", databyte)?;
        }
        write!(f, "]")?;
        Ok(())
    }
}
impl Buffer for DefaultBuffer {
    #[inline]
    fn push(&mut self, data: &[u8]) -> Result<(), ()> {
        if self.buf.len() + data.len() > self.limit {
            Err(())
        } else {
            self.buf.extend_from_slice(data);
            Ok(())
        }
    }
    #[inline]
    fn clear(&mut self) {
        self.buf.clear()
    }
    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.buf[..]
    }
}
