use crate::constants;
use crate::{Endian, Word};
use byteorder::ByteOrder;

/// Device memory as seen by the compute unit: a flat, byte-addressable
/// store shared by every thread of a dispatch.
///
/// Accesses never panic on bad addresses; all accessors return `Err(())`
/// for ranges that are not addressable, and the caller attaches context.
/// Alignment is not checked here, it is an execution-unit concern.
pub trait Storage {
    /// Total length of the storage in bytes.
    fn length(&self) -> u32;

    /// Whether `[address..address + length]` is addressable.
    fn check_range(&self, address: u32, length: u32) -> bool;

    /// Immutably borrows the byte range at `address`.
    fn borrow_slice(&self, address: u32, length: u32) -> Result<&[u8], ()>;

    /// Mutably borrows the byte range at `address`.
    fn borrow_slice_mut(&mut self, address: u32, length: u32) -> Result<&mut [u8], ()>;

    /// Reads `size` bytes (1, 2 or 4) little-endian and zero-extends the
    /// result to 32 bits.
    fn read_uint(&self, address: u32, size: u32) -> Result<u32, ()> {
        debug_assert!(size >= 1 && size <= constants::WORD_BYTES);
        Ok(Endian::read_uint(self.borrow_slice(address, size)?, size as usize) as u32)
    }

    /// Writes the low `size` bytes (1, 2 or 4) of `value` little-endian.
    fn write_uint(&mut self, address: u32, size: u32, value: u32) -> Result<(), ()> {
        debug_assert!(size >= 1 && size <= constants::WORD_BYTES);
        Endian::write_uint(
            self.borrow_slice_mut(address, size)?,
            u64::from(value),
            size as usize,
        );
        Ok(())
    }

    /// Reads a full 32-bit word.
    fn read_word(&self, address: u32) -> Result<Word, ()> {
        Ok(Endian::read_u32(
            self.borrow_slice(address, constants::WORD_BYTES)?,
        ))
    }

    /// Writes a full 32-bit word.
    fn write_word(&mut self, address: u32, value: Word) -> Result<(), ()> {
        Endian::write_u32(
            self.borrow_slice_mut(address, constants::WORD_BYTES)?,
            value,
        );
        Ok(())
    }

    /// Writes a dense sequence of instruction words starting at `address`.
    /// Used to place a kernel image.
    fn write_words(&mut self, address: u32, words: &[Word]) -> Result<(), ()> {
        for (i, word) in words.iter().enumerate() {
            self.write_word(address + (i as u32) * constants::WORD_BYTES, *word)?;
        }
        Ok(())
    }

    /// Copies raw bytes into the storage starting at `address`.
    fn write_bytes(&mut self, address: u32, bytes: &[u8]) -> Result<(), ()> {
        self.borrow_slice_mut(address, bytes.len() as u32)?
            .copy_from_slice(bytes);
        Ok(())
    }
}

/// Default `Storage` backed by a contiguous, zero-initialized block.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub fn new(length: u32) -> Memory {
        Memory {
            data: vec![0; length as usize],
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Storage for Memory {
    fn length(&self) -> u32 {
        self.data.len() as u32
    }

    fn check_range(&self, address: u32, length: u32) -> bool {
        let len = self.data.len() as u64;
        u64::from(address) + u64::from(length) <= len
    }

    fn borrow_slice(&self, address: u32, length: u32) -> Result<&[u8], ()> {
        if self.check_range(address, length) {
            Ok(&self.data[address as usize..(address + length) as usize])
        } else {
            Err(())
        }
    }

    fn borrow_slice_mut(&mut self, address: u32, length: u32) -> Result<&mut [u8], ()> {
        if self.check_range(address, length) {
            Ok(&mut self.data[address as usize..(address + length) as usize])
        } else {
            Err(())
        }
    }
}

impl<'a> From<&'a [u8]> for Memory {
    fn from(s: &'a [u8]) -> Memory {
        Memory { data: Vec::from(s) }
    }
}
