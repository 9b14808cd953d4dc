//! Wire-level protocol helpers for MAX7219 daisy chains.

/// Register addresses (datasheet table 2).
pub mod register {
    pub const NO_OP: u8 = 0x00;
    /// Row 0 of the 8x8 matrix. Rows 1..=7 follow consecutively.
    pub const DIGIT_0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Rows (digit registers) per device.
pub const ROWS: usize = 8;
/// Highest accepted intensity level.
pub const MAX_INTENSITY: u8 = 0x0F;
/// Longest supported chain.
pub const MAX_CHAIN_LEN: usize = 16;
/// Bytes per device command (address + data).
pub const COMMAND_BYTES: usize = 2;
/// Packet buffer size for the longest chain.
pub const MAX_PACKET_BYTES: usize = MAX_CHAIN_LEN * COMMAND_BYTES;

/// One CS-framed transfer covering every device in the chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainPacket {
    bytes: [u8; MAX_PACKET_BYTES],
    len: usize,
}

impl ChainPacket {
    /// Bytes to shift out, first byte first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Builds one 16-bit command word.
#[inline]
pub const fn build_command(register: u8, data: u8) -> [u8; COMMAND_BYTES] {
    [register & 0x0F, data]
}

/// Builds a packet that writes `register` on `device` and no-ops the rest.
///
/// Device 0 is the one wired to the MCU, so its command is shifted out last.
/// Returns `None` for an empty/oversized chain or a device outside it.
pub fn build_chain_packet(
    chain_len: usize,
    device: usize,
    register: u8,
    data: u8,
) -> Option<ChainPacket> {
    if device >= chain_len {
        return None;
    }

    let mut packet = empty_packet(chain_len)?;
    let slot = (chain_len - 1 - device) * COMMAND_BYTES;
    packet.bytes[slot..slot + COMMAND_BYTES].copy_from_slice(&build_command(register, data));
    Some(packet)
}

/// Builds a packet that writes the same register on every device.
pub fn build_broadcast_packet(chain_len: usize, register: u8, data: u8) -> Option<ChainPacket> {
    let mut packet = empty_packet(chain_len)?;
    for slot in packet.bytes[..packet.len].chunks_exact_mut(COMMAND_BYTES) {
        slot.copy_from_slice(&build_command(register, data));
    }
    Some(packet)
}

/// Splits a packed 8x8 image into `(digit register, row bits)` pairs.
///
/// Byte `n` of the little-endian image is row `n`. Mirrored modules are
/// mounted upside down, so the row order is reversed.
pub fn image_rows(image: u64, mirrored: bool) -> [(u8, u8); ROWS] {
    let bytes = image.to_le_bytes();
    let mut rows = [(0u8, 0u8); ROWS];

    for (row, bits) in bytes.iter().enumerate() {
        let digit = if mirrored { ROWS - 1 - row } else { row };
        rows[row] = (register::DIGIT_0 + digit as u8, *bits);
    }

    rows
}

fn empty_packet(chain_len: usize) -> Option<ChainPacket> {
    if chain_len == 0 || chain_len > MAX_CHAIN_LEN {
        return None;
    }

    Some(ChainPacket {
        bytes: [0u8; MAX_PACKET_BYTES],
        len: chain_len * COMMAND_BYTES,
    })
}
