//! Location id ↔ marker tag pair codec.
//!
//! A 36h11 marker family only encodes ids up to 586, so a 16-bit location id
//! is split across two markers mounted side by side. Bit 8 marks the tag
//! carrying the high byte; the other carries the low byte. The pair can be
//! detected in either order.

const HIGH_FLAG: u16 = 1 << 8;

/// Whether `tag` carries the high byte of a location id.
pub const fn is_high_tag(tag: u16) -> bool {
    tag & HIGH_FLAG != 0
}

/// Split a location id into `(high_tag, low_tag)`.
pub const fn split_location(id: u16) -> (u16, u16) {
    let high = (id >> 8) & 0xFF;
    let low = id & 0xFF;
    (HIGH_FLAG | high, low)
}

/// Recover the location id from two tags detected in any order.
pub const fn join_tags(a: u16, b: u16) -> u16 {
    if is_high_tag(a) {
        ((a & 0xFF) << 8) | (b & 0xFF)
    } else {
        ((b & 0xFF) << 8) | (a & 0xFF)
    }
}
