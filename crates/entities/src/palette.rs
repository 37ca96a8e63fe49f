use aviator_common::Color;

pub const RED: Color = Color::from_hex(0xf25346);
pub const WHITE: Color = Color::from_hex(0xd8d0d1);
pub const BROWN: Color = Color::from_hex(0x59332e);
pub const PINK: Color = Color::from_hex(0xf5986e);
pub const BROWN_DARK: Color = Color::from_hex(0x23190f);
pub const BLUE: Color = Color::from_hex(0x68c3c0);
