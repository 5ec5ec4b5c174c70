// Colors shared by every piece of drawing code

use eframe::epaint::Color32;

pub const BG_DARK: Color32 = Color32::from_rgb(0x0D, 0x0F, 0x14);
pub const BG_CARD: Color32 = Color32::from_rgb(0x15, 0x18, 0x20);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x1C, 0x20, 0x30);
pub const ACCENT: Color32 = Color32::from_rgb(0x6C, 0x63, 0xFF);
pub const ACCENT_GLOW: Color32 = Color32::from_rgb(0x4B, 0x44, 0xCC);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xF0, 0xF2, 0xFF);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);
pub const SUCCESS: Color32 = Color32::from_rgb(0x22, 0xD3, 0xA0);
pub const ERROR: Color32 = Color32::from_rgb(0xFF, 0x5F, 0x7E);
pub const BORDER: Color32 = Color32::from_rgb(0x25, 0x2A, 0x3A);
pub const SHADOW: Color32 = Color32::BLACK;

/// Save button before there is anything to save
pub const SAVE_IDLE: Color32 = Color32::from_rgb(0x1E, 0x2A, 0x1E);
/// Save button label once a cutout is ready
pub const SAVE_READY_TEXT: Color32 = Color32::from_rgb(0x0D, 0x1A, 0x0D);

/// Checkerboard tiles behind transparent previews
pub const CHECKER_LIGHT: [u8; 3] = [200, 200, 200];
pub const CHECKER_DARK: [u8; 3] = [155, 155, 155];
