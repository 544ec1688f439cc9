use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 120 };
pub const SECONDARY: Color = Color::TrueColor { r: 110, g: 160, b: 220 };
pub const ACCENT: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 90, g: 200, b: 220 };
pub const LATENCY: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const LOCATION: Color = Color::TrueColor { r: 200, g: 140, b: 220 };
pub const FAILURE: Color = Color::Red;
