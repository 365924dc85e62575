//! Colors and visual style of the relationship canvas.

/// RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

/// Used for anything [`Color::parse`] does not understand.
const FALLBACK: Color = Color::rgb(128, 128, 128);

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Mix towards white by `factor` (0.0 unchanged, 1.0 white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Mix towards black by `factor` (0.0 unchanged, 1.0 black).
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#RRGGBB`, `#RGB`, `rgb(...)` or `rgba(...)`. Anything else,
	/// named colors included, comes back as mid gray.
	pub fn parse(css: &str) -> Self {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			return parse_hex(hex).unwrap_or(FALLBACK);
		}
		let Some(args) = css
			.strip_prefix("rgba(")
			.or_else(|| css.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
		else {
			return FALLBACK;
		};
		let parts: Vec<&str> = args.split(',').map(str::trim).collect();
		let channel = |i: usize| parts.get(i).and_then(|s| s.parse::<u8>().ok()).unwrap_or(128);
		let alpha = parts
			.get(3)
			.and_then(|s| s.parse::<f64>().ok())
			.unwrap_or(1.0);
		Color::rgba(channel(0), channel(1), channel(2), alpha)
	}
}

fn parse_hex(hex: &str) -> Option<Color> {
	let byte = |s: &str| u8::from_str_radix(s, 16).ok();
	match hex.len() {
		6 => Some(Color::rgb(
			byte(hex.get(0..2)?)?,
			byte(hex.get(2..4)?)?,
			byte(hex.get(4..6)?)?,
		)),
		3 => {
			let short = |i: usize| byte(hex.get(i..i + 1)?).map(|v| v * 17);
			Some(Color::rgb(short(0)?, short(1)?, short(2)?))
		}
		_ => None,
	}
}

/// Visual style of the canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	/// Center color of the background gradient; `None` for a flat fill.
	pub background_center: Option<Color>,
	pub edge: Color,
	pub edge_label: Color,
	/// Halo behind edge labels so they stay readable over lines.
	pub edge_label_halo: Color,
	pub node_label: Color,
	/// Shade nodes with a radial gradient instead of a flat fill.
	pub node_gradient: bool,
	pub node_border: Color,
	pub hover_ring: Color,
}

impl Theme {
	/// Light style for the dashboard panels.
	pub fn light() -> Self {
		Self {
			background: Color::rgb(250, 251, 252),
			background_center: Some(Color::rgb(255, 255, 255)),
			edge: Color::rgba(132, 132, 132, 0.8),
			edge_label: Color::rgb(75, 85, 99),
			edge_label_halo: Color::rgba(255, 255, 255, 0.85),
			node_label: Color::rgb(31, 41, 55),
			node_gradient: true,
			node_border: Color::rgba(255, 255, 255, 0.9),
			hover_ring: Color::rgb(37, 99, 235),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_faction_hex_colors() {
		assert_eq!(Color::parse("#4CAF50"), Color::rgb(0x4c, 0xaf, 0x50));
		assert_eq!(Color::parse("#fff"), Color::rgb(255, 255, 255));
	}

	#[test]
	fn parses_functional_notation() {
		assert_eq!(
			Color::parse("rgba(10, 20, 30, 0.5)"),
			Color::rgba(10, 20, 30, 0.5)
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Color::rgb(1, 2, 3));
	}

	#[test]
	fn unknown_notation_falls_back_to_gray() {
		assert_eq!(Color::parse("crimson"), FALLBACK);
		assert_eq!(Color::parse("#12345"), FALLBACK);
		assert_eq!(Color::parse("#ẞẞẞẞ"), FALLBACK);
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::rgb(0x21, 0x96, 0xf3).to_css(), "#2196f3");
		assert_eq!(Color::rgba(0, 0, 0, 0.25).to_css(), "rgba(0, 0, 0, 0.25)");
	}
}
