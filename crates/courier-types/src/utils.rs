//! Small formatting helpers shared across crates.

/// Truncates a long identifier (digest, address) for log output.
///
/// Shows the first 10 characters followed by ".." for longer strings,
/// which keeps a `0x`-prefixed value recognizable.
pub fn truncate_id(id: &str) -> String {
	if id.len() <= 10 {
		id.to_string()
	} else {
		format!("{}..", &id[..10])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_short_ids_unchanged() {
		assert_eq!(truncate_id("0xabc"), "0xabc");
	}

	#[test]
	fn test_long_ids_truncated() {
		assert_eq!(
			truncate_id("0x1234567890abcdef"),
			"0x12345678.."
		);
	}
}
