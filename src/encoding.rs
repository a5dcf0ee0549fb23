use std::str;

use encoding_rs::{Encoding, WINDOWS_1252};

const CHARSET_SNIFF_LEN: usize = 1024;

/// Decodes an HTML byte stream: BOM first, then a `charset=` declaration near the top,
/// then strict UTF-8, and finally Windows-1252.
#[must_use]
pub fn decode_html(input: &[u8]) -> String {
	if let Some((encoding, bom_len)) = Encoding::for_bom(input) {
		let (decoded, _) = encoding.decode_without_bom_handling(&input[bom_len..]);
		return decoded.into_owned();
	}
	if let Some(encoding) = declared_charset(input) {
		let (decoded, _, _) = encoding.decode(input);
		return decoded.into_owned();
	}
	if let Ok(text) = str::from_utf8(input) {
		return text.to_string();
	}
	let (decoded, _, _) = WINDOWS_1252.decode(input);
	decoded.into_owned()
}

fn declared_charset(input: &[u8]) -> Option<&'static Encoding> {
	let head = &input[..input.len().min(CHARSET_SNIFF_LEN)];
	let head = String::from_utf8_lossy(head).to_ascii_lowercase();
	let start = head.find("charset=")? + "charset=".len();
	let label: String = head[start..]
		.trim_start_matches(['"', '\''])
		.chars()
		.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
		.collect();
	let encoding = Encoding::for_label(label.as_bytes())?;
	// UTF-16 declarations inside an ASCII-compatible stream are bogus.
	(encoding.output_encoding() == encoding).then_some(encoding)
}
