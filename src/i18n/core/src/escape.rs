/* src/i18n/core/src/escape.rs */

/// Make serialized JSON safe to embed in an inline `<script>` element.
///
/// Inside JSON strings, `<`, `>`, `&` and every non-ASCII code point become
/// `\uXXXX` escapes (astral code points as surrogate pairs), so the payload
/// can neither close the script element nor be mangled by a non-UTF-8
/// transport. Text outside strings is copied verbatim.
pub fn script_safe_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len() + json.len() / 8);
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if !in_string {
      in_string = ch == '"';
      out.push(ch);
      continue;
    }
    match ch {
      '\\' => {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
      }
      '"' => {
        in_string = false;
        out.push(ch);
      }
      '<' | '>' | '&' => push_unit(&mut out, u32::from(ch)),
      c if c.is_ascii() => out.push(c),
      c => {
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
          push_unit(&mut out, u32::from(*unit));
        }
      }
    }
  }
  out
}

fn push_unit(out: &mut String, unit: u32) {
  out.push_str(&format!("\\u{unit:04x}"));
}
