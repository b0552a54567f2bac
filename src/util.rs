//! Small helpers shared across modules.

/// Replace `{key}` placeholders in a prompt template with their values.
/// Deliberately dumb: no escaping, no conditionals, no nesting.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Truncate a large string for logging, cutting on a char boundary so
/// multi-byte text (the content is Vietnamese) never splits mid-character.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let cut = s
      .char_indices()
      .take_while(|(i, _)| *i <= max)
      .last()
      .map(|(i, _)| i)
      .unwrap_or(0);
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}
