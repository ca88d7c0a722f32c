//! Placeholder substitution for template lines.
//!
//! `$0`, `$1`, ... insert positional arguments, `${path}` inserts the alias
//! an imported path is bound to, and `$$` is a literal dollar sign.

use super::RenderError;
use super::imports::ImportTable;

/// Expands the placeholders in `template`.
pub(super) fn expand(
    template: &str,
    args: &[&str],
    imports: &ImportTable,
) -> Result<String, RenderError> {
    let malformed = |offset: usize| RenderError::MalformedPlaceholder {
        template: template.to_owned(),
        offset,
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some((_, '$')) => {
                chars.next();
                out.push('$');
            }
            Some((_, '{')) => {
                chars.next();
                let mut path = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, next)) => path.push(next),
                        None => return Err(malformed(offset)),
                    }
                }
                let alias = imports
                    .alias(&path)
                    .ok_or_else(|| RenderError::UnknownImport {
                        template: template.to_owned(),
                        path: path.clone(),
                    })?;
                out.push_str(alias);
            }
            Some((_, digit)) if digit.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some((_, next)) = chars.peek().copied() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                let index: usize = digits.parse().map_err(|_| malformed(offset))?;
                let arg = args.get(index).ok_or_else(|| RenderError::MissingArgument {
                    template: template.to_owned(),
                    index,
                })?;
                out.push_str(arg);
            }
            _ => return Err(malformed(offset)),
        }
    }
    Ok(out)
}
