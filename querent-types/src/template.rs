//! `{name}` placeholder substitution against collected answers.

use crate::{Answers, ResolveError};

/// Render a template, replacing every `{name}` with the display form of
/// `answers[name]`. `{{` and `}}` produce literal braces.
pub fn render(template: &str, answers: &Answers) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for (_, k) in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed || key.is_empty() || key.contains('{') {
                    return Err(ResolveError::MalformedTemplate {
                        template: template.to_string(),
                        position: pos,
                    });
                }
                let value = answers
                    .get(&key)
                    .ok_or_else(|| ResolveError::UnresolvedTemplate {
                        template: template.to_string(),
                        key: key.clone(),
                    })?;
                out.push_str(&value.to_string());
            }
            '}' => {
                return Err(ResolveError::MalformedTemplate {
                    template: template.to_string(),
                    position: pos,
                });
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
