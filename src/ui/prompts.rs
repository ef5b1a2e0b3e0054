//! Interactive prompts.

use console::{style, Key, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io;

use crate::error::{Result, RunbookError};

use super::Prompt;

/// Convert dialoguer errors to RunbookError.
fn map_dialoguer_err(e: dialoguer::Error) -> RunbookError {
    RunbookError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Read one response from the terminal.
///
/// Silent prompts echo `*` per character but return what was typed.
pub fn read_response(prompt: &Prompt, term: &Term) -> Result<String> {
    term.write_line("")?;
    if prompt.silent {
        read_masked(prompt, term)
    } else {
        read_visible(prompt, term)
    }
}

fn read_visible(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.query)
        .allow_empty(true);

    let response = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .show_default(true)
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(response)
}

fn read_masked(prompt: &Prompt, term: &Term) -> Result<String> {
    term.write_str(&masked_label(prompt))?;

    let mut input = String::new();
    loop {
        match term.read_key()? {
            Key::Enter => {
                term.write_line("")?;
                return Ok(input);
            }
            Key::Backspace => {
                if input.pop().is_some() {
                    term.clear_chars(1)?;
                }
            }
            Key::CtrlC => {
                term.write_line("")?;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "prompt interrupted").into());
            }
            Key::Char(c) if !c.is_control() => {
                input.push(c);
                term.write_str("*")?;
            }
            _ => {}
        }
    }
}

/// The text shown before masked input.
fn masked_label(prompt: &Prompt) -> String {
    match &prompt.default {
        Some(default) => format!("{} [{}] › ", prompt.query, default),
        None => format!("{} › ", prompt.query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_label_without_default() {
        let prompt = Prompt {
            silent: true,
            ..Prompt::new("pw", "enter a password for the root user:")
        };
        assert_eq!(
            masked_label(&prompt),
            "enter a password for the root user: › "
        );
    }

    #[test]
    fn masked_label_shows_default() {
        let prompt = Prompt {
            silent: true,
            default: Some("changeme".to_string()),
            ..Prompt::new("pw", "password:")
        };
        assert_eq!(masked_label(&prompt), "password: [changeme] › ");
    }

    #[test]
    fn prompt_theme_has_empty_prefix() {
        let theme = prompt_theme();
        assert_eq!(theme.prompt_prefix.to_string(), "");
    }
}
