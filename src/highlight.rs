use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Builtins get a bold cyan name, other commands plain; flags are yellow.
    pub fn highlight_command(&self, input: &str, builtin: bool) -> String {
        let style = if builtin {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else {
            Style::builder().bold().build()
        };
        self.highlight_with(input, style)
    }

    pub fn highlight_alias(&self, input: &str) -> String {
        let style = Style::builder().foreground(Color::Green).bold().build();
        self.highlight_with(input, style)
    }

    fn highlight_with(&self, input: &str, command_style: Style) -> String {
        if !self.enabled() || input.trim().is_empty() {
            return input.to_string();
        }

        // Rebuild from the original text so spacing and quotes survive.
        let mut command_style = Some(command_style);
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while !rest.is_empty() {
            let word_start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
            result.push_str(&rest[..word_start]);
            rest = &rest[word_start..];

            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..word_end];
            if word.is_empty() {
                break;
            }

            if let Some(style) = command_style.take() {
                result.push_str(&word.style(style).to_string());
            } else if word.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                result.push_str(&word.style(flag_style).to_string());
            } else {
                result.push_str(word);
            }
            rest = &rest[word_end..];
        }

        result
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        let line = r#"  ls  -la "my dir" "#;

        assert_eq!(highlighter.highlight_command(line, true), line);
        assert_eq!(highlighter.highlight_alias(line), line);
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }
}
