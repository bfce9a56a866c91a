#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    /// Keywords, identifiers, numbers, date literals, `*`.
    Word(String),
    /// Contents of a single- or double-quoted literal.
    Quoted(String),
    /// One of `(`, `)`, `,`.
    Symbol(char),
}

pub(super) fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut current = String::new();
    let mut it = input.chars().peekable();

    while let Some(ch) = it.next() {
        match ch {
            '\'' | '"' => {
                if !current.is_empty() {
                    return Err("Quote cannot start in the middle of a token".to_string());
                }
                let mut literal = String::new();
                let mut closed = false;
                for c in it.by_ref() {
                    if c == ch {
                        closed = true;
                        break;
                    }
                    literal.push(c);
                }
                if !closed {
                    return Err(format!("Unclosed quote ({ch}) in input"));
                }
                if let Some(&next) = it.peek() {
                    if !next.is_whitespace() && !matches!(next, ',' | '(' | ')') {
                        return Err("Characters found immediately after a closing quote".to_string());
                    }
                }
                tokens.push(Token::Quoted(literal));
            }

            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut current)));
                }
            }

            ',' | '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut current)));
                }
                tokens.push(Token::Symbol(ch));
            }

            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(Token::Word(current));
    }

    Ok(tokens)
}

/// Splits input on `;` outside quotes. Blank pieces are dropped and text
/// after the last `;` is ignored.
pub fn split_statements(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match (quote, ch) {
            (None, ';') => {
                let stmt = std::mem::take(&mut current);
                if !stmt.trim().is_empty() {
                    out.push(stmt.trim().to_string());
                }
            }
            (None, '\'' | '"') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    out
}
