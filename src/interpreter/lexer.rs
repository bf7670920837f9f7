use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token of the RPAL source language.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens in single quotes, such as `'abc'`.
    /// Escape sequences `\t`, `\n`, `\\` and `\'` are decoded.
    #[regex(r"'(?:\\.|[^'\\\n])*'", parse_string)]
    StringLiteral(String),
    /// `let`
    #[token("let")]
    Let,
    /// `in`
    #[token("in")]
    In,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `where`
    #[token("where")]
    Where,
    /// `aug`
    #[token("aug")]
    Aug,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `gr`
    #[token("gr")]
    Gr,
    /// `ge`
    #[token("ge")]
    Ge,
    /// `ls`
    #[token("ls")]
    Ls,
    /// `le`
    #[token("le")]
    Le,
    /// `eq`
    #[token("eq")]
    Eq,
    /// `ne`
    #[token("ne")]
    Ne,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `dummy`
    #[token("dummy")]
    Dummy,
    /// `within`
    #[token("within")]
    Within,
    /// `and`
    #[token("and")]
    And,
    /// `rec`
    #[token("rec")]
    Rec,
    /// Identifier tokens; variable or function names such as `x` or `Rev`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `->`
    #[token("->")]
    Arrow,
    /// `**`
    #[token("**")]
    StarStar,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `@`
    #[token("@")]
    At,
    /// `|`
    #[token("|")]
    Pipe,
    /// `=`
    #[token("=")]
    Equals,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// The remaining RPAL operator symbols. They are lexically valid but
    /// appear in no production, so the parser rejects them with a syntax
    /// error rather than the lexer with a character error.
    #[regex(r#"[:$!#%^_\[\]{}"~`?]"#, |lex| lex.slice().to_string())]
    OpSymbol(String),

    /// Newlines advance the line counter and are otherwise ignored.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the literal does not fit into an `i64`, which the
/// lexer reports as an error token.
fn parse_integer(lex: &mut logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Decodes a string literal from the current token slice.
///
/// Strips the surrounding quotes and decodes the escape sequences `\t`,
/// `\n`, `\\` and `\'`. Unknown escapes are kept verbatim.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('t') => result.push('\t'),
                Some('n') => result.push('\n'),
                Some('\\') => result.push('\\'),
                Some('\'') => result.push('\''),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                },
                None => return None,
            }
        } else {
            result.push(c);
        }
    }

    Some(result)
}

/// Converts RPAL source text into a sequence of `(token, line)` pairs.
///
/// The token stream ends at the end of input; whitespace and comments are
/// skipped, and newlines advance the line counter attached to each token.
///
/// # Errors
/// Returns a [`LexError`] on the first source position where no token can
/// be formed, distinguishing stray characters, unterminated strings, and
/// oversized integer literals.
///
/// # Example
/// ```
/// use myrpal::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 5").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[1].0, Token::Identifier("x".to_string()));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();
                let line = lexer.extras.line;
                return Err(classify_failure(slice, line));
            },
        }
    }

    Ok(tokens)
}

/// Maps a failed lexer slice to the matching [`LexError`] variant.
fn classify_failure(slice: &str, line: usize) -> LexError {
    if slice.starts_with('\'') {
        LexError::UnterminatedString { line }
    } else if slice.chars().all(|c| c.is_ascii_digit()) && !slice.is_empty() {
        LexError::IntegerTooLarge { line }
    } else {
        LexError::UnrecognizedCharacter { text: slice.to_string(),
                                          line }
    }
}
