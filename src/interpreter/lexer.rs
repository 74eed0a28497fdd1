use std::rc::Rc;

use logos::{FilterResult, Lexer, Logos};

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Classifies a lexical token.
///
/// The derive recognizes raw tokens only. Signed numbers, string escapes and
/// source positions are handled by [`Scanner`], which wraps the generated
/// lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum TokenKind {
    /// End of input. Never produced by the derive; the scanner emits it once
    /// the source is exhausted.
    EndOfFile,
    /// Numeric literal tokens, such as `42`, `3.14`, `.1e12` or `2E-12`.
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", priority = 5)]
    Number,
    /// Double-quoted string literal.
    #[regex(r#""([^"\\]|\\.)*""#, allow_greedy = true)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string, allow_greedy = true)]
    String,
    /// Any run of non-separator characters that is neither a number nor a
    /// keyword, such as `x`, `var_1` or `$tmp`.
    #[regex(r#"[^ \t\r\n\f,;(){}\[\].=+\-*/"]+"#, priority = 1, allow_greedy = true)]
    Identifier,
    /// `var`
    #[token("var")]
    Var,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `function`
    #[token("function")]
    Function,
    /// `this`
    #[token("this")]
    This,
    /// `return`
    #[token("return")]
    Return,
    /// `new`
    #[token("new")]
    New,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    LooseEquality,
    /// `===`
    #[token("===")]
    StrictEquality,
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
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments, possibly spanning lines. */`
    #[token("/*", block_comment)]
    BlockComment,
    /// Line breaks.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::EndOfFile => "end of input",
            Self::Number => "number",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Var => "'var'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Function => "'function'",
            Self::This => "'this'",
            Self::Return => "'return'",
            Self::New => "'new'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Null => "'null'",
            Self::Assign => "'='",
            Self::LooseEquality => "'=='",
            Self::StrictEquality => "'==='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Comment | Self::BlockComment => "comment",
            Self::NewLine => "line break",
            Self::Ignored => "whitespace",
        };
        write!(f, "{text}")
    }
}

/// Errors raised by the generated lexer. The scanner turns them into
/// [`ParseError`]s carrying a position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexError {
    /// Input that matches no token.
    #[default]
    Unrecognized,
    /// A string literal without a closing quote.
    UnterminatedString,
    /// A block comment without a closing `*/`.
    UnterminatedComment,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts so columns can be computed
/// for every token. Cloning the lexer clones these too, which is what makes
/// [`Scanner::peek`] a full snapshot of the scan position.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line number, starting at 1.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

fn newline(lex: &mut Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

fn block_comment(lex: &mut Lexer<TokenKind>) -> FilterResult<(), LexError> {
    let remainder = lex.remainder();
    let Some(end) = remainder.find("*/") else {
        return FilterResult::Error(LexError::UnterminatedComment);
    };

    let body = &remainder[..end];
    if let Some(last) = body.rfind('\n') {
        lex.extras.line += body.matches('\n').count();
        lex.extras.line_start = lex.span().end + last + 1;
    }
    lex.bump(end + 2);
    FilterResult::Skip
}

fn unterminated_string(_: &mut Lexer<TokenKind>) -> Result<(), LexError> {
    Err(LexError::UnterminatedString)
}

/// A 1-based source location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexical token: its kind, its text and where it starts.
///
/// Two tokens are equal when all four fields are equal. For strings the
/// value is the unescaped content without quotes; for everything else it is
/// the source text of the token. The text is shared, so cloning a token is
/// cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The token text.
    pub value:  Rc<str>,
    /// Line of the first character.
    pub line:   usize,
    /// Column of the first character.
    pub column: usize,
}

impl Token {
    /// Creates a token.
    ///
    /// ## Example
    /// ```
    /// use olang::interpreter::lexer::{Token, TokenKind};
    ///
    /// let token = Token::new(TokenKind::Number, "42", 1, 1);
    /// assert_eq!(&*token.value, "42");
    /// assert_eq!(token.position().column, 1);
    /// ```
    #[must_use]
    pub fn new(kind: TokenKind, value: &str, line: usize, column: usize) -> Self {
        Self { kind,
               value: Rc::from(value),
               line,
               column }
    }

    /// Returns where the token starts.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndOfFile => write!(f, "end of input"),
            TokenKind::String => write!(f, "\"{}\"", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

/// Turns source text into tokens on demand.
///
/// `next` consumes a token, `peek` looks at the next token without consuming
/// it by saving the whole scan state, scanning, and restoring the saved
/// state. Once the input is exhausted every call returns an end-of-file
/// token.
#[derive(Clone)]
pub struct Scanner<'s> {
    lexer:         Lexer<'s, TokenKind>,
    previous_line: usize,
    depth:         usize,
    groupings:     usize,
}

impl<'s> Scanner<'s> {
    /// Creates a scanner positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { lexer:         TokenKind::lexer_with_extras(source, LexerExtras::default()),
               previous_line: 1,
               depth:         0,
               groupings:     0, }
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    /// Returns a `ParseError` for unterminated strings or comments.
    ///
    /// ## Example
    /// ```
    /// use olang::interpreter::lexer::{Scanner, TokenKind};
    ///
    /// let mut scanner = Scanner::new("x = 1");
    /// assert_eq!(scanner.next().unwrap().kind, TokenKind::Identifier);
    /// assert_eq!(scanner.next().unwrap().kind, TokenKind::Assign);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> ParseResult<Token> {
        let token = self.scan()?;
        self.previous_line = token.line;
        Ok(token)
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    /// Returns a `ParseError` for unterminated strings or comments.
    pub fn peek(&mut self) -> ParseResult<Token> {
        let snapshot = self.lexer.clone();
        let token = self.scan();
        self.lexer = snapshot;
        token
    }

    /// Line of the most recently consumed token. Used by the parser to end
    /// statements at line breaks.
    #[must_use]
    pub const fn previous_line(&self) -> usize {
        self.previous_line
    }

    /// Whether `token` begins a line after the most recently consumed token
    /// while no parenthesis or bracket is open. Inside `( .. )` and `[ .. ]`
    /// line breaks carry no meaning.
    #[must_use]
    pub const fn starts_new_line(&self, token: &Token) -> bool {
        self.groupings == 0 && token.line > self.previous_line
    }

    /// Number of nested constructs the parser is currently inside.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Marks the start of a nested construct; `grouping` is set for
    /// parentheses and brackets.
    pub const fn enter(&mut self, grouping: bool) {
        self.depth += 1;
        if grouping {
            self.groupings += 1;
        }
    }

    /// Marks the end of a construct opened with [`Scanner::enter`].
    pub const fn leave(&mut self, grouping: bool) {
        self.depth = self.depth.saturating_sub(1);
        if grouping {
            self.groupings = self.groupings.saturating_sub(1);
        }
    }

    fn scan(&mut self) -> ParseResult<Token> {
        let Some(result) = self.lexer.next() else {
            return Ok(self.end_of_file());
        };

        let start = self.lexer.span().start;
        let position = self.position_of(start);
        let kind = result.map_err(|error| self.lex_error(error, position))?;

        match kind {
            TokenKind::Plus | TokenKind::Minus if self.sign_can_fold(start) => {
                Ok(self.fold_sign(kind, start, position))
            },
            TokenKind::String => {
                let slice = self.lexer.slice();
                let token = Token::new(kind, &unescape(slice), position.line, position.column);
                if let Some(last) = slice.rfind('\n') {
                    self.lexer.extras.line += slice.matches('\n').count();
                    self.lexer.extras.line_start = start + last + 1;
                }
                Ok(token)
            },
            _ => Ok(Token::new(kind, self.lexer.slice(), position.line, position.column)),
        }
    }

    /// Glues a sign to a number that follows it without a gap.
    fn fold_sign(&mut self, sign: TokenKind, start: usize, position: Position) -> Token {
        let snapshot = self.lexer.clone();
        if let Some(Ok(TokenKind::Number)) = self.lexer.next()
           && self.lexer.span().start == start + 1
        {
            let end = self.lexer.span().end;
            return Token::new(TokenKind::Number,
                              &self.lexer.source()[start..end],
                              position.line,
                              position.column);
        }
        self.lexer = snapshot;
        Token::new(sign, self.lexer.slice(), position.line, position.column)
    }

    /// A sign may start a number only where an operand is expected: at the
    /// start of input, after whitespace, after an opening delimiter or
    /// separator, or after another operator.
    fn sign_can_fold(&self, start: usize) -> bool {
        self.lexer.source()[..start].chars()
                                    .next_back()
                                    .is_none_or(|c| c.is_whitespace() || "([{,;=+-*/".contains(c))
    }

    fn position_of(&self, offset: usize) -> Position {
        let extras = self.lexer.extras;
        let column = self.lexer.source()[extras.line_start..offset].chars().count() + 1;
        Position::new(extras.line, column)
    }

    fn end_of_file(&self) -> Token {
        let position = self.position_of(self.lexer.source().len());
        Token::new(TokenKind::EndOfFile, "", position.line, position.column)
    }

    fn lex_error(&self, error: LexError, position: Position) -> ParseError {
        let Position { line, column } = position;
        match error {
            LexError::UnterminatedString => ParseError::UnterminatedString { line, column },
            LexError::UnterminatedComment => ParseError::UnterminatedComment { line, column },
            LexError::Unrecognized => {
                ParseError::UnrecognizedCharacter { text: self.lexer.slice().to_string(),
                                                    line,
                                                    column }
            },
        }
    }
}

/// Strips the quotes from a string literal and resolves escape sequences.
///
/// `\n`, `\r` and `\t` become control characters. Any other escaped
/// character, including `"`, `'` and `\`, is kept as is without its
/// backslash.
fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => {},
        }
    }

    value
}

/// Scans the whole source, returning every token up to and including the
/// end-of-file token.
///
/// # Errors
/// Returns a `ParseError` for unterminated strings or comments.
///
/// ## Example
/// ```
/// use olang::interpreter::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("1 + 1").unwrap().iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::EndOfFile]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = scanner.next()?;
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
